//! Library error type.

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("format error: {0}")]
	Format(#[from] FormatError),
	#[error("resolve error: {0}")]
	Resolve(#[from] crate::relationship_resolver::ResolveError),
	#[error("JSON error: {0}")]
	SerdeJSON(#[from] serde_json::Error),
}

/// Malformed input. These are always returned to the caller, never defaulted.
#[derive(Debug, Error)]
pub enum FormatError {
	#[error("malformed version number string `{0}`")]
	MalformedVersion(String),
	#[error("illformed requirement `{0}`")]
	MalformedRequirement(String),
	#[error("invalid name pattern: {0}")]
	InvalidPattern(#[from] regex::Error),
	#[error("valid dependency types are runtime and development, not `{0}`")]
	UnknownDependencyType(String),
}
