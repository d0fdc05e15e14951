use serde::*;
use regex::Regex;

use super::*;
use crate::error::FormatError;

/// The name a [`Dependency`] asks for, either exactly or by pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "NamePatternRepr", into = "NamePatternRepr")]
pub enum NamePattern {
	Exact(String),
	Pattern(Regex),
}

impl NamePattern {
	pub fn pattern(pattern: &str) -> Result<Self, FormatError> {
		Ok(NamePattern::Pattern(Regex::new(pattern)?))
	}

	pub fn matches(&self, name: &str) -> bool {
		match self {
			NamePattern::Exact(n) => n == name,
			NamePattern::Pattern(re) => re.is_match(name),
		}
	}

	/// The exact name, `None` for patterns.
	pub fn as_exact(&self) -> Option<&str> {
		match self {
			NamePattern::Exact(n) => Some(n),
			NamePattern::Pattern(_) => None,
		}
	}

	pub fn as_str(&self) -> &str {
		match self {
			NamePattern::Exact(n) => n,
			NamePattern::Pattern(re) => re.as_str(),
		}
	}
}

impl PartialEq for NamePattern {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(NamePattern::Exact(a), NamePattern::Exact(b)) => a == b,
			(NamePattern::Pattern(a), NamePattern::Pattern(b)) => a.as_str() == b.as_str(),
			_ => false,
		}
	}
}

impl Eq for NamePattern {}

impl From<&str> for NamePattern {
	fn from(value: &str) -> Self { NamePattern::Exact(value.to_string()) }
}

impl From<String> for NamePattern {
	fn from(value: String) -> Self { NamePattern::Exact(value) }
}

impl std::fmt::Display for NamePattern {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			NamePattern::Exact(n) => write!(f, "{}", n),
			NamePattern::Pattern(re) => write!(f, "/{}/", re.as_str()),
		}
	}
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum NamePatternRepr {
	Exact(String),
	Pattern { pattern: String },
}

impl TryFrom<NamePatternRepr> for NamePattern {
	type Error = FormatError;
	fn try_from(value: NamePatternRepr) -> Result<Self, Self::Error> {
		match value {
			NamePatternRepr::Exact(n) => Ok(NamePattern::Exact(n)),
			NamePatternRepr::Pattern { pattern } => NamePattern::pattern(&pattern),
		}
	}
}

impl From<NamePattern> for NamePatternRepr {
	fn from(value: NamePattern) -> Self {
		match value {
			NamePattern::Exact(n) => NamePatternRepr::Exact(n),
			NamePattern::Pattern(re) => NamePatternRepr::Pattern { pattern: re.as_str().to_string() },
		}
	}
}

/// When a dependency is needed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyType {
	/// Needed to use the package.
	#[default] Runtime,
	/// Only needed to work on the package itself.
	Development,
}

impl std::str::FromStr for DependencyType {
	type Err = FormatError;
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"runtime" => Ok(DependencyType::Runtime),
			"development" => Ok(DependencyType::Development),
			other => Err(FormatError::UnknownDependencyType(other.to_string())),
		}
	}
}

impl std::fmt::Display for DependencyType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			DependencyType::Runtime => write!(f, "runtime"),
			DependencyType::Development => write!(f, "development"),
		}
	}
}

/// A constraint a package places on another package.
///
/// Differs from a [`PackageSpec`] in that it describes a range of packages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
	pub name: NamePattern,
	#[serde(default)]
	pub requirement: Requirement,
	#[serde(default, rename = "type")]
	pub kind: DependencyType,
}

impl Dependency {
	/// A runtime dependency.
	pub fn new(name: impl Into<NamePattern>, requirement: Requirement) -> Self {
		Self::with_type(name, requirement, DependencyType::Runtime)
	}

	pub fn with_type(name: impl Into<NamePattern>, requirement: Requirement, kind: DependencyType) -> Self {
		Self {
			name: name.into(),
			requirement,
			kind,
		}
	}

	/// Parses the requirement strings, see [`Requirement::parse_list`].
	pub fn parse<S: AsRef<str>>(name: impl Into<NamePattern>, requirements: &[S], kind: DependencyType) -> Result<Self, FormatError> {
		Ok(Self::with_type(name, Requirement::parse_list(requirements)?, kind))
	}

	pub fn is_runtime(&self) -> bool {
		self.kind == DependencyType::Runtime
	}

	/// Whether `spec` fulfills this dependency by name and version.
	pub fn matches_spec(&self, spec: &PackageSpec) -> bool {
		self.name.matches(&spec.name) && self.requirement.is_satisfied_by(&spec.version)
	}
}

impl std::fmt::Display for Dependency {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} ({}, {})", self.name, self.requirement, self.kind)
	}
}
