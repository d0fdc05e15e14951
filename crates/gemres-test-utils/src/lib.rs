//! Various helper functions for testing
//!
//! functions in this module should use results and not use any panics to avoid confusion in callers

use gemres::specdb::package::*;
use gemres::{FormatError, SpecPool};

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("JSON error: {0}")]
	SerdeJSON(#[from] serde_json::Error),
	#[error("format error: {0}")]
	Format(#[from] FormatError),
}

/// A ruby platform package with no dependencies.
pub fn quick_spec(name: &str, version: &str) -> Result<PackageSpec, FormatError> {
	Ok(PackageSpec::new(name, Version::new(version)?))
}

/// A ruby platform package with runtime dependencies given as `(name, requirement)`.
///
/// Requirements may hold several constraints separated by commas, e.g. `"> 1.4, <= 1.6"`.
pub fn quick_spec_with(name: &str, version: &str, dependencies: &[(&str, &str)]) -> Result<PackageSpec, FormatError> {
	let mut spec = quick_spec(name, version)?;
	for (dep, requirement) in dependencies {
		let constraints: Vec<&str> = requirement.split(',').collect();
		spec = spec.add_runtime_dependency(dep, Requirement::parse_list(&constraints)?);
	}
	Ok(spec)
}

pub fn pool_of(specs: impl IntoIterator<Item = PackageSpec>) -> SpecPool {
	specs.into_iter().collect()
}

/// Reads a pool from a JSON array of packages.
pub fn pool_from_json(path: impl AsRef<std::path::Path>) -> Result<SpecPool, FixtureError> {
	let data = std::fs::read_to_string(path)?;
	pool_from_json_str(&data)
}

pub fn pool_from_json_str(data: &str) -> Result<SpecPool, FixtureError> {
	let specs: Vec<PackageSpec> = serde_json::from_str(data)?;
	Ok(pool_of(specs))
}

/// Path of the bundled pool fixture.
pub fn fixture_pool_path() -> std::path::PathBuf {
	std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join("pool.json")
}

/// The bundled pool fixture, a small set of well known gems including platform builds and prereleases.
pub fn fixture_pool() -> Result<SpecPool, FixtureError> {
	pool_from_json(fixture_pool_path())
}
