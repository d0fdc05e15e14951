//! Various types associated with packages.

use serde::*;

/// A named, versioned, platform tagged package along with its dependencies.
///
/// Equality and ordering only consider the name, version and platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageSpec {
	pub name: String,
	pub version: Version,
	#[serde(default)]
	pub platform: Platform,
	#[serde(default)]
	pub dependencies: Vec<Dependency>,
	#[serde(default)]
	pub files: Vec<String>,
	#[serde(default)]
	pub executables: Vec<String>,
}

impl std::hash::Hash for PackageSpec {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		self.name.hash(state);
		self.version.hash(state);
		self.platform.hash(state);
	}
}

impl std::cmp::Ord for PackageSpec {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		match self.name.cmp(&other.name) {
			core::cmp::Ordering::Equal => {}
			ord => return ord,
		}
		match self.version.cmp(&other.version) {
			core::cmp::Ordering::Equal => {}
			ord => return ord,
		}
		self.platform.cmp(&other.platform)
	}
}

impl std::cmp::PartialOrd for PackageSpec {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl std::cmp::PartialEq for PackageSpec {
	fn eq(&self, other: &Self) -> bool {
		self.cmp(other) == std::cmp::Ordering::Equal
	}
}

impl std::cmp::Eq for PackageSpec {}

impl std::fmt::Display for PackageSpec {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.full_name())
	}
}

impl PackageSpec {
	pub fn new(name: &str, version: Version) -> Self {
		Self {
			name: name.to_string(),
			version,
			platform: Platform::Ruby,
			dependencies: Default::default(),
			files: Default::default(),
			executables: Default::default(),
		}
	}

	pub fn with_platform(mut self, platform: Platform) -> Self {
		self.platform = platform;
		self
	}

	pub fn add_dependency(mut self, dependency: Dependency) -> Self {
		self.dependencies.push(dependency);
		self
	}

	pub fn add_runtime_dependency(self, name: &str, requirement: Requirement) -> Self {
		self.add_dependency(Dependency::new(name, requirement))
	}

	pub fn add_development_dependency(self, name: &str, requirement: Requirement) -> Self {
		self.add_dependency(Dependency::with_type(name, requirement, DependencyType::Development))
	}

	/// `name-version`, with `-platform` appended for anything other than the ruby platform.
	pub fn full_name(&self) -> String {
		match &self.platform {
			Platform::Ruby => format!("{}-{}", self.name, self.version),
			Platform::Specific(p) => format!("{}-{}-{}", self.name, self.version, p),
		}
	}

	pub fn is_ruby_platform(&self) -> bool {
		self.platform.is_ruby()
	}

	pub fn runtime_dependencies(&self) -> impl Iterator<Item = &Dependency> {
		self.dependencies.iter().filter(|d| d.kind == DependencyType::Runtime)
	}

	pub fn development_dependencies(&self) -> impl Iterator<Item = &Dependency> {
		self.dependencies.iter().filter(|d| d.kind == DependencyType::Development)
	}

	/// Checks if this package fulfills `dependency` by name and version.
	pub fn satisfies_requirement(&self, dependency: &Dependency) -> bool {
		dependency.matches_spec(self)
	}
}

mod version;
pub use version::Version;
pub use version::Segment;

mod requirement;
pub use requirement::Requirement;
pub use requirement::Operator;

mod platform;
pub use platform::Platform;

mod dependency;
pub use dependency::Dependency;
pub use dependency::DependencyType;
pub use dependency::NamePattern;

#[cfg(test)]
mod test {
	use super::*;

	fn spec(name: &str, version: &str) -> PackageSpec {
		PackageSpec::new(name, Version::new(version).unwrap())
	}

	#[test] fn package_full_name_omits_ruby() { assert_eq!(spec("a", "1.0").full_name(), "a-1.0") }
	#[test] fn package_full_name_has_platform() { assert_eq!(spec("a", "1.0").with_platform(Platform::new("java")).full_name(), "a-1.0-java") }
	#[test] fn package_orders_by_name_first() { assert!(spec("a", "2.0") < spec("b", "1.0")) }
	#[test] fn package_orders_by_version() { assert!(spec("a", "1.2") < spec("a", "1.10")) }

	#[test]
	fn package_satisfies_requirement() {
		let a = spec("a", "1.1");
		assert!(a.satisfies_requirement(&Dependency::new("a", Requirement::parse(">= 1.1").unwrap())));
		assert!(!a.satisfies_requirement(&Dependency::new("a", Requirement::parse("> 1.1").unwrap())));
		assert!(!a.satisfies_requirement(&Dependency::new("b", Requirement::default())));
	}

	#[test]
	fn package_splits_dependency_types() {
		let a = spec("a", "1.0")
			.add_runtime_dependency("b", Requirement::default())
			.add_development_dependency("c", Requirement::default());
		assert_eq!(a.runtime_dependencies().count(), 1);
		assert_eq!(a.development_dependencies().next().map(|d| d.name.as_str()), Some("c"));
	}

	#[test]
	fn package_deserializes_with_defaults() {
		let a: PackageSpec = serde_json::from_str(r#"{
			"name": "a",
			"version": "1.0",
			"dependencies": [{ "name": "b", "requirement": "~> 2.0" }]
		}"#).unwrap();
		assert!(a.is_ruby_platform());
		assert_eq!(a.dependencies.len(), 1);
		assert!(a.files.is_empty() && a.executables.is_empty());
	}
}
