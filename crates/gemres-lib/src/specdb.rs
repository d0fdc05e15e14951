//! # The package pool
//!
//! A caller owned collection of every [`PackageSpec`] available to a resolve.
//! How the specs are fetched or stored is not a concern of this crate, the pool is filled once and then only queried.

use std::collections::{BTreeMap, BTreeSet};

pub mod package;
pub mod iterator;

use package::*;
use iterator::*;

/// Anything the resolver can search for candidate packages.
pub trait SpecSource {
	/// All packages with a name matching `name` and a version satisfying `requirement`, sorted ascending by version.
	fn search(&self, name: &NamePattern, requirement: &Requirement) -> Vec<&PackageSpec>;

	/// Every version available for `name` regardless of requirement, sorted ascending.
	fn versions_of(&self, name: &NamePattern) -> Vec<Version>;
}

/// Packages indexed by their full name.
#[derive(Debug, Clone, Default)]
pub struct SpecPool {
	specs: BTreeMap<String, PackageSpec>,
}

impl SpecPool {
	pub fn new() -> Self {
		Default::default()
	}

	/// Adds a package, replacing any existing package with the same full name.
	pub fn add(&mut self, spec: PackageSpec) {
		self.specs.insert(spec.full_name(), spec);
	}

	pub fn add_all(&mut self, specs: impl IntoIterator<Item = PackageSpec>) {
		for spec in specs {
			self.add(spec);
		}
	}

	pub fn find(&self, full_name: &str) -> Option<&PackageSpec> {
		self.specs.get(full_name)
	}

	pub fn len(&self) -> usize {
		self.specs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.specs.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &PackageSpec> {
		self.specs.values()
	}

	/// Distinct package names, sorted.
	pub fn names(&self) -> Vec<&str> {
		/* Full name order can interleave names, `a-1.2-1.0` sorts between `a-1.0` and `a-1.5` */
		let names: BTreeSet<&str> = self.specs.values().map(|s| s.name.as_str()).collect();
		names.into_iter().collect()
	}

	/// The highest version of `name` on any platform.
	pub fn latest(&self, name: &str) -> Option<&PackageSpec> {
		let pattern = NamePattern::from(name);
		self.specs.values().name_matches(&pattern).max_by(|a, b| a.version.cmp(&b.version))
	}
}

impl SpecSource for SpecPool {
	fn search(&self, name: &NamePattern, requirement: &Requirement) -> Vec<&PackageSpec> {
		let mut found: Vec<&PackageSpec> = self.specs.values()
			.name_matches(name)
			.requirement_matches(requirement)
			.collect();
		found.sort_by(|a, b| a.version.cmp(&b.version).then_with(|| a.cmp(b)));
		found
	}

	fn versions_of(&self, name: &NamePattern) -> Vec<Version> {
		let mut versions: Vec<Version> = self.specs.values()
			.name_matches(name)
			.map(|s| s.version.clone())
			.collect();
		versions.sort();
		versions.dedup();
		versions
	}
}

impl FromIterator<PackageSpec> for SpecPool {
	fn from_iter<T: IntoIterator<Item = PackageSpec>>(iter: T) -> Self {
		let mut pool = SpecPool::new();
		pool.add_all(iter);
		pool
	}
}
