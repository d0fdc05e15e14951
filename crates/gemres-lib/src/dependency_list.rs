//! # Dependency lists
//!
//! A [`DependencyList`] is a set of packages, usually the outcome of a resolve, that can be checked for closure and
//! ordered so each package comes after everything it depends on.
//!
//! The list only borrows its packages, they stay owned by the [`SpecPool`] they came from.

use std::collections::BTreeMap;

use petgraph::prelude::*;

use crate::specdb::*;
use crate::specdb::package::*;

#[derive(Debug, Clone, Default)]
pub struct DependencyList<'a> {
	specs: Vec<&'a PackageSpec>,
	development: bool,
}

/// Runtime dependencies, plus development dependencies when `development` is set.
fn considered_dependencies(spec: &PackageSpec, development: bool) -> impl Iterator<Item = &Dependency> {
	spec.dependencies.iter().filter(move |d| development || d.is_runtime())
}

impl<'a> DependencyList<'a> {
	/// `development` decides if development dependencies are taken into account alongside runtime ones.
	pub fn new(development: bool) -> Self {
		Self {
			specs: Default::default(),
			development,
		}
	}

	/// A list of every package in `pool`.
	pub fn from_pool(pool: &'a SpecPool, development: bool) -> Self {
		let mut list = Self::new(development);
		list.add_all(pool.iter());
		list
	}

	pub fn is_development(&self) -> bool {
		self.development
	}

	/// Adds `spec` unless a package with the same full name is already present.
	///
	/// Returns `true` if the package was added.
	pub fn add(&mut self, spec: &'a PackageSpec) -> bool {
		if self.specs.iter().any(|s| same_entry(s, spec)) {
			false
		} else {
			self.specs.push(spec);
			true
		}
	}

	pub fn add_all(&mut self, specs: impl IntoIterator<Item = &'a PackageSpec>) {
		for spec in specs {
			self.add(spec);
		}
	}

	pub fn find_name(&self, full_name: &str) -> Option<&'a PackageSpec> {
		self.specs.iter().find(|s| s.full_name() == full_name).copied()
	}

	/// Removes and returns the package called `full_name`.
	pub fn remove_by_name(&mut self, full_name: &str) -> Option<&'a PackageSpec> {
		let index = self.specs.iter().position(|s| s.full_name() == full_name)?;
		Some(self.specs.remove(index))
	}

	pub fn len(&self) -> usize {
		self.specs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.specs.is_empty()
	}

	/// Packages in the order they were added.
	pub fn iter(&self) -> impl Iterator<Item = &'a PackageSpec> + '_ {
		self.specs.iter().copied()
	}

	pub fn specs(&self) -> &[&'a PackageSpec] {
		&self.specs
	}

	/// Checks that every dependency of every package is satisfied by some package in the list.
	pub fn ok(&self) -> bool {
		self.specs.iter().all(|spec| {
			considered_dependencies(spec, self.development).all(|d| self.is_satisfied(d))
		})
	}

	/// The dependencies nothing in the list satisfies, keyed by the full name of the package declaring them.
	pub fn why_not_ok(&self) -> BTreeMap<String, Vec<&'a Dependency>> {
		let mut unsatisfied = BTreeMap::<String, Vec<&'a Dependency>>::new();
		for &spec in &self.specs {
			let missing: Vec<&'a Dependency> = considered_dependencies(spec, self.development)
				.filter(|d| !self.is_satisfied(d))
				.collect();
			if !missing.is_empty() {
				unsatisfied.insert(spec.full_name(), missing);
			}
		}
		unsatisfied
	}

	/// Checks whether removing `full_name` leaves the list [`ok`](Self::ok).
	///
	/// Other versions of the same package still in the list count, so a dependency that one of them also fulfills does
	/// not block removal. An unknown name is always ok to remove.
	pub fn ok_to_remove(&self, full_name: &str) -> bool {
		let Some(target) = self.find_name(full_name) else {
			return true
		};

		let siblings: Vec<&PackageSpec> = self.specs.iter()
			.copied()
			.filter(|s| s.name == target.name && !same_entry(s, target))
			.collect();

		self.specs.iter()
			.filter(|s| !same_entry(s, target))
			.flat_map(|s| considered_dependencies(s, self.development))
			.filter(|d| d.matches_spec(target))
			.all(|d| siblings.iter().any(|s| d.matches_spec(s)))
	}

	/// Packages ordered so dependencies come before the packages depending on them.
	///
	/// At each step the first remaining package, by insertion order, whose dependencies are all either already placed
	/// or not provided by anything else remaining is placed. When nothing qualifies the list contains a cycle and the
	/// first remaining package another remaining package depends on is placed anyway.
	pub fn dependency_order(&self) -> Vec<&'a PackageSpec> {
		let mut remaining = self.specs.clone();
		let mut placed = Vec::<&'a PackageSpec>::with_capacity(remaining.len());

		while !remaining.is_empty() {
			let index = match remaining.iter().position(|s| self.is_placeable(s, &placed, &remaining)) {
				Some(index) => index,
				None => {
					/* Stuck on a cycle, start with its first member something else is waiting on */
					let index = remaining.iter()
						.position(|s| self.is_required(s, &remaining))
						.unwrap_or(0);
					log::info!("dependency cycle among {} packages, placing {} first", remaining.len(), remaining[index]);
					index
				},
			};
			placed.push(remaining.remove(index));
		}

		placed
	}

	/// Graph of the list with an edge from each package to every other package fulfilling one of its dependencies.
	pub fn dependency_graph(&self) -> DiGraph<&'a PackageSpec, &'a Dependency> {
		let mut graph = DiGraph::<&'a PackageSpec, &'a Dependency>::with_capacity(self.specs.len(), 0);
		let nodes: Vec<NodeIndex> = self.specs.iter().map(|s| graph.add_node(*s)).collect();

		for (i, &spec) in self.specs.iter().enumerate() {
			for d in considered_dependencies(spec, self.development) {
				for (j, other) in self.specs.iter().enumerate() {
					if i != j && d.matches_spec(other) {
						graph.add_edge(nodes[i], nodes[j], d);
					}
				}
			}
		}

		graph
	}

	/// True when some packages depend on each other in a loop.
	///
	/// Such lists are legal, [`dependency_order`](Self::dependency_order) still places every package.
	pub fn has_cycle(&self) -> bool {
		petgraph::algo::is_cyclic_directed(&self.dependency_graph())
	}

	fn is_satisfied(&self, dependency: &Dependency) -> bool {
		self.specs.iter().any(|s| dependency.matches_spec(s))
	}

	fn is_required(&self, spec: &PackageSpec, remaining: &[&PackageSpec]) -> bool {
		remaining.iter()
			.filter(|r| !same_entry(r, spec))
			.any(|r| considered_dependencies(r, self.development).any(|d| d.matches_spec(spec)))
	}

	fn is_placeable(&self, spec: &PackageSpec, placed: &[&PackageSpec], remaining: &[&PackageSpec]) -> bool {
		considered_dependencies(spec, self.development).all(|d| {
			placed.iter().any(|p| d.matches_spec(p))
			|| !remaining.iter().any(|r| !same_entry(r, spec) && d.matches_spec(r))
		})
	}
}

/// Entries are identified by full name, the same key a [`SpecPool`](crate::SpecPool) uses.
fn same_entry(a: &PackageSpec, b: &PackageSpec) -> bool {
	a.full_name() == b.full_name()
}

impl<'a> IntoIterator for DependencyList<'a> {
	type Item = &'a PackageSpec;
	type IntoIter = std::vec::IntoIter<&'a PackageSpec>;

	fn into_iter(self) -> Self::IntoIter {
		self.specs.into_iter()
	}
}
