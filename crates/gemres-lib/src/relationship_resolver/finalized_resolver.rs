//! The outcome of a successful resolve.

use indexmap::IndexMap;

use crate::dependency_list::DependencyList;
use crate::specdb::package::*;

/// A selected package and the combined requirement of everything that asked for it.
#[derive(Debug, Clone)]
pub(super) struct Selection<'db> {
	pub(super) spec: &'db PackageSpec,
	pub(super) requirement: Requirement,
}

#[derive(Debug, Clone)]
pub struct Resolution<'db> {
	selected: IndexMap<String, Selection<'db>>,
	development: bool,
}

impl<'db> Resolution<'db> {
	pub(super) fn new(selected: IndexMap<String, Selection<'db>>, development: bool) -> Self {
		Self {
			selected,
			development,
		}
	}

	/// Selected packages in the order they were selected.
	pub fn specs(&self) -> Vec<&'db PackageSpec> {
		self.selected.values().map(|s| s.spec).collect()
	}

	/// The package selected for `name`.
	pub fn get(&self, name: &str) -> Option<&'db PackageSpec> {
		self.selected.get(name).map(|s| s.spec)
	}

	/// Every requirement placed on `name` during the resolve, merged.
	pub fn requirement_for(&self, name: &str) -> Option<&Requirement> {
		self.selected.get(name).map(|s| &s.requirement)
	}

	pub fn len(&self) -> usize {
		self.selected.len()
	}

	pub fn is_empty(&self) -> bool {
		self.selected.is_empty()
	}

	/// The selected packages as a list, checking development dependencies when they were resolved.
	pub fn dependency_list(&self) -> DependencyList<'db> {
		let mut list = DependencyList::new(self.development);
		list.add_all(self.selected.values().map(|s| s.spec));
		list
	}

	pub fn into_dependency_list(self) -> DependencyList<'db> {
		self.dependency_list()
	}

	/// Selected packages ordered so dependencies are installed first.
	pub fn dependency_order(&self) -> Vec<&'db PackageSpec> {
		self.dependency_list().dependency_order()
	}
}
