use std::collections::HashMap;

use super::Resolver;
use crate::config::ResolverOptions;
use crate::specdb::SpecSource;
use crate::specdb::package::*;

pub struct ResolverBuilder<'db, S: SpecSource + ?Sized> {
	source: &'db S,
	options: ResolverOptions,
	requirements: Vec<Dependency>,
	platform_decisions: HashMap<String, Platform>,
}

impl<'db, S: SpecSource + ?Sized> ResolverBuilder<'db, S> {
	pub fn new(source: &'db S) -> Self {
		Self {
			source,
			options: Default::default(),
			requirements: Default::default(),
			platform_decisions: Default::default(),
		}
	}

	/// Root requirements, resolved in the order given.
	pub fn add_requirements(mut self, requirements: impl IntoIterator<Item = Dependency>) -> Self {
		for requirement in requirements {
			self.requirements.push(requirement);
		}
		self
	}

	pub fn add_requirement(self, requirement: Dependency) -> Self {
		self.add_requirements([requirement])
	}

	pub fn options(mut self, options: ResolverOptions) -> Self {
		self.options = options;
		self
	}

	/// Allows packages called `name` built for `platform` and prefers them over other platforms.
	///
	/// This is the answer to a choice between platform specific builds, made ahead of the resolve.
	pub fn add_platform_decision(mut self, name: &str, platform: Platform) -> Self {
		self.platform_decisions.insert(name.to_owned(), platform);
		self
	}

	pub fn build(self) -> Resolver<'db, S> {
		Resolver::new(self.source, self.requirements, self.options, self.platform_decisions)
	}
}
