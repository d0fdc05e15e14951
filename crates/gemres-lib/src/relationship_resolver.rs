//! Utilities for getting a valid set of compatible packages to be installed from a list of desired packages.
//!
//! # Usage
//! 1. Create a [`ResolverBuilder`] over a [`SpecSource`](crate::specdb::SpecSource) such as a [`SpecPool`](crate::SpecPool).
//! 1. Use the builder to add root requirements, [`ResolverOptions`](crate::ResolverOptions) and platform decisions.
//! 1. [`ResolverBuilder::build()`] to get a [`Resolver`].
//! 1. [`Resolver::resolve()`] to get a [`Resolution`] or the [`ResolveError`] that stopped it.
//! 1. [`Resolution::dependency_order()`] to list the selected packages in install order.
//!
//! The resolver is greedy, each name is settled by the first requirement seen for it using the highest compatible version.
//! Later requirements the chosen version can't satisfy are reported as conflicts, nothing is backtracked.

use crate::specdb::package::*;

mod resolver_builder;
pub use resolver_builder::ResolverBuilder;
mod processing_resolver;
pub use processing_resolver::Resolver;
mod finalized_resolver;
pub use finalized_resolver::Resolution;

/// These errors halt the resolver.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
	/// Nothing in the source matches the name and requirement.
	#[error("no version of `{name}` satisfies `{requirement}`{}, available versions: {}", requester(.requested_by), list(.available))]
	NoCandidate {
		name: String,
		requirement: Requirement,
		/// Every version of `name` in the source, empty when the name is unknown.
		available: Vec<Version>,
		/// Full name of the package declaring the dependency, `None` for root requirements.
		requested_by: Option<String>,
	},
	/// An already selected package does not satisfy a later requirement on the same name.
	#[error("`{name}` {committed} was selected for `{existing}` but `{requirement}` is required{}", requester(.requested_by))]
	Conflict {
		name: String,
		committed: Version,
		requirement: Requirement,
		/// Everything the committed version was selected to satisfy.
		existing: Requirement,
		requested_by: Option<String>,
	},
	/// Every candidate is built for a platform that can't be installed here.
	#[error("`{name}` {version} is only available for {}", list(.platforms))]
	NoInstallablePlatform {
		name: String,
		version: Version,
		platforms: Vec<Platform>,
	},
}

fn requester(requested_by: &Option<String>) -> String {
	match requested_by {
		Some(by) => format!(" for {}", by),
		None => String::new(),
	}
}

fn list<T: std::fmt::Display>(items: &[T]) -> String {
	if items.is_empty() {
		"none".to_string()
	} else {
		items.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(", ")
	}
}
