//! Dependency resolution for versioned packages.
//!
//! Given a [`SpecPool`] of available packages and a list of root requirements, the
//! [`relationship_resolver`] selects one package per name such that every dependency is satisfied,
//! and a [`DependencyList`] orders the result for installation.

pub mod error;
pub use error::Result;
pub use error::Error;
pub use error::FormatError;

pub mod specdb;
pub use specdb::SpecPool;
pub use specdb::SpecSource;
pub use specdb::package::PackageSpec;
pub use specdb::package::Version;
pub use specdb::package::Requirement;
pub use specdb::package::Dependency;

pub mod config;
pub use config::ResolverOptions;

pub mod dependency_list;
pub use dependency_list::DependencyList;

pub mod relationship_resolver;
