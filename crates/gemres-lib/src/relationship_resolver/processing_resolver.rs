use std::collections::{HashMap, VecDeque};

use indexmap::IndexMap;

use super::*;
use super::finalized_resolver::Selection;
use crate::config::*;
use crate::specdb::SpecSource;

/// Resolver takes a list of root requirements and selects one package per name satisfying them and everything they
/// depend on.
///
/// # Usage
/// Create a resolver using [`ResolverBuilder`] then call [`Resolver::resolve`].
///
/// ## Failures
/// The resolver stops at the first problem it can't solve, described by [`ResolveError`].
pub struct Resolver<'db, S: SpecSource + ?Sized> {
	source: &'db S,
	requirements: Vec<Dependency>,
	options: ResolverOptions,
	/// Tells the resolver which platform to choose for a package name.
	platform_decisions: HashMap<String, Platform>,
}

impl<'db, S: SpecSource + ?Sized> Resolver<'db, S> {
	pub(super) fn new(source: &'db S, requirements: Vec<Dependency>, options: ResolverOptions, platform_decisions: HashMap<String, Platform>) -> Self {
		Resolver {
			source,
			requirements,
			options,
			platform_decisions,
		}
	}

	pub fn requirements(&self) -> &[Dependency] {
		&self.requirements
	}

	pub fn options(&self) -> &ResolverOptions {
		&self.options
	}

	/// Runs the resolve to completion.
	///
	/// Requirements are processed breadth first starting with the roots. A name is settled by the first requirement
	/// seen for it, later requirements on the same name must be satisfied by that choice.
	pub fn resolve(&self) -> Result<Resolution<'db>, ResolveError> {
		let mut selected = IndexMap::<String, Selection<'db>>::new();
		let mut queue: VecDeque<(&Dependency, Option<&'db PackageSpec>)> = self.requirements.iter()
			.map(|d| (d, None))
			.collect();

		while let Some((dependency, requested_by)) = queue.pop_front() {
			log::trace!("resolving {}", dependency);

			let spec = match self.settle(dependency, requested_by, &mut selected) {
				Ok(Some(spec)) => spec,
				Ok(None) => continue,
				Err(e) => {
					log::debug!("resolve failed: {}", e);
					return Err(e);
				}
			};

			log::debug!("selected {} for {}", spec, dependency);
			selected.insert(spec.name.clone(), Selection { spec, requirement: dependency.requirement.clone() });

			for d in &spec.dependencies {
				if d.is_runtime() || self.options.include_development() {
					queue.push_back((d, Some(spec)));
				} else {
					log::trace!("skipping development dependency {} of {}", d, spec);
				}
			}
		}

		let resolution = Resolution::new(selected, self.options.include_development());
		debug_assert!(resolution.dependency_list().ok(), "resolution left dependencies unsatisfied");
		Ok(resolution)
	}

	/// Checks `dependency` against the packages selected so far.
	///
	/// Returns the package to select for it, or `None` when an existing selection already satisfies it.
	fn settle(&self, dependency: &Dependency, requested_by: Option<&PackageSpec>, selected: &mut IndexMap<String, Selection<'db>>) -> Result<Option<&'db PackageSpec>, ResolveError> {
		match &dependency.name {
			NamePattern::Exact(name) => {
				if let Some(existing) = selected.get_mut(name) {
					return if dependency.requirement.is_satisfied_by(&existing.spec.version) {
						existing.requirement = existing.requirement.merge(&dependency.requirement);
						Ok(None)
					} else {
						Err(conflict(existing, dependency, requested_by))
					};
				}

				let candidates = self.candidates(dependency);
				self.select_candidate(dependency, requested_by, candidates).map(Some)
			},
			NamePattern::Pattern(_) => {
				if let Some(existing) = selected.values_mut().find(|s| dependency.matches_spec(s.spec)) {
					existing.requirement = existing.requirement.merge(&dependency.requirement);
					return Ok(None);
				}

				/* Names already settled at a version the pattern can't use */
				let (taken, free): (Vec<_>, Vec<_>) = self.candidates(dependency).into_iter()
					.partition(|c| selected.contains_key(&c.name));
				if free.is_empty() {
					if let Some(existing) = taken.first().and_then(|c| selected.get(&c.name)) {
						return Err(conflict(existing, dependency, requested_by));
					}
				}

				self.select_candidate(dependency, requested_by, free).map(Some)
			},
		}
	}

	/// Packages satisfying `dependency`, ascending by version.
	fn candidates(&self, dependency: &Dependency) -> Vec<&'db PackageSpec> {
		let source: &'db S = self.source;
		let prerelease = self.options.allow_prerelease() || dependency.requirement.is_prerelease();
		source.search(&dependency.name, &dependency.requirement).into_iter()
			.filter(|c| prerelease || !c.version.is_prerelease())
			.collect()
	}

	/// Picks the best platform class among installable candidates, then the highest version within it.
	///
	/// A decided platform beats ruby and ruby beats a host match, so a host specific package is only used when no
	/// ruby package satisfies the dependency.
	fn select_candidate(&self, dependency: &Dependency, requested_by: Option<&PackageSpec>, candidates: Vec<&'db PackageSpec>) -> Result<&'db PackageSpec, ResolveError> {
		let installable: Vec<&'db PackageSpec> = candidates.iter()
			.copied()
			.filter(|c| self.platform_rank(c) > 0)
			.collect();

		let usable = match self.options.platform_policy() {
			_ if !installable.is_empty() => installable,
			PlatformPolicy::FirstAvailable => candidates,
			PlatformPolicy::PreferRuby => match candidates.last() {
				Some(newest) => {
					return Err(ResolveError::NoInstallablePlatform {
						name: newest.name.clone(),
						version: newest.version.clone(),
						platforms: candidates.iter()
							.filter(|c| c.version == newest.version)
							.map(|c| c.platform.clone())
							.collect(),
					});
				},
				None => installable,
			},
		};

		/* Reversed so the first of equally ranked candidates wins */
		usable.iter()
			.rev()
			.max_by(|a, b| {
				self.platform_rank(a).cmp(&self.platform_rank(b))
					.then_with(|| a.version.cmp(&b.version))
			})
			.copied()
			.ok_or_else(|| ResolveError::NoCandidate {
				name: dependency.name.to_string(),
				requirement: dependency.requirement.clone(),
				available: self.source.versions_of(&dependency.name),
				requested_by: requested_by.map(PackageSpec::full_name),
			})
	}

	/// Preference for a candidate's platform, zero when it can't be installed.
	fn platform_rank(&self, spec: &PackageSpec) -> u8 {
		if self.platform_decisions.get(&spec.name) == Some(&spec.platform) {
			3
		} else if spec.platform.is_ruby() {
			2
		} else if self.options.host_platform().map_or(false, |host| spec.platform.matches(host)) {
			1
		} else {
			0
		}
	}
}

fn conflict(existing: &Selection, dependency: &Dependency, requested_by: Option<&PackageSpec>) -> ResolveError {
	ResolveError::Conflict {
		name: existing.spec.name.clone(),
		committed: existing.spec.version.clone(),
		requirement: dependency.requirement.clone(),
		existing: existing.requirement.clone(),
		requested_by: requested_by.map(PackageSpec::full_name),
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::specdb::SpecPool;

	fn spec(name: &str, version: &str, platform: &str) -> PackageSpec {
		PackageSpec::new(name, Version::new(version).unwrap()).with_platform(Platform::new(platform))
	}

	fn resolve_one(pool: &SpecPool, options: ResolverOptions) -> Result<String, ResolveError> {
		let resolution = ResolverBuilder::new(pool)
			.add_requirement(Dependency::new("a", Requirement::default()))
			.options(options)
			.build()
			.resolve()?;
		Ok(resolution.get("a").map(PackageSpec::full_name).unwrap_or_default())
	}

	#[test]
	fn resolver_prefers_ruby_over_newer_host_platform() {
		let pool: SpecPool = [spec("a", "1.0", "ruby"), spec("a", "2.0", "java")].into_iter().collect();
		let mut options = ResolverOptions::default();
		options.set_host_platform(Platform::new("java"));
		assert_eq!(resolve_one(&pool, options).unwrap(), "a-1.0");
	}

	#[test]
	fn resolver_takes_newest_host_platform_without_ruby() {
		let pool: SpecPool = [spec("a", "1.0", "java"), spec("a", "2.0", "java"), spec("a", "3.0", "x86-mswin32")].into_iter().collect();
		let mut options = ResolverOptions::default();
		options.set_host_platform(Platform::new("java"));
		assert_eq!(resolve_one(&pool, options).unwrap(), "a-2.0-java");
	}

	#[test]
	fn resolver_decision_beats_newer_ruby() {
		let pool: SpecPool = [spec("a", "1.0", "java"), spec("a", "2.0", "ruby")].into_iter().collect();
		let resolution = ResolverBuilder::new(&pool)
			.add_requirement(Dependency::new("a", Requirement::default()))
			.add_platform_decision("a", Platform::new("java"))
			.build()
			.resolve()
			.unwrap();
		assert_eq!(resolution.get("a").unwrap().full_name(), "a-1.0-java");
	}

	#[test]
	fn resolver_prefers_ruby_at_same_version() {
		let pool: SpecPool = [spec("a", "1.0", "java"), spec("a", "1.0", "ruby")].into_iter().collect();
		let mut options = ResolverOptions::default();
		options.set_host_platform(Platform::new("java"));
		assert_eq!(resolve_one(&pool, options).unwrap(), "a-1.0");
	}

	#[test]
	fn resolver_skips_foreign_platforms() {
		let pool: SpecPool = [spec("a", "1.0", "ruby"), spec("a", "2.0", "java")].into_iter().collect();
		assert_eq!(resolve_one(&pool, ResolverOptions::default()).unwrap(), "a-1.0");
	}

	#[test]
	fn resolver_rejects_only_foreign_platforms() {
		let pool: SpecPool = [spec("a", "1.0", "java"), spec("a", "1.0", "x86-mswin32")].into_iter().collect();
		match resolve_one(&pool, ResolverOptions::default()) {
			Err(ResolveError::NoInstallablePlatform { name, platforms, .. }) => {
				assert_eq!(name, "a");
				assert_eq!(platforms.len(), 2);
			},
			other => panic!("unexpected result {:?}", other),
		}
	}

	#[test]
	fn resolver_first_available_takes_first_platform() {
		let pool: SpecPool = [spec("a", "1.0", "x86-mswin32"), spec("a", "1.0", "java")].into_iter().collect();
		let mut options = ResolverOptions::default();
		options.set_platform_policy(PlatformPolicy::FirstAvailable);
		assert_eq!(resolve_one(&pool, options).unwrap(), "a-1.0-java");
	}

	#[test]
	fn resolver_follows_platform_decision() {
		let pool: SpecPool = [spec("a", "1.0", "ruby"), spec("a", "1.0", "java")].into_iter().collect();
		let resolution = ResolverBuilder::new(&pool)
			.add_requirement(Dependency::new("a", Requirement::default()))
			.add_platform_decision("a", Platform::new("java"))
			.build()
			.resolve()
			.unwrap();
		assert_eq!(resolution.get("a").unwrap().full_name(), "a-1.0-java");
	}

	#[test]
	fn resolver_skips_prerelease() {
		let pool: SpecPool = [spec("a", "1.0", "ruby"), spec("a", "2.0.rc1", "ruby")].into_iter().collect();
		assert_eq!(resolve_one(&pool, ResolverOptions::default()).unwrap(), "a-1.0");
		let mut options = ResolverOptions::default();
		options.set_allow_prerelease(true);
		assert_eq!(resolve_one(&pool, options).unwrap(), "a-2.0.rc1");
	}
}
