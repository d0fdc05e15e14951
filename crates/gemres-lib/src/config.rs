use crate::specdb::package::Platform;

/// How to pick between candidates when none are built for the running platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlatformPolicy {
	/// Fail with [`ResolveError::NoInstallablePlatform`](crate::relationship_resolver::ResolveError::NoInstallablePlatform).
	#[default]
	PreferRuby,
	/// Use whatever is available, in sorted order.
	FirstAvailable,
}

#[derive(Debug, Clone, Default)]
pub struct ResolverOptions {
	include_development: bool,
	allow_prerelease: bool,
	host_platform: Option<Platform>,
	platform_policy: PlatformPolicy,
}

impl ResolverOptions {
	/// Whether development dependencies of selected packages are resolved too.
	pub fn include_development(&self) -> bool {
		self.include_development
	}
	pub fn set_include_development(&mut self, include_development: bool) {
		self.include_development = include_development;
	}

	/// Prerelease versions are only chosen when allowed here or when a requirement names one.
	pub fn allow_prerelease(&self) -> bool {
		self.allow_prerelease
	}
	pub fn set_allow_prerelease(&mut self, allow_prerelease: bool) {
		self.allow_prerelease = allow_prerelease;
	}

	pub fn host_platform(&self) -> Option<&Platform> {
		self.host_platform.as_ref()
	}
	/// `Platform::Ruby` clears the host, as every package installs there anyway.
	pub fn set_host_platform(&mut self, host_platform: Platform) {
		self.host_platform = match host_platform {
			Platform::Ruby => None,
			specific => Some(specific),
		};
	}

	pub fn platform_policy(&self) -> PlatformPolicy {
		self.platform_policy
	}
	pub fn set_platform_policy(&mut self, platform_policy: PlatformPolicy) {
		self.platform_policy = platform_policy;
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test] fn options_default_excludes_development() { assert!(!ResolverOptions::default().include_development()) }
	#[test] fn options_default_excludes_prerelease() { assert!(!ResolverOptions::default().allow_prerelease()) }
	#[test] fn options_default_prefers_ruby() { assert_eq!(ResolverOptions::default().platform_policy(), PlatformPolicy::PreferRuby) }

	#[test]
	fn options_ruby_host_is_no_host() {
		let mut options = ResolverOptions::default();
		options.set_host_platform(Platform::new("java"));
		assert_eq!(options.host_platform(), Some(&Platform::new("java")));
		options.set_host_platform(Platform::Ruby);
		assert!(options.host_platform().is_none());
	}
}
