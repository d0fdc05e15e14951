use serde::*;

/// The platform a package was built for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
	/// Pure packages which install anywhere.
	#[default] Ruby,
	/// A native build for a target such as `x86_64-linux` or `java`.
	Specific(String),
}

impl Platform {
	pub fn new(platform: &str) -> Self {
		let platform = platform.trim();
		if platform.is_empty() || platform == "ruby" {
			Platform::Ruby
		} else {
			Platform::Specific(platform.to_string())
		}
	}

	pub fn is_ruby(&self) -> bool {
		matches!(self, Platform::Ruby)
	}

	/// Whether a package for this platform can be installed on `host`.
	///
	/// A specific platform matches when it is the host, or when it is a shorter `cpu-os` prefix
	/// of it, so `x86_64-linux` installs on `x86_64-linux-gnu`.
	pub fn matches(&self, host: &Platform) -> bool {
		match (self, host) {
			(Platform::Ruby, _) => true,
			(Platform::Specific(_), Platform::Ruby) => false,
			(Platform::Specific(p), Platform::Specific(h)) => {
				p == h || h.strip_prefix(p.as_str()).map_or(false, |rest| rest.starts_with('-'))
			}
		}
	}

	pub fn as_str(&self) -> &str {
		match self {
			Platform::Ruby => "ruby",
			Platform::Specific(p) => p,
		}
	}
}

impl From<String> for Platform {
	fn from(value: String) -> Self { Platform::new(&value) }
}

impl From<&str> for Platform {
	fn from(value: &str) -> Self { Platform::new(value) }
}

impl From<Platform> for String {
	fn from(value: Platform) -> Self { value.as_str().to_string() }
}

impl std::fmt::Display for Platform {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}
