use serde::*;
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::FormatError;

lazy_static! {
	static ref ANCHORED_VERSION_PATTERN: Regex = Regex::new(r"^\s*([0-9]+(\.[0-9A-Za-z]+)*)?\s*$").expect("version pattern should compile");
}

/// A single dot separated part of a [`Version`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
	/// Decimal digits without leading zeros, `0` for zero. Any length is accepted.
	Numeric(String),
	/// Any segment containing a letter, such as `rc1` or `pre`. Marks the version as a prerelease.
	Tag(String),
}

impl Segment {
	fn parse(s: &str) -> Option<Segment> {
		if s.is_empty() {
			None
		} else if s.chars().all(|c| c.is_ascii_digit()) {
			Some(Segment::number(s))
		} else {
			Some(Segment::Tag(s.to_string()))
		}
	}

	fn number(digits: &str) -> Segment {
		let digits = digits.trim_start_matches('0');
		Segment::Numeric(if digits.is_empty() { "0".to_string() } else { digits.to_string() })
	}

	fn zero() -> Segment {
		Segment::Numeric("0".to_string())
	}

	fn is_zero(&self) -> bool {
		matches!(self, Segment::Numeric(n) if n == "0")
	}

	/// Adds one to a numeric segment, carrying through the digits.
	fn increment(&mut self) {
		if let Segment::Numeric(n) = self {
			let mut digits = n.clone().into_bytes();
			let mut carry = true;
			for d in digits.iter_mut().rev() {
				if !carry { break }
				if *d == b'9' {
					*d = b'0';
				} else {
					*d += 1;
					carry = false;
				}
			}
			if carry {
				digits.insert(0, b'1');
			}
			*n = digits.into_iter().map(char::from).collect();
		}
	}

	pub fn is_tag(&self) -> bool {
		matches!(self, Segment::Tag(_))
	}
}

impl Ord for Segment {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		use std::cmp::Ordering;
		match (self, other) {
			/* Without leading zeros a longer digit run is always the larger number */
			(Segment::Numeric(a), Segment::Numeric(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
			(Segment::Tag(a), Segment::Tag(b)) => a.cmp(b),
			/* A prerelease tag always sorts below a number in the same position */
			(Segment::Tag(_), Segment::Numeric(_)) => Ordering::Less,
			(Segment::Numeric(_), Segment::Tag(_)) => Ordering::Greater,
		}
	}
}

impl PartialOrd for Segment {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl std::fmt::Display for Segment {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Segment::Numeric(n) => write!(f, "{}", n),
			Segment::Tag(s) => write!(f, "{}", s),
		}
	}
}

/// The version of a package.
///
/// # Format
/// A version is a series of digits or ASCII letters separated by dots, starting with a number.
/// - Missing trailing segments count as zero so `1.0` and `1.0.0` are equal.
/// - A segment containing a letter makes the version a prerelease, which sorts below the same version without it.
/// - An empty string is the zero version.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
	version: String,
	segments: Vec<Segment>,
}

impl Version {
	pub fn new(version: &str) -> Result<Self, FormatError> {
		if !ANCHORED_VERSION_PATTERN.is_match(version) {
			return Err(FormatError::MalformedVersion(version.to_string()));
		}

		let trimmed = version.trim();
		let version = if trimmed.is_empty() { "0" } else { trimmed };

		let segments = version.split('.')
			.map(Segment::parse)
			.collect::<Option<Vec<_>>>()
			.ok_or_else(|| FormatError::MalformedVersion(version.to_string()))?;

		Ok(Version { version: version.to_string(), segments })
	}

	/// The zero version, `0`.
	pub fn zero() -> Self {
		Version { version: "0".to_string(), segments: vec![Segment::zero()] }
	}

	fn from_segments(segments: Vec<Segment>) -> Self {
		let version = segments.iter().map(|s| s.to_string()).collect::<Vec<_>>().join(".");
		Version { version, segments }
	}

	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	pub fn as_str(&self) -> &str {
		&self.version
	}

	/// A version is a prerelease if any segment contains a letter.
	pub fn is_prerelease(&self) -> bool {
		self.segments.iter().any(Segment::is_tag)
	}

	/// The release for this version, `1.2.0.a` becomes `1.2.0`.
	pub fn release(&self) -> Version {
		if !self.is_prerelease() {
			return self.clone();
		}
		Version::from_segments(release_segments(&self.segments))
	}

	/// Returns a version where the next to last numeric segment is incremented.
	///
	/// Prerelease segments are dropped first, so `5.3.1.b2` bumps to `5.4`.
	/// A single segment version is incremented directly, `5` bumps to `6`.
	pub fn bump(&self) -> Version {
		let mut segments = release_segments(&self.segments);
		if segments.len() > 1 {
			segments.pop();
		}
		if let Some(last) = segments.last_mut() {
			last.increment();
		}
		Version::from_segments(segments)
	}

	/// A recommended `~>` requirement for depending on this version.
	pub fn spermy_recommendation(&self) -> String {
		let mut segments = release_segments(&self.segments);
		segments.truncate(2);
		while segments.len() < 2 {
			segments.push(Segment::zero());
		}
		format!("~> {}", Version::from_segments(segments))
	}
}

/// Pops segments from the end until none of them are tags.
fn release_segments(segments: &[Segment]) -> Vec<Segment> {
	let mut segments = segments.to_vec();
	while segments.iter().any(Segment::is_tag) {
		segments.pop();
	}
	segments
}

impl std::str::FromStr for Version {
	type Err = FormatError;
	fn from_str(s: &str) -> Result<Self, Self::Err> { Self::new(s) }
}

impl TryFrom<String> for Version {
	type Error = FormatError;
	fn try_from(value: String) -> Result<Self, Self::Error> { Self::new(&value) }
}

impl From<Version> for String {
	fn from(value: Version) -> Self { value.version }
}

impl Ord for Version {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		let zero = Segment::zero();
		let limit = std::cmp::max(self.segments.len(), other.segments.len());
		for i in 0..limit {
			let lhs = self.segments.get(i).unwrap_or(&zero);
			let rhs = other.segments.get(i).unwrap_or(&zero);
			match lhs.cmp(rhs) {
				std::cmp::Ordering::Equal => {},
				ord => return ord,
			}
		}
		std::cmp::Ordering::Equal
	}
}

impl PartialOrd for Version {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl PartialEq for Version {
	fn eq(&self, other: &Self) -> bool {
		self.cmp(other) == std::cmp::Ordering::Equal
	}
}

impl Eq for Version {}

impl std::hash::Hash for Version {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		/* Trailing zeros don't change equality so they can't change the hash either */
		let mut end = self.segments.len();
		while end > 0 && self.segments[end - 1].is_zero() {
			end -= 1;
		}
		self.segments[..end].hash(state);
	}
}

impl std::fmt::Display for Version {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.version)
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn v(s: &str) -> Version { Version::new(s).unwrap() }

	#[test] fn version_are_not_compared_lexically() { assert!(v("1.2.4.0") < v("1.2.10.0")) }
	#[test] fn version_identical_are_eq() { assert!(v("1.2.3") == v("1.2.3")) }
	#[test] fn version_higher_version_is_gt() { assert!(v("1.2.3") < v("1.2.4")) }
	#[test] fn version_trailing_zeros_are_eq() { assert!(v("1.0") == v("1.0.0") && v("1.0.0") == v("1.0.0.0")) }
	#[test] fn version_short_nonzero_is_lt() { assert!(v("1.2") < v("1.2.3")) }
	#[test] fn version_prerelease_is_lt_release() { assert!(v("1.0.0.rc1") < v("1.0.0")) }
	#[test] fn version_prerelease_tags_compare_lexically() { assert!(v("1.0.0.rc1") < v("1.0.0.rc2")) }
	#[test] fn version_prerelease_is_gt_previous_release() { assert!(v("1.0.0.rc1") > v("0.9")) }
	#[test] fn version_surrounding_whitespace_is_ignored() { assert_eq!(v("  1.2 ").to_string(), "1.2") }
	#[test] fn version_blank_is_zero() { assert!(v("") == v("0") && v("  ") == v("0.0")) }

	#[test] fn version_rejects_leading_dot() { assert!(Version::new(".1").is_err()) }
	#[test] fn version_rejects_trailing_dot() { assert!(Version::new("1.").is_err()) }
	#[test] fn version_rejects_double_dot() { assert!(Version::new("1..2").is_err()) }
	#[test] fn version_rejects_symbols() { assert!(Version::new("1.2-3").is_err()) }
	#[test] fn version_rejects_leading_letter() { assert!(Version::new("junk").is_err()) }
	#[test] fn version_rejects_inner_whitespace() { assert!(Version::new("1.0 2").is_err()) }

	#[test] fn version_bump_drops_last_segment() { assert_eq!(v("5.2.4").bump().to_string(), "5.3") }
	#[test] fn version_bump_single_segment() { assert_eq!(v("5").bump().to_string(), "6") }
	#[test] fn version_bump_ignores_prerelease() { assert_eq!(v("5.3.1.b2").bump().to_string(), "5.4") }
	#[test] fn version_release_drops_prerelease() { assert_eq!(v("1.2.0.a").release().to_string(), "1.2.0") }
	#[test] fn version_release_of_release_is_same() { assert_eq!(v("1.2.0").release().to_string(), "1.2.0") }
	#[test] fn version_is_prerelease() { assert!(v("1.0.a").is_prerelease() && !v("1.0").is_prerelease()) }
	#[test] fn version_spermy_recommendation() { assert_eq!(v("1.4.3").spermy_recommendation(), "~> 1.4") }
	#[test] fn version_leading_zeros_are_ignored() { assert!(v("1.01") == v("1.1") && v("1.010") > v("1.9")) }
	#[test] fn version_bump_carries() { assert_eq!(v("1.9.3").bump().to_string(), "1.10") }
	#[test] fn version_spermy_recommendation_pads() { assert_eq!(v("1").spermy_recommendation(), "~> 1.0") }

	#[test]
	fn version_accepts_long_segments() {
		let long = v("1.99999999999999999999");
		assert!(long > v("1.18446744073709551615"));
		assert!(long < v("1.100000000000000000000"));
		assert_eq!(long.bump().to_string(), "2");
		assert_eq!(v("1.99999999999999999999.0").bump().to_string(), "1.100000000000000000000");
	}

	#[test]
	fn version_equal_versions_hash_equally() {
		use std::collections::HashSet;
		let set: HashSet<Version> = [v("1.0"), v("1.0.0"), v("1")].into_iter().collect();
		assert_eq!(set.len(), 1);
	}

	#[test]
	fn version_ordering_is_total() {
		let mut versions = ["2.0", "1.0.0.rc1", "1.0", "1.0.0.rc2", "0.9.9", "1.0.1"].map(v).to_vec();
		versions.sort();
		let sorted: Vec<String> = versions.iter().map(|v| v.to_string()).collect();
		assert_eq!(sorted, ["0.9.9", "1.0.0.rc1", "1.0.0.rc2", "1.0", "1.0.1", "2.0"]);
	}

	#[test]
	fn version_serializes_as_string() {
		let json = serde_json::to_string(&v("1.2.3")).unwrap();
		assert_eq!(json, "\"1.2.3\"");
		let back: Version = serde_json::from_str(&json).unwrap();
		assert_eq!(back, v("1.2.3"));
		assert!(serde_json::from_str::<Version>("\"1..2\"").is_err());
	}
}
