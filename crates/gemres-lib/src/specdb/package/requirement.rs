use serde::*;
use lazy_static::lazy_static;
use regex::Regex;

use super::Version;
use crate::error::FormatError;

lazy_static! {
	static ref REQUIREMENT_PATTERN: Regex = Regex::new(r"^\s*(!=|>=|<=|~>|=|>|<)?\s*([0-9]+(\.[0-9A-Za-z]+)*)?\s*$").expect("requirement pattern should compile");
}

/// A comparison applied to a version by a [`Requirement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
	#[serde(rename = "=")] Eq,
	#[serde(rename = "!=")] NotEq,
	#[serde(rename = ">")] Gt,
	#[serde(rename = "<")] Lt,
	#[serde(rename = ">=")] GtEq,
	#[serde(rename = "<=")] LtEq,
	/// `~> 2.2.1` allows `>= 2.2.1` up to but not including `2.3`.
	#[serde(rename = "~>")] Pessimistic,
}

impl Operator {
	fn parse(s: &str) -> Option<Operator> {
		Some(match s {
			"=" => Operator::Eq,
			"!=" => Operator::NotEq,
			">" => Operator::Gt,
			"<" => Operator::Lt,
			">=" => Operator::GtEq,
			"<=" => Operator::LtEq,
			"~>" => Operator::Pessimistic,
			_ => return None,
		})
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Operator::Eq => "=",
			Operator::NotEq => "!=",
			Operator::Gt => ">",
			Operator::Lt => "<",
			Operator::GtEq => ">=",
			Operator::LtEq => "<=",
			Operator::Pessimistic => "~>",
		}
	}

	/// Checks `version` against `bound` using this operator.
	pub fn check(&self, version: &Version, bound: &Version) -> bool {
		match self {
			Operator::Eq => version == bound,
			Operator::NotEq => version != bound,
			Operator::Gt => version > bound,
			Operator::Lt => version < bound,
			Operator::GtEq => version >= bound,
			Operator::LtEq => version <= bound,
			Operator::Pessimistic => version >= bound && version.release() < bound.bump(),
		}
	}
}

impl std::fmt::Display for Operator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

/// A set of version constraints which must all hold.
///
/// Created from strings such as `">= 1.4"` or `"~> 2.2"`. A bare version means `=`
/// and a blank version means `0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RequirementRepr", into = "RequirementRepr")]
pub struct Requirement {
	requirements: Vec<(Operator, Version)>,
}

/// Constraint order doesn't matter, `>= 1, < 2` and `< 2, >= 1` are the same requirement.
impl PartialEq for Requirement {
	fn eq(&self, other: &Self) -> bool {
		self.requirements.iter().all(|r| other.requirements.contains(r))
			&& other.requirements.iter().all(|r| self.requirements.contains(r))
	}
}

impl Eq for Requirement {}

impl Default for Requirement {
	/// `>= 0`, which every release version satisfies.
	fn default() -> Self {
		Requirement { requirements: vec![(Operator::GtEq, Version::zero())] }
	}
}

impl Requirement {
	/// Parses a single constraint. A blank string is the default requirement.
	pub fn parse(s: &str) -> Result<Self, FormatError> {
		if s.trim().is_empty() {
			return Ok(Requirement::default());
		}
		Ok(Requirement { requirements: vec![parse_constraint(s)?] })
	}

	/// Parses a list of constraints joined with AND. An empty list is the default requirement.
	pub fn parse_list<S: AsRef<str>>(list: &[S]) -> Result<Self, FormatError> {
		let requirements = list.iter()
			.map(|s| s.as_ref())
			.filter(|s| !s.trim().is_empty())
			.map(parse_constraint)
			.collect::<Result<Vec<_>, _>>()?;

		if requirements.is_empty() {
			Ok(Requirement::default())
		} else {
			Ok(Requirement { requirements })
		}
	}

	/// A requirement for exactly `version`.
	pub fn exact(version: Version) -> Self {
		Requirement { requirements: vec![(Operator::Eq, version)] }
	}

	pub fn constraints(&self) -> &[(Operator, Version)] {
		&self.requirements
	}

	pub fn is_satisfied_by(&self, version: &Version) -> bool {
		self.requirements.iter().all(|(op, bound)| op.check(version, bound))
	}

	/// Returns the AND of both requirements.
	pub fn merge(&self, other: &Requirement) -> Requirement {
		let mut requirements = self.requirements.clone();
		for r in &other.requirements {
			if !requirements.contains(r) {
				requirements.push(r.clone());
			}
		}
		Requirement { requirements }
	}

	/// True when this is the default requirement and allows anything.
	pub fn is_none(&self) -> bool {
		*self == Requirement::default()
	}

	/// True when any constraint names a prerelease version, opting in to prerelease candidates.
	pub fn is_prerelease(&self) -> bool {
		self.requirements.iter().any(|(_, v)| v.is_prerelease())
	}

	/// True when the requirement pins or caps the version rather than only setting a minimum.
	pub fn is_specific(&self) -> bool {
		self.requirements.iter().any(|(op, _)| !matches!(op, Operator::Gt | Operator::GtEq))
	}
}

fn parse_constraint(s: &str) -> Result<(Operator, Version), FormatError> {
	let caps = REQUIREMENT_PATTERN.captures(s)
		.ok_or_else(|| FormatError::MalformedRequirement(s.to_string()))?;

	let op = match caps.get(1) {
		Some(m) => Operator::parse(m.as_str()).ok_or_else(|| FormatError::MalformedRequirement(s.to_string()))?,
		None => Operator::Eq,
	};
	let version = Version::new(caps.get(2).map(|m| m.as_str()).unwrap_or(""))?;

	Ok((op, version))
}

impl std::str::FromStr for Requirement {
	type Err = FormatError;
	fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse(s) }
}

impl std::fmt::Display for Requirement {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let parts = self.requirements.iter()
			.map(|(op, v)| format!("{} {}", op, v))
			.collect::<Vec<_>>();
		write!(f, "{}", parts.join(", "))
	}
}

/// Serialized form, either one constraint string or a list of them.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RequirementRepr {
	One(String),
	Many(Vec<String>),
}

impl TryFrom<RequirementRepr> for Requirement {
	type Error = FormatError;
	fn try_from(value: RequirementRepr) -> Result<Self, Self::Error> {
		match value {
			RequirementRepr::One(s) => Requirement::parse(&s),
			RequirementRepr::Many(v) => Requirement::parse_list(&v),
		}
	}
}

impl From<Requirement> for RequirementRepr {
	fn from(value: Requirement) -> Self {
		RequirementRepr::Many(value.requirements.iter().map(|(op, v)| format!("{} {}", op, v)).collect())
	}
}
