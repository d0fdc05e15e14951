use super::package::*;

pub struct NameMatches<'p, I> {
	pattern: &'p NamePattern,
	underlying: I,
}

impl<'a, 'p, I> Iterator for NameMatches<'p, I>
where
	I: Iterator<Item = &'a PackageSpec>,
{
	type Item = I::Item;

	fn next(&mut self) -> Option<Self::Item> {
		self.underlying.by_ref().find(|spec| self.pattern.matches(&spec.name))
	}
}

pub trait NameMatchesExt<'a>: Iterator<Item = &'a PackageSpec>
{
	/// Filters the iterator to packages whose name matches `pattern`.
	fn name_matches<'p>(self, pattern: &'p NamePattern) -> NameMatches<'p, Self>
	where
		Self: Sized,
	{
		NameMatches { underlying: self, pattern }
	}
}

impl<'a, I: Iterator<Item = &'a PackageSpec>> NameMatchesExt<'a> for I {}


pub struct RequirementMatches<'p, I> {
	requirement: &'p Requirement,
	underlying: I,
}

impl<'a, 'p, I> Iterator for RequirementMatches<'p, I>
where
	I: Iterator<Item = &'a PackageSpec>,
{
	type Item = I::Item;

	fn next(&mut self) -> Option<Self::Item> {
		for spec in self.underlying.by_ref() {
			if self.requirement.is_satisfied_by(&spec.version) {
				return Some(spec)
			}
		}
		None
	}
}

pub trait RequirementMatchesExt<'a>: Iterator<Item = &'a PackageSpec>
{
	/// Filters the iterator to packages with a version satisfying `requirement`.
	fn requirement_matches<'p>(self, requirement: &'p Requirement) -> RequirementMatches<'p, Self>
	where
		Self: Sized,
	{
		RequirementMatches { underlying: self, requirement }
	}
}

impl<'a, I: Iterator<Item = &'a PackageSpec>> RequirementMatchesExt<'a> for I {}


pub struct PlatformMatches<'p, I> {
	host: Option<&'p Platform>,
	underlying: I,
}

impl<'a, 'p, I> Iterator for PlatformMatches<'p, I>
where
	I: Iterator<Item = &'a PackageSpec>,
{
	type Item = I::Item;

	fn next(&mut self) -> Option<Self::Item> {
		for spec in self.underlying.by_ref() {
			let installable = match self.host {
				Some(host) => spec.platform.matches(host),
				None => spec.platform.is_ruby(),
			};
			if installable {
				return Some(spec)
			}
		}
		None
	}
}

pub trait PlatformMatchesExt<'a>: Iterator<Item = &'a PackageSpec>
{
	/// Filters the iterator to packages installable on `host`.
	/// Without a host only ruby platform packages are kept.
	fn platform_matches<'p>(self, host: Option<&'p Platform>) -> PlatformMatches<'p, Self>
	where
		Self: Sized,
	{
		PlatformMatches { underlying: self, host }
	}
}

impl<'a, I: Iterator<Item = &'a PackageSpec>> PlatformMatchesExt<'a> for I {}

#[cfg(test)]
mod test {
	use super::*;

	fn spec(name: &str, version: &str, platform: &str) -> PackageSpec {
		PackageSpec::new(name, Version::new(version).unwrap()).with_platform(Platform::new(platform))
	}

	#[test]
	fn iterator_filters_chain() {
		let specs = [spec("a", "1.0", "ruby"), spec("a", "2.0", "java"), spec("b", "2.0", "ruby"), spec("a", "3.0", "ruby")];
		let name = NamePattern::from("a");
		let req = Requirement::parse(">= 2").unwrap();
		let host = Platform::new("java");

		let found: Vec<String> = specs.iter()
			.name_matches(&name)
			.requirement_matches(&req)
			.platform_matches(Some(&host))
			.map(PackageSpec::full_name)
			.collect();
		assert_eq!(found, ["a-2.0-java", "a-3.0"]);

		let ruby_only = specs.iter().platform_matches(None).count();
		assert_eq!(ruby_only, 3);
	}
}
