use gemres::relationship_resolver::ResolverBuilder;
use gemres::specdb::package::*;
use gemres::config::PlatformPolicy;
use gemres::{ResolverOptions, SpecPool};

#[derive(Debug, thiserror::Error)]
enum Error {
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error(transparent)]
	Gemres(#[from] gemres::Error),
}

impl From<gemres::FormatError> for Error {
	fn from(value: gemres::FormatError) -> Self {
		Error::Gemres(value.into())
	}
}

impl From<serde_json::Error> for Error {
	fn from(value: serde_json::Error) -> Self {
		Error::Gemres(value.into())
	}
}

fn main() {
	let mut opts;

	/* Parse console input */
	let parsed_options = {
		let args: Vec<String> = std::env::args().collect();

		opts = getopts::Options::new();
		opts.optflag( "h", "help",           "Show help");
		opts.optflag( "v", "verbose",        "Increased verbosity");
		opts.optflag( "",  "dev",            "Resolve development dependencies too");
		opts.optflag( "",  "pre",            "Allow prerelease versions");
		opts.optopt(  "",  "platform",       "Platform of the running system", "PLATFORM");
		opts.optflag( "",  "first-platform", "Use the first available platform when none can be installed");
		opts.parsing_style(getopts::ParsingStyle::FloatingFrees);

		let parsed_options = match opts.parse(&args[1..]) {
			Ok(m)  => { m }
			Err(e) => { println!("Unable to parse options: {}", e); return }
		};

		if parsed_options.opt_present("h") || parsed_options.free.len() < 2 {
			eprintln!("{}", opts.usage("Usage: gemres [options] <pool.json> <name[:requirement]>..."));
			return;
		}

		parsed_options
	};

	let mut logger = env_logger::Builder::from_default_env();
	if parsed_options.opt_present("v") {
		logger.filter_level(log::LevelFilter::Debug);
	}
	logger.init();

	let mut options = ResolverOptions::default();
	options.set_include_development(parsed_options.opt_present("dev"));
	options.set_allow_prerelease(parsed_options.opt_present("pre"));
	if let Some(platform) = parsed_options.opt_str("platform") {
		options.set_host_platform(Platform::new(&platform));
	}
	if parsed_options.opt_present("first-platform") {
		options.set_platform_policy(PlatformPolicy::FirstAvailable);
	}

	let (pool_path, requirements) = parsed_options.free.split_at(1);
	if let Err(e) = run(&pool_path[0], requirements, options) {
		log::error!("{}", e);
		std::process::exit(1);
	}
}

fn run(pool_path: &str, requirements: &[String], options: ResolverOptions) -> Result<(), Error> {
	let data = std::fs::read_to_string(pool_path)?;
	let pool: SpecPool = serde_json::from_str::<Vec<PackageSpec>>(&data)?.into_iter().collect();
	log::info!("loaded {} packages from {}", pool.len(), pool_path);

	let requirements = requirements.iter()
		.map(|r| parse_requirement(r))
		.collect::<Result<Vec<_>, _>>()?;

	let resolution = ResolverBuilder::new(&pool)
		.add_requirements(requirements)
		.options(options)
		.build()
		.resolve()
		.map_err(gemres::Error::from)?;

	for spec in resolution.dependency_order() {
		println!("{}", spec.full_name());
	}
	Ok(())
}

/// `name` or `name:constraint,constraint`
fn parse_requirement(arg: &str) -> Result<Dependency, gemres::FormatError> {
	match arg.split_once(':') {
		Some((name, constraints)) => {
			let constraints: Vec<&str> = constraints.split(',').collect();
			Ok(Dependency::new(name.trim(), Requirement::parse_list(&constraints)?))
		},
		None => Ok(Dependency::new(arg.trim(), Requirement::default())),
	}
}
