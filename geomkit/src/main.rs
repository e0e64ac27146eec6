mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{ErrorLevel, Verbosity};

#[derive(Parser, Debug)]
#[command(
	author,
	version,
	about,
	long_about = None,
	propagate_version = true,
	disable_help_subcommand = true,
)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	#[command(flatten)]
	verbose: Verbosity<ErrorLevel>,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Convert a geometry between WKT, hex WKB and GeoJSON
	Convert(tools::convert::Subcommand),

	/// Show type, counts and extent of a geometry
	Inspect(tools::inspect::Subcommand),

	/// Smooth the lines and rings of a geometry
	Smooth(tools::smooth::Subcommand),

	/// Translate, rotate or reproject a geometry
	Transform(tools::transform::Subcommand),
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	env_logger::Builder::new()
		.filter_level(cli.verbose.log_level_filter())
		.format_timestamp(None)
		.init();

	run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
	let output = match &cli.command {
		Commands::Convert(arguments) => tools::convert::run(arguments),
		Commands::Inspect(arguments) => tools::inspect::run(arguments),
		Commands::Smooth(arguments) => tools::smooth::run(arguments),
		Commands::Transform(arguments) => tools::transform::run(arguments),
	}?;
	println!("{output}");
	Ok(())
}
