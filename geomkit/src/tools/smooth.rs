use super::{OutputArgs, read_geometry, write_geometry};
use anyhow::Result;
use geomkit_geometry::{GeometryTrait, SmoothParameters};
use log::info;

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// geometry as WKT or hex WKB, or "-" to read it from stdin
	#[arg()]
	input: String,

	/// number of smoothing passes
	#[arg(long, short, value_name = "int", default_value_t = 1, display_order = 1)]
	iterations: u32,

	/// fraction of each segment cut off at its corners, in (0, 0.5]
	#[arg(long, value_name = "float", default_value_t = 0.25, display_order = 1)]
	offset: f64,

	/// segments not longer than this are kept as they are
	#[arg(long, value_name = "float", default_value_t = 0.0, display_order = 1)]
	min_distance: f64,

	#[command(flatten)]
	output: OutputArgs,
}

pub fn run(arguments: &Subcommand) -> Result<String> {
	let parameters = SmoothParameters::new(arguments.iterations, arguments.offset, arguments.min_distance)?;
	let handle = read_geometry(&arguments.input)?;
	let smoothed = handle.smooth(&parameters);
	info!(
		"smoothed {} vertices into {}",
		handle.geometry().map_or(0, GeometryTrait::n_coordinates),
		smoothed.geometry().map_or(0, GeometryTrait::n_coordinates)
	);
	write_geometry(&smoothed, &arguments.output)
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::Parser;

	#[derive(Parser, Debug)]
	struct Cli {
		#[command(flatten)]
		arguments: Subcommand,
	}

	fn smooth(args: &[&str]) -> Result<String> {
		let mut argv = vec!["smooth"];
		argv.extend_from_slice(args);
		let cli = Cli::try_parse_from(argv)?;
		run(&cli.arguments)
	}

	#[test]
	fn defaults() {
		assert_eq!(
			smooth(&["LineString (0 0, 10 0, 10 10, 20 10)"]).unwrap(),
			"LineString (0 0, 7.5 0, 10 2.5, 10 7.5, 12.5 10, 20 10)"
		);
	}

	#[test]
	fn cutoff_keeps_short_segments() {
		assert_eq!(
			smooth(&["LineString (0 0, 10 0, 10 10, 20 10)", "-i", "4", "--min-distance", "10"]).unwrap(),
			"LineString (0 0, 10 0, 10 10, 20 10)"
		);
	}

	#[test]
	fn invalid_offset() {
		let error = smooth(&["LineString (0 0, 10 0, 10 10)", "--offset", "0.7"]).unwrap_err();
		assert!(error.to_string().contains("smoothing offset"), "{error}");
	}
}
