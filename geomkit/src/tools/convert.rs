use super::{OutputArgs, read_geometry, write_geometry};
use anyhow::Result;

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// geometry as WKT or hex WKB, or "-" to read it from stdin
	#[arg()]
	input: String,

	#[command(flatten)]
	output: OutputArgs,
}

pub fn run(arguments: &Subcommand) -> Result<String> {
	let handle = read_geometry(&arguments.input)?;
	write_geometry(&handle, &arguments.output)
}
