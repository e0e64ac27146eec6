pub mod convert;
pub mod inspect;
pub mod smooth;
pub mod transform;

use anyhow::{Context, Result, bail};
use geomkit_geometry::{GeometryEncode, GeometryHandle, WktOptions};
use log::debug;
use std::io::Read;

/// Output encodings of the commands that print a geometry.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
	#[default]
	Wkt,
	/// upper-case hexadecimal WKB
	Wkb,
	Geojson,
}

/// Output options shared by every command that prints a geometry.
#[derive(clap::Args, Debug)]
pub struct OutputArgs {
	/// output encoding
	#[arg(long, short, value_enum, default_value_t = OutputFormat::Wkt, display_order = 5)]
	format: OutputFormat,

	/// round WKT coordinates to this many decimals
	#[arg(long, value_name = "int", display_order = 5)]
	precision: Option<u8>,
}

/// Reads a geometry given as WKT or hex WKB. `-` reads it from stdin.
pub fn read_geometry(input: &str) -> Result<GeometryHandle> {
	let text = if input == "-" {
		let mut text = String::new();
		std::io::stdin()
			.read_to_string(&mut text)
			.context("while reading stdin")?;
		text
	} else {
		input.to_string()
	};
	let text = text.trim();

	let handle = if is_hex(text) {
		debug!("reading {} bytes of hex WKB", text.len() / 2);
		GeometryHandle::from_wkb_hex(text)?
	} else {
		debug!("reading WKT");
		GeometryHandle::from_wkt(text)?
	};
	Ok(handle)
}

fn is_hex(text: &str) -> bool {
	!text.is_empty() && text.bytes().all(|byte| byte.is_ascii_hexdigit())
}

pub fn write_geometry(handle: &GeometryHandle, output: &OutputArgs) -> Result<String> {
	let Some(geometry) = handle.geometry() else {
		bail!("no geometry to write");
	};
	Ok(match output.format {
		OutputFormat::Wkt => geometry.to_wkt_with(&WktOptions {
			precision: output.precision,
		}),
		OutputFormat::Wkb => geometry.to_wkb_hex()?,
		OutputFormat::Geojson => geometry.to_geojson(),
	})
}

/// Parses a comma separated list of numbers.
pub fn parse_numbers(text: &str) -> Result<Vec<f64>> {
	text
		.split(',')
		.map(|part| {
			part
				.trim()
				.parse::<f64>()
				.with_context(|| format!("invalid number '{}'", part.trim()))
		})
		.collect()
}
