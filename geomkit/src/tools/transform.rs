use super::{OutputArgs, parse_numbers, read_geometry, write_geometry};
use anyhow::{Result, bail};
use geomkit_geometry::{GeometryTransform, PointGeometry, TransformDirection, WebMercator};
use log::debug;

/// Web Mercator reprojection direction.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Projection {
	/// degrees (EPSG:4326) to metres (EPSG:3857)
	ToMercator,
	/// metres (EPSG:3857) to degrees (EPSG:4326)
	FromMercator,
}

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// geometry as WKT or hex WKB, or "-" to read it from stdin
	#[arg()]
	input: String,

	/// move every vertex by dx,dy
	#[arg(long, short, value_name = "dx,dy", allow_hyphen_values = true, display_order = 1)]
	translate: Option<String>,

	/// rotate counter-clockwise by degrees about the origin or about x,y
	#[arg(long, short, value_name = "deg[,x,y]", allow_hyphen_values = true, display_order = 1)]
	rotate: Option<String>,

	/// reproject between WGS 84 and Web Mercator, applied after translation and rotation
	#[arg(long, short, value_enum, display_order = 2)]
	project: Option<Projection>,

	#[command(flatten)]
	output: OutputArgs,
}

pub fn run(arguments: &Subcommand) -> Result<String> {
	let mut handle = read_geometry(&arguments.input)?;

	if let Some(text) = &arguments.translate {
		let [dx, dy] = parse_numbers(text)?[..] else {
			bail!("--translate expects dx,dy, got '{text}'");
		};
		debug!("translating by ({dx}, {dy})");
		handle.translate(dx, dy);
	}

	if let Some(text) = &arguments.rotate {
		let (degrees, about) = match parse_numbers(text)?[..] {
			[degrees] => (degrees, PointGeometry::new(0.0, 0.0)),
			[degrees, x, y] => (degrees, PointGeometry::new(x, y)),
			_ => bail!("--rotate expects deg or deg,x,y, got '{text}'"),
		};
		debug!("rotating by {degrees}° about ({}, {})", about.x(), about.y());
		handle.rotate(degrees, &about);
	}

	if let Some(projection) = arguments.project {
		let direction = match projection {
			Projection::ToMercator => TransformDirection::Forward,
			Projection::FromMercator => TransformDirection::Reverse,
		};
		handle.reproject(&WebMercator, direction)?;
	}

	write_geometry(&handle, &arguments.output)
}
