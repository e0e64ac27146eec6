use super::read_geometry;
use anyhow::Result;
use geomkit_geometry::{GeometryHandle, GeometryTrait};

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// geometry as WKT or hex WKB, or "-" to read it from stdin
	#[arg()]
	input: String,
}

pub fn run(arguments: &Subcommand) -> Result<String> {
	let handle = read_geometry(&arguments.input)?;
	Ok(describe(&handle))
}

fn describe(handle: &GeometryHandle) -> String {
	let mut lines = vec![format!("type: {}", handle.geometry_type())];
	if let Some(geometry) = handle.geometry() {
		lines.push(format!("parts: {}", geometry.part_count()));
		let rings: usize = (0..geometry.part_count()).map(|part| geometry.ring_count(part)).sum();
		lines.push(format!("rings: {rings}"));
		lines.push(format!("vertices: {}", geometry.n_coordinates()));
	}
	match handle.bounding_box() {
		Some([x_min, y_min, x_max, y_max]) => lines.push(format!("bbox: [{x_min}, {y_min}, {x_max}, {y_max}]")),
		None => lines.push(String::from("bbox: none")),
	}
	lines.push(format!("length: {}", handle.length()));
	lines.push(format!("perimeter: {}", handle.perimeter()));
	lines.push(format!("area: {}", handle.area()));
	lines.join("\n")
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn polygon() {
		let handle = read_geometry("Polygon ((0 0, 10 0, 10 10, 0 10, 0 0),(2 2, 4 2, 4 4, 2 4, 2 2))").unwrap();
		assert_eq!(
			describe(&handle),
			"type: Polygon\nparts: 1\nrings: 2\nvertices: 10\nbbox: [0, 0, 10, 10]\nlength: 0\nperimeter: 48\narea: 96"
		);
	}

	#[test]
	fn empty_point() {
		let handle = read_geometry("Point EMPTY").unwrap();
		assert!(describe(&handle).starts_with("type: Unknown\n"));
		assert!(describe(&handle).contains("bbox: none"));
	}
}
