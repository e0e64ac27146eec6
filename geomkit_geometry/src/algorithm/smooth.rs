//! Corner-cutting smoothing.
//!
//! Each pass replaces every segment longer than the cutoff with two points at `offset` and
//! `1 - offset` along it. Open sequences keep their end points; closed sequences wrap around
//! and are closed again after every pass.

use crate::{Geometry, SmoothParameters, types::*};
use log::trace;

/// Returns a smoothed copy of a geometry. Points are returned unchanged.
pub trait GeometrySmooth: Sized {
	#[must_use]
	fn smoothed(&self, parameters: &SmoothParameters) -> Self;
}

/// Smooths one vertex sequence. Sequences with fewer than three vertices are returned as they
/// are.
pub fn smooth_sequence(coords: &[Coordinates], parameters: &SmoothParameters) -> Vec<Coordinates> {
	let mut result = coords.to_vec();
	if result.len() < 3 {
		return result;
	}
	let closed = result.first() == result.last();
	for _ in 0..parameters.iterations {
		result = if closed {
			smooth_closed(&result, parameters)
		} else {
			smooth_open(&result, parameters)
		};
	}
	result
}

fn is_short(a: &Coordinates, b: &Coordinates, parameters: &SmoothParameters) -> bool {
	a.distance(b) <= parameters.minimum_distance
}

fn smooth_open(coords: &[Coordinates], parameters: &SmoothParameters) -> Vec<Coordinates> {
	let last = coords.len() - 2;
	let mut output = Vec::with_capacity(coords.len() * 2);
	for (i, segment) in coords.windows(2).enumerate() {
		let (a, b) = (&segment[0], &segment[1]);
		if is_short(a, b, parameters) {
			output.push(*a);
			if i == last {
				output.push(*b);
			}
			continue;
		}
		output.push(if i == 0 { *a } else { a.interpolate(b, parameters.offset) });
		output.push(if i == last {
			*b
		} else {
			a.interpolate(b, 1.0 - parameters.offset)
		});
	}
	output
}

fn smooth_closed(coords: &[Coordinates], parameters: &SmoothParameters) -> Vec<Coordinates> {
	let mut output = Vec::with_capacity(coords.len() * 2);
	for segment in coords.windows(2) {
		let (a, b) = (&segment[0], &segment[1]);
		if is_short(a, b, parameters) {
			output.push(*a);
		} else {
			output.push(a.interpolate(b, parameters.offset));
			output.push(a.interpolate(b, 1.0 - parameters.offset));
		}
	}
	output.push(output[0]);
	output
}

impl GeometrySmooth for PointGeometry {
	fn smoothed(&self, _parameters: &SmoothParameters) -> Self {
		self.clone()
	}
}

impl GeometrySmooth for MultiPointGeometry {
	fn smoothed(&self, _parameters: &SmoothParameters) -> Self {
		self.clone()
	}
}

impl GeometrySmooth for LineStringGeometry {
	fn smoothed(&self, parameters: &SmoothParameters) -> Self {
		let mut line = self.clone();
		line.replace_coords(smooth_sequence(self.as_coords(), parameters));
		line
	}
}

impl GeometrySmooth for PolygonGeometry {
	fn smoothed(&self, parameters: &SmoothParameters) -> Self {
		let mut polygon = self.clone();
		for ring in polygon.rings_mut() {
			ring.0 = smooth_sequence(&ring.0, parameters);
		}
		polygon
	}
}

impl GeometrySmooth for MultiLineStringGeometry {
	fn smoothed(&self, parameters: &SmoothParameters) -> Self {
		let mut multi = self.clone();
		for line in multi.lines_mut() {
			*line = line.smoothed(parameters);
		}
		multi
	}
}

impl GeometrySmooth for MultiPolygonGeometry {
	fn smoothed(&self, parameters: &SmoothParameters) -> Self {
		let mut multi = self.clone();
		for polygon in multi.polygons_mut() {
			*polygon = polygon.smoothed(parameters);
		}
		multi
	}
}

impl GeometrySmooth for Geometry {
	fn smoothed(&self, parameters: &SmoothParameters) -> Self {
		trace!("smoothing {:?} with {parameters:?}", self.kind());
		match self {
			Geometry::Point(g) => Geometry::Point(g.smoothed(parameters)),
			Geometry::LineString(g) => Geometry::LineString(g.smoothed(parameters)),
			Geometry::Polygon(g) => Geometry::Polygon(g.smoothed(parameters)),
			Geometry::MultiPoint(g) => Geometry::MultiPoint(g.smoothed(parameters)),
			Geometry::MultiLineString(g) => Geometry::MultiLineString(g.smoothed(parameters)),
			Geometry::MultiPolygon(g) => Geometry::MultiPolygon(g.smoothed(parameters)),
		}
	}
}
