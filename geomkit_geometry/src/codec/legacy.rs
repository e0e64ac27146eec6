//! Flat 2-D point lists of the older point/polyline/polygon API.
//!
//! A single list is classified by its shape: one point becomes a Point, a closed list of at
//! least four points a Polygon and anything else a LineString. An optional parallel list of z
//! values produces the same shapes with a z channel.

use crate::{Geometry, GeometryError, GeometryResult, types::*};

/// An ordered list of 2-D points.
pub type Polyline = Vec<[f64; 2]>;
/// Rings of one polygon, the outer ring first.
pub type PolygonRings = Vec<Polyline>;
pub type MultiPolyline = Vec<Polyline>;
pub type MultiPolygonRings = Vec<PolygonRings>;

fn to_coords(points: &[[f64; 2]]) -> Vec<Coordinates> {
	points.iter().map(Coordinates::from).collect()
}

fn to_polyline<'a>(coords: impl Iterator<Item = &'a Coordinates>) -> Polyline {
	coords.map(|c| [c.x(), c.y()]).collect()
}

fn to_rings(polygon: &PolygonGeometry) -> PolygonRings {
	polygon.as_vec().iter().map(|ring| to_polyline(ring.0.iter())).collect()
}

fn classify(coords: Vec<Coordinates>, dimension: Dimension) -> Geometry {
	if coords.len() == 1 {
		Geometry::Point(PointGeometry::from_coords(coords[0], dimension))
	} else if coords.len() >= 2 && coords.first() == coords.last() {
		Geometry::Polygon(PolygonGeometry::from_rings(dimension, vec![RingGeometry(coords)]))
	} else {
		Geometry::LineString(LineStringGeometry::from_coords(dimension, coords))
	}
}

impl Geometry {
	/// Classifies a flat point list as Point, Polygon or LineString.
	pub fn from_polyline(points: &[[f64; 2]]) -> Geometry {
		classify(to_coords(points), Dimension::Xy)
	}

	/// Like [`Geometry::from_polyline`], with one z value per point.
	///
	/// # Errors
	/// Fails with [`GeometryError::MalformedInput`] if the two lists differ in length.
	pub fn from_polyline_z(points: &[[f64; 2]], z: &[f64]) -> GeometryResult<Geometry> {
		if points.len() != z.len() {
			return Err(GeometryError::MalformedInput(format!(
				"{} points but {} z values",
				points.len(),
				z.len()
			)));
		}
		let coords = points
			.iter()
			.zip(z)
			.map(|(point, z)| Coordinates::new_z(point[0], point[1], *z))
			.collect();
		Ok(classify(coords, Dimension::Xyz25d))
	}

	pub fn from_polygon_rings(rings: &[Polyline]) -> Geometry {
		Geometry::Polygon(PolygonGeometry::from(rings))
	}

	pub fn from_multi_point(points: &[[f64; 2]]) -> Geometry {
		Geometry::MultiPoint(MultiPointGeometry::from(points))
	}

	pub fn from_multi_polyline(lines: &[Polyline]) -> Geometry {
		Geometry::MultiLineString(MultiLineStringGeometry::from(lines))
	}

	pub fn from_multi_polygon(polygons: &[PolygonRings]) -> Geometry {
		Geometry::MultiPolygon(MultiPolygonGeometry::from(polygons))
	}

	pub fn as_point(&self) -> Option<[f64; 2]> {
		match self {
			Geometry::Point(point) => point.coords().next().map(|c| [c.x(), c.y()]),
			_ => None,
		}
	}

	pub fn as_polyline(&self) -> Option<Polyline> {
		match self {
			Geometry::LineString(line) => Some(to_polyline(line.as_coords().iter())),
			_ => None,
		}
	}

	pub fn as_polygon(&self) -> Option<PolygonRings> {
		match self {
			Geometry::Polygon(polygon) => Some(to_rings(polygon)),
			_ => None,
		}
	}

	pub fn as_multi_point(&self) -> Option<Polyline> {
		match self {
			Geometry::MultiPoint(multi) => Some(to_polyline(multi.coords())),
			_ => None,
		}
	}

	pub fn as_multi_polyline(&self) -> Option<MultiPolyline> {
		match self {
			Geometry::MultiLineString(multi) => Some(
				multi
					.as_vec()
					.iter()
					.map(|line| to_polyline(line.as_coords().iter()))
					.collect(),
			),
			_ => None,
		}
	}

	pub fn as_multi_polygon(&self) -> Option<MultiPolygonRings> {
		match self {
			Geometry::MultiPolygon(multi) => Some(multi.as_vec().iter().map(to_rings).collect()),
			_ => None,
		}
	}
}
