//! GeoJSON geometry objects, written only.
//!
//! The output follows a fixed whitespace layout, e.g.
//! `{"type": "LineString", "coordinates": [ [0, 0], [10, 0]]}`. Coordinates are written as
//! `[x, y]`; z and m are not part of the output.

use super::format_number;
use crate::{Geometry, types::*};
use log::trace;

/// The GeoJSON geometry object of a geometry.
pub(crate) trait GeoJsonObject {
	fn geojson(&self) -> String;
}

pub(crate) fn format_geojson<G: GeoJsonObject>(geometry: &G) -> String {
	trace!("writing GeoJSON");
	geometry.geojson()
}

fn position(c: &Coordinates) -> String {
	format!("[{}, {}]", format_number(c.x(), None), format_number(c.y(), None))
}

fn positions<'a>(coords: impl Iterator<Item = &'a Coordinates>) -> String {
	let list: Vec<String> = coords.map(position).collect();
	if list.is_empty() {
		String::from("[]")
	} else {
		format!("[ {}]", list.join(", "))
	}
}

fn nested(entries: impl Iterator<Item = String>) -> String {
	format!("[{}]", entries.collect::<Vec<_>>().join(", "))
}

fn rings(polygon: &PolygonGeometry) -> String {
	nested(polygon.as_vec().iter().map(|ring| positions(ring.0.iter())))
}

impl GeoJsonObject for PointGeometry {
	fn geojson(&self) -> String {
		let coordinates = self.coords().next().map_or_else(|| String::from("[]"), position);
		format!(r#"{{"type": "Point", "coordinates": {coordinates}}}"#)
	}
}

impl GeoJsonObject for LineStringGeometry {
	fn geojson(&self) -> String {
		format!(
			r#"{{"type": "LineString", "coordinates": {}}}"#,
			positions(self.as_coords().iter())
		)
	}
}

impl GeoJsonObject for PolygonGeometry {
	fn geojson(&self) -> String {
		format!(r#"{{"type": "Polygon", "coordinates": {} }}"#, rings(self))
	}
}

impl GeoJsonObject for MultiPointGeometry {
	fn geojson(&self) -> String {
		format!(
			r#"{{"type": "MultiPoint", "coordinates": {} }}"#,
			positions(self.as_vec().iter().flat_map(|point| point.coords()))
		)
	}
}

impl GeoJsonObject for MultiLineStringGeometry {
	fn geojson(&self) -> String {
		format!(
			r#"{{"type": "MultiLineString", "coordinates": {} }}"#,
			nested(self.as_vec().iter().map(|line| positions(line.as_coords().iter())))
		)
	}
}

impl GeoJsonObject for MultiPolygonGeometry {
	fn geojson(&self) -> String {
		format!(
			r#"{{"type": "MultiPolygon", "coordinates": {} }}"#,
			nested(self.as_vec().iter().map(rings))
		)
	}
}

impl GeoJsonObject for Geometry {
	fn geojson(&self) -> String {
		match self {
			Geometry::Point(g) => g.geojson(),
			Geometry::LineString(g) => g.geojson(),
			Geometry::Polygon(g) => g.geojson(),
			Geometry::MultiPoint(g) => g.geojson(),
			Geometry::MultiLineString(g) => g.geojson(),
			Geometry::MultiPolygon(g) => g.geojson(),
		}
	}
}
