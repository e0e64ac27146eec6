use super::TopologyEngine;
use crate::{BufferParameters, Geometry, GeometryError, GeometryResult, types::*};
use geo::{BooleanOps, Buffer, Centroid, Intersects};
use log::debug;

/// A [`TopologyEngine`] backed by the `geo` crate.
///
/// Boolean operations accept polygonal operands only; `intersects` and `buffer` accept any
/// non-empty geometry. Results are planar and two-dimensional.
#[derive(Clone, Copy, Debug, Default)]
pub struct GeoEngine;

impl TopologyEngine for GeoEngine {
	fn intersects(&self, a: &Geometry, b: &Geometry) -> GeometryResult<bool> {
		debug!("intersects test of {} and {}", a.geometry_type(), b.geometry_type());
		Ok(to_geo(a)?.intersects(&to_geo(b)?))
	}

	fn intersection(&self, a: &Geometry, b: &Geometry) -> GeometryResult<Geometry> {
		boolean_op("intersection", a, b, |a, b| a.intersection(b))
	}

	fn union(&self, a: &Geometry, b: &Geometry) -> GeometryResult<Geometry> {
		boolean_op("union", a, b, |a, b| a.union(b))
	}

	fn difference(&self, a: &Geometry, b: &Geometry) -> GeometryResult<Geometry> {
		boolean_op("difference", a, b, |a, b| a.difference(b))
	}

	fn buffer(&self, geometry: &Geometry, parameters: &BufferParameters) -> GeometryResult<Geometry> {
		// the geo buffer picks its own arc resolution
		debug!(
			"buffer of {} by {} ({} segments requested)",
			geometry.geometry_type(),
			parameters.distance,
			parameters.segments
		);
		if !parameters.distance.is_finite() {
			return Err(GeometryError::failed(format!(
				"invalid buffer distance {}",
				parameters.distance
			)));
		}
		from_geo(&to_geo(geometry)?.buffer(parameters.distance), "buffer")
	}

	fn centroid(&self, geometry: &Geometry) -> GeometryResult<PointGeometry> {
		let centroid = to_geo(geometry)?
			.centroid()
			.ok_or_else(|| GeometryError::failed("geometry has no centroid"))?;
		Ok(PointGeometry::new(centroid.x(), centroid.y()))
	}
}

fn boolean_op(
	name: &str,
	a: &Geometry,
	b: &Geometry,
	op: impl FnOnce(&geo::MultiPolygon<f64>, &geo::MultiPolygon<f64>) -> geo::MultiPolygon<f64>,
) -> GeometryResult<Geometry> {
	debug!("{name} of {} and {}", a.geometry_type(), b.geometry_type());
	let result = op(&polygonal(a)?, &polygonal(b)?);
	from_geo(&result, name)
}

fn line_string(coords: &[Coordinates]) -> geo::LineString<f64> {
	geo::LineString(coords.iter().map(geo::Coord::from).collect())
}

fn polygon(polygon: &PolygonGeometry) -> geo::Polygon<f64> {
	let exterior = polygon
		.exterior()
		.map_or_else(|| geo::LineString(Vec::new()), |ring| line_string(&ring.0));
	let interiors = polygon.interiors().iter().map(|ring| line_string(&ring.0)).collect();
	geo::Polygon::new(exterior, interiors)
}

/// Converts a non-empty geometry with finite coordinates into its `geo` counterpart.
fn to_geo(geometry: &Geometry) -> GeometryResult<geo::Geometry<f64>> {
	if geometry.is_empty() {
		return Err(GeometryError::failed(format!(
			"empty {} operand",
			geometry.kind().name()
		)));
	}
	if geometry.coords().any(|c| !c.x().is_finite() || !c.y().is_finite()) {
		return Err(GeometryError::failed("operand has non-finite coordinates"));
	}
	Ok(match geometry {
		Geometry::Point(point) => geo::Geometry::Point(geo::Point::new(point.x(), point.y())),
		Geometry::LineString(line) => geo::Geometry::LineString(line_string(line.as_coords())),
		Geometry::Polygon(p) => geo::Geometry::Polygon(polygon(p)),
		Geometry::MultiPoint(multi) => geo::Geometry::MultiPoint(geo::MultiPoint(
			multi.coords().map(|c| geo::Point::from(geo::Coord::from(c))).collect(),
		)),
		Geometry::MultiLineString(multi) => geo::Geometry::MultiLineString(geo::MultiLineString(
			multi.as_vec().iter().map(|line| line_string(line.as_coords())).collect(),
		)),
		Geometry::MultiPolygon(multi) => {
			geo::Geometry::MultiPolygon(geo::MultiPolygon(multi.as_vec().iter().map(polygon).collect()))
		}
	})
}

fn polygonal(geometry: &Geometry) -> GeometryResult<geo::MultiPolygon<f64>> {
	match to_geo(geometry)? {
		geo::Geometry::Polygon(polygon) => Ok(geo::MultiPolygon(vec![polygon])),
		geo::Geometry::MultiPolygon(multi) => Ok(multi),
		_ => Err(GeometryError::failed(format!(
			"{} is not a polygonal operand",
			geometry.kind().name()
		))),
	}
}

fn from_geo(result: &geo::MultiPolygon<f64>, operation: &str) -> GeometryResult<Geometry> {
	match result.0.as_slice() {
		[] => Err(GeometryError::failed(format!("{operation} produced an empty geometry"))),
		[polygon] => Ok(Geometry::Polygon(PolygonGeometry::from(polygon))),
		_ => Ok(Geometry::MultiPolygon(MultiPolygonGeometry::from(result))),
	}
}
