use crate::{GeometryError, GeometryResult};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

const EARTH_RADIUS: f64 = 6_378_137.0;
/// Latitude at which the Web Mercator square ends.
const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransformDirection {
	/// From the source to the destination reference system.
	#[default]
	Forward,
	Reverse,
}

/// A mapping between two coordinate reference systems, applied one position at a time.
pub trait CoordinateTransform {
	fn source_crs(&self) -> &str;

	fn destination_crs(&self) -> &str;

	/// Maps one position. `z` is `Some` only for geometries with a z channel; a returned z of
	/// `None` keeps the old value.
	///
	/// # Errors
	/// Fails with [`GeometryError::OperationFailed`] for positions outside the domain.
	fn transform(
		&self,
		x: f64,
		y: f64,
		z: Option<f64>,
		direction: TransformDirection,
	) -> GeometryResult<(f64, f64, Option<f64>)>;
}

/// Spherical Web Mercator: WGS 84 longitude/latitude in degrees (EPSG:4326) to metres
/// (EPSG:3857).
#[derive(Clone, Copy, Debug, Default)]
pub struct WebMercator;

impl CoordinateTransform for WebMercator {
	fn source_crs(&self) -> &str {
		"EPSG:4326"
	}

	fn destination_crs(&self) -> &str {
		"EPSG:3857"
	}

	fn transform(
		&self,
		x: f64,
		y: f64,
		z: Option<f64>,
		direction: TransformDirection,
	) -> GeometryResult<(f64, f64, Option<f64>)> {
		if !x.is_finite() || !y.is_finite() {
			return Err(GeometryError::failed(format!("cannot project ({x}, {y})")));
		}
		match direction {
			TransformDirection::Forward => {
				if y.abs() > MAX_LATITUDE {
					return Err(GeometryError::failed(format!(
						"latitude {y} is outside the Web Mercator range"
					)));
				}
				let easting = EARTH_RADIUS * x.to_radians();
				let northing = EARTH_RADIUS * (FRAC_PI_4 + y.to_radians() / 2.0).tan().ln();
				Ok((easting, northing, z))
			}
			TransformDirection::Reverse => {
				let longitude = (x / EARTH_RADIUS).to_degrees();
				let latitude = (2.0 * (y / EARTH_RADIUS).exp().atan() - FRAC_PI_2).to_degrees();
				Ok((longitude, latitude, z))
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{GeometryTransform, types::*};
	use approx::assert_abs_diff_eq;
	use rstest::rstest;

	#[rstest]
	#[case([0.0, 0.0], [0.0, 0.0])]
	#[case([180.0, 0.0], [20_037_508.342_789_244, 0.0])]
	#[case([-180.0, 0.0], [-20_037_508.342_789_244, 0.0])]
	#[case([0.0, MAX_LATITUDE], [0.0, 20_037_508.342_789_244])]
	#[case([13.4, 52.5], [1_491_681.176_629_866, 6_891_041.723_891_583])]
	fn forward(#[case] lon_lat: [f64; 2], #[case] expected: [f64; 2]) {
		let (x, y, z) = WebMercator
			.transform(lon_lat[0], lon_lat[1], None, TransformDirection::Forward)
			.unwrap();
		assert_abs_diff_eq!(x, expected[0], epsilon = 1e-3);
		assert_abs_diff_eq!(y, expected[1], epsilon = 1e-3);
		assert_eq!(z, None);
	}

	#[test]
	fn reverse_restores_degrees() {
		let (x, y, z) = WebMercator
			.transform(-73.98, 40.75, Some(12.0), TransformDirection::Forward)
			.unwrap();
		let (lon, lat, z) = WebMercator.transform(x, y, z, TransformDirection::Reverse).unwrap();
		assert_abs_diff_eq!(lon, -73.98, epsilon = 1e-9);
		assert_abs_diff_eq!(lat, 40.75, epsilon = 1e-9);
		assert_eq!(z, Some(12.0));
	}

	#[rstest]
	#[case(0.0, 90.0)]
	#[case(0.0, -86.0)]
	#[case(f64::NAN, 0.0)]
	#[case(f64::INFINITY, 0.0)]
	fn outside_domain(#[case] x: f64, #[case] y: f64) {
		let error = WebMercator.transform(x, y, None, TransformDirection::Forward).unwrap_err();
		assert!(matches!(error, GeometryError::OperationFailed(_)));
	}

	#[test]
	fn geometry_round_trip() {
		let original = LineStringGeometry::from_coords(
			Dimension::Xyzm,
			vec![Coordinates::new_zm(2.35, 48.85, 35.0, 1.0), Coordinates::new_zm(13.4, 52.5, 34.0, 2.0)],
		);
		let mut line = original.clone();
		line.reproject(&WebMercator, TransformDirection::Forward).unwrap();
		assert!(line.as_coords()[0].x() > 200_000.0);
		assert_eq!(line.as_coords()[1].z(), 34.0);
		assert_eq!(line.as_coords()[1].m(), 2.0);

		line.reproject(&WebMercator, TransformDirection::Reverse).unwrap();
		for (a, b) in line.coords().zip(original.coords()) {
			assert_abs_diff_eq!(a.x(), b.x(), epsilon = 1e-9);
			assert_abs_diff_eq!(a.y(), b.y(), epsilon = 1e-9);
			assert_eq!(a.z(), b.z());
			assert_eq!(a.m(), b.m());
		}
	}

	#[test]
	fn polar_vertex_keeps_polygon() {
		let mut polygon = PolygonGeometry::from(&[[[0.0, 0.0], [10.0, 0.0], [10.0, 89.0], [0.0, 0.0]]]);
		let original = polygon.clone();
		assert!(polygon.reproject(&WebMercator, TransformDirection::Forward).is_err());
		assert_eq!(polygon, original);
	}
}
