//! The copy-on-write geometry handle.
//!
//! A [`GeometryHandle`] owns at most one [`Geometry`] behind an `Rc`. Cloning a handle is O(1)
//! and shares the geometry; the first mutation of a shared handle detaches it by deep-cloning
//! the geometry, so copies never observe each other's edits.

use crate::{
	AffineTransform, BufferParameters, CoordinateTransform, Geometry, GeometryDecode, GeometryEncode, GeometryError,
	GeometryResult, GeometrySmooth, GeometryTransform, MultiPolygonRings, MultiPolyline, PolygonRings, Polyline,
	SmoothParameters, TransformDirection, WktOptions, engine::TopologyEngine, types::*,
};
use anyhow::{Context, Result};
use geomkit_core::io::{ValueReader, ValueReaderSlice, ValueWriter, ValueWriterBuffer};
use log::{debug, warn};
use std::rc::Rc;

#[derive(Clone, Debug, Default)]
pub struct GeometryHandle {
	geometry: Option<Rc<Geometry>>,
}

impl GeometryHandle {
	pub fn new(geometry: impl Into<Geometry>) -> Self {
		Self {
			geometry: Some(Rc::new(geometry.into())),
		}
	}

	/// A handle holding no geometry.
	pub fn empty() -> Self {
		Self::default()
	}

	pub fn from_wkt(text: &str) -> GeometryResult<Self> {
		Geometry::from_wkt(text).map(Self::new)
	}

	pub fn from_wkb(data: &[u8]) -> GeometryResult<Self> {
		Geometry::from_wkb(data).map(Self::new)
	}

	pub fn from_wkb_hex(text: &str) -> GeometryResult<Self> {
		Geometry::from_wkb_hex(text).map(Self::new)
	}

	/// Replaces the content with the geometry in `text`; on failure the handle becomes empty.
	pub fn read_wkt(&mut self, text: &str) -> GeometryResult<()> {
		self.replace_or_clear(Self::from_wkt(text))
	}

	/// Replaces the content with the geometry in `data`; on failure the handle becomes empty.
	pub fn read_wkb(&mut self, data: &[u8]) -> GeometryResult<()> {
		self.replace_or_clear(Self::from_wkb(data))
	}

	fn replace_or_clear(&mut self, result: GeometryResult<Self>) -> GeometryResult<()> {
		match result {
			Ok(handle) => {
				*self = handle;
				Ok(())
			}
			Err(error) => {
				warn!("decoding failed, handle is now empty: {error}");
				self.clear();
				Err(error)
			}
		}
	}

	pub fn from_point(x: f64, y: f64) -> Self {
		Self::new(PointGeometry::new(x, y))
	}

	/// A Point, Polygon or LineString depending on the shape of `points`.
	pub fn from_polyline(points: &[[f64; 2]]) -> Self {
		Self::new(Geometry::from_polyline(points))
	}

	pub fn from_polyline_z(points: &[[f64; 2]], z: &[f64]) -> GeometryResult<Self> {
		Geometry::from_polyline_z(points, z).map(Self::new)
	}

	pub fn from_polygon_rings(rings: &[Polyline]) -> Self {
		Self::new(Geometry::from_polygon_rings(rings))
	}

	pub fn from_multi_point(points: &[[f64; 2]]) -> Self {
		Self::new(Geometry::from_multi_point(points))
	}

	pub fn from_multi_polyline(lines: &[Polyline]) -> Self {
		Self::new(Geometry::from_multi_polyline(lines))
	}

	pub fn from_multi_polygon(polygons: &[PolygonRings]) -> Self {
		Self::new(Geometry::from_multi_polygon(polygons))
	}

	pub fn geometry(&self) -> Option<&Geometry> {
		self.geometry.as_deref()
	}

	/// Mutable access, detaching the geometry from other handles first.
	pub fn geometry_mut(&mut self) -> Option<&mut Geometry> {
		self.geometry.as_mut().map(Rc::make_mut)
	}

	pub fn set_geometry(&mut self, geometry: impl Into<Geometry>) {
		self.geometry = Some(Rc::new(geometry.into()));
	}

	/// Removes the geometry and returns it, cloning only if it is shared.
	pub fn take(&mut self) -> Option<Geometry> {
		self.geometry.take().map(Rc::unwrap_or_clone)
	}

	pub fn clear(&mut self) {
		self.geometry = None;
	}

	/// True if both handles share one geometry.
	pub fn shares_storage(&self, other: &GeometryHandle) -> bool {
		match (&self.geometry, &other.geometry) {
			(Some(a), Some(b)) => Rc::ptr_eq(a, b),
			_ => false,
		}
	}

	/// `Unknown` for an empty handle or an empty point.
	pub fn geometry_type(&self) -> GeometryType {
		self.geometry().map_or(GeometryType::UNKNOWN, GeometryTrait::geometry_type)
	}

	/// True if the handle holds no geometry or a geometry without vertices.
	pub fn is_empty(&self) -> bool {
		self.geometry().is_none_or(GeometryTrait::is_empty)
	}

	pub fn as_point(&self) -> Option<[f64; 2]> {
		self.geometry()?.as_point()
	}

	pub fn as_polyline(&self) -> Option<Polyline> {
		self.geometry()?.as_polyline()
	}

	pub fn as_polygon(&self) -> Option<PolygonRings> {
		self.geometry()?.as_polygon()
	}

	pub fn as_multi_point(&self) -> Option<Polyline> {
		self.geometry()?.as_multi_point()
	}

	pub fn as_multi_polyline(&self) -> Option<MultiPolyline> {
		self.geometry()?.as_multi_polyline()
	}

	pub fn as_multi_polygon(&self) -> Option<MultiPolygonRings> {
		self.geometry()?.as_multi_polygon()
	}

	pub fn to_wkt(&self) -> Option<String> {
		self.geometry().map(GeometryEncode::to_wkt)
	}

	pub fn to_wkt_with(&self, options: &WktOptions) -> Option<String> {
		self.geometry().map(|geometry| geometry.to_wkt_with(options))
	}

	pub fn to_wkb(&self) -> Option<GeometryResult<Vec<u8>>> {
		self.geometry().map(GeometryEncode::to_wkb)
	}

	pub fn to_wkb_hex(&self) -> Option<GeometryResult<String>> {
		self.geometry().map(GeometryEncode::to_wkb_hex)
	}

	pub fn to_geojson(&self) -> Option<String> {
		self.geometry().map(GeometryEncode::to_geojson)
	}

	/// Serializes the handle as a little-endian u32 byte length followed by the WKB record. An
	/// empty handle is written as length 0.
	pub fn to_stream(&self) -> GeometryResult<Vec<u8>> {
		let wkb = self.to_wkb().transpose()?.unwrap_or_default();
		let length =
			u32::try_from(wkb.len()).map_err(|_| GeometryError::failed("geometry too large for a stream record"))?;
		let mut writer = ValueWriterBuffer::new_le();
		writer
			.write_u32(length)
			.and_then(|()| writer.write_slice(&wkb))
			.map_err(|e| GeometryError::failed(format!("{e:#}")))?;
		Ok(writer.into_bytes())
	}

	/// Reads one record written by [`GeometryHandle::to_stream`] from the start of `data`.
	/// Returns the handle and the number of bytes consumed.
	pub fn from_stream(data: &[u8]) -> GeometryResult<(Self, usize)> {
		let record = read_record(data).map_err(|e| GeometryError::malformed(&e))?;
		let used = 4 + record.len();
		if record.is_empty() {
			return Ok((Self::empty(), used));
		}
		let handle = Self::from_wkb(&record)?;
		debug!("read {} from a stream record", handle.geometry_type());
		Ok((handle, used))
	}

	pub fn vertex_at(&self, id: VertexId) -> GeometryResult<PointGeometry> {
		self
			.geometry()
			.ok_or(GeometryError::InvalidAddress(id))?
			.vertex_at(id)
	}

	pub fn insert_vertex(&mut self, id: VertexId, vertex: &PointGeometry) -> bool {
		self.edit(|geometry| geometry.insert_vertex(id, vertex))
	}

	pub fn move_vertex(&mut self, id: VertexId, vertex: &PointGeometry) -> bool {
		self.edit(|geometry| geometry.move_vertex(id, vertex))
	}

	pub fn delete_vertex(&mut self, id: VertexId) -> bool {
		self.edit(|geometry| geometry.delete_vertex(id))
	}

	pub fn next_vertex(&self, id: &mut VertexId) -> Option<PointGeometry> {
		self.geometry()?.next_vertex(id)
	}

	pub fn closest_segment(&self, point: &PointGeometry, epsilon: f64) -> Option<ClosestSegment> {
		self.geometry()?.closest_segment(point, epsilon)
	}

	pub fn bounding_box(&self) -> Option<[f64; 4]> {
		self.geometry()?.bounding_box()
	}

	pub fn add_z_value(&mut self, z: f64) -> bool {
		self.edit(|geometry| geometry.add_z_value(z))
	}

	pub fn add_m_value(&mut self, m: f64) -> bool {
		self.edit(|geometry| geometry.add_m_value(m))
	}

	pub fn drop_z_value(&mut self) -> bool {
		self.edit(GeometryTrait::drop_z_value)
	}

	pub fn drop_m_value(&mut self) -> bool {
		self.edit(GeometryTrait::drop_m_value)
	}

	pub fn length(&self) -> f64 {
		self.geometry().map_or(0.0, GeometryTrait::length)
	}

	pub fn perimeter(&self) -> f64 {
		self.geometry().map_or(0.0, GeometryTrait::perimeter)
	}

	pub fn area(&self) -> f64 {
		self.geometry().map_or(0.0, GeometryTrait::area)
	}

	/// Runs an edit on a detached geometry. Empty handles are never edited.
	fn edit(&mut self, op: impl FnOnce(&mut Geometry) -> bool) -> bool {
		self.geometry_mut().is_some_and(op)
	}

	/// A new handle holding a smoothed copy; see [`GeometrySmooth`].
	#[must_use]
	pub fn smooth(&self, parameters: &SmoothParameters) -> GeometryHandle {
		GeometryHandle {
			geometry: self
				.geometry()
				.map(|geometry| Rc::new(geometry.smoothed(parameters))),
		}
	}

	fn operand(&self) -> GeometryResult<&Geometry> {
		self
			.geometry()
			.filter(|geometry| !geometry.is_empty())
			.ok_or_else(|| GeometryError::failed("empty operand"))
	}

	fn delegate<T>(&self, name: &str, result: GeometryResult<T>) -> GeometryResult<T> {
		if let Err(error) = &result {
			warn!("{name} of {} failed: {error}", self.geometry_type());
		}
		result
	}

	pub fn intersects(&self, other: &GeometryHandle, engine: &dyn TopologyEngine) -> GeometryResult<bool> {
		let result = engine.intersects(self.operand()?, other.operand()?);
		self.delegate("intersects test", result)
	}

	pub fn intersection(&self, other: &GeometryHandle, engine: &dyn TopologyEngine) -> GeometryResult<GeometryHandle> {
		let result = engine.intersection(self.operand()?, other.operand()?);
		self.delegate("intersection", result).map(Self::new)
	}

	/// The union of both geometries.
	pub fn combine(&self, other: &GeometryHandle, engine: &dyn TopologyEngine) -> GeometryResult<GeometryHandle> {
		let result = engine.union(self.operand()?, other.operand()?);
		self.delegate("union", result).map(Self::new)
	}

	pub fn difference(&self, other: &GeometryHandle, engine: &dyn TopologyEngine) -> GeometryResult<GeometryHandle> {
		let result = engine.difference(self.operand()?, other.operand()?);
		self.delegate("difference", result).map(Self::new)
	}

	pub fn buffer(&self, parameters: &BufferParameters, engine: &dyn TopologyEngine) -> GeometryResult<GeometryHandle> {
		let result = engine.buffer(self.operand()?, parameters);
		self.delegate("buffer", result).map(Self::new)
	}

	/// The centroid; a point is its own centroid and needs no engine call.
	pub fn centroid(&self, engine: &dyn TopologyEngine) -> GeometryResult<PointGeometry> {
		match self.operand()? {
			Geometry::Point(point) => Ok(*point),
			geometry => {
				let result = engine.centroid(geometry);
				self.delegate("centroid", result)
			}
		}
	}
}

fn read_record(data: &[u8]) -> Result<Vec<u8>> {
	let mut reader = ValueReaderSlice::new_le(data);
	let length = reader.read_u32().context("while reading the record length")?;
	reader
		.read_vec(u64::from(length))
		.with_context(|| format!("while reading a record of {length} bytes"))
}

impl GeometryTransform for GeometryHandle {
	fn apply_affine(&mut self, matrix: &AffineTransform) {
		if let Some(geometry) = self.geometry_mut() {
			geometry.apply_affine(matrix);
		}
	}

	fn reproject(
		&mut self,
		transform: &dyn CoordinateTransform,
		direction: TransformDirection,
	) -> GeometryResult<()> {
		let Some(geometry) = self.geometry() else {
			return Ok(());
		};
		let mut projected = geometry.clone();
		projected.reproject(transform, direction)?;
		self.geometry = Some(Rc::new(projected));
		Ok(())
	}
}

/// Structural equality of the held geometries; two empty handles are equal.
impl PartialEq for GeometryHandle {
	fn eq(&self, other: &Self) -> bool {
		self.shares_storage(other) || self.geometry() == other.geometry()
	}
}

impl From<Geometry> for GeometryHandle {
	fn from(geometry: Geometry) -> Self {
		Self::new(geometry)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{WebMercator, engine::GeoEngine};
	use approx::assert_abs_diff_eq;
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	fn handle(wkt: &str) -> GeometryHandle {
		GeometryHandle::from_wkt(wkt).unwrap()
	}

	#[test]
	fn copies_share_until_mutated() {
		let original = handle("LineString (0 0, 10 0, 10 10)");
		let mut copy = original.clone();
		assert!(copy.shares_storage(&original));
		assert_eq!(copy, original);

		copy.translate(10.0, -5.0);
		assert!(!copy.shares_storage(&original));
		assert_eq!(original.to_wkt().unwrap(), "LineString (0 0, 10 0, 10 10)");
		assert_eq!(copy.to_wkt().unwrap(), "LineString (10 -5, 20 -5, 20 5)");
		assert_ne!(copy, original);
	}

	#[test]
	fn vertex_edits_detach() {
		let original = handle("Polygon ((0 0, 10 0, 10 10, 0 0))");
		let mut copy = original.clone();
		assert!(copy.move_vertex(VertexId::new(0, 0, 1), &PointGeometry::new(20.0, 0.0)));
		assert_eq!(original.vertex_at(VertexId::new(0, 0, 1)), Ok(PointGeometry::new(10.0, 0.0)));
		assert_eq!(copy.vertex_at(VertexId::new(0, 0, 1)), Ok(PointGeometry::new(20.0, 0.0)));
		assert!(copy.insert_vertex(VertexId::new(0, 0, 1), &PointGeometry::new(5.0, -1.0)));
		assert_eq!(copy.geometry().unwrap().n_coordinates(), 5);
		assert!(copy.delete_vertex(VertexId::new(0, 0, 1)));
		assert_eq!(copy.geometry().unwrap().n_coordinates(), 4);
		assert_eq!(original.geometry().unwrap().n_coordinates(), 4);
	}

	#[test]
	fn empty_handle() {
		let mut empty = GeometryHandle::empty();
		assert!(empty.is_empty());
		assert!(empty.geometry_type().is_unknown());
		assert_eq!(empty.to_wkt(), None);
		assert_eq!(empty.to_geojson(), None);
		assert!(empty.to_wkb().is_none());
		assert_eq!(empty.bounding_box(), None);
		assert_eq!(empty.length(), 0.0);
		assert_eq!(
			empty.vertex_at(VertexId::new(0, 0, 0)),
			Err(GeometryError::InvalidAddress(VertexId::new(0, 0, 0)))
		);
		assert!(!empty.insert_vertex(VertexId::new(0, 0, 0), &PointGeometry::new(1.0, 1.0)));
		assert!(!empty.add_z_value(1.0));
		empty.translate(1.0, 1.0);
		assert_eq!(empty, GeometryHandle::default());
		assert_eq!(empty.smooth(&SmoothParameters::default()), GeometryHandle::empty());
	}

	#[test]
	fn failed_decode_empties_the_handle() {
		let mut target = handle("Point (1 2)");
		assert!(matches!(target.read_wkt("Point (1"), Err(GeometryError::MalformedInput(_))));
		assert!(target.is_empty());
		assert_eq!(target.to_wkt(), None);

		target.read_wkt("Point (3 4)").unwrap();
		assert_eq!(target.as_point(), Some([3.0, 4.0]));

		assert!(target.read_wkb(&[1, 1, 0]).is_err());
		assert_eq!(target.geometry(), None);
	}

	#[test]
	fn legacy_constructors() {
		assert_eq!(GeometryHandle::from_point(1.0, 2.0).to_wkt().unwrap(), "Point (1 2)");
		assert_eq!(
			GeometryHandle::from_polyline(&[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 0.0]])
				.to_wkt()
				.unwrap(),
			"Polygon ((0 0, 10 0, 10 10, 0 0))"
		);
		assert_eq!(
			GeometryHandle::from_polyline(&[[0.0, 0.0], [1.0, 1.0], [0.0, 0.0]]).geometry_type(),
			GeometryType::new(GeometryKind::Polygon, Dimension::Xy)
		);
		let lines = vec![vec![[0.0, 0.0], [1.0, 1.0]]];
		assert_eq!(GeometryHandle::from_multi_polyline(&lines).as_multi_polyline(), Some(lines));
		assert_eq!(
			GeometryHandle::from_polyline_z(&[[0.0, 0.0]], &[1.0, 2.0]),
			Err(GeometryError::MalformedInput(String::from("1 points but 2 z values")))
		);
	}

	#[rstest]
	#[case("Point (40 50)")]
	#[case("PolygonZ ((0 0 1, 10 0 2, 10 10 3, 0 0 1))")]
	#[case("MultiLineStringM ((0 0 5, 1 1 6),(2 2 7, 3 3 8))")]
	fn stream_round_trip(#[case] wkt: &str) {
		let original = handle(wkt);
		let mut data = original.to_stream().unwrap();
		data.extend(GeometryHandle::empty().to_stream().unwrap());
		assert_eq!(&data[data.len() - 4..], &[0, 0, 0, 0]);

		let (first, used) = GeometryHandle::from_stream(&data).unwrap();
		assert_eq!(first, original);
		let (second, rest) = GeometryHandle::from_stream(&data[used..]).unwrap();
		assert_eq!(second.geometry(), None);
		assert_eq!(used + rest, data.len());
	}

	#[test]
	fn truncated_stream_fails() {
		let data = handle("Point (1 2)").to_stream().unwrap();
		for end in 0..data.len() {
			let error = GeometryHandle::from_stream(&data[..end]).unwrap_err();
			assert!(matches!(error, GeometryError::MalformedInput(_)), "{end}: {error}");
		}
	}

	#[test]
	fn transforms() {
		let mut point = handle("Point (40 50)");
		point.rotate(90.0, &PointGeometry::new(0.0, 0.0));
		assert_eq!(point.to_wkt().unwrap(), "Point (-50 40)");

		let mut line = handle("LineString (0 0, 1 1)");
		let original = line.clone();
		line.reproject(&WebMercator, TransformDirection::Forward).unwrap();
		assert!(!line.shares_storage(&original));
		assert_ne!(line, original);

		let mut polar = handle("Point (0 90)");
		let copy = polar.clone();
		assert!(polar.reproject(&WebMercator, TransformDirection::Forward).is_err());
		assert!(polar.shares_storage(&copy));
	}

	#[test]
	fn smoothing_returns_a_new_handle() {
		let line = handle("LineString (0 0, 10 0, 10 10, 20 10)");
		let smoothed = line.smooth(&SmoothParameters::default());
		assert_eq!(
			smoothed.to_wkt().unwrap(),
			"LineString (0 0, 7.5 0, 10 2.5, 10 7.5, 12.5 10, 20 10)"
		);
		assert_eq!(line.to_wkt().unwrap(), "LineString (0 0, 10 0, 10 10, 20 10)");
	}

	fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> GeometryHandle {
		GeometryHandle::from_polygon_rings(&[vec![[x0, y0], [x1, y0], [x1, y1], [x0, y1], [x0, y0]]])
	}

	#[test]
	fn engine_delegation() {
		let a = square(20.0, 20.0, 80.0, 80.0);
		let b = square(40.0, 40.0, 100.0, 100.0);
		let c = square(200.0, 200.0, 240.0, 240.0);

		assert_eq!(a.intersects(&b, &GeoEngine), Ok(true));
		assert_eq!(a.intersects(&c, &GeoEngine), Ok(false));
		assert_eq!(a.combine(&c, &GeoEngine).unwrap().geometry_type().to_string(), "MultiPolygon");
		assert_eq!(a.combine(&b, &GeoEngine).unwrap().geometry_type().to_string(), "Polygon");
		assert_eq!(a.difference(&c, &GeoEngine).unwrap().geometry_type().to_string(), "Polygon");
		assert_abs_diff_eq!(a.difference(&b, &GeoEngine).unwrap().area(), 3200.0, epsilon = 1e-6);
		assert_abs_diff_eq!(a.intersection(&b, &GeoEngine).unwrap().area(), 400.0, epsilon = 1e-6);
		assert_eq!(
			b.buffer(&BufferParameters::new(10.0), &GeoEngine)
				.unwrap()
				.geometry_type()
				.to_string(),
			"Polygon"
		);
	}

	#[test]
	fn engine_failures() {
		let a = square(20.0, 20.0, 80.0, 80.0);
		let empty = GeometryHandle::empty();
		assert!(matches!(a.combine(&empty, &GeoEngine), Err(GeometryError::OperationFailed(_))));
		assert!(matches!(empty.intersects(&a, &GeoEngine), Err(GeometryError::OperationFailed(_))));
		let line = handle("LineString (0 0, 50 50)");
		assert!(matches!(line.difference(&a, &GeoEngine), Err(GeometryError::OperationFailed(_))));
		assert_eq!(a.to_wkt().unwrap(), "Polygon ((20 20, 80 20, 80 80, 20 80, 20 20))");
	}

	#[test]
	fn centroid() {
		let point = handle("PointZ (40 50 7)");
		assert_eq!(point.centroid(&GeoEngine), Ok(PointGeometry::new_z(40.0, 50.0, 7.0)));
		let line = handle("LineString (0 0, 10 0)");
		assert_eq!(line.centroid(&GeoEngine), Ok(PointGeometry::new(5.0, 0.0)));
		assert!(GeometryHandle::empty().centroid(&GeoEngine).is_err());
	}
}
