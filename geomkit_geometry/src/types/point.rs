use super::{
	ClosestSegment, Coordinates, Dimension, GeometryKind, GeometryTrait, GeometryType, MultiPointGeometry,
	SingleGeometryTrait, VertexId,
};
use crate::{GeometryError, GeometryResult};
use std::fmt::Debug;

/// A single position with optional z and m channels.
///
/// An empty point has no dimension, reports the `Unknown` type and keeps all coordinates at 0.
#[derive(Clone, Copy, Default, PartialEq)]
pub struct PointGeometry {
	dimension: Option<Dimension>,
	coords: Coordinates,
}

impl PointGeometry {
	/// Constructs a flat point.
	#[must_use]
	pub fn new(x: f64, y: f64) -> Self {
		Self::from_coords(Coordinates::new(x, y), Dimension::Xy)
	}

	#[must_use]
	pub fn new_z(x: f64, y: f64, z: f64) -> Self {
		Self::from_coords(Coordinates::new_z(x, y, z), Dimension::Xyz)
	}

	#[must_use]
	pub fn new_m(x: f64, y: f64, m: f64) -> Self {
		Self::from_coords(Coordinates::new_m(x, y, m), Dimension::Xym)
	}

	#[must_use]
	pub fn new_zm(x: f64, y: f64, z: f64, m: f64) -> Self {
		Self::from_coords(Coordinates::new_zm(x, y, z, m), Dimension::Xyzm)
	}

	/// Constructs a point of the given dimension; channels it does not carry are zeroed.
	#[must_use]
	pub fn from_coords(coords: Coordinates, dimension: Dimension) -> Self {
		let dimension = dimension.normalized();
		Self {
			dimension: Some(dimension),
			coords: coords.coerced(dimension),
		}
	}

	/// The empty point of `Unknown` type.
	#[must_use]
	pub fn empty() -> Self {
		Self::default()
	}

	pub fn x(&self) -> f64 {
		self.coords.x()
	}

	pub fn y(&self) -> f64 {
		self.coords.y()
	}

	/// The z value, 0 if the point has no z channel.
	pub fn z(&self) -> f64 {
		self.coords.z()
	}

	/// The m value, 0 if the point has no m channel.
	pub fn m(&self) -> f64 {
		self.coords.m()
	}

	pub fn set_x(&mut self, x: f64) {
		self.coords.set_x(x);
	}

	pub fn set_y(&mut self, y: f64) {
		self.coords.set_y(y);
	}

	/// Sets z; ignored unless the point has a z channel.
	pub fn set_z(&mut self, z: f64) {
		if self.is_3d() {
			self.coords.set_z(z);
		}
	}

	/// Sets m; ignored unless the point has an m channel.
	pub fn set_m(&mut self, m: f64) {
		if self.is_measure() {
			self.coords.set_m(m);
		}
	}

	pub fn is_3d(&self) -> bool {
		self.dimension.is_some_and(Dimension::has_z)
	}

	pub fn is_measure(&self) -> bool {
		self.dimension.is_some_and(Dimension::has_m)
	}

	pub fn as_coord(&self) -> &Coordinates {
		&self.coords
	}

	/// Resets the point to the empty `Unknown` state.
	pub fn clear(&mut self) {
		*self = Self::empty();
	}

	/// Copies x and y from `source`, and z or m only where both points carry that channel.
	pub fn assign_from(&mut self, source: &PointGeometry) {
		assign_coordinates(&mut self.coords, self.dimension.unwrap_or_default(), source);
	}

	fn accepts(id: VertexId) -> bool {
		[id.part, id.ring, id.vertex].iter().all(|slot| *slot == 0 || *slot == -1)
	}
}

/// Partial assignment used by every `move_vertex`: the source's dimension decides which of
/// z and m it supplies, the target's dimension decides which of them it can hold.
pub(crate) fn assign_coordinates(target: &mut Coordinates, dimension: Dimension, source: &PointGeometry) {
	target.set_x(source.x());
	target.set_y(source.y());
	if dimension.has_z() && source.is_3d() {
		target.set_z(source.z());
	}
	if dimension.has_m() && source.is_measure() {
		target.set_m(source.m());
	}
}

/// Converts `source` into a vertex of a geometry with `dimension`; missing channels are 0.
pub(crate) fn vertex_from_point(source: &PointGeometry, dimension: Dimension) -> Coordinates {
	let mut coords = Coordinates::default();
	assign_coordinates(&mut coords, dimension, source);
	coords
}

impl GeometryTrait for PointGeometry {
	fn geometry_type(&self) -> GeometryType {
		match self.dimension {
			Some(dimension) => GeometryType::new(GeometryKind::Point, dimension),
			None => GeometryType::UNKNOWN,
		}
	}

	fn part_count(&self) -> usize {
		1
	}

	fn ring_count(&self, _part: usize) -> usize {
		1
	}

	fn vertex_count(&self, _part: usize, _ring: usize) -> usize {
		usize::from(self.dimension.is_some())
	}

	fn coords(&self) -> Box<dyn Iterator<Item = &Coordinates> + '_> {
		Box::new(self.dimension.map(|_| &self.coords).into_iter())
	}

	fn coords_mut(&mut self) -> Box<dyn Iterator<Item = &mut Coordinates> + '_> {
		match self.dimension {
			Some(_) => Box::new(std::iter::once(&mut self.coords)),
			None => Box::new(std::iter::empty()),
		}
	}

	fn set_dimension(&mut self, dimension: Dimension) {
		if self.dimension.is_some() {
			let dimension = dimension.normalized();
			self.dimension = Some(dimension);
			self.coords = self.coords.coerced(dimension);
		}
	}

	fn vertex_at(&self, id: VertexId) -> GeometryResult<PointGeometry> {
		if self.dimension.is_none() || !Self::accepts(id) {
			return Err(GeometryError::InvalidAddress(id));
		}
		Ok(*self)
	}

	fn insert_vertex(&mut self, _id: VertexId, _vertex: &PointGeometry) -> bool {
		false
	}

	fn move_vertex(&mut self, id: VertexId, vertex: &PointGeometry) -> bool {
		if self.dimension.is_none() || !Self::accepts(id) {
			return false;
		}
		self.assign_from(vertex);
		true
	}

	fn delete_vertex(&mut self, _id: VertexId) -> bool {
		false
	}

	fn closest_segment(&self, point: &PointGeometry, _epsilon: f64) -> Option<ClosestSegment> {
		if self.dimension.is_none() {
			return None;
		}
		Some(ClosestSegment {
			sqr_dist: self.coords.sqr_dist(point.as_coord()),
			point: *self,
			after: VertexId::new(0, 0, 0),
		})
	}
}

impl SingleGeometryTrait<MultiPointGeometry> for PointGeometry {
	fn into_multi(self) -> MultiPointGeometry {
		MultiPointGeometry::from_points(self.dimension.unwrap_or_default(), vec![self])
	}
}

impl Debug for PointGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.dimension {
			Some(dimension) => f.debug_list().entries(self.coords.ordinates(dimension)).finish(),
			None => f.write_str("EMPTY"),
		}
	}
}

impl From<Coordinates> for PointGeometry {
	fn from(value: Coordinates) -> Self {
		Self::from_coords(value, Dimension::Xy)
	}
}

impl From<&Coordinates> for PointGeometry {
	fn from(value: &Coordinates) -> Self {
		Self::from_coords(*value, Dimension::Xy)
	}
}

impl From<[f64; 2]> for PointGeometry {
	fn from(value: [f64; 2]) -> Self {
		Self::new(value[0], value[1])
	}
}

impl<'a, T> From<&'a [T; 2]> for PointGeometry
where
	T: Copy + Into<f64>,
{
	fn from(value: &'a [T; 2]) -> Self {
		Self::from(Coordinates::from(value))
	}
}
