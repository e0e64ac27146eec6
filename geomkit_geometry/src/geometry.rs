use crate::{GeometryResult, types::*};
use std::fmt::Debug;

/// The tagged sum over every geometry variant.
#[derive(Clone, PartialEq)]
pub enum Geometry {
	Point(PointGeometry),
	LineString(LineStringGeometry),
	Polygon(PolygonGeometry),
	MultiPoint(MultiPointGeometry),
	MultiLineString(MultiLineStringGeometry),
	MultiPolygon(MultiPolygonGeometry),
}

macro_rules! dispatch {
	($value:expr, $g:ident => $body:expr) => {
		match $value {
			Geometry::Point($g) => $body,
			Geometry::LineString($g) => $body,
			Geometry::Polygon($g) => $body,
			Geometry::MultiPoint($g) => $body,
			Geometry::MultiLineString($g) => $body,
			Geometry::MultiPolygon($g) => $body,
		}
	};
}

impl Geometry {
	pub fn new_point(value: [f64; 2]) -> Self {
		Self::Point(PointGeometry::from(value))
	}
	pub fn new_line_string(value: Vec<[f64; 2]>) -> Self {
		Self::LineString(LineStringGeometry::from(value))
	}
	pub fn new_polygon(value: Vec<Vec<[f64; 2]>>) -> Self {
		Self::Polygon(PolygonGeometry::from(value))
	}
	pub fn new_multi_point(value: Vec<[f64; 2]>) -> Self {
		Self::MultiPoint(MultiPointGeometry::from(value))
	}
	pub fn new_multi_line_string(value: Vec<Vec<[f64; 2]>>) -> Self {
		Self::MultiLineString(MultiLineStringGeometry::from(value))
	}
	pub fn new_multi_polygon(value: Vec<Vec<Vec<[f64; 2]>>>) -> Self {
		Self::MultiPolygon(MultiPolygonGeometry::from(value))
	}

	/// The shape of the variant. Unlike [`GeometryTrait::geometry_type`] this is never
	/// `Unknown`, not even for an empty point.
	pub fn kind(&self) -> GeometryKind {
		match self {
			Geometry::Point(_) => GeometryKind::Point,
			Geometry::LineString(_) => GeometryKind::LineString,
			Geometry::Polygon(_) => GeometryKind::Polygon,
			Geometry::MultiPoint(_) => GeometryKind::MultiPoint,
			Geometry::MultiLineString(_) => GeometryKind::MultiLineString,
			Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
		}
	}

	/// An empty geometry of the given type; `Unknown` yields the empty point.
	pub fn empty(geometry_type: GeometryType) -> Self {
		let dimension = geometry_type.dimension;
		match geometry_type.kind {
			GeometryKind::Unknown => Geometry::Point(PointGeometry::empty()),
			GeometryKind::Point => Geometry::Point(PointGeometry::empty()),
			GeometryKind::LineString => Geometry::LineString(LineStringGeometry::empty(dimension)),
			GeometryKind::Polygon => Geometry::Polygon(PolygonGeometry::empty(dimension)),
			GeometryKind::MultiPoint => Geometry::MultiPoint(MultiPointGeometry::empty(dimension)),
			GeometryKind::MultiLineString => Geometry::MultiLineString(MultiLineStringGeometry::empty(dimension)),
			GeometryKind::MultiPolygon => Geometry::MultiPolygon(MultiPolygonGeometry::empty(dimension)),
		}
	}

	#[must_use]
	pub fn into_multi(self) -> Self {
		match self {
			Geometry::Point(g) => Geometry::MultiPoint(g.into_multi()),
			Geometry::LineString(g) => Geometry::MultiLineString(g.into_multi()),
			Geometry::Polygon(g) => Geometry::MultiPolygon(g.into_multi()),
			Geometry::MultiPoint(_) | Geometry::MultiLineString(_) | Geometry::MultiPolygon(_) => self,
		}
	}

	pub fn is_multi(&self) -> bool {
		self.kind().is_multi()
	}
}

impl GeometryTrait for Geometry {
	fn geometry_type(&self) -> GeometryType {
		dispatch!(self, g => g.geometry_type())
	}

	fn part_count(&self) -> usize {
		dispatch!(self, g => g.part_count())
	}

	fn ring_count(&self, part: usize) -> usize {
		dispatch!(self, g => g.ring_count(part))
	}

	fn vertex_count(&self, part: usize, ring: usize) -> usize {
		dispatch!(self, g => g.vertex_count(part, ring))
	}

	fn n_coordinates(&self) -> usize {
		dispatch!(self, g => g.n_coordinates())
	}

	fn coords(&self) -> Box<dyn Iterator<Item = &Coordinates> + '_> {
		dispatch!(self, g => g.coords())
	}

	fn coords_mut(&mut self) -> Box<dyn Iterator<Item = &mut Coordinates> + '_> {
		dispatch!(self, g => g.coords_mut())
	}

	fn set_dimension(&mut self, dimension: Dimension) {
		dispatch!(self, g => g.set_dimension(dimension));
	}

	fn vertex_at(&self, id: VertexId) -> GeometryResult<PointGeometry> {
		dispatch!(self, g => g.vertex_at(id))
	}

	fn insert_vertex(&mut self, id: VertexId, vertex: &PointGeometry) -> bool {
		dispatch!(self, g => g.insert_vertex(id, vertex))
	}

	fn move_vertex(&mut self, id: VertexId, vertex: &PointGeometry) -> bool {
		dispatch!(self, g => g.move_vertex(id, vertex))
	}

	fn delete_vertex(&mut self, id: VertexId) -> bool {
		dispatch!(self, g => g.delete_vertex(id))
	}

	fn closest_segment(&self, point: &PointGeometry, epsilon: f64) -> Option<ClosestSegment> {
		dispatch!(self, g => g.closest_segment(point, epsilon))
	}

	fn length(&self) -> f64 {
		dispatch!(self, g => g.length())
	}

	fn perimeter(&self) -> f64 {
		dispatch!(self, g => g.perimeter())
	}

	fn area(&self) -> f64 {
		dispatch!(self, g => g.area())
	}
}

/// The empty point, reporting the `Unknown` type.
impl Default for Geometry {
	fn default() -> Self {
		Geometry::Point(PointGeometry::empty())
	}
}

impl Debug for Geometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let inner: &dyn Debug = dispatch!(self, g => g);
		f.debug_tuple(self.kind().name()).field(inner).finish()
	}
}

macro_rules! impl_from_variant {
	($($variant:ident => $t:ty),*) => {$(
		impl From<$t> for Geometry {
			fn from(value: $t) -> Self {
				Geometry::$variant(value)
			}
		}
	)*};
}

impl_from_variant!(
	Point => PointGeometry,
	LineString => LineStringGeometry,
	Polygon => PolygonGeometry,
	MultiPoint => MultiPointGeometry,
	MultiLineString => MultiLineStringGeometry,
	MultiPolygon => MultiPolygonGeometry
);
