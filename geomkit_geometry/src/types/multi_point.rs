use super::{
	ClosestSegment, CompositeGeometryTrait, Coordinates, Dimension, GeometryKind, GeometryTrait, GeometryType,
	PointGeometry, VertexId, parts, point::vertex_from_point,
};
use crate::{GeometryError, GeometryResult};
use std::fmt::Debug;

/// An ordered collection of points sharing one dimension.
#[derive(Clone, Default, PartialEq)]
pub struct MultiPointGeometry {
	dimension: Dimension,
	points: Vec<PointGeometry>,
}

impl MultiPointGeometry {
	/// Constructs a collection of the given dimension; every point is converted to it.
	#[must_use]
	pub fn from_points(dimension: Dimension, points: Vec<PointGeometry>) -> Self {
		let mut multi = Self::empty(dimension);
		for point in points {
			multi.push(point);
		}
		multi
	}

	#[must_use]
	pub fn empty(dimension: Dimension) -> Self {
		Self {
			dimension: dimension.normalized(),
			points: Vec::new(),
		}
	}
}

impl GeometryTrait for MultiPointGeometry {
	fn geometry_type(&self) -> GeometryType {
		GeometryType::new(GeometryKind::MultiPoint, self.dimension)
	}

	fn part_count(&self) -> usize {
		self.points.len()
	}

	fn ring_count(&self, part: usize) -> usize {
		usize::from(part < self.points.len())
	}

	fn vertex_count(&self, part: usize, ring: usize) -> usize {
		match self.points.get(part) {
			Some(point) if ring == 0 => point.vertex_count(0, 0),
			_ => 0,
		}
	}

	fn coords(&self) -> Box<dyn Iterator<Item = &Coordinates> + '_> {
		Box::new(self.points.iter().flat_map(|point| point.coords()))
	}

	fn coords_mut(&mut self) -> Box<dyn Iterator<Item = &mut Coordinates> + '_> {
		Box::new(self.points.iter_mut().flat_map(|point| point.coords_mut()))
	}

	fn set_dimension(&mut self, dimension: Dimension) {
		self.dimension = dimension.normalized();
		for point in &mut self.points {
			point.set_dimension(dimension);
		}
	}

	fn vertex_at(&self, id: VertexId) -> GeometryResult<PointGeometry> {
		let (part, inner) = parts::locate_part(id, self.points.len()).ok_or(GeometryError::InvalidAddress(id))?;
		self.points[part].vertex_at(inner).map_err(|_| GeometryError::InvalidAddress(id))
	}

	/// Inserts a new point as part `id.part`; `id.part` may equal the part count to append.
	fn insert_vertex(&mut self, id: VertexId, vertex: &PointGeometry) -> bool {
		let Ok(part) = usize::try_from(id.part) else {
			return false;
		};
		if part > self.points.len() {
			return false;
		}
		let point = PointGeometry::from_coords(vertex_from_point(vertex, self.dimension), self.dimension);
		self.points.insert(part, point);
		true
	}

	fn move_vertex(&mut self, id: VertexId, vertex: &PointGeometry) -> bool {
		let Some((part, inner)) = parts::locate_part(id, self.points.len()) else {
			return false;
		};
		self.points[part].move_vertex(inner, vertex)
	}

	/// Deleting the vertex of a point removes that point from the collection.
	fn delete_vertex(&mut self, id: VertexId) -> bool {
		let Some((part, inner)) = parts::locate_part(id, self.points.len()) else {
			return false;
		};
		if self.points[part].vertex_at(inner).is_err() {
			return false;
		}
		self.points.remove(part);
		true
	}

	fn closest_segment(&self, point: &PointGeometry, epsilon: f64) -> Option<ClosestSegment> {
		parts::closest_in_parts(&self.points, point, epsilon)
	}
}

impl CompositeGeometryTrait<PointGeometry> for MultiPointGeometry {
	fn new() -> Self {
		Self::empty(Dimension::Xy)
	}

	fn as_vec(&self) -> &Vec<PointGeometry> {
		&self.points
	}

	fn into_inner(self) -> Vec<PointGeometry> {
		self.points
	}

	fn push(&mut self, mut item: PointGeometry) {
		item.set_dimension(self.dimension);
		self.points.push(item);
	}
}

impl Debug for MultiPointGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.points).finish()
	}
}

crate::impl_from_array!(MultiPointGeometry, PointGeometry);
