use super::{Coordinates, Dimension, GeometryType, PointGeometry, VertexId};
use crate::GeometryResult;
use std::fmt::Debug;

/// Answer of a closest-segment query.
#[derive(Clone, Debug, PartialEq)]
pub struct ClosestSegment {
	/// Squared planar distance from the query point to `point`.
	pub sqr_dist: f64,
	/// Nearest point on the geometry.
	pub point: PointGeometry,
	/// Address of the vertex that follows `point` on its segment.
	pub after: VertexId,
}

/// The capability set shared by every geometry variant: type inspection, vertex addressing,
/// in-place editing and simple measures.
///
/// Levels of nesting a variant does not have count as 1, so a point reports one part with one
/// ring holding one vertex.
pub trait GeometryTrait: Debug + Clone + Sized {
	/// The type descriptor; `Unknown` only for an empty point.
	fn geometry_type(&self) -> GeometryType;

	fn dimension(&self) -> Dimension {
		self.geometry_type().dimension
	}

	fn part_count(&self) -> usize;

	fn ring_count(&self, part: usize) -> usize;

	fn vertex_count(&self, part: usize, ring: usize) -> usize;

	/// Total number of vertices over all parts and rings.
	fn n_coordinates(&self) -> usize {
		self.coords().count()
	}

	fn is_empty(&self) -> bool {
		self.n_coordinates() == 0
	}

	/// Iterates over every vertex in (part, ring, vertex) order.
	fn coords(&self) -> Box<dyn Iterator<Item = &Coordinates> + '_>;

	/// Mutably iterates over every vertex in (part, ring, vertex) order.
	fn coords_mut(&mut self) -> Box<dyn Iterator<Item = &mut Coordinates> + '_>;

	/// Changes the dimension of the geometry, zeroing channels that are dropped.
	///
	/// Newly added channels start at 0.
	fn set_dimension(&mut self, dimension: Dimension);

	/// Returns the vertex at `id` as a point of the geometry's dimension.
	///
	/// # Errors
	/// Fails with [`GeometryError::InvalidAddress`](crate::GeometryError::InvalidAddress) if
	/// `id` lies outside the geometry.
	fn vertex_at(&self, id: VertexId) -> GeometryResult<PointGeometry>;

	/// Inserts `vertex` before the vertex at `id`. Returns `false` and leaves the geometry
	/// untouched if the address is out of range.
	fn insert_vertex(&mut self, id: VertexId, vertex: &PointGeometry) -> bool;

	/// Moves the vertex at `id`. x and y are always taken from `vertex`; z and m only when
	/// both the geometry and `vertex` carry that channel.
	fn move_vertex(&mut self, id: VertexId, vertex: &PointGeometry) -> bool;

	/// Deletes the vertex at `id`.
	fn delete_vertex(&mut self, id: VertexId) -> bool;

	/// Finds the nearest point on any edge of the geometry. `None` for geometries without
	/// edges or points.
	///
	/// `epsilon` is the one tolerance of the query and serves as both the vertex and the segment
	/// tolerance: a squared distance to an edge within `epsilon` of zero counts as lying on that
	/// edge, and the query point itself is then returned at distance 0.
	fn closest_segment(&self, point: &PointGeometry, epsilon: f64) -> Option<ClosestSegment>;

	/// Advances `id` to the next vertex and returns it, or returns `None` and leaves `id`
	/// untouched once every vertex has been visited.
	fn next_vertex(&self, id: &mut VertexId) -> Option<PointGeometry> {
		let mut part = id.part.max(0) as usize;
		let mut ring = if id.part < 0 { 0 } else { id.ring.max(0) as usize };
		let mut vertex = if id.part < 0 || id.ring < 0 || id.vertex < 0 {
			0
		} else {
			id.vertex as usize + 1
		};

		while part < self.part_count() {
			while ring < self.ring_count(part) {
				if vertex < self.vertex_count(part, ring) {
					let next = VertexId::new(part as i32, ring as i32, vertex as i32);
					let point = self.vertex_at(next).ok()?;
					*id = next;
					return Some(point);
				}
				ring += 1;
				vertex = 0;
			}
			part += 1;
			ring = 0;
			vertex = 0;
		}
		None
	}

	/// All vertices as points, grouped by part and ring.
	fn coordinate_sequence(&self) -> Vec<Vec<Vec<PointGeometry>>> {
		(0..self.part_count())
			.map(|part| {
				(0..self.ring_count(part))
					.map(|ring| {
						(0..self.vertex_count(part, ring))
							.filter_map(|vertex| self.vertex_at(VertexId::new(part as i32, ring as i32, vertex as i32)).ok())
							.collect()
					})
					.collect()
			})
			.collect()
	}

	/// `[x_min, y_min, x_max, y_max]`, or `None` if the geometry has no vertices.
	fn bounding_box(&self) -> Option<[f64; 4]> {
		let mut coords = self.coords();
		let first = coords.next()?;
		let mut bounds = [first.x(), first.y(), first.x(), first.y()];
		for c in coords {
			bounds[0] = bounds[0].min(c.x());
			bounds[1] = bounds[1].min(c.y());
			bounds[2] = bounds[2].max(c.x());
			bounds[3] = bounds[3].max(c.y());
		}
		Some(bounds)
	}

	/// Adds a z channel filled with `z`. Returns `false` if the geometry already has one or is
	/// an empty point.
	fn add_z_value(&mut self, z: f64) -> bool {
		let geometry_type = self.geometry_type();
		if geometry_type.is_unknown() || geometry_type.has_z() {
			return false;
		}
		self.set_dimension(geometry_type.dimension.with_z());
		for c in self.coords_mut() {
			c.set_z(z);
		}
		true
	}

	/// Adds an m channel filled with `m`. Returns `false` if the geometry already has one or is
	/// an empty point.
	fn add_m_value(&mut self, m: f64) -> bool {
		let geometry_type = self.geometry_type();
		if geometry_type.is_unknown() || geometry_type.has_m() {
			return false;
		}
		self.set_dimension(geometry_type.dimension.with_m());
		for c in self.coords_mut() {
			c.set_m(m);
		}
		true
	}

	/// Removes the z channel. Returns `false` if there is none.
	fn drop_z_value(&mut self) -> bool {
		let geometry_type = self.geometry_type();
		if !geometry_type.has_z() {
			return false;
		}
		self.set_dimension(geometry_type.dimension.without_z());
		true
	}

	/// Removes the m channel. Returns `false` if there is none.
	fn drop_m_value(&mut self) -> bool {
		let geometry_type = self.geometry_type();
		if !geometry_type.has_m() {
			return false;
		}
		self.set_dimension(geometry_type.dimension.without_m());
		true
	}

	/// Total length of all line strings; 0 for points and polygons.
	fn length(&self) -> f64 {
		0.0
	}

	/// Total length of all polygon rings; 0 for points and lines.
	fn perimeter(&self) -> f64 {
		0.0
	}

	/// Enclosed area with holes subtracted; 0 for points and lines.
	fn area(&self) -> f64 {
		0.0
	}
}

/// Geometries that can be wrapped into their multi-part counterpart.
pub trait SingleGeometryTrait<Multi>: Debug + Clone {
	/// Converts the single geometry into a multi geometry holding just this part.
	fn into_multi(self) -> Multi;
}

/// Geometries that are ordered collections of simpler elements, such as the rings of a polygon
/// or the parts of a multi geometry.
pub trait CompositeGeometryTrait<Item>: Debug + Clone {
	/// Creates an empty, flat collection.
	fn new() -> Self;

	/// Returns an immutable reference to the inner elements.
	fn as_vec(&self) -> &Vec<Item>;

	/// Consumes the collection and returns the inner elements.
	fn into_inner(self) -> Vec<Item>;

	/// Appends an element, converting it to the collection's dimension.
	fn push(&mut self, item: Item);

	/// Returns an iterator over owned elements.
	fn into_iter(self) -> impl Iterator<Item = Item> {
		self.into_inner().into_iter()
	}

	/// Splits the collection into its first element and the rest, if available.
	fn into_first_and_rest(self) -> Option<(Item, Vec<Item>)> {
		let mut iter = self.into_iter();
		iter.next().map(|first| (first, iter.collect()))
	}

	fn len(&self) -> usize {
		self.as_vec().len()
	}

	fn first(&self) -> Option<&Item> {
		self.as_vec().first()
	}

	fn last(&self) -> Option<&Item> {
		self.as_vec().last()
	}
}
