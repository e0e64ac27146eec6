use super::{
	ClosestSegment, CompositeGeometryTrait, Coordinates, Dimension, GeometryKind, GeometryTrait, GeometryType,
	MultiLineStringGeometry, PointGeometry, SingleGeometryTrait, VertexId,
	point::{assign_coordinates, vertex_from_point},
	slot_index,
};
use crate::{GeometryError, GeometryResult, math};
use std::fmt::Debug;

/// An ordered sequence of vertices forming a polyline. It may be empty and is never closed
/// implicitly.
#[derive(Clone, Default, PartialEq)]
pub struct LineStringGeometry {
	dimension: Dimension,
	coords: Vec<Coordinates>,
}

impl LineStringGeometry {
	/// Constructs a line of the given dimension, zeroing channels it does not carry.
	#[must_use]
	pub fn from_coords(dimension: Dimension, coords: Vec<Coordinates>) -> Self {
		let dimension = dimension.normalized();
		Self {
			dimension,
			coords: coords.into_iter().map(|c| c.coerced(dimension)).collect(),
		}
	}

	/// An empty line of the given dimension.
	#[must_use]
	pub fn empty(dimension: Dimension) -> Self {
		Self::from_coords(dimension, Vec::new())
	}

	pub fn as_coords(&self) -> &[Coordinates] {
		&self.coords
	}

	/// True if the line has at least two vertices and starts where it ends.
	pub fn is_closed(&self) -> bool {
		self.coords.len() >= 2 && self.coords.first() == self.coords.last()
	}

	pub(crate) fn replace_coords(&mut self, coords: Vec<Coordinates>) {
		self.coords = coords;
	}

	fn index(&self, id: VertexId) -> Option<usize> {
		slot_index(id.part, 1)?;
		slot_index(id.ring, 1)?;
		usize::try_from(id.vertex).ok().filter(|index| *index < self.coords.len())
	}
}

impl GeometryTrait for LineStringGeometry {
	fn geometry_type(&self) -> GeometryType {
		GeometryType::new(GeometryKind::LineString, self.dimension)
	}

	fn part_count(&self) -> usize {
		1
	}

	fn ring_count(&self, _part: usize) -> usize {
		1
	}

	fn vertex_count(&self, _part: usize, _ring: usize) -> usize {
		self.coords.len()
	}

	fn n_coordinates(&self) -> usize {
		self.coords.len()
	}

	fn coords(&self) -> Box<dyn Iterator<Item = &Coordinates> + '_> {
		Box::new(self.coords.iter())
	}

	fn coords_mut(&mut self) -> Box<dyn Iterator<Item = &mut Coordinates> + '_> {
		Box::new(self.coords.iter_mut())
	}

	fn set_dimension(&mut self, dimension: Dimension) {
		let dimension = dimension.normalized();
		self.dimension = dimension;
		for c in &mut self.coords {
			*c = c.coerced(dimension);
		}
	}

	fn vertex_at(&self, id: VertexId) -> GeometryResult<PointGeometry> {
		let index = self.index(id).ok_or(GeometryError::InvalidAddress(id))?;
		Ok(PointGeometry::from_coords(self.coords[index], self.dimension))
	}

	fn insert_vertex(&mut self, id: VertexId, vertex: &PointGeometry) -> bool {
		if slot_index(id.part, 1).is_none() || slot_index(id.ring, 1).is_none() {
			return false;
		}
		let Ok(index) = usize::try_from(id.vertex) else {
			return false;
		};
		if index > self.coords.len() {
			return false;
		}
		self.coords.insert(index, vertex_from_point(vertex, self.dimension));
		true
	}

	fn move_vertex(&mut self, id: VertexId, vertex: &PointGeometry) -> bool {
		let Some(index) = self.index(id) else {
			return false;
		};
		assign_coordinates(&mut self.coords[index], self.dimension, vertex);
		true
	}

	/// Deletes a vertex; a line left with fewer than two vertices becomes empty.
	fn delete_vertex(&mut self, id: VertexId) -> bool {
		let Some(index) = self.index(id) else {
			return false;
		};
		self.coords.remove(index);
		if self.coords.len() < 2 {
			self.coords.clear();
		}
		true
	}

	fn closest_segment(&self, point: &PointGeometry, epsilon: f64) -> Option<ClosestSegment> {
		let (sqr_dist, nearest, after) = math::closest_segment_in_sequence(&self.coords, point.as_coord(), epsilon)?;
		Some(ClosestSegment {
			sqr_dist,
			point: PointGeometry::from(nearest),
			after: VertexId::new(0, 0, after as i32),
		})
	}

	fn length(&self) -> f64 {
		math::length_sequence(&self.coords)
	}
}

impl CompositeGeometryTrait<Coordinates> for LineStringGeometry {
	fn new() -> Self {
		Self::empty(Dimension::Xy)
	}

	fn as_vec(&self) -> &Vec<Coordinates> {
		&self.coords
	}

	fn into_inner(self) -> Vec<Coordinates> {
		self.coords
	}

	fn push(&mut self, item: Coordinates) {
		self.coords.push(item.coerced(self.dimension));
	}
}

impl SingleGeometryTrait<MultiLineStringGeometry> for LineStringGeometry {
	fn into_multi(self) -> MultiLineStringGeometry {
		MultiLineStringGeometry::from_lines(self.dimension, vec![self])
	}
}

impl Debug for LineStringGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(self.coords.iter().map(|c| c.ordinates(self.dimension))).finish()
	}
}

crate::impl_from_array!(LineStringGeometry, Coordinates);

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn line() -> LineStringGeometry {
		LineStringGeometry::from(&[[0, 0], [10, 0], [10, 10]])
	}

	#[test]
	fn counts_and_type() {
		let line = line();
		assert_eq!(line.geometry_type().to_string(), "LineString");
		assert_eq!(line.part_count(), 1);
		assert_eq!(line.ring_count(0), 1);
		assert_eq!(line.vertex_count(0, 0), 3);
		assert_eq!(line.n_coordinates(), 3);
		assert!(!line.is_empty());
		assert!(LineStringGeometry::new().is_empty());
	}

	#[test]
	fn from_coords_coerces_channels() {
		let line = LineStringGeometry::from_coords(Dimension::Xym, vec![Coordinates::new_zm(1.0, 2.0, 3.0, 4.0)]);
		assert_eq!(line.as_coords(), &[Coordinates::new_m(1.0, 2.0, 4.0)]);
		let legacy = LineStringGeometry::empty(Dimension::Xyz25d);
		assert_eq!(legacy.dimension(), Dimension::Xyz);
	}

	#[rstest]
	#[case(VertexId::new(0, 0, 0), Some([0.0, 0.0]))]
	#[case(VertexId::new(0, 0, 2), Some([10.0, 10.0]))]
	#[case(VertexId::new(-1, -1, 1), Some([10.0, 0.0]))]
	#[case(VertexId::new(0, 0, 3), None)]
	#[case(VertexId::new(1, 0, 0), None)]
	#[case(VertexId::new(0, 1, 0), None)]
	#[case(VertexId::new(0, 0, -1), None)]
	fn vertex_at(#[case] id: VertexId, #[case] expected: Option<[f64; 2]>) {
		assert_eq!(line().vertex_at(id).ok(), expected.map(PointGeometry::from));
	}

	#[test]
	fn next_vertex_walks_all_vertices() {
		let line = line();
		let mut id = VertexId::default();
		let mut visited = Vec::new();
		while let Some(point) = line.next_vertex(&mut id) {
			visited.push((id, point));
		}
		assert_eq!(
			visited,
			vec![
				(VertexId::new(0, 0, 0), PointGeometry::new(0.0, 0.0)),
				(VertexId::new(0, 0, 1), PointGeometry::new(10.0, 0.0)),
				(VertexId::new(0, 0, 2), PointGeometry::new(10.0, 10.0)),
			]
		);
		assert_eq!(id, VertexId::new(0, 0, 2));
	}

	#[test]
	fn insert_vertex() {
		let mut line = line();
		assert!(line.insert_vertex(VertexId::new(0, 0, 1), &PointGeometry::new(5.0, 0.0)));
		assert!(line.insert_vertex(VertexId::new(0, 0, 4), &PointGeometry::new(20.0, 10.0)));
		assert_eq!(line, LineStringGeometry::from(&[[0, 0], [5, 0], [10, 0], [10, 10], [20, 10]]));
		assert!(!line.insert_vertex(VertexId::new(0, 0, 6), &PointGeometry::new(0.0, 0.0)));
		assert!(!line.insert_vertex(VertexId::new(0, 0, -1), &PointGeometry::new(0.0, 0.0)));
		assert!(!line.insert_vertex(VertexId::new(1, 0, 0), &PointGeometry::new(0.0, 0.0)));
		assert_eq!(line.n_coordinates(), 5);
	}

	#[test]
	fn insert_into_empty_line() {
		let mut line = LineStringGeometry::empty(Dimension::Xyz);
		assert!(line.insert_vertex(VertexId::new(0, 0, 0), &PointGeometry::new_zm(1.0, 2.0, 3.0, 4.0)));
		assert_eq!(line.vertex_at(VertexId::new(0, 0, 0)), Ok(PointGeometry::new_z(1.0, 2.0, 3.0)));
	}

	#[test]
	fn move_vertex() {
		let mut line = LineStringGeometry::from_coords(
			Dimension::Xyz,
			vec![Coordinates::new_z(0.0, 0.0, 1.0), Coordinates::new_z(1.0, 1.0, 2.0)],
		);
		assert!(line.move_vertex(VertexId::new(0, 0, 1), &PointGeometry::new(5.0, 5.0)));
		assert_eq!(line.as_coords()[1], Coordinates::new_z(5.0, 5.0, 2.0));
		assert!(line.move_vertex(VertexId::new(0, 0, 0), &PointGeometry::new_z(7.0, 7.0, 9.0)));
		assert_eq!(line.as_coords()[0], Coordinates::new_z(7.0, 7.0, 9.0));
		assert!(!line.move_vertex(VertexId::new(0, 0, 2), &PointGeometry::new(5.0, 5.0)));
	}

	#[test]
	fn delete_vertex() {
		let mut line = line();
		assert!(line.delete_vertex(VertexId::new(0, 0, 1)));
		assert_eq!(line, LineStringGeometry::from(&[[0, 0], [10, 10]]));
		assert!(!line.delete_vertex(VertexId::new(0, 0, 2)));
		assert!(line.delete_vertex(VertexId::new(0, 0, 0)));
		assert!(line.is_empty());
	}

	#[test]
	fn closest_segment() {
		let closest = line().closest_segment(&PointGeometry::new(5.0, 3.0), 1e-8).unwrap();
		assert_eq!(closest.sqr_dist, 9.0);
		assert_eq!(closest.point, PointGeometry::new(5.0, 0.0));
		assert_eq!(closest.after, VertexId::new(0, 0, 1));
		let closest = line().closest_segment(&PointGeometry::new(12.0, 6.0), 1e-8).unwrap();
		assert_eq!(closest.after, VertexId::new(0, 0, 2));
		assert!(LineStringGeometry::new().closest_segment(&PointGeometry::new(0.0, 0.0), 1e-8).is_none());
	}

	#[test]
	fn closest_segment_tolerance() {
		let near = PointGeometry::new(5.0, 0.001);
		let snapped = line().closest_segment(&near, 1e-5).unwrap();
		assert_eq!(snapped.sqr_dist, 0.0);
		assert_eq!(snapped.point, near);
		assert_eq!(snapped.after, VertexId::new(0, 0, 1));

		let exact = line().closest_segment(&near, 1e-8).unwrap();
		assert!(exact.sqr_dist > 0.0);
		assert_eq!(exact.point, PointGeometry::new(5.0, 0.0));
	}

	#[test]
	fn measures() {
		assert_eq!(line().length(), 20.0);
		assert_eq!(line().area(), 0.0);
		assert_eq!(line().perimeter(), 0.0);
		assert_eq!(line().bounding_box(), Some([0.0, 0.0, 10.0, 10.0]));
	}

	#[test]
	fn channels() {
		let mut line = line();
		assert!(line.add_m_value(3.0));
		assert_eq!(line.geometry_type().to_string(), "LineStringM");
		assert!(line.as_coords().iter().all(|c| c.m() == 3.0));
		assert!(!line.add_m_value(4.0));
		assert!(line.drop_m_value());
		assert_eq!(line, self::line());
	}

	#[test]
	fn closed() {
		assert!(!line().is_closed());
		assert!(LineStringGeometry::from(&[[0, 0], [1, 0], [0, 0]]).is_closed());
	}

	#[test]
	fn into_multi() {
		let multi = line().into_multi();
		assert_eq!(multi.len(), 1);
		assert_eq!(multi.as_vec()[0], line());
	}
}
