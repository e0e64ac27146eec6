use super::{
	ClosestSegment, CompositeGeometryTrait, Coordinates, Dimension, GeometryKind, GeometryTrait, GeometryType,
	PointGeometry, PolygonGeometry, VertexId, parts,
};
use crate::{GeometryError, GeometryResult};
use std::fmt::Debug;

/// An ordered collection of polygons sharing one dimension.
#[derive(Clone, Default, PartialEq)]
pub struct MultiPolygonGeometry {
	dimension: Dimension,
	polygons: Vec<PolygonGeometry>,
}

impl MultiPolygonGeometry {
	/// Constructs a collection of the given dimension; every polygon is converted to it.
	#[must_use]
	pub fn from_polygons(dimension: Dimension, polygons: Vec<PolygonGeometry>) -> Self {
		let mut multi = Self::empty(dimension);
		for polygon in polygons {
			multi.push(polygon);
		}
		multi
	}

	#[must_use]
	pub fn empty(dimension: Dimension) -> Self {
		Self {
			dimension: dimension.normalized(),
			polygons: Vec::new(),
		}
	}

	pub(crate) fn polygons_mut(&mut self) -> &mut Vec<PolygonGeometry> {
		&mut self.polygons
	}
}

impl GeometryTrait for MultiPolygonGeometry {
	fn geometry_type(&self) -> GeometryType {
		GeometryType::new(GeometryKind::MultiPolygon, self.dimension)
	}

	fn part_count(&self) -> usize {
		self.polygons.len()
	}

	fn ring_count(&self, part: usize) -> usize {
		self.polygons.get(part).map_or(0, |polygon| polygon.ring_count(0))
	}

	fn vertex_count(&self, part: usize, ring: usize) -> usize {
		self.polygons.get(part).map_or(0, |polygon| polygon.vertex_count(0, ring))
	}

	fn coords(&self) -> Box<dyn Iterator<Item = &Coordinates> + '_> {
		Box::new(self.polygons.iter().flat_map(|polygon| polygon.coords()))
	}

	fn coords_mut(&mut self) -> Box<dyn Iterator<Item = &mut Coordinates> + '_> {
		Box::new(self.polygons.iter_mut().flat_map(|polygon| polygon.coords_mut()))
	}

	fn set_dimension(&mut self, dimension: Dimension) {
		self.dimension = dimension.normalized();
		for polygon in &mut self.polygons {
			polygon.set_dimension(dimension);
		}
	}

	fn vertex_at(&self, id: VertexId) -> GeometryResult<PointGeometry> {
		let (part, inner) = parts::locate_part(id, self.polygons.len()).ok_or(GeometryError::InvalidAddress(id))?;
		self.polygons[part].vertex_at(inner).map_err(|_| GeometryError::InvalidAddress(id))
	}

	fn insert_vertex(&mut self, id: VertexId, vertex: &PointGeometry) -> bool {
		let Some((part, inner)) = parts::locate_part(id, self.polygons.len()) else {
			return false;
		};
		self.polygons[part].insert_vertex(inner, vertex)
	}

	fn move_vertex(&mut self, id: VertexId, vertex: &PointGeometry) -> bool {
		let Some((part, inner)) = parts::locate_part(id, self.polygons.len()) else {
			return false;
		};
		self.polygons[part].move_vertex(inner, vertex)
	}

	/// Deletes a vertex; a polygon that loses its outer ring is removed from the collection.
	fn delete_vertex(&mut self, id: VertexId) -> bool {
		let Some((part, inner)) = parts::locate_part(id, self.polygons.len()) else {
			return false;
		};
		if !self.polygons[part].delete_vertex(inner) {
			return false;
		}
		if self.polygons[part].is_empty() {
			self.polygons.remove(part);
		}
		true
	}

	fn closest_segment(&self, point: &PointGeometry, epsilon: f64) -> Option<ClosestSegment> {
		parts::closest_in_parts(&self.polygons, point, epsilon)
	}

	fn perimeter(&self) -> f64 {
		self.polygons.iter().map(|polygon| polygon.perimeter()).sum()
	}

	fn area(&self) -> f64 {
		self.polygons.iter().map(|polygon| polygon.area()).sum()
	}
}

impl CompositeGeometryTrait<PolygonGeometry> for MultiPolygonGeometry {
	fn new() -> Self {
		Self::empty(Dimension::Xy)
	}

	fn as_vec(&self) -> &Vec<PolygonGeometry> {
		&self.polygons
	}

	fn into_inner(self) -> Vec<PolygonGeometry> {
		self.polygons
	}

	fn push(&mut self, mut item: PolygonGeometry) {
		item.set_dimension(self.dimension);
		self.polygons.push(item);
	}
}

impl Debug for MultiPolygonGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.polygons).finish()
	}
}

crate::impl_from_array!(MultiPolygonGeometry, PolygonGeometry);

impl From<&geo::MultiPolygon<f64>> for MultiPolygonGeometry {
	fn from(geometry: &geo::MultiPolygon<f64>) -> Self {
		MultiPolygonGeometry::from_polygons(Dimension::Xy, geometry.iter().map(PolygonGeometry::from).collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn multi() -> MultiPolygonGeometry {
		MultiPolygonGeometry::from(vec![
			vec![
				vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]],
				vec![[2.0, 2.0], [4.0, 2.0], [4.0, 4.0], [2.0, 4.0], [2.0, 2.0]],
			],
			vec![vec![[20.0, 0.0], [30.0, 0.0], [30.0, 10.0], [20.0, 0.0]]],
		])
	}

	#[test]
	fn counts_and_measures() {
		let multi = multi();
		assert_eq!(multi.geometry_type().to_string(), "MultiPolygon");
		assert_eq!(multi.part_count(), 2);
		assert_eq!(multi.ring_count(0), 2);
		assert_eq!(multi.ring_count(1), 1);
		assert_eq!(multi.ring_count(2), 0);
		assert_eq!(multi.vertex_count(1, 0), 4);
		assert_eq!(multi.n_coordinates(), 14);
		assert_eq!(multi.area(), 146.0);
		assert_eq!(multi.bounding_box(), Some([0.0, 0.0, 30.0, 10.0]));
	}

	#[rstest]
	#[case(VertexId::new(0, 1, 2), Some([4.0, 4.0]))]
	#[case(VertexId::new(1, 0, 2), Some([30.0, 10.0]))]
	#[case(VertexId::new(1, 1, 0), None)]
	#[case(VertexId::new(2, 0, 0), None)]
	fn vertex_at(#[case] id: VertexId, #[case] expected: Option<[f64; 2]>) {
		assert_eq!(multi().vertex_at(id).ok(), expected.map(PointGeometry::from));
	}

	#[test]
	fn next_vertex_crosses_parts() {
		let multi = multi();
		let mut id = VertexId::new(0, 1, 4);
		assert_eq!(multi.next_vertex(&mut id), Some(PointGeometry::new(20.0, 0.0)));
		assert_eq!(id, VertexId::new(1, 0, 0));
		let mut visited = 0;
		let mut id = VertexId::default();
		while multi.next_vertex(&mut id).is_some() {
			visited += 1;
		}
		assert_eq!(visited, 14);
	}

	#[test]
	fn delete_removes_collapsed_polygon() {
		let mut multi = multi();
		assert!(multi.delete_vertex(VertexId::new(1, 0, 1)));
		assert_eq!(multi.part_count(), 1);
		assert!(multi.delete_vertex(VertexId::new(0, 1, 0)));
		assert_eq!(multi.part_count(), 1);
		assert_eq!(multi.ring_count(0), 2);
		assert!(!multi.delete_vertex(VertexId::new(1, 0, 0)));
	}

	#[test]
	fn move_and_insert() {
		let mut multi = multi();
		assert!(multi.move_vertex(VertexId::new(1, 0, 0), &PointGeometry::new(19.0, -1.0)));
		assert_eq!(multi.vertex_at(VertexId::new(1, 0, 3)), Ok(PointGeometry::new(19.0, -1.0)));
		assert!(multi.insert_vertex(VertexId::new(1, 0, 1), &PointGeometry::new(25.0, -2.0)));
		assert_eq!(multi.vertex_count(1, 0), 5);
	}

	#[test]
	fn closest_segment_carries_part_and_ring() {
		let closest = multi().closest_segment(&PointGeometry::new(25.0, -1.0), 1e-8).unwrap();
		assert_eq!(closest.sqr_dist, 1.0);
		assert_eq!(closest.after, VertexId::new(1, 0, 1));
	}
}
