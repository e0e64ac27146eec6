use super::{
	ClosestSegment, CompositeGeometryTrait, Coordinates, Dimension, GeometryKind, GeometryTrait, GeometryType,
	MultiPolygonGeometry, PointGeometry, RingGeometry, SingleGeometryTrait, VertexId, point::vertex_from_point,
	slot_index,
};
use crate::{GeometryError, GeometryResult, math};
use std::fmt::Debug;

/// A polygon: ring 0 is the outer boundary, further rings are holes.
#[derive(Clone, Default, PartialEq)]
pub struct PolygonGeometry {
	dimension: Dimension,
	rings: Vec<RingGeometry>,
}

impl PolygonGeometry {
	/// Constructs a polygon of the given dimension, zeroing channels it does not carry.
	#[must_use]
	pub fn from_rings(dimension: Dimension, rings: Vec<RingGeometry>) -> Self {
		let mut polygon = Self::empty(dimension);
		for ring in rings {
			polygon.push(ring);
		}
		polygon
	}

	#[must_use]
	pub fn empty(dimension: Dimension) -> Self {
		Self {
			dimension: dimension.normalized(),
			rings: Vec::new(),
		}
	}

	pub fn exterior(&self) -> Option<&RingGeometry> {
		self.rings.first()
	}

	pub fn interiors(&self) -> &[RingGeometry] {
		self.rings.get(1..).unwrap_or_default()
	}

	pub(crate) fn rings_mut(&mut self) -> &mut Vec<RingGeometry> {
		&mut self.rings
	}

	fn locate(&self, id: VertexId) -> Option<(usize, usize)> {
		slot_index(id.part, 1)?;
		let ring = slot_index(id.ring, self.rings.len())?;
		let vertex = usize::try_from(id.vertex).ok().filter(|v| *v < self.rings[ring].0.len())?;
		Some((ring, vertex))
	}
}

impl GeometryTrait for PolygonGeometry {
	fn geometry_type(&self) -> GeometryType {
		GeometryType::new(GeometryKind::Polygon, self.dimension)
	}

	fn part_count(&self) -> usize {
		1
	}

	fn ring_count(&self, _part: usize) -> usize {
		self.rings.len()
	}

	fn vertex_count(&self, _part: usize, ring: usize) -> usize {
		self.rings.get(ring).map_or(0, |r| r.0.len())
	}

	fn coords(&self) -> Box<dyn Iterator<Item = &Coordinates> + '_> {
		Box::new(self.rings.iter().flat_map(|ring| ring.0.iter()))
	}

	fn coords_mut(&mut self) -> Box<dyn Iterator<Item = &mut Coordinates> + '_> {
		Box::new(self.rings.iter_mut().flat_map(|ring| ring.0.iter_mut()))
	}

	fn set_dimension(&mut self, dimension: Dimension) {
		let dimension = dimension.normalized();
		self.dimension = dimension;
		for c in self.coords_mut() {
			*c = c.coerced(dimension);
		}
	}

	fn vertex_at(&self, id: VertexId) -> GeometryResult<PointGeometry> {
		let (ring, vertex) = self.locate(id).ok_or(GeometryError::InvalidAddress(id))?;
		Ok(PointGeometry::from_coords(self.rings[ring].0[vertex], self.dimension))
	}

	fn insert_vertex(&mut self, id: VertexId, vertex: &PointGeometry) -> bool {
		if slot_index(id.part, 1).is_none() {
			return false;
		}
		let Some(ring) = slot_index(id.ring, self.rings.len()) else {
			return false;
		};
		let coords = vertex_from_point(vertex, self.dimension);
		self.rings[ring].insert_vertex(id.vertex, coords)
	}

	fn move_vertex(&mut self, id: VertexId, vertex: &PointGeometry) -> bool {
		let Some((ring, index)) = self.locate(id) else {
			return false;
		};
		self.rings[ring].move_vertex(index as i32, vertex, self.dimension)
	}

	/// Deletes a vertex. A closed ring that would drop below four vertices is removed
	/// instead; removing the outer ring empties the polygon.
	fn delete_vertex(&mut self, id: VertexId) -> bool {
		let Some((ring, index)) = self.locate(id) else {
			return false;
		};
		if self.rings[ring].is_closed() && self.rings[ring].is_minimal() {
			if ring == 0 {
				self.rings.clear();
			} else {
				self.rings.remove(ring);
			}
			return true;
		}
		self.rings[ring].delete_vertex(index as i32)
	}

	fn closest_segment(&self, point: &PointGeometry, epsilon: f64) -> Option<ClosestSegment> {
		let mut best: Option<ClosestSegment> = None;
		for (ring_index, ring) in self.rings.iter().enumerate() {
			let Some((sqr_dist, nearest, after)) = math::closest_segment_in_sequence(&ring.0, point.as_coord(), epsilon)
			else {
				continue;
			};
			if best.as_ref().is_none_or(|b| sqr_dist < b.sqr_dist) {
				best = Some(ClosestSegment {
					sqr_dist,
					point: PointGeometry::from(nearest),
					after: VertexId::new(0, ring_index as i32, after as i32),
				});
			}
		}
		best
	}

	fn perimeter(&self) -> f64 {
		self.rings.iter().map(RingGeometry::length).sum()
	}

	fn area(&self) -> f64 {
		math::area_polygon(self.rings.iter().map(|ring| ring.0.as_slice()))
	}
}

impl CompositeGeometryTrait<RingGeometry> for PolygonGeometry {
	fn new() -> Self {
		Self::empty(Dimension::Xy)
	}

	fn as_vec(&self) -> &Vec<RingGeometry> {
		&self.rings
	}

	fn into_inner(self) -> Vec<RingGeometry> {
		self.rings
	}

	fn push(&mut self, item: RingGeometry) {
		let dimension = self.dimension;
		self.rings.push(RingGeometry(item.0.into_iter().map(|c| c.coerced(dimension)).collect()));
	}
}

impl SingleGeometryTrait<MultiPolygonGeometry> for PolygonGeometry {
	fn into_multi(self) -> MultiPolygonGeometry {
		MultiPolygonGeometry::from_polygons(self.dimension, vec![self])
	}
}

impl Debug for PolygonGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let rings = self.rings.iter().map(|ring| {
			ring.0.iter().map(|c| c.ordinates(self.dimension)).collect::<Vec<_>>()
		});
		f.debug_list().entries(rings).finish()
	}
}

crate::impl_from_array!(PolygonGeometry, RingGeometry);

impl From<&geo::Polygon<f64>> for PolygonGeometry {
	fn from(geometry: &geo::Polygon<f64>) -> Self {
		let mut rings = Vec::with_capacity(geometry.interiors().len() + 1);
		rings.push(RingGeometry::from(geometry.exterior()));
		rings.extend(geometry.interiors().iter().map(RingGeometry::from));
		PolygonGeometry::from_rings(Dimension::Xy, rings)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn polygon() -> PolygonGeometry {
		PolygonGeometry::from(vec![
			vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]],
			vec![[2.0, 2.0], [4.0, 2.0], [4.0, 4.0], [2.0, 4.0], [2.0, 2.0]],
		])
	}

	#[test]
	fn counts_and_accessors() {
		let polygon = polygon();
		assert_eq!(polygon.geometry_type().to_string(), "Polygon");
		assert_eq!(polygon.part_count(), 1);
		assert_eq!(polygon.ring_count(0), 2);
		assert_eq!(polygon.vertex_count(0, 1), 5);
		assert_eq!(polygon.vertex_count(0, 2), 0);
		assert_eq!(polygon.n_coordinates(), 10);
		assert_eq!(polygon.exterior().map(|ring| ring.0.len()), Some(5));
		assert_eq!(polygon.interiors().len(), 1);
		assert!(PolygonGeometry::new().interiors().is_empty());
	}

	#[rstest]
	#[case(VertexId::new(0, 0, 1), Some([10.0, 0.0]))]
	#[case(VertexId::new(0, 1, 2), Some([4.0, 4.0]))]
	#[case(VertexId::new(-1, 1, 0), Some([2.0, 2.0]))]
	#[case(VertexId::new(0, 2, 0), None)]
	#[case(VertexId::new(0, 1, 5), None)]
	#[case(VertexId::new(0, -1, 0), None)]
	#[case(VertexId::new(1, 0, 0), None)]
	fn vertex_at(#[case] id: VertexId, #[case] expected: Option<[f64; 2]>) {
		assert_eq!(polygon().vertex_at(id).ok(), expected.map(PointGeometry::from));
	}

	#[test]
	fn next_vertex_crosses_rings() {
		let polygon = polygon();
		let mut id = VertexId::new(0, 0, 4);
		assert_eq!(polygon.next_vertex(&mut id), Some(PointGeometry::new(2.0, 2.0)));
		assert_eq!(id, VertexId::new(0, 1, 0));
		let mut id = VertexId::new(0, 1, 4);
		assert_eq!(polygon.next_vertex(&mut id), None);
		assert_eq!(id, VertexId::new(0, 1, 4));
		let mut count = 0;
		let mut id = VertexId::default();
		while polygon.next_vertex(&mut id).is_some() {
			count += 1;
		}
		assert_eq!(count, 10);
	}

	#[test]
	fn move_first_vertex_keeps_ring_closed() {
		let mut polygon = polygon();
		assert!(polygon.move_vertex(VertexId::new(0, 1, 0), &PointGeometry::new(1.0, 1.0)));
		assert_eq!(polygon.vertex_at(VertexId::new(0, 1, 4)), Ok(PointGeometry::new(1.0, 1.0)));
		assert!(!polygon.move_vertex(VertexId::new(0, 2, 0), &PointGeometry::new(1.0, 1.0)));
	}

	#[test]
	fn insert_vertex() {
		let mut polygon = polygon();
		assert!(polygon.insert_vertex(VertexId::new(0, 0, 1), &PointGeometry::new(5.0, -2.0)));
		assert_eq!(polygon.vertex_count(0, 0), 6);
		assert_eq!(polygon.vertex_at(VertexId::new(0, 0, 1)), Ok(PointGeometry::new(5.0, -2.0)));
		assert!(!polygon.insert_vertex(VertexId::new(0, 3, 0), &PointGeometry::new(5.0, -2.0)));
	}

	#[test]
	fn delete_vertex_removes_degenerate_rings() {
		let mut polygon = polygon();
		assert!(polygon.delete_vertex(VertexId::new(0, 1, 1)));
		assert_eq!(polygon.vertex_count(0, 1), 4);
		assert!(polygon.delete_vertex(VertexId::new(0, 1, 1)));
		assert_eq!(polygon.ring_count(0), 1);
		assert!(polygon.delete_vertex(VertexId::new(0, 0, 0)));
		assert_eq!(polygon.vertex_count(0, 0), 4);
		assert_eq!(polygon.vertex_at(VertexId::new(0, 0, 0)), polygon.vertex_at(VertexId::new(0, 0, 3)));
		assert!(polygon.delete_vertex(VertexId::new(0, 0, 0)));
		assert!(polygon.is_empty());
		assert_eq!(polygon.ring_count(0), 0);
	}

	#[test]
	fn closest_segment_reports_ring() {
		let closest = polygon().closest_segment(&PointGeometry::new(3.0, 3.5), 1e-8).unwrap();
		assert_eq!(closest.sqr_dist, 0.25);
		assert_eq!(closest.point, PointGeometry::new(3.0, 4.0));
		assert_eq!(closest.after, VertexId::new(0, 1, 3));
	}

	#[test]
	fn measures() {
		assert_eq!(polygon().area(), 96.0);
		assert_eq!(polygon().perimeter(), 48.0);
		assert_eq!(polygon().length(), 0.0);
		assert_eq!(polygon().bounding_box(), Some([0.0, 0.0, 10.0, 10.0]));
	}

	#[test]
	fn add_z_value() {
		let mut polygon = polygon();
		assert!(polygon.add_z_value(2.0));
		assert_eq!(polygon.geometry_type().to_string(), "PolygonZ");
		assert_eq!(polygon.vertex_at(VertexId::new(0, 1, 0)), Ok(PointGeometry::new_z(2.0, 2.0, 2.0)));
	}

	#[test]
	fn from_geo_polygon() {
		let geo_polygon = geo::Polygon::new(
			geo::LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]),
			vec![],
		);
		let polygon = PolygonGeometry::from(&geo_polygon);
		assert_eq!(polygon.ring_count(0), 1);
		assert_eq!(polygon.vertex_count(0, 0), 4);
	}
}
