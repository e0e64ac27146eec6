use super::{ClosestSegment, GeometryTrait, PointGeometry, VertexId, slot_index};

/// Resolves the part slot of `id` against `count` parts and returns the part index together
/// with the address inside that part.
pub(crate) fn locate_part(id: VertexId, count: usize) -> Option<(usize, VertexId)> {
	let part = slot_index(id.part, count)?;
	Some((part, VertexId::new(0, id.ring, id.vertex)))
}

/// Nearest segment over all parts; `after` carries the index of the winning part.
pub(crate) fn closest_in_parts<G: GeometryTrait>(
	parts: &[G],
	point: &PointGeometry,
	epsilon: f64,
) -> Option<ClosestSegment> {
	let mut best: Option<ClosestSegment> = None;
	for (index, part) in parts.iter().enumerate() {
		let Some(mut candidate) = part.closest_segment(point, epsilon) else {
			continue;
		};
		if best.as_ref().is_none_or(|b| candidate.sqr_dist < b.sqr_dist) {
			candidate.after = candidate.after.with_part(index);
			best = Some(candidate);
		}
	}
	best
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::LineStringGeometry;

	#[test]
	fn locate() {
		assert_eq!(locate_part(VertexId::new(1, 0, 3), 2), Some((1, VertexId::new(0, 0, 3))));
		assert_eq!(locate_part(VertexId::new(-1, 2, 3), 1), Some((0, VertexId::new(0, 2, 3))));
		assert_eq!(locate_part(VertexId::new(-1, 0, 0), 2), None);
		assert_eq!(locate_part(VertexId::new(2, 0, 0), 2), None);
	}

	#[test]
	fn closest_picks_nearest_part() {
		let parts = vec![
			LineStringGeometry::from(&[[0, 0], [10, 0]]),
			LineStringGeometry::from(&[[0, 5], [10, 5]]),
		];
		let closest = closest_in_parts(&parts, &PointGeometry::new(3.0, 4.0), 1e-8).unwrap();
		assert_eq!(closest.sqr_dist, 1.0);
		assert_eq!(closest.after, VertexId::new(1, 0, 1));
		assert!(closest_in_parts::<LineStringGeometry>(&[], &PointGeometry::new(0.0, 0.0), 1e-8).is_none());
	}
}
