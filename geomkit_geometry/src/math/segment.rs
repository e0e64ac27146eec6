use crate::types::Coordinates;

/// Squared distance from `point` to the segment `a`–`b`, with the nearest point on the segment.
///
/// If the squared distance is within `epsilon` of zero the point is treated as lying on the
/// segment: the distance is 0 and the nearest point is `point` itself.
pub fn sqr_dist_to_segment(point: &Coordinates, a: &Coordinates, b: &Coordinates, epsilon: f64) -> (f64, Coordinates) {
	let mut nearest = Coordinates::new(a.x(), a.y());
	let dx = b.x() - a.x();
	let dy = b.y() - a.y();
	if dx != 0.0 || dy != 0.0 {
		let t = ((point.x() - a.x()) * dx + (point.y() - a.y()) * dy) / (dx * dx + dy * dy);
		if t > 1.0 {
			nearest = Coordinates::new(b.x(), b.y());
		} else if t > 0.0 {
			nearest = Coordinates::new(a.x() + dx * t, a.y() + dy * t);
		}
	}
	let dist = nearest.sqr_dist(point);
	if dist.abs() <= epsilon {
		return (0.0, Coordinates::new(point.x(), point.y()));
	}
	(dist, nearest)
}

/// Nearest segment of a coordinate sequence to `point`.
///
/// Returns the squared distance, the nearest point and the index of the vertex that ends the
/// nearest segment. Sequences with fewer than two vertices have no segments.
pub fn closest_segment_in_sequence(
	coordinates: &[Coordinates],
	point: &Coordinates,
	epsilon: f64,
) -> Option<(f64, Coordinates, usize)> {
	let mut best: Option<(f64, Coordinates, usize)> = None;
	for (index, pair) in coordinates.windows(2).enumerate() {
		let (dist, nearest) = sqr_dist_to_segment(point, &pair[0], &pair[1], epsilon);
		if best.as_ref().is_none_or(|(best_dist, _, _)| dist < *best_dist) {
			best = Some((dist, nearest, index + 1));
		}
	}
	best
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case([5.0, 3.0], 9.0, [5.0, 0.0])]
	#[case([-3.0, 4.0], 25.0, [0.0, 0.0])]
	#[case([13.0, -4.0], 25.0, [10.0, 0.0])]
	#[case([4.0, 0.0], 0.0, [4.0, 0.0])]
	fn distance_to_segment(#[case] point: [f64; 2], #[case] dist: f64, #[case] nearest: [f64; 2]) {
		let a = Coordinates::new(0.0, 0.0);
		let b = Coordinates::new(10.0, 0.0);
		let (d, n) = sqr_dist_to_segment(&Coordinates::from(point), &a, &b, 1e-8);
		assert_eq!(d, dist);
		assert_eq!(n, Coordinates::from(nearest));
	}

	#[test]
	fn degenerate_segment() {
		let a = Coordinates::new(1.0, 1.0);
		let (d, n) = sqr_dist_to_segment(&Coordinates::new(4.0, 5.0), &a, &a, 1e-8);
		assert_eq!(d, 25.0);
		assert_eq!(n, a);
	}

	#[test]
	fn epsilon_snaps_to_query() {
		let a = Coordinates::new(0.0, 0.0);
		let b = Coordinates::new(10.0, 0.0);
		let (d, n) = sqr_dist_to_segment(&Coordinates::new(5.0, 0.001), &a, &b, 0.01);
		assert_eq!(d, 0.0);
		assert_eq!(n, Coordinates::new(5.0, 0.001));
	}

	#[test]
	fn closest_in_sequence() {
		let line: Vec<Coordinates> = [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0]].iter().map(Coordinates::from).collect();
		let (dist, nearest, after) = closest_segment_in_sequence(&line, &Coordinates::new(12.0, 6.0), 1e-8).unwrap();
		assert_eq!(dist, 4.0);
		assert_eq!(nearest, Coordinates::new(10.0, 6.0));
		assert_eq!(after, 2);
		assert!(closest_segment_in_sequence(&line[..1], &Coordinates::new(0.0, 0.0), 1e-8).is_none());
	}
}
