use crate::types::Coordinates;

/// Signed shoelace area of a ring, positive for counter-clockwise winding.
pub fn area_ring(ring: &[Coordinates]) -> f64 {
	let Some(mut p2) = ring.last() else {
		return 0.0;
	};
	let mut sum = 0f64;
	for p1 in ring {
		sum += (p2.x() - p1.x()) * (p1.y() + p2.y());
		p2 = p1;
	}
	sum / 2.0
}

/// Area of a polygon given as rings: the outer ring minus its holes, ignoring winding.
pub fn area_polygon<'a>(rings: impl IntoIterator<Item = &'a [Coordinates]>) -> f64 {
	let mut rings = rings.into_iter();
	let Some(outer) = rings.next() else {
		return 0.0;
	};
	let mut sum = area_ring(outer).abs();
	for hole in rings {
		sum -= area_ring(hole).abs();
	}
	sum
}

/// Sum of the segment lengths of an open or closed sequence.
pub fn length_sequence(coordinates: &[Coordinates]) -> f64 {
	coordinates.windows(2).map(|pair| pair[0].distance(&pair[1])).sum()
}
