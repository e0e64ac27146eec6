use crate::codec::Polyline;

/// True if both point lists have the same length and identical points in the same order.
///
/// Coordinates are compared exactly, so a NaN never matches.
pub fn compare_polylines(a: &[[f64; 2]], b: &[[f64; 2]]) -> bool {
	a.len() == b.len() && a.iter().zip(b).all(|(p, q)| p[0] == q[0] && p[1] == q[1])
}

/// True if both polygons have the same number of rings and every ring matches by
/// [`compare_polylines`].
pub fn compare_polygons(a: &[Polyline], b: &[Polyline]) -> bool {
	a.len() == b.len() && a.iter().zip(b).all(|(p, q)| compare_polylines(p, q))
}
