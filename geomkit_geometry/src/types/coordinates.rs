use super::Dimension;
use std::fmt::Debug;

/// One vertex: x, y and the optional z and m channels.
///
/// Channels the owning geometry does not carry are kept at 0, so plain equality of two
/// coordinates of the same geometry compares exactly the channels that exist.
#[derive(Clone, Copy, Default, PartialEq)]
pub struct Coordinates([f64; 4]);

impl Coordinates {
	#[must_use]
	pub fn new(x: f64, y: f64) -> Self {
		Self([x, y, 0.0, 0.0])
	}

	#[must_use]
	pub fn new_z(x: f64, y: f64, z: f64) -> Self {
		Self([x, y, z, 0.0])
	}

	#[must_use]
	pub fn new_m(x: f64, y: f64, m: f64) -> Self {
		Self([x, y, 0.0, m])
	}

	#[must_use]
	pub fn new_zm(x: f64, y: f64, z: f64, m: f64) -> Self {
		Self([x, y, z, m])
	}

	/// Builds a coordinate from the ordinates of one tuple in `dimension` order.
	///
	/// Missing ordinates are 0, surplus ordinates are ignored.
	#[must_use]
	pub fn from_ordinates(ordinates: &[f64], dimension: Dimension) -> Self {
		let get = |index: usize| ordinates.get(index).copied().unwrap_or(0.0);
		match (dimension.has_z(), dimension.has_m()) {
			(false, false) => Self::new(get(0), get(1)),
			(true, false) => Self::new_z(get(0), get(1), get(2)),
			(false, true) => Self::new_m(get(0), get(1), get(2)),
			(true, true) => Self::new_zm(get(0), get(1), get(2), get(3)),
		}
	}

	/// The ordinates present in `dimension`, in x, y, z, m order.
	pub fn ordinates(&self, dimension: Dimension) -> Vec<f64> {
		let mut values = vec![self.x(), self.y()];
		if dimension.has_z() {
			values.push(self.z());
		}
		if dimension.has_m() {
			values.push(self.m());
		}
		values
	}

	pub fn x(&self) -> f64 {
		self.0[0]
	}

	pub fn y(&self) -> f64 {
		self.0[1]
	}

	pub fn z(&self) -> f64 {
		self.0[2]
	}

	pub fn m(&self) -> f64 {
		self.0[3]
	}

	pub fn set_x(&mut self, x: f64) {
		self.0[0] = x;
	}

	pub fn set_y(&mut self, y: f64) {
		self.0[1] = y;
	}

	pub fn set_z(&mut self, z: f64) {
		self.0[2] = z;
	}

	pub fn set_m(&mut self, m: f64) {
		self.0[3] = m;
	}

	/// Zeroes the channels that `dimension` does not carry.
	#[must_use]
	pub fn coerced(mut self, dimension: Dimension) -> Self {
		if !dimension.has_z() {
			self.0[2] = 0.0;
		}
		if !dimension.has_m() {
			self.0[3] = 0.0;
		}
		self
	}

	/// Point at fraction `t` along the way from `self` to `other`, for every channel.
	#[must_use]
	pub fn interpolate(&self, other: &Coordinates, t: f64) -> Coordinates {
		let mut result = *self;
		for (value, target) in result.0.iter_mut().zip(other.0.iter()) {
			*value += (target - *value) * t;
		}
		result
	}

	/// Planar squared distance.
	pub fn sqr_dist(&self, other: &Coordinates) -> f64 {
		let dx = other.x() - self.x();
		let dy = other.y() - self.y();
		dx * dx + dy * dy
	}

	/// Planar distance.
	pub fn distance(&self, other: &Coordinates) -> f64 {
		self.sqr_dist(other).sqrt()
	}
}

impl<'a, T> From<&'a [T; 2]> for Coordinates
where
	T: Copy + Into<f64>,
{
	fn from(value: &'a [T; 2]) -> Self {
		Coordinates::new(value[0].into(), value[1].into())
	}
}

impl From<[f64; 2]> for Coordinates {
	fn from(value: [f64; 2]) -> Self {
		Coordinates::new(value[0], value[1])
	}
}

impl From<(f64, f64)> for Coordinates {
	fn from(value: (f64, f64)) -> Self {
		Coordinates::new(value.0, value.1)
	}
}

impl From<Coordinates> for [f64; 2] {
	fn from(value: Coordinates) -> Self {
		[value.x(), value.y()]
	}
}

impl From<geo::Coord> for Coordinates {
	fn from(value: geo::Coord) -> Self {
		Coordinates::new(value.x, value.y)
	}
}

impl From<&Coordinates> for geo::Coord {
	fn from(value: &Coordinates) -> Self {
		geo::Coord {
			x: value.x(),
			y: value.y(),
		}
	}
}

impl Debug for Coordinates {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.0.fmt(f)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[test]
	fn new_and_accessors() {
		let c = Coordinates::new_zm(1.0, 2.0, 3.0, 4.0);
		assert_eq!((c.x(), c.y(), c.z(), c.m()), (1.0, 2.0, 3.0, 4.0));
		let c = Coordinates::new_m(1.0, 2.0, 5.0);
		assert_eq!((c.z(), c.m()), (0.0, 5.0));
	}

	#[test]
	fn setters() {
		let mut c = Coordinates::default();
		c.set_x(1.0);
		c.set_y(2.0);
		c.set_z(3.0);
		c.set_m(4.0);
		assert_eq!(c, Coordinates::new_zm(1.0, 2.0, 3.0, 4.0));
	}

	#[rstest]
	#[case(Dimension::Xy, &[1.0, 2.0], Coordinates::new(1.0, 2.0))]
	#[case(Dimension::Xyz, &[1.0, 2.0, 3.0], Coordinates::new_z(1.0, 2.0, 3.0))]
	#[case(Dimension::Xym, &[1.0, 2.0, 3.0], Coordinates::new_m(1.0, 2.0, 3.0))]
	#[case(Dimension::Xyzm, &[1.0, 2.0, 3.0, 4.0], Coordinates::new_zm(1.0, 2.0, 3.0, 4.0))]
	fn ordinates_both_ways(#[case] dimension: Dimension, #[case] ordinates: &[f64], #[case] expected: Coordinates) {
		let c = Coordinates::from_ordinates(ordinates, dimension);
		assert_eq!(c, expected);
		assert_eq!(c.ordinates(dimension), ordinates.to_vec());
	}

	#[test]
	fn coerced_zeroes_missing_channels() {
		let c = Coordinates::new_zm(1.0, 2.0, 3.0, 4.0);
		assert_eq!(c.coerced(Dimension::Xy), Coordinates::new(1.0, 2.0));
		assert_eq!(c.coerced(Dimension::Xym), Coordinates::new_m(1.0, 2.0, 4.0));
		assert_eq!(c.coerced(Dimension::Xyzm), c);
	}

	#[test]
	fn interpolate() {
		let a = Coordinates::new_zm(0.0, 0.0, 10.0, 0.0);
		let b = Coordinates::new_zm(10.0, 20.0, 20.0, 4.0);
		assert_eq!(a.interpolate(&b, 0.25), Coordinates::new_zm(2.5, 5.0, 12.5, 1.0));
		assert_eq!(a.interpolate(&b, 0.0), a);
	}

	#[test]
	fn distances() {
		let a = Coordinates::new(2.0, 3.0);
		let b = Coordinates::new(4.0, 6.0);
		assert_eq!(a.sqr_dist(&b), 13.0);
		assert_eq!(Coordinates::new(0.0, 0.0).distance(&Coordinates::new(3.0, 4.0)), 5.0);
	}

	#[test]
	fn debug_formats_like_array() {
		assert_eq!(format!("{:?}", Coordinates::new(1.0, 2.0)), "[1.0, 2.0, 0.0, 0.0]");
	}

	#[test]
	fn conversions() {
		assert_eq!(Coordinates::from(&[3, 4]), Coordinates::new(3.0, 4.0));
		assert_eq!(Coordinates::from((5.0, 6.0)), Coordinates::new(5.0, 6.0));
		let array: [f64; 2] = Coordinates::new_z(7.0, 8.0, 9.0).into();
		assert_eq!(array, [7.0, 8.0]);
		let coord = geo::Coord::from(&Coordinates::new(1.0, 2.0));
		assert_eq!(Coordinates::from(coord), Coordinates::new(1.0, 2.0));
	}
}
