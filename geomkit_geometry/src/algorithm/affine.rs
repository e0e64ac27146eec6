use super::{CoordinateTransform, TransformDirection};
use crate::{GeometryResult, types::*};
use log::debug;

/// A 2×3 matrix mapping `(x, y)` to `(a·x + b·y + xoff, d·x + e·y + yoff)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineTransform {
	pub a: f64,
	pub b: f64,
	pub xoff: f64,
	pub d: f64,
	pub e: f64,
	pub yoff: f64,
}

impl AffineTransform {
	#[must_use]
	pub fn identity() -> Self {
		Self {
			a: 1.0,
			b: 0.0,
			xoff: 0.0,
			d: 0.0,
			e: 1.0,
			yoff: 0.0,
		}
	}

	#[must_use]
	pub fn translate(dx: f64, dy: f64) -> Self {
		Self {
			xoff: dx,
			yoff: dy,
			..Self::identity()
		}
	}

	#[must_use]
	pub fn scale(sx: f64, sy: f64) -> Self {
		Self {
			a: sx,
			e: sy,
			..Self::identity()
		}
	}

	/// Counter-clockwise rotation about the origin.
	#[must_use]
	pub fn rotate(degrees: f64) -> Self {
		let (sin, cos) = sin_cos_degrees(degrees);
		Self {
			a: cos,
			b: -sin,
			xoff: 0.0,
			d: sin,
			e: cos,
			yoff: 0.0,
		}
	}

	/// The transform that applies `self` first and `next` second.
	#[must_use]
	pub fn then(&self, next: &AffineTransform) -> Self {
		Self {
			a: next.a * self.a + next.b * self.d,
			b: next.a * self.b + next.b * self.e,
			xoff: next.a * self.xoff + next.b * self.yoff + next.xoff,
			d: next.d * self.a + next.e * self.d,
			e: next.d * self.b + next.e * self.e,
			yoff: next.d * self.xoff + next.e * self.yoff + next.yoff,
		}
	}

	/// Maps x and y; z and m pass through unchanged.
	pub fn apply(&self, c: &Coordinates) -> Coordinates {
		let mut result = *c;
		result.set_x(self.a * c.x() + self.b * c.y() + self.xoff);
		result.set_y(self.d * c.x() + self.e * c.y() + self.yoff);
		result
	}
}

impl Default for AffineTransform {
	fn default() -> Self {
		Self::identity()
	}
}

/// Sine and cosine of an angle in degrees, exact for multiples of 90°.
fn sin_cos_degrees(degrees: f64) -> (f64, f64) {
	let normalized = degrees.rem_euclid(360.0);
	if normalized % 90.0 == 0.0 {
		match (normalized / 90.0) as u8 {
			0 => (0.0, 1.0),
			1 => (1.0, 0.0),
			2 => (0.0, -1.0),
			_ => (-1.0, 0.0),
		}
	} else {
		degrees.to_radians().sin_cos()
	}
}

/// In-place coordinate transforms, available on every geometry.
pub trait GeometryTransform {
	/// Maps x and y of every vertex through `matrix`, leaving z and m untouched.
	fn apply_affine(&mut self, matrix: &AffineTransform);

	fn translate(&mut self, dx: f64, dy: f64) {
		self.apply_affine(&AffineTransform::translate(dx, dy));
	}

	/// Rotates counter-clockwise by `degrees` about `about`.
	///
	/// The three steps are applied one after the other rather than folded into one matrix, so
	/// vertices on the pivot stay exactly where they are.
	fn rotate(&mut self, degrees: f64, about: &PointGeometry) {
		self.apply_affine(&AffineTransform::translate(-about.x(), -about.y()));
		self.apply_affine(&AffineTransform::rotate(degrees));
		self.apply_affine(&AffineTransform::translate(about.x(), about.y()));
	}

	/// Passes every vertex exactly once through `transform`. m values are never touched. If any
	/// vertex fails, the geometry is left as it was.
	///
	/// # Errors
	/// Returns the first failure reported by `transform`.
	fn reproject(&mut self, transform: &dyn CoordinateTransform, direction: TransformDirection) -> GeometryResult<()>;
}

impl<G: GeometryTrait> GeometryTransform for G {
	fn apply_affine(&mut self, matrix: &AffineTransform) {
		for c in self.coords_mut() {
			*c = matrix.apply(c);
		}
	}

	fn reproject(&mut self, transform: &dyn CoordinateTransform, direction: TransformDirection) -> GeometryResult<()> {
		let (from, to) = match direction {
			TransformDirection::Forward => (transform.source_crs(), transform.destination_crs()),
			TransformDirection::Reverse => (transform.destination_crs(), transform.source_crs()),
		};
		debug!("reprojecting {} vertices from {from} to {to}", self.n_coordinates());

		let has_z = self.geometry_type().has_z();
		let mut projected = self.clone();
		for c in projected.coords_mut() {
			let (x, y, z) = transform.transform(c.x(), c.y(), has_z.then(|| c.z()), direction)?;
			c.set_x(x);
			c.set_y(y);
			if let (true, Some(z)) = (has_z, z) {
				c.set_z(z);
			}
		}
		*self = projected;
		Ok(())
	}
}
