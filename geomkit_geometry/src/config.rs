use crate::{GeometryError, GeometryResult};

/// Parameters of the corner-cutting smoother.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothParameters {
	/// Number of passes; 0 returns an unchanged copy.
	pub iterations: u32,
	/// Fraction of each segment cut off at both of its corners, in (0, 0.5].
	pub offset: f64,
	/// Segments not longer than this are kept as they are.
	pub minimum_distance: f64,
}

impl SmoothParameters {
	/// Creates validated smoothing parameters.
	///
	/// # Errors
	/// Fails with [`GeometryError::MalformedInput`] if `offset` lies outside (0, 0.5] or
	/// `minimum_distance` is negative or NaN.
	pub fn new(iterations: u32, offset: f64, minimum_distance: f64) -> GeometryResult<Self> {
		if offset.is_nan() || offset <= 0.0 || offset > 0.5 {
			return Err(GeometryError::MalformedInput(format!(
				"smoothing offset must be in (0, 0.5], got {offset}"
			)));
		}
		if minimum_distance.is_nan() || minimum_distance < 0.0 {
			return Err(GeometryError::MalformedInput(format!(
				"minimum segment distance must not be negative, got {minimum_distance}"
			)));
		}
		Ok(Self {
			iterations,
			offset,
			minimum_distance,
		})
	}
}

impl Default for SmoothParameters {
	fn default() -> Self {
		Self {
			iterations: 1,
			offset: 0.25,
			minimum_distance: 0.0,
		}
	}
}

/// Parameters of a buffer request sent to the topology engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BufferParameters {
	pub distance: f64,
	/// Segments used to approximate a quarter circle.
	pub segments: u32,
}

impl BufferParameters {
	#[must_use]
	pub fn new(distance: f64) -> Self {
		Self {
			distance,
			..Self::default()
		}
	}

	#[must_use]
	pub fn with_segments(mut self, segments: u32) -> Self {
		self.segments = segments;
		self
	}
}

impl Default for BufferParameters {
	fn default() -> Self {
		Self {
			distance: 0.0,
			segments: 8,
		}
	}
}

/// Output options of the WKT writer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WktOptions {
	/// Round coordinates to this many decimals; `None` writes them losslessly.
	pub precision: Option<u8>,
}
