use std::fmt::{self, Display};

/// Which coordinate channels every vertex of a geometry carries.
///
/// `Xyz25d` is the legacy "2.5D" spelling of `Xyz`. It is accepted by the flat point-list
/// interop path and the legacy WKB type codes, and is normalized to `Xyz` before it is stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Dimension {
	#[default]
	Xy,
	Xyz,
	Xym,
	Xyzm,
	Xyz25d,
}

impl Dimension {
	#[must_use]
	pub fn from_flags(has_z: bool, has_m: bool) -> Self {
		match (has_z, has_m) {
			(false, false) => Dimension::Xy,
			(true, false) => Dimension::Xyz,
			(false, true) => Dimension::Xym,
			(true, true) => Dimension::Xyzm,
		}
	}

	pub fn has_z(self) -> bool {
		matches!(self, Dimension::Xyz | Dimension::Xyzm | Dimension::Xyz25d)
	}

	pub fn has_m(self) -> bool {
		matches!(self, Dimension::Xym | Dimension::Xyzm)
	}

	/// Maps the legacy 25D alias onto `Xyz`; every other value is returned as is.
	#[must_use]
	pub fn normalized(self) -> Self {
		Dimension::from_flags(self.has_z(), self.has_m())
	}

	#[must_use]
	pub fn with_z(self) -> Self {
		Dimension::from_flags(true, self.has_m())
	}

	#[must_use]
	pub fn without_z(self) -> Self {
		Dimension::from_flags(false, self.has_m())
	}

	#[must_use]
	pub fn with_m(self) -> Self {
		Dimension::from_flags(self.has_z(), true)
	}

	#[must_use]
	pub fn without_m(self) -> Self {
		Dimension::from_flags(self.has_z(), false)
	}

	/// Number of ordinates per vertex.
	pub fn coordinate_count(self) -> usize {
		2 + usize::from(self.has_z()) + usize::from(self.has_m())
	}

	/// Suffix appended to a WKT keyword, e.g. `"ZM"`.
	pub fn wkt_suffix(self) -> &'static str {
		match self {
			Dimension::Xy => "",
			Dimension::Xyz => "Z",
			Dimension::Xym => "M",
			Dimension::Xyzm => "ZM",
			Dimension::Xyz25d => "25D",
		}
	}

	fn code_offset(self) -> u32 {
		match self.normalized() {
			Dimension::Xyz => 1000,
			Dimension::Xym => 2000,
			Dimension::Xyzm => 3000,
			_ => 0,
		}
	}
}

/// Base shape of a geometry, independent of its dimension.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GeometryKind {
	#[default]
	Unknown,
	Point,
	LineString,
	Polygon,
	MultiPoint,
	MultiLineString,
	MultiPolygon,
}

impl GeometryKind {
	pub fn name(self) -> &'static str {
		match self {
			GeometryKind::Unknown => "Unknown",
			GeometryKind::Point => "Point",
			GeometryKind::LineString => "LineString",
			GeometryKind::Polygon => "Polygon",
			GeometryKind::MultiPoint => "MultiPoint",
			GeometryKind::MultiLineString => "MultiLineString",
			GeometryKind::MultiPolygon => "MultiPolygon",
		}
	}

	/// Base WKB type code, 0 for `Unknown`.
	pub fn code(self) -> u32 {
		match self {
			GeometryKind::Unknown => 0,
			GeometryKind::Point => 1,
			GeometryKind::LineString => 2,
			GeometryKind::Polygon => 3,
			GeometryKind::MultiPoint => 4,
			GeometryKind::MultiLineString => 5,
			GeometryKind::MultiPolygon => 6,
		}
	}

	fn from_code(code: u32) -> Option<Self> {
		Some(match code {
			1 => GeometryKind::Point,
			2 => GeometryKind::LineString,
			3 => GeometryKind::Polygon,
			4 => GeometryKind::MultiPoint,
			5 => GeometryKind::MultiLineString,
			6 => GeometryKind::MultiPolygon,
			_ => return None,
		})
	}

	pub fn is_multi(self) -> bool {
		matches!(
			self,
			GeometryKind::MultiPoint | GeometryKind::MultiLineString | GeometryKind::MultiPolygon
		)
	}

	/// The kind of one part: `MultiPolygon` becomes `Polygon`, single kinds stay.
	#[must_use]
	pub fn single(self) -> Self {
		match self {
			GeometryKind::MultiPoint => GeometryKind::Point,
			GeometryKind::MultiLineString => GeometryKind::LineString,
			GeometryKind::MultiPolygon => GeometryKind::Polygon,
			other => other,
		}
	}

	#[must_use]
	pub fn multi(self) -> Self {
		match self {
			GeometryKind::Point => GeometryKind::MultiPoint,
			GeometryKind::LineString => GeometryKind::MultiLineString,
			GeometryKind::Polygon => GeometryKind::MultiPolygon,
			other => other,
		}
	}
}

/// Immutable descriptor combining a [`GeometryKind`] with a [`Dimension`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GeometryType {
	pub kind: GeometryKind,
	pub dimension: Dimension,
}

const LEGACY_25D_FLAG: u32 = 0x8000_0000;

impl GeometryType {
	pub const UNKNOWN: GeometryType = GeometryType {
		kind: GeometryKind::Unknown,
		dimension: Dimension::Xy,
	};

	#[must_use]
	pub fn new(kind: GeometryKind, dimension: Dimension) -> Self {
		Self { kind, dimension }
	}

	pub fn is_unknown(self) -> bool {
		self.kind == GeometryKind::Unknown
	}

	pub fn has_z(self) -> bool {
		self.dimension.has_z()
	}

	pub fn has_m(self) -> bool {
		self.dimension.has_m()
	}

	#[must_use]
	pub fn with_z(self) -> Self {
		Self::new(self.kind, self.dimension.with_z())
	}

	#[must_use]
	pub fn without_z(self) -> Self {
		Self::new(self.kind, self.dimension.without_z())
	}

	#[must_use]
	pub fn with_m(self) -> Self {
		Self::new(self.kind, self.dimension.with_m())
	}

	#[must_use]
	pub fn without_m(self) -> Self {
		Self::new(self.kind, self.dimension.without_m())
	}

	#[must_use]
	pub fn flat(self) -> Self {
		Self::new(self.kind, Dimension::Xy)
	}

	#[must_use]
	pub fn normalized(self) -> Self {
		Self::new(self.kind, self.dimension.normalized())
	}

	/// The WKB type code: ISO offsets for Z/M/ZM, the high bit for legacy 25D, 0 for unknown.
	pub fn code(self) -> u32 {
		let base = self.kind.code();
		if base == 0 {
			return 0;
		}
		if self.dimension == Dimension::Xyz25d {
			return LEGACY_25D_FLAG | base;
		}
		base + self.dimension.code_offset()
	}

	/// Decodes a WKB type code. Returns `None` for codes outside the supported set.
	#[must_use]
	pub fn from_code(code: u32) -> Option<Self> {
		if code & LEGACY_25D_FLAG != 0 {
			let kind = GeometryKind::from_code(code & !LEGACY_25D_FLAG)?;
			return Some(Self::new(kind, Dimension::Xyz25d));
		}
		let dimension = match code / 1000 {
			0 => Dimension::Xy,
			1 => Dimension::Xyz,
			2 => Dimension::Xym,
			3 => Dimension::Xyzm,
			_ => return None,
		};
		let kind = GeometryKind::from_code(code % 1000)?;
		Some(Self::new(kind, dimension))
	}

	/// The WKT keyword with its glued dimension suffix, e.g. `"MultiPolygonZM"`.
	pub fn wkt_name(self) -> String {
		if self.is_unknown() {
			return String::from("Unknown");
		}
		format!("{}{}", self.kind.name(), self.dimension.wkt_suffix())
	}
}

impl Display for GeometryType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.wkt_name())
	}
}
