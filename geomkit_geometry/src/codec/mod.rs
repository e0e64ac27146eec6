//! Conversions between geometries and their external representations.
//!
//! - [`wkt`]: Well-Known Text, read and written
//! - [`wkb`]: Well-Known Binary, read in either byte order and written little-endian
//! - [`geojson`]: GeoJSON geometry objects, written only
//! - [`legacy`]: flat point lists of the older point/polyline/polygon API
//!
//! Every decoder reports ill-formed data as [`GeometryError::MalformedInput`]. The
//! `read_*` methods of [`GeometryDecode`] reset their target to the empty state on failure, so
//! a failed decode never leaves a partially populated geometry behind.

pub mod geojson;
pub mod legacy;
pub mod wkb;
pub mod wkt;

use crate::{Geometry, GeometryError, GeometryResult, WktOptions, types::*};
use anyhow::{Result, bail};

pub use legacy::{MultiPolygonRings, MultiPolyline, PolygonRings, Polyline};

/// Decoding of a geometry of one specific variant from any supported format.
pub trait GeometryDecode: Default + Sized {
	/// Narrows a decoded geometry to `Self`.
	///
	/// # Errors
	/// Fails with [`GeometryError::MalformedInput`] if `geometry` is a different variant.
	fn from_geometry(geometry: Geometry) -> GeometryResult<Self>;

	fn from_wkt(text: &str) -> GeometryResult<Self> {
		Self::from_geometry(wkt::parse_wkt(text)?)
	}

	fn from_wkb(data: &[u8]) -> GeometryResult<Self> {
		Self::from_geometry(wkb::parse_wkb(data)?)
	}

	fn from_wkb_hex(text: &str) -> GeometryResult<Self> {
		let data = decode_hex(text).map_err(|e| GeometryError::malformed(&e))?;
		Self::from_wkb(&data)
	}

	/// Replaces `self` with the geometry in `text`. On failure `self` is reset to its empty
	/// state.
	fn read_wkt(&mut self, text: &str) -> GeometryResult<()> {
		replace_or_reset(self, Self::from_wkt(text))
	}

	/// Replaces `self` with the geometry in `data`. On failure `self` is reset to its empty
	/// state.
	fn read_wkb(&mut self, data: &[u8]) -> GeometryResult<()> {
		replace_or_reset(self, Self::from_wkb(data))
	}
}

fn replace_or_reset<G: Default>(target: &mut G, result: GeometryResult<G>) -> GeometryResult<()> {
	match result {
		Ok(geometry) => {
			*target = geometry;
			Ok(())
		}
		Err(error) => {
			*target = G::default();
			Err(error)
		}
	}
}

/// Encoding of a geometry into every supported format.
pub trait GeometryEncode {
	fn to_wkt_with(&self, options: &WktOptions) -> String;

	/// Lossless WKT, e.g. `"LineString (0 0, 10 0)"`.
	fn to_wkt(&self) -> String {
		self.to_wkt_with(&WktOptions::default())
	}

	/// Little-endian WKB.
	fn to_wkb(&self) -> GeometryResult<Vec<u8>>;

	/// Upper-case hexadecimal WKB, as used by many databases.
	fn to_wkb_hex(&self) -> GeometryResult<String> {
		Ok(encode_hex(&self.to_wkb()?))
	}

	fn to_geojson(&self) -> String;
}

macro_rules! impl_codec {
	($($variant:ident => $t:ty),*) => {$(
		impl GeometryDecode for $t {
			fn from_geometry(geometry: Geometry) -> GeometryResult<Self> {
				match geometry {
					Geometry::$variant(g) => Ok(g),
					other => Err(GeometryError::MalformedInput(format!(
						"expected {}, found {}",
						GeometryKind::$variant.name(),
						other.kind().name()
					))),
				}
			}
		}

		impl GeometryEncode for $t {
			fn to_wkt_with(&self, options: &WktOptions) -> String {
				wkt::format_wkt(self, options)
			}

			fn to_wkb(&self) -> GeometryResult<Vec<u8>> {
				wkb::write_wkb(self)
			}

			fn to_geojson(&self) -> String {
				geojson::format_geojson(self)
			}
		}
	)*};
}

impl_codec!(
	Point => PointGeometry,
	LineString => LineStringGeometry,
	Polygon => PolygonGeometry,
	MultiPoint => MultiPointGeometry,
	MultiLineString => MultiLineStringGeometry,
	MultiPolygon => MultiPolygonGeometry
);

impl GeometryDecode for Geometry {
	fn from_geometry(geometry: Geometry) -> GeometryResult<Self> {
		Ok(geometry)
	}
}

impl GeometryEncode for Geometry {
	fn to_wkt_with(&self, options: &WktOptions) -> String {
		wkt::format_wkt(self, options)
	}

	fn to_wkb(&self) -> GeometryResult<Vec<u8>> {
		wkb::write_wkb(self)
	}

	fn to_geojson(&self) -> String {
		geojson::format_geojson(self)
	}
}

/// Formats an ordinate. Without a precision the shortest text that parses back to the same
/// value is used; with one, the value is rounded and trailing zeros are dropped.
pub(crate) fn format_number(value: f64, precision: Option<u8>) -> String {
	let mut text = match precision {
		None => format!("{value}"),
		Some(precision) => {
			let text = format!("{value:.precision$}", precision = usize::from(precision));
			if text.contains('.') {
				text.trim_end_matches('0').trim_end_matches('.').to_string()
			} else {
				text
			}
		}
	};
	if text == "-0" {
		text = String::from("0");
	}
	text
}

pub fn encode_hex(data: &[u8]) -> String {
	const DIGITS: &[u8; 16] = b"0123456789ABCDEF";
	let mut text = String::with_capacity(data.len() * 2);
	for byte in data {
		text.push(DIGITS[usize::from(byte >> 4)] as char);
		text.push(DIGITS[usize::from(byte & 0x0f)] as char);
	}
	text
}

/// Decodes hexadecimal text; surrounding whitespace is ignored, case is not significant.
pub fn decode_hex(text: &str) -> Result<Vec<u8>> {
	let text = text.trim().as_bytes();
	if text.len() % 2 != 0 {
		bail!("hex string has an odd number of digits ({})", text.len());
	}
	text
		.chunks_exact(2)
		.enumerate()
		.map(|(index, pair)| {
			let high = hex_digit(pair[0]);
			let low = hex_digit(pair[1]);
			match (high, low) {
				(Some(high), Some(low)) => Ok((high << 4) | low),
				_ => bail!("invalid hex digit at position {}", index * 2),
			}
		})
		.collect()
}

fn hex_digit(digit: u8) -> Option<u8> {
	match digit {
		b'0'..=b'9' => Some(digit - b'0'),
		b'a'..=b'f' => Some(digit - b'a' + 10),
		b'A'..=b'F' => Some(digit - b'A' + 10),
		_ => None,
	}
}
