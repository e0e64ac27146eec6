//! Well-Known Text.
//!
//! The reader accepts keywords in any case, with the `Z`/`M`/`ZM` suffix glued to the keyword
//! or separated by whitespace. Without a suffix the first coordinate tuple decides the
//! dimension: 3 ordinates are read as Z, 4 as ZM. Every later tuple must have the same length.
//!
//! The writer uses the mixed-case keywords with glued suffixes, e.g. `PolygonZ ((0 0 1, ...))`.
//! Rings and parts are separated by `,` and vertices by `, `.

use super::format_number;
use crate::{Geometry, GeometryError, GeometryResult, WktOptions, types::*};
use anyhow::{Context, Result, bail, ensure};
use geomkit_core::byte_iterator::{
	ByteIterator, parse_delimited_entries, parse_number_as, parse_tag_ignore_case, parse_word,
};
use log::trace;
use regex::Regex;

/// Parses a WKT string into a geometry.
///
/// # Errors
/// Fails with [`GeometryError::MalformedInput`] on unknown keywords, unbalanced brackets,
/// tuples of inconsistent length or trailing characters.
pub fn parse_wkt(text: &str) -> GeometryResult<Geometry> {
	trace!("parsing {} bytes of WKT", text.len());
	read_wkt(text).map_err(|e| GeometryError::malformed(&e))
}

lazy_static::lazy_static! {
	static ref RE_HEADER: Regex =
		Regex::new(r"(?i)^\s*(multipoint|multilinestring|multipolygon|point|linestring|polygon)\s*(zm|z|m)?").unwrap();
}

fn read_wkt(text: &str) -> Result<Geometry> {
	let Some(captures) = RE_HEADER.captures(text) else {
		bail!("unknown geometry keyword in {:?}", text.chars().take(32).collect::<String>());
	};
	let Some(keyword) = captures.get(1) else {
		bail!("missing geometry keyword");
	};
	let mut dimension = captures.get(2).map(|suffix| match suffix.as_str().to_ascii_lowercase().as_str() {
		"zm" => Dimension::Xyzm,
		"z" => Dimension::Xyz,
		_ => Dimension::Xym,
	});
	let body = &text[captures.get(0).map_or(0, |m| m.end())..];
	let kind = keyword.as_str().to_ascii_lowercase();

	let mut iter = ByteIterator::from_text(body, true);
	let geometry = match kind.as_str() {
		"point" => {
			let point = parse_point(&mut iter, &mut dimension).context("while parsing a point")?;
			Geometry::Point(build_point(point, dimension))
		}
		"linestring" => {
			let coords = parse_sequence(&mut iter, &mut dimension).context("while parsing a line string")?;
			Geometry::LineString(LineStringGeometry::from_coords(dimension.unwrap_or_default(), coords))
		}
		"polygon" => {
			let rings = parse_polygon(&mut iter, &mut dimension).context("while parsing a polygon")?;
			Geometry::Polygon(build_polygon(rings, dimension))
		}
		"multipoint" => {
			let points = parse_parts(&mut iter, &mut dimension, parse_multi_point_entry)
				.context("while parsing a multi point")?;
			Geometry::MultiPoint(MultiPointGeometry::from_points(
				dimension.unwrap_or_default(),
				points.into_iter().map(|point| build_point(point, dimension)).collect(),
			))
		}
		"multilinestring" => {
			let lines =
				parse_parts(&mut iter, &mut dimension, parse_sequence).context("while parsing a multi line string")?;
			let dimension = dimension.unwrap_or_default();
			Geometry::MultiLineString(MultiLineStringGeometry::from_lines(
				dimension,
				lines
					.into_iter()
					.map(|coords| LineStringGeometry::from_coords(dimension, coords))
					.collect(),
			))
		}
		_ => {
			let polygons =
				parse_parts(&mut iter, &mut dimension, parse_polygon).context("while parsing a multi polygon")?;
			Geometry::MultiPolygon(MultiPolygonGeometry::from_polygons(
				dimension.unwrap_or_default(),
				polygons.into_iter().map(|rings| build_polygon(rings, dimension)).collect(),
			))
		}
	};

	iter.skip_whitespace();
	if !iter.is_exhausted() {
		return Err(iter.format_error("unexpected characters after the geometry"));
	}
	Ok(geometry)
}

fn build_point(coords: Option<Coordinates>, dimension: Option<Dimension>) -> PointGeometry {
	match coords {
		Some(coords) => PointGeometry::from_coords(coords, dimension.unwrap_or_default()),
		None => PointGeometry::empty(),
	}
}

fn build_polygon(rings: Vec<Vec<Coordinates>>, dimension: Option<Dimension>) -> PolygonGeometry {
	PolygonGeometry::from_rings(dimension.unwrap_or_default(), rings.into_iter().map(RingGeometry).collect())
}

/// Consumes the `EMPTY` keyword if it comes next.
fn parse_empty(iter: &mut ByteIterator) -> Result<bool> {
	iter.skip_whitespace();
	if iter.peek().is_some_and(|b| b.is_ascii_alphabetic()) {
		parse_tag_ignore_case(iter, "EMPTY")?;
		return Ok(true);
	}
	Ok(false)
}

/// One whitespace separated coordinate tuple. The first tuple fixes an undeclared dimension.
fn parse_tuple(iter: &mut ByteIterator, dimension: &mut Option<Dimension>) -> Result<Coordinates> {
	let mut values = Vec::with_capacity(4);
	while let Some(value) = parse_ordinate(iter)? {
		values.push(value);
	}
	ensure!(
		(2..=4).contains(&values.len()),
		"a coordinate tuple needs 2 to 4 numbers, found {}",
		values.len()
	);
	let expected = *dimension.get_or_insert(match values.len() {
		2 => Dimension::Xy,
		3 => Dimension::Xyz,
		_ => Dimension::Xyzm,
	});
	ensure!(
		values.len() == expected.coordinate_count(),
		"expected {} numbers per coordinate tuple, found {}",
		expected.coordinate_count(),
		values.len()
	);
	Ok(Coordinates::from_ordinates(&values, expected))
}

/// One ordinate, or `None` if no number follows. Besides decimal numbers the non-finite values
/// written by the formatter (`inf`, `-inf`, `NaN`) are accepted.
fn parse_ordinate(iter: &mut ByteIterator) -> Result<Option<f64>> {
	iter.skip_whitespace();
	let sign = match iter.peek() {
		Some(b'0'..=b'9' | b'.') => return parse_number_as::<f64>(iter).map(Some),
		Some(b'i' | b'I' | b'n' | b'N') => 1.0,
		Some(b'-') => {
			iter.advance();
			-1.0
		}
		Some(b'+') => {
			iter.advance();
			1.0
		}
		_ => return Ok(None),
	};
	let value = match iter.peek() {
		Some(b'0'..=b'9' | b'.') => parse_number_as::<f64>(iter)?,
		Some(b) if b.is_ascii_alphabetic() => match parse_word(iter).to_ascii_lowercase().as_str() {
			"inf" | "infinity" => f64::INFINITY,
			"nan" => f64::NAN,
			word => return Err(iter.format_error(&format!("unexpected word '{word}' in a coordinate tuple"))),
		},
		_ => return Err(iter.format_error("expected a number after the sign")),
	};
	Ok(Some(sign * value))
}

fn parse_point(iter: &mut ByteIterator, dimension: &mut Option<Dimension>) -> Result<Option<Coordinates>> {
	if parse_empty(iter)? {
		return Ok(None);
	}
	let mut tuples = parse_delimited_entries(iter, b'(', b')', |iter| parse_tuple(iter, dimension))?;
	ensure!(tuples.len() == 1, "a point needs exactly one coordinate tuple, found {}", tuples.len());
	Ok(tuples.pop())
}

/// A point inside a multi point: `(x y)`, bare `x y` or `EMPTY`.
fn parse_multi_point_entry(iter: &mut ByteIterator, dimension: &mut Option<Dimension>) -> Result<Option<Coordinates>> {
	iter.skip_whitespace();
	if matches!(iter.peek(), Some(b'(' | b'E' | b'e')) {
		parse_point(iter, dimension)
	} else {
		parse_tuple(iter, dimension).map(Some)
	}
}

fn parse_sequence(iter: &mut ByteIterator, dimension: &mut Option<Dimension>) -> Result<Vec<Coordinates>> {
	if parse_empty(iter)? {
		return Ok(Vec::new());
	}
	let coords = parse_delimited_entries(iter, b'(', b')', |iter| parse_tuple(iter, dimension))?;
	if coords.is_empty() {
		bail!("empty coordinate list, expected EMPTY instead");
	}
	Ok(coords)
}

fn parse_polygon(iter: &mut ByteIterator, dimension: &mut Option<Dimension>) -> Result<Vec<Vec<Coordinates>>> {
	parse_parts(iter, dimension, parse_sequence)
}

/// A bracketed, non-empty list of elements, or `EMPTY`.
fn parse_parts<R>(
	iter: &mut ByteIterator,
	dimension: &mut Option<Dimension>,
	parse_entry: fn(&mut ByteIterator, &mut Option<Dimension>) -> Result<R>,
) -> Result<Vec<R>> {
	if parse_empty(iter)? {
		return Ok(Vec::new());
	}
	let entries = parse_delimited_entries(iter, b'(', b')', |iter| parse_entry(iter, dimension))?;
	if entries.is_empty() {
		bail!("empty list, expected EMPTY instead");
	}
	Ok(entries)
}

/// The part of a WKT string after the keyword: the bracketed body, or `None` for `EMPTY`.
pub(crate) trait WktBody {
	fn wkt_body(&self, precision: Option<u8>) -> Option<String>;
}

/// Formats `geometry` with its keyword and dimension suffix.
pub(crate) fn format_wkt<G: GeometryTrait + WktBody>(geometry: &G, options: &WktOptions) -> String {
	let geometry_type = geometry.geometry_type();
	if geometry_type.is_unknown() {
		return String::from("Point EMPTY");
	}
	let body = geometry
		.wkt_body(options.precision)
		.unwrap_or_else(|| String::from("EMPTY"));
	format!("{} {body}", geometry_type.wkt_name())
}

fn tuple(coords: &Coordinates, dimension: Dimension, precision: Option<u8>) -> String {
	coords
		.ordinates(dimension)
		.into_iter()
		.map(|value| format_number(value, precision))
		.collect::<Vec<_>>()
		.join(" ")
}

fn sequence(coords: &[Coordinates], dimension: Dimension, precision: Option<u8>) -> String {
	if coords.is_empty() {
		return String::from("EMPTY");
	}
	let tuples: Vec<String> = coords.iter().map(|c| tuple(c, dimension, precision)).collect();
	format!("({})", tuples.join(", "))
}

fn join_parts(entries: Vec<String>) -> Option<String> {
	if entries.is_empty() {
		None
	} else {
		Some(format!("({})", entries.join(",")))
	}
}

impl WktBody for PointGeometry {
	fn wkt_body(&self, precision: Option<u8>) -> Option<String> {
		let coords = self.coords().next()?;
		Some(format!("({})", tuple(coords, self.dimension(), precision)))
	}
}

impl WktBody for LineStringGeometry {
	fn wkt_body(&self, precision: Option<u8>) -> Option<String> {
		if self.is_empty() {
			return None;
		}
		Some(sequence(self.as_coords(), self.dimension(), precision))
	}
}

impl WktBody for PolygonGeometry {
	fn wkt_body(&self, precision: Option<u8>) -> Option<String> {
		let dimension = self.dimension();
		join_parts(self.as_vec().iter().map(|ring| sequence(&ring.0, dimension, precision)).collect())
	}
}

impl WktBody for MultiPointGeometry {
	fn wkt_body(&self, precision: Option<u8>) -> Option<String> {
		join_parts(
			self
				.as_vec()
				.iter()
				.map(|point| point.wkt_body(precision).unwrap_or_else(|| String::from("EMPTY")))
				.collect(),
		)
	}
}

impl WktBody for MultiLineStringGeometry {
	fn wkt_body(&self, precision: Option<u8>) -> Option<String> {
		let dimension = self.dimension();
		join_parts(self.as_vec().iter().map(|line| sequence(line.as_coords(), dimension, precision)).collect())
	}
}

impl WktBody for MultiPolygonGeometry {
	fn wkt_body(&self, precision: Option<u8>) -> Option<String> {
		join_parts(
			self
				.as_vec()
				.iter()
				.map(|polygon| polygon.wkt_body(precision).unwrap_or_else(|| String::from("EMPTY")))
				.collect(),
		)
	}
}

impl WktBody for Geometry {
	fn wkt_body(&self, precision: Option<u8>) -> Option<String> {
		match self {
			Geometry::Point(g) => g.wkt_body(precision),
			Geometry::LineString(g) => g.wkt_body(precision),
			Geometry::Polygon(g) => g.wkt_body(precision),
			Geometry::MultiPoint(g) => g.wkt_body(precision),
			Geometry::MultiLineString(g) => g.wkt_body(precision),
			Geometry::MultiPolygon(g) => g.wkt_body(precision),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::GeometryEncode;
	use rstest::rstest;

	#[rstest]
	#[case("Point (1 2)")]
	#[case("PointZ (1 2 3)")]
	#[case("PointM (1 2 3)")]
	#[case("PointZM (1 2 3 -4)")]
	#[case("Point EMPTY")]
	#[case("LineString (10 -5, 20 -5, 20 5)")]
	#[case("LineStringZ EMPTY")]
	#[case("Polygon ((-4 14, -4 0, 0 13, -4 14),(-1 11, -3 11, -3 9, -1 11))")]
	#[case("PolygonM ((0 0 1, 10 0 2, 10 10 3, 0 0 1))")]
	#[case("MultiPoint ((0 0),(10 0))")]
	#[case("MultiPoint ((1 2),EMPTY)")]
	#[case("MultiLineString ((0 0, 10 0, 10 10, 20 10),(30 30, 40 30, 40 40, 50 40))")]
	#[case("MultiPolygon (((0 0, 10 0, 10 10, 0 10, 0 0)),((2 2, 4 2, 4 4, 2 4, 2 2)))")]
	#[case("MultiPolygon EMPTY")]
	#[case("LineString (0.5 0.0000001, 1234567.25 -0.125)")]
	fn round_trip(#[case] wkt: &str) {
		let geometry = parse_wkt(wkt).unwrap();
		assert_eq!(geometry.to_wkt(), wkt);
		assert_eq!(parse_wkt(&geometry.to_wkt()).unwrap(), geometry);
	}

	#[test]
	fn non_finite_ordinates_round_trip() {
		let line = LineStringGeometry::from(vec![[f64::INFINITY, 0.0], [1.0, f64::NEG_INFINITY]]);
		let wkt = line.to_wkt();
		assert_eq!(wkt, "LineString (inf 0, 1 -inf)");
		assert_eq!(parse_wkt(&wkt).unwrap(), Geometry::LineString(line));

		let point = parse_wkt(&PointGeometry::new(f64::NAN, 2.0).to_wkt()).unwrap();
		assert!(point.coords().next().unwrap().x().is_nan());
		assert_eq!(parse_wkt("Point (+Infinity 1)").unwrap().to_wkt(), "Point (inf 1)");
	}

	#[rstest]
	#[case("Point (infinite 1)")]
	#[case("Point (- 1)")]
	#[case("Point (1 -nope)")]
	fn bad_words_in_tuples(#[case] wkt: &str) {
		assert!(matches!(parse_wkt(wkt), Err(GeometryError::MalformedInput(_))));
	}

	#[rstest]
	#[case("POINT Z (1 2 3)", "PointZ (1 2 3)")]
	#[case("point(1 2)", "Point (1 2)")]
	#[case("  pointzm (1 2 3 4)  ", "PointZM (1 2 3 4)")]
	#[case("LINESTRING (1 2 3, 4 5 6)", "LineStringZ (1 2 3, 4 5 6)")]
	#[case("LineString (1 2 3 4, 5 6 7 8)", "LineStringZM (1 2 3 4, 5 6 7 8)")]
	#[case("LineStringM(0 0 5,1 1 6)", "LineStringM (0 0 5, 1 1 6)")]
	#[case("MultiPoint (1 2, 3 4)", "MultiPoint ((1 2),(3 4))")]
	#[case("multipoint (empty, (3 4))", "MultiPoint (EMPTY,(3 4))")]
	#[case("Polygon ( ( 0 0 , 1 0 , 1 1 , 0 0 ) )", "Polygon ((0 0, 1 0, 1 1, 0 0))")]
	#[case("MultiLineString Z ((0 0 1, 1 1 1), EMPTY)", "MultiLineStringZ ((0 0 1, 1 1 1),EMPTY)")]
	#[case("Point empty", "Point EMPTY")]
	#[case("LineString M EMPTY", "LineStringM EMPTY")]
	fn normalizes(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(parse_wkt(input).unwrap().to_wkt(), expected);
	}

	#[rstest]
	#[case("")]
	#[case("Polygon()")]
	#[case("LineString ()")]
	#[case("Point ()")]
	#[case("Point (1)")]
	#[case("Point (1 2 3 4 5)")]
	#[case("Point (1 2, 3 4)")]
	#[case("PointZ (1 2)")]
	#[case("PointM (1 2 3 4)")]
	#[case("LineString (1 2, 3 4 5)")]
	#[case("LineString (1 2, 3 4")]
	#[case("Point (1 2) x")]
	#[case("Point (1 2),")]
	#[case("Circle (1 2)")]
	#[case("Points (1 2)")]
	#[case("MultiPolygon ((1 2))")]
	#[case("LineString NOTEMPTY")]
	#[case("Point (1 a)")]
	fn rejects(#[case] input: &str) {
		let error = parse_wkt(input).unwrap_err();
		assert!(matches!(error, GeometryError::MalformedInput(_)), "{input}: {error}");
	}

	#[test]
	fn parsed_channels() {
		let Geometry::Point(point) = parse_wkt("PointZM (1 2 3 -4)").unwrap() else {
			panic!("expected a point");
		};
		assert_eq!((point.x(), point.y(), point.z(), point.m()), (1.0, 2.0, 3.0, -4.0));

		let Geometry::Point(point) = parse_wkt("Point M (1 2 7)").unwrap() else {
			panic!("expected a point");
		};
		assert!(point.is_measure());
		assert!(!point.is_3d());
		assert_eq!(point.m(), 7.0);
	}

	#[test]
	fn error_message_names_the_element() {
		let error = parse_wkt("Polygon ((0 0, 1 1 1))").unwrap_err().to_string();
		assert!(error.starts_with("malformed input: while parsing a polygon"), "{error}");
	}

	#[test]
	fn precision() {
		let geometry = parse_wkt("LineString (0.123456 1, 2.00001 -0.0001)").unwrap();
		let options = WktOptions { precision: Some(2) };
		assert_eq!(geometry.to_wkt_with(&options), "LineString (0.12 1, 2 0)");
	}

	#[test]
	fn empty_point_of_the_sum_type() {
		assert_eq!(Geometry::default().to_wkt(), "Point EMPTY");
		assert_eq!(PointGeometry::empty().to_wkt(), "Point EMPTY");
	}
}
