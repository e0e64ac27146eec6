//! Well-Known Binary.
//!
//! Every record is `[byte order: u8][type code: u32][body]`. Records of either byte order are
//! read, and the byte order may change from one part of a multi geometry to the next. Records
//! are always written little-endian with ISO type codes.
//!
//! Type codes follow ISO (`+1000` Z, `+2000` M, `+3000` ZM); the legacy 2.5D codes with the
//! high bit set are read as Z. The empty point is encoded as a point with NaN coordinates.

use super::GeometryDecode;
use crate::{Geometry, GeometryError, GeometryResult, types::*};
use anyhow::{Context, Result, anyhow, bail, ensure};
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use geomkit_core::io::{ValueReader, ValueReaderSlice, ValueWriter, ValueWriterBuffer};
use log::trace;

const SIZE_F64: u64 = 8;
const SIZE_COUNT: u64 = 4;
/// Byte order, type code and element count: the smallest possible record.
const SIZE_MIN_RECORD: u64 = 9;

/// Parses a complete WKB buffer.
///
/// # Errors
/// Fails with [`GeometryError::MalformedInput`] for empty, truncated or inconsistent data,
/// unsupported type codes or trailing bytes.
pub fn parse_wkb(data: &[u8]) -> GeometryResult<Geometry> {
	trace!("parsing {} bytes of WKB", data.len());
	read_wkb(data).map_err(|e| GeometryError::malformed(&e))
}

fn read_wkb(data: &[u8]) -> Result<Geometry> {
	let (geometry, consumed) = read_record(data)?;
	ensure!(
		consumed == data.len(),
		"unexpected {} bytes after the geometry",
		data.len() - consumed
	);
	Ok(geometry)
}

/// Reads one record from the start of `data` and returns it with the number of bytes it used.
fn read_record(data: &[u8]) -> Result<(Geometry, usize)> {
	match data.first() {
		Some(0) => read_typed::<BigEndian>(&mut ValueReaderSlice::new_be(data), data),
		Some(1) => read_typed::<LittleEndian>(&mut ValueReaderSlice::new_le(data), data),
		Some(order) => bail!("invalid byte order marker {order}"),
		None => bail!("unexpected end of data, expected a geometry record"),
	}
}

fn read_typed<'a, E: ByteOrder + 'a>(reader: &mut dyn ValueReader<'a, E>, data: &[u8]) -> Result<(Geometry, usize)> {
	reader.read_u8()?;
	let code = reader.read_u32().context("while reading the type code")?;
	let geometry_type = GeometryType::from_code(code).ok_or_else(|| anyhow!("unsupported geometry type code {code}"))?;
	let dimension = geometry_type.dimension.normalized();

	let geometry = match geometry_type.kind {
		GeometryKind::Point => {
			let coords = read_coords(reader, dimension).context("while reading a point")?;
			if coords.x().is_nan() && coords.y().is_nan() {
				Geometry::Point(PointGeometry::empty())
			} else {
				Geometry::Point(PointGeometry::from_coords(coords, dimension))
			}
		}
		GeometryKind::LineString => {
			let coords = read_sequence(reader, dimension).context("while reading a line string")?;
			Geometry::LineString(LineStringGeometry::from_coords(dimension, coords))
		}
		GeometryKind::Polygon => Geometry::Polygon(read_polygon(reader, dimension).context("while reading a polygon")?),
		GeometryKind::MultiPoint => Geometry::MultiPoint(MultiPointGeometry::from_points(
			dimension,
			read_parts(reader, data, geometry_type.kind.single(), dimension).context("while reading a multi point")?,
		)),
		GeometryKind::MultiLineString => Geometry::MultiLineString(MultiLineStringGeometry::from_lines(
			dimension,
			read_parts(reader, data, geometry_type.kind.single(), dimension).context("while reading a multi line string")?,
		)),
		GeometryKind::MultiPolygon => Geometry::MultiPolygon(MultiPolygonGeometry::from_polygons(
			dimension,
			read_parts(reader, data, geometry_type.kind.single(), dimension).context("while reading a multi polygon")?,
		)),
		GeometryKind::Unknown => bail!("unsupported geometry type code {code}"),
	};
	Ok((geometry, reader.position() as usize))
}

fn read_coords<'a, E: ByteOrder + 'a>(reader: &mut dyn ValueReader<'a, E>, dimension: Dimension) -> Result<Coordinates> {
	let mut values = [0.0; 4];
	let count = dimension.coordinate_count();
	for value in values.iter_mut().take(count) {
		*value = reader.read_f64()?;
	}
	Ok(Coordinates::from_ordinates(&values[..count], dimension))
}

fn read_count<'a, E: ByteOrder + 'a>(reader: &mut dyn ValueReader<'a, E>, item_size: u64) -> Result<usize> {
	let count = reader.read_u32().context("while reading an element count")?;
	reader.ensure_remaining(u64::from(count), item_size)?;
	Ok(count as usize)
}

fn read_sequence<'a, E: ByteOrder + 'a>(
	reader: &mut dyn ValueReader<'a, E>,
	dimension: Dimension,
) -> Result<Vec<Coordinates>> {
	let count = read_count(reader, SIZE_F64 * dimension.coordinate_count() as u64)?;
	(0..count).map(|_| read_coords(reader, dimension)).collect()
}

fn read_polygon<'a, E: ByteOrder + 'a>(reader: &mut dyn ValueReader<'a, E>, dimension: Dimension) -> Result<PolygonGeometry> {
	let count = read_count(reader, SIZE_COUNT)?;
	let mut rings = Vec::with_capacity(count);
	for index in 0..count {
		let coords = read_sequence(reader, dimension).with_context(|| format!("while reading ring {index}"))?;
		rings.push(RingGeometry(coords));
	}
	Ok(PolygonGeometry::from_rings(dimension, rings))
}

/// Reads the parts of a multi geometry. Every part is a complete record of its own and must be
/// of the single kind `kind` with the dimension of the collection; only empty points are exempt
/// from the dimension check.
///
/// The kind of a part is checked from its header before the part is read, so records nest at
/// most two levels deep.
fn read_parts<'a, E: ByteOrder + 'a, P: GeometryDecode + GeometryTrait>(
	reader: &mut dyn ValueReader<'a, E>,
	data: &[u8],
	kind: GeometryKind,
	dimension: Dimension,
) -> Result<Vec<P>> {
	let count = read_count(reader, SIZE_MIN_RECORD)?;
	let mut parts = Vec::with_capacity(count);
	for index in 0..count {
		let position = reader.position();
		let part_data = &data[position as usize..];
		let part_kind = read_kind(part_data).with_context(|| format!("while reading part {index}"))?;
		ensure!(
			part_kind == kind,
			"part {index} has the wrong type: expected {}, found {}",
			kind.name(),
			part_kind.name()
		);
		let (geometry, consumed) = read_record(part_data).with_context(|| format!("while reading part {index}"))?;
		let part = P::from_geometry(geometry).with_context(|| format!("part {index} has the wrong type"))?;
		let part_type = part.geometry_type();
		if !part_type.is_unknown() && part_type.dimension != dimension {
			bail!(
				"part {index} is {part_type}, but the collection has dimension {}",
				dimension.wkt_suffix()
			);
		}
		reader.set_position(position + consumed as u64)?;
		parts.push(part);
	}
	Ok(parts)
}

/// The kind named by the header of the record at the start of `data`.
fn read_kind(data: &[u8]) -> Result<GeometryKind> {
	let code = match data.first() {
		Some(0) => ValueReaderSlice::new_be(&data[1..]).read_u32(),
		Some(1) => ValueReaderSlice::new_le(&data[1..]).read_u32(),
		Some(order) => bail!("invalid byte order marker {order}"),
		None => bail!("unexpected end of data, expected a geometry record"),
	}
	.context("while reading the type code")?;
	GeometryType::from_code(code)
		.map(|geometry_type| geometry_type.kind)
		.ok_or_else(|| anyhow!("unsupported geometry type code {code}"))
}

/// Writes a complete little-endian record.
pub(crate) trait WkbRecord {
	fn write_record(&self, writer: &mut dyn ValueWriter<LittleEndian>) -> Result<()>;
}

/// Encodes `geometry` as little-endian WKB.
pub(crate) fn write_wkb<G: WkbRecord>(geometry: &G) -> GeometryResult<Vec<u8>> {
	let mut writer = ValueWriterBuffer::new_le();
	geometry
		.write_record(&mut writer)
		.map_err(|e| GeometryError::failed(format!("{e:#}")))?;
	Ok(writer.into_bytes())
}

fn write_header(writer: &mut dyn ValueWriter<LittleEndian>, geometry_type: GeometryType) -> Result<()> {
	writer.write_u8(1)?;
	writer.write_u32(geometry_type.code())
}

fn write_count(writer: &mut dyn ValueWriter<LittleEndian>, count: usize) -> Result<()> {
	let count = u32::try_from(count).map_err(|_| anyhow!("{count} elements exceed the WKB limit"))?;
	writer.write_u32(count)
}

fn write_sequence(writer: &mut dyn ValueWriter<LittleEndian>, coords: &[Coordinates], dimension: Dimension) -> Result<()> {
	write_count(writer, coords.len())?;
	for c in coords {
		for value in c.ordinates(dimension) {
			writer.write_f64(value)?;
		}
	}
	Ok(())
}

impl WkbRecord for PointGeometry {
	fn write_record(&self, writer: &mut dyn ValueWriter<LittleEndian>) -> Result<()> {
		if let Some(coords) = self.coords().next() {
			write_header(writer, self.geometry_type())?;
			for value in coords.ordinates(self.dimension()) {
				writer.write_f64(value)?;
			}
		} else {
			write_header(writer, GeometryType::new(GeometryKind::Point, Dimension::Xy))?;
			writer.write_f64(f64::NAN)?;
			writer.write_f64(f64::NAN)?;
		}
		Ok(())
	}
}

impl WkbRecord for LineStringGeometry {
	fn write_record(&self, writer: &mut dyn ValueWriter<LittleEndian>) -> Result<()> {
		write_header(writer, self.geometry_type())?;
		write_sequence(writer, self.as_coords(), self.dimension())
	}
}

impl WkbRecord for PolygonGeometry {
	fn write_record(&self, writer: &mut dyn ValueWriter<LittleEndian>) -> Result<()> {
		write_header(writer, self.geometry_type())?;
		write_count(writer, self.len())?;
		for ring in self.as_vec() {
			write_sequence(writer, &ring.0, self.dimension())?;
		}
		Ok(())
	}
}

fn write_multi<P: WkbRecord>(
	writer: &mut dyn ValueWriter<LittleEndian>,
	geometry_type: GeometryType,
	parts: &[P],
) -> Result<()> {
	write_header(writer, geometry_type)?;
	write_count(writer, parts.len())?;
	for part in parts {
		part.write_record(writer)?;
	}
	Ok(())
}

impl WkbRecord for MultiPointGeometry {
	fn write_record(&self, writer: &mut dyn ValueWriter<LittleEndian>) -> Result<()> {
		write_multi(writer, self.geometry_type(), self.as_vec())
	}
}

impl WkbRecord for MultiLineStringGeometry {
	fn write_record(&self, writer: &mut dyn ValueWriter<LittleEndian>) -> Result<()> {
		write_multi(writer, self.geometry_type(), self.as_vec())
	}
}

impl WkbRecord for MultiPolygonGeometry {
	fn write_record(&self, writer: &mut dyn ValueWriter<LittleEndian>) -> Result<()> {
		write_multi(writer, self.geometry_type(), self.as_vec())
	}
}

impl WkbRecord for Geometry {
	fn write_record(&self, writer: &mut dyn ValueWriter<LittleEndian>) -> Result<()> {
		match self {
			Geometry::Point(g) => g.write_record(writer),
			Geometry::LineString(g) => g.write_record(writer),
			Geometry::Polygon(g) => g.write_record(writer),
			Geometry::MultiPoint(g) => g.write_record(writer),
			Geometry::MultiLineString(g) => g.write_record(writer),
			Geometry::MultiPolygon(g) => g.write_record(writer),
		}
	}
}
