//! This module provides the `ValueReaderSlice` struct for reading values from a byte slice.
//!
//! # Examples
//!
//! ```rust
//! use geomkit_core::io::{ValueReader, ValueReaderSlice};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let data = &[0x01, 0x02, 0x03, 0x04];
//!
//!     let mut reader_le = ValueReaderSlice::new_le(data);
//!     assert_eq!(reader_le.read_u8()?, 0x01);
//!     assert_eq!(reader_le.remaining(), 3);
//!
//!     Ok(())
//! }
//! ```

use super::{SeekRead, ValueReader};
use anyhow::{Result, bail};
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use std::{io::Cursor, marker::PhantomData};

/// A struct that provides reading capabilities from a byte slice using a specified byte order.
pub struct ValueReaderSlice<'a, E: ByteOrder> {
	_phantom: PhantomData<E>,
	cursor: Cursor<&'a [u8]>,
	len: u64,
}

impl<'a, E: ByteOrder> ValueReaderSlice<'a, E> {
	/// Creates a new `ValueReaderSlice` from a byte slice.
	#[must_use]
	pub fn new(slice: &'a [u8]) -> ValueReaderSlice<'a, E> {
		ValueReaderSlice {
			_phantom: PhantomData,
			len: slice.len() as u64,
			cursor: Cursor::new(slice),
		}
	}
}

impl<'a> ValueReaderSlice<'a, LittleEndian> {
	/// Creates a new `ValueReaderSlice` with little-endian byte order.
	#[must_use]
	pub fn new_le(slice: &'a [u8]) -> ValueReaderSlice<'a, LittleEndian> {
		ValueReaderSlice::new(slice)
	}
}

impl<'a> ValueReaderSlice<'a, BigEndian> {
	/// Creates a new `ValueReaderSlice` with big-endian byte order.
	#[must_use]
	pub fn new_be(slice: &'a [u8]) -> ValueReaderSlice<'a, BigEndian> {
		ValueReaderSlice::new(slice)
	}
}

impl SeekRead for Cursor<&[u8]> {}

impl<'a, E: ByteOrder + 'a> ValueReader<'a, E> for ValueReaderSlice<'a, E> {
	fn get_reader(&mut self) -> &mut dyn SeekRead {
		&mut self.cursor
	}

	fn len(&self) -> u64 {
		self.len
	}

	fn position(&mut self) -> u64 {
		self.cursor.position()
	}

	fn set_position(&mut self, position: u64) -> Result<()> {
		if position > self.len {
			bail!("set position outside length")
		}
		self.cursor.set_position(position);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn len() {
		let reader = ValueReaderSlice::new_le(&[0x80; 42]);
		assert_eq!(reader.len(), 42);
		assert!(!reader.is_empty());
		assert!(ValueReaderSlice::new_le(&[]).is_empty());
	}

	#[test]
	fn read_u8() -> Result<()> {
		let mut reader = ValueReaderSlice::new_le(&[0x01, 0x02]);
		assert_eq!(reader.read_u8()?, 0x01);
		assert_eq!(reader.read_u8()?, 0x02);
		assert!(reader.read_u8().is_err());
		Ok(())
	}

	#[test]
	fn read_u32_both_orders() -> Result<()> {
		let blob = [0xE9, 0x03, 0x00, 0x00];
		assert_eq!(ValueReaderSlice::new_le(&blob).read_u32()?, 1001);
		let blob = [0x00, 0x00, 0x03, 0xE9];
		assert_eq!(ValueReaderSlice::new_be(&blob).read_u32()?, 1001);
		Ok(())
	}

	#[test]
	fn read_f64_both_orders() -> Result<()> {
		let le = 2.5f64.to_le_bytes();
		let be = 2.5f64.to_be_bytes();
		assert_eq!(ValueReaderSlice::new_le(&le).read_f64()?, 2.5);
		assert_eq!(ValueReaderSlice::new_be(&be).read_f64()?, 2.5);
		Ok(())
	}

	#[test]
	fn truncated_f64_fails() {
		let mut reader = ValueReaderSlice::new_le(&[0x00, 0x00, 0x00]);
		assert!(reader.read_f64().is_err());
	}

	#[test]
	fn set_and_get_position() -> Result<()> {
		let mut reader = ValueReaderSlice::new_le(&[0x01, 0x02, 0x03, 0x04]);
		reader.set_position(2)?;
		assert_eq!(reader.position(), 2);
		assert_eq!(reader.remaining(), 2);
		assert_eq!(reader.read_u8()?, 0x03);
		reader.set_position(4)?;
		assert!(!reader.has_remaining());
		assert!(reader.set_position(5).is_err());
		Ok(())
	}

	#[test]
	fn ensure_remaining() -> Result<()> {
		let mut reader = ValueReaderSlice::new_le(&[0u8; 16]);
		reader.ensure_remaining(2, 8)?;
		assert!(reader.ensure_remaining(3, 8).is_err());
		assert!(reader.ensure_remaining(u64::MAX, 16).is_err());
		Ok(())
	}

	#[test]
	fn read_vec() -> Result<()> {
		let mut reader = ValueReaderSlice::new_le(&[1, 2, 3, 4, 5]);
		reader.read_u8()?;
		assert_eq!(reader.read_vec(3)?, vec![2, 3, 4]);
		assert!(reader.read_vec(2).is_err());
		Ok(())
	}
}
