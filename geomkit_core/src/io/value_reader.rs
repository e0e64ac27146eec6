// This module defines the `ValueReader` trait for reading fixed-width values from byte sources.
//
// # Overview
//
// The `ValueReader` trait provides an interface for reading integers and floating-point numbers
// with little-endian or big-endian byte order, and for managing the read position. Binary
// geometry formats declare their byte order per record, so readers are created per record with
// the matching `ByteOrder` type parameter.
//
// # Examples
//
// ```rust
// use geomkit_core::io::{ValueReader, ValueReaderSlice};
//
// fn main() -> anyhow::Result<()> {
//     let data = &[0x01, 0x02, 0x03, 0x04];
//
//     let mut reader_le = ValueReaderSlice::new_le(data);
//     assert_eq!(reader_le.read_u32()?, 0x04030201);
//
//     let mut reader_be = ValueReaderSlice::new_be(data);
//     assert_eq!(reader_be.read_u32()?, 0x01020304);
//     Ok(())
// }
// ```

use anyhow::{Result, ensure};
use byteorder::{ByteOrder, ReadBytesExt};
use std::io::{Read, Seek};

/// A simple alias for types implementing both `Seek` and `Read`, used for convenience.
pub trait SeekRead: Seek + Read {}

/// A trait for reading values from various sources with support for different byte orders.
pub trait ValueReader<'a, E: ByteOrder + 'a> {
	/// Returns the underlying reader to access raw bytes.
	fn get_reader(&mut self) -> &mut dyn SeekRead;

	/// Returns the total length of the readable data.
	fn len(&self) -> u64;

	/// Returns the current position within the readable data.
	fn position(&mut self) -> u64;

	/// Sets the current position within the readable data.
	///
	/// # Errors
	/// Returns an error if the position lies beyond the end of the data.
	fn set_position(&mut self, position: u64) -> Result<()>;

	/// Checks if there is no data to read.
	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns the number of bytes remaining to be read.
	fn remaining(&mut self) -> u64 {
		self.len().saturating_sub(self.position())
	}

	/// Checks if there are any bytes remaining to be read.
	fn has_remaining(&mut self) -> bool {
		self.remaining() > 0
	}

	/// Checks that at least `count` items of `item_size` bytes can still be read.
	///
	/// Binary formats declare element counts up front; checking them against the remaining
	/// length before allocating keeps a corrupt count from reserving gigabytes of memory.
	///
	/// # Errors
	/// Returns an error if the remaining data is too short.
	fn ensure_remaining(&mut self, count: u64, item_size: u64) -> Result<()> {
		let needed = count.saturating_mul(item_size);
		let remaining = self.remaining();
		ensure!(
			needed <= remaining,
			"{count} items of {item_size} bytes need {needed} bytes, but only {remaining} bytes remain"
		);
		Ok(())
	}

	/// Reads an unsigned 8-bit integer from the data.
	///
	/// # Errors
	/// Returns an error if reading fails.
	fn read_u8(&mut self) -> Result<u8> {
		Ok(self.get_reader().read_u8()?)
	}

	/// Reads an unsigned 32-bit integer from the data.
	///
	/// # Errors
	/// Returns an error if reading fails.
	fn read_u32(&mut self) -> Result<u32> {
		Ok(self.get_reader().read_u32::<E>()?)
	}

	/// Reads a 64-bit floating point number from the data.
	///
	/// # Errors
	/// Returns an error if reading fails.
	fn read_f64(&mut self) -> Result<f64> {
		Ok(self.get_reader().read_f64::<E>()?)
	}

	/// Reads `length` raw bytes.
	///
	/// # Errors
	/// Returns an error if fewer than `length` bytes remain.
	fn read_vec(&mut self, length: u64) -> Result<Vec<u8>> {
		self.ensure_remaining(length, 1)?;
		let mut vec = vec![0u8; length as usize];
		self.get_reader().read_exact(&mut vec)?;
		Ok(vec)
	}
}
