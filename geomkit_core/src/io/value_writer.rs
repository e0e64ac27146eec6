//! This module defines the `ValueWriter` trait for writing fixed-width values to byte sinks.
//!
//! # Examples
//!
//! ```rust
//! use geomkit_core::io::{ValueWriter, ValueWriterBuffer};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let mut writer = ValueWriterBuffer::new_le();
//!     writer.write_u8(1)?;
//!     writer.write_u32(1)?;
//!     assert_eq!(writer.into_bytes(), vec![1, 1, 0, 0, 0]);
//!     Ok(())
//! }
//! ```

use anyhow::Result;
use byteorder::{ByteOrder, WriteBytesExt};
use std::io::Write;

/// A trait for writing values to various destinations with support for different byte orders.
pub trait ValueWriter<E: ByteOrder> {
	/// Returns a mutable reference to the underlying writer.
	fn get_writer(&mut self) -> &mut dyn Write;

	/// Returns the current write position.
	///
	/// # Errors
	///
	/// Returns an error if the position cannot be determined.
	fn position(&mut self) -> Result<u64>;

	/// Returns `true` if nothing has been written yet.
	///
	/// # Errors
	///
	/// Returns an error if the position cannot be determined.
	fn is_empty(&mut self) -> Result<bool> {
		Ok(self.position()? == 0)
	}

	/// Writes an 8-bit unsigned integer to the writer.
	///
	/// # Errors
	///
	/// Returns an error if writing to the underlying writer fails.
	fn write_u8(&mut self, value: u8) -> Result<()> {
		Ok(self.get_writer().write_u8(value)?)
	}

	/// Writes a 32-bit unsigned integer using the specified byte order.
	///
	/// # Errors
	///
	/// Returns an error if writing to the underlying writer fails.
	fn write_u32(&mut self, value: u32) -> Result<()> {
		Ok(self.get_writer().write_u32::<E>(value)?)
	}

	/// Writes a 64-bit floating-point value using the specified byte order.
	///
	/// # Errors
	///
	/// Returns an error if writing to the underlying writer fails.
	fn write_f64(&mut self, value: f64) -> Result<()> {
		Ok(self.get_writer().write_f64::<E>(value)?)
	}

	/// Writes a slice of bytes to the writer.
	///
	/// # Errors
	///
	/// Returns an error if writing to the underlying writer fails.
	fn write_slice(&mut self, buf: &[u8]) -> Result<()> {
		self.get_writer().write_all(buf)?;
		Ok(())
	}
}
