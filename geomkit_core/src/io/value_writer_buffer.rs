//! This module provides the `ValueWriterBuffer` struct for writing values to an in-memory buffer.

use super::ValueWriter;
use anyhow::Result;
use byteorder::{ByteOrder, LittleEndian};
use std::io::{Cursor, Write};
use std::marker::PhantomData;

/// A struct that provides writing capabilities to an in-memory buffer using a specified byte order.
pub struct ValueWriterBuffer<E: ByteOrder> {
	_phantom: PhantomData<E>,
	cursor: Cursor<Vec<u8>>,
}

impl<E: ByteOrder> ValueWriterBuffer<E> {
	/// Creates a new, empty `ValueWriterBuffer`.
	#[must_use]
	pub fn new() -> ValueWriterBuffer<E> {
		ValueWriterBuffer {
			_phantom: PhantomData,
			cursor: Cursor::new(Vec::new()),
		}
	}

	/// Consumes the writer and returns the written bytes.
	#[must_use]
	pub fn into_bytes(self) -> Vec<u8> {
		self.cursor.into_inner()
	}
}

impl ValueWriterBuffer<LittleEndian> {
	/// Creates a new `ValueWriterBuffer` with little-endian byte order.
	#[must_use]
	pub fn new_le() -> ValueWriterBuffer<LittleEndian> {
		ValueWriterBuffer::new()
	}
}

impl<E: ByteOrder> ValueWriter<E> for ValueWriterBuffer<E> {
	fn get_writer(&mut self) -> &mut dyn Write {
		&mut self.cursor
	}

	fn position(&mut self) -> Result<u64> {
		Ok(self.cursor.position())
	}
}

impl<E: ByteOrder> Default for ValueWriterBuffer<E> {
	fn default() -> Self {
		Self::new()
	}
}
