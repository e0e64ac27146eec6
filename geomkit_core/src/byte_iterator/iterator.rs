//! A byte-level iterator over an in-memory buffer with optional debug support.
//!
//! The `ByteIterator` struct walks over a byte slice, supports peeking at the next byte without
//! consuming it, advancing, and consuming bytes one by one. When debug mode is enabled, error
//! messages include a snapshot of the bytes read just before the failure.

use anyhow::{Error, Result, anyhow};

const DEBUG_SNAPSHOT_SIZE: usize = 16;

/// An iterator over the bytes of a buffer with support for peeking, consuming, and error reporting.
///
/// # Fields
///
/// * `data` - The underlying buffer.
/// * `position` - Index of the byte returned by the next call to [`ByteIterator::peek`].
/// * `is_debug_enabled` - Flag indicating whether error messages include a snapshot of recent bytes.
pub struct ByteIterator<'a> {
	data: &'a [u8],
	position: usize,
	is_debug_enabled: bool,
}

impl<'a> ByteIterator<'a> {
	/// Creates a new `ByteIterator` over a byte slice.
	///
	/// # Arguments
	///
	/// * `data` - The bytes to iterate over.
	/// * `debug` - Enables snapshots of recently read bytes in error messages.
	#[must_use]
	pub fn from_slice(data: &'a [u8], debug: bool) -> Self {
		ByteIterator {
			data,
			position: 0,
			is_debug_enabled: debug,
		}
	}

	/// Creates a new `ByteIterator` over the UTF-8 bytes of a string.
	#[must_use]
	pub fn from_text(text: &'a str, debug: bool) -> Self {
		Self::from_slice(text.as_bytes(), debug)
	}

	/// Formats an error message including the current byte position and optionally a debug snapshot of recent bytes.
	///
	/// # Arguments
	///
	/// * `msg` - The error message to include.
	///
	/// # Returns
	///
	/// An `anyhow::Error` containing the formatted error message.
	#[must_use]
	pub fn format_error(&self, msg: &str) -> Error {
		if self.is_debug_enabled {
			let end = self.position.min(self.data.len());
			let start = end.saturating_sub(DEBUG_SNAPSHOT_SIZE);
			let mut debug_output = String::from_utf8_lossy(&self.data[start..end]).into_owned();
			if self.peek().is_none() {
				debug_output.push_str("<EOF>");
			}
			anyhow!("{msg} at position {}: {}", self.position, debug_output)
		} else {
			anyhow!("{msg} at position {}", self.position)
		}
	}

	/// Returns the current absolute position in the buffer.
	#[inline]
	#[must_use]
	pub fn position(&self) -> usize {
		self.position
	}

	/// Peeks at the next byte without consuming it.
	///
	/// # Returns
	///
	/// An `Option<u8>` containing the next byte if available, or `None` at the end of the buffer.
	#[inline]
	#[must_use]
	pub fn peek(&self) -> Option<u8> {
		self.data.get(self.position).copied()
	}

	/// Advances the iterator by one byte. Advancing past the end has no effect.
	#[inline]
	pub fn advance(&mut self) {
		if self.position < self.data.len() {
			self.position += 1;
		}
	}

	/// Consumes and returns the current peeked byte, advancing the iterator.
	#[inline]
	pub fn consume(&mut self) -> Option<u8> {
		let current_byte = self.peek();
		self.advance();
		current_byte
	}

	/// Expects and returns the next byte, advancing the iterator.
	///
	/// # Errors
	///
	/// Returns an error if the end of the buffer is reached unexpectedly.
	#[inline]
	pub fn expect_next_byte(&mut self) -> Result<u8> {
		self.consume().ok_or_else(|| self.format_error("unexpected end"))
	}

	/// Skips over any ASCII whitespace bytes, advancing the iterator until a non-whitespace byte or end is reached.
	pub fn skip_whitespace(&mut self) {
		while let Some(byte) = self.peek() {
			if !byte.is_ascii_whitespace() {
				break;
			}
			self.advance();
		}
	}

	/// Returns `true` once every byte has been consumed.
	#[must_use]
	pub fn is_exhausted(&self) -> bool {
		self.position >= self.data.len()
	}
}
