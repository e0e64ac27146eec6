//! This module re-exports the value reader and writer modules.
//!
//! # Overview
//!
//! The value readers and writers read and write fixed-width integers and floating point numbers
//! in a byte order chosen at compile time through the `byteorder` crate. Binary geometry codecs
//! pick the byte order at runtime from a marker byte and dispatch to the matching reader.

mod value_reader;
mod value_reader_slice;
mod value_writer;
mod value_writer_buffer;

pub use value_reader::*;
pub use value_reader_slice::*;
pub use value_writer::*;
pub use value_writer_buffer::*;
