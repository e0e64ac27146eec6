//! Byte-level building blocks shared by the geomkit crates.
//!
//! - [`byte_iterator`] walks over in-memory text one byte at a time and is used to parse textual
//!   geometry formats.
//! - [`io`] reads and writes fixed-width values in either byte order and is used by the binary
//!   geometry formats.

pub mod byte_iterator;
pub mod io;
