//! This module provides utilities for byte-level iteration over in-memory text.
//! It re-exports the `basics` and `iterator` modules for use in parsing textual formats.

mod basics;
mod iterator;

pub use basics::*;
pub use iterator::*;
