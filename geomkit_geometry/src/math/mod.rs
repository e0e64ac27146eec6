//! Planar measurement helpers over raw coordinate sequences.

mod area;
mod segment;

pub use area::*;
pub use segment::*;
