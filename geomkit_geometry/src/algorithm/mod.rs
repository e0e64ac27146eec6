//! Algorithms that rewrite vertices in place or compare vertex lists: affine transforms,
//! reprojection, corner-cutting smoothing and exact polyline comparison.

mod affine;
mod compare;
mod reproject;
mod smooth;

pub use affine::*;
pub use compare::*;
pub use reproject::*;
pub use smooth::*;
