//! Vector geometry model for points, lines and polygons with optional Z and M channels.
//!
//! The crate is organised bottom-up:
//! - [`types`] holds the type descriptor, vertex addressing and the six geometry variants
//! - [`Geometry`] is the tagged sum over those variants
//! - [`codec`] converts geometries to and from WKT, WKB, GeoJSON and flat point lists
//! - [`algorithm`] contains affine transforms, reprojection, smoothing and sequence comparison
//! - [`engine`] defines the topology engine seam and a `geo` backed implementation
//! - [`GeometryHandle`] is the copy-on-write facade tying everything together
//!
//! # Example
//! ```
//! use geomkit_geometry::{GeometryHandle, GeometryTransform};
//!
//! let mut handle = GeometryHandle::from_wkt("LineString (0 0, 10 0, 10 10)").unwrap();
//! handle.translate(10.0, -5.0);
//! assert_eq!(handle.to_wkt().unwrap(), "LineString (10 -5, 20 -5, 20 5)");
//! ```

pub mod algorithm;
pub mod codec;
mod config;
pub mod engine;
mod error;
mod geometry;
mod handle;
pub mod math;
pub mod types;

pub use algorithm::*;
pub use codec::*;
pub use config::*;
pub use error::*;
pub use geometry::*;
pub use handle::*;
pub use types::*;
