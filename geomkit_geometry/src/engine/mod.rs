//! The seam to a topology engine.
//!
//! Predicates and set operations are not computed by the vertex model itself. They are
//! requested from a [`TopologyEngine`], which a [`GeometryHandle`](crate::GeometryHandle)
//! receives as a trait object. [`GeoEngine`] is the implementation built on the `geo` crate.

mod geo_engine;

pub use geo_engine::GeoEngine;

use crate::{BufferParameters, Geometry, GeometryResult, PointGeometry};

/// Topological predicates and set operations on non-empty geometries.
///
/// Every method may decline its input; failures are reported as
/// [`GeometryError::OperationFailed`](crate::GeometryError::OperationFailed).
pub trait TopologyEngine {
	fn intersects(&self, a: &Geometry, b: &Geometry) -> GeometryResult<bool>;

	fn intersection(&self, a: &Geometry, b: &Geometry) -> GeometryResult<Geometry>;

	fn union(&self, a: &Geometry, b: &Geometry) -> GeometryResult<Geometry>;

	/// The part of `a` not covered by `b`.
	fn difference(&self, a: &Geometry, b: &Geometry) -> GeometryResult<Geometry>;

	fn buffer(&self, geometry: &Geometry, parameters: &BufferParameters) -> GeometryResult<Geometry>;

	fn centroid(&self, geometry: &Geometry) -> GeometryResult<PointGeometry>;
}
