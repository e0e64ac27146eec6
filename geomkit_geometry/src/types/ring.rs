use super::{CompositeGeometryTrait, Coordinates, Dimension, PointGeometry, point::assign_coordinates};
use crate::math::{area_ring, length_sequence};
use std::fmt::Debug;

/// A boundary ring of a polygon.
///
/// The ring is stored exactly as supplied; a ring whose first and last vertex coincide is
/// closed, and vertex edits keep a closed ring closed. Its dimension is the one of the owning
/// polygon.
#[derive(Clone, Default, PartialEq)]
pub struct RingGeometry(pub Vec<Coordinates>);

impl RingGeometry {
	/// True if the ring has at least two vertices and its first and last vertex are equal.
	pub fn is_closed(&self) -> bool {
		self.0.len() >= 2 && self.0.first() == self.0.last()
	}

	/// Signed shoelace area, positive for counter-clockwise rings.
	pub fn signed_area(&self) -> f64 {
		area_ring(&self.0)
	}

	pub fn length(&self) -> f64 {
		length_sequence(&self.0)
	}

	/// Inserts `vertex` before index `index`. Inserting at 0 into a closed ring also moves
	/// the closing vertex, so the new vertex sits between the last and the first edge.
	/// Appending to a closed ring inserts before the closing vertex.
	pub(crate) fn insert_vertex(&mut self, index: i32, vertex: Coordinates) -> bool {
		let Ok(mut index) = usize::try_from(index) else {
			return false;
		};
		if index > self.0.len() {
			return false;
		}
		let closed = self.is_closed();
		if closed && index == self.0.len() {
			index -= 1;
		}
		self.0.insert(index, vertex);
		if closed && index == 0 {
			if let Some(last) = self.0.last_mut() {
				*last = vertex;
			}
		}
		true
	}

	/// Moves the vertex at `index`; moving either end of a closed ring moves both ends.
	pub(crate) fn move_vertex(&mut self, index: i32, vertex: &PointGeometry, dimension: Dimension) -> bool {
		let Some(index) = self.index(index) else {
			return false;
		};
		let last = self.0.len() - 1;
		let closed = self.is_closed();
		assign_coordinates(&mut self.0[index], dimension, vertex);
		if closed && (index == 0 || index == last) {
			let moved = self.0[index];
			self.0[0] = moved;
			self.0[last] = moved;
		}
		true
	}

	/// Deletes the vertex at `index`, re-closing a closed ring if one of its ends was removed.
	pub(crate) fn delete_vertex(&mut self, index: i32) -> bool {
		let Some(index) = self.index(index) else {
			return false;
		};
		let last = self.0.len() - 1;
		if self.is_closed() && (index == 0 || index == last) {
			self.0.remove(last);
			self.0.remove(0);
			if let Some(first) = self.0.first().copied() {
				self.0.push(first);
			}
		} else {
			self.0.remove(index);
		}
		true
	}

	/// A closed ring with this few vertices degenerates when one of them is deleted.
	pub(crate) fn is_minimal(&self) -> bool {
		self.0.len() <= 4
	}

	fn index(&self, index: i32) -> Option<usize> {
		usize::try_from(index).ok().filter(|index| *index < self.0.len())
	}
}

impl CompositeGeometryTrait<Coordinates> for RingGeometry {
	fn new() -> Self {
		Self(Vec::new())
	}

	fn as_vec(&self) -> &Vec<Coordinates> {
		&self.0
	}

	fn into_inner(self) -> Vec<Coordinates> {
		self.0
	}

	fn push(&mut self, item: Coordinates) {
		self.0.push(item);
	}
}

impl Debug for RingGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_array!(RingGeometry, Coordinates);

impl From<&geo::LineString<f64>> for RingGeometry {
	fn from(geometry: &geo::LineString<f64>) -> Self {
		RingGeometry(geometry.coords().map(|c| Coordinates::from(*c)).collect())
	}
}
