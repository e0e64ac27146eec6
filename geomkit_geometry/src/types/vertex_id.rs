use std::fmt::{self, Display};

/// Structural address of a vertex: part, ring and vertex index.
///
/// `-1` in any slot addresses "the geometry as a whole" at that level; the default value
/// `(-1, -1, -1)` is the cursor positioned before the first vertex. Ordering is lexicographic
/// over (part, ring, vertex), which is the order in which vertices are visited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId {
	pub part: i32,
	pub ring: i32,
	pub vertex: i32,
}

impl VertexId {
	#[must_use]
	pub fn new(part: i32, ring: i32, vertex: i32) -> Self {
		Self { part, ring, vertex }
	}

	/// True if every slot holds a concrete index.
	pub fn is_concrete(&self) -> bool {
		self.part >= 0 && self.ring >= 0 && self.vertex >= 0
	}

	/// The same address with the part index replaced.
	#[must_use]
	pub fn with_part(self, part: usize) -> Self {
		Self::new(part as i32, self.ring, self.vertex)
	}

	/// The same address with the ring index replaced.
	#[must_use]
	pub fn with_ring(self, ring: usize) -> Self {
		Self::new(self.part, ring as i32, self.vertex)
	}
}

impl Default for VertexId {
	fn default() -> Self {
		Self::new(-1, -1, -1)
	}
}

impl Display for VertexId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({}, {}, {})", self.part, self.ring, self.vertex)
	}
}

/// Converts an address slot into an index for a level that has `count` entries.
///
/// A slot of `-1` is accepted only when the level has exactly one entry.
pub(crate) fn slot_index(slot: i32, count: usize) -> Option<usize> {
	if slot == -1 && count == 1 {
		return Some(0);
	}
	let index = usize::try_from(slot).ok()?;
	(index < count).then_some(index)
}
