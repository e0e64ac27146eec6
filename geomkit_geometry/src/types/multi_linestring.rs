use super::{
	ClosestSegment, CompositeGeometryTrait, Coordinates, Dimension, GeometryKind, GeometryTrait, GeometryType,
	LineStringGeometry, PointGeometry, VertexId, parts,
};
use crate::{GeometryError, GeometryResult};
use std::fmt::Debug;

/// An ordered collection of line strings sharing one dimension.
#[derive(Clone, Default, PartialEq)]
pub struct MultiLineStringGeometry {
	dimension: Dimension,
	lines: Vec<LineStringGeometry>,
}

impl MultiLineStringGeometry {
	/// Constructs a collection of the given dimension; every line is converted to it.
	#[must_use]
	pub fn from_lines(dimension: Dimension, lines: Vec<LineStringGeometry>) -> Self {
		let mut multi = Self::empty(dimension);
		for line in lines {
			multi.push(line);
		}
		multi
	}

	#[must_use]
	pub fn empty(dimension: Dimension) -> Self {
		Self {
			dimension: dimension.normalized(),
			lines: Vec::new(),
		}
	}

	pub(crate) fn lines_mut(&mut self) -> &mut Vec<LineStringGeometry> {
		&mut self.lines
	}
}

impl GeometryTrait for MultiLineStringGeometry {
	fn geometry_type(&self) -> GeometryType {
		GeometryType::new(GeometryKind::MultiLineString, self.dimension)
	}

	fn part_count(&self) -> usize {
		self.lines.len()
	}

	fn ring_count(&self, part: usize) -> usize {
		usize::from(part < self.lines.len())
	}

	fn vertex_count(&self, part: usize, ring: usize) -> usize {
		match self.lines.get(part) {
			Some(line) if ring == 0 => line.vertex_count(0, 0),
			_ => 0,
		}
	}

	fn coords(&self) -> Box<dyn Iterator<Item = &Coordinates> + '_> {
		Box::new(self.lines.iter().flat_map(|line| line.coords()))
	}

	fn coords_mut(&mut self) -> Box<dyn Iterator<Item = &mut Coordinates> + '_> {
		Box::new(self.lines.iter_mut().flat_map(|line| line.coords_mut()))
	}

	fn set_dimension(&mut self, dimension: Dimension) {
		self.dimension = dimension.normalized();
		for line in &mut self.lines {
			line.set_dimension(dimension);
		}
	}

	fn vertex_at(&self, id: VertexId) -> GeometryResult<PointGeometry> {
		let (part, inner) = parts::locate_part(id, self.lines.len()).ok_or(GeometryError::InvalidAddress(id))?;
		self.lines[part].vertex_at(inner).map_err(|_| GeometryError::InvalidAddress(id))
	}

	fn insert_vertex(&mut self, id: VertexId, vertex: &PointGeometry) -> bool {
		let Some((part, inner)) = parts::locate_part(id, self.lines.len()) else {
			return false;
		};
		self.lines[part].insert_vertex(inner, vertex)
	}

	fn move_vertex(&mut self, id: VertexId, vertex: &PointGeometry) -> bool {
		let Some((part, inner)) = parts::locate_part(id, self.lines.len()) else {
			return false;
		};
		self.lines[part].move_vertex(inner, vertex)
	}

	/// Deletes a vertex; a line that becomes empty is removed from the collection.
	fn delete_vertex(&mut self, id: VertexId) -> bool {
		let Some((part, inner)) = parts::locate_part(id, self.lines.len()) else {
			return false;
		};
		if !self.lines[part].delete_vertex(inner) {
			return false;
		}
		if self.lines[part].is_empty() {
			self.lines.remove(part);
		}
		true
	}

	fn closest_segment(&self, point: &PointGeometry, epsilon: f64) -> Option<ClosestSegment> {
		parts::closest_in_parts(&self.lines, point, epsilon)
	}

	fn length(&self) -> f64 {
		self.lines.iter().map(|line| line.length()).sum()
	}
}

impl CompositeGeometryTrait<LineStringGeometry> for MultiLineStringGeometry {
	fn new() -> Self {
		Self::empty(Dimension::Xy)
	}

	fn as_vec(&self) -> &Vec<LineStringGeometry> {
		&self.lines
	}

	fn into_inner(self) -> Vec<LineStringGeometry> {
		self.lines
	}

	fn push(&mut self, mut item: LineStringGeometry) {
		item.set_dimension(self.dimension);
		self.lines.push(item);
	}
}

impl Debug for MultiLineStringGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.lines).finish()
	}
}

crate::impl_from_array!(MultiLineStringGeometry, LineStringGeometry);
