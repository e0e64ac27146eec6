// The geometry variants and the descriptors shared by all of them: the type descriptor,
// vertex addressing, coordinates and the traits that give every variant the same capability
// set (vertex addressing, editing, measures, dimension changes).

mod coordinates;
mod geometry_type;
mod linestring;
mod macros;
mod multi_linestring;
mod multi_point;
mod multi_polygon;
mod parts;
mod point;
mod polygon;
mod ring;
mod traits;
mod vertex_id;

pub use coordinates::*;
pub use geometry_type::*;
pub use linestring::*;
pub use multi_linestring::*;
pub use multi_point::*;
pub use multi_polygon::*;
pub use point::*;
pub use polygon::*;
pub use ring::*;
pub use traits::*;
pub use vertex_id::*;
pub(crate) use vertex_id::slot_index;
