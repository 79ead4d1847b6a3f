//! Run-off data model: triangles of observed claims and squares of projected claims

mod convert;
pub mod format;
mod slice;
mod square;
mod triangle;

pub use slice::{Sliceable, SliceableMut};
pub use square::Square;
pub use triangle::{Triangle, TriangleKind};
