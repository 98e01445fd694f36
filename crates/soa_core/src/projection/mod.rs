//! # Row Projection Layer
//!
//! Builds tuples of references into the columns without copying a row.
//!
//! - [`Field`] markers `F0`..`F11` name one column by position
//! - [`Selection`] tuples of markers pick the columns a projection covers

mod field;
mod selection;

pub(crate) use field::impl_field;
pub use field::{Field, F0, F1, F10, F11, F2, F3, F4, F5, F6, F7, F8, F9};
pub use selection::{Row, RowMut, Selection};
