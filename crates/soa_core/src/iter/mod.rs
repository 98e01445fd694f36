//! # Iteration & Deletion Protocol
//!
//! - [`View`] / [`ViewMut`] iterate a selection of columns row by row
//! - [`Iter`] / [`IterMut`] are the full-row views
//! - [`Cursor`] is the non-borrowing row position used by `erase`

mod cursor;
mod view;

pub use cursor::Cursor;
pub use view::{Iter, IterMut, View, ViewMut};
