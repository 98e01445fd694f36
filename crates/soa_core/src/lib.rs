//! # SoA Core
//!
//! Growable structure-of-arrays container for tuple-shaped rows:
//! - One contiguous column per field, grown in lockstep
//! - Rows reassembled on demand as tuples of references
//! - Column views that iterate only the fields they name
//!
//! ## Layout Rules
//!
//! 1. **All columns share one capacity** - Growth doubles every column at once
//! 2. **Order is stable** - Erase shifts later rows forward instead of swapping
//! 3. **Borrows guard layout** - Projections and views hold the container
//!    borrowed, so growth and erase cannot run under them
//!
//! ## Example
//!
//! ```rust,ignore
//! use soa_core::{MultiArray, F0, F2};
//!
//! let mut bodies: MultiArray<(i32, f64, f32)> = MultiArray::new();
//! bodies.push((1, 0.5, 10.0));
//!
//! for (id, mass) in bodies.view_mut::<(F0, F2)>() {
//!     *mass += *id as f32;
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod iter;
mod multi_array;
pub mod projection;
pub mod store;

pub use config::ArrayConfig;
pub use error::{MultiArrayError, MultiArrayResult};
pub use iter::{Cursor, Iter, IterMut, View, ViewMut};
pub use multi_array::MultiArray;
pub use projection::{
    Field, Row, RowMut, Selection, F0, F1, F10, F11, F2, F3, F4, F5, F6, F7, F8, F9,
};
pub use store::{Column, Schema};
