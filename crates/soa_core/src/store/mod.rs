//! # Column Store
//!
//! Owns one dense column per declared field type and applies every
//! structural change to all of them at once.
//!
//! ## Design Philosophy
//!
//! - Columns are allocated together, grown together and dropped together
//! - Slots past the logical length hold default values, never stale data
//! - No column-level operation is reachable from outside the container

mod column;
mod schema;

pub use column::Column;
pub use schema::Schema;
