//! # Multi-Array Error Types
//!
//! Failures that the container reports instead of corrupting its state.

use thiserror::Error;

/// Errors that can occur while building or mutating a multi-array.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MultiArrayError {
    /// A container was requested with zero capacity.
    #[error("capacity must be greater than zero")]
    ZeroCapacity,

    /// The allocator could not provide a column.
    #[error("allocation failed: {capacity} slots of {element_size} bytes")]
    AllocationFailed {
        /// Number of slots requested.
        capacity: usize,
        /// Size of one slot in bytes.
        element_size: usize,
    },

    /// Doubling the capacity would overflow `usize`.
    #[error("capacity overflow while growing from {capacity}")]
    CapacityOverflow {
        /// Capacity before the failed growth.
        capacity: usize,
    },

    /// A row position was not below the container's length.
    #[error("index out of bounds: index {index}, len {len}")]
    IndexOutOfBounds {
        /// The offending position.
        index: usize,
        /// Length of the container at the time.
        len: usize,
    },

    /// Invalid configuration text or values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for multi-array operations.
pub type MultiArrayResult<T> = Result<T, MultiArrayError>;
