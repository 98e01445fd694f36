//! # Row Cursors
//!
//! A cursor is a row position that does not borrow the container. It is what
//! `begin()`, `end()` and `erase()` trade in, and it supports the usual
//! random-access arithmetic: stepping by offsets, signed distance and
//! ordering by position.

use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Position of a logical row.
///
/// Cursors stay valid across mutations in the sense that they keep naming
/// the same index; after an `erase` the index names whichever row slid into
/// place.
///
/// # Example
///
/// ```rust,ignore
/// let mut cursor = array.begin();
/// while cursor < array.end() {
///     cursor = if should_drop(array.row_at(cursor)) {
///         array.erase(cursor)
///     } else {
///         cursor + 1
///     };
/// }
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cursor {
    index: usize,
}

impl Cursor {
    /// Creates a cursor at `index`.
    #[inline]
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self { index }
    }

    /// Returns the row index this cursor points at.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }

    /// Moves the cursor by a signed offset.
    ///
    /// # Panics
    ///
    /// Panics if the result would be negative or overflow `usize`.
    #[inline]
    #[must_use]
    pub fn offset(self, delta: isize) -> Self {
        match self.index.checked_add_signed(delta) {
            Some(index) => Self { index },
            None => panic!("cursor offset {delta} out of range from {}", self.index),
        }
    }

    /// Signed number of rows from `origin` to `self`.
    #[inline]
    #[must_use]
    pub fn distance_from(self, origin: Self) -> isize {
        if self.index >= origin.index {
            isize::try_from(self.index - origin.index).unwrap_or(isize::MAX)
        } else {
            isize::try_from(origin.index - self.index).map_or(isize::MIN, |d| -d)
        }
    }
}

impl PartialOrd for Cursor {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cursor {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

impl Add<usize> for Cursor {
    type Output = Self;

    #[inline]
    fn add(self, rhs: usize) -> Self {
        Self::new(self.index + rhs)
    }
}

impl AddAssign<usize> for Cursor {
    #[inline]
    fn add_assign(&mut self, rhs: usize) {
        self.index += rhs;
    }
}

impl Sub<usize> for Cursor {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: usize) -> Self {
        Self::new(self.index - rhs)
    }
}

impl SubAssign<usize> for Cursor {
    #[inline]
    fn sub_assign(&mut self, rhs: usize) {
        self.index -= rhs;
    }
}

impl Sub for Cursor {
    type Output = isize;

    #[inline]
    fn sub(self, rhs: Self) -> isize {
        self.distance_from(rhs)
    }
}
