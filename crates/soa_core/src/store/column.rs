//! # Column Storage
//!
//! A single column of a multi-array: one dense, pre-allocated slice per
//! declared field type.
//!
//! The column uses a dense array strategy:
//! - All slots are allocated and default-initialized up front
//! - Access is O(1) by row index
//! - Iteration is cache-friendly (contiguous memory)

use crate::error::{MultiArrayError, MultiArrayResult};

/// Pre-allocated storage for the values of one field.
///
/// A column does not know the logical length of its container; it always
/// holds exactly `capacity` slots. Slots past the container's length carry
/// `T::default()`.
///
/// # Type Parameters
///
/// * `T` - The field type stored in this column
///
/// # Example
///
/// ```rust,ignore
/// let mut column: Column<f32> = Column::try_allocate(1024)?;
/// column.write(0, 1.5);
/// ```
pub struct Column<T> {
    /// The dense array of slots.
    slots: Box<[T]>,
}

impl<T: Default> Column<T> {
    /// Allocates a column with `capacity` default-initialized slots.
    ///
    /// # Errors
    ///
    /// Returns [`MultiArrayError::AllocationFailed`] if the allocator cannot
    /// provide the memory. Nothing is leaked in that case.
    pub fn try_allocate(capacity: usize) -> MultiArrayResult<Self> {
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| MultiArrayError::AllocationFailed {
                capacity,
                element_size: std::mem::size_of::<T>(),
            })?;
        slots.resize_with(capacity, T::default);

        Ok(Self {
            slots: slots.into_boxed_slice(),
        })
    }

    /// Moves the first `len` values of `old` into this column.
    ///
    /// Each value is moved exactly once and keeps its position. The moved-out
    /// slots of `old` are left holding this column's former defaults.
    ///
    /// # Panics
    ///
    /// Panics if either column holds fewer than `len` slots.
    #[inline]
    pub fn migrate_from(&mut self, old: &mut Self, len: usize) {
        self.slots[..len].swap_with_slice(&mut old.slots[..len]);
    }

    /// Removes the value at `index` by sliding `index + 1..len` one slot to
    /// the left. The vacated slot `len - 1` is reset to `T::default()`, which
    /// drops the removed value.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len` or `len > capacity`.
    #[inline]
    pub fn erase(&mut self, index: usize, len: usize) {
        self.slots[index..len].rotate_left(1);
        self.slots[len - 1] = T::default();
    }
}

impl<T> Column<T> {
    /// Returns the number of slots in this column.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Overwrites the slot at `index`, dropping its previous value.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    #[inline]
    pub fn write(&mut self, index: usize, value: T) {
        self.slots[index] = value;
    }

    /// Returns every slot, including those past the container's length.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.slots
    }

    /// Returns every slot mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_allocation_is_default_filled() {
        let column: Column<u32> = Column::try_allocate(8).unwrap();
        assert_eq!(column.capacity(), 8);
        assert!(column.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_column_zero_capacity() {
        let column: Column<String> = Column::try_allocate(0).unwrap();
        assert_eq!(column.capacity(), 0);
        assert!(column.as_slice().is_empty());
    }

    #[test]
    fn test_column_allocation_failure() {
        let result = Column::<u64>::try_allocate(usize::MAX);
        assert_eq!(
            result.err(),
            Some(MultiArrayError::AllocationFailed {
                capacity: usize::MAX,
                element_size: 8,
            })
        );
    }

    #[test]
    fn test_column_migrate_preserves_prefix() {
        let mut old: Column<String> = Column::try_allocate(3).unwrap();
        old.write(0, "a".to_owned());
        old.write(1, "b".to_owned());
        old.write(2, "c".to_owned());

        let mut new: Column<String> = Column::try_allocate(6).unwrap();
        new.migrate_from(&mut old, 2);

        assert_eq!(&new.as_slice()[..2], ["a", "b"]);
        assert!(new.as_slice()[2..].iter().all(String::is_empty));
        // Values past `len` are not migrated.
        assert_eq!(old.as_slice()[2], "c");
    }

    #[test]
    fn test_column_erase_shifts_left() {
        let mut column: Column<i32> = Column::try_allocate(5).unwrap();
        for (i, v) in [10, 20, 30, 40].into_iter().enumerate() {
            column.write(i, v);
        }

        column.erase(1, 4);
        assert_eq!(column.as_slice(), [10, 30, 40, 0, 0]);

        column.erase(2, 3);
        assert_eq!(column.as_slice(), [10, 30, 0, 0, 0]);
    }
}
