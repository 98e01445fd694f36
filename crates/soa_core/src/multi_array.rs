//! # Multi-Array
//!
//! A growable container that stores each field of its rows in a separate
//! column.
//!
//! ```text
//! MultiArray<(i32, f64, f32)>, len 3, capacity 4:
//!
//!   i32[]  [ -1 | -2 |  1 | 0 ]
//!   f64[]  [ -1.| -2.|  0.| 0.]
//!   f32[]  [ -1.| -2.|  0.| 0.]
//!            row 0 ... row 2  (slot 3: default, past len)
//! ```
//!
//! Iterating one column touches only that column's memory, which is the
//! point of the layout. Rows are reassembled on demand as tuples of
//! references.
//!
//! ## Invalidation
//!
//! Growth replaces every column and `erase` shifts rows. Both need
//! `&mut self`, so any outstanding row projection, view or column slice keeps
//! them from compiling. [`Cursor`]s do not borrow and survive mutation as
//! plain positions.

use std::fmt;

use tracing::{debug, trace};

use crate::config::{ArrayConfig, DEFAULT_INITIAL_CAPACITY, DEFAULT_MIN_CAPACITY};
use crate::error::{MultiArrayError, MultiArrayResult};
use crate::iter::{Cursor, Iter, IterMut, View, ViewMut};
use crate::projection::{Field, Row, RowMut, Selection};
use crate::store::Schema;

/// Capacity multiplier applied when a push finds the container full.
const GROWTH_FACTOR: usize = 2;

/// Structure-of-arrays container over the field types of `S`.
///
/// All columns always share the same capacity and the same length.
///
/// # Example
///
/// ```rust,ignore
/// use soa_core::{MultiArray, F0, F2};
///
/// let mut particles: MultiArray<(u32, f64, f32)> = MultiArray::new();
/// particles.push((1, 0.5, 1.0));
/// particles.push((2, 1.5, 2.0));
///
/// for (id, mass) in particles.view::<(F0, F2)>() {
///     println!("{id}: {mass}");
/// }
/// ```
pub struct MultiArray<S: Schema> {
    /// One column per field, each `capacity` slots long.
    columns: S::Columns,
    /// Number of logical rows.
    len: usize,
    /// Slots per column.
    capacity: usize,
    /// Floor for the capacity picked by growth.
    min_capacity: usize,
}

impl<S: Schema> MultiArray<S> {
    /// Creates an empty container with room for one row.
    ///
    /// # Panics
    ///
    /// Panics if the columns cannot be allocated.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_INITIAL_CAPACITY)
    }

    /// Creates an empty container with `capacity` slots per column.
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero or the columns cannot be allocated.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(array) => array,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates an empty container with `capacity` slots per column.
    ///
    /// # Errors
    ///
    /// Returns [`MultiArrayError::ZeroCapacity`] for a zero capacity and
    /// [`MultiArrayError::AllocationFailed`] if a column cannot be allocated.
    pub fn try_with_capacity(capacity: usize) -> MultiArrayResult<Self> {
        if capacity == 0 {
            return Err(MultiArrayError::ZeroCapacity);
        }
        Self::allocate(capacity, DEFAULT_MIN_CAPACITY)
    }

    /// Creates an empty container sized by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`MultiArrayError::InvalidConfig`] if the configuration does
    /// not validate and [`MultiArrayError::AllocationFailed`] if a column
    /// cannot be allocated.
    pub fn with_config(config: &ArrayConfig) -> MultiArrayResult<Self> {
        config.validate()?;
        debug!(
            fields = S::FIELD_COUNT,
            initial_capacity = config.initial_capacity,
            min_capacity = config.min_capacity,
            "allocating multi-array"
        );
        Self::allocate(config.initial_capacity, config.min_capacity)
    }

    /// Creates a container holding `rows` in order, with capacity equal to
    /// the number of rows.
    ///
    /// # Panics
    ///
    /// Panics if the columns cannot be allocated.
    #[must_use]
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        match Self::try_from_rows(rows) {
            Ok(array) => array,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible form of [`MultiArray::from_rows`].
    ///
    /// An empty input yields a container with capacity zero; its first push
    /// grows it to the default growth floor.
    ///
    /// # Errors
    ///
    /// Returns [`MultiArrayError::AllocationFailed`] if a column cannot be
    /// allocated.
    pub fn try_from_rows<I>(rows: I) -> MultiArrayResult<Self>
    where
        I: IntoIterator<Item = S>,
    {
        let rows: Vec<S> = rows.into_iter().collect();
        let mut array = Self::allocate(rows.len(), DEFAULT_MIN_CAPACITY)?;
        for row in rows {
            S::write(&mut array.columns, array.len, row);
            array.len += 1;
        }
        Ok(array)
    }

    fn allocate(capacity: usize, min_capacity: usize) -> MultiArrayResult<Self> {
        Ok(Self {
            columns: S::try_allocate(capacity)?,
            len: 0,
            capacity,
            min_capacity,
        })
    }

    /// Returns the number of rows.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the container holds no rows.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots allocated in every column.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of columns.
    #[inline]
    #[must_use]
    pub fn field_count(&self) -> usize {
        S::FIELD_COUNT
    }

    // ========================================================================
    // INSERTION
    // ========================================================================

    /// Appends a row, moving each field into its column.
    ///
    /// Doubles the capacity first if the container is full.
    ///
    /// # Panics
    ///
    /// Panics if growth is needed and fails.
    #[inline]
    pub fn push(&mut self, row: S) {
        if let Err(err) = self.try_push(row) {
            panic!("{err}");
        }
    }

    /// Appends a copy of `row`.
    ///
    /// # Panics
    ///
    /// Panics if growth is needed and fails.
    #[inline]
    pub fn push_cloned(&mut self, row: &S)
    where
        S: Clone,
    {
        self.push(row.clone());
    }

    /// Appends a row, reporting growth failure instead of panicking.
    ///
    /// On error the container is unchanged and `row` is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`MultiArrayError::CapacityOverflow`] or
    /// [`MultiArrayError::AllocationFailed`] if the container is full and
    /// cannot grow.
    pub fn try_push(&mut self, row: S) -> MultiArrayResult<()> {
        if self.len == self.capacity {
            self.grow()?;
        }
        S::write(&mut self.columns, self.len, row);
        self.len += 1;
        Ok(())
    }

    /// Doubles the capacity of every column.
    ///
    /// All new columns are allocated before any value moves, so a failed
    /// allocation leaves the container exactly as it was.
    fn grow(&mut self) -> MultiArrayResult<()> {
        let new_capacity = self
            .capacity
            .checked_mul(GROWTH_FACTOR)
            .ok_or(MultiArrayError::CapacityOverflow {
                capacity: self.capacity,
            })?
            .max(self.min_capacity);

        let mut columns = S::try_allocate(new_capacity)?;
        S::migrate(&mut self.columns, &mut columns, self.len);
        // Old columns are released here.
        self.columns = columns;

        trace!(
            old_capacity = self.capacity,
            new_capacity,
            rows = self.len,
            "grew multi-array columns"
        );
        self.capacity = new_capacity;
        Ok(())
    }

    // ========================================================================
    // ROW PROJECTION
    // ========================================================================

    /// Borrows every field of row `index`.
    ///
    /// Only checked against the capacity: slots in `len..capacity` read as
    /// default values. Use [`MultiArray::get`] for a length-checked lookup.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    #[inline]
    #[must_use]
    pub fn row(&self, index: usize) -> Row<'_, S> {
        self.select::<S::All>(index)
    }

    /// Mutably borrows every field of row `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    #[inline]
    pub fn row_mut(&mut self, index: usize) -> RowMut<'_, S> {
        self.select_mut::<S::All>(index)
    }

    /// Borrows the selected fields of row `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    #[inline]
    #[must_use]
    pub fn select<Sel: Selection<S>>(&self, index: usize) -> Sel::Ref<'_> {
        Sel::at(Sel::slices(&self.columns, self.capacity), index)
    }

    /// Mutably borrows the selected fields of row `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    #[inline]
    pub fn select_mut<Sel: Selection<S>>(&mut self, index: usize) -> Sel::Mut<'_> {
        Sel::into_mut(Sel::slices_mut(&mut self.columns, self.capacity), index)
    }

    /// Borrows row `index`, or `None` if `index >= len`.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Row<'_, S>> {
        (index < self.len).then(|| self.row(index))
    }

    /// Mutably borrows row `index`, or `None` if `index >= len`.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<RowMut<'_, S>> {
        if index < self.len {
            Some(self.row_mut(index))
        } else {
            None
        }
    }

    /// Returns the live rows of one column.
    #[inline]
    #[must_use]
    pub fn column<F: Field<S>>(&self) -> &[F::Value] {
        F::slice(&self.columns, self.len)
    }

    /// Returns the live rows of one column mutably.
    #[inline]
    pub fn column_mut<F: Field<S>>(&mut self) -> &mut [F::Value] {
        let mut parts = S::columns_mut(&mut self.columns, self.len);
        F::take_mut(&mut parts)
    }

    // ========================================================================
    // ITERATION
    // ========================================================================

    /// Iterates over every row.
    #[inline]
    pub fn iter(&self) -> Iter<'_, S> {
        View::new(&self.columns, self.len)
    }

    /// Iterates mutably over every row.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, S> {
        ViewMut::new(&mut self.columns, self.len)
    }

    /// Iterates over the selected columns of every row.
    ///
    /// ```rust,ignore
    /// for (id, mass) in particles.view::<(F0, F2)>() { /* ... */ }
    /// ```
    #[inline]
    pub fn view<Sel: Selection<S>>(&self) -> View<'_, S, Sel> {
        View::new(&self.columns, self.len)
    }

    /// Iterates mutably over the selected columns of every row.
    ///
    /// Selecting a column twice is a compile error:
    ///
    /// ```compile_fail
    /// use soa_core::{MultiArray, F1};
    ///
    /// let mut array: MultiArray<(u8, u16)> = MultiArray::new();
    /// for (a, b) in array.view_mut::<(F1, F1)>() {
    ///     *a += *b;
    /// }
    /// ```
    #[inline]
    pub fn view_mut<Sel: Selection<S>>(&mut self) -> ViewMut<'_, S, Sel> {
        ViewMut::new(&mut self.columns, self.len)
    }

    // ========================================================================
    // CURSORS & DELETION
    // ========================================================================

    /// Cursor at the first row.
    #[inline]
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn begin(&self) -> Cursor {
        Cursor::new(0)
    }

    /// Cursor one past the last row, as of this call.
    #[inline]
    #[must_use]
    pub fn end(&self) -> Cursor {
        Cursor::new(self.len)
    }

    /// Borrows every field of the row at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position.index() >= len`.
    #[inline]
    #[must_use]
    pub fn row_at(&self, position: Cursor) -> Row<'_, S> {
        let index = position.index();
        assert!(index < self.len, "cursor {index} past end {}", self.len);
        self.row(index)
    }

    /// Mutably borrows every field of the row at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position.index() >= len`.
    #[inline]
    pub fn row_at_mut(&mut self, position: Cursor) -> RowMut<'_, S> {
        let index = position.index();
        assert!(index < self.len, "cursor {index} past end {}", self.len);
        self.row_mut(index)
    }

    /// Removes the row at `position`, keeping the order of the others.
    ///
    /// Every later row slides one slot towards the front, so the returned
    /// cursor (equal to `position`) names the row that followed the removed
    /// one. The capacity is unchanged. Cost is O((len - index) * fields).
    ///
    /// # Panics
    ///
    /// Panics if `position.index() >= len`.
    pub fn erase(&mut self, position: Cursor) -> Cursor {
        match self.try_erase(position) {
            Ok(next) => next,
            Err(err) => panic!("{err}"),
        }
    }

    /// Checked form of [`MultiArray::erase`].
    ///
    /// # Errors
    ///
    /// Returns [`MultiArrayError::IndexOutOfBounds`] if
    /// `position.index() >= len`; the container is unchanged.
    pub fn try_erase(&mut self, position: Cursor) -> MultiArrayResult<Cursor> {
        let index = position.index();
        if index >= self.len {
            return Err(MultiArrayError::IndexOutOfBounds {
                index,
                len: self.len,
            });
        }
        S::erase(&mut self.columns, index, self.len);
        self.len -= 1;
        Ok(position)
    }
}

impl<S: Schema> Default for MultiArray<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Schema> fmt::Debug for MultiArray<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiArray")
            .field("fields", &S::FIELD_COUNT)
            .field("len", &self.len)
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<S: Schema> FromIterator<S> for MultiArray<S> {
    fn from_iter<I: IntoIterator<Item = S>>(rows: I) -> Self {
        Self::from_rows(rows)
    }
}

impl<S: Schema> From<Vec<S>> for MultiArray<S> {
    fn from(rows: Vec<S>) -> Self {
        Self::from_rows(rows)
    }
}

impl<S: Schema, const N: usize> From<[S; N]> for MultiArray<S> {
    fn from(rows: [S; N]) -> Self {
        Self::from_rows(rows)
    }
}

impl<'a, S: Schema> IntoIterator for &'a MultiArray<S> {
    type Item = Row<'a, S>;
    type IntoIter = Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, S: Schema> IntoIterator for &'a mut MultiArray<S> {
    type Item = RowMut<'a, S>;
    type IntoIter = IterMut<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{F0, F1, F2};

    type Particle = (i32, f64, f32);

    fn sample() -> MultiArray<Particle> {
        MultiArray::from([(-1, -1.0, -1.0), (-2, -2.0, -2.0)])
    }

    fn rows(array: &MultiArray<Particle>) -> Vec<Particle> {
        array.iter().map(|(i, d, f)| (*i, *d, *f)).collect()
    }

    #[test]
    fn test_new_has_capacity_one() {
        let array: MultiArray<Particle> = MultiArray::new();
        assert_eq!(array.len(), 0);
        assert!(array.is_empty());
        assert_eq!(array.capacity(), 1);
        assert_eq!(array.field_count(), 3);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = MultiArray::<Particle>::try_with_capacity(0);
        assert_eq!(result.err(), Some(MultiArrayError::ZeroCapacity));
    }

    #[test]
    #[should_panic(expected = "capacity must be greater than zero")]
    fn test_with_capacity_zero_panics() {
        let _ = MultiArray::<Particle>::with_capacity(0);
    }

    #[test]
    fn test_from_rows_sets_capacity_to_row_count() {
        let array = sample();
        assert_eq!(array.len(), 2);
        assert_eq!(array.capacity(), 2);
        assert_eq!(rows(&array), [(-1, -1.0, -1.0), (-2, -2.0, -2.0)]);
    }

    #[test]
    fn test_push_appends_and_grows() {
        let mut array = sample();
        array.push((1, 0.0, 0.0));

        assert_eq!(array.len(), 3);
        assert_eq!(array.capacity(), 4);
        let (i, d, f) = array.row(2);
        assert_eq!((*i, *d, *f), (1, 0.0, 0.0));

        let ints: Vec<i32> = array.view::<(F0,)>().map(|(i,)| *i).collect();
        assert_eq!(ints, [-1, -2, 1]);
    }

    #[test]
    fn test_push_cloned_copies() {
        let mut array: MultiArray<(String, u8)> = MultiArray::new();
        let row = ("kept".to_owned(), 7);
        array.push_cloned(&row);
        array.push_cloned(&row);

        assert_eq!(row.0, "kept");
        assert_eq!(array.column::<F0>(), ["kept", "kept"]);
    }

    #[test]
    fn test_empty_rows_can_grow() {
        let mut array = MultiArray::<Particle>::from_rows(Vec::new());
        assert_eq!(array.capacity(), 0);

        array.push((5, 5.0, 5.0));
        assert_eq!(array.capacity(), 1);
        array.push((6, 6.0, 6.0));
        assert_eq!(array.capacity(), 2);
        assert_eq!(rows(&array), [(5, 5.0, 5.0), (6, 6.0, 6.0)]);
    }

    #[test]
    fn test_config_growth_floor() {
        let config = ArrayConfig::default().with_initial_capacity(2).with_min_capacity(16);
        let mut array = MultiArray::<Particle>::with_config(&config).unwrap();
        for i in 0..3 {
            array.push((i, 0.0, 0.0));
        }
        assert_eq!(array.capacity(), 16);
    }

    #[test]
    fn test_failed_growth_leaves_array_unchanged() {
        let config = ArrayConfig::default().with_min_capacity(usize::MAX / 4);
        let mut array = MultiArray::<(u8, u64)>::with_config(&config).unwrap();
        array.push((1, 10));

        let err = array.try_push((2, 20)).unwrap_err();
        assert!(matches!(err, MultiArrayError::AllocationFailed { .. }));
        assert_eq!(array.len(), 1);
        assert_eq!(array.capacity(), 1);
        assert_eq!(array.column::<F0>(), [1]);
        assert_eq!(array.column::<F1>(), [10]);
    }

    #[test]
    fn test_capacity_overflow_leaves_array_unchanged() {
        let mut array = MultiArray::<(u8,)>::with_capacity(1);
        array.push((7,));

        // Pretend the array is full at a capacity that cannot double.
        let huge = usize::MAX / 2 + 1;
        array.capacity = huge;
        array.len = huge;
        let err = array.try_push((8,)).unwrap_err();
        assert_eq!(err, MultiArrayError::CapacityOverflow { capacity: huge });
        assert_eq!(array.capacity, huge);
        assert_eq!(array.len, huge);

        array.capacity = 1;
        array.len = 1;
        assert_eq!(array.column::<F0>(), [7]);
    }

    #[test]
    fn test_invalid_config() {
        let config = ArrayConfig::default().with_min_capacity(0);
        assert!(matches!(
            MultiArray::<Particle>::with_config(&config),
            Err(MultiArrayError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_row_reads_default_past_len() {
        let array = MultiArray::<Particle>::with_capacity(4);
        let (i, d, f) = array.row(3);
        assert_eq!((*i, *d, *f), (0, 0.0, 0.0));
        assert!(array.get(0).is_none());
    }

    #[test]
    #[should_panic]
    fn test_row_past_capacity_panics() {
        let array = MultiArray::<Particle>::with_capacity(4);
        let _ = array.row(4);
    }

    #[test]
    fn test_row_mut_writes_through() {
        let mut array = sample();
        {
            let (i, _, f) = array.row_mut(1);
            *i = 20;
            *f = 0.25;
        }
        assert_eq!(rows(&array)[1], (20, -2.0, 0.25));

        if let Some((_, d, _)) = array.get_mut(0) {
            *d = 9.0;
        }
        assert_eq!(array.column::<F1>(), [9.0, -2.0]);
        assert!(array.get_mut(2).is_none());
    }

    #[test]
    fn test_select_subset() {
        let mut array = sample();
        let (f, i) = array.select::<(F2, F0)>(0);
        assert_eq!((*f, *i), (-1.0, -1));

        let (d,) = array.select_mut::<(F1,)>(1);
        *d *= 2.0;
        assert_eq!(array.column::<F1>(), [-1.0, -4.0]);
    }

    #[test]
    fn test_column_mut() {
        let mut array = sample();
        for value in array.column_mut::<F0>() {
            *value = -*value;
        }
        assert_eq!(array.column::<F0>(), [1, 2]);
    }

    #[test]
    fn test_erase_front() {
        let mut array = sample();
        array.push((1, 0.0, 0.0));

        let next = array.erase(array.begin());
        assert_eq!(next, Cursor::new(0));
        assert_eq!(array.len(), 2);
        assert_eq!(array.capacity(), 4);
        assert_eq!(rows(&array), [(-2, -2.0, -2.0), (1, 0.0, 0.0)]);
    }

    #[test]
    fn test_erase_last_and_reset_slot() {
        let mut array: MultiArray<(String,)> =
            MultiArray::from_rows(["a", "b", "c"].map(|s| (s.to_owned(),)));
        let last = array.end() - 1;
        let next = array.erase(last);

        assert_eq!(next, array.end());
        assert_eq!(array.column::<F0>(), ["a", "b"]);
        let (slot,) = array.row(2);
        assert!(slot.is_empty());
    }

    #[test]
    fn test_try_erase_out_of_bounds() {
        let mut array = sample();
        assert_eq!(
            array.try_erase(array.end()),
            Err(MultiArrayError::IndexOutOfBounds { index: 2, len: 2 })
        );
        assert_eq!(array.len(), 2);
    }

    #[test]
    fn test_erase_while_walking_cursor() {
        let mut array: MultiArray<(i32, bool)> =
            (0..10).map(|i| (i, i % 3 == 0)).collect();

        let mut cursor = array.begin();
        while cursor < array.end() {
            let (_, doomed) = array.row_at(cursor);
            cursor = if *doomed { array.erase(cursor) } else { cursor + 1 };
        }

        assert_eq!(array.column::<F0>(), [1, 2, 4, 5, 7, 8]);
    }

    #[test]
    fn test_row_at_cursor() {
        let mut array = sample();
        let (i, d, _) = array.row_at(array.end() - 1);
        assert_eq!((*i, *d), (-2, -2.0));

        let (_, _, f) = array.row_at_mut(array.begin());
        *f = 3.5;
        assert_eq!(array.column::<F2>(), [3.5, -2.0]);
    }

    #[test]
    #[should_panic(expected = "cursor 2 past end 2")]
    fn test_row_at_end_panics() {
        let array = sample();
        let _ = array.row_at(array.end());
    }

    #[test]
    fn test_into_iterator_refs() {
        let mut array = sample();
        for (i, _, _) in &mut array {
            *i += 100;
        }
        let total: i32 = (&array).into_iter().map(|(i, _, _)| *i).sum();
        assert_eq!(total, 99 + 98);
    }

    #[test]
    fn test_debug_output() {
        let array = sample();
        assert_eq!(
            format!("{array:?}"),
            "MultiArray { fields: 3, len: 2, capacity: 2, .. }"
        );
    }
}
