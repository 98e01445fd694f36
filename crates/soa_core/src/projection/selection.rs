//! # Row Projection
//!
//! A row is never stored as a row. Reading one means borrowing the same slot
//! of several columns at once and bundling those borrows into a tuple.
//!
//! ```text
//! columns:   i32[]  [ -1, -2,  1 ]
//!            f64[]  [ -1., -2., 0.]
//!            f32[]  [ -1., -2., 0.]
//!
//! select::<(F0, F2)>(1)  ->  (&-2, &-2.0)
//! ```
//!
//! A [`Selection`] is a tuple of field markers. The full row of a schema is
//! the selection of all its markers (`Schema::All`), so whole-row access and
//! subset views share one code path.

use std::mem;

use super::field::Field;
use crate::store::Schema;

/// Returns `true` if no index appears twice.
const fn all_distinct(indices: &[usize]) -> bool {
    let mut i = 0;
    while i < indices.len() {
        let mut j = i + 1;
        while j < indices.len() {
            if indices[i] == indices[j] {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

/// A tuple of field markers choosing a subset of the columns of `S`.
///
/// Implemented for tuples `(Fa,)` through `(Fa, ..., Fl)` of up to twelve
/// markers. The order of the markers is the order of the projected tuple.
pub trait Selection<S: Schema>: 'static {
    /// Compile-time check that no column is selected twice.
    ///
    /// Evaluated whenever a mutable projection is built, so a selection such
    /// as `(F1, F1)` fails to compile instead of aliasing a column.
    const DISJOINT: ();

    /// Shared projection of one row: `(&A, &B, ..)`.
    type Ref<'a>
    where
        S: 'a;

    /// Mutable projection of one row: `(&mut A, &mut B, ..)`.
    type Mut<'a>
    where
        S: 'a;

    /// Borrowed column slices backing shared projections.
    type Slices<'a>: Copy
    where
        S: 'a;

    /// Borrowed mutable column slices backing mutable projections.
    type SlicesMut<'a>
    where
        S: 'a;

    /// Borrows the first `len` slots of every selected column.
    fn slices<'a>(columns: &'a S::Columns, len: usize) -> Self::Slices<'a>
    where
        S: 'a;

    /// Mutably borrows the first `len` slots of every selected column.
    fn slices_mut<'a>(columns: &'a mut S::Columns, len: usize) -> Self::SlicesMut<'a>
    where
        S: 'a;

    /// Projects row `index` out of shared slices.
    ///
    /// # Panics
    ///
    /// Panics if `index` is past the borrowed length.
    fn at<'a>(slices: Self::Slices<'a>, index: usize) -> Self::Ref<'a>
    where
        S: 'a;

    /// Projects row `index` out of mutable slices, consuming the borrow.
    ///
    /// # Panics
    ///
    /// Panics if `index` is past the borrowed length.
    fn into_mut<'a>(slices: Self::SlicesMut<'a>, index: usize) -> Self::Mut<'a>
    where
        S: 'a;

    /// Splits the first row off the front of the slices.
    fn split_first_mut<'a>(slices: &mut Self::SlicesMut<'a>) -> Option<Self::Mut<'a>>
    where
        S: 'a;

    /// Splits the last row off the back of the slices.
    fn split_last_mut<'a>(slices: &mut Self::SlicesMut<'a>) -> Option<Self::Mut<'a>>
    where
        S: 'a;

    /// Drops `count` rows from the front of the slices.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `count` rows remain.
    fn skip_mut<'a>(slices: &mut Self::SlicesMut<'a>, count: usize)
    where
        S: 'a;
}

/// Shared projection of a full row of `S`: `(&T0, &T1, ..)`.
pub type Row<'a, S> = <<S as Schema>::All as Selection<S>>::Ref<'a>;

/// Mutable projection of a full row of `S`: `(&mut T0, &mut T1, ..)`.
pub type RowMut<'a, S> = <<S as Schema>::All as Selection<S>>::Mut<'a>;

macro_rules! impl_selection {
    ($(($F:ident, $idx:tt)),+) => {
        impl<S: Schema, $($F: Field<S>),+> Selection<S> for ($($F,)+) {
            const DISJOINT: () = assert!(
                all_distinct(&[$(<$F as Field<S>>::INDEX),+]),
                "a column may appear at most once in a mutable selection"
            );

            type Ref<'a> = ($(&'a <$F as Field<S>>::Value,)+) where S: 'a;
            type Mut<'a> = ($(&'a mut <$F as Field<S>>::Value,)+) where S: 'a;
            type Slices<'a> = ($(&'a [<$F as Field<S>>::Value],)+) where S: 'a;
            type SlicesMut<'a> = ($(&'a mut [<$F as Field<S>>::Value],)+) where S: 'a;

            #[inline]
            fn slices<'a>(columns: &'a S::Columns, len: usize) -> Self::Slices<'a>
            where
                S: 'a,
            {
                ($(<$F as Field<S>>::slice(columns, len),)+)
            }

            #[inline]
            fn slices_mut<'a>(columns: &'a mut S::Columns, len: usize) -> Self::SlicesMut<'a>
            where
                S: 'a,
            {
                let () = Self::DISJOINT;
                let mut parts = S::columns_mut(columns, len);
                ($(<$F as Field<S>>::take_mut(&mut parts),)+)
            }

            #[inline]
            fn at<'a>(slices: Self::Slices<'a>, index: usize) -> Self::Ref<'a>
            where
                S: 'a,
            {
                ($(&slices.$idx[index],)+)
            }

            #[inline]
            fn into_mut<'a>(slices: Self::SlicesMut<'a>, index: usize) -> Self::Mut<'a>
            where
                S: 'a,
            {
                ($(&mut slices.$idx[index],)+)
            }

            #[inline]
            fn split_first_mut<'a>(slices: &mut Self::SlicesMut<'a>) -> Option<Self::Mut<'a>>
            where
                S: 'a,
            {
                if slices.0.is_empty() {
                    return None;
                }
                Some(($({
                    let column = mem::take(&mut slices.$idx);
                    let (first, rest) = column.split_first_mut()?;
                    slices.$idx = rest;
                    first
                },)+))
            }

            #[inline]
            fn split_last_mut<'a>(slices: &mut Self::SlicesMut<'a>) -> Option<Self::Mut<'a>>
            where
                S: 'a,
            {
                if slices.0.is_empty() {
                    return None;
                }
                Some(($({
                    let column = mem::take(&mut slices.$idx);
                    let (last, rest) = column.split_last_mut()?;
                    slices.$idx = rest;
                    last
                },)+))
            }

            #[inline]
            fn skip_mut<'a>(slices: &mut Self::SlicesMut<'a>, count: usize)
            where
                S: 'a,
            {
                $(
                    let column = mem::take(&mut slices.$idx);
                    slices.$idx = &mut column[count..];
                )+
            }
        }
    };
}

impl_selection!((A, 0));
impl_selection!((A, 0), (B, 1));
impl_selection!((A, 0), (B, 1), (C, 2));
impl_selection!((A, 0), (B, 1), (C, 2), (D, 3));
impl_selection!((A, 0), (B, 1), (C, 2), (D, 3), (E, 4));
impl_selection!((A, 0), (B, 1), (C, 2), (D, 3), (E, 4), (G, 5));
impl_selection!((A, 0), (B, 1), (C, 2), (D, 3), (E, 4), (G, 5), (H, 6));
impl_selection!((A, 0), (B, 1), (C, 2), (D, 3), (E, 4), (G, 5), (H, 6), (I, 7));
impl_selection!((A, 0), (B, 1), (C, 2), (D, 3), (E, 4), (G, 5), (H, 6), (I, 7), (J, 8));
impl_selection!(
    (A, 0), (B, 1), (C, 2), (D, 3), (E, 4), (G, 5), (H, 6), (I, 7), (J, 8), (K, 9)
);
impl_selection!(
    (A, 0), (B, 1), (C, 2), (D, 3), (E, 4), (G, 5), (H, 6), (I, 7), (J, 8), (K, 9),
    (L, 10)
);
impl_selection!(
    (A, 0), (B, 1), (C, 2), (D, 3), (E, 4), (G, 5), (H, 6), (I, 7), (J, 8), (K, 9),
    (L, 10), (M, 11)
);
