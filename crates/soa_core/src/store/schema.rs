//! # Schema
//!
//! A schema is the tuple of element types a multi-array stores, one column
//! per type. `(u32, f64, bool)` becomes
//! `(Column<u32>, Column<f64>, Column<bool>)`.
//!
//! Every structural operation is fanned out to all columns in the same call,
//! so no column is ever resized or shifted on its own.

use super::column::Column;
use crate::error::MultiArrayResult;
use crate::projection::{impl_field, Selection, F0, F1, F10, F11, F2, F3, F4, F5, F6, F7, F8, F9};

/// A tuple of element types stored column-wise.
///
/// Implemented for tuples of 1 to 12 types that implement [`Default`]. The
/// default value fills slots that are allocated but not yet part of the
/// container's length.
pub trait Schema: Sized {
    /// Number of columns.
    const FIELD_COUNT: usize;

    /// One [`Column`] per field, as a tuple.
    type Columns;

    /// Split mutable borrow of every column, one `Option<&mut [T]>` per field.
    type ColumnsMut<'a>
    where
        Self: 'a;

    /// Selection of every field in declaration order.
    type All: Selection<Self>;

    /// Allocates every column with `capacity` default slots.
    ///
    /// # Errors
    ///
    /// Fails if any column cannot be allocated. Columns allocated before the
    /// failure are released again.
    fn try_allocate(capacity: usize) -> MultiArrayResult<Self::Columns>;

    /// Moves the first `len` rows of `from` into `into`, column by column.
    fn migrate(from: &mut Self::Columns, into: &mut Self::Columns, len: usize);

    /// Writes every field of `row` into slot `index` of its column.
    fn write(columns: &mut Self::Columns, index: usize, row: Self);

    /// Removes row `index` from the first `len` rows of every column.
    fn erase(columns: &mut Self::Columns, index: usize, len: usize);

    /// Splits the first `len` slots of every column into separate borrows.
    fn columns_mut<'a>(columns: &'a mut Self::Columns, len: usize) -> Self::ColumnsMut<'a>
    where
        Self: 'a;
}

macro_rules! impl_schema {
    ($count:expr; $types:tt; $(($T:ident, $F:ident, $idx:tt)),+) => {
        impl<$($T: Default),+> Schema for ($($T,)+) {
            const FIELD_COUNT: usize = $count;

            type Columns = ($(Column<$T>,)+);
            type ColumnsMut<'a> = ($(Option<&'a mut [$T]>,)+) where Self: 'a;
            type All = ($($F,)+);

            fn try_allocate(capacity: usize) -> MultiArrayResult<Self::Columns> {
                Ok(($(Column::<$T>::try_allocate(capacity)?,)+))
            }

            #[inline]
            fn migrate(from: &mut Self::Columns, into: &mut Self::Columns, len: usize) {
                $(into.$idx.migrate_from(&mut from.$idx, len);)+
            }

            #[inline]
            fn write(columns: &mut Self::Columns, index: usize, row: Self) {
                $(columns.$idx.write(index, row.$idx);)+
            }

            #[inline]
            fn erase(columns: &mut Self::Columns, index: usize, len: usize) {
                $(columns.$idx.erase(index, len);)+
            }

            #[inline]
            fn columns_mut<'a>(columns: &'a mut Self::Columns, len: usize) -> Self::ColumnsMut<'a>
            where
                Self: 'a,
            {
                ($(Some(&mut columns.$idx.as_mut_slice()[..len]),)+)
            }
        }

        $(impl_field!($types; ($T, $F, $idx));)+
    };
}

impl_schema!(1; [A]; (A, F0, 0));
impl_schema!(2; [A, B]; (A, F0, 0), (B, F1, 1));
impl_schema!(3; [A, B, C]; (A, F0, 0), (B, F1, 1), (C, F2, 2));
impl_schema!(4; [A, B, C, D]; (A, F0, 0), (B, F1, 1), (C, F2, 2), (D, F3, 3));
impl_schema!(
    5; [A, B, C, D, E];
    (A, F0, 0), (B, F1, 1), (C, F2, 2), (D, F3, 3), (E, F4, 4)
);
impl_schema!(
    6; [A, B, C, D, E, G];
    (A, F0, 0), (B, F1, 1), (C, F2, 2), (D, F3, 3), (E, F4, 4), (G, F5, 5)
);
impl_schema!(
    7; [A, B, C, D, E, G, H];
    (A, F0, 0), (B, F1, 1), (C, F2, 2), (D, F3, 3), (E, F4, 4), (G, F5, 5), (H, F6, 6)
);
impl_schema!(
    8; [A, B, C, D, E, G, H, I];
    (A, F0, 0), (B, F1, 1), (C, F2, 2), (D, F3, 3), (E, F4, 4), (G, F5, 5), (H, F6, 6),
    (I, F7, 7)
);
impl_schema!(
    9; [A, B, C, D, E, G, H, I, J];
    (A, F0, 0), (B, F1, 1), (C, F2, 2), (D, F3, 3), (E, F4, 4), (G, F5, 5), (H, F6, 6),
    (I, F7, 7), (J, F8, 8)
);
impl_schema!(
    10; [A, B, C, D, E, G, H, I, J, K];
    (A, F0, 0), (B, F1, 1), (C, F2, 2), (D, F3, 3), (E, F4, 4), (G, F5, 5), (H, F6, 6),
    (I, F7, 7), (J, F8, 8), (K, F9, 9)
);
impl_schema!(
    11; [A, B, C, D, E, G, H, I, J, K, L];
    (A, F0, 0), (B, F1, 1), (C, F2, 2), (D, F3, 3), (E, F4, 4), (G, F5, 5), (H, F6, 6),
    (I, F7, 7), (J, F8, 8), (K, F9, 9), (L, F10, 10)
);
impl_schema!(
    12; [A, B, C, D, E, G, H, I, J, K, L, M];
    (A, F0, 0), (B, F1, 1), (C, F2, 2), (D, F3, 3), (E, F4, 4), (G, F5, 5), (H, F6, 6),
    (I, F7, 7), (J, F8, 8), (K, F9, 9), (L, F10, 10), (M, F11, 11)
);
