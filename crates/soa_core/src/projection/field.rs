//! # Field Markers
//!
//! Rust has no type-level lookup of "the column holding `f64`", so columns
//! are named by position instead. `F0` is the first declared type, `F1` the
//! second, and so on up to `F11`.
//!
//! ```rust,ignore
//! let mut array: MultiArray<(u32, f64, bool)> = MultiArray::new();
//! array.push((7, 0.5, true));
//!
//! let weights: &[f64] = array.column::<F1>();
//! for (id, alive) in array.view::<(F0, F2)>() { /* ... */ }
//! ```

use crate::store::Schema;

/// A zero-sized marker naming one column of the schema `S`.
///
/// Implemented for `F0`..`Fn` on every tuple schema of arity `n + 1`.
pub trait Field<S: Schema>: 'static {
    /// Position of the column inside the schema tuple.
    const INDEX: usize;

    /// The element type stored in the column.
    type Value;

    /// Returns the first `len` slots of the column.
    fn slice<'a>(columns: &'a S::Columns, len: usize) -> &'a [Self::Value]
    where
        S: 'a;

    /// Takes this column's mutable slice out of a split borrow.
    ///
    /// A column that was already taken yields an empty slice.
    fn take_mut<'a>(parts: &mut S::ColumnsMut<'a>) -> &'a mut [Self::Value]
    where
        S: 'a;
}

macro_rules! field_markers {
    ($($F:ident => $idx:literal),+ $(,)?) => {
        $(
            #[doc = concat!("Names column ", stringify!($idx), " of a schema.")]
            #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
            pub struct $F;
        )+
    };
}

field_markers! {
    F0 => 0,
    F1 => 1,
    F2 => 2,
    F3 => 3,
    F4 => 4,
    F5 => 5,
    F6 => 6,
    F7 => 7,
    F8 => 8,
    F9 => 9,
    F10 => 10,
    F11 => 11,
}

/// Implements [`Field`] for one marker on one tuple schema.
macro_rules! impl_field {
    ([$($All:ident),+]; ($T:ident, $F:ident, $idx:tt)) => {
        impl<$($All: Default),+> $crate::projection::Field<($($All,)+)>
            for $crate::projection::$F
        {
            const INDEX: usize = $idx;

            type Value = $T;

            #[inline]
            fn slice<'a>(
                columns: &'a <($($All,)+) as $crate::store::Schema>::Columns,
                len: usize,
            ) -> &'a [$T]
            where
                ($($All,)+): 'a,
            {
                &columns.$idx.as_slice()[..len]
            }

            #[inline]
            fn take_mut<'a>(
                parts: &mut <($($All,)+) as $crate::store::Schema>::ColumnsMut<'a>,
            ) -> &'a mut [$T]
            where
                ($($All,)+): 'a,
            {
                parts.$idx.take().unwrap_or_default()
            }
        }
    };
}

pub(crate) use impl_field;
