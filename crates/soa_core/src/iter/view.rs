//! # Views
//!
//! Iterators over the rows of a multi-array, restricted to a [`Selection`]
//! of columns. Full-row iteration is the view over `Schema::All`.
//!
//! A view captures the container's length when it is created. Because it
//! borrows the container, no push or erase can happen while it is alive.

use std::iter::FusedIterator;
use std::marker::PhantomData;

use super::cursor::Cursor;
use crate::projection::Selection;
use crate::store::Schema;

/// Shared iterator over the selected columns of every row.
///
/// Yields `Sel::Ref<'a>`, a tuple of `&T` in marker order. Double-ended,
/// exact-size, with O(1) `nth`. Cloning restarts nothing: the clone continues
/// from the same position, independently of the original.
pub struct View<'a, S, Sel>
where
    S: Schema + 'a,
    Sel: Selection<S>,
{
    slices: Sel::Slices<'a>,
    /// Index of the next row from the front.
    front: usize,
    /// One past the next row from the back.
    back: usize,
    _borrow: PhantomData<&'a S>,
}

impl<'a, S, Sel> View<'a, S, Sel>
where
    S: Schema + 'a,
    Sel: Selection<S>,
{
    pub(crate) fn new(columns: &'a S::Columns, len: usize) -> Self {
        Self {
            slices: Sel::slices(columns, len),
            front: 0,
            back: len,
            _borrow: PhantomData,
        }
    }

    /// Position of the next row `next()` would yield.
    #[inline]
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.front)
    }
}

impl<'a, S, Sel> Clone for View<'a, S, Sel>
where
    S: Schema + 'a,
    Sel: Selection<S>,
{
    fn clone(&self) -> Self {
        Self {
            slices: self.slices,
            front: self.front,
            back: self.back,
            _borrow: PhantomData,
        }
    }
}

impl<'a, S, Sel> Iterator for View<'a, S, Sel>
where
    S: Schema + 'a,
    Sel: Selection<S>,
{
    type Item = Sel::Ref<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let row = Sel::at(self.slices, self.front);
        self.front += 1;
        Some(row)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl<'a, S, Sel> DoubleEndedIterator for View<'a, S, Sel>
where
    S: Schema + 'a,
    Sel: Selection<S>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(Sel::at(self.slices, self.back))
    }

    #[inline]
    fn nth_back(&mut self, n: usize) -> Option<Self::Item> {
        self.back = self.back.saturating_sub(n).max(self.front);
        self.next_back()
    }
}

impl<'a, S, Sel> ExactSizeIterator for View<'a, S, Sel>
where
    S: Schema + 'a,
    Sel: Selection<S>,
{
}

impl<'a, S, Sel> FusedIterator for View<'a, S, Sel>
where
    S: Schema + 'a,
    Sel: Selection<S>,
{
}

/// Mutable iterator over the selected columns of every row.
///
/// Yields `Sel::Mut<'a>`, a tuple of `&mut T` in marker order.
pub struct ViewMut<'a, S, Sel>
where
    S: Schema + 'a,
    Sel: Selection<S>,
{
    slices: Sel::SlicesMut<'a>,
    front: usize,
    remaining: usize,
    _borrow: PhantomData<&'a mut S>,
}

impl<'a, S, Sel> ViewMut<'a, S, Sel>
where
    S: Schema + 'a,
    Sel: Selection<S>,
{
    pub(crate) fn new(columns: &'a mut S::Columns, len: usize) -> Self {
        Self {
            slices: Sel::slices_mut(columns, len),
            front: 0,
            remaining: len,
            _borrow: PhantomData,
        }
    }

    /// Position of the next row `next()` would yield.
    #[inline]
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.front)
    }
}

impl<'a, S, Sel> Iterator for ViewMut<'a, S, Sel>
where
    S: Schema + 'a,
    Sel: Selection<S>,
{
    type Item = Sel::Mut<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let row = Sel::split_first_mut(&mut self.slices)?;
        self.front += 1;
        self.remaining -= 1;
        Some(row)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        let skip = n.min(self.remaining);
        Sel::skip_mut(&mut self.slices, skip);
        self.front += skip;
        self.remaining -= skip;
        self.next()
    }
}

impl<'a, S, Sel> DoubleEndedIterator for ViewMut<'a, S, Sel>
where
    S: Schema + 'a,
    Sel: Selection<S>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let row = Sel::split_last_mut(&mut self.slices)?;
        self.remaining -= 1;
        Some(row)
    }
}

impl<'a, S, Sel> ExactSizeIterator for ViewMut<'a, S, Sel>
where
    S: Schema + 'a,
    Sel: Selection<S>,
{
}

impl<'a, S, Sel> FusedIterator for ViewMut<'a, S, Sel>
where
    S: Schema + 'a,
    Sel: Selection<S>,
{
}

/// Full-row shared iterator.
pub type Iter<'a, S> = View<'a, S, <S as Schema>::All>;

/// Full-row mutable iterator.
pub type IterMut<'a, S> = ViewMut<'a, S, <S as Schema>::All>;
