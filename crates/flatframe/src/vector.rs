//! Vector views and their iterator.

use core::{fmt, iter::FusedIterator, marker::PhantomData};

use crate::{SIZE_UOFFSET, UOffset, buffer::read_scalar, follow::Follow};

/// View of a vector: a `u32` element count followed by the elements.
///
/// Elements are `T::WIDTH` bytes each; for tables and strings they are
/// `uoffset`s that [`Follow`] resolves. Indexing is checked against the
/// stored count.
pub struct Vector<'a, T> {
    buf: &'a [u8],
    loc: usize,
    len: usize,
    _marker: PhantomData<T>,
}

impl<'a, T: Follow<'a>> Vector<'a, T> {
    /// The vector whose length prefix is at `loc`.
    ///
    /// # Panics
    ///
    /// Panics if the length prefix lies outside `buf`.
    #[must_use]
    pub fn new(buf: &'a [u8], loc: usize) -> Self {
        let len = read_scalar::<UOffset>(buf, loc) as usize;
        Self {
            buf,
            loc,
            len,
            _marker: PhantomData,
        }
    }

    /// Position of the length prefix.
    #[must_use]
    pub fn position(&self) -> usize {
        self.loc
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` if the vector has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Element `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> T::Inner {
        assert!(
            index < self.len,
            "index {index} out of bounds for vector of length {}",
            self.len
        );
        T::follow(self.buf, self.element_position(index))
    }

    /// Element `index`, or `None` past the end.
    #[must_use]
    pub fn checked_get(&self, index: usize) -> Option<T::Inner> {
        (index < self.len).then(|| T::follow(self.buf, self.element_position(index)))
    }

    /// Raw element bytes. For scalar vectors this is the data itself.
    ///
    /// # Panics
    ///
    /// Panics if the stored count reaches past the end of the buffer.
    #[must_use]
    pub fn bytes(&self) -> &'a [u8] {
        let start = self.loc + SIZE_UOFFSET;
        &self.buf[start..start + self.len * T::WIDTH]
    }

    /// Iterate over the elements in index order.
    #[must_use]
    pub fn iter(&self) -> VectorIter<'a, T> {
        VectorIter {
            vector: *self,
            front: 0,
            back: self.len,
        }
    }

    /// The buffer this vector reads from.
    #[must_use]
    pub fn buffer(&self) -> &'a [u8] {
        self.buf
    }

    #[inline]
    pub(crate) fn element_position(&self, index: usize) -> usize {
        self.loc + SIZE_UOFFSET + index * T::WIDTH
    }
}

impl<T> Clone for Vector<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Vector<'_, T> {}

impl<'a, T> fmt::Debug for Vector<'a, T>
where
    T: Follow<'a>,
    T::Inner: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T: Follow<'a>> IntoIterator for Vector<'a, T> {
    type Item = T::Inner;
    type IntoIter = VectorIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`Vector`].
pub struct VectorIter<'a, T> {
    vector: Vector<'a, T>,
    front: usize,
    back: usize,
}

impl<'a, T: Follow<'a>> Iterator for VectorIter<'a, T> {
    type Item = T::Inner;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let item = T::follow(self.vector.buf, self.vector.element_position(self.front));
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl<'a, T: Follow<'a>> DoubleEndedIterator for VectorIter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(T::follow(
            self.vector.buf,
            self.vector.element_position(self.back),
        ))
    }
}

impl<'a, T: Follow<'a>> ExactSizeIterator for VectorIter<'a, T> {}

impl<'a, T: Follow<'a>> FusedIterator for VectorIter<'a, T> {}
