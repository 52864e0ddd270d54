//! Typed handles to objects written by the builder.

use core::{fmt, hash, marker::PhantomData};

use crate::UOffset;

/// Handle to an object written by a [`Builder`](crate::Builder).
///
/// The value is the object's distance from the *end* of the buffer under
/// construction, which stays valid while the buffer grows towards lower
/// addresses. `T` is the [`Follow`](crate::Follow) type a reader uses to
/// reach the object, so a string handle cannot be stored where a table is
/// expected.
pub struct Offset<T> {
    value: UOffset,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Offset<T> {
    /// Wrap a raw end-relative offset.
    #[must_use]
    pub const fn new(value: UOffset) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// The raw end-relative offset.
    #[must_use]
    pub const fn value(self) -> UOffset {
        self.value
    }
}

impl<T> Clone for Offset<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Offset<T> {}

impl<T> PartialEq for Offset<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Offset<T> {}

impl<T> hash::Hash for Offset<T> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Offset<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Offset({})", self.value)
    }
}
