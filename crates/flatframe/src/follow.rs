//! Typed navigation from a byte position to a value.
//!
//! [`Follow`] says how wide a value is where it is stored (inline in a table
//! or as a vector element) and how to turn that position into a view.
//! Scalars decode in place; the `Forward*` markers read a `uoffset` and jump
//! to the referenced object, which is always at a higher address.

use core::marker::PhantomData;

use bstr::BStr;

use crate::{
    SIZE_UOFFSET, UOffset,
    buffer::{Scalar, read_scalar},
    table::{Struct, Table},
    vector::Vector,
};

/// A value that can be read at a position of a buffer.
pub trait Follow<'a> {
    /// The view or value produced.
    type Inner;
    /// Bytes the value occupies at its storage location.
    const WIDTH: usize;

    /// Read the value stored at `loc`.
    ///
    /// # Panics
    ///
    /// Panics if the value, or anything it references, lies outside `buf`.
    fn follow(buf: &'a [u8], loc: usize) -> Self::Inner;
}

macro_rules! impl_follow_scalar {
    ($($ty:ty),* $(,)?) => {$(
        impl<'a> Follow<'a> for $ty {
            type Inner = $ty;
            const WIDTH: usize = <$ty as Scalar>::SIZE;

            #[inline]
            fn follow(buf: &'a [u8], loc: usize) -> $ty {
                read_scalar::<$ty>(buf, loc)
            }
        }
    )*};
}

impl_follow_scalar!(bool, i8, u8, i16, u16, i32, u32, i64, u64, f32, f64);

/// Position referenced by the `uoffset` stored at `loc`.
///
/// # Panics
///
/// Panics if `loc` does not hold four bytes.
#[inline]
#[must_use]
pub fn follow_uoffset(buf: &[u8], loc: usize) -> usize {
    loc + read_scalar::<UOffset>(buf, loc) as usize
}

/// Marker: a `uoffset` to a table.
#[derive(Debug, Clone, Copy)]
pub enum ForwardTable {}

impl<'a> Follow<'a> for ForwardTable {
    type Inner = Table<'a>;
    const WIDTH: usize = SIZE_UOFFSET;

    #[inline]
    fn follow(buf: &'a [u8], loc: usize) -> Table<'a> {
        Table::new(buf, follow_uoffset(buf, loc))
    }
}

/// Marker: a `uoffset` to a string.
#[derive(Debug, Clone, Copy)]
pub enum ForwardStr {}

impl<'a> Follow<'a> for ForwardStr {
    type Inner = &'a BStr;
    const WIDTH: usize = SIZE_UOFFSET;

    #[inline]
    fn follow(buf: &'a [u8], loc: usize) -> &'a BStr {
        BStr::new(read_string_bytes(buf, follow_uoffset(buf, loc)))
    }
}

/// Marker: a `uoffset` to a vector of `T`.
#[derive(Debug, Clone, Copy)]
pub struct ForwardVector<T>(PhantomData<T>);

impl<'a, T: Follow<'a>> Follow<'a> for ForwardVector<T> {
    type Inner = Vector<'a, T>;
    const WIDTH: usize = SIZE_UOFFSET;

    #[inline]
    fn follow(buf: &'a [u8], loc: usize) -> Vector<'a, T> {
        Vector::new(buf, follow_uoffset(buf, loc))
    }
}

/// Marker: an `N`-byte struct stored inline.
#[derive(Debug, Clone, Copy)]
pub enum InlineStruct<const N: usize> {}

impl<'a, const N: usize> Follow<'a> for InlineStruct<N> {
    type Inner = Struct<'a>;
    const WIDTH: usize = N;

    #[inline]
    fn follow(buf: &'a [u8], loc: usize) -> Struct<'a> {
        Struct::new(buf, loc)
    }
}

/// Payload of the string whose length prefix is at `loc`. The trailing NUL
/// is not included.
///
/// # Panics
///
/// Panics if the length prefix or the payload lies outside `buf`.
#[inline]
#[must_use]
pub fn read_string_bytes(buf: &[u8], loc: usize) -> &[u8] {
    let len = read_scalar::<UOffset>(buf, loc) as usize;
    let start = loc + SIZE_UOFFSET;
    &buf[start..start + len]
}
