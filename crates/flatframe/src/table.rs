//! Table and struct views.
//!
//! Views are small `Copy` values: a borrowed buffer, a position, and for
//! tables the cached bounds of the vtable. They never own or copy data, and
//! [`Table::reset`]/[`Struct::reset`] re-point an existing view instead of
//! building a new one. Generated accessors are expected to call
//! [`Table::lookup_field`] or one of the typed getters with the field's slot
//! and default.

use alloc::borrow::Cow;
use core::{fmt, marker::PhantomData};

use bstr::{BStr, ByteSlice};

use crate::{
    VOffset,
    buffer::{Scalar, read_scalar, write_scalar},
    error::ReadError,
    follow::{Follow, ForwardTable, follow_uoffset, read_string_bytes},
    root::root_as_table,
    vector::Vector,
    vtable::{VTable, vtable_position},
};

/// View of a table: vtable-addressed fields with defaults.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Table<'a> {
    buf: &'a [u8],
    loc: usize,
    vtable_start: usize,
    vtable_size: usize,
}

impl<'a> Table<'a> {
    /// The table starting at `loc` of `buf`.
    ///
    /// # Panics
    ///
    /// Panics if the table's vtable offset or vtable header lies outside
    /// `buf`. Use [`root_as_table`] to open untrusted bytes.
    #[must_use]
    pub fn new(buf: &'a [u8], loc: usize) -> Self {
        let vtable_start = vtable_position(buf, loc);
        let vtable_size = usize::from(read_scalar::<VOffset>(buf, vtable_start));
        Self {
            buf,
            loc,
            vtable_start,
            vtable_size,
        }
    }

    /// Re-point this view at the table at `loc` of `buf`.
    pub fn reset(&mut self, buf: &'a [u8], loc: usize) {
        *self = Self::new(buf, loc);
    }

    /// Position of the table in its buffer.
    #[must_use]
    pub fn position(&self) -> usize {
        self.loc
    }

    /// The buffer this table reads from.
    #[must_use]
    pub fn buffer(&self) -> &'a [u8] {
        self.buf
    }

    /// The table's vtable.
    #[must_use]
    pub fn vtable(&self) -> VTable<'a> {
        VTable::at(self.buf, self.vtable_start)
    }

    /// Byte offset of `slot`'s field relative to the table, or `0` if absent.
    #[inline]
    #[must_use]
    pub fn field_offset(&self, slot: VOffset) -> VOffset {
        if usize::from(slot) >= self.vtable_size {
            return 0;
        }
        read_scalar::<VOffset>(self.buf, self.vtable_start + usize::from(slot))
    }

    /// `true` if `slot` has a vtable entry.
    #[must_use]
    pub fn has_field(&self, slot: VOffset) -> bool {
        self.field_offset(slot) != 0
    }

    /// Run `read` on the field's absolute position if it is present,
    /// otherwise return `default`.
    #[inline]
    pub fn lookup_field<R>(&self, slot: VOffset, default: R, read: impl FnOnce(usize) -> R) -> R {
        match self.field_offset(slot) {
            0 => default,
            offset => read(self.loc + usize::from(offset)),
        }
    }

    /// Absolute position of the field, if present.
    #[must_use]
    pub fn field_position(&self, slot: VOffset) -> Option<usize> {
        self.lookup_field(slot, None, Some)
    }

    /// Scalar field, or `default` if absent.
    #[inline]
    #[must_use]
    pub fn get<T: Scalar>(&self, slot: VOffset, default: T) -> T {
        self.lookup_field(slot, default, |pos| read_scalar(self.buf, pos))
    }

    /// Scalar field without a default: `None` when it was never written.
    #[inline]
    #[must_use]
    pub fn get_optional<T: Scalar>(&self, slot: VOffset) -> Option<T> {
        self.lookup_field(slot, None, |pos| Some(read_scalar(self.buf, pos)))
    }

    /// Any [`Follow`] field.
    #[inline]
    #[must_use]
    pub fn get_field<T: Follow<'a>>(&self, slot: VOffset) -> Option<T::Inner> {
        self.lookup_field(slot, None, |pos| Some(T::follow(self.buf, pos)))
    }

    /// String field as raw bytes.
    #[must_use]
    pub fn get_bstr(&self, slot: VOffset) -> Option<&'a BStr> {
        self.lookup_field(slot, None, |pos| {
            Some(BStr::new(read_string_bytes(
                self.buf,
                follow_uoffset(self.buf, pos),
            )))
        })
    }

    /// String field decoded as UTF-8, borrowing unless the bytes are
    /// invalid UTF-8 (those sequences become U+FFFD).
    #[must_use]
    pub fn get_str(&self, slot: VOffset) -> Option<Cow<'a, str>> {
        self.get_bstr(slot).map(|s| {
            let bytes: &'a [u8] = s;
            bytes.to_str_lossy()
        })
    }

    /// Vector field.
    #[must_use]
    pub fn get_vector<T: Follow<'a>>(&self, slot: VOffset) -> Option<Vector<'a, T>> {
        self.lookup_field(slot, None, |pos| {
            Some(Vector::new(self.buf, follow_uoffset(self.buf, pos)))
        })
    }

    /// Length of a vector field; `0` when absent.
    #[must_use]
    pub fn vector_len(&self, slot: VOffset) -> usize {
        self.lookup_field(slot, 0, |pos| {
            read_scalar::<crate::UOffset>(self.buf, follow_uoffset(self.buf, pos)) as usize
        })
    }

    /// Sub-table field.
    #[must_use]
    pub fn get_table(&self, slot: VOffset) -> Option<Table<'a>> {
        self.get_field::<ForwardTable>(slot)
    }

    /// Inline struct field.
    #[must_use]
    pub fn get_struct(&self, slot: VOffset) -> Option<Struct<'a>> {
        self.lookup_field(slot, None, |pos| Some(Struct::new(self.buf, pos)))
    }

    /// Union field made of a `u8` discriminant at `type_slot` and a table at
    /// `value_slot`. `None` when the discriminant is `NONE` (0) or the value
    /// is absent.
    #[must_use]
    pub fn get_union<U: UnionShape<'a>>(
        &self,
        type_slot: VOffset,
        value_slot: VOffset,
    ) -> Option<U> {
        match self.get::<u8>(type_slot, 0) {
            0 => None,
            tag => self
                .get_table(value_slot)
                .map(|table| U::from_tag(tag, table)),
        }
    }

    /// Vector of unions: a `u8` discriminant vector at `type_slot` parallel
    /// to a table vector at `value_slot`.
    #[must_use]
    pub fn get_union_vector<U: UnionShape<'a>>(
        &self,
        type_slot: VOffset,
        value_slot: VOffset,
    ) -> Option<UnionVector<'a, U>> {
        let types = self.get_vector::<u8>(type_slot)?;
        let values = self.get_vector::<ForwardTable>(value_slot)?;
        Some(UnionVector {
            types,
            values,
            _marker: PhantomData,
        })
    }

    /// Root table of a complete buffer stored in a byte-vector field.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError`] if the nested bytes are not a well-formed
    /// buffer root.
    pub fn get_nested_root(&self, slot: VOffset) -> Result<Option<Table<'a>>, ReadError> {
        self.get_vector::<u8>(slot)
            .map(|bytes| root_as_table(bytes.bytes()))
            .transpose()
    }
}

impl fmt::Debug for Table<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("position", &self.loc)
            .field("vtable", &self.vtable())
            .finish()
    }
}

/// A union type: one variant per table shape the discriminant can select.
///
/// Implementations are usually an `enum` with a fallback variant for tags
/// unknown to the reading schema.
pub trait UnionShape<'a>: Sized {
    /// Build the variant for discriminant `tag` (never `0`) over `table`.
    fn from_tag(tag: u8, table: Table<'a>) -> Self;
}

/// A vector of unions.
pub struct UnionVector<'a, U> {
    types: Vector<'a, u8>,
    values: Vector<'a, ForwardTable>,
    _marker: PhantomData<U>,
}

impl<'a, U: UnionShape<'a>> UnionVector<'a, U> {
    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// `true` if the vector has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Discriminant of element `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[must_use]
    pub fn tag(&self, index: usize) -> u8 {
        self.types.get(index)
    }

    /// Element `index`; `None` for a `NONE` discriminant.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()` or the value vector is shorter than the
    /// discriminant vector.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<U> {
        match self.types.get(index) {
            0 => None,
            tag => Some(U::from_tag(tag, self.values.get(index))),
        }
    }
}

impl<U> Clone for UnionVector<'_, U> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<U> Copy for UnionVector<'_, U> {}

/// View of a fixed-layout struct: fields at constant displacements, no
/// vtable and no defaults.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Struct<'a> {
    buf: &'a [u8],
    loc: usize,
}

impl<'a> Struct<'a> {
    /// The struct starting at `loc` of `buf`.
    #[must_use]
    pub const fn new(buf: &'a [u8], loc: usize) -> Self {
        Self { buf, loc }
    }

    /// Re-point this view at the struct at `loc` of `buf`.
    pub fn reset(&mut self, buf: &'a [u8], loc: usize) {
        self.buf = buf;
        self.loc = loc;
    }

    /// Position of the struct in its buffer.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.loc
    }

    /// Scalar member at `displacement` bytes from the struct start.
    ///
    /// # Panics
    ///
    /// Panics if the member lies outside the buffer.
    #[inline]
    #[must_use]
    pub fn get<T: Scalar>(&self, displacement: usize) -> T {
        read_scalar(self.buf, self.loc + displacement)
    }

    /// Nested struct member at `displacement` bytes from the struct start.
    #[must_use]
    pub const fn get_struct(&self, displacement: usize) -> Struct<'a> {
        Struct::new(self.buf, self.loc + displacement)
    }
}

impl fmt::Debug for Struct<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Struct")
            .field("position", &self.loc)
            .finish_non_exhaustive()
    }
}

/// Mutable access to the scalar fields of a table in a finished buffer.
///
/// Only fields that were written can change: the layout is fixed, so an
/// absent field has no storage to write into.
pub struct TableMut<'a> {
    buf: &'a mut [u8],
    loc: usize,
}

impl<'a> TableMut<'a> {
    /// The table starting at `loc` of `buf`.
    #[must_use]
    pub fn new(buf: &'a mut [u8], loc: usize) -> Self {
        Self { buf, loc }
    }

    /// A read view of the same table.
    #[must_use]
    pub fn as_table(&self) -> Table<'_> {
        Table::new(&*self.buf, self.loc)
    }

    /// Overwrite the scalar at `slot`. Returns `false`, writing nothing, if
    /// the field is absent.
    pub fn mutate<T: Scalar>(&mut self, slot: VOffset, value: T) -> bool {
        match self.as_table().field_position(slot) {
            Some(pos) => {
                write_scalar(self.buf, pos, value);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for TableMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableMut")
            .field("position", &self.loc)
            .finish_non_exhaustive()
    }
}
