//! Field-offset resolution through vtables.
//!
//! A table starts with a signed 32-bit offset to its vtable:
//! `vtable = table - soffset`. The vtable is a run of little-endian `u16`:
//!
//! ```text
//! [vtable byte size][table inline byte size][slot 4][slot 6]...
//! ```
//!
//! Fields are addressed by their *slot*, the byte offset of their entry in
//! the vtable (`4 + 2 * field_index`). A slot at or beyond the vtable size,
//! or an entry of zero, means the field is absent. That single rule lets a
//! reader built against a newer schema open an older buffer (its extra slots
//! fall off the end of the shorter vtable) and the other way round.

use crate::{SOffset, VOffset, buffer::read_scalar};

/// Bytes taken by the two header entries of every vtable.
pub const VTABLE_HEADER_SIZE: usize = 2 * core::mem::size_of::<VOffset>();

/// Vtable slot of the field with index `field_index`.
#[must_use]
pub const fn field_index_to_slot(field_index: u16) -> VOffset {
    (VTABLE_HEADER_SIZE as VOffset) + field_index * (core::mem::size_of::<VOffset>() as VOffset)
}

/// Field index addressed by `slot`, if `slot` is a valid field slot.
#[must_use]
pub const fn slot_to_field_index(slot: VOffset) -> Option<usize> {
    let slot = slot as usize;
    if slot < VTABLE_HEADER_SIZE || slot % 2 != 0 {
        None
    } else {
        Some((slot - VTABLE_HEADER_SIZE) / 2)
    }
}

/// Position of the vtable referenced by the table at `table_pos`.
///
/// # Panics
///
/// Panics if `table_pos` does not leave room for the 4-byte vtable offset or
/// if the resulting position falls outside `buf`.
#[inline]
#[must_use]
pub fn vtable_position(buf: &[u8], table_pos: usize) -> usize {
    let soffset = read_scalar::<SOffset>(buf, table_pos);
    let position = i64::try_from(table_pos).unwrap_or(i64::MAX) - i64::from(soffset);
    usize::try_from(position).unwrap_or_else(|_| {
        panic!("vtable of table at {table_pos} resolves before the start of the buffer")
    })
}

/// Resolve `slot` of the table at `table_pos`.
///
/// Returns the field's byte offset relative to `table_pos`, or `0` when the
/// field is absent.
#[inline]
#[must_use]
pub fn resolve_field_offset(buf: &[u8], table_pos: usize, slot: VOffset) -> VOffset {
    VTable::at(buf, vtable_position(buf, table_pos)).get(slot)
}

/// A vtable located inside a buffer.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct VTable<'a> {
    buf: &'a [u8],
    loc: usize,
}

impl<'a> VTable<'a> {
    /// The vtable stored at `loc` of `buf`.
    #[must_use]
    pub const fn at(buf: &'a [u8], loc: usize) -> Self {
        Self { buf, loc }
    }

    /// The vtable used by the table at `table_pos`.
    #[must_use]
    pub fn of_table(buf: &'a [u8], table_pos: usize) -> Self {
        Self::at(buf, vtable_position(buf, table_pos))
    }

    /// Position of the vtable in its buffer.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.loc
    }

    /// Size of the vtable in bytes, header included.
    #[must_use]
    pub fn num_bytes(&self) -> usize {
        usize::from(read_scalar::<VOffset>(self.buf, self.loc))
    }

    /// Number of field entries.
    #[must_use]
    pub fn num_fields(&self) -> usize {
        self.num_bytes().saturating_sub(VTABLE_HEADER_SIZE) / 2
    }

    /// Inline size of the owning table in bytes, including its vtable offset.
    #[must_use]
    pub fn object_inline_num_bytes(&self) -> usize {
        usize::from(read_scalar::<VOffset>(self.buf, self.loc + 2))
    }

    /// Entry for `slot`: the field offset relative to the table, or `0`.
    #[inline]
    #[must_use]
    pub fn get(&self, slot: VOffset) -> VOffset {
        if usize::from(slot) >= self.num_bytes() {
            return 0;
        }
        read_scalar::<VOffset>(self.buf, self.loc + usize::from(slot))
    }

    /// Raw vtable bytes, header included.
    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        &self.buf[self.loc..self.loc + self.num_bytes()]
    }
}

impl core::fmt::Debug for VTable<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut list = f.debug_list();
        for index in 0..self.num_fields() {
            let slot = field_index_to_slot(u16::try_from(index).unwrap_or(u16::MAX));
            list.entry(&self.get(slot));
        }
        list.finish()
    }
}
