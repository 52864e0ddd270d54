//! Back-to-front buffer assembly.
//!
//! The builder fills its buffer from the end towards the start. Every object
//! is complete, and sits at a fixed distance from the end, before anything
//! that refers to it is written, so references are always forward
//! `uoffset`s. [`Offset`] handles record that distance from the end.
//!
//! A typical sequence is: create strings and vectors, `start_table`, add
//! fields, `end_table`, repeat for parents, then `finish` with the root.

use alloc::{collections::BTreeMap, vec::Vec};
use core::{cmp::Ordering, fmt, ops::Deref};

use crate::{
    FILE_IDENTIFIER_LENGTH, SIZE_UOFFSET, SOffset, UOffset, VOffset,
    buffer::{ByteBuf, Scalar, read_scalar, write_scalar},
    error::{BuildError, CapacityError, ReadError},
    follow::{ForwardStr, ForwardTable, ForwardVector},
    offset::Offset,
    options::BuilderOptions,
    root::root_as_table,
    sorted::TableKey,
    table::Table,
    vtable::{VTABLE_HEADER_SIZE, slot_to_field_index},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Open {
    Nothing,
    Table,
    Vector,
}

/// Assembles one buffer at a time.
///
/// All methods take `&mut self`; a builder is driven from a single thread and
/// hands out only an immutable result once finished. Errors abort the object
/// in progress: call [`clear`](Self::clear) before building again.
pub struct Builder {
    buf: ByteBuf,
    /// Start of the written data; everything in `space..capacity` is final.
    space: usize,
    minalign: usize,
    /// Head offset of each field of the open table, `0` when unset.
    field_locs: Vec<UOffset>,
    object_start: UOffset,
    vector_num_elems: usize,
    /// End-relative offsets of every vtable written so far.
    vtables: Vec<UOffset>,
    shared_strings: BTreeMap<Vec<u8>, Offset<ForwardStr>>,
    open: Open,
    finished: bool,
    force_defaults: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// A builder with [`BuilderOptions::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(BuilderOptions::default())
    }

    /// A builder whose buffer starts at `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_options(BuilderOptions {
            initial_capacity: capacity,
            ..BuilderOptions::default()
        })
    }

    /// A builder configured by `options`.
    #[must_use]
    pub fn with_options(options: BuilderOptions) -> Self {
        let buf = ByteBuf::with_capacity(options.initial_capacity);
        Self {
            space: buf.capacity(),
            buf,
            minalign: 1,
            field_locs: Vec::new(),
            object_start: 0,
            vector_num_elems: 0,
            vtables: Vec::new(),
            shared_strings: BTreeMap::new(),
            open: Open::Nothing,
            finished: false,
            force_defaults: options.force_defaults,
        }
    }

    /// Forget everything written. Capacity is kept; the vtable cache and the
    /// shared-string pool are dropped.
    pub fn clear(&mut self) {
        self.space = self.buf.capacity();
        self.minalign = 1;
        self.field_locs.clear();
        self.object_start = 0;
        self.vector_num_elems = 0;
        self.vtables.clear();
        self.shared_strings.clear();
        self.open = Open::Nothing;
        self.finished = false;
    }

    /// Write scalar fields even when they equal their default.
    pub fn force_defaults(&mut self, force: bool) {
        self.force_defaults = force;
    }

    /// Size of the backing buffer.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Bytes written so far, which is also the end-relative offset of the
    /// most recently written byte.
    #[must_use]
    pub fn offset(&self) -> UOffset {
        to_uoffset(self.buf.capacity() - self.space)
    }

    /// Number of distinct vtables written.
    #[must_use]
    pub fn vtable_count(&self) -> usize {
        self.vtables.len()
    }

    // ───────────────────────────── low level ─────────────────────────────

    /// Prepare to write `size` bytes aligned to `size`, after which
    /// `additional` more bytes will be written.
    ///
    /// Pads so that the element lands on a multiple of `size` counted from the
    /// end of the buffer, grows the buffer if needed, and raises the buffer's
    /// overall alignment. Struct writers call this once with the struct's
    /// alignment and size, then use [`pad`](Self::pad) and
    /// [`put`](Self::put).
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::AlreadyFinished`] after [`finish`](Self::finish),
    /// or a capacity error if the buffer cannot grow enough.
    pub fn prep(&mut self, size: usize, additional: usize) -> Result<(), BuildError> {
        debug_assert!(size.is_power_of_two(), "alignment {size} is not a power of two");
        self.not_finished()?;
        self.minalign = self.minalign.max(size);
        let written = self.buf.capacity() - self.space;
        let unaligned = written
            .checked_add(additional)
            .ok_or(CapacityError::new(usize::MAX))?;
        let align_size = unaligned.wrapping_neg() & (size - 1);
        let needed = align_size + size + additional;
        if self.space < needed {
            let old_capacity = self.buf.capacity();
            let wanted = old_capacity
                .checked_add(needed - self.space)
                .ok_or(CapacityError::new(usize::MAX))?;
            self.buf.request_capacity(wanted, true)?;
            self.space += self.buf.capacity() - old_capacity;
        }
        self.pad(align_size);
        Ok(())
    }

    /// Write `n` zero bytes. Room must have been made with
    /// [`prep`](Self::prep).
    ///
    /// # Panics
    ///
    /// Panics if fewer than `n` bytes are free.
    pub fn pad(&mut self, n: usize) {
        assert!(self.space >= n, "pad of {n} bytes without prep");
        let start = self.space - n;
        self.buf.data_mut()[start..self.space].fill(0);
        self.space = start;
    }

    /// Write a scalar without alignment or growth. Room must have been made
    /// with [`prep`](Self::prep).
    ///
    /// # Panics
    ///
    /// Panics if fewer than `T::SIZE` bytes are free.
    #[inline]
    pub fn put<T: Scalar>(&mut self, value: T) {
        assert!(self.space >= T::SIZE, "put of {} bytes without prep", T::SIZE);
        self.space -= T::SIZE;
        write_scalar(self.buf.data_mut(), self.space, value);
    }

    /// Align for and write a scalar.
    ///
    /// # Errors
    ///
    /// As [`prep`](Self::prep).
    #[inline]
    pub fn add<T: Scalar>(&mut self, value: T) -> Result<(), BuildError> {
        self.prep(T::SIZE, 0)?;
        self.put(value);
        Ok(())
    }

    /// Align for and write a `uoffset` referring to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::DanglingOffset`] if `target` was not written by
    /// this builder, or a capacity error.
    pub fn add_offset<T>(&mut self, target: Offset<T>) -> Result<(), BuildError> {
        self.prep(SIZE_UOFFSET, 0)?;
        let head = self.offset();
        if target.value() > head {
            return Err(BuildError::DanglingOffset {
                offset: target.value(),
                head,
            });
        }
        self.put::<UOffset>(head - target.value() + to_uoffset(SIZE_UOFFSET));
        Ok(())
    }

    // ───────────────────────────── tables ─────────────────────────────

    /// Open a table with room for `num_fields` fields (slots `4` to
    /// `4 + 2 * (num_fields - 1)`).
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::NestedObject`] if a table or vector is already
    /// open.
    pub fn start_table(&mut self, num_fields: usize) -> Result<(), BuildError> {
        self.not_nested()?;
        self.field_locs.clear();
        self.field_locs.resize(num_fields, 0);
        self.object_start = self.offset();
        self.open = Open::Table;
        Ok(())
    }

    /// Add a scalar field, omitting it when it equals `default` (unless
    /// defaults are forced).
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::NotNested`] outside a table,
    /// [`BuildError::FieldOutOfRange`] for a bad slot, or a capacity error.
    pub fn add_field<T: Scalar>(
        &mut self,
        slot: VOffset,
        value: T,
        default: T,
    ) -> Result<(), BuildError> {
        let index = self.field_index(slot)?;
        if value.same_bits(default) && !self.force_defaults {
            return Ok(());
        }
        self.add(value)?;
        self.field_locs[index] = self.offset();
        Ok(())
    }

    /// Add a scalar field with no default: `Some` is always written, `None`
    /// never is.
    ///
    /// # Errors
    ///
    /// As [`add_field`](Self::add_field).
    pub fn add_field_optional<T: Scalar>(
        &mut self,
        slot: VOffset,
        value: Option<T>,
    ) -> Result<(), BuildError> {
        let index = self.field_index(slot)?;
        if let Some(value) = value {
            self.add(value)?;
            self.field_locs[index] = self.offset();
        }
        Ok(())
    }

    /// Add a field referring to a string, vector or table.
    ///
    /// # Errors
    ///
    /// As [`add_field`](Self::add_field), plus
    /// [`BuildError::DanglingOffset`].
    pub fn add_field_offset<T>(&mut self, slot: VOffset, target: Offset<T>) -> Result<(), BuildError> {
        let index = self.field_index(slot)?;
        self.add_offset(target)?;
        self.field_locs[index] = self.offset();
        Ok(())
    }

    /// Record a struct written immediately before this call as the field at
    /// `slot`. Structs live inline in their table.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::StructNotInline`] if anything was written after
    /// the struct, plus the errors of [`add_field`](Self::add_field).
    pub fn add_struct<T>(&mut self, slot: VOffset, value: Offset<T>) -> Result<(), BuildError> {
        let index = self.field_index(slot)?;
        let head = self.offset();
        if value.value() != head {
            return Err(BuildError::StructNotInline {
                offset: value.value(),
                head,
            });
        }
        self.field_locs[index] = head;
        Ok(())
    }

    /// Close the open table: write its vtable offset, then either reuse an
    /// identical vtable or write a new one.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::NotNested`] if no table is open,
    /// [`BuildError::TableTooLarge`], or a capacity error.
    pub fn end_table(&mut self) -> Result<Offset<ForwardTable>, BuildError> {
        if self.open != Open::Table {
            return Err(BuildError::NotNested);
        }
        self.add::<SOffset>(0)?;
        let table_loc = self.offset();

        let used = self
            .field_locs
            .iter()
            .rposition(|&loc| loc != 0)
            .map_or(0, |last| last + 1);
        for index in (0..used).rev() {
            let loc = self.field_locs[index];
            let entry = if loc == 0 { 0 } else { table_loc - loc };
            self.add::<VOffset>(to_voffset(entry)?)?;
        }
        self.add::<VOffset>(to_voffset(table_loc - self.object_start)?)?;
        let vtable_size = (used * 2) + VTABLE_HEADER_SIZE;
        self.add::<VOffset>(to_voffset(to_uoffset(vtable_size))?)?;

        let capacity = self.buf.capacity();
        let data = self.buf.data();
        let candidate = &data[self.space..self.space + vtable_size];
        let existing = self.vtables.iter().copied().find(|&vt| {
            let start = capacity - vt as usize;
            let len = usize::from(read_scalar::<VOffset>(data, start));
            len == vtable_size && data[start..start + len] == *candidate
        });

        let table_pos = capacity - table_loc as usize;
        match existing {
            Some(vt) => {
                self.space = table_pos;
                write_scalar(self.buf.data_mut(), table_pos, soffset_between(vt, table_loc));
            }
            None => {
                debug_assert_eq!(
                    usize::from(read_scalar::<VOffset>(self.buf.data(), self.space)),
                    vtable_size,
                    "vtable header disagrees with its field count"
                );
                let vt = self.offset();
                self.vtables.push(vt);
                write_scalar(self.buf.data_mut(), table_pos, soffset_between(vt, table_loc));
            }
        }

        self.field_locs.clear();
        self.open = Open::Nothing;
        Ok(Offset::new(table_loc))
    }

    /// Check that the field at `slot` of a finished table was set.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingRequiredField`] when it was not, or
    /// [`BuildError::DanglingOffset`] if `table` was not written by this
    /// builder.
    pub fn required(&self, table: Offset<ForwardTable>, slot: VOffset) -> Result<(), BuildError> {
        self.written(table)?;
        if self.table_view(table).has_field(slot) {
            Ok(())
        } else {
            Err(BuildError::MissingRequiredField { slot })
        }
    }

    // ───────────────────────────── vectors ─────────────────────────────

    /// Open a vector of `num_elems` elements of `elem_size` bytes each,
    /// aligned to `alignment`. Elements are then written last to first with
    /// [`add`](Self::add), [`add_offset`](Self::add_offset) or struct
    /// writers, and the vector is closed with [`end_vector`](Self::end_vector).
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::NestedObject`] if a table or vector is already
    /// open, or a capacity error.
    pub fn start_vector(
        &mut self,
        elem_size: usize,
        num_elems: usize,
        alignment: usize,
    ) -> Result<(), BuildError> {
        self.not_nested()?;
        let payload = elem_size
            .checked_mul(num_elems)
            .ok_or(CapacityError::new(usize::MAX))?;
        self.prep(SIZE_UOFFSET, payload)?;
        self.prep(alignment, payload)?;
        self.vector_num_elems = num_elems;
        self.open = Open::Vector;
        Ok(())
    }

    /// Close the open vector by writing its element count.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::NotNested`] if no vector is open.
    pub fn end_vector<T>(&mut self) -> Result<Offset<ForwardVector<T>>, BuildError> {
        if self.open != Open::Vector {
            return Err(BuildError::NotNested);
        }
        self.put::<UOffset>(to_uoffset(self.vector_num_elems));
        self.open = Open::Nothing;
        Ok(Offset::new(self.offset()))
    }

    /// Open a vector and hand out its zeroed element bytes for the caller to
    /// fill. Close it with [`end_vector`](Self::end_vector).
    ///
    /// # Errors
    ///
    /// As [`start_vector`](Self::start_vector).
    pub fn create_uninitialized_vector(
        &mut self,
        elem_size: usize,
        num_elems: usize,
        alignment: usize,
    ) -> Result<&mut [u8], BuildError> {
        self.start_vector(elem_size, num_elems, alignment)?;
        let len = elem_size * num_elems;
        let end = self.space;
        self.space -= len;
        let bytes = &mut self.buf.data_mut()[self.space..end];
        bytes.fill(0);
        Ok(bytes)
    }

    /// Vector of scalars, in slice order.
    ///
    /// # Errors
    ///
    /// As [`start_vector`](Self::start_vector).
    pub fn create_vector<T: Scalar>(&mut self, items: &[T]) -> Result<Offset<ForwardVector<T>>, BuildError> {
        self.start_vector(T::SIZE, items.len(), T::SIZE)?;
        for &item in items.iter().rev() {
            self.put(item);
        }
        self.end_vector()
    }

    /// Vector of raw bytes.
    ///
    /// # Errors
    ///
    /// As [`start_vector`](Self::start_vector).
    pub fn create_byte_vector(&mut self, bytes: &[u8]) -> Result<Offset<ForwardVector<u8>>, BuildError> {
        self.start_vector(1, bytes.len(), 1)?;
        self.put_bytes(bytes);
        self.end_vector()
    }

    /// Vector of references to strings, vectors or tables, in slice order.
    ///
    /// # Errors
    ///
    /// As [`start_vector`](Self::start_vector), plus
    /// [`BuildError::DanglingOffset`].
    pub fn create_vector_of_offsets<T>(
        &mut self,
        items: &[Offset<T>],
    ) -> Result<Offset<ForwardVector<T>>, BuildError> {
        self.start_vector(SIZE_UOFFSET, items.len(), SIZE_UOFFSET)?;
        for &item in items.iter().rev() {
            self.add_offset(item)?;
        }
        self.end_vector()
    }

    /// Write every string, then a vector referring to them in slice order.
    ///
    /// # Errors
    ///
    /// As [`create_vector_of_offsets`](Self::create_vector_of_offsets).
    pub fn create_vector_of_strings<S: AsRef<str>>(
        &mut self,
        items: &[S],
    ) -> Result<Offset<ForwardVector<ForwardStr>>, BuildError> {
        let offsets = items
            .iter()
            .map(|s| self.create_string(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        self.create_vector_of_offsets(&offsets)
    }

    /// Sort finished tables ascending by key `K`, then write a vector of
    /// them. Readers can then binary-search it with
    /// [`Vector::lookup_by_key`](crate::Vector::lookup_by_key).
    ///
    /// `tables` is reordered in place.
    ///
    /// # Errors
    ///
    /// As [`create_vector_of_offsets`](Self::create_vector_of_offsets).
    pub fn create_sorted_vector_of_tables<K: TableKey>(
        &mut self,
        tables: &mut [Offset<ForwardTable>],
    ) -> Result<Offset<ForwardVector<ForwardTable>>, BuildError> {
        self.create_sorted_vector_of_tables_by(tables, K::compare_tables)
    }

    /// Like [`create_sorted_vector_of_tables`](Self::create_sorted_vector_of_tables)
    /// with an explicit comparator over the tables' views.
    ///
    /// # Errors
    ///
    /// As [`create_vector_of_offsets`](Self::create_vector_of_offsets).
    pub fn create_sorted_vector_of_tables_by<F>(
        &mut self,
        tables: &mut [Offset<ForwardTable>],
        mut compare: F,
    ) -> Result<Offset<ForwardVector<ForwardTable>>, BuildError>
    where
        F: FnMut(&Table<'_>, &Table<'_>) -> Ordering,
    {
        for &table in tables.iter() {
            self.written(table)?;
        }
        tables.sort_by(|a, b| compare(&self.table_view(*a), &self.table_view(*b)));
        self.create_vector_of_offsets(tables)
    }

    // ───────────────────────────── strings ─────────────────────────────

    /// Write a string: length, UTF-8 bytes and a NUL terminator.
    ///
    /// # Errors
    ///
    /// As [`start_vector`](Self::start_vector).
    pub fn create_string(&mut self, value: &str) -> Result<Offset<ForwardStr>, BuildError> {
        self.create_byte_string(value.as_bytes())
    }

    /// Write a string from raw bytes, which are stored unvalidated.
    ///
    /// # Errors
    ///
    /// As [`start_vector`](Self::start_vector).
    pub fn create_byte_string(&mut self, value: &[u8]) -> Result<Offset<ForwardStr>, BuildError> {
        self.not_nested()?;
        self.add::<u8>(0)?;
        self.start_vector(1, value.len(), 1)?;
        self.put_bytes(value);
        self.end_vector::<u8>().map(|v| Offset::new(v.value()))
    }

    /// Write a string once per builder run: later calls with the same
    /// content return the first call's offset.
    ///
    /// # Errors
    ///
    /// As [`create_string`](Self::create_string).
    pub fn create_shared_string(&mut self, value: &str) -> Result<Offset<ForwardStr>, BuildError> {
        self.not_finished()?;
        if let Some(&existing) = self.shared_strings.get(value.as_bytes()) {
            return Ok(existing);
        }
        let offset = self.create_string(value)?;
        self.shared_strings.insert(value.as_bytes().to_vec(), offset);
        Ok(offset)
    }

    // ───────────────────────────── finishing ─────────────────────────────

    /// Write the root offset, preceded by the optional four-byte file
    /// identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidFileIdentifier`] if the identifier is
    /// not four ASCII characters, [`BuildError::NestedObject`] if an object
    /// is still open, [`BuildError::AlreadyFinished`] on a second call,
    /// [`BuildError::DanglingOffset`], or a capacity error.
    pub fn finish(
        &mut self,
        root: Offset<ForwardTable>,
        file_identifier: Option<&str>,
    ) -> Result<(), BuildError> {
        self.finish_with(root, file_identifier, false)
    }

    /// Like [`finish`](Self::finish), then prefix the buffer with its size
    /// so buffers can be concatenated in a stream.
    ///
    /// # Errors
    ///
    /// As [`finish`](Self::finish).
    pub fn finish_size_prefixed(
        &mut self,
        root: Offset<ForwardTable>,
        file_identifier: Option<&str>,
    ) -> Result<(), BuildError> {
        self.finish_with(root, file_identifier, true)
    }

    fn finish_with(
        &mut self,
        root: Offset<ForwardTable>,
        file_identifier: Option<&str>,
        size_prefixed: bool,
    ) -> Result<(), BuildError> {
        if let Some(ident) = file_identifier
            .filter(|ident| !ident.is_ascii() || ident.len() != FILE_IDENTIFIER_LENGTH)
        {
            return Err(BuildError::InvalidFileIdentifier { len: ident.len() });
        }
        self.not_nested()?;

        let mut trailer = SIZE_UOFFSET;
        if file_identifier.is_some() {
            trailer += FILE_IDENTIFIER_LENGTH;
        }
        if size_prefixed {
            trailer += SIZE_UOFFSET;
        }
        let alignment = self.minalign.max(SIZE_UOFFSET);
        self.prep(alignment, trailer)?;
        if let Some(ident) = file_identifier {
            self.put_bytes(ident.as_bytes());
        }
        self.add_offset(root)?;
        if size_prefixed {
            let size = self.offset();
            self.put::<UOffset>(size);
        }
        self.finished = true;
        Ok(())
    }

    /// `true` once [`finish`](Self::finish) succeeded.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The finished buffer.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::NotFinished`] before [`finish`](Self::finish).
    pub fn finished_data(&self) -> Result<&[u8], BuildError> {
        if !self.finished {
            return Err(BuildError::NotFinished);
        }
        Ok(&self.buf.data()[self.space..])
    }

    /// A copy of the finished buffer.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::NotFinished`] before [`finish`](Self::finish).
    pub fn sized_bytes(&self) -> Result<Vec<u8>, BuildError> {
        self.finished_data().map(<[u8]>::to_vec)
    }

    /// Consume the builder and keep only the finished bytes.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::NotFinished`] before [`finish`](Self::finish).
    pub fn into_finished(self) -> Result<FinishedBuffer, BuildError> {
        if !self.finished {
            return Err(BuildError::NotFinished);
        }
        let space = self.space;
        let mut bytes = self.buf.into_vec();
        bytes.drain(..space);
        Ok(FinishedBuffer { bytes })
    }

    // ───────────────────────────── helpers ─────────────────────────────

    fn not_finished(&self) -> Result<(), BuildError> {
        if self.finished {
            Err(BuildError::AlreadyFinished)
        } else {
            Ok(())
        }
    }

    fn not_nested(&self) -> Result<(), BuildError> {
        self.not_finished()?;
        if self.open == Open::Nothing {
            Ok(())
        } else {
            Err(BuildError::NestedObject)
        }
    }

    /// `table` must refer to an object already written below the head.
    fn written<T>(&self, table: Offset<T>) -> Result<(), BuildError> {
        let head = self.offset();
        if table.value() == 0 || table.value() > head {
            return Err(BuildError::DanglingOffset {
                offset: table.value(),
                head,
            });
        }
        Ok(())
    }

    fn field_index(&self, slot: VOffset) -> Result<usize, BuildError> {
        if self.open != Open::Table {
            return Err(BuildError::NotNested);
        }
        slot_to_field_index(slot)
            .filter(|&index| index < self.field_locs.len())
            .ok_or(BuildError::FieldOutOfRange {
                slot,
                fields: self.field_locs.len(),
            })
    }

    /// Copy `bytes` below the head. Room must have been made with `prep`.
    fn put_bytes(&mut self, bytes: &[u8]) {
        let end = self.space;
        self.space -= bytes.len();
        self.buf.data_mut()[self.space..end].copy_from_slice(bytes);
    }

    fn table_view(&self, table: Offset<ForwardTable>) -> Table<'_> {
        let data = self.buf.data();
        Table::new(data, data.len() - table.value() as usize)
    }
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("capacity", &self.buf.capacity())
            .field("offset", &self.offset())
            .field("minalign", &self.minalign)
            .field("vtables", &self.vtables.len())
            .field("shared_strings", &self.shared_strings.len())
            .field("open", &self.open)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

/// The bytes of a finished buffer, detached from its builder.
#[derive(Clone, PartialEq, Eq)]
pub struct FinishedBuffer {
    bytes: Vec<u8>,
}

impl FinishedBuffer {
    /// The root table.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError`] if the buffer was size-prefixed; use
    /// [`size_prefixed_root_as_table`](crate::size_prefixed_root_as_table)
    /// for those.
    pub fn root(&self) -> Result<Table<'_>, ReadError> {
        root_as_table(&self.bytes)
    }

    /// The finished bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Take the finished bytes.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }
}

impl Deref for FinishedBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsRef<[u8]> for FinishedBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for FinishedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FinishedBuffer")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

/// Buffers never exceed [`MAX_BUFFER_SIZE`](crate::MAX_BUFFER_SIZE), which
/// fits in a `u32`.
#[allow(clippy::cast_possible_truncation)]
fn to_uoffset(n: usize) -> UOffset {
    debug_assert!(n <= crate::MAX_BUFFER_SIZE);
    n as UOffset
}

fn to_voffset(n: UOffset) -> Result<VOffset, BuildError> {
    VOffset::try_from(n).map_err(|_| BuildError::TableTooLarge { size: n as usize })
}

/// `table - vtable` as stored in a table's first four bytes, from both
/// objects' end-relative offsets.
#[allow(clippy::cast_possible_wrap)]
fn soffset_between(vtable: UOffset, table: UOffset) -> SOffset {
    vtable.wrapping_sub(table) as SOffset
}
