//! Error types for building and opening buffers.

use thiserror::Error;

use crate::{UOffset, VOffset};

/// The backing buffer cannot grow to the requested size.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cannot grow buffer to {requested} bytes (limit is {limit} bytes)")]
pub struct CapacityError {
    /// Requested capacity in bytes, saturated at `usize::MAX` when the size
    /// computation itself overflowed.
    pub requested: usize,
    /// The hard ceiling, [`MAX_BUFFER_SIZE`](crate::MAX_BUFFER_SIZE).
    pub limit: usize,
}

impl CapacityError {
    pub(crate) fn new(requested: usize) -> Self {
        Self {
            requested,
            limit: crate::MAX_BUFFER_SIZE,
        }
    }
}

/// Errors raised while assembling a buffer with [`Builder`](crate::Builder).
///
/// Any of these aborts the object currently being built; the builder should
/// be [`clear`](crate::Builder::clear)ed before it is reused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The backing buffer hit its size ceiling.
    #[error(transparent)]
    Capacity(#[from] CapacityError),
    /// A field the schema marks as required was never set.
    #[error("required field at vtable slot {slot} was not set")]
    MissingRequiredField {
        /// Vtable slot (byte offset inside the vtable) of the missing field.
        slot: VOffset,
    },
    /// File identifiers are exactly four ASCII characters.
    #[error("file identifier must be {expected} ASCII characters, got {len} bytes", expected = crate::FILE_IDENTIFIER_LENGTH)]
    InvalidFileIdentifier {
        /// Length of the rejected identifier in bytes.
        len: usize,
    },
    /// A table, vector or string was started while another one is open.
    #[error("cannot start an object while another table or vector is open")]
    NestedObject,
    /// `end_table`/`end_vector` was called with nothing open.
    #[error("no table or vector is open")]
    NotNested,
    /// The slot does not fit the field count given to `start_table`.
    #[error("vtable slot {slot} is outside the {fields} fields of the open table")]
    FieldOutOfRange {
        /// Offending vtable slot.
        slot: VOffset,
        /// Field count passed to `start_table`.
        fields: usize,
    },
    /// The offset does not refer to data already written by this builder.
    #[error("offset {offset} refers past the builder head at {head}")]
    DanglingOffset {
        /// The rejected offset, measured from the end of the buffer.
        offset: UOffset,
        /// Current head, measured from the end of the buffer.
        head: UOffset,
    },
    /// Structs live inline: they must be written right before they are added.
    #[error("struct at offset {offset} is not at the builder head {head}")]
    StructNotInline {
        /// Offset returned when the struct was written.
        offset: UOffset,
        /// Current head, measured from the end of the buffer.
        head: UOffset,
    },
    /// A table's inline part outgrew the 16-bit offsets a vtable can hold.
    #[error("table of {size} bytes does not fit 16-bit vtable offsets")]
    TableTooLarge {
        /// Inline size of the rejected table in bytes.
        size: usize,
    },
    /// Finished data was requested before `finish`.
    #[error("buffer has not been finished")]
    NotFinished,
    /// Nothing can be written after `finish` until the builder is cleared.
    #[error("buffer is already finished; clear the builder to build another")]
    AlreadyFinished,
}

/// Errors raised when a byte slice is opened as a buffer.
///
/// Only entry points return these. Once a [`Table`](crate::Table) view
/// exists, reads trust the layout and out-of-range accesses panic.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadError {
    /// The slice is shorter than the fixed header being read.
    #[error("buffer too short: need {needed} bytes, have {len}")]
    BufferTooShort {
        /// Bytes required.
        needed: usize,
        /// Bytes available.
        len: usize,
    },
    /// An offset points outside the slice.
    #[error("position {position} is outside the buffer of {len} bytes")]
    OutOfBounds {
        /// Resolved position.
        position: usize,
        /// Buffer length.
        len: usize,
    },
    /// File identifiers are exactly four ASCII characters.
    #[error("file identifier must be {expected} ASCII characters, got {len} bytes", expected = crate::FILE_IDENTIFIER_LENGTH)]
    InvalidFileIdentifier {
        /// Length of the rejected identifier in bytes.
        len: usize,
    },
}
