//! Entry points from raw bytes to a root [`Table`].
//!
//! These are the only reads that validate: the root offset, the root
//! table's vtable offset and the vtable header are checked against the
//! slice before a view is handed out. Everything reached from the root
//! afterwards is read without checks beyond slice indexing.

use core::iter::FusedIterator;

use crate::{
    FILE_IDENTIFIER_LENGTH, SIZE_UOFFSET, SOffset, UOffset, VOffset,
    buffer::read_scalar,
    error::ReadError,
    table::Table,
    vtable::VTABLE_HEADER_SIZE,
};

/// Open `buf` and return its root table.
///
/// # Errors
///
/// Returns [`ReadError`] if the root offset, the root table or its vtable
/// header lies outside `buf`.
///
/// # Examples
///
/// ```rust
/// use flatframe::{Builder, root_as_table};
///
/// let mut builder = Builder::new();
/// builder.start_table(1)?;
/// builder.add_field::<u32>(4, 7, 0)?;
/// let root = builder.end_table()?;
/// builder.finish(root, None)?;
///
/// let table = root_as_table(builder.finished_data()?)?;
/// assert_eq!(table.get::<u32>(4, 0), 7);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn root_as_table(buf: &[u8]) -> Result<Table<'_>, ReadError> {
    ensure_len(buf, SIZE_UOFFSET)?;
    let position = read_scalar::<UOffset>(buf, 0) as usize;
    ensure_in_bounds(buf, position, SIZE_UOFFSET)?;

    let soffset = i64::from(read_scalar::<SOffset>(buf, position));
    let vtable = i64::try_from(position).unwrap_or(i64::MAX) - soffset;
    let vtable = usize::try_from(vtable).map_err(|_| ReadError::OutOfBounds {
        position: 0,
        len: buf.len(),
    })?;
    ensure_in_bounds(buf, vtable, VTABLE_HEADER_SIZE)?;
    let vtable_size = usize::from(read_scalar::<VOffset>(buf, vtable));
    ensure_in_bounds(buf, vtable, vtable_size)?;

    Ok(Table::new(buf, position))
}

/// Open a size-prefixed buffer and return its root table. Bytes past the
/// prefixed size are ignored.
///
/// # Errors
///
/// Returns [`ReadError::BufferTooShort`] if `buf` is shorter than its
/// prefix says, or the errors of [`root_as_table`].
pub fn size_prefixed_root_as_table(buf: &[u8]) -> Result<Table<'_>, ReadError> {
    root_as_table(size_prefixed_payload(buf)?)
}

/// `true` if `buf` carries `identifier` right after its root offset.
///
/// # Errors
///
/// Returns [`ReadError::InvalidFileIdentifier`] if `identifier` is not four
/// ASCII characters, or [`ReadError::BufferTooShort`] if `buf` cannot hold one.
pub fn buffer_has_identifier(
    buf: &[u8],
    identifier: &str,
    size_prefixed: bool,
) -> Result<bool, ReadError> {
    if !identifier.is_ascii() || identifier.len() != FILE_IDENTIFIER_LENGTH {
        return Err(ReadError::InvalidFileIdentifier {
            len: identifier.len(),
        });
    }
    let start = if size_prefixed {
        2 * SIZE_UOFFSET
    } else {
        SIZE_UOFFSET
    };
    ensure_len(buf, start + FILE_IDENTIFIER_LENGTH)?;
    Ok(&buf[start..start + FILE_IDENTIFIER_LENGTH] == identifier.as_bytes())
}

/// Splits a stream of concatenated size-prefixed buffers.
///
/// Each item is one whole frame, prefix included, ready for
/// [`size_prefixed_root_as_table`]. A truncated frame yields one error and
/// ends the iteration.
#[derive(Debug, Clone)]
pub struct SizePrefixedFrames<'a> {
    rest: &'a [u8],
}

impl<'a> SizePrefixedFrames<'a> {
    /// Iterate over the frames of `stream`.
    #[must_use]
    pub fn new(stream: &'a [u8]) -> Self {
        Self { rest: stream }
    }
}

impl<'a> Iterator for SizePrefixedFrames<'a> {
    type Item = Result<&'a [u8], ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        match size_prefixed_payload(self.rest) {
            Ok(payload) => {
                let (frame, rest) = self.rest.split_at(SIZE_UOFFSET + payload.len());
                self.rest = rest;
                Some(Ok(frame))
            }
            Err(err) => {
                self.rest = &[];
                Some(Err(err))
            }
        }
    }
}

impl FusedIterator for SizePrefixedFrames<'_> {}

fn size_prefixed_payload(buf: &[u8]) -> Result<&[u8], ReadError> {
    ensure_len(buf, SIZE_UOFFSET)?;
    let size = read_scalar::<UOffset>(buf, 0) as usize;
    let end = SIZE_UOFFSET.saturating_add(size);
    ensure_len(buf, end)?;
    Ok(&buf[SIZE_UOFFSET..end])
}

fn ensure_len(buf: &[u8], needed: usize) -> Result<(), ReadError> {
    if buf.len() < needed {
        return Err(ReadError::BufferTooShort {
            needed,
            len: buf.len(),
        });
    }
    Ok(())
}

fn ensure_in_bounds(buf: &[u8], position: usize, size: usize) -> Result<(), ReadError> {
    match position.checked_add(size) {
        Some(end) if end <= buf.len() => Ok(()),
        _ => Err(ReadError::OutOfBounds {
            position,
            len: buf.len(),
        }),
    }
}
