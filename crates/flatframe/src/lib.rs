//! Zero-copy, schema-evolvable binary tables.
//!
//! A producer assembles one contiguous little-endian buffer of nested
//! tables, structs, vectors, strings and unions with a [`Builder`]. A
//! consumer opens the bytes with [`root_as_table`] and reads fields straight
//! out of them through [`Table`], [`Struct`] and [`Vector`] views, without
//! parsing or allocating.
//!
//! Tables carry a vtable of 16-bit field offsets. A field whose vtable slot
//! is missing or zero reads as its default, which is what lets readers and
//! writers built against different versions of a schema exchange buffers.
//!
//! Accessors for a concrete schema are thin wrappers that pass each
//! field's vtable slot and default:
//!
//! ```rust
//! use flatframe::{Builder, Table, root_as_table};
//!
//! struct Monster<'a>(Table<'a>);
//!
//! impl Monster<'_> {
//!     const NAME: u16 = 4;
//!     const MANA: u16 = 6;
//!
//!     fn name(&self) -> Option<std::borrow::Cow<'_, str>> {
//!         self.0.get_str(Self::NAME)
//!     }
//!
//!     fn mana(&self) -> i16 {
//!         self.0.get(Self::MANA, 150)
//!     }
//! }
//!
//! let mut builder = Builder::new();
//! let name = builder.create_string("Frodo")?;
//! builder.start_table(2)?;
//! builder.add_field_offset(Monster::NAME, name)?;
//! builder.add_field::<i16>(Monster::MANA, 150, 150)?;
//! let root = builder.end_table()?;
//! builder.finish(root, None)?;
//!
//! let monster = Monster(root_as_table(builder.finished_data()?)?);
//! assert_eq!(monster.name().as_deref(), Some("Frodo"));
//! assert_eq!(monster.mana(), 150);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod buffer;
mod builder;
mod error;
mod follow;
mod offset;
mod options;
mod root;
mod sorted;
mod table;
mod vector;
mod vtable;

#[cfg(test)]
mod tests;

pub use buffer::{ByteBuf, MAX_BUFFER_SIZE, ReadBuf, Scalar, read_scalar, write_scalar};
pub use builder::{Builder, FinishedBuffer};
pub use error::{BuildError, CapacityError, ReadError};
pub use follow::{Follow, ForwardStr, ForwardTable, ForwardVector, InlineStruct, follow_uoffset};
pub use offset::Offset;
pub use options::BuilderOptions;
pub use root::{SizePrefixedFrames, buffer_has_identifier, root_as_table, size_prefixed_root_as_table};
pub use sorted::{ScalarKey, StrKey, TableKey, compare_string_with_key, compare_strings};
pub use table::{Struct, Table, TableMut, UnionShape, UnionVector};
pub use vector::{Vector, VectorIter};
pub use vtable::{VTable, field_index_to_slot, resolve_field_offset, slot_to_field_index};

#[cfg(feature = "fuzzing")]
#[doc(hidden)]
pub use {follow::read_string_bytes, vtable::vtable_position};

/// Unsigned 32-bit offset to an object at a higher address.
pub type UOffset = u32;
/// Signed 32-bit offset from a table to its vtable.
pub type SOffset = i32;
/// 16-bit vtable entry, and the type of vtable slots.
pub type VOffset = u16;

/// Size of a [`UOffset`] in bytes.
pub const SIZE_UOFFSET: usize = core::mem::size_of::<UOffset>();
/// Length of a file identifier in bytes.
pub const FILE_IDENTIFIER_LENGTH: usize = 4;
