//! Binary search over key-sorted table vectors.
//!
//! A vector written by
//! [`Builder::create_sorted_vector_of_tables`](crate::Builder::create_sorted_vector_of_tables)
//! is ordered ascending by one key field. Lookups resolve only that field
//! of each probed table; nothing else is decoded.

use core::{cmp::Ordering, marker::PhantomData};

use crate::{
    VOffset,
    buffer::Scalar,
    follow::{ForwardTable, follow_uoffset, read_string_bytes},
    table::Table,
    vector::Vector,
};

/// The key field of a table type.
pub trait TableKey {
    /// What callers search with.
    type Key: ?Sized;

    /// Order two tables by their keys.
    fn compare_tables(a: &Table<'_>, b: &Table<'_>) -> Ordering;

    /// Order a table's key against `key`.
    fn compare_with_key(table: &Table<'_>, key: &Self::Key) -> Ordering;
}

/// String key at `SLOT`. Absent keys sort as the empty string; bytes
/// compare unsigned.
#[derive(Debug, Clone, Copy)]
pub enum StrKey<const SLOT: VOffset> {}

impl<const SLOT: VOffset> TableKey for StrKey<SLOT> {
    type Key = [u8];

    fn compare_tables(a: &Table<'_>, b: &Table<'_>) -> Ordering {
        key_bytes(a, SLOT).cmp(key_bytes(b, SLOT))
    }

    fn compare_with_key(table: &Table<'_>, key: &[u8]) -> Ordering {
        key_bytes(table, SLOT).cmp(key)
    }
}

fn key_bytes<'a>(table: &Table<'a>, slot: VOffset) -> &'a [u8] {
    table.get_bstr(slot).map(|s| &**s).unwrap_or_default()
}

/// Scalar key at `SLOT`, with `T::default()` for absent keys. Incomparable
/// floats (NaN) compare equal.
pub struct ScalarKey<T, const SLOT: VOffset>(PhantomData<T>);

impl<T, const SLOT: VOffset> TableKey for ScalarKey<T, SLOT>
where
    T: Scalar + PartialOrd + Default,
{
    type Key = T;

    fn compare_tables(a: &Table<'_>, b: &Table<'_>) -> Ordering {
        compare_scalars(a.get(SLOT, T::default()), b.get(SLOT, T::default()))
    }

    fn compare_with_key(table: &Table<'_>, key: &T) -> Ordering {
        compare_scalars(table.get(SLOT, T::default()), *key)
    }
}

fn compare_scalars<T: PartialOrd>(a: T, b: T) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Compare the strings referenced by the `uoffset`s at `a` and `b`, by
/// unsigned byte order.
///
/// # Panics
///
/// Panics if either string lies outside `buf`.
#[must_use]
pub fn compare_strings(buf: &[u8], a: usize, b: usize) -> Ordering {
    let a = read_string_bytes(buf, follow_uoffset(buf, a));
    let b = read_string_bytes(buf, follow_uoffset(buf, b));
    a.cmp(b)
}

/// Compare the string referenced by the `uoffset` at `loc` with `key`.
///
/// # Panics
///
/// Panics if the string lies outside `buf`.
#[must_use]
pub fn compare_string_with_key(buf: &[u8], loc: usize, key: &[u8]) -> Ordering {
    read_string_bytes(buf, follow_uoffset(buf, loc)).cmp(key)
}

impl<'a> Vector<'a, ForwardTable> {
    /// The table whose `K` key equals `key`, if any.
    ///
    /// The vector must be sorted ascending by `K`. With duplicate keys any
    /// one of them may be returned.
    #[must_use]
    pub fn lookup_by_key<K: TableKey>(&self, key: &K::Key) -> Option<Table<'a>> {
        self.lookup_by(|table| K::compare_with_key(table, key))
    }

    /// Binary search with a custom probe. `probe` orders a candidate table
    /// against the target: `Less` if the candidate sorts before it.
    #[must_use]
    pub fn lookup_by<F>(&self, mut probe: F) -> Option<Table<'a>>
    where
        F: FnMut(&Table<'a>) -> Ordering,
    {
        let mut start = 0;
        let mut span = self.len();
        while span != 0 {
            let mut middle = span / 2;
            let table = self.get(start + middle);
            match probe(&table) {
                Ordering::Greater => span = middle,
                Ordering::Less => {
                    middle += 1;
                    start += middle;
                    span -= middle;
                }
                Ordering::Equal => return Some(table),
            }
        }
        None
    }
}
