//! Byte-addressable storage with little-endian scalar access.
//!
//! Two flavours share one read API:
//! - [`ReadBuf`] borrows bytes owned elsewhere. It never allocates, and
//!   [`ReadBuf::slice`] hands out sub-views over the same storage with their
//!   own bounds.
//! - [`ByteBuf`] owns a growable `Vec<u8>`. Writes past the current capacity
//!   grow it through [`ByteBuf::request_capacity`], which doubles from a small
//!   floor and refuses to go beyond [`MAX_BUFFER_SIZE`].
//!
//! Every multi-byte value is little-endian. The scalar family is expressed
//! once, through the [`Scalar`] trait, instead of one accessor per width.

use alloc::{borrow::Cow, vec, vec::Vec};

use bstr::{BStr, ByteSlice};

use crate::error::CapacityError;

/// Largest capacity a buffer may reach: `i32::MAX - 8` bytes, the limit the
/// wire format's signed 32-bit offsets can address with headroom.
pub const MAX_BUFFER_SIZE: usize = (i32::MAX as usize) - 8;

/// Smallest capacity a growing [`ByteBuf`] allocates.
const MIN_CAPACITY: usize = 8;

/// A fixed-width value stored little-endian.
///
/// Implemented for `bool`, the signed and unsigned integers up to 64 bits,
/// `f32` and `f64`. `bool` occupies one byte; any non-zero byte reads as
/// `true`.
pub trait Scalar: Copy + PartialEq + core::fmt::Debug {
    /// Width in bytes.
    const SIZE: usize;

    /// Decode from the first [`Self::SIZE`] bytes of `bytes`.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is shorter than [`Self::SIZE`].
    fn read_le(bytes: &[u8]) -> Self;

    /// Encode into the first [`Self::SIZE`] bytes of `out`.
    ///
    /// # Panics
    ///
    /// Panics if `out` is shorter than [`Self::SIZE`].
    fn write_le(self, out: &mut [u8]);

    /// `true` if both values have the same encoding. Unlike `==` this tells
    /// `-0.0` from `0.0`, and a NaN matches itself.
    #[inline]
    fn same_bits(self, other: Self) -> bool {
        let mut a = [0u8; 8];
        let mut b = [0u8; 8];
        self.write_le(&mut a);
        other.write_le(&mut b);
        a[..Self::SIZE] == b[..Self::SIZE]
    }
}

macro_rules! impl_scalar {
    ($($ty:ty),* $(,)?) => {$(
        impl Scalar for $ty {
            const SIZE: usize = core::mem::size_of::<$ty>();

            #[inline]
            fn read_le(bytes: &[u8]) -> Self {
                let mut raw = [0u8; core::mem::size_of::<$ty>()];
                raw.copy_from_slice(&bytes[..Self::SIZE]);
                <$ty>::from_le_bytes(raw)
            }

            #[inline]
            fn write_le(self, out: &mut [u8]) {
                out[..Self::SIZE].copy_from_slice(&self.to_le_bytes());
            }
        }
    )*};
}

impl_scalar!(i8, u8, i16, u16, i32, u32, i64, u64, f32, f64);

impl Scalar for bool {
    const SIZE: usize = 1;

    #[inline]
    fn read_le(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }

    #[inline]
    fn write_le(self, out: &mut [u8]) {
        out[0] = u8::from(self);
    }
}

/// Read `T` at `index` of `bytes`.
///
/// # Panics
///
/// Panics if `index + T::SIZE` exceeds `bytes.len()`.
#[inline]
pub fn read_scalar<T: Scalar>(bytes: &[u8], index: usize) -> T {
    T::read_le(&bytes[index..])
}

/// Write `value` at `index` of `bytes`.
///
/// # Panics
///
/// Panics if `index + T::SIZE` exceeds `bytes.len()`.
#[inline]
pub fn write_scalar<T: Scalar>(bytes: &mut [u8], index: usize, value: T) {
    value.write_le(&mut bytes[index..]);
}

/// Read-only view over externally owned bytes.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ReadBuf<'a> {
    bytes: &'a [u8],
}

impl<'a> ReadBuf<'a> {
    /// View all of `bytes`.
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Number of readable bytes; the last readable index is `limit() - 1`.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.bytes.len()
    }

    /// The viewed bytes, without copying.
    #[must_use]
    pub const fn data(&self) -> &'a [u8] {
        self.bytes
    }

    /// Read a scalar at `index`.
    ///
    /// # Panics
    ///
    /// Panics if the value does not fit before [`limit`](Self::limit).
    #[inline]
    #[must_use]
    pub fn get<T: Scalar>(&self, index: usize) -> T {
        read_scalar(self.bytes, index)
    }

    /// The `size` bytes starting at `start`.
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds [`limit`](Self::limit).
    #[must_use]
    pub fn get_bytes(&self, start: usize, size: usize) -> &'a [u8] {
        &self.bytes[start..start + size]
    }

    /// The `size` bytes starting at `start` as a byte string.
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds [`limit`](Self::limit).
    #[must_use]
    pub fn get_bstr(&self, start: usize, size: usize) -> &'a BStr {
        BStr::new(self.get_bytes(start, size))
    }

    /// Decode `size` bytes starting at `start` as UTF-8.
    ///
    /// Borrows when the bytes are valid UTF-8; invalid sequences are replaced
    /// with U+FFFD in an owned copy.
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds [`limit`](Self::limit).
    #[must_use]
    pub fn get_string(&self, start: usize, size: usize) -> Cow<'a, str> {
        self.get_bytes(start, size).to_str_lossy()
    }

    /// Position of the first `value` in `start..end`, clamped to the view.
    #[must_use]
    pub fn find_first(&self, value: u8, start: usize, end: usize) -> Option<usize> {
        let end = end.min(self.bytes.len());
        if start >= end {
            return None;
        }
        self.bytes[start..end]
            .find_byte(value)
            .map(|found| start + found)
    }

    /// A view of `size` bytes at `start`, sharing storage with `self`.
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds [`limit`](Self::limit).
    #[must_use]
    pub fn slice(&self, start: usize, size: usize) -> ReadBuf<'a> {
        ReadBuf::new(self.get_bytes(start, size))
    }
}

impl<'a> From<&'a [u8]> for ReadBuf<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

impl core::fmt::Debug for ReadBuf<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReadBuf")
            .field("limit", &self.limit())
            .finish_non_exhaustive()
    }
}

/// Growable, owned byte buffer with an append cursor.
///
/// `capacity` is the length of the zero-initialised backing storage and
/// never shrinks. `write_position` marks the end of the valid data for the
/// `put_*` family; `set_*` writes anywhere, growing as needed.
///
/// Growth reallocates: slices borrowed from [`data`](Self::data) before a
/// write must be taken again afterwards. The borrow checker enforces this.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ByteBuf {
    data: Vec<u8>,
    write_position: usize,
}

impl ByteBuf {
    /// An empty buffer with `capacity` zeroed bytes of backing storage.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity],
            write_position: 0,
        }
    }

    /// Wrap existing bytes; the write position starts at the end of them.
    #[must_use]
    pub fn from_vec(data: Vec<u8>) -> Self {
        let write_position = data.len();
        Self {
            data,
            write_position,
        }
    }

    /// Size of the backing storage.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Current append cursor.
    #[must_use]
    pub fn write_position(&self) -> usize {
        self.write_position
    }

    /// Move the append cursor, growing so that it stays inside the storage.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] when `position` exceeds [`MAX_BUFFER_SIZE`].
    pub fn set_write_position(&mut self, position: usize) -> Result<(), CapacityError> {
        self.request_capacity(position, false)?;
        self.write_position = position;
        Ok(())
    }

    /// Readable extent: everything before the write position.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.write_position
    }

    /// The whole backing storage, including bytes past the write position.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable access to the whole backing storage.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// A read view over `0..limit()`.
    #[must_use]
    pub fn as_read_buf(&self) -> ReadBuf<'_> {
        ReadBuf::new(&self.data[..self.write_position])
    }

    /// Reset the write position to zero. Capacity and contents are kept.
    pub fn clear(&mut self) {
        self.write_position = 0;
    }

    /// Take the backing storage.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Ensure the storage holds at least `capacity` bytes.
    ///
    /// A no-op when it already does. Otherwise the new size is the smallest
    /// doubling of the minimum capacity that covers the request, clamped to
    /// [`MAX_BUFFER_SIZE`]. With `copy_at_end` the old bytes move to the tail
    /// of the new storage (the builder grows towards lower addresses);
    /// otherwise they stay at the head.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] when `capacity` exceeds [`MAX_BUFFER_SIZE`].
    /// Nothing is modified in that case.
    pub fn request_capacity(
        &mut self,
        capacity: usize,
        copy_at_end: bool,
    ) -> Result<(), CapacityError> {
        let old_capacity = self.data.len();
        if old_capacity >= capacity {
            return Ok(());
        }
        let new_capacity = grown_capacity(capacity)?;

        let mut grown = vec![0u8; new_capacity];
        let dst = if copy_at_end {
            new_capacity - old_capacity
        } else {
            0
        };
        grown[dst..dst + old_capacity].copy_from_slice(&self.data);
        self.data = grown;
        Ok(())
    }

    /// Read a scalar at `index`.
    ///
    /// # Panics
    ///
    /// Panics if the value does not fit inside the storage.
    #[inline]
    #[must_use]
    pub fn get<T: Scalar>(&self, index: usize) -> T {
        read_scalar(&self.data, index)
    }

    /// Write a scalar at `index`, growing the storage if needed.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] if the storage cannot grow that far.
    #[inline]
    pub fn set<T: Scalar>(&mut self, index: usize, value: T) -> Result<(), CapacityError> {
        let end = index
            .checked_add(T::SIZE)
            .ok_or(CapacityError::new(usize::MAX))?;
        self.request_capacity(end, false)?;
        write_scalar(&mut self.data, index, value);
        Ok(())
    }

    /// Copy `src` to `dst_index`, growing the storage if needed.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] if the storage cannot grow that far.
    pub fn set_bytes(&mut self, dst_index: usize, src: &[u8]) -> Result<(), CapacityError> {
        let end = dst_index
            .checked_add(src.len())
            .ok_or(CapacityError::new(usize::MAX))?;
        self.request_capacity(end, false)?;
        self.data[dst_index..end].copy_from_slice(src);
        Ok(())
    }

    /// Append a scalar at the write position.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] if the storage cannot grow that far.
    #[inline]
    pub fn put<T: Scalar>(&mut self, value: T) -> Result<(), CapacityError> {
        self.set(self.write_position, value)?;
        self.write_position += T::SIZE;
        Ok(())
    }

    /// Append raw bytes at the write position.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] if the storage cannot grow that far.
    pub fn put_bytes(&mut self, bytes: &[u8]) -> Result<(), CapacityError> {
        self.set_bytes(self.write_position, bytes)?;
        self.write_position += bytes.len();
        Ok(())
    }

    /// Append `value` encoded as UTF-8 and return the encoded length.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] if the storage cannot grow that far.
    pub fn put_str(&mut self, value: &str) -> Result<usize, CapacityError> {
        self.put_bytes(value.as_bytes())?;
        Ok(value.len())
    }
}

impl core::fmt::Debug for ByteBuf {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ByteBuf")
            .field("capacity", &self.capacity())
            .field("write_position", &self.write_position)
            .finish_non_exhaustive()
    }
}

/// Smallest doubling of [`MIN_CAPACITY`] that is at least `requested`,
/// clamped to [`MAX_BUFFER_SIZE`].
fn grown_capacity(requested: usize) -> Result<usize, CapacityError> {
    if requested > MAX_BUFFER_SIZE {
        return Err(CapacityError::new(requested));
    }
    let mut capacity = MIN_CAPACITY;
    while capacity < requested {
        capacity = if capacity & 0xC000_0000 != 0 {
            MAX_BUFFER_SIZE
        } else {
            capacity << 1
        };
    }
    Ok(capacity)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, 8)]
    #[case(1, 8)]
    #[case(8, 8)]
    #[case(9, 16)]
    #[case(1000, 1024)]
    #[case(1 << 30, 1 << 30)]
    #[case((1 << 30) + 1, MAX_BUFFER_SIZE)]
    #[case(MAX_BUFFER_SIZE, MAX_BUFFER_SIZE)]
    fn growth_doubles_from_floor(#[case] requested: usize, #[case] expected: usize) {
        assert_eq!(grown_capacity(requested), Ok(expected));
    }

    #[test]
    fn growth_beyond_ceiling_fails() {
        let err = grown_capacity(MAX_BUFFER_SIZE + 1).unwrap_err();
        assert_eq!(err.requested, MAX_BUFFER_SIZE + 1);

        let mut buf = ByteBuf::with_capacity(4);
        assert!(buf.request_capacity(usize::MAX, true).is_err());
        assert_eq!(buf.capacity(), 4, "failed growth must not touch storage");
    }

    #[test]
    fn request_capacity_is_noop_when_large_enough() {
        let mut buf = ByteBuf::with_capacity(32);
        buf.put(7u32).unwrap();
        buf.request_capacity(16, true).unwrap();
        assert_eq!(buf.capacity(), 32);
        assert_eq!(buf.get::<u32>(0), 7);
    }

    #[test]
    fn copy_at_end_moves_existing_bytes_to_tail() {
        let mut buf = ByteBuf::from_vec(vec![1, 2, 3]);
        buf.request_capacity(10, true).unwrap();
        assert_eq!(buf.capacity(), 16);
        assert_eq!(&buf.data()[13..], &[1, 2, 3]);
        assert!(buf.data()[..13].iter().all(|&b| b == 0));

        let mut buf = ByteBuf::from_vec(vec![1, 2, 3]);
        buf.request_capacity(10, false).unwrap();
        assert_eq!(&buf.data()[..3], &[1, 2, 3]);
    }

    #[test]
    fn scalars_are_little_endian() {
        let mut buf = ByteBuf::with_capacity(0);
        buf.put(0x0102_0304u32).unwrap();
        buf.put(-2i16).unwrap();
        buf.put(true).unwrap();
        buf.put(1.5f64).unwrap();
        assert_eq!(&buf.data()[..7], &[4, 3, 2, 1, 0xfe, 0xff, 1]);

        let view = buf.as_read_buf();
        assert_eq!(view.limit(), 15);
        assert_eq!(view.get::<u32>(0), 0x0102_0304);
        assert_eq!(view.get::<i16>(4), -2);
        assert!(view.get::<bool>(6));
        assert_eq!(view.get::<f64>(7).to_bits(), 1.5f64.to_bits());
    }

    #[rstest]
    #[case::zeros(0.0, -0.0, false)]
    #[case::same(1.5, 1.5, true)]
    #[case::nan(f64::NAN, f64::NAN, true)]
    fn same_bits_compares_encodings(#[case] a: f64, #[case] b: f64, #[case] expected: bool) {
        assert_eq!(a.same_bits(b), expected);
        assert!((-1i16).same_bits(-1));
    }

    #[test]
    fn set_grows_and_keeps_head() {
        let mut buf = ByteBuf::with_capacity(2);
        buf.set(0, 0xABu8).unwrap();
        buf.set(20, u64::MAX).unwrap();
        assert_eq!(buf.capacity(), 32);
        assert_eq!(buf.get::<u8>(0), 0xAB);
        assert_eq!(buf.get::<u64>(20), u64::MAX);
    }

    #[test]
    fn put_str_reports_encoded_length() {
        let mut buf = ByteBuf::with_capacity(1);
        assert_eq!(buf.put_str("åβ").unwrap(), 4);
        assert_eq!(buf.as_read_buf().get_string(0, 4), "åβ");
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut buf = ByteBuf::with_capacity(0);
        buf.put_bytes(&[9; 40]).unwrap();
        let capacity = buf.capacity();
        buf.clear();
        assert_eq!(buf.write_position(), 0);
        assert_eq!(buf.capacity(), capacity);
    }

    #[test]
    fn slice_shares_storage_with_own_bounds() {
        let bytes = b"hello, world";
        let view = ReadBuf::new(bytes);
        let world = view.slice(7, 5);
        assert_eq!(world.limit(), 5);
        assert_eq!(world.get_bstr(0, 5), "world");
        assert!(core::ptr::eq(world.data().as_ptr(), bytes[7..].as_ptr()));
    }

    #[test]
    fn find_first_scans_range() {
        let view = ReadBuf::new(b"ab\0cd\0");
        assert_eq!(view.find_first(0, 0, 6), Some(2));
        assert_eq!(view.find_first(0, 3, 6), Some(5));
        assert_eq!(view.find_first(0, 3, 5), None);
        assert_eq!(view.find_first(b'a', 4, 100), None);
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let view = ReadBuf::new(&[b'o', 0xff, b'k']);
        assert_eq!(view.get_string(0, 3), "o\u{FFFD}k");
        assert_eq!(view.get_bstr(0, 3).as_bytes(), &[b'o', 0xff, b'k']);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn out_of_bounds_read_panics() {
        let view = ReadBuf::new(&[1, 2, 3]);
        let _ = view.get::<u32>(1);
    }
}
