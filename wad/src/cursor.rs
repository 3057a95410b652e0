//! Fixed width little-endian reads at absolute offsets.
//!
//! `ByteReader` holds no position: every read is given the offset it wants,
//! which is how the WAD format addresses everything (the header points at the
//! directory, the directory points at lumps, lumps are arrays of fixed size
//! records).

use crate::error::{WadError, WadResult};

/// A stateless, copyable view over the archive bytes
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    data: &'a [u8],
}

impl<'a> ByteReader<'a> {
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow `width` bytes starting at `offset`
    pub fn slice(&self, offset: usize, width: usize) -> WadResult<&'a [u8]> {
        offset
            .checked_add(width)
            .and_then(|end| self.data.get(offset..end))
            .ok_or(WadError::OutOfBounds {
                offset,
                width,
                len: self.data.len(),
            })
    }

    #[inline]
    fn read_array<const N: usize>(&self, offset: usize) -> WadResult<[u8; N]> {
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(self.slice(offset, N)?);
        Ok(bytes)
    }

    #[inline]
    pub fn read_u16(&self, offset: usize) -> WadResult<u16> {
        self.read_array(offset).map(u16::from_le_bytes)
    }

    #[inline]
    pub fn read_i16(&self, offset: usize) -> WadResult<i16> {
        self.read_array(offset).map(i16::from_le_bytes)
    }

    #[inline]
    pub fn read_u32(&self, offset: usize) -> WadResult<u32> {
        self.read_array(offset).map(u32::from_le_bytes)
    }

    #[inline]
    pub fn read_i32(&self, offset: usize) -> WadResult<i32> {
        self.read_array(offset).map(i32::from_le_bytes)
    }

    /// Read a fixed length, NUL padded string such as a lump or texture name.
    /// The string ends at the first NUL, or uses the full length if there is
    /// none. Bytes that are not valid UTF-8 become U+FFFD.
    pub fn read_fixed_string(&self, offset: usize, len: usize) -> WadResult<String> {
        let bytes = self.slice(offset, len)?;
        let end = bytes.iter().position(|b| *b == 0).unwrap_or(len);
        Ok(String::from_utf8_lossy(&bytes[..end]).into_owned())
    }
}
