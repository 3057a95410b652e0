use std::marker::PhantomData;

use crate::cursor::ByteReader;
use crate::error::{WadError, WadResult};
use crate::lumps::*;
use crate::wad::{LumpInfo, WadData};

/// Walks a lump as an array of fixed size records, handing each record's
/// absolute offset to `transformer`.
///
/// The lump is validated up front: it must be a whole number of records and
/// must lie entirely inside the buffer. A lump that fails either check never
/// yields anything.
pub struct LumpIter<'a, T, F>
where
    F: Fn(&ByteReader<'a>, usize) -> WadResult<T>,
{
    reader: ByteReader<'a>,
    item_size: usize,
    item_count: usize,
    lump_offset: usize,
    current: usize,
    transformer: F,
    _phantom: PhantomData<T>,
}

impl<'a, T, F> LumpIter<'a, T, F>
where
    F: Fn(&ByteReader<'a>, usize) -> WadResult<T>,
{
    pub fn new(
        reader: ByteReader<'a>,
        info: &LumpInfo,
        item_size: usize,
        transformer: F,
    ) -> WadResult<Self> {
        if item_size == 0 || info.lump_size % item_size != 0 {
            return Err(WadError::MalformedLump {
                name: info.name.clone(),
                size: info.lump_size,
                record_size: item_size,
            });
        }
        // Checks the whole range once so a short file is reported against the
        // lump rather than some record in the middle of it
        reader.slice(info.lump_offset, info.lump_size)?;

        Ok(LumpIter {
            reader,
            item_size,
            item_count: info.lump_size / item_size,
            lump_offset: info.lump_offset,
            current: 0,
            transformer,
            _phantom: PhantomData,
        })
    }
}

impl<'a, T, F> Iterator for LumpIter<'a, T, F>
where
    F: Fn(&ByteReader<'a>, usize) -> WadResult<T>,
{
    type Item = WadResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current < self.item_count {
            let offset = self.lump_offset + self.current * self.item_size;
            let item = (self.transformer)(&self.reader, offset);
            self.current += 1;
            return Some(item);
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.item_count - self.current;
        (left, Some(left))
    }
}

impl<'a, T, F> ExactSizeIterator for LumpIter<'a, T, F> where
    F: Fn(&ByteReader<'a>, usize) -> WadResult<T>
{
}

/// A `LumpIter` decoding with the record's own `WadRecord::read`
pub type RecordIter<'a, T> = LumpIter<'a, T, fn(&ByteReader<'_>, usize) -> WadResult<T>>;

impl WadData {
    /// Lazily decode the lump at `index` as an array of `T`
    pub fn lump_iter<T: WadRecord>(&self, index: usize) -> WadResult<RecordIter<'_, T>> {
        let info = self.lump_info(index)?;
        let read: fn(&ByteReader<'_>, usize) -> WadResult<T> = T::read;
        LumpIter::new(self.reader(), info, T::SIZE, read)
    }

    /// Decode every record in a lump with a caller supplied record size and
    /// decoder. The first bad record aborts the whole lump.
    pub fn read_lump_with<T, F>(&self, info: &LumpInfo, item_size: usize, func: F) -> WadResult<Vec<T>>
    where
        F: Fn(&ByteReader<'_>, usize) -> WadResult<T>,
    {
        LumpIter::new(self.reader(), info, item_size, func)?.collect()
    }

    /// Decode every record in the lump at `index` as `T`
    pub fn read_lump<T: WadRecord>(&self, index: usize) -> WadResult<Vec<T>> {
        self.lump_iter::<T>(index)?.collect()
    }
}
