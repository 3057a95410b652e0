use std::fmt;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use log::{debug, info};

use crate::cursor::ByteReader;
use crate::error::{WadError, WadResult};
use crate::map::MapLump;

const DIRECTORY_ENTRY_SIZE: usize = 16;
const LUMP_NAME_LEN: usize = 8;

/// Header which tells us the WAD type and where the data is
///
/// The header structure in the WAD is as follows:
///
/// | Field Size | Data Type    | Content                                              |
/// |------------|--------------|------------------------------------------------------|
/// | 0x00-0x03  | 4 ASCII char | The identification, "IWAD" or "PWAD"                 |
/// | 0x04-0x07  | signed int   | The number entries in the directory                  |
/// | 0x08-0x0b  | signed int   | Offset in bytes to the directory in the WAD file     |
#[derive(Clone, PartialEq, Eq)]
pub struct WadHeader {
    /// Will be `IWAD` for game, or `PWAD` for patch
    pub identification: String,
    /// The count of "lumps" of data
    pub lump_count: usize,
    /// Offset in bytes that the directory starts at
    pub dir_offset: usize,
}

impl WadHeader {
    fn read(r: &ByteReader) -> WadResult<Self> {
        let identification = r.read_fixed_string(0, 4)?;
        let lump_count = r.read_i32(4)?;
        let dir_offset = r.read_i32(8)?;
        if lump_count < 0 {
            return Err(WadError::InvalidHeader(format!(
                "negative lump count {lump_count}"
            )));
        }
        if dir_offset < 0 {
            return Err(WadError::InvalidHeader(format!(
                "negative directory offset {dir_offset}"
            )));
        }
        Ok(WadHeader {
            identification,
            lump_count: lump_count as usize,
            dir_offset: dir_offset as usize,
        })
    }

    pub fn is_iwad(&self) -> bool {
        self.identification == "IWAD"
    }
}

impl fmt::Debug for WadHeader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "\nWadHeader {{\n  identification: {},\n  lump_count: {},\n  dir_offset: {},\n}}",
            self.identification, self.lump_count, self.dir_offset
        )
    }
}

/// Contains the details for a lump of data: where it starts, the size of it, and the name
///
/// The directory structure in the WAD is as follows:
///
/// | Field Size | Data Type    | Content                                                    |
/// |------------|--------------|------------------------------------------------------------|
/// | 0x00-0x03  | unsigned int | Offset value to the start of the lump data in the WAD file |
/// | 0x04-0x07  | unsigned int | The size of the lump in bytes                              |
/// | 0x08-0x0f  | 8 ASCII char | ASCII holding the name of the lump                         |
#[derive(Clone, PartialEq, Eq)]
pub struct LumpInfo {
    /// Name for the lump data, at most 8 characters
    pub name: String,
    /// The offset in bytes where the lump data starts
    pub lump_offset: usize,
    /// The size in bytes of the lump referenced
    pub lump_size: usize,
}

impl LumpInfo {
    fn read(r: &ByteReader, offset: usize) -> WadResult<Self> {
        Ok(LumpInfo {
            lump_offset: r.read_u32(offset)? as usize,
            lump_size: r.read_u32(offset + 4)? as usize,
            name: r.read_fixed_string(offset + 8, LUMP_NAME_LEN)?,
        })
    }
}

impl fmt::Debug for LumpInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "\nLumpInfo {{\n  name: {},\n  lump_size: {},\n  lump_offset: {},\n}}",
            &self.name, self.lump_size, self.lump_offset
        )
    }
}

/// "Where's All (the) Data": contains the WAD in memory, plus an array of directories
/// telling us where each data lump starts
///
/// Nothing in here is mutated after construction, so a `WadData` can be shared
/// freely between readers.
pub struct WadData {
    header: WadHeader,
    /// The WAD as an array of bytes read in to memory
    data: Vec<u8>,
    /// Tells us where each lump of data is, in directory order
    lumps: Vec<LumpInfo>,
}

impl fmt::Debug for WadData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "\nWadData {{\n  header: {:?},\n  lumps: {},\n}}",
            self.header,
            self.lumps.len()
        )
    }
}

impl WadData {
    /// Read a whole file in to memory and parse the directory
    pub fn open<P: AsRef<Path>>(path: P) -> WadResult<WadData> {
        let path = path.as_ref();
        let io_err = |source| WadError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let file_len = file.metadata().map_err(io_err)?.len() as usize;
        let mut data = Vec::with_capacity(file_len);
        file.read_to_end(&mut data).map_err(io_err)?;
        info!("Read {:?}, {} bytes", path, data.len());

        Self::from_bytes(data)
    }

    /// Parse the header and directory of an archive that is already in memory
    pub fn from_bytes(data: Vec<u8>) -> WadResult<WadData> {
        let reader = ByteReader::new(&data);
        let header = WadHeader::read(&reader)?;
        debug!("{:?}", header);

        let lumps = (0..header.lump_count)
            .map(|i| {
                let offset = i
                    .checked_mul(DIRECTORY_ENTRY_SIZE)
                    .and_then(|o| o.checked_add(header.dir_offset))
                    .ok_or(WadError::OutOfBounds {
                        offset: header.dir_offset,
                        width: header.lump_count.saturating_mul(DIRECTORY_ENTRY_SIZE),
                        len: data.len(),
                    })?;
                LumpInfo::read(&reader, offset)
            })
            .collect::<WadResult<Vec<_>>>()?;
        info!(
            "{}: {} lumps in directory",
            header.identification,
            lumps.len()
        );

        Ok(WadData {
            header,
            data,
            lumps,
        })
    }

    pub fn header(&self) -> &WadHeader {
        &self.header
    }

    /// All lumps in directory order
    pub fn lumps(&self) -> &[LumpInfo] {
        &self.lumps
    }

    pub fn lump_count(&self) -> usize {
        self.lumps.len()
    }

    pub(crate) fn reader(&self) -> ByteReader<'_> {
        ByteReader::new(&self.data)
    }

    pub fn lump_info(&self, index: usize) -> WadResult<&LumpInfo> {
        self.lumps
            .get(index)
            .ok_or_else(|| WadError::LumpNotFound(format!("#{index}")))
    }

    /// Linear scan for the first lump called `name`. Names are not unique in a
    /// WAD so the earliest entry wins.
    pub fn find_lump_index(&self, name: &str) -> Option<usize> {
        self.lumps.iter().position(|l| l.name == name)
    }

    /// As `find_lump_index` but absence is an error
    pub fn lump_index(&self, name: &str) -> WadResult<usize> {
        self.find_lump_index(name)
            .ok_or_else(|| WadError::LumpNotFound(name.to_owned()))
    }

    pub fn lump_exists(&self, name: &str) -> bool {
        self.find_lump_index(name).is_some()
    }

    /// The raw bytes of the lump at `index`
    pub fn lump_bytes(&self, index: usize) -> WadResult<&[u8]> {
        let info = self.lump_info(index)?;
        self.reader().slice(info.lump_offset, info.lump_size)
    }

    /// Names of every level marker, in directory order. A marker is any lump
    /// directly followed by a `THINGS` lump.
    pub fn level_names(&self) -> Vec<&str> {
        self.lumps
            .windows(2)
            .filter(|w| w[1].name == MapLump::Things.name())
            .map(|w| w[0].name.as_str())
            .collect()
    }
}
