use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::bsp::BspError;

pub type WadResult<T> = Result<T, WadError>;

/// Everything that can go wrong between raw archive bytes and a decoded level
#[derive(Debug, Error)]
pub enum WadError {
    /// The archive could not be read in to memory
    #[error("could not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A read of `width` bytes at `offset` runs past the end of the buffer
    #[error("read of {width} bytes at offset {offset} is out of bounds (buffer is {len} bytes)")]
    OutOfBounds {
        offset: usize,
        width: usize,
        len: usize,
    },

    #[error("invalid WAD header: {0}")]
    InvalidHeader(String),

    #[error("lump not found: {0}")]
    LumpNotFound(String),

    #[error("level not found: {0}")]
    LevelNotFound(String),

    /// Lump size is not a whole number of records. Never truncated.
    #[error("lump {name} is {size} bytes, not a multiple of the {record_size} byte record")]
    MalformedLump {
        name: String,
        size: usize,
        record_size: usize,
    },

    #[error("malformed BSP tree: {0}")]
    MalformedTree(#[from] BspError),
}
