//! This crate reads WAD archives and the levels inside them, and finds which
//! subsector of a level's BSP a point is in.
//!
//! The structure of a WAD is this:
//!
//! ```text,ignore
//!                        <───── 32 bits ──────>
//!                        ┌────────────────────┐
//!             ┌──── 0x00 |  ASCII WAD Type    | 0x03
//!             |          | ────────────────── |
//!     Header ─┤     0x04 | # of directories   | 0x07
//!             |          | ────────────────── |
//!             └──── 0x08 | offset to listing ───0x0B ──┐
//!             ┌───────── | ────────────────── |        |
//!             |     0x0C | ┌────────────────┐ |        |
//!             |          | |   Lump Bytes   |<─────┐   |
//!     Lumps ──┤          | |       .        | |    |   |
//!             |          | └────────────────┘ |    |   |
//!             |          |         .          |    |   |
//!             └───────── |         .          |    |   |
//!             ┌───────── | ┌────────────────┐<─────────┘
//!             |          | |   Lump Offset  |──────┘
//!  Directory ─┤          | |----------------| |
//!     List    |          | |   Lump Size    | |
//!             |          | |----------------| |
//!             |          | |   Lump Name    | |
//!             |          | └────────────────┘ |
//!             |          |         .          |
//!             |          |         .          |
//!             └───────── └────────────────────┘
//! ```
//!
//! A level is a zero size marker lump (`E1M1`, `MAP01`, ...) followed by its
//! data lumps at fixed positions, see `MapLump`.
//!
//! ```no_run
//! use wad::{IVec2, LevelData, WadData};
//!
//! let wad = WadData::open("doom1.wad")?;
//! let level = LevelData::load(&wad, "E1M1")?;
//! let bsp = level.bsp()?;
//! let subsector = bsp.point_in_subsector(IVec2::new(1056, -3616))?;
//! # Ok::<(), wad::WadError>(())
//! ```

pub use math::{Divline, Extents, IVec2, Side};

pub use crate::bsp::{BspError, BspTree, IS_SSECTOR_MASK, NodeChild};
pub use crate::error::{WadError, WadResult};
pub use crate::map::{LevelData, MapLump};
pub use crate::wad::*;

pub mod bsp;
pub mod cursor;
mod error;
pub mod iterators;
/// A Lump is a chunk of data that starts at an offset in the WAD, and ends
/// at a location that is `sizeof<record-in-lump> * num-of-entries`
///
/// The lump module contains the structures that the lump records are parsed
/// in to.
pub mod lumps;
pub mod map;
/// The WAD structure and parser
pub mod wad;

#[cfg(test)]
mod test_wad;
