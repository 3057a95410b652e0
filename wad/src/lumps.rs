//! The fixed size records that level lumps are made of, in WAD order.
//!
//! Every record is decoded straight from the little-endian bytes with no
//! conversion beyond what the format itself defines (`0xFFFF` sidedefs become
//! `None`). Anything smarter is left to the consumer.

use math::{Divline, IVec2};

use crate::cursor::ByteReader;
use crate::error::WadResult;

/// A record type that is stored as a flat array inside a lump
pub trait WadRecord: Sized {
    /// Size in bytes of one record in the lump
    const SIZE: usize;

    /// Decode a single record starting at the absolute `offset`
    fn read(reader: &ByteReader, offset: usize) -> WadResult<Self>;
}

/// A `Thing` describes only the position, type, and angle + spawn flags
///
/// The data in the WAD lump is structured as follows:
///
/// | Field Size | Data Type | Content    |
/// |------------|-----------|------------|
/// |  0x00-0x01 |    i16    | X Position |
/// |  0x02-0x03 |    i16    | Y Position |
/// |  0x04-0x05 |    i16    | Angle      |
/// |  0x06-0x07 |    i16    | Type       |
/// |  0x08-0x09 |    i16    | Flags      |
///
/// Each `Thing` record is 10 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WadThing {
    pub x: i16,
    pub y: i16,
    /// Facing, in degrees
    pub angle: i16,
    pub kind: i16,
    pub flags: i16,
}

impl WadThing {
    pub const fn new(x: i16, y: i16, angle: i16, kind: i16, flags: i16) -> WadThing {
        WadThing {
            x,
            y,
            angle,
            kind,
            flags,
        }
    }

    #[inline]
    pub const fn position(&self) -> IVec2 {
        IVec2::new(self.x as i32, self.y as i32)
    }
}

impl WadRecord for WadThing {
    const SIZE: usize = 10;

    fn read(r: &ByteReader, offset: usize) -> WadResult<Self> {
        Ok(WadThing::new(
            r.read_i16(offset)?,
            r.read_i16(offset + 2)?,
            r.read_i16(offset + 4)?,
            r.read_i16(offset + 6)?,
            r.read_i16(offset + 8)?,
        ))
    }
}

/// A `Vertex` is the basic struct used for any type of coordinate
/// in the game
///
/// | Field Size | Data Type | Content      |
/// |------------|-----------|--------------|
/// |  0x00-0x01 |    i16    | X Coordinate |
/// |  0x02-0x03 |    i16    | Y Coordinate |
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WadVertex {
    pub x: i16,
    pub y: i16,
}

impl WadVertex {
    pub const fn new(x: i16, y: i16) -> WadVertex {
        WadVertex { x, y }
    }
}

impl From<WadVertex> for IVec2 {
    fn from(v: WadVertex) -> Self {
        IVec2::new(v.x as i32, v.y as i32)
    }
}

impl WadRecord for WadVertex {
    const SIZE: usize = 4;

    fn read(r: &ByteReader, offset: usize) -> WadResult<Self> {
        Ok(WadVertex::new(r.read_i16(offset)?, r.read_i16(offset + 2)?))
    }
}

/// Each linedef represents a line from one of the VERTEXES to another.
///
///| Field Size | Data Type | Content                                   |
///|------------|-----------|-------------------------------------------|
///|  0x00-0x01 |    i16    | Start vertex                              |
///|  0x02-0x03 |    i16    | End vertex                                |
///|  0x04-0x05 |    i16    | Flags                                     |
///|  0x06-0x07 |    i16    | Line type / Action                        |
///|  0x08-0x09 |    i16    | Sector tag                                |
///|  0x0A-0x0B |    i16    | Front sidedef ( 0xFFFF side not present ) |
///|  0x0C-0x0D |    i16    | Back sidedef  ( 0xFFFF side not present ) |
///
/// Each linedef's record is 14 bytes, and is made up of 7 16-bit
/// fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WadLineDef {
    /// The line starts from this point
    pub start_vertex: i16,
    /// The line ends at this point
    pub end_vertex: i16,
    pub flags: i16,
    pub special: i16,
    /// This is a number which ties this line's effect type
    /// to all SECTORS that have the same tag number (in their last
    /// field)
    pub sector_tag: i16,
    /// The front (right) `SideDef` for this line
    pub front_sidedef: Option<i16>,
    /// The back (left) `SideDef` for this line, one-sided lines have none
    pub back_sidedef: Option<i16>,
}

impl WadLineDef {
    pub const fn new(
        start_vertex: i16,
        end_vertex: i16,
        flags: i16,
        special: i16,
        sector_tag: i16,
        front_sidedef: Option<i16>,
        back_sidedef: Option<i16>,
    ) -> WadLineDef {
        WadLineDef {
            start_vertex,
            end_vertex,
            flags,
            special,
            sector_tag,
            front_sidedef,
            back_sidedef,
        }
    }

    #[inline]
    pub const fn is_two_sided(&self) -> bool {
        self.front_sidedef.is_some() && self.back_sidedef.is_some()
    }
}

/// `-1` in a sidedef slot means there is no side
#[inline]
fn sidedef(index: i16) -> Option<i16> {
    (index != -1).then_some(index)
}

impl WadRecord for WadLineDef {
    const SIZE: usize = 14;

    fn read(r: &ByteReader, offset: usize) -> WadResult<Self> {
        Ok(WadLineDef::new(
            r.read_i16(offset)?,
            r.read_i16(offset + 2)?,
            r.read_i16(offset + 4)?,
            r.read_i16(offset + 6)?,
            r.read_i16(offset + 8)?,
            sidedef(r.read_i16(offset + 10)?),
            sidedef(r.read_i16(offset + 12)?),
        ))
    }
}

/// A sidedef is a definition of what wall texture(s) to draw along a
/// `LineDef`, and a group of sidedefs outline the space of a `Sector`
///
/// | Field Size | Data Type    | Content        |
/// |------------|--------------|----------------|
/// |  0x00-0x01 |    i16       | X offset       |
/// |  0x02-0x03 |    i16       | Y offset       |
/// |  0x04-0x0B | 8 ASCII char | Upper texture  |
/// |  0x0C-0x13 | 8 ASCII char | Lower texture  |
/// |  0x14-0x1B | 8 ASCII char | Middle texture |
/// |  0x1C-0x1D |    i16       | Sector         |
///
/// Each `SideDef` record is 30 bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WadSideDef {
    pub x_offset: i16,
    pub y_offset: i16,
    /// Name of upper texture used for example in the upper of a window
    pub upper_tex: String,
    /// Name of lower texture used for example in the front of a step
    pub lower_tex: String,
    /// The regular part of a wall
    pub middle_tex: String,
    /// Sector that this sidedef faces or helps to surround
    pub sector: i16,
}

impl WadRecord for WadSideDef {
    const SIZE: usize = 30;

    fn read(r: &ByteReader, offset: usize) -> WadResult<Self> {
        Ok(WadSideDef {
            x_offset: r.read_i16(offset)?,
            y_offset: r.read_i16(offset + 2)?,
            upper_tex: r.read_fixed_string(offset + 4, 8)?,
            lower_tex: r.read_fixed_string(offset + 12, 8)?,
            middle_tex: r.read_fixed_string(offset + 20, 8)?,
            sector: r.read_i16(offset + 28)?,
        })
    }
}

/// The Segments (SEGS) are in a sequential order determined by the `SubSector`
/// (SSECTOR), which are part of the NODES recursive tree
///
/// | Field Size | Data Type | Content                              |
/// |------------|-----------|--------------------------------------|
/// |  0x00-0x01 |    i16    | Index to vertex the line starts from |
/// |  0x02-0x03 |    i16    | Index to vertex the line ends with   |
/// |  0x04-0x05 |    i16    | Angle in Binary Angle Measurement (BAMS) |
/// |  0x06-0x07 |    i16    | Index to the linedef this seg travels along|
/// |  0x08-0x09 |    i16    | Direction along line. 0 == SEG is on the right and follows the line, 1 == SEG travels in opposite direction |
/// |  0x0A-0x0B |    i16    | Offset: this is the distance along the linedef this seg starts at |
///
/// Each `Segment` record is 12 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WadSegment {
    /// The line starts from this point
    pub start_vertex: i16,
    /// The line ends at this point
    pub end_vertex: i16,
    /// Binary Angle Measurement
    ///
    /// Degrees(0-360) = angle * 0.005493164
    pub angle: i16,
    /// The Linedef this segment travels along
    pub linedef: i16,
    /// The `side`, 0 = front/right, 1 = back/left
    pub direction: i16,
    /// Offset distance along the linedef (from `start_vertex`) to the start
    /// of this `Segment`
    pub offset: i16,
}

impl WadSegment {
    pub const fn new(
        start_vertex: i16,
        end_vertex: i16,
        angle: i16,
        linedef: i16,
        direction: i16,
        offset: i16,
    ) -> WadSegment {
        WadSegment {
            start_vertex,
            end_vertex,
            angle,
            linedef,
            direction,
            offset,
        }
    }
}

impl WadRecord for WadSegment {
    const SIZE: usize = 12;

    fn read(r: &ByteReader, offset: usize) -> WadResult<Self> {
        Ok(WadSegment::new(
            r.read_i16(offset)?,
            r.read_i16(offset + 2)?,
            r.read_i16(offset + 4)?,
            r.read_i16(offset + 6)?,
            r.read_i16(offset + 8)?, // 0 front or 1 back
            r.read_i16(offset + 10)?,
        ))
    }
}

/// A `SubSector` divides up all the SECTORS into convex polygons. They are then
/// referenced through the NODES resources. There will be (number of nodes) + 1.
///
/// | Field Size | Data Type | Content                            |
/// |------------|-----------|------------------------------------|
/// |  0x00-0x01 |    u16    | How many segments line this sector |
/// |  0x02-0x03 |    u16    | Index to the starting segment      |
///
/// Each `SubSector` record is 4 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WadSubSector {
    /// How many `Segment`s line this `SubSector`
    pub seg_count: u16,
    /// The `Segment` to start with
    pub start_seg: u16,
}

impl WadSubSector {
    pub const fn new(seg_count: u16, start_seg: u16) -> WadSubSector {
        WadSubSector {
            seg_count,
            start_seg,
        }
    }
}

impl WadRecord for WadSubSector {
    const SIZE: usize = 4;

    fn read(r: &ByteReader, offset: usize) -> WadResult<Self> {
        Ok(WadSubSector::new(r.read_u16(offset)?, r.read_u16(offset + 2)?))
    }
}

/// Axis aligned box as stored in a node, Y first
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BBox {
    pub top: i16,
    pub bottom: i16,
    pub left: i16,
    pub right: i16,
}

impl BBox {
    fn read(r: &ByteReader, offset: usize) -> WadResult<Self> {
        Ok(BBox {
            top: r.read_i16(offset)?,
            bottom: r.read_i16(offset + 2)?,
            left: r.read_i16(offset + 4)?,
            right: r.read_i16(offset + 6)?,
        })
    }

    /// Inclusive on all edges
    pub fn contains(&self, point: IVec2) -> bool {
        point.x >= self.left as i32
            && point.x <= self.right as i32
            && point.y >= self.bottom as i32
            && point.y <= self.top as i32
    }
}

/// The base node structure as parsed from the WAD records. What is stored in the WAD
/// is the splitting line used for splitting the level/node (starts with the level then
/// consecutive nodes, aiming for an even split if possible), a box which encapsulates
/// the left and right regions of the split, and the index numbers for left and right
/// children of the node; the index is in to the array built from this lump.
///
/// **The last node is the root node**
///
/// | Field Size | Content                              | Description                                      |
/// |------------|--------------------------------------|--------------------------------------------------|
/// | 0x00-0x01  | Partition line x coordinate          | X coordinate of the splitter                     |
/// | 0x02-0x03  | Partition line y coordinate          | Y coordinate of the splitter                     |
/// | 0x04-0x05  | Change in x to end of partition line | The amount to move in X to reach end of splitter |
/// | 0x06-0x07  | Change in y to end of partition line | The amount to move in Y to reach end of splitter |
/// | 0x08-0x09  | Right (Front) box top                | First corner of front box (Y coordinate)         |
/// | 0x0A-0x0B  | Right (Front)  box bottom            | Second corner of front box (Y coordinate)        |
/// | 0x0C-0x0D  | Right (Front)  box left              | First corner of front box (X coordinate)         |
/// | 0x0E-0x0F  | Right (Front)  box right             | Second corner of front box (X coordinate)        |
/// | 0x10-0x11  | Left (Back) box top                  | First corner of back box (Y coordinate)          |
/// | 0x12-0x13  | Left (Back)  box bottom              | Second corner of back box (Y coordinate)         |
/// | 0x14-0x15  | Left (Back)  box left                | First corner of back box (X coordinate)          |
/// | 0x16-0x17  | Left (Back)  box right               | Second corner of back box (X coordinate)         |
/// | 0x18-0x19  | Right (Front) child index            | Index of the front child + sub-sector indicator  |
/// | 0x1A-0x1B  | Left (Back)  child index             | Index of the back child + sub-sector indicator   |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WadNode {
    /// Where the line used for splitting the level starts
    pub x: i16,
    pub y: i16,
    /// Direction of the splitting line
    pub dx: i16,
    pub dy: i16,
    /// `[right, left]`
    pub bboxes: [BBox; 2],
    /// `[right, left]`. If bit 15 is set the remaining bits are a subsector
    /// index, otherwise they are a node index
    pub children: [u16; 2],
}

impl WadNode {
    /// The splitter as an infinite line
    #[inline]
    pub const fn divline(&self) -> Divline {
        Divline::new(
            IVec2::new(self.x as i32, self.y as i32),
            IVec2::new(self.dx as i32, self.dy as i32),
        )
    }
}

impl WadRecord for WadNode {
    const SIZE: usize = 28;

    fn read(r: &ByteReader, offset: usize) -> WadResult<Self> {
        Ok(WadNode {
            x: r.read_i16(offset)?,
            y: r.read_i16(offset + 2)?,
            dx: r.read_i16(offset + 4)?,
            dy: r.read_i16(offset + 6)?,
            bboxes: [BBox::read(r, offset + 8)?, BBox::read(r, offset + 16)?],
            children: [r.read_u16(offset + 24)?, r.read_u16(offset + 26)?],
        })
    }
}

/// A `Sector` is a horizontal (east-west and north-south) area of the level
/// where a floor height and ceiling height is defined.
///
/// | Field Size | Data Type    | Content          |
/// |------------|--------------|------------------|
/// |  0x00-0x01 |    i16       | Floor height     |
/// |  0x02-0x03 |    i16       | Ceiling height   |
/// |  0x04-0x0B | 8 ASCII char | Floor texture    |
/// |  0x0C-0x13 | 8 ASCII char | Ceiling texture  |
/// |  0x14-0x15 |    i16       | Light level      |
/// |  0x16-0x17 |    i16       | Special type     |
/// |  0x18-0x19 |    i16       | Tag              |
///
/// Each `Sector` record is 26 bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WadSector {
    pub floor_height: i16,
    pub ceil_height: i16,
    /// Floor texture name
    pub floor_tex: String,
    /// Ceiling texture name
    pub ceil_tex: String,
    /// Light level from 0-255. There are actually only 32 brightnesses
    /// possible so blocks of 8 are the same bright
    pub light_level: i16,
    /// This determines some area-effects called special sectors
    pub kind: i16,
    /// a "tag" number corresponding to LINEDEF(s) with the same tag
    /// number
    pub tag: i16,
}

impl WadRecord for WadSector {
    const SIZE: usize = 26;

    fn read(r: &ByteReader, offset: usize) -> WadResult<Self> {
        Ok(WadSector {
            floor_height: r.read_i16(offset)?,
            ceil_height: r.read_i16(offset + 2)?,
            floor_tex: r.read_fixed_string(offset + 4, 8)?,
            ceil_tex: r.read_fixed_string(offset + 12, 8)?,
            light_level: r.read_i16(offset + 20)?,
            kind: r.read_i16(offset + 22)?,
            tag: r.read_i16(offset + 24)?,
        })
    }
}
