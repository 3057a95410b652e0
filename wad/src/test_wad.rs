//! Builds small archives in memory for tests. Layout is header, lump data in
//! directory order, then the directory.

use crate::map::MapLump;

pub(crate) fn shorts(values: &[i16]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn name8(name: &str) -> [u8; 8] {
    let mut n = [0u8; 8];
    n[..name.len()].copy_from_slice(name.as_bytes());
    n
}

pub(crate) struct TestWad {
    identification: String,
    lumps: Vec<(String, Vec<u8>)>,
}

impl TestWad {
    pub(crate) fn new(identification: &str) -> Self {
        Self {
            identification: identification.to_owned(),
            lumps: Vec::new(),
        }
    }

    pub(crate) fn lump(&mut self, name: &str, data: Vec<u8>) -> &mut Self {
        self.lumps.push((name.to_owned(), data));
        self
    }

    /// A zero size marker followed by the ten level lumps in order
    pub(crate) fn level(&mut self, name: &str, level: &TestLevel) -> &mut Self {
        self.lump(name, Vec::new());
        for (lump, data) in MapLump::ALL.iter().zip(level.lumps.iter()) {
            self.lump(lump.name(), data.clone());
        }
        self
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let data_len: usize = self.lumps.iter().map(|(_, d)| d.len()).sum();
        let dir_offset = 12 + data_len;

        let mut out = Vec::with_capacity(dir_offset + self.lumps.len() * 16);
        out.extend_from_slice(&self.identification.as_bytes()[..4]);
        out.extend_from_slice(&(self.lumps.len() as i32).to_le_bytes());
        out.extend_from_slice(&(dir_offset as i32).to_le_bytes());

        let mut directory = Vec::with_capacity(self.lumps.len() * 16);
        for (name, data) in &self.lumps {
            directory.extend_from_slice(&(out.len() as u32).to_le_bytes());
            directory.extend_from_slice(&(data.len() as u32).to_le_bytes());
            directory.extend_from_slice(&name8(name));
            out.extend_from_slice(data);
        }
        out.extend_from_slice(&directory);
        out
    }
}

/// Raw bytes for each of the ten level lumps, indexed in `MapLump::ALL` order
#[derive(Default, Clone)]
pub(crate) struct TestLevel {
    pub(crate) lumps: [Vec<u8>; 10],
}

impl TestLevel {
    fn push(&mut self, lump: MapLump, bytes: &[u8]) -> &mut Self {
        self.lumps[lump.offset() - 1].extend_from_slice(bytes);
        self
    }

    pub(crate) fn thing(&mut self, x: i16, y: i16, angle: i16, kind: i16, flags: i16) -> &mut Self {
        self.push(MapLump::Things, &shorts(&[x, y, angle, kind, flags]))
    }

    pub(crate) fn vertex(&mut self, x: i16, y: i16) -> &mut Self {
        self.push(MapLump::Vertexes, &shorts(&[x, y]))
    }

    pub(crate) fn linedef(&mut self, v1: i16, v2: i16, front: i16, back: i16) -> &mut Self {
        self.push(MapLump::LineDefs, &shorts(&[v1, v2, 1, 0, 0, front, back]))
    }

    pub(crate) fn sidedef(&mut self, middle: &str, sector: i16) -> &mut Self {
        let mut bytes = shorts(&[0, 0]);
        bytes.extend_from_slice(&name8("-"));
        bytes.extend_from_slice(&name8("-"));
        bytes.extend_from_slice(&name8(middle));
        bytes.extend_from_slice(&sector.to_le_bytes());
        self.push(MapLump::SideDefs, &bytes)
    }

    pub(crate) fn seg(&mut self, v1: i16, v2: i16, linedef: i16, direction: i16) -> &mut Self {
        self.push(MapLump::Segs, &shorts(&[v1, v2, 0, linedef, direction, 0]))
    }

    pub(crate) fn subsector(&mut self, seg_count: u16, start_seg: u16) -> &mut Self {
        let mut bytes = seg_count.to_le_bytes().to_vec();
        bytes.extend_from_slice(&start_seg.to_le_bytes());
        self.push(MapLump::SubSectors, &bytes)
    }

    /// `splitter` is x, y, dx, dy. Boxes are `[right, left]` as top, bottom,
    /// left, right. Children are `[right, left]`.
    pub(crate) fn node(&mut self, splitter: [i16; 4], bboxes: [[i16; 4]; 2], children: [u16; 2]) -> &mut Self {
        let mut bytes = shorts(&splitter);
        bytes.extend_from_slice(&shorts(&bboxes[0]));
        bytes.extend_from_slice(&shorts(&bboxes[1]));
        bytes.extend_from_slice(&children[0].to_le_bytes());
        bytes.extend_from_slice(&children[1].to_le_bytes());
        self.push(MapLump::Nodes, &bytes)
    }

    pub(crate) fn sector(&mut self, floor: i16, ceil: i16, light: i16) -> &mut Self {
        let mut bytes = shorts(&[floor, ceil]);
        bytes.extend_from_slice(&name8("FLOOR4_8"));
        bytes.extend_from_slice(&name8("CEIL3_5"));
        bytes.extend_from_slice(&shorts(&[light, 0, 0]));
        self.push(MapLump::Sectors, &bytes)
    }
}

/// A 256x256 room cut in to three subsectors by two nodes.
///
/// ```text
///  256 +-------+-------+
///      |       |  ss2  |
///  128 |  ss0  +-------+
///      |       |  ss1  |
///    0 +-------+-------+
///      0      128     256
/// ```
///
/// Node 1 (root) splits on x = 128 heading north: right is node 0, left is
/// subsector 0. Node 0 splits on y = 128 heading east: right (south) is
/// subsector 1, left (north) is subsector 2.
pub(crate) fn three_room_level() -> TestLevel {
    let mut level = TestLevel::default();
    level
        .thing(64, 64, 90, 1, 7)
        .thing(200, 200, 180, 2, 7)
        .thing(200, 50, 0, 3004, 7);
    for (x, y) in [
        (0, 0),
        (128, 0),
        (256, 0),
        (256, 128),
        (256, 256),
        (128, 256),
        (0, 256),
        (128, 128),
    ] {
        level.vertex(x, y);
    }
    for (i, (v1, v2)) in [(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 6), (6, 0)]
        .into_iter()
        .enumerate()
    {
        level.linedef(v1, v2, i as i16, -1).sidedef("STARTAN3", 0);
    }
    // ss0: west half
    level.seg(0, 1, 0, 0).seg(5, 6, 5, 0).seg(6, 0, 6, 0).seg(1, 5, 0, 0);
    // ss1: south east
    level.seg(1, 2, 1, 0).seg(2, 3, 2, 0).seg(3, 7, 2, 0);
    // ss2: north east
    level.seg(7, 3, 2, 0).seg(3, 4, 3, 0).seg(4, 5, 4, 0);
    level.subsector(4, 0).subsector(3, 4).subsector(3, 7);
    level
        .node(
            [128, 128, 128, 0],
            [[128, 0, 128, 256], [256, 128, 128, 256]],
            [0x8001, 0x8002],
        )
        .node(
            [128, 0, 0, 256],
            [[256, 0, 128, 256], [256, 0, 0, 128]],
            [0, 0x8000],
        );
    level.sector(0, 128, 160);
    level
}
