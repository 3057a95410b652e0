use log::{info, warn};
use math::{Extents, IVec2};

use crate::bsp::{BspError, BspTree};
use crate::error::{WadError, WadResult};
use crate::lumps::*;
use crate::wad::WadData;

/// The lumps that make up a level, in the order they follow the level marker.
/// The discriminant is the position of the lump relative to the marker, so
/// `marker_index + MapLump::Nodes.offset()` is the level's NODES lump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapLump {
    /// Position and angle for all monster, powerup and spawn location
    Things = 1,
    /// An array of lines referencing two vertices (Two vertexes are connected
    /// by one `LineDef`). Also points to one or two `SideDef` depending on if
    /// this line is a wall or a portal
    LineDefs,
    /// Defines upper, lower, and middle textures. This is information for a
    /// `LineDef`
    SideDefs,
    /// An array of signed short X, Y pairs (`Vertex`). All coordinates in this
    /// level block are indexes into this array
    Vertexes,
    /// Portions of lines cut due to Binary Space Partitioning.
    /// Each `SubSectors`'s geometry is defined by the `Segs` which it contains
    Segs,
    /// Set of segments of a `LineDef` representing a convex subspace
    SubSectors,
    /// BSP with segs, nodes and sub-sector leaves
    Nodes,
    /// Area surrounded by lines, with set ceiling and floor textures/heights
    /// with light level
    Sectors,
    /// Sector-to-sector visibility matrix to speed-up line of sight
    /// calculations
    Reject,
    /// 128x128 grid partition of the level LINEDEFS to accelerate collision
    /// detection
    Blockmap,
}

impl MapLump {
    pub const ALL: [MapLump; 10] = [
        MapLump::Things,
        MapLump::LineDefs,
        MapLump::SideDefs,
        MapLump::Vertexes,
        MapLump::Segs,
        MapLump::SubSectors,
        MapLump::Nodes,
        MapLump::Sectors,
        MapLump::Reject,
        MapLump::Blockmap,
    ];

    /// Position relative to the level marker
    #[inline]
    pub const fn offset(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            MapLump::Things => "THINGS",
            MapLump::LineDefs => "LINEDEFS",
            MapLump::SideDefs => "SIDEDEFS",
            MapLump::Vertexes => "VERTEXES",
            MapLump::Segs => "SEGS",
            MapLump::SubSectors => "SSECTORS",
            MapLump::Nodes => "NODES",
            MapLump::Sectors => "SECTORS",
            MapLump::Reject => "REJECT",
            MapLump::Blockmap => "BLOCKMAP",
        }
    }
}

/// Everything decoded from one level's lumps. Built once, then read only.
///
/// `nodes`, `subsectors`, and `segments` are what get used to find where a
/// point is, the rest is for drawing the level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelData {
    name: String,
    marker_index: usize,
    things: Vec<WadThing>,
    vertexes: Vec<WadVertex>,
    linedefs: Vec<WadLineDef>,
    sidedefs: Vec<WadSideDef>,
    sectors: Vec<WadSector>,
    subsectors: Vec<WadSubSector>,
    segments: Vec<WadSegment>,
    nodes: Vec<WadNode>,
}

impl LevelData {
    /// Find the level marker called `name` and decode the lumps that follow it
    pub fn load(wad: &WadData, name: &str) -> WadResult<LevelData> {
        let marker_index = wad
            .find_lump_index(name)
            .ok_or_else(|| WadError::LevelNotFound(name.to_owned()))?;

        let level = LevelData {
            name: name.to_owned(),
            marker_index,
            things: read_map_lump(wad, name, marker_index, MapLump::Things)?,
            vertexes: read_map_lump(wad, name, marker_index, MapLump::Vertexes)?,
            linedefs: read_map_lump(wad, name, marker_index, MapLump::LineDefs)?,
            sidedefs: read_map_lump(wad, name, marker_index, MapLump::SideDefs)?,
            sectors: read_map_lump(wad, name, marker_index, MapLump::Sectors)?,
            subsectors: read_map_lump(wad, name, marker_index, MapLump::SubSectors)?,
            segments: read_map_lump(wad, name, marker_index, MapLump::Segs)?,
            nodes: read_map_lump(wad, name, marker_index, MapLump::Nodes)?,
        };

        info!("{}: Loaded {} things", name, level.things.len());
        info!("{}: Loaded {} vertexes", name, level.vertexes.len());
        info!("{}: Loaded {} linedefs", name, level.linedefs.len());
        info!("{}: Loaded {} sidedefs", name, level.sidedefs.len());
        info!("{}: Loaded {} sectors", name, level.sectors.len());
        info!("{}: Loaded {} subsectors", name, level.subsectors.len());
        info!("{}: Loaded {} segments", name, level.segments.len());
        info!("{}: Loaded {} bsp nodes", name, level.nodes.len());
        Ok(level)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory index of the level marker lump
    #[inline]
    pub fn marker_index(&self) -> usize {
        self.marker_index
    }

    #[inline]
    pub fn things(&self) -> &[WadThing] {
        &self.things
    }

    #[inline]
    pub fn vertexes(&self) -> &[WadVertex] {
        &self.vertexes
    }

    #[inline]
    pub fn linedefs(&self) -> &[WadLineDef] {
        &self.linedefs
    }

    #[inline]
    pub fn sidedefs(&self) -> &[WadSideDef] {
        &self.sidedefs
    }

    #[inline]
    pub fn sectors(&self) -> &[WadSector] {
        &self.sectors
    }

    #[inline]
    pub fn subsectors(&self) -> &[WadSubSector] {
        &self.subsectors
    }

    #[inline]
    pub fn segments(&self) -> &[WadSegment] {
        &self.segments
    }

    #[inline]
    pub fn nodes(&self) -> &[WadNode] {
        &self.nodes
    }

    /// The root of the BSP is always the last node. `None` for a level
    /// without nodes.
    #[inline]
    pub fn root_node(&self) -> Option<usize> {
        self.nodes.len().checked_sub(1)
    }

    /// The rectangle enclosing every vertex of the level
    pub fn extents(&self) -> Option<Extents> {
        Extents::from_points(self.vertexes.iter().map(|v| IVec2::from(*v)))
    }

    /// Spawn point of `player`, 1 to 4
    pub fn player_start(&self, player: usize) -> Option<&WadThing> {
        if !(1..=4).contains(&player) {
            return None;
        }
        self.things.iter().find(|t| t.kind as usize == player)
    }

    /// The run of segments outlining a subsector
    pub fn subsector_segments(&self, subsector: usize) -> Option<&[WadSegment]> {
        let ss = self.subsectors.get(subsector)?;
        let start = ss.start_seg as usize;
        self.segments.get(start..start + ss.seg_count as usize)
    }

    pub fn bsp(&self) -> Result<BspTree<'_>, BspError> {
        BspTree::new(&self.nodes, &self.subsectors)
    }

    /// Index of the subsector containing `point`. Builds and validates the
    /// tree on each call, hold on to `bsp()` for repeated lookups.
    pub fn point_in_subsector(&self, point: IVec2) -> WadResult<usize> {
        Ok(self.bsp()?.point_in_subsector(point)?)
    }
}

fn read_map_lump<T: WadRecord>(
    wad: &WadData,
    map_name: &str,
    marker_index: usize,
    lump: MapLump,
) -> WadResult<Vec<T>> {
    let index = marker_index + lump.offset();
    let info = wad.lump_info(index).map_err(|_| {
        WadError::LumpNotFound(format!("{} for {} at #{}", lump.name(), map_name, index))
    })?;
    if info.name != lump.name() {
        warn!(
            "{}: expected {} at #{}, found {}",
            map_name,
            lump.name(),
            index,
            info.name
        );
    }
    wad.read_lump(index)
}

#[cfg(test)]
mod tests {
    use math::IVec2;

    use crate::bsp::BspError;
    use crate::error::WadError;
    use crate::lumps::*;
    use crate::map::{LevelData, MapLump};
    use crate::test_wad::{TestLevel, TestWad, shorts, three_room_level};
    use crate::wad::WadData;

    fn e1m1() -> WadData {
        let mut t = TestWad::new("PWAD");
        t.lump("PLAYPAL", vec![0; 3]).level("E1M1", &three_room_level());
        WadData::from_bytes(t.build()).unwrap()
    }

    #[test]
    fn offsets_are_fixed() {
        let offsets: Vec<usize> = MapLump::ALL.iter().map(|l| l.offset()).collect();
        assert_eq!(offsets, (1..=10).collect::<Vec<_>>());
        assert_eq!(MapLump::Vertexes.offset(), 4);
        assert_eq!(MapLump::Nodes.offset(), 7);
        assert_eq!(MapLump::SubSectors.name(), "SSECTORS");
        assert_eq!(MapLump::Blockmap.name(), "BLOCKMAP");
    }

    #[test]
    fn load_e1m1() {
        let wad = e1m1();
        assert_eq!(wad.level_names(), vec!["E1M1"]);

        let level = LevelData::load(&wad, "E1M1").unwrap();
        assert_eq!(level.name(), "E1M1");
        assert_eq!(level.marker_index(), 1);

        assert_eq!(level.things().len(), 3);
        assert_eq!(level.things()[0], WadThing::new(64, 64, 90, 1, 7));

        assert_eq!(level.vertexes().len(), 8);
        assert_eq!(level.vertexes()[0], WadVertex::new(0, 0));
        assert_eq!(level.vertexes()[7], WadVertex::new(128, 128));

        assert_eq!(level.linedefs().len(), 7);
        assert_eq!(level.linedefs()[2].start_vertex, 2);
        assert_eq!(level.linedefs()[2].end_vertex, 3);
        assert_eq!(level.linedefs()[2].front_sidedef, Some(2));
        assert_eq!(level.linedefs()[2].back_sidedef, None);

        assert_eq!(level.sidedefs().len(), 7);
        assert_eq!(level.sidedefs()[0].middle_tex, "STARTAN3");
        assert_eq!(level.sectors().len(), 1);
        assert_eq!(level.sectors()[0].floor_tex, "FLOOR4_8");
        assert_eq!(level.sectors()[0].ceil_height, 128);

        assert_eq!(level.segments().len(), 10);
        assert_eq!(level.subsectors().len(), 3);
        assert_eq!(level.subsectors()[2], WadSubSector::new(3, 7));

        assert_eq!(level.nodes().len(), 2);
        assert_eq!(level.root_node(), Some(1));
        let root = &level.nodes()[1];
        assert_eq!((root.x, root.y, root.dx, root.dy), (128, 0, 0, 256));
        assert_eq!(root.children, [0, 0x8000]);
        assert_eq!(level.nodes()[0].children, [0x8001, 0x8002]);
    }

    #[test]
    fn exact_vertex_bytes() {
        let mut level = TestLevel::default();
        level.lumps[MapLump::Vertexes.offset() - 1] = vec![0x0A, 0x00, 0x14, 0x00];
        level.lumps[MapLump::Nodes.offset() - 1] = {
            let mut b = shorts(&[-64, 32, 0, -16, 0, 0, 0, 0, 0, 0, 0, 0]);
            b.extend_from_slice(&[0x00, 0x80, 0x01, 0x80]);
            b
        };
        let mut t = TestWad::new("PWAD");
        t.level("E1M1", &level);
        let wad = WadData::from_bytes(t.build()).unwrap();

        let level = LevelData::load(&wad, "E1M1").unwrap();
        assert_eq!(level.vertexes(), &[WadVertex::new(10, 20)]);
        let node = &level.nodes()[0];
        assert_eq!((node.x, node.y, node.dx, node.dy), (-64, 32, 0, -16));
        assert_eq!(node.children, [0x8000, 0x8001]);
    }

    #[test]
    fn missing_level() {
        let wad = e1m1();
        assert!(matches!(
            LevelData::load(&wad, "E1M2"),
            Err(WadError::LevelNotFound(ref n)) if n == "E1M2"
        ));
    }

    #[test]
    fn marker_too_close_to_end() {
        let mut t = TestWad::new("PWAD");
        t.lump("E1M1", Vec::new())
            .lump("THINGS", Vec::new())
            .lump("LINEDEFS", Vec::new());
        let wad = WadData::from_bytes(t.build()).unwrap();
        assert!(matches!(
            LevelData::load(&wad, "E1M1"),
            Err(WadError::LumpNotFound(_))
        ));
    }

    #[test]
    fn malformed_level_lump() {
        let mut level = three_room_level();
        level.lumps[MapLump::Segs.offset() - 1].push(0);
        let mut t = TestWad::new("PWAD");
        t.level("MAP01", &level);
        let wad = WadData::from_bytes(t.build()).unwrap();
        assert!(matches!(
            LevelData::load(&wad, "MAP01"),
            Err(WadError::MalformedLump { ref name, size: 121, record_size: 12 }) if name == "SEGS"
        ));
    }

    #[test]
    fn positional_lumps_win_over_names() {
        let level = three_room_level();
        let mut t = TestWad::new("PWAD");
        t.lump("MAP01", Vec::new());
        for (i, data) in level.lumps.iter().enumerate() {
            t.lump(&format!("LUMP{i}"), data.clone());
        }
        let wad = WadData::from_bytes(t.build()).unwrap();
        let loaded = LevelData::load(&wad, "MAP01").unwrap();
        assert_eq!(loaded.vertexes().len(), 8);
        assert_eq!(loaded.nodes().len(), 2);
    }

    #[test]
    fn two_levels_share_nothing() {
        let mut second = TestLevel::default();
        second.vertex(-5, -5).vertex(5, 5).subsector(0, 0);
        let mut t = TestWad::new("PWAD");
        t.level("E1M1", &three_room_level()).level("E1M2", &second);
        let wad = WadData::from_bytes(t.build()).unwrap();
        assert_eq!(wad.level_names(), vec!["E1M1", "E1M2"]);

        let e1m2 = LevelData::load(&wad, "E1M2").unwrap();
        assert_eq!(e1m2.marker_index(), 11);
        assert_eq!(e1m2.vertexes().len(), 2);
        assert!(e1m2.things().is_empty());
        assert_eq!(e1m2.root_node(), None);
        // No nodes, a single subsector covers everything
        assert_eq!(e1m2.point_in_subsector(IVec2::new(1000, -1000)).unwrap(), 0);
    }

    #[test]
    fn extents_and_starts() {
        let level = LevelData::load(&e1m1(), "E1M1").unwrap();
        let ext = level.extents().unwrap();
        assert_eq!(ext.min, IVec2::new(0, 0));
        assert_eq!(ext.max, IVec2::new(256, 256));
        assert_eq!(ext.width(), 256);

        assert_eq!(level.player_start(1).unwrap().position(), IVec2::new(64, 64));
        assert_eq!(level.player_start(2).unwrap().position(), IVec2::new(200, 200));
        assert!(level.player_start(3).is_none());
        assert!(level.player_start(0).is_none());
    }

    #[test]
    fn subsector_segments() {
        let level = LevelData::load(&e1m1(), "E1M1").unwrap();
        let segs = level.subsector_segments(1).unwrap();
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[0].start_vertex, 1);
        assert_eq!(segs[2].end_vertex, 7);
        assert!(level.subsector_segments(3).is_none());
    }

    #[test]
    fn locate_points() {
        let level = LevelData::load(&e1m1(), "E1M1").unwrap();
        let start = level.player_start(1).unwrap().position();
        assert_eq!(level.point_in_subsector(start).unwrap(), 0);
        assert_eq!(level.point_in_subsector(IVec2::new(200, 50)).unwrap(), 1);
        assert_eq!(level.point_in_subsector(IVec2::new(200, 200)).unwrap(), 2);
    }

    #[test]
    fn broken_tree_is_reported() {
        let mut level = three_room_level();
        // Point the root's right child at a node that does not exist
        let nodes = &mut level.lumps[MapLump::Nodes.offset() - 1];
        let root_right = 28 + 24;
        nodes[root_right..root_right + 2].copy_from_slice(&9u16.to_le_bytes());
        let mut t = TestWad::new("PWAD");
        t.level("E1M1", &level);
        let wad = WadData::from_bytes(t.build()).unwrap();

        let level = LevelData::load(&wad, "E1M1").unwrap();
        assert!(matches!(
            level.point_in_subsector(IVec2::new(10, 10)),
            Err(WadError::MalformedTree(BspError::ChildOutOfRange { node: 1, .. }))
        ));
    }

    #[test]
    fn idempotent_level_decode() {
        let wad = e1m1();
        let a = LevelData::load(&wad, "E1M1").unwrap();
        let b = LevelData::load(&wad, "E1M1").unwrap();
        assert_eq!(a, b);
    }
}
