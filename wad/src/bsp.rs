//! Point location in a level's BSP tree.
//!
//! In the NODES lump every child reference is a `u16` where bit 15 says
//! whether the rest is a subsector index (set) or a node index (clear). The
//! tree here converts those once, up front, in to `NodeChild` and checks every
//! index while doing so. After that a lookup is a plain walk with no masking
//! and no unchecked indexing.

use log::debug;
use math::{IVec2, Side};
use thiserror::Error;

use crate::lumps::{WadNode, WadSubSector};

/// If this bit is set in a node child the child is a subsector
pub const IS_SSECTOR_MASK: u16 = 0x8000;

/// Where a node's child reference leads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeChild {
    Node(usize),
    SubSector(usize),
}

impl From<u16> for NodeChild {
    fn from(raw: u16) -> Self {
        if raw & IS_SSECTOR_MASK == IS_SSECTOR_MASK {
            NodeChild::SubSector((raw & !IS_SSECTOR_MASK) as usize)
        } else {
            NodeChild::Node(raw as usize)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BspError {
    /// A child reference points past the end of the node or subsector array
    #[error("node {node} {side:?} child {child:?} is out of range")]
    ChildOutOfRange {
        node: usize,
        side: Side,
        child: NodeChild,
    },
    /// Walked more nodes than the tree has, so there is a cycle somewhere
    #[error("gave up after descending {steps} nodes, the tree has a cycle")]
    DescentLimit { steps: usize },
    #[error("level has no nodes and no subsectors")]
    Empty,
}

/// A validated view of a level's BSP. Borrows the decoded nodes and
/// subsectors, owns only the converted child table.
#[derive(Debug, Clone)]
pub struct BspTree<'a> {
    nodes: &'a [WadNode],
    subsectors: &'a [WadSubSector],
    /// `[right, left]` for each node, same order as `nodes`
    children: Vec<[NodeChild; 2]>,
}

impl<'a> BspTree<'a> {
    pub fn new(nodes: &'a [WadNode], subsectors: &'a [WadSubSector]) -> Result<Self, BspError> {
        if nodes.is_empty() && subsectors.is_empty() {
            return Err(BspError::Empty);
        }

        let children = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| {
                let right = check_child(i, Side::Right, node.children[0], nodes, subsectors)?;
                let left = check_child(i, Side::Left, node.children[1], nodes, subsectors)?;
                Ok([right, left])
            })
            .collect::<Result<Vec<_>, BspError>>()?;
        debug!(
            "BSP: {} nodes, {} subsectors",
            nodes.len(),
            subsectors.len()
        );

        Ok(BspTree {
            nodes,
            subsectors,
            children,
        })
    }

    /// The first thing a lookup visits. This is the last node, or subsector 0
    /// when the level is a single subsector with no nodes.
    pub fn root(&self) -> NodeChild {
        match self.nodes.len().checked_sub(1) {
            Some(root) => NodeChild::Node(root),
            None => NodeChild::SubSector(0),
        }
    }

    #[inline]
    pub fn child(&self, node: usize, side: Side) -> Option<NodeChild> {
        self.children.get(node).map(|c| c[side.index()])
    }

    pub fn nodes(&self) -> &'a [WadNode] {
        self.nodes
    }

    pub fn subsectors(&self) -> &'a [WadSubSector] {
        self.subsectors
    }

    /// Index of the subsector containing `point`.
    ///
    /// At each node the point is tested against the splitter and the walk
    /// continues down the side it is on. A point exactly on a splitter goes
    /// left.
    ///
    /// Doom function name `R_PointInSubsector`
    pub fn point_in_subsector(&self, point: IVec2) -> Result<usize, BspError> {
        let mut current = self.root();
        let mut steps = 0;

        loop {
            match current {
                NodeChild::SubSector(id) => return Ok(id),
                NodeChild::Node(node_id) => {
                    if steps == self.nodes.len() {
                        return Err(BspError::DescentLimit { steps });
                    }
                    steps += 1;
                    let side = self.nodes[node_id].divline().point_on_side(point);
                    current = self.children[node_id][side.index()];
                }
            }
        }
    }

    pub fn subsector_at(&self, point: IVec2) -> Result<&'a WadSubSector, BspError> {
        let id = self.point_in_subsector(point)?;
        Ok(&self.subsectors[id])
    }
}

fn check_child(
    node: usize,
    side: Side,
    raw: u16,
    nodes: &[WadNode],
    subsectors: &[WadSubSector],
) -> Result<NodeChild, BspError> {
    let child = NodeChild::from(raw);
    let in_range = match child {
        NodeChild::Node(id) => id < nodes.len(),
        NodeChild::SubSector(id) => id < subsectors.len(),
    };
    if !in_range {
        return Err(BspError::ChildOutOfRange { node, side, child });
    }
    Ok(child)
}
