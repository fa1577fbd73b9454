//! A single building level: its node arenas, links, bounds, and entry subsets.

use tracing::debug;

use crate::error::{Error, Result};
use crate::node::{Link, Node, NodeId, NodeKind, NodeSpec};
use crate::spatial::{self, NeighbourQuery};

/// Right and bottom margin added to the floor bounds so edge nodes stay visible.
pub const FLOOR_PADDING: i32 = 50;

/// One undirected link, reported once for drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorLink {
    pub start: NodeId,
    pub end: NodeId,
    pub distance: f64,
}

/// A building level.
///
/// Wall and guide nodes live in separate arenas; a node's index in its arena
/// is stable for the life of the floor and doubles as the file-format key.
#[derive(Debug, Clone, Default)]
pub struct Floor {
    level: usize,
    width: i32,
    height: i32,
    wall_nodes: Vec<Node>,
    guide_nodes: Vec<Node>,
    prev_entry_nodes: Vec<usize>,
    next_entry_nodes: Vec<usize>,
}

impl Floor {
    /// Create an empty floor at `level` (0 is the ground floor).
    pub fn new(level: usize) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn wall_nodes(&self) -> &[Node] {
        &self.wall_nodes
    }

    pub fn guide_nodes(&self) -> &[Node] {
        &self.guide_nodes
    }

    /// All nodes of one kind, in index order.
    pub fn nodes(&self, kind: NodeKind) -> &[Node] {
        match kind {
            NodeKind::Wall => &self.wall_nodes,
            NodeKind::Guide => &self.guide_nodes,
        }
    }

    /// Guide nodes that lead to the floor below.
    pub fn prev_entry_nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.prev_entry_nodes
            .iter()
            .map(move |&index| &self.guide_nodes[index])
    }

    /// Guide nodes that lead to the floor above.
    pub fn next_entry_nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.next_entry_nodes
            .iter()
            .map(move |&index| &self.guide_nodes[index])
    }

    /// Place a node on this floor and return its id.
    ///
    /// Grows the floor bounds to cover the node plus [`FLOOR_PADDING`].
    pub fn add_node(&mut self, spec: NodeSpec) -> NodeId {
        self.width = self.width.max(spec.x.saturating_add(FLOOR_PADDING));
        self.height = self.height.max(spec.y.saturating_add(FLOOR_PADDING));

        let kind = spec.detail.kind();
        let index = self.nodes(kind).len();
        let id = NodeId::new(self.level, kind, index);
        let node = Node::new(id, spec);

        match kind {
            NodeKind::Wall => self.wall_nodes.push(node),
            NodeKind::Guide => {
                if node.prev_entry().is_some() {
                    self.prev_entry_nodes.push(index);
                }
                if node.next_entry().is_some() {
                    self.next_entry_nodes.push(index);
                }
                self.guide_nodes.push(node);
            }
        }
        id
    }

    /// Link two nodes addressed by `(kind, index)`.
    pub fn add_link(
        &mut self,
        start_kind: NodeKind,
        start_index: usize,
        end_kind: NodeKind,
        end_index: usize,
    ) -> Result<()> {
        let start = NodeId::new(self.level, start_kind, start_index);
        let end = NodeId::new(self.level, end_kind, end_index);
        self.link(start, end)
    }

    /// Create a mutual link between two nodes of this floor, freezing their distance.
    pub fn link(&mut self, start: NodeId, end: NodeId) -> Result<()> {
        let start_node = self.try_node(start)?;
        let end_node = self.try_node(end)?;

        if start.kind != end.kind {
            return Err(Error::MixedLinkKinds {
                floor: self.level,
                start: start.kind,
                end: end.kind,
            });
        }
        if start == end {
            debug!(node = %start, "ignoring self-link");
            return Ok(());
        }
        if start_node.is_linked_to(end) {
            debug!(%start, %end, "ignoring duplicate link");
            return Ok(());
        }

        let distance = start_node.distance_to(end_node);
        let nodes = match start.kind {
            NodeKind::Wall => &mut self.wall_nodes,
            NodeKind::Guide => &mut self.guide_nodes,
        };
        nodes[start.index].push_link(Link {
            target: end,
            distance,
        });
        nodes[end.index].push_link(Link {
            target: start,
            distance,
        });
        Ok(())
    }

    /// Look up a node by kind and index.
    pub fn node_at(&self, kind: NodeKind, index: usize) -> Option<&Node> {
        self.nodes(kind).get(index)
    }

    /// Look up a node by id. Ids from other floors resolve to `None`.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        if id.floor != self.level {
            return None;
        }
        self.node_at(id.kind, id.index)
    }

    /// Like [`Floor::node`], but reports a structured error for bad references.
    pub fn try_node(&self, id: NodeId) -> Result<&Node> {
        self.node(id).ok_or(Error::NodeIndexOutOfRange {
            floor: self.level,
            kind: id.kind,
            index: id.index,
            len: self.nodes(id.kind).len(),
        })
    }

    /// Position of `node` within its collection, if it belongs to this floor.
    pub fn index_of(&self, node: &Node) -> Option<usize> {
        let id = node.id();
        self.node(id)
            .filter(|owned| std::ptr::eq(*owned, node))
            .map(|_| id.index)
    }

    pub fn nearest_guide_node(&self, x: i32, y: i32) -> Option<&Node> {
        spatial::nearest(&self.guide_nodes, x, y)
    }

    pub fn nearest_prev_entry_node(&self, x: i32, y: i32) -> Option<&Node> {
        spatial::nearest(self.prev_entry_nodes(), x, y)
    }

    pub fn nearest_next_entry_node(&self, x: i32, y: i32) -> Option<&Node> {
        spatial::nearest(self.next_entry_nodes(), x, y)
    }

    /// Guide nodes ordered by distance to `(x, y)`, for disambiguating a tap.
    pub fn nearby_guide_nodes(&self, x: i32, y: i32, query: &NeighbourQuery) -> Vec<(&Node, f64)> {
        spatial::k_nearest(&self.guide_nodes, x, y, query)
    }

    /// Case-insensitive substring search over guide node names.
    ///
    /// Unnamed nodes never match, and a blank pattern matches nothing.
    pub fn find_guide_nodes_by_name(&self, pattern: &str) -> Vec<&Node> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Vec::new();
        }
        let needle = pattern.to_lowercase();
        self.guide_nodes
            .iter()
            .filter(|node| {
                node.name()
                    .is_some_and(|name| name.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Every link on this floor, each reported once with its lower id first.
    pub fn links(&self) -> Vec<FloorLink> {
        self.wall_nodes
            .iter()
            .chain(self.guide_nodes.iter())
            .flat_map(|node| {
                node.links()
                    .iter()
                    .filter(move |link| node.id() < link.target)
                    .map(move |link| FloorLink {
                        start: node.id(),
                        end: link.target,
                        distance: link.distance,
                    })
            })
            .collect()
    }
}
