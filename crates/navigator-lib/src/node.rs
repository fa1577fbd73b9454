//! Primitive graph entities: nodes, their kinds, and the links between them.
//!
//! Nodes live in the arena owned by their [`Floor`](crate::Floor) and are
//! addressed by a [`NodeId`] of `(floor, kind, index)`. Links carry the
//! target's id rather than a reference, so the graph has no ownership cycles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The two node variants found in a floor plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Structural geometry. Rendered, never searched.
    Wall,
    /// Navigable waypoint.
    Guide,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            NodeKind::Wall => "wall",
            NodeKind::Guide => "guide",
        };
        f.write_str(value)
    }
}

/// Stable identity of a node: its floor, its collection, and its position there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId {
    pub floor: usize,
    pub kind: NodeKind,
    pub index: usize,
}

impl NodeId {
    pub fn new(floor: usize, kind: NodeKind, index: usize) -> Self {
        Self { floor, kind, index }
    }

    pub fn guide(floor: usize, index: usize) -> Self {
        Self::new(floor, NodeKind::Guide, index)
    }

    pub fn wall(floor: usize, index: usize) -> Self {
        Self::new(floor, NodeKind::Wall, index)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}F/{}#{}", self.floor, self.kind, self.index)
    }
}

/// Undirected weighted edge, stored once on each endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub target: NodeId,
    /// Euclidean distance frozen when the link was created.
    pub distance: f64,
}

/// Guide-only node data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuideDetail {
    pub name: Option<String>,
    /// Guide index on the floor below that this node connects to.
    pub prev_entry: Option<usize>,
    /// Guide index on the floor above that this node connects to.
    pub next_entry: Option<usize>,
}

/// Kind-specific node data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeDetail {
    Wall,
    Guide(GuideDetail),
}

impl NodeDetail {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeDetail::Wall => NodeKind::Wall,
            NodeDetail::Guide(_) => NodeKind::Guide,
        }
    }
}

/// Description of a node that has not been placed on a floor yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSpec {
    pub x: i32,
    pub y: i32,
    pub detail: NodeDetail,
}

impl NodeSpec {
    pub fn wall(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            detail: NodeDetail::Wall,
        }
    }

    pub fn guide(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            detail: NodeDetail::Guide(GuideDetail::default()),
        }
    }

    /// Attach a display name. Has no effect on wall nodes.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        if let NodeDetail::Guide(guide) = &mut self.detail {
            guide.name = Some(name.into());
        }
        self
    }

    /// Mark this node as an entry to guide `index` on the floor below.
    pub fn with_prev_entry(mut self, index: usize) -> Self {
        if let NodeDetail::Guide(guide) = &mut self.detail {
            guide.prev_entry = Some(index);
        }
        self
    }

    /// Mark this node as an entry to guide `index` on the floor above.
    pub fn with_next_entry(mut self, index: usize) -> Self {
        if let NodeDetail::Guide(guide) = &mut self.detail {
            guide.next_entry = Some(index);
        }
        self
    }
}

/// A point on a floor, owned by that floor.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    x: i32,
    y: i32,
    detail: NodeDetail,
    links: Vec<Link>,
}

impl Node {
    pub(crate) fn new(id: NodeId, spec: NodeSpec) -> Self {
        Self {
            id,
            x: spec.x,
            y: spec.y,
            detail: spec.detail,
            links: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.id.kind
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn detail(&self) -> &NodeDetail {
        &self.detail
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn name(&self) -> Option<&str> {
        match &self.detail {
            NodeDetail::Guide(guide) => guide.name.as_deref(),
            NodeDetail::Wall => None,
        }
    }

    pub fn prev_entry(&self) -> Option<usize> {
        match &self.detail {
            NodeDetail::Guide(guide) => guide.prev_entry,
            NodeDetail::Wall => None,
        }
    }

    pub fn next_entry(&self) -> Option<usize> {
        match &self.detail {
            NodeDetail::Guide(guide) => guide.next_entry,
            NodeDetail::Wall => None,
        }
    }

    /// Whether this node is a stair, lift, or ramp landing.
    pub fn is_entry(&self) -> bool {
        self.prev_entry().is_some() || self.next_entry().is_some()
    }

    /// The link from this node to `target`, if one exists.
    pub fn link_to(&self, target: NodeId) -> Option<&Link> {
        self.links.iter().find(|link| link.target == target)
    }

    pub fn is_linked_to(&self, target: NodeId) -> bool {
        self.link_to(target).is_some()
    }

    /// Euclidean distance to another node's coordinates.
    pub fn distance_to(&self, other: &Node) -> f64 {
        euclidean(self.x, self.y, other.x, other.y)
    }

    /// Euclidean distance to an arbitrary point, e.g. a tap or a scanned location.
    pub fn distance_to_point(&self, x: i32, y: i32) -> f64 {
        euclidean(self.x, self.y, x, y)
    }

    pub(crate) fn push_link(&mut self, link: Link) {
        self.links.push(link);
    }
}

/// Euclidean distance between two integer points.
///
/// Symmetric bit-for-bit, so a distance stored on a link always equals a
/// fresh computation between the same endpoints.
pub fn euclidean(ax: i32, ay: i32, bx: i32, by: i32) -> f64 {
    let dx = f64::from(ax) - f64::from(bx);
    let dy = f64::from(ay) - f64::from(by);
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euclidean_is_symmetric() {
        assert_eq!(euclidean(3, 7, -2, 11), euclidean(-2, 11, 3, 7));
        assert_eq!(euclidean(0, 0, 3, 4), 5.0);
    }

    #[test]
    fn spec_builders_only_touch_guide_nodes() {
        let wall = NodeSpec::wall(1, 2).named("ignored").with_next_entry(3);
        assert_eq!(wall.detail, NodeDetail::Wall);

        let guide = NodeSpec::guide(1, 2)
            .named("Stairs")
            .with_prev_entry(0)
            .with_next_entry(4);
        let NodeDetail::Guide(detail) = guide.detail else {
            panic!("expected guide detail");
        };
        assert_eq!(detail.name.as_deref(), Some("Stairs"));
        assert_eq!(detail.prev_entry, Some(0));
        assert_eq!(detail.next_entry, Some(4));
    }

    #[test]
    fn node_reports_entry_status() {
        let plain = Node::new(NodeId::guide(0, 0), NodeSpec::guide(0, 0));
        let stairs = Node::new(NodeId::guide(0, 1), NodeSpec::guide(5, 5).with_next_entry(0));
        assert!(!plain.is_entry());
        assert!(stairs.is_entry());
        assert_eq!(stairs.distance_to_point(5, 9), 4.0);
    }

    #[test]
    fn node_id_display_is_compact() {
        assert_eq!(NodeId::wall(2, 7).to_string(), "2F/wall#7");
    }
}
