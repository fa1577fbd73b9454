//! Ordered route accumulator with an incrementally maintained length.
//!
//! A [`Path`] copies node identity and coordinates into its own sequence, so
//! it can be displayed, trimmed, or forked without borrowing the floors it was
//! built from.

use serde::Serialize;

use crate::node::{euclidean, Node, NodeId};

/// A node as recorded in a path.
///
/// `id` is `None` for synthetic points such as a raw user location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PathNode {
    pub id: Option<NodeId>,
    pub floor: Option<usize>,
    pub x: i32,
    pub y: i32,
}

impl PathNode {
    /// A synthetic point with no floor attached.
    pub fn point(x: i32, y: i32) -> Self {
        Self {
            id: None,
            floor: None,
            x,
            y,
        }
    }

    /// A synthetic point on a known floor.
    pub fn point_on(floor: usize, x: i32, y: i32) -> Self {
        Self {
            id: None,
            floor: Some(floor),
            x,
            y,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        self.id.is_none()
    }

    pub fn distance_to(&self, other: &PathNode) -> f64 {
        euclidean(self.x, self.y, other.x, other.y)
    }
}

impl From<&Node> for PathNode {
    fn from(node: &Node) -> Self {
        let id = node.id();
        Self {
            id: Some(id),
            floor: Some(id.floor),
            x: node.x(),
            y: node.y(),
        }
    }
}

/// Length contributed by stepping from `from` to `to`.
///
/// Changing floors is free: stairs and lifts have no planar length. Otherwise
/// the link distance is used when one is known, falling back to the straight
/// line between the two points.
fn step_length(from: &PathNode, to: &PathNode, link_distance: Option<f64>) -> f64 {
    match (from.floor, to.floor) {
        (Some(a), Some(b)) if a != b => 0.0,
        _ => link_distance.unwrap_or_else(|| from.distance_to(to)),
    }
}

fn link_distance(node: &Node, neighbour: Option<&PathNode>) -> Option<f64> {
    neighbour
        .and_then(|other| other.id)
        .and_then(|id| node.link_to(id))
        .map(|link| link.distance)
}

/// An ordered route with its running total length.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Path {
    nodes: Vec<PathNode>,
    length: f64,
}

impl Path {
    /// An empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// A path starting at a synthetic point.
    pub fn from_point(x: i32, y: i32) -> Self {
        let mut path = Self::new();
        path.append_tail_node(PathNode::point(x, y));
        path
    }

    /// A path starting at a graph node.
    pub fn from_node(node: &Node) -> Self {
        let mut path = Self::new();
        path.append_tail(node);
        path
    }

    pub fn nodes(&self) -> &[PathNode] {
        &self.nodes
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn start(&self) -> Option<&PathNode> {
        self.nodes.first()
    }

    pub fn end(&self) -> Option<&PathNode> {
        self.nodes.last()
    }

    /// Append a graph node, preferring the link distance to the current end.
    pub fn append_tail(&mut self, node: &Node) -> &mut Self {
        let distance = link_distance(node, self.nodes.last());
        self.push_tail(PathNode::from(node), distance)
    }

    /// Append a path node as-is, measured by straight-line distance.
    pub fn append_tail_node(&mut self, node: PathNode) -> &mut Self {
        self.push_tail(node, None)
    }

    /// Append each node in order.
    pub fn extend_tail<'a, I>(&mut self, nodes: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a Node>,
    {
        for node in nodes {
            self.append_tail(node);
        }
        self
    }

    /// Prepend a graph node, preferring the link distance to the current start.
    pub fn append_head(&mut self, node: &Node) -> &mut Self {
        let distance = link_distance(node, self.nodes.first());
        self.push_head(PathNode::from(node), distance)
    }

    /// Prepend a path node as-is, measured by straight-line distance.
    pub fn append_head_node(&mut self, node: PathNode) -> &mut Self {
        self.push_head(node, None)
    }

    /// Drop the last node. Does nothing on an empty path.
    pub fn remove_tail(&mut self) -> &mut Self {
        if let Some(old_tail) = self.nodes.pop() {
            if let Some(new_tail) = self.nodes.last() {
                self.length -= step_length(new_tail, &old_tail, None);
            }
            if self.nodes.is_empty() {
                self.length = 0.0;
            }
        }
        self
    }

    /// Independent copy of this path, safe to mutate on a speculative branch.
    pub fn fork(&self) -> Path {
        Path {
            nodes: self.nodes.clone(),
            length: self.length,
        }
    }

    /// A new path visiting the same nodes backwards, with the same length.
    pub fn reverse(&self) -> Path {
        Path {
            nodes: self.nodes.iter().rev().copied().collect(),
            length: self.length,
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.nodes.iter().position(|node| node.id == Some(id))
    }

    pub fn is_end(&self, id: NodeId) -> bool {
        self.end().is_some_and(|end| end.id == Some(id))
    }

    /// Path node closest to `target` on the target's floor.
    ///
    /// Synthetic points without a floor are considered too. Ties go to the
    /// earliest node in the path.
    pub fn nearest_node_to(&self, target: &Node) -> Option<&PathNode> {
        let floor = target.id().floor;
        let mut best: Option<(&PathNode, f64)> = None;
        for node in self
            .nodes
            .iter()
            .filter(|node| node.floor.is_none_or(|f| f == floor))
        {
            let distance = target.distance_to_point(node.x, node.y);
            match best {
                Some((_, current)) if distance >= current => {}
                _ => best = Some((node, distance)),
            }
        }
        best.map(|(node, _)| node)
    }

    /// Distinct floors visited, in order of first appearance.
    pub fn floors(&self) -> Vec<usize> {
        let mut floors: Vec<usize> = Vec::new();
        for floor in self.nodes.iter().filter_map(|node| node.floor) {
            if !floors.contains(&floor) {
                floors.push(floor);
            }
        }
        floors
    }

    fn push_tail(&mut self, node: PathNode, link_distance: Option<f64>) -> &mut Self {
        if let Some(tail) = self.nodes.last() {
            self.length += step_length(tail, &node, link_distance);
        }
        self.nodes.push(node);
        self
    }

    fn push_head(&mut self, node: PathNode, link_distance: Option<f64>) -> &mut Self {
        if let Some(head) = self.nodes.first() {
            self.length += step_length(&node, head, link_distance);
        }
        self.nodes.insert(0, node);
        self
    }
}
