//! Single-floor shortest-path search over guide nodes.
//!
//! Wall nodes never take part: a search that starts or ends on one, or on a
//! node from another floor, finds nothing.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::floor::Floor;
use crate::node::{euclidean, Node, NodeId, NodeKind};
use crate::path::Path;

/// Find the shortest guide path from `start` to `goal` with Dijkstra's algorithm.
pub fn find_route_dijkstra(floor: &Floor, start: NodeId, goal: NodeId) -> Option<Vec<NodeId>> {
    search(floor, start, goal, |_| 0.0)
}

/// Find the shortest guide path using A* with a straight-line heuristic.
///
/// Link weights are straight-line distances, so the heuristic never
/// overestimates and the result has the same length Dijkstra would find.
pub fn find_route_a_star(floor: &Floor, start: NodeId, goal: NodeId) -> Option<Vec<NodeId>> {
    let (goal_x, goal_y) = floor.node(goal).map(|node| (node.x(), node.y()))?;
    search(floor, start, goal, |node| {
        euclidean(node.x(), node.y(), goal_x, goal_y)
    })
}

/// Shortest path between two guide nodes of one floor, as a [`Path`].
pub fn find_floor_path(floor: &Floor, start: NodeId, goal: NodeId) -> Option<Path> {
    find_route_dijkstra(floor, start, goal).map(|ids| path_from_ids(floor, &ids))
}

/// Build a path by appending the floor's nodes for `ids` in order.
///
/// Ids that do not resolve on `floor` are skipped.
pub fn path_from_ids(floor: &Floor, ids: &[NodeId]) -> Path {
    let mut path = Path::new();
    path.extend_tail(ids.iter().filter_map(|id| floor.node(*id)));
    path
}

fn search<H>(floor: &Floor, start: NodeId, goal: NodeId, heuristic: H) -> Option<Vec<NodeId>>
where
    H: Fn(&Node) -> f64,
{
    if !is_searchable(floor, start) || !is_searchable(floor, goal) {
        debug!(%start, %goal, floor = floor.level(), "search endpoints are not guide nodes of this floor");
        return None;
    }
    if start == goal {
        return Some(vec![start]);
    }

    let nodes = floor.guide_nodes();
    let mut distances = vec![f64::INFINITY; nodes.len()];
    let mut parents: Vec<Option<usize>> = vec![None; nodes.len()];
    let mut settled = vec![false; nodes.len()];
    let mut queue = BinaryHeap::new();
    let mut sequence = 0u64;

    distances[start.index] = 0.0;
    queue.push(QueueEntry::new(start.index, heuristic(&nodes[start.index]), sequence));

    while let Some(entry) = queue.pop() {
        let current = entry.node;
        if settled[current] {
            continue;
        }
        settled[current] = true;

        if current == goal.index {
            return Some(reconstruct_path(floor.level(), &parents, start.index, goal.index));
        }

        let current_distance = distances[current];
        for link in nodes[current].links() {
            let next = link.target.index;
            if link.target.kind != NodeKind::Guide || settled[next] {
                continue;
            }

            let next_distance = current_distance + link.distance;
            // Strict comparison keeps the first predecessor found on ties.
            if next_distance < distances[next] {
                distances[next] = next_distance;
                parents[next] = Some(current);
                sequence += 1;
                queue.push(QueueEntry::new(
                    next,
                    next_distance + heuristic(&nodes[next]),
                    sequence,
                ));
            }
        }
    }

    debug!(%start, %goal, floor = floor.level(), "goal unreachable");
    None
}

fn is_searchable(floor: &Floor, id: NodeId) -> bool {
    id.kind == NodeKind::Guide && floor.node(id).is_some()
}

fn reconstruct_path(level: usize, parents: &[Option<usize>], start: usize, goal: usize) -> Vec<NodeId> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(NodeId::guide(level, node));
        if node == start {
            break;
        }
        current = parents[node];
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: usize,
    priority: FloatOrd,
    sequence: u64,
}

impl QueueEntry {
    fn new(node: usize, priority: f64, sequence: u64) -> Self {
        Self {
            node,
            priority: FloatOrd(priority),
            sequence,
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap; earlier pushes win ties.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
