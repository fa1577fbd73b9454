//! Multi-floor route assembly.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Supported single-floor search algorithms
//! - [`Location`] - A route endpoint, either a point on a floor or a node
//! - [`RouteRequest`] - High-level route planning request
//! - [`RoutePlan`] - Planned route result with per-floor segments
//! - [`plan_route`] - Main entry point for computing routes
//!
//! # Floor transitions
//!
//! Routes that change floors walk one floor at a time. On each floor the
//! nearest entry node in the direction of travel is chosen greedily, a
//! segment is searched to it, and the entry's paired node on the adjacent
//! floor becomes the next starting point. The greedy choice is local; a
//! farther staircase can occasionally give a shorter overall route.
//!
//! # Example
//!
//! ```ignore
//! use navigator_lib::{load_map, plan_route, Location, RouteRequest};
//!
//! let map = load_map("building.json")?;
//! let request = RouteRequest::new(Location::point(0, 40, 60), Location::point(2, 300, 90));
//! match plan_route(&map, &request) {
//!     Some(plan) => println!("{:.1} units over {} floors", plan.path.length(), plan.segments.len()),
//!     None => println!("no route"),
//! }
//! ```

mod planner;

pub use planner::{select_planner, AStarPlanner, DijkstraPlanner, RoutePlanner};

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::floor::Floor;
use crate::map::Map;
use crate::node::{Node, NodeId, NodeKind};
use crate::path::{Path, PathNode};
use crate::search::path_from_ids;

/// Supported single-floor search algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// Dijkstra's algorithm.
    #[default]
    Dijkstra,
    /// A* search guided by straight-line distance.
    #[serde(rename = "a-star")]
    AStar,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Dijkstra => "dijkstra",
            RouteAlgorithm::AStar => "a-star",
        };
        f.write_str(value)
    }
}

/// Where a route starts or ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Floor coordinates, e.g. a position fix or a tap. Resolved to the
    /// nearest guide node of that floor.
    Point { floor: usize, x: i32, y: i32 },
    /// A specific guide node.
    Node(NodeId),
}

impl Location {
    pub fn point(floor: usize, x: i32, y: i32) -> Self {
        Location::Point { floor, x, y }
    }

    pub fn node(id: NodeId) -> Self {
        Location::Node(id)
    }

    pub fn floor(&self) -> usize {
        match self {
            Location::Point { floor, .. } => *floor,
            Location::Node(id) => id.floor,
        }
    }

    /// Resolve to the guide node a route through this location uses.
    pub fn resolve<'a>(&self, map: &'a Map) -> Option<&'a Node> {
        match *self {
            Location::Point { floor, x, y } => map.floor(floor)?.nearest_guide_node(x, y),
            Location::Node(id) if id.kind == NodeKind::Guide => map.node(id),
            Location::Node(_) => None,
        }
    }

    fn synthetic_node(&self) -> Option<PathNode> {
        match *self {
            Location::Point { floor, x, y } => Some(PathNode::point_on(floor, x, y)),
            Location::Node(_) => None,
        }
    }
}

/// High-level route planning request.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub start: Location,
    pub goal: Location,
    pub algorithm: RouteAlgorithm,
    /// Include the raw start and goal points in the path, joined to the graph
    /// by straight lines. Has no effect on node locations.
    pub anchor_endpoints: bool,
}

impl RouteRequest {
    /// Dijkstra request without anchored endpoints.
    pub fn new(start: Location, goal: Location) -> Self {
        Self {
            start,
            goal,
            algorithm: RouteAlgorithm::default(),
            anchor_endpoints: false,
        }
    }

    pub fn with_algorithm(mut self, algorithm: RouteAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn anchored(mut self) -> Self {
        self.anchor_endpoints = true;
        self
    }
}

/// The part of a route that lies on one floor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSegment {
    pub floor: usize,
    pub start: NodeId,
    pub end: NodeId,
    pub length: f64,
}

/// Planned route returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub algorithm: RouteAlgorithm,
    pub start: NodeId,
    pub goal: NodeId,
    pub path: Path,
    pub segments: Vec<RouteSegment>,
}

impl RoutePlan {
    /// Number of steps between consecutive path nodes.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Number of floor changes along the route.
    pub fn floor_changes(&self) -> usize {
        self.segments.len().saturating_sub(1)
    }
}

/// Route between two locations with Dijkstra, returning only the path.
pub fn assemble_route(map: &Map, start: Location, goal: Location) -> Option<Path> {
    plan_route(map, &RouteRequest::new(start, goal)).map(|plan| plan.path)
}

/// Compute a route for `request`, possibly spanning several floors.
///
/// Returns `None` when either location resolves to no guide node, when an
/// intermediate floor offers no entry in the direction of travel, or when a
/// per-floor segment is unreachable.
pub fn plan_route(map: &Map, request: &RouteRequest) -> Option<RoutePlan> {
    let Some(start) = request.start.resolve(map) else {
        debug!(location = ?request.start, "start location resolves to no guide node");
        return None;
    };
    let Some(goal) = request.goal.resolve(map) else {
        debug!(location = ?request.goal, "goal location resolves to no guide node");
        return None;
    };

    let planner = select_planner(request.algorithm);
    let goal_floor = goal.id().floor;
    let mut current = start;
    let mut path = Path::new();
    let mut segments = Vec::new();

    while current.id().floor != goal_floor {
        let floor = map.floor(current.id().floor)?;
        let ascending = goal_floor > floor.level();
        let (entry, landing) = next_transition(map, floor, current, ascending)?;

        segments.push(walk_segment(planner.as_ref(), floor, current, entry, &mut path)?);
        current = landing;
    }

    let floor = map.floor(goal_floor)?;
    segments.push(walk_segment(planner.as_ref(), floor, current, goal, &mut path)?);

    if request.anchor_endpoints {
        if let Some(point) = request.start.synthetic_node() {
            path.append_head_node(point);
        }
        if let Some(point) = request.goal.synthetic_node() {
            path.append_tail_node(point);
        }
    }

    Some(RoutePlan {
        algorithm: request.algorithm,
        start: start.id(),
        goal: goal.id(),
        path,
        segments,
    })
}

/// Pick the entry nearest `current` toward the goal and the node it lands on.
fn next_transition<'a>(
    map: &'a Map,
    floor: &'a Floor,
    current: &Node,
    ascending: bool,
) -> Option<(&'a Node, &'a Node)> {
    let (entry, target_floor, target_index) = if ascending {
        let entry = floor.nearest_next_entry_node(current.x(), current.y())?;
        (entry, floor.level() + 1, entry.next_entry()?)
    } else {
        let entry = floor.nearest_prev_entry_node(current.x(), current.y())?;
        (entry, floor.level().checked_sub(1)?, entry.prev_entry()?)
    };

    let landing = map.node(NodeId::guide(target_floor, target_index));
    if landing.is_none() {
        warn!(entry = %entry.id(), target_floor, target_index, "floor entry points at a missing node");
    }
    debug!(entry = %entry.id(), ascending, "selected floor entry");
    Some((entry, landing?))
}

fn walk_segment(
    planner: &dyn RoutePlanner,
    floor: &Floor,
    from: &Node,
    to: &Node,
    path: &mut Path,
) -> Option<RouteSegment> {
    let Some(ids) = planner.find_path(floor, from.id(), to.id()) else {
        debug!(from = %from.id(), to = %to.id(), "no segment on floor {}", floor.level());
        return None;
    };

    let segment = path_from_ids(floor, &ids);
    path.extend_tail(ids.iter().filter_map(|id| floor.node(*id)));
    debug!(
        floor = floor.level(),
        nodes = segment.len(),
        length = segment.length(),
        "walked floor segment"
    );

    Some(RouteSegment {
        floor: floor.level(),
        start: from.id(),
        end: to.id(),
        length: segment.length(),
    })
}
