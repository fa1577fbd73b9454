//! Single-floor search strategies implementing the Strategy pattern.
//!
//! Route assembly asks a [`RoutePlanner`] for each per-floor segment, so a new
//! algorithm only needs a new implementation here.

use crate::floor::Floor;
use crate::node::NodeId;
use crate::search::{find_route_a_star, find_route_dijkstra};

use super::RouteAlgorithm;

/// Trait for single-floor search strategies.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Shortest guide-node path between two nodes of `floor`.
    ///
    /// Returns `None` when the goal is unreachable.
    fn find_path(&self, floor: &Floor, start: NodeId, goal: NodeId) -> Option<Vec<NodeId>>;
}

/// Dijkstra's algorithm over link distances.
#[derive(Debug, Clone, Default)]
pub struct DijkstraPlanner;

impl RoutePlanner for DijkstraPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn find_path(&self, floor: &Floor, start: NodeId, goal: NodeId) -> Option<Vec<NodeId>> {
        find_route_dijkstra(floor, start, goal)
    }
}

/// A* guided by straight-line distance to the goal.
#[derive(Debug, Clone, Default)]
pub struct AStarPlanner;

impl RoutePlanner for AStarPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::AStar
    }

    fn find_path(&self, floor: &Floor, start: NodeId, goal: NodeId) -> Option<Vec<NodeId>> {
        find_route_a_star(floor, start, goal)
    }
}

/// Select the planner for an algorithm.
pub fn select_planner(algorithm: RouteAlgorithm) -> Box<dyn RoutePlanner> {
    match algorithm {
        RouteAlgorithm::Dijkstra => Box::new(DijkstraPlanner),
        RouteAlgorithm::AStar => Box::new(AStarPlanner),
    }
}
