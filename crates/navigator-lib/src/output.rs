use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::map::Map;
use crate::node::NodeId;
use crate::path::PathNode;
use crate::routing::{RouteAlgorithm, RoutePlan};

/// Endpoint within a planned route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteEndpoint {
    pub id: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RouteEndpoint {
    fn new(map: &Map, id: NodeId) -> Self {
        Self {
            id,
            name: display_name(map, id),
        }
    }

    fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.id.to_string())
    }
}

/// Step taken during traversal of a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub x: i32,
    pub y: i32,
    /// Length walked from the previous step.
    pub distance: f64,
    /// Set when this step is on a different floor than the previous one.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub floor_change: bool,
}

impl RouteStep {
    fn label(&self) -> String {
        match (&self.name, self.node) {
            (Some(name), _) => name.clone(),
            (None, Some(id)) => id.to_string(),
            (None, None) => format!("({}, {})", self.x, self.y),
        }
    }
}

/// Structured representation of a planned route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub map: String,
    pub algorithm: RouteAlgorithm,
    pub hops: usize,
    pub floor_changes: usize,
    pub total_length: f64,
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a summary with resolved names and tags.
    pub fn from_plan(map: &Map, plan: &RoutePlan) -> Result<Self> {
        let nodes = plan.path.nodes();
        if nodes.is_empty() {
            return Err(Error::EmptyRoutePlan);
        }

        let mut steps = Vec::with_capacity(nodes.len());
        let mut previous: Option<&PathNode> = None;
        for (index, node) in nodes.iter().enumerate() {
            let floor_change = previous
                .and_then(|prev| prev.floor.zip(node.floor))
                .is_some_and(|(a, b)| a != b);
            let distance = match previous {
                Some(_) if floor_change => 0.0,
                Some(prev) => prev.distance_to(node),
                None => 0.0,
            };
            steps.push(RouteStep {
                index,
                floor: node.floor,
                node: node.id,
                name: node.id.and_then(|id| display_name(map, id)),
                x: node.x,
                y: node.y,
                distance,
                floor_change,
            });
            previous = Some(node);
        }

        Ok(Self {
            map: map.name().to_string(),
            algorithm: plan.algorithm,
            hops: plan.hop_count(),
            floor_changes: plan.floor_changes(),
            total_length: plan.path.length(),
            start: RouteEndpoint::new(map, plan.start),
            goal: RouteEndpoint::new(map, plan.goal),
            steps,
        })
    }

    /// Plain-text rendering, one line per step.
    pub fn render_plain(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Route from {} to {} ({} steps, {} floor changes; algorithm: {}):",
            self.start.display_name(),
            self.goal.display_name(),
            self.hops,
            self.floor_changes,
            self.algorithm
        );
        for step in &self.steps {
            let floor = step
                .floor
                .map(|f| format!("{}F", f))
                .unwrap_or_else(|| "--".to_string());
            if step.floor_change {
                let _ = writeln!(out, "   ~ change floor to {}", floor);
            }
            let _ = writeln!(
                out,
                " - [{}] {} at ({}, {}) +{:.1}",
                floor,
                step.label(),
                step.x,
                step.y,
                step.distance
            );
        }
        let _ = writeln!(out, "\nTotal length: {:.1}", self.total_length);
        out
    }
}

/// Guide name, falling back to the first tag value.
fn display_name(map: &Map, id: NodeId) -> Option<String> {
    map.node(id)
        .and_then(|node| node.name().map(str::to_string))
        .or_else(|| map.tags_for(id).first().map(|tag| tag.value.clone()))
}
