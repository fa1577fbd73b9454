//! Nearest-node queries over a floor's node collections.
//!
//! Floors are small (hundreds of guide nodes at most), so queries are linear
//! scans in collection order. Scanning in order makes ties deterministic: the
//! earliest node wins.

use crate::node::Node;

/// Query parameters for k-nearest searches.
#[derive(Debug, Clone, Default)]
pub struct NeighbourQuery {
    /// Maximum number of results to return.
    pub k: usize,
    /// Optional radius constraint in floor units.
    pub radius: Option<f64>,
}

impl NeighbourQuery {
    /// Create a simple k-nearest query without constraints.
    pub fn nearest(k: usize) -> Self {
        Self { k, radius: None }
    }

    /// Create a query with radius constraint.
    pub fn within_radius(k: usize, radius: f64) -> Self {
        Self {
            k,
            radius: Some(radius),
        }
    }
}

/// Return the node closest to `(x, y)`, or `None` when `nodes` is empty.
pub fn nearest<'a, I>(nodes: I, x: i32, y: i32) -> Option<&'a Node>
where
    I: IntoIterator<Item = &'a Node>,
{
    let mut best: Option<(&'a Node, f64)> = None;
    for node in nodes {
        let distance = node.distance_to_point(x, y);
        match best {
            Some((_, current)) if distance >= current => {}
            _ => best = Some((node, distance)),
        }
    }
    best.map(|(node, _)| node)
}

/// Return up to `query.k` nodes ordered by distance to `(x, y)`.
///
/// Equal distances keep collection order.
pub fn k_nearest<'a, I>(nodes: I, x: i32, y: i32, query: &NeighbourQuery) -> Vec<(&'a Node, f64)>
where
    I: IntoIterator<Item = &'a Node>,
{
    if query.k == 0 {
        return Vec::new();
    }

    let mut candidates: Vec<(&'a Node, f64)> = nodes
        .into_iter()
        .map(|node| (node, node.distance_to_point(x, y)))
        .filter(|(_, distance)| query.radius.is_none_or(|radius| *distance <= radius))
        .collect();

    // sort_by is stable, which preserves collection order on ties.
    candidates.sort_by(|a, b| a.1.total_cmp(&b.1));
    candidates.truncate(query.k);
    candidates
}
