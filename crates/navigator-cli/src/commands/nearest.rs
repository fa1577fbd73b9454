//! Nearest command handler: guide nodes closest to a floor position.

use std::io::Write;

use anyhow::{Context, Result};

use navigator_lib::{Map, NeighbourQuery};

use crate::location::FloorPoint;
use crate::output::{render_nodes, NodeView, OutputFormat};

/// Arguments for the nearest command.
#[derive(Debug, Clone)]
pub struct NearestCommandArgs {
    pub at: FloorPoint,
    /// Maximum number of nodes to list.
    pub k: usize,
    /// Only list nodes within this distance.
    pub radius: Option<f64>,
}

impl NearestCommandArgs {
    fn query(&self) -> NeighbourQuery {
        match self.radius {
            Some(radius) => NeighbourQuery::within_radius(self.k, radius),
            None => NeighbourQuery::nearest(self.k),
        }
    }
}

/// Handle the nearest subcommand.
pub fn handle_nearest_command(
    out: &mut impl Write,
    map: &Map,
    format: OutputFormat,
    args: &NearestCommandArgs,
) -> Result<()> {
    let floor = map.floor(args.at.floor).with_context(|| {
        format!(
            "floor {} does not exist; the map has {} floors",
            args.at.floor,
            map.floor_count()
        )
    })?;

    let views: Vec<NodeView> = floor
        .nearby_guide_nodes(args.at.x, args.at.y, &args.query())
        .into_iter()
        .map(|(node, distance)| NodeView::new(map, node, Some(distance)))
        .collect();

    render_nodes(out, &views, format)?;
    Ok(())
}
