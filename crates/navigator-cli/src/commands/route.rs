//! Route command handler for walking directions between two locations.

use std::io::Write;

use anyhow::{anyhow, Result};
use clap::ValueEnum;
use tracing::debug;

use navigator_lib::{plan_route, Location, Map, RouteAlgorithm, RouteRequest, RouteSummary};

use crate::location::FloorPoint;
use crate::output::{render_route, OutputFormat};

/// Algorithm names accepted by `--algorithm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AlgorithmArg {
    #[default]
    Dijkstra,
    AStar,
}

impl From<AlgorithmArg> for RouteAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Dijkstra => RouteAlgorithm::Dijkstra,
            AlgorithmArg::AStar => RouteAlgorithm::AStar,
        }
    }
}

/// Where the route should end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Point(FloorPoint),
    /// Guide node name or tag value, resolved against the map.
    Name(String),
}

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    pub from: FloorPoint,
    pub to: Destination,
    pub algorithm: AlgorithmArg,
    /// Include the raw start and goal points in the walked path.
    pub anchor: bool,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library [`RouteRequest`], resolving destination names.
    pub fn to_request(&self, map: &Map) -> Result<RouteRequest> {
        let goal = match &self.to {
            Destination::Point(point) => point.to_location(),
            Destination::Name(name) => Location::node(map.resolve_destination(name)?.id()),
        };
        let request = RouteRequest::new(self.from.to_location(), goal)
            .with_algorithm(self.algorithm.into());
        Ok(if self.anchor {
            request.anchored()
        } else {
            request
        })
    }
}

/// Handle the route subcommand.
pub fn handle_route_command(
    out: &mut impl Write,
    map: &Map,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let request = args.to_request(map)?;
    debug!(?request, "planning route");

    let plan = plan_route(map, &request).ok_or_else(|| {
        let goal = match &args.to {
            Destination::Point(point) => point.to_string(),
            Destination::Name(name) => name.clone(),
        };
        anyhow!("no route found from {} to {}", args.from, goal)
    })?;
    let summary = RouteSummary::from_plan(map, &plan)?;
    render_route(out, &summary, format)?;
    Ok(())
}
