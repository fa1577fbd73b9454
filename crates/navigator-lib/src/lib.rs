//! Indoor navigation library entry points.
//!
//! This crate models a building as floors of wall and guide nodes, answers
//! nearest-node queries, and plans walking routes that may cross floors
//! through stair and lift entries. Higher-level consumers (the CLI, map
//! renderers) should only depend on the functions exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod document;
pub mod error;
pub mod floor;
pub mod map;
pub mod node;
pub mod output;
pub mod path;
pub mod routing;
pub mod search;
pub mod spatial;
pub mod tag;

pub use document::{
    load_map, load_tags, save_tags, FloorPlanDocument, LinkRecord, NodeRecord, TagDocument,
};
pub use error::{EntryDirection, Error, Result};
pub use floor::{Floor, FloorLink, FLOOR_PADDING};
pub use map::{Map, MAX_FLOORS};
pub use node::{GuideDetail, Link, Node, NodeDetail, NodeId, NodeKind, NodeSpec};
pub use output::{RouteEndpoint, RouteStep, RouteSummary};
pub use path::{Path, PathNode};
pub use routing::{
    assemble_route, plan_route, Location, RouteAlgorithm, RoutePlan, RouteRequest, RouteSegment,
};
pub use search::{find_floor_path, find_route_a_star, find_route_dijkstra};
pub use spatial::NeighbourQuery;
pub use tag::Tag;
