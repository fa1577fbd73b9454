//! Common test utilities and fixture helpers.

use std::path::PathBuf;

use navigator_lib::{Floor, Map, NodeId, NodeSpec, Path};

/// Floating-point tolerance for accumulated path lengths.
#[allow(dead_code)]
pub const EPSILON: f64 = 1e-9;

/// Path to fixtures directory used by tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Path to the three-floor library floor plan.
#[allow(dead_code)]
pub fn library_plan_path() -> PathBuf {
    fixtures_dir().join("library.json")
}

/// Path to the tag document for the library floor plan.
#[allow(dead_code)]
pub fn library_tags_path() -> PathBuf {
    fixtures_dir().join("library_tags.json")
}

/// Five guide nodes `A-B-C-D-E` one unit apart along the x axis, plus a
/// detour node `F` below `C` and `D` that is not linked yet.
///
/// Returns the floor and the ids in order `[A, B, C, D, E, F]`.
#[allow(dead_code)]
pub fn line_floor(link_c_d: bool) -> (Floor, Vec<NodeId>) {
    let mut floor = Floor::new(0);
    let ids: Vec<NodeId> = [(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (2, 1)]
        .iter()
        .map(|&(x, y)| floor.add_node(NodeSpec::guide(x, y)))
        .collect();

    floor.link(ids[0], ids[1]).expect("A-B");
    floor.link(ids[1], ids[2]).expect("B-C");
    if link_c_d {
        floor.link(ids[2], ids[3]).expect("C-D");
    }
    floor.link(ids[3], ids[4]).expect("D-E");
    (floor, ids)
}

/// Two floors joined by one stair pair.
///
/// Ground: `g0 (0,0) - g1 (30,40) [stairs up]`.
/// Upper: `u0 (30,40) [stairs down] - u1 (30,90)`.
#[allow(dead_code)]
pub fn two_floor_map() -> Map {
    let mut ground = Floor::new(0);
    let g0 = ground.add_node(NodeSpec::guide(0, 0).named("Lobby"));
    let g1 = ground.add_node(NodeSpec::guide(30, 40).named("Stairs").with_next_entry(0));
    ground.link(g0, g1).expect("ground link");

    let mut upper = Floor::new(1);
    let u0 = upper.add_node(NodeSpec::guide(30, 40).named("Stairs").with_prev_entry(1));
    let u1 = upper.add_node(NodeSpec::guide(30, 90).named("Office"));
    upper.link(u0, u1).expect("upper link");

    Map::from_floors("Two Floors", vec![ground, upper]).expect("valid map")
}

/// Sum of consecutive step lengths, treating floor changes as free.
#[allow(dead_code)]
pub fn measured_length(path: &Path) -> f64 {
    path.nodes()
        .windows(2)
        .map(|pair| match (pair[0].floor, pair[1].floor) {
            (Some(a), Some(b)) if a != b => 0.0,
            _ => pair[0].distance_to(&pair[1]),
        })
        .sum()
}

/// Node ids along a path, skipping synthetic points.
#[allow(dead_code)]
pub fn path_ids(path: &Path) -> Vec<NodeId> {
    path.nodes().iter().filter_map(|node| node.id).collect()
}
