use criterion::{criterion_group, criterion_main, Criterion};
use navigator_lib::{
    load_map, plan_route, Floor, Location, Map, NodeId, NodeSpec, RouteAlgorithm, RouteRequest,
};
use once_cell::sync::Lazy;
use std::hint::black_box;
use std::path::PathBuf;

const GRID: usize = 30;
const SPACING: i32 = 10;
const FLOORS: usize = 3;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/library.json")
}

/// Square guide grids stacked into a tower, with stairs in opposite corners
/// so each floor must be crossed diagonally.
fn grid_tower() -> Map {
    let last = GRID * GRID - 1;
    let floors = (0..FLOORS)
        .map(|level| {
            let mut floor = Floor::new(level);
            for row in 0..GRID {
                for col in 0..GRID {
                    let index = row * GRID + col;
                    let mut spec = NodeSpec::guide(col as i32 * SPACING, row as i32 * SPACING);
                    if index == 0 && level > 0 {
                        spec = spec.with_prev_entry(last);
                    }
                    if index == last && level + 1 < FLOORS {
                        spec = spec.with_next_entry(0);
                    }
                    floor.add_node(spec);
                }
            }
            for row in 0..GRID {
                for col in 0..GRID {
                    let here = NodeId::guide(level, row * GRID + col);
                    if col + 1 < GRID {
                        floor
                            .link(here, NodeId::guide(level, row * GRID + col + 1))
                            .expect("row link");
                    }
                    if row + 1 < GRID {
                        floor
                            .link(here, NodeId::guide(level, (row + 1) * GRID + col))
                            .expect("column link");
                    }
                }
            }
            floor
        })
        .collect();
    Map::from_floors("Grid Tower", floors).expect("grid tower is valid")
}

static LIBRARY: Lazy<Map> = Lazy::new(|| load_map(fixture_path()).expect("fixture loads"));
static TOWER: Lazy<Map> = Lazy::new(grid_tower);

fn tower_request(algorithm: RouteAlgorithm) -> RouteRequest {
    let far = (GRID as i32 - 1) * SPACING;
    RouteRequest::new(
        Location::point(0, 0, 0),
        Location::point(FLOORS - 1, far, far),
    )
    .with_algorithm(algorithm)
}

fn benchmark_pathfinding(c: &mut Criterion) {
    c.bench_function("dijkstra_library_entrance_roof", |b| {
        let map = &*LIBRARY;
        let request = RouteRequest::new(Location::point(0, 10, 10), Location::point(2, 90, 60));
        b.iter(|| {
            let plan = plan_route(map, &request).expect("route exists");
            black_box(plan.path.length())
        });
    });

    c.bench_function("dijkstra_grid_tower", |b| {
        let map = &*TOWER;
        let request = tower_request(RouteAlgorithm::Dijkstra);
        b.iter(|| {
            let plan = plan_route(map, &request).expect("route exists");
            black_box(plan.hop_count())
        });
    });

    c.bench_function("astar_grid_tower", |b| {
        let map = &*TOWER;
        let request = tower_request(RouteAlgorithm::AStar);
        b.iter(|| {
            let plan = plan_route(map, &request).expect("route exists");
            black_box(plan.hop_count())
        });
    });

    c.bench_function("nearest_guide_grid_floor", |b| {
        let floor = TOWER.floor(0).expect("ground floor");
        b.iter(|| black_box(floor.nearest_guide_node(black_box(143), black_box(217))));
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
