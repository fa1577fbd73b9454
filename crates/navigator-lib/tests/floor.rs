use navigator_lib::{Floor, NeighbourQuery, NodeId, NodeKind, NodeSpec, FLOOR_PADDING};

#[test]
fn bounds_cover_every_node_plus_padding() {
    let mut floor = Floor::new(0);
    let points = [(10, 400), (250, 20), (-30, -30), (120, 120)];
    for &(x, y) in &points {
        floor.add_node(NodeSpec::guide(x, y));
        assert!(floor.width() >= x + FLOOR_PADDING);
        assert!(floor.height() >= y + FLOOR_PADDING);
    }
    floor.add_node(NodeSpec::wall(500, 0));

    assert_eq!(floor.width(), 500 + FLOOR_PADDING);
    assert_eq!(floor.height(), 400 + FLOOR_PADDING);
}

#[test]
fn bounds_never_shrink() {
    let mut floor = Floor::new(0);
    floor.add_node(NodeSpec::guide(100, 100));
    floor.add_node(NodeSpec::guide(1, 1));
    assert_eq!((floor.width(), floor.height()), (150, 150));
}

#[test]
fn nearest_guide_prefers_earlier_node_on_tie() {
    let mut floor = Floor::new(0);
    let first = floor.add_node(NodeSpec::guide(0, 0));
    let second = floor.add_node(NodeSpec::guide(10, 0));

    assert_eq!(floor.nearest_guide_node(5, 0).map(|n| n.id()), Some(first));
    assert_eq!(floor.nearest_guide_node(4, 0).map(|n| n.id()), Some(first));
    assert_eq!(floor.nearest_guide_node(6, 0).map(|n| n.id()), Some(second));
}

#[test]
fn nearest_entry_queries_only_see_their_subset() {
    let mut floor = Floor::new(1);
    floor.add_node(NodeSpec::guide(0, 0));
    let down = floor.add_node(NodeSpec::guide(50, 0).with_prev_entry(0));
    let up = floor.add_node(NodeSpec::guide(100, 0).with_next_entry(0));

    assert_eq!(floor.nearest_prev_entry_node(0, 0).map(|n| n.id()), Some(down));
    assert_eq!(floor.nearest_next_entry_node(0, 0).map(|n| n.id()), Some(up));
    assert_eq!(floor.prev_entry_nodes().count(), 1);
    assert_eq!(floor.next_entry_nodes().count(), 1);
}

#[test]
fn empty_floor_has_no_nearest_nodes() {
    let floor = Floor::new(3);
    assert!(floor.nearest_guide_node(0, 0).is_none());
    assert!(floor.nearest_prev_entry_node(0, 0).is_none());
    assert!(floor.nearest_next_entry_node(0, 0).is_none());
    assert!(floor.nearby_guide_nodes(0, 0, &NeighbourQuery::nearest(3)).is_empty());
}

#[test]
fn nearby_guides_respect_k_and_radius() {
    let mut floor = Floor::new(0);
    for x in [40, 0, 20, 10] {
        floor.add_node(NodeSpec::guide(x, 0));
    }

    let nearest: Vec<i32> = floor
        .nearby_guide_nodes(0, 0, &NeighbourQuery::nearest(3))
        .iter()
        .map(|(node, _)| node.x())
        .collect();
    assert_eq!(nearest, vec![0, 10, 20]);

    let within = floor.nearby_guide_nodes(0, 0, &NeighbourQuery::within_radius(10, 15.0));
    assert_eq!(within.len(), 2);
}

#[test]
fn links_are_mutual_with_frozen_distance() {
    let mut floor = Floor::new(0);
    let a = floor.add_node(NodeSpec::guide(0, 0));
    let b = floor.add_node(NodeSpec::guide(6, 8));
    floor.link(a, b).expect("link");

    let forward = floor.node(a).and_then(|n| n.link_to(b)).expect("a->b");
    let backward = floor.node(b).and_then(|n| n.link_to(a)).expect("b->a");
    assert_eq!(forward.distance, 10.0);
    assert_eq!(backward.distance, 10.0);

    let links = floor.links();
    assert_eq!(links.len(), 1);
    assert_eq!((links[0].start, links[0].end), (a, b));
}

#[test]
fn walls_and_guides_keep_separate_indices() {
    let mut floor = Floor::new(2);
    let wall = floor.add_node(NodeSpec::wall(0, 0));
    let guide = floor.add_node(NodeSpec::guide(0, 0));

    assert_eq!(wall, NodeId::wall(2, 0));
    assert_eq!(guide, NodeId::guide(2, 0));
    assert_eq!(floor.nodes(NodeKind::Wall).len(), 1);
    assert_eq!(floor.nodes(NodeKind::Guide).len(), 1);
    assert!(floor.link(wall, guide).is_err());
}

#[test]
fn name_search_is_case_insensitive() {
    let mut floor = Floor::new(0);
    floor.add_node(NodeSpec::guide(0, 0).named("Help Desk"));
    floor.add_node(NodeSpec::guide(10, 0).named("Front Desk"));
    floor.add_node(NodeSpec::guide(20, 0));

    let hits: Vec<&str> = floor
        .find_guide_nodes_by_name("DESK")
        .iter()
        .filter_map(|n| n.name())
        .collect();
    assert_eq!(hits, vec!["Help Desk", "Front Desk"]);
    assert!(floor.find_guide_nodes_by_name("  ").is_empty());
}
