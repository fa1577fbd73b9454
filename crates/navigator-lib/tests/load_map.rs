mod common;

use std::fs;

use navigator_lib::{
    load_map, load_tags, save_tags, Error, FloorPlanDocument, NodeId, NodeKind, Tag, MAX_FLOORS,
};
use tempfile::tempdir;

use common::{library_plan_path, library_tags_path};

#[test]
fn library_fixture_loads() {
    let map = load_map(library_plan_path()).expect("fixture loads");
    assert_eq!(map.name(), "Riverside Library");
    assert_eq!(map.floor_count(), 3);

    let ground = map.floor(0).expect("ground floor");
    assert_eq!(ground.wall_nodes().len(), 4);
    assert_eq!(ground.guide_nodes().len(), 5);
    assert_eq!(ground.width(), 180);
    assert_eq!(ground.height(), 130);
    assert_eq!(ground.next_entry_nodes().count(), 1);
    assert_eq!(ground.prev_entry_nodes().count(), 0);

    let stairs = map.node(NodeId::guide(1, 0)).expect("stairs");
    assert_eq!(stairs.name(), Some("Main Stairs"));
    assert_eq!(stairs.prev_entry(), Some(3));
}

#[test]
fn library_tags_attach_to_fixture() {
    let mut map = load_map(library_plan_path()).expect("fixture loads");
    let tags = load_tags(library_tags_path()).expect("tags load");
    map.set_tags(tags).expect("tags valid");

    let node = map.resolve_destination("information").expect("tagged node");
    assert_eq!(node.name(), Some("Help Desk"));
    assert_eq!(map.tags_for(NodeId::guide(1, 2))[0].value, "Periodicals");
}

#[test]
fn bad_link_index_fails_whole_load() {
    let text = r#"{
        "version": "1.0",
        "name": "Broken",
        "nodes": [ { "floor": 0, "kind": "guide", "x": 0, "y": 0 } ],
        "links": [ { "floor": 0, "kind": "guide", "start": 0, "end": 7 } ]
    }"#;
    let err = FloorPlanDocument::from_json(text)
        .and_then(FloorPlanDocument::into_map)
        .expect_err("bad link");

    match err {
        Error::InvalidLink { record, source } => {
            assert_eq!(record, 0);
            assert!(matches!(
                *source,
                Error::NodeIndexOutOfRange {
                    kind: NodeKind::Guide,
                    index: 7,
                    len: 1,
                    ..
                }
            ));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_entry_target_fails_load() {
    let text = r#"{
        "version": "1.0",
        "name": "Half Built",
        "floors": 2,
        "nodes": [ { "floor": 0, "kind": "guide", "x": 0, "y": 0, "next": 2 } ]
    }"#;
    let err = FloorPlanDocument::from_json(text)
        .and_then(FloorPlanDocument::into_map)
        .expect_err("missing target");
    assert!(matches!(
        err,
        Error::MissingEntryTarget {
            target_floor: 1,
            target: 2,
            ..
        }
    ));
}

#[test]
fn record_on_missing_floor_fails_load() {
    let text = r#"{
        "version": "1.0",
        "name": "Short",
        "floors": 1,
        "nodes": [ { "floor": 1, "kind": "guide", "x": 0, "y": 0 } ]
    }"#;
    let err = FloorPlanDocument::from_json(text)
        .and_then(FloorPlanDocument::into_map)
        .expect_err("floor out of range");
    assert!(matches!(
        err,
        Error::FloorOutOfRange {
            floor: 1,
            floor_count: 1,
            ..
        }
    ));
}

#[test]
fn highest_possible_floor_index_fails_load() {
    let text = r#"{
        "version": "1.0",
        "name": "Overflow",
        "nodes": [ { "floor": 18446744073709551615, "kind": "guide", "x": 0, "y": 0 } ]
    }"#;
    let err = FloorPlanDocument::from_json(text)
        .and_then(FloorPlanDocument::into_map)
        .expect_err("floor index out of range");
    assert!(matches!(
        err,
        Error::FloorOutOfRange {
            record: 0,
            floor: usize::MAX,
            floor_count: MAX_FLOORS,
        }
    ));
}

#[test]
fn link_floor_beyond_limit_fails_inferred_count() {
    let text = r#"{
        "version": "1.0",
        "name": "Far Link",
        "nodes": [ { "floor": 0, "kind": "guide", "x": 0, "y": 0 } ],
        "links": [
            { "floor": 0, "kind": "guide", "start": 0, "end": 0 },
            { "floor": 4096, "kind": "guide", "start": 0, "end": 1 }
        ]
    }"#;
    let err = FloorPlanDocument::from_json(text)
        .and_then(FloorPlanDocument::into_map)
        .expect_err("link floor out of range");
    assert!(matches!(
        err,
        Error::FloorOutOfRange {
            record: 1,
            floor: 4096,
            ..
        }
    ));
}

#[test]
fn huge_declared_floor_count_is_rejected() {
    let text = r#"{
        "version": "1.0",
        "name": "Skyhook",
        "floors": 1000000000000,
        "nodes": [ { "floor": 0, "kind": "guide", "x": 0, "y": 0 } ]
    }"#;
    let err = FloorPlanDocument::from_json(text)
        .and_then(FloorPlanDocument::into_map)
        .expect_err("too many floors");
    assert!(matches!(
        err,
        Error::TooManyFloors {
            declared: 1_000_000_000_000,
            max: MAX_FLOORS,
        }
    ));
}

#[test]
fn declared_floor_count_at_limit_loads() {
    let text = format!(
        r#"{{
            "version": "1.0",
            "name": "Tall",
            "floors": {MAX_FLOORS},
            "nodes": [ {{ "floor": {}, "kind": "guide", "x": 0, "y": 0 }} ]
        }}"#,
        MAX_FLOORS - 1
    );
    let map = FloorPlanDocument::from_json(&text)
        .and_then(FloorPlanDocument::into_map)
        .expect("within limit");
    assert_eq!(map.floor_count(), MAX_FLOORS);
    assert_eq!(map.floor(MAX_FLOORS - 1).unwrap().guide_nodes().len(), 1);
}

#[test]
fn unsupported_plan_version_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("plan.json");
    fs::write(&path, r#"{ "version": "2.0", "name": "Future", "nodes": [] }"#).unwrap();

    let err = load_map(&path).expect_err("version");
    assert!(matches!(err, Error::UnsupportedVersion { .. }));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempdir().expect("tempdir");
    let err = load_map(dir.path().join("absent.json")).expect_err("missing");
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn saved_tags_load_back() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("tags.json");
    let tags = vec![
        Tag::new(NodeId::guide(0, 4), "Toilets"),
        Tag::new(NodeId::wall(1, 0), "North wall"),
    ];

    save_tags(&path, &tags).expect("save");
    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("\"version\": \"1.1\""));

    let loaded = load_tags(&path).expect("load");
    assert_eq!(loaded, tags);

    let mut map = load_map(library_plan_path()).expect("fixture loads");
    map.set_tags(loaded).expect("tags resolve");
    assert_eq!(map.find_tagged_nodes("toilet").len(), 1);
    assert!(map.find_tagged_nodes("north").is_empty());
}
