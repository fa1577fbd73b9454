//! Floor-plan and tag documents.
//!
//! Both formats are JSON. A floor-plan document lists node records followed
//! by link records that address nodes by `(floor, kind, index)`; a tag
//! document lists tags in the same addressing scheme.
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "name": "Library",
//!   "floors": 2,
//!   "nodes": [
//!     { "floor": 0, "kind": "guide", "x": 10, "y": 10, "name": "Entrance" },
//!     { "floor": 0, "kind": "guide", "x": 80, "y": 10, "next": 0 },
//!     { "floor": 1, "kind": "guide", "x": 80, "y": 10, "prev": 1 }
//!   ],
//!   "links": [
//!     { "floor": 0, "kind": "guide", "start": 0, "end": 1 }
//!   ]
//! }
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::map::{Map, MAX_FLOORS};
use crate::node::NodeKind;
use crate::tag::Tag;

/// Floor-plan document version understood by this loader.
pub const FLOOR_PLAN_VERSION: &str = "1.0";

/// Tag document version understood by this loader.
pub const TAG_DOCUMENT_VERSION: &str = "1.1";

/// One node as written in a floor-plan document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub floor: usize,
    pub kind: NodeKind,
    pub x: i32,
    pub y: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Guide index on the floor below.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<usize>,
    /// Guide index on the floor above.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<usize>,
}

impl NodeRecord {
    pub fn wall(floor: usize, x: i32, y: i32) -> Self {
        Self {
            floor,
            kind: NodeKind::Wall,
            x,
            y,
            name: None,
            prev: None,
            next: None,
        }
    }

    pub fn guide(floor: usize, x: i32, y: i32) -> Self {
        Self {
            kind: NodeKind::Guide,
            ..Self::wall(floor, x, y)
        }
    }
}

/// One link as written in a floor-plan document. Both ends share `kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub floor: usize,
    pub kind: NodeKind,
    pub start: usize,
    pub end: usize,
}

/// A whole building as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorPlanDocument {
    pub version: String,
    pub name: String,
    /// Number of floors; inferred from the records when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floors: Option<usize>,
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub links: Vec<LinkRecord>,
}

impl FloorPlanDocument {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Declared floor count, or one past the highest floor any record uses.
    ///
    /// An inferred count never exceeds [`MAX_FLOORS`]; a record above that
    /// limit is reported instead.
    pub fn floor_count(&self) -> Result<usize> {
        if let Some(declared) = self.floors {
            return Ok(declared);
        }
        let node_floors = self.nodes.iter().map(|node| node.floor);
        let link_floors = self.links.iter().map(|link| link.floor);
        Ok(inferred_floor_count(node_floors)?.max(inferred_floor_count(link_floors)?))
    }

    /// Validate the version and build the map.
    pub fn into_map(self) -> Result<Map> {
        check_version("floor plan", &self.version, FLOOR_PLAN_VERSION)?;
        let floor_count = self.floor_count()?;
        Map::from_records(self.name, floor_count, &self.nodes, &self.links)
    }
}

/// A set of tags as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDocument {
    pub version: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl TagDocument {
    pub fn new(tags: Vec<Tag>) -> Self {
        Self {
            version: TAG_DOCUMENT_VERSION.to_string(),
            tags,
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Validate the version and hand back the tags.
    pub fn into_tags(self) -> Result<Vec<Tag>> {
        check_version("tag", &self.version, TAG_DOCUMENT_VERSION)?;
        Ok(self.tags)
    }
}

/// Load and build a map from a floor-plan document on disk.
pub fn load_map(path: impl AsRef<Path>) -> Result<Map> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let document: FloorPlanDocument = serde_json::from_reader(reader)?;
    let map = document.into_map()?;
    info!(
        path = %path.display(),
        name = map.name(),
        floors = map.floor_count(),
        "loaded floor plan"
    );
    Ok(map)
}

/// Load tags from a tag document on disk.
pub fn load_tags(path: impl AsRef<Path>) -> Result<Vec<Tag>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let document: TagDocument = serde_json::from_reader(reader)?;
    let tags = document.into_tags()?;
    info!(path = %path.display(), count = tags.len(), "loaded tags");
    Ok(tags)
}

/// Write tags to disk as a tag document.
pub fn save_tags(path: impl AsRef<Path>, tags: &[Tag]) -> Result<()> {
    let document = TagDocument::new(tags.to_vec());
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    serde_json::to_writer_pretty(&mut writer, &document)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

fn inferred_floor_count(floors: impl Iterator<Item = usize>) -> Result<usize> {
    let mut count = 0;
    for (record, floor) in floors.enumerate() {
        if floor >= MAX_FLOORS {
            return Err(Error::FloorOutOfRange {
                record,
                floor,
                floor_count: MAX_FLOORS,
            });
        }
        count = count.max(floor + 1);
    }
    Ok(count)
}

fn check_version(document: &'static str, found: &str, expected: &'static str) -> Result<()> {
    if found == expected {
        Ok(())
    } else {
        Err(Error::UnsupportedVersion {
            document,
            found: found.to_string(),
            expected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_count_is_inferred_from_records() {
        let document = FloorPlanDocument {
            version: FLOOR_PLAN_VERSION.to_string(),
            name: "Annex".to_string(),
            floors: None,
            nodes: vec![NodeRecord::guide(0, 0, 0), NodeRecord::wall(2, 5, 5)],
            links: Vec::new(),
        };
        assert_eq!(document.floor_count().unwrap(), 3);
        let map = document.into_map().expect("valid document");
        assert_eq!(map.floor_count(), 3);
        assert!(map.floor(1).unwrap().guide_nodes().is_empty());
    }

    #[test]
    fn unsupported_tag_version_is_rejected() {
        let document = TagDocument::from_json(r#"{ "version": "1.0", "tags": [] }"#).unwrap();
        let err = document.into_tags().expect_err("old version");
        assert!(format!("{err}").contains("expected 1.1"));
    }

    #[test]
    fn node_record_defaults_optional_fields() {
        let record: NodeRecord =
            serde_json::from_str(r#"{ "floor": 1, "kind": "wall", "x": 3, "y": 4 }"#).unwrap();
        assert_eq!(record, NodeRecord::wall(1, 3, 4));
    }

    #[test]
    fn wall_record_with_name_is_rejected() {
        let document = FloorPlanDocument {
            version: FLOOR_PLAN_VERSION.to_string(),
            name: "Bad".to_string(),
            floors: Some(1),
            nodes: vec![NodeRecord {
                name: Some("Pillar".to_string()),
                ..NodeRecord::wall(0, 0, 0)
            }],
            links: Vec::new(),
        };
        let err = document.into_map().expect_err("wall with name");
        assert!(matches!(err, Error::WallNodeWithGuideData { record: 0 }));
    }
}
