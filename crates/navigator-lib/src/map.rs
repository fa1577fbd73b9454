//! A building: its floors in level order plus attached tags.

use tracing::debug;

use crate::document::{LinkRecord, NodeRecord};
use crate::error::{EntryDirection, Error, Result};
use crate::floor::Floor;
use crate::node::{GuideDetail, Node, NodeDetail, NodeId, NodeKind, NodeSpec};
use crate::tag::Tag;

/// Upper bound on the number of floors in one map.
pub const MAX_FLOORS: usize = 256;

/// Similarity threshold for destination name suggestions.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A building loaded into memory.
///
/// Floors are indexed by level, 0 being the ground floor. Once built, the
/// node and link graph is read-only; only tags may change.
#[derive(Debug, Clone, Default)]
pub struct Map {
    name: String,
    floors: Vec<Floor>,
    tags: Vec<Tag>,
}

impl Map {
    /// Assemble a map from floors built by hand.
    ///
    /// Floor levels must match their positions, and every floor entry must
    /// point at an existing guide node on the adjacent floor.
    pub fn from_floors(name: impl Into<String>, floors: Vec<Floor>) -> Result<Self> {
        for (position, floor) in floors.iter().enumerate() {
            if floor.level() != position {
                return Err(Error::FloorLevelMismatch {
                    position,
                    level: floor.level(),
                });
            }
        }

        let map = Self {
            name: name.into(),
            floors,
            tags: Vec::new(),
        };
        map.validate_entries()?;
        Ok(map)
    }

    /// Build a map from loader records, nodes first and then links.
    ///
    /// `floor_count` may not exceed [`MAX_FLOORS`], and every record must sit
    /// on one of those floors; both are checked before anything is built.
    /// Any invalid record aborts the whole build.
    pub fn from_records(
        name: impl Into<String>,
        floor_count: usize,
        nodes: &[NodeRecord],
        links: &[LinkRecord],
    ) -> Result<Self> {
        if floor_count > MAX_FLOORS {
            return Err(Error::TooManyFloors {
                declared: floor_count,
                max: MAX_FLOORS,
            });
        }
        let node_floors = nodes.iter().map(|node| node.floor);
        let link_floors = links.iter().map(|link| link.floor);
        check_record_floors(node_floors, floor_count)?;
        check_record_floors(link_floors, floor_count)?;

        let mut floors: Vec<Floor> = (0..floor_count).map(Floor::new).collect();

        for (record, node) in nodes.iter().enumerate() {
            let spec = node_spec(record, node)?;
            if let Some(floor) = floors.get_mut(node.floor) {
                floor.add_node(spec);
            }
        }

        for (record, link) in links.iter().enumerate() {
            if let Some(floor) = floors.get_mut(link.floor) {
                floor
                    .add_link(link.kind, link.start, link.kind, link.end)
                    .map_err(|source| Error::InvalidLink {
                        record,
                        source: Box::new(source),
                    })?;
            }
        }

        let map = Self::from_floors(name, floors)?;
        debug!(
            name = %map.name,
            floors = map.floor_count(),
            nodes = nodes.len(),
            links = links.len(),
            "built map from records"
        );
        Ok(map)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    pub fn floor(&self, level: usize) -> Option<&Floor> {
        self.floors.get(level)
    }

    /// Look up any node in the building by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.floor(id.floor)?.node(id)
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Replace all tags. Every tag must name an existing node.
    pub fn set_tags(&mut self, tags: Vec<Tag>) -> Result<()> {
        self.validate_tags(&tags)?;
        self.tags = tags;
        Ok(())
    }

    /// Add tags, replacing any existing tag on the same node.
    ///
    /// Validation happens before any change, so a bad batch leaves the
    /// current tags untouched.
    pub fn merge_tags(&mut self, tags: Vec<Tag>) -> Result<()> {
        self.validate_tags(&tags)?;
        for tag in tags {
            let id = tag.node_id();
            match self.tags.iter_mut().find(|existing| existing.node_id() == id) {
                Some(existing) => *existing = tag,
                None => self.tags.push(tag),
            }
        }
        Ok(())
    }

    /// The node a tag annotates, if it exists.
    pub fn resolve_tag(&self, tag: &Tag) -> Option<&Node> {
        self.node(tag.node_id())
    }

    /// Tags attached to `id`, in insertion order.
    pub fn tags_for(&self, id: NodeId) -> Vec<&Tag> {
        self.tags.iter().filter(|tag| tag.node_id() == id).collect()
    }

    /// Case-insensitive name search across every floor, lowest floor first.
    pub fn find_guide_nodes_by_name(&self, pattern: &str) -> Vec<&Node> {
        self.floors
            .iter()
            .flat_map(|floor| floor.find_guide_nodes_by_name(pattern))
            .collect()
    }

    /// Guide nodes whose tag value contains `pattern`, ignoring case.
    pub fn find_tagged_nodes(&self, pattern: &str) -> Vec<(&Tag, &Node)> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Vec::new();
        }
        let needle = pattern.to_lowercase();
        self.tags
            .iter()
            .filter(|tag| tag.node_type == NodeKind::Guide)
            .filter(|tag| tag.value.to_lowercase().contains(&needle))
            .filter_map(|tag| self.resolve_tag(tag).map(|node| (tag, node)))
            .collect()
    }

    /// Resolve a destination typed by a user to a guide node.
    ///
    /// Exact (case-insensitive) name or tag matches win over substring
    /// matches. Unknown names fail with close suggestions.
    pub fn resolve_destination(&self, name: &str) -> Result<&Node> {
        let needle = name.trim().to_lowercase();

        let exact_name = self
            .floors
            .iter()
            .flat_map(|floor| floor.guide_nodes())
            .find(|node| node.name().is_some_and(|n| n.to_lowercase() == needle));
        let exact_tag = || {
            self.find_tagged_nodes(name)
                .into_iter()
                .find(|(tag, _)| tag.value.to_lowercase() == needle)
                .map(|(_, node)| node)
        };
        let partial_name = || self.find_guide_nodes_by_name(name).into_iter().next();
        let partial_tag = || {
            self.find_tagged_nodes(name)
                .into_iter()
                .next()
                .map(|(_, node)| node)
        };

        exact_name
            .or_else(exact_tag)
            .or_else(partial_name)
            .or_else(partial_tag)
            .ok_or_else(|| Error::UnknownDestination {
                name: name.to_string(),
                suggestions: self.suggest_destinations(name, 3),
            })
    }

    /// Guide names and tag values that resemble `name`, best first.
    pub fn suggest_destinations(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.trim().to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .floors
            .iter()
            .flat_map(|floor| floor.guide_nodes())
            .filter_map(|node| node.name())
            .chain(
                self.tags
                    .iter()
                    .filter(|tag| tag.node_type == NodeKind::Guide)
                    .map(|tag| tag.value.as_str()),
            )
            .map(|candidate| {
                let score = strsim::jaro_winkler(&needle, &candidate.to_lowercase());
                (score, candidate)
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));

        let mut suggestions: Vec<String> = Vec::new();
        for (_, candidate) in scored {
            if suggestions.len() == limit {
                break;
            }
            if !suggestions.iter().any(|s| s == candidate) {
                suggestions.push(candidate.to_string());
            }
        }
        suggestions
    }

    fn validate_tags(&self, tags: &[Tag]) -> Result<()> {
        for (record, tag) in tags.iter().enumerate() {
            let floor = self.floor(tag.floor).ok_or(Error::FloorOutOfRange {
                record,
                floor: tag.floor,
                floor_count: self.floor_count(),
            });
            let resolved = floor.and_then(|floor| floor.try_node(tag.node_id()).map(|_| ()));
            resolved.map_err(|source| Error::InvalidTag {
                record,
                source: Box::new(source),
            })?;
        }
        Ok(())
    }

    fn validate_entries(&self) -> Result<()> {
        for floor in &self.floors {
            for node in floor.guide_nodes() {
                let index = node.id().index;
                if let Some(target) = node.prev_entry() {
                    self.check_entry(floor.level(), index, EntryDirection::Previous, target)?;
                }
                if let Some(target) = node.next_entry() {
                    self.check_entry(floor.level(), index, EntryDirection::Next, target)?;
                }
            }
        }
        Ok(())
    }

    fn check_entry(
        &self,
        floor: usize,
        index: usize,
        direction: EntryDirection,
        target: usize,
    ) -> Result<()> {
        let target_floor = match direction {
            EntryDirection::Previous => floor.checked_sub(1),
            EntryDirection::Next => Some(floor + 1).filter(|&f| f < self.floor_count()),
        };
        let Some(target_floor) = target_floor else {
            return Err(Error::NoAdjacentFloor {
                floor,
                index,
                direction,
            });
        };

        if self.node(NodeId::guide(target_floor, target)).is_none() {
            return Err(Error::MissingEntryTarget {
                floor,
                index,
                direction,
                target_floor,
                target,
            });
        }
        Ok(())
    }
}

/// Fail on the first record whose floor is not below `floor_count`.
fn check_record_floors(floors: impl Iterator<Item = usize>, floor_count: usize) -> Result<()> {
    for (record, floor) in floors.enumerate() {
        if floor >= floor_count {
            return Err(Error::FloorOutOfRange {
                record,
                floor,
                floor_count,
            });
        }
    }
    Ok(())
}

fn node_spec(record: usize, node: &NodeRecord) -> Result<NodeSpec> {
    let detail = match node.kind {
        NodeKind::Wall => {
            if node.name.is_some() || node.prev.is_some() || node.next.is_some() {
                return Err(Error::WallNodeWithGuideData { record });
            }
            NodeDetail::Wall
        }
        NodeKind::Guide => NodeDetail::Guide(GuideDetail {
            name: node.name.clone(),
            prev_entry: node.prev,
            next_entry: node.next,
        }),
    };
    Ok(NodeSpec {
        x: node.x,
        y: node.y,
        detail,
    })
}
