use thiserror::Error;

use crate::node::NodeKind;

/// Convenient result alias for the navigator library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Every variant describes structurally invalid input. Expected absences such
/// as an unreachable destination are reported through `Option` instead.
#[derive(Debug, Error)]
pub enum Error {
    /// A record referenced a floor the map does not have.
    #[error("record {record} references floor {floor}, outside the {floor_count} floors of this map")]
    FloorOutOfRange {
        record: usize,
        floor: usize,
        floor_count: usize,
    },

    /// A floor plan asked for more floors than a map may hold.
    #[error("floor plan declares {declared} floors; at most {max} are supported")]
    TooManyFloors { declared: usize, max: usize },

    /// A floor was placed at a position that does not match its level.
    #[error("floor at position {position} reports level {level}")]
    FloorLevelMismatch { position: usize, level: usize },

    /// A link or tag referenced a node index past the end of its collection.
    #[error("{kind} node {index} does not exist on floor {floor} (floor has {len} {kind} nodes)")]
    NodeIndexOutOfRange {
        floor: usize,
        kind: NodeKind,
        index: usize,
        len: usize,
    },

    /// A link record referenced a node index that does not exist.
    #[error("link record {record} is invalid: {source}")]
    InvalidLink {
        record: usize,
        #[source]
        source: Box<Error>,
    },

    /// A tag record referenced a node that does not exist.
    #[error("tag record {record} is invalid: {source}")]
    InvalidTag {
        record: usize,
        #[source]
        source: Box<Error>,
    },

    /// A link record tried to join a wall node with a guide node.
    #[error("cannot link {start} node to {end} node on floor {floor}")]
    MixedLinkKinds {
        floor: usize,
        start: NodeKind,
        end: NodeKind,
    },

    /// A wall node record carried guide-only data (name or entry references).
    #[error("node record {record} is a wall node but declares a name or floor entry")]
    WallNodeWithGuideData { record: usize },

    /// A floor-transition reference pointed at a guide node that does not exist.
    #[error(
        "guide node {index} on floor {floor} has a {direction} entry to guide node {target} on floor {target_floor}, which does not exist"
    )]
    MissingEntryTarget {
        floor: usize,
        index: usize,
        direction: EntryDirection,
        target_floor: usize,
        target: usize,
    },

    /// A floor-transition reference pointed past the top or bottom floor.
    #[error("guide node {index} on floor {floor} has a {direction} entry but there is no adjacent floor")]
    NoAdjacentFloor {
        floor: usize,
        index: usize,
        direction: EntryDirection,
    },

    /// A document declared a version this loader does not understand.
    #[error("unsupported {document} document version {found}; expected {expected}")]
    UnsupportedVersion {
        document: &'static str,
        found: String,
        expected: &'static str,
    },

    /// A destination name did not match any guide node or tag.
    #[error("unknown destination name: {name}{}", format_suggestions(.suggestions))]
    UnknownDestination {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a route plan lacks any path nodes.
    #[error("route plan was empty")]
    EmptyRoutePlan,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON document errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Direction of a floor-transition reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryDirection {
    Previous,
    Next,
}

impl std::fmt::Display for EntryDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            EntryDirection::Previous => "previous-floor",
            EntryDirection::Next => "next-floor",
        })
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
