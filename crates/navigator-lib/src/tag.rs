//! Free-text node annotations loaded from tag documents.

use serde::{Deserialize, Serialize};

use crate::node::{NodeId, NodeKind};

/// Free-text annotation attached to one node, such as a room number.
///
/// Tags are display metadata only; they never influence search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub floor: usize,
    pub node_index: usize,
    pub node_type: NodeKind,
    pub value: String,
}

impl Tag {
    pub fn new(node: NodeId, value: impl Into<String>) -> Self {
        Self {
            floor: node.floor,
            node_index: node.index,
            node_type: node.kind,
            value: value.into(),
        }
    }

    /// The node this tag annotates.
    pub fn node_id(&self) -> NodeId {
        NodeId::new(self.floor, self.node_type, self.node_index)
    }
}
