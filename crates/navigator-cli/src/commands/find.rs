//! Find command handler: search guide nodes by name and tag.

use std::io::Write;

use anyhow::Result;

use navigator_lib::{Error as LibError, Map, NodeId};

use crate::output::{render_nodes, NodeView, OutputFormat};

const SUGGESTION_LIMIT: usize = 3;

/// Handle the find subcommand.
///
/// Name matches come first, then tag matches for nodes not already listed.
/// An empty result is an error carrying close suggestions.
pub fn handle_find_command(
    out: &mut impl Write,
    map: &Map,
    format: OutputFormat,
    name: &str,
) -> Result<()> {
    let mut seen: Vec<NodeId> = Vec::new();
    let mut views = Vec::new();

    let by_name = map.find_guide_nodes_by_name(name);
    let by_tag = map.find_tagged_nodes(name).into_iter().map(|(_, node)| node);
    for node in by_name.into_iter().chain(by_tag) {
        if seen.contains(&node.id()) {
            continue;
        }
        seen.push(node.id());
        views.push(NodeView::new(map, node, None));
    }

    if views.is_empty() {
        return Err(LibError::UnknownDestination {
            name: name.to_string(),
            suggestions: map.suggest_destinations(name, SUGGESTION_LIMIT),
        }
        .into());
    }

    render_nodes(out, &views, format)?;
    Ok(())
}
