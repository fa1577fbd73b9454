// Module exports for CLI subcommands
//
// Each module handles one subcommand. main.rs parses arguments, loads the map
// once, and dispatches to these handlers.

pub mod find;
pub mod floors;
pub mod nearest;
pub mod route;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use navigator_lib::{load_map, load_tags, Map};

/// Load a floor-plan document and, if given, attach a tag document to it.
pub fn load_map_with_tags(map_path: &Path, tags_path: Option<&Path>) -> Result<Map> {
    let mut map = load_map(map_path)
        .with_context(|| format!("failed to load floor plan from {}", map_path.display()))?;

    if let Some(tags_path) = tags_path {
        let tags = load_tags(tags_path)
            .with_context(|| format!("failed to load tags from {}", tags_path.display()))?;
        let count = tags.len();
        map.set_tags(tags)
            .with_context(|| format!("tags in {} do not match the floor plan", tags_path.display()))?;
        info!(count, "attached tags");
    }
    Ok(map)
}
