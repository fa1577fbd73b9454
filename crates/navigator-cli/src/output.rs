//! Output formatting for CLI results.
//!
//! Every renderer writes to a caller-supplied writer so commands print to
//! stdout while tests capture into a buffer.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use navigator_lib::{Floor, Map, Node, NodeId, RouteSummary};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// A guide node as reported by `find` and `nearest`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NodeView {
    pub id: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub x: i32,
    pub y: i32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Distance from the query point, for proximity searches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl NodeView {
    pub fn new(map: &Map, node: &Node, distance: Option<f64>) -> Self {
        Self {
            id: node.id(),
            name: node.name().map(str::to_string),
            x: node.x(),
            y: node.y(),
            tags: map
                .tags_for(node.id())
                .into_iter()
                .map(|tag| tag.value.clone())
                .collect(),
            distance,
        }
    }
}

/// Per-floor overview reported by `floors`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FloorView {
    pub level: usize,
    pub width: i32,
    pub height: i32,
    pub wall_nodes: usize,
    pub guide_nodes: usize,
    pub links: usize,
    pub prev_entries: usize,
    pub next_entries: usize,
}

impl From<&Floor> for FloorView {
    fn from(floor: &Floor) -> Self {
        Self {
            level: floor.level(),
            width: floor.width(),
            height: floor.height(),
            wall_nodes: floor.wall_nodes().len(),
            guide_nodes: floor.guide_nodes().len(),
            links: floor.links().len(),
            prev_entries: floor.prev_entry_nodes().count(),
            next_entries: floor.next_entry_nodes().count(),
        }
    }
}

/// Write any serialisable value as pretty JSON followed by a newline.
pub fn render_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(io::Error::other)?;
    out.write_all(b"\n")
}

pub fn render_route(
    out: &mut impl Write,
    summary: &RouteSummary,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => out.write_all(summary.render_plain().as_bytes()),
        OutputFormat::Json => render_json(out, summary),
    }
}

pub fn render_nodes(
    out: &mut impl Write,
    nodes: &[NodeView],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => render_json(out, nodes),
        OutputFormat::Text => {
            for node in nodes {
                write!(out, " - [{}] {}", node.id, node.name.as_deref().unwrap_or("<unnamed>"))?;
                write!(out, " at ({}, {})", node.x, node.y)?;
                if !node.tags.is_empty() {
                    write!(out, " tags: {}", node.tags.join(", "))?;
                }
                if let Some(distance) = node.distance {
                    write!(out, " ({distance:.1} away)")?;
                }
                writeln!(out)?;
            }
            Ok(())
        }
    }
}

pub fn render_floors(
    out: &mut impl Write,
    map_name: &str,
    floors: &[FloorView],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => render_json(out, floors),
        OutputFormat::Text => {
            writeln!(out, "{} ({} floors):", map_name, floors.len())?;
            for floor in floors {
                writeln!(
                    out,
                    " - {}F: {}x{}, {} guide / {} wall nodes, {} links, entries down {} up {}",
                    floor.level,
                    floor.width,
                    floor.height,
                    floor.guide_nodes,
                    floor.wall_nodes,
                    floor.links,
                    floor.prev_entries,
                    floor.next_entries
                )?;
            }
            Ok(())
        }
    }
}
