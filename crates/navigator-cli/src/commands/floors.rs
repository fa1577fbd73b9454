//! Floors command handler: a per-floor overview of the loaded map.

use std::io::Write;

use anyhow::Result;

use navigator_lib::Map;

use crate::output::{render_floors, FloorView, OutputFormat};

pub fn handle_floors_command(out: &mut impl Write, map: &Map, format: OutputFormat) -> Result<()> {
    let floors: Vec<FloorView> = map.floors().iter().map(FloorView::from).collect();
    render_floors(out, map.name(), &floors, format)?;
    Ok(())
}
