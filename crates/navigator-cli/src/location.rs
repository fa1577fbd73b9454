//! `FLOOR:X,Y` location arguments.

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Error, Result};
use navigator_lib::Location;

/// A point on a floor as typed on the command line, e.g. `1:40,60`.
///
/// The floor is the zero-based level index, matching the floor-plan document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloorPoint {
    pub floor: usize,
    pub x: i32,
    pub y: i32,
}

impl FloorPoint {
    pub fn to_location(self) -> Location {
        Location::point(self.floor, self.x, self.y)
    }
}

impl FromStr for FloorPoint {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let (floor, coords) = value
            .split_once(':')
            .with_context(|| format!("location '{value}' must look like FLOOR:X,Y"))?;
        let (x, y) = coords
            .split_once(',')
            .with_context(|| format!("location '{value}' must look like FLOOR:X,Y"))?;

        Ok(Self {
            floor: floor
                .trim()
                .parse()
                .with_context(|| format!("invalid floor '{}' in '{value}'", floor.trim()))?,
            x: x.trim()
                .parse()
                .with_context(|| format!("invalid x coordinate '{}' in '{value}'", x.trim()))?,
            y: y.trim()
                .parse()
                .with_context(|| format!("invalid y coordinate '{}' in '{value}'", y.trim()))?,
        })
    }
}

impl fmt::Display for FloorPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{},{}", self.floor, self.x, self.y)
    }
}
