//! Trip data definition

use std::fmt;

use geo::geometry::Point;
use time::PrimitiveDateTime;

/// A single recorded location sample of the trip
#[derive(Clone, Debug, PartialEq)]
pub struct Waypoint {
    /// x = longitude, y = latitude, both in degrees
    pub coordinates: Point,
    pub elevation: Option<f64>,
    /// Wall-clock time as exported, without any zone information
    pub time: PrimitiveDateTime,
    pub name: Option<String>,
}

impl Waypoint {
    pub fn basic(coordinates: Point, time: PrimitiveDateTime) -> Self {
        Self {
            coordinates,
            elevation: None,
            time,
            name: None,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates.y()
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates.x()
    }
}

/// Raw content of a spreadsheet cell, kept as found
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Text form of the value, `None` for empty cells
    pub fn text(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self.to_string())
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Header block of the export
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TripMetadata {
    pub title: Option<String>,
    pub odometer_start: CellValue,
    pub odometer_end: CellValue,
}

/// Everything read from an export, waypoints in recording order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trip {
    pub metadata: TripMetadata,
    pub waypoints: Vec<Waypoint>,
}
