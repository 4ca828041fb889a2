//! ABRP trip export (.xlsx) source

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::{Path, PathBuf};

use calamine::{Data, Range, Reader, Xlsx};
use geo::geometry::Point;
use time::macros::datetime;
use time::{Duration, PrimitiveDateTime};
use tracing::{debug, info, warn};

use super::TripSource;
use crate::config::{RowPolicy, SourceOptions, TimestampFormat};
use crate::{CellValue, ConvertError, Trip, TripMetadata, Waypoint};

/// Sheet holding the trip in every ABRP export
pub const SHEET_NAME: &str = "ABRP Activity";

// Zero based (row, column) positions
const TITLE_CELL: (u32, u32) = (0, 0); // A1
const ODOMETER_START_CELL: (u32, u32) = (4, 10); // K5
const ODOMETER_END_CELL: (u32, u32) = (4, 11); // L5

/// Rows 1-8 are the header block
const FIRST_DATA_ROW: u32 = 8;

const TIME_COLUMN: u32 = 0;
const LATITUDE_COLUMN: u32 = 1;
const LONGITUDE_COLUMN: u32 = 2;
const ELEVATION_COLUMN: u32 = 4;

/// ABRP workbook source
pub struct AbrpWorkbook<R>
where
    R: Read + Seek,
{
    path: PathBuf,
    workbook: Xlsx<R>,
    options: SourceOptions,
}

impl AbrpWorkbook<BufReader<File>> {
    /// Open the export stored at `path`
    pub fn open(path: &Path, options: SourceOptions) -> Result<Self, ConvertError> {
        let file = File::open(path).map_err(|source| ConvertError::InputNotFound {
            path: path.to_path_buf(),
            source,
        })?;

        Self::new(BufReader::new(file), path, options)
    }
}

impl<R> AbrpWorkbook<R>
where
    R: Read + Seek,
{
    /// Read the export from `reader`, `path` only names it in logs and errors
    pub fn new(reader: R, path: &Path, options: SourceOptions) -> Result<Self, ConvertError> {
        let workbook = Xlsx::new(reader).map_err(|source| ConvertError::Workbook {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            workbook,
            options,
        })
    }
}

impl<R> TripSource for AbrpWorkbook<R>
where
    R: Read + Seek,
{
    fn fetch(&mut self) -> Result<Trip, ConvertError> {
        if !self.workbook.sheet_names().iter().any(|s| s == SHEET_NAME) {
            return Err(ConvertError::UnexpectedFormat {
                path: self.path.clone(),
                sheet: SHEET_NAME.to_string(),
            });
        }

        let sheet = self
            .workbook
            .worksheet_range(SHEET_NAME)
            .map_err(|source| ConvertError::Workbook {
                path: self.path.clone(),
                source,
            })?;

        let metadata = read_metadata(&sheet);
        info!("Input file: \"{}\"", self.path.display());
        info!("Title: \"{}\"", metadata.title.as_deref().unwrap_or_default());
        info!(
            "Odometer: {} - {}",
            metadata.odometer_start, metadata.odometer_end
        );

        let waypoints = read_waypoints(&sheet, &self.options)?;
        info!("Read {} waypoints from input file", waypoints.len());

        Ok(Trip {
            metadata,
            waypoints,
        })
    }
}

fn read_metadata(sheet: &Range<Data>) -> TripMetadata {
    TripMetadata {
        title: cell_value(sheet.get_value(TITLE_CELL)).text(),
        odometer_start: cell_value(sheet.get_value(ODOMETER_START_CELL)),
        odometer_end: cell_value(sheet.get_value(ODOMETER_END_CELL)),
    }
}

fn read_waypoints(
    sheet: &Range<Data>,
    options: &SourceOptions,
) -> Result<Vec<Waypoint>, ConvertError> {
    let mut waypoints = vec![];

    let last = match sheet.end() {
        Some((row, _)) => row,
        None => return Ok(waypoints),
    };

    for row in FIRST_DATA_ROW..=last {
        match parse_row(sheet, row, &options.timestamp_format) {
            Ok(Some(wp)) => waypoints.push(wp),
            Ok(None) => debug!("Row {} is empty", row + 1),
            Err(e) if e.is_row_error() && options.malformed_rows == RowPolicy::Skip => {
                warn!("Skipping row: {}", e);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(waypoints)
}

/// Map one sheet row to a waypoint, `None` for blank rows
fn parse_row(
    sheet: &Range<Data>,
    row: u32,
    format: &TimestampFormat,
) -> Result<Option<Waypoint>, ConvertError> {
    // 1-based, as shown by spreadsheet apps
    let line = row + 1;

    let time_cell = sheet.get_value((row, TIME_COLUMN));
    let lat_cell = cell_value(sheet.get_value((row, LATITUDE_COLUMN)));
    let lon_cell = cell_value(sheet.get_value((row, LONGITUDE_COLUMN)));

    if cell_value(time_cell).is_empty() && lat_cell.is_empty() && lon_cell.is_empty() {
        return Ok(None);
    }

    let time = parse_time(time_cell, format, line)?;
    debug!("  timestamp of row {} is {}", line, time);

    let lat = number(&lat_cell).map_err(|reason| ConvertError::MalformedRow {
        row: line,
        column: "latitude",
        reason,
    })?;
    let lon = number(&lon_cell).map_err(|reason| ConvertError::MalformedRow {
        row: line,
        column: "longitude",
        reason,
    })?;

    let mut wp = Waypoint::basic(Point::new(lon, lat), time);

    let ele_cell = cell_value(sheet.get_value((row, ELEVATION_COLUMN)));
    if !ele_cell.is_empty() {
        wp.elevation = match number(&ele_cell) {
            Ok(ele) => Some(ele),
            Err(e) => {
                warn!("Row {}: ignoring elevation: {}", line, e);
                None
            }
        };
    }

    Ok(Some(wp))
}

fn parse_time(
    cell: Option<&Data>,
    format: &TimestampFormat,
    line: u32,
) -> Result<PrimitiveDateTime, ConvertError> {
    let malformed = |value: String, reason: String| ConvertError::MalformedTimestamp {
        row: line,
        value,
        reason,
    };

    match cell {
        Some(Data::String(text)) => format
            .parse(text)
            .map_err(|e| malformed(text.clone(), e.to_string())),
        Some(Data::DateTime(dt)) => {
            let serial = dt.as_f64();
            from_serial(serial)
                .ok_or_else(|| malformed(serial.to_string(), "date out of range".to_string()))
        }
        None | Some(Data::Empty) => Err(malformed(String::new(), "missing value".to_string())),
        Some(other) => Err(malformed(
            other.to_string(),
            format!("does not match \"{}\"", format.as_str()),
        )),
    }
}

/// Spreadsheet serial date (days since 1899-12-30) to date time, ms precision
fn from_serial(serial: f64) -> Option<PrimitiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }

    let millis = (serial * 86_400_000.0).round() as i64;

    datetime!(1899-12-30 0:00).checked_add(Duration::milliseconds(millis))
}

fn cell_value(cell: Option<&Data>) -> CellValue {
    match cell {
        None | Some(Data::Empty) => CellValue::Empty,
        Some(Data::Float(f)) => CellValue::Number(*f),
        Some(Data::Int(i)) => CellValue::Number(*i as f64),
        Some(Data::Bool(b)) => CellValue::Bool(*b),
        Some(Data::String(s)) => CellValue::Text(s.clone()),
        Some(other) => CellValue::Text(other.to_string()),
    }
}

fn number(cell: &CellValue) -> Result<f64, String> {
    let n = match cell {
        CellValue::Number(n) => *n,
        CellValue::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("\"{}\": {}", s, e))?,
        CellValue::Empty => return Err("missing value".to_string()),
        CellValue::Bool(b) => return Err(format!("unexpected value {}", b)),
    };

    if n.is_finite() {
        Ok(n)
    } else {
        Err(format!("not a finite number: {}", n))
    }
}
