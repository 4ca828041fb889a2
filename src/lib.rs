//! abrp2gpx - GPX generator for A Better Routeplanner trip exports

pub mod config;
mod convert;
mod error;
mod generator;
pub mod sources;

pub use config::{Configs, RowPolicy};
pub use convert::{build_gpx, convert, default_output, ConvertOptions, ConvertSummary};
pub use error::ConvertError;
pub use generator::gpx::{GpxGenerator, CREATOR};
pub use generator::position::{CellValue, Trip, TripMetadata, Waypoint};
pub use generator::tracker::Tracker;
pub use generator::writer;
pub use sources::{AbrpWorkbook, TripSource};
