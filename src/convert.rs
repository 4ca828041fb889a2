//! Export to GPX conversion

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use gpx::Gpx;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::config::{Configs, TrackOptions};
use crate::generator::writer;
use crate::sources::{AbrpWorkbook, TripSource};
use crate::{ConvertError, GpxGenerator, Tracker, Trip};

/// One conversion run
#[derive(Clone, Debug)]
pub struct ConvertOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub configs: Configs,
}

impl ConvertOptions {
    /// Default output path and configuration
    pub fn new(input: PathBuf) -> Self {
        Self {
            output: default_output(&input),
            input,
            configs: Configs::default(),
        }
    }
}

/// Outcome of a successful run
#[derive(Clone, Debug, PartialEq)]
pub struct ConvertSummary {
    pub waypoints: usize,
    pub output: PathBuf,
}

/// Read the export and write its GPX
///
/// The output is only touched after the whole export was read.
pub fn convert(options: &ConvertOptions) -> Result<ConvertSummary, ConvertError> {
    debug!("input file:  {}", options.input.display());
    debug!("output file: {}", options.output.display());

    let trip = {
        let mut source = AbrpWorkbook::open(&options.input, options.configs.source.clone())?;
        source.fetch()?
    };

    let doc = build_gpx(&trip, &options.configs.track, OffsetDateTime::now_utc());
    writer::save(&doc, &options.output)?;

    info!("Wrote gpx file to \"{}\".", options.output.display());

    Ok(ConvertSummary {
        waypoints: trip.waypoints.len(),
        output: options.output.clone(),
    })
}

/// GPX document of the trip, `created` is its metadata time
pub fn build_gpx(trip: &Trip, track: &TrackOptions, created: OffsetDateTime) -> Gpx {
    let mut generator = GpxGenerator::for_trip(&trip.metadata);
    generator.tracks.push(
        Tracker::new()
            .elevation(track.elevation)
            .build(&trip.waypoints),
    );

    generator.generate(created)
}

/// `trip.xlsx` becomes `trip.gpx`, never the input itself
pub fn default_output(input: &Path) -> PathBuf {
    let output = input.with_extension("gpx");
    if output != input {
        return output;
    }

    let mut name = OsString::from(input.as_os_str());
    name.push(".gpx");
    PathBuf::from(name)
}
