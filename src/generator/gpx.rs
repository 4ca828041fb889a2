//! GPX generator API

use gpx::{Gpx, GpxVersion, Metadata, Track};
use time::OffsetDateTime;

use super::position::TripMetadata;

/// Value of the `creator` attribute
pub const CREATOR: &str = concat!("abrp2gpx version ", env!("CARGO_PKG_VERSION"));

pub struct GpxGenerator {
    pub description: Option<String>,
    pub tracks: Vec<Track>,
}

impl GpxGenerator {
    /// Generator describing the given trip
    ///
    /// The description is always written, empty for an untitled export.
    pub fn for_trip(metadata: &TripMetadata) -> Self {
        Self {
            description: Some(metadata.title.clone().unwrap_or_default()),
            tracks: vec![],
        }
    }

    /// Assemble the document, `created` goes into the metadata time
    pub fn generate(self, created: OffsetDateTime) -> Gpx {
        let mut metadata = Metadata::default();
        metadata.description = self.description;
        metadata.time = Some(created.into());

        let mut gpx: Gpx = Default::default();
        gpx.version = GpxVersion::Gpx11;
        gpx.creator = Some(CREATOR.to_string());
        gpx.metadata = Some(metadata);
        gpx.tracks = self.tracks;

        gpx
    }
}
