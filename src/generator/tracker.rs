//! Track generator API

use gpx::{Track, TrackSegment, Waypoint as GpxWaypoint};

use super::position::Waypoint;

pub struct Tracker {
    /// Emit the elevation of the positions
    pub elevation: bool,
}

impl Tracker {
    /// Start a new tracker instance
    pub fn new() -> Self {
        Self { elevation: true }
    }

    pub fn elevation(&mut self, elevation: bool) -> &mut Self {
        self.elevation = elevation;

        self
    }

    /// Build the track with the tracker params
    ///
    /// The whole trip is one continuous segment and the positions keep
    /// the order they were recorded in.
    pub fn build(&self, positions: &[Waypoint]) -> Track {
        let mut track = Track::new();
        let mut tseg = TrackSegment::new();

        for poi in positions {
            let mut wp = GpxWaypoint::new(poi.coordinates);

            wp.time = Some(poi.time.assume_utc().into());
            wp.name = poi.name.clone().filter(|n| !n.is_empty());
            if self.elevation {
                wp.elevation = poi.elevation;
            }

            tseg.points.push(wp);
        }

        track.segments.push(tseg);

        track
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}
