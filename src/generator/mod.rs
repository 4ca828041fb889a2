//! GPX document generation

pub mod gpx;
pub mod position;
pub mod tracker;
pub mod writer;
