//! Trip sources API

use crate::{ConvertError, Trip};

/// Trip source
pub trait TripSource {
    /// Read the trip header and all its positions, in recording order
    fn fetch(&mut self) -> Result<Trip, ConvertError>;
}

mod abrp;

pub use abrp::{AbrpWorkbook, SHEET_NAME};
