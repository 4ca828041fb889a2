//! Conversion errors

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a trip export from becoming a GPX file
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Failed to open \"{}\" for reading", path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read \"{}\" as a workbook - is this an ABRP export?", path.display())]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::XlsxError,
    },

    #[error("No sheet \"{sheet}\" in \"{}\" - is this an ABRP export?", path.display())]
    UnexpectedFormat { path: PathBuf, sheet: String },

    #[error("Row {row}: invalid timestamp \"{value}\": {reason}")]
    MalformedTimestamp {
        row: u32,
        value: String,
        reason: String,
    },

    #[error("Row {row}: invalid {column}: {reason}")]
    MalformedRow {
        row: u32,
        column: &'static str,
        reason: String,
    },

    #[error("Failed to write to \"{}\"", path.display())]
    OutputWriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid configuration \"{}\": {reason}", path.display())]
    InvalidConfig { path: PathBuf, reason: String },
}

impl ConvertError {
    /// Row level problems, the ones a `skip` policy may step over
    pub fn is_row_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedTimestamp { .. } | Self::MalformedRow { .. }
        )
    }
}
