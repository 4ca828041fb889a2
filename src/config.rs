//! Conversion configuration
//!
//! Everything is optional, a missing file means the defaults. Example:
//!
//! ```yaml
//! source:
//!   timestamp_format: "[month]/[day]/[year] [hour]:[minute]:[second]"
//!   malformed_rows: skip
//! track:
//!   elevation: false
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use time::format_description::OwnedFormatItem;
use time::macros::format_description;
use time::PrimitiveDateTime;
use tracing::debug;

use crate::ConvertError;

/// Layout of the timestamps written by ABRP, eg.: `1.11.2024, 14:28:39`
pub const DEFAULT_TIMESTAMP_FORMAT: &str =
    "[day padding:none].[month padding:none].[year], [hour padding:none]:[minute padding:none]:[second padding:none]";

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Configs {
    pub source: SourceOptions,
    pub track: TrackOptions,
}

/// How the export is read
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SourceOptions {
    pub timestamp_format: TimestampFormat,
    pub malformed_rows: RowPolicy,
}

/// What to do with a row that can not become a waypoint
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowPolicy {
    /// Fail the whole conversion
    #[default]
    Abort,
    /// Log and drop the row
    Skip,
}

/// How the track is written
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackOptions {
    pub elevation: bool,
}

impl Default for TrackOptions {
    fn default() -> Self {
        Self { elevation: true }
    }
}

/// Compiled `time` format description of the timestamp column
#[derive(Clone, Deserialize)]
#[serde(try_from = "String")]
pub struct TimestampFormat {
    description: String,
    items: OwnedFormatItem,
}

impl TimestampFormat {
    pub fn new(description: &str) -> Result<Self, String> {
        let items = time::format_description::parse_owned::<2>(description)
            .map_err(|e| format!("invalid timestamp format \"{}\": {}", description, e))?;

        Ok(Self {
            description: description.to_string(),
            items,
        })
    }

    pub fn parse(&self, text: &str) -> Result<PrimitiveDateTime, time::error::Parse> {
        PrimitiveDateTime::parse(text.trim(), &self.items)
    }

    pub fn as_str(&self) -> &str {
        &self.description
    }
}

impl Default for TimestampFormat {
    fn default() -> Self {
        let items = format_description!(
            "[day padding:none].[month padding:none].[year], [hour padding:none]:[minute padding:none]:[second padding:none]"
        );

        Self {
            description: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            items: items.into(),
        }
    }
}

impl TryFrom<String> for TimestampFormat {
    type Error = String;

    fn try_from(description: String) -> Result<Self, Self::Error> {
        Self::new(&description)
    }
}

impl PartialEq for TimestampFormat {
    fn eq(&self, other: &Self) -> bool {
        self.description == other.description
    }
}

impl fmt::Debug for TimestampFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TimestampFormat")
            .field(&self.description)
            .finish()
    }
}

impl Configs {
    /// Parse a YAML document, `origin` only names it in errors
    pub fn from_yaml(yaml: &str, origin: &Path) -> Result<Self, ConvertError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(yaml).map_err(|e| ConvertError::InvalidConfig {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Load a file that must exist
    pub fn load(path: &Path) -> Result<Self, ConvertError> {
        let yaml = fs::read_to_string(path).map_err(|e| ConvertError::InvalidConfig {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Self::from_yaml(&yaml, path)
    }

    /// Load the first readable file of the candidates, defaults if none
    pub fn discover<I>(candidates: I) -> Result<Self, ConvertError>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        for fi in candidates {
            if let Ok(yaml) = fs::read_to_string(&fi) {
                debug!("Using configuration \"{}\"", fi.display());
                return Self::from_yaml(&yaml, &fi);
            }
        }

        Ok(Self::default())
    }
}
