//! Error types
//!
//! Configuration errors reject a single trajectory or settings file;
//! load errors cover reading coastline and settings input.

use std::error::Error;
use std::fmt;

/// Invalid trajectory or animation configuration
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A path needs at least two points to form a segment
    PathTooShort { length: usize },
    /// Settings failed validation
    InvalidSettings { reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PathTooShort { length } => {
                write!(f, "path length {length} is too short (need at least 2 points)")
            }
            Self::InvalidSettings { reason } => write!(f, "invalid settings: {reason}"),
        }
    }
}

impl Error for ConfigError {}

/// Failure reading settings or coastline input
#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Json(serde_json::Error),
    GeoJson(geojson::Error),
    /// Input parsed but describes unusable geometry or values
    Degenerate { reason: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "read failed: {e}"),
            Self::Json(e) => write!(f, "malformed JSON: {e}"),
            Self::GeoJson(e) => write!(f, "malformed GeoJSON: {e}"),
            Self::Degenerate { reason } => write!(f, "unusable input: {reason}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::GeoJson(e) => Some(e),
            Self::Degenerate { .. } => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<geojson::Error> for LoadError {
    fn from(e: geojson::Error) -> Self {
        Self::GeoJson(e)
    }
}

impl From<ConfigError> for LoadError {
    fn from(e: ConfigError) -> Self {
        Self::Degenerate {
            reason: e.to_string(),
        }
    }
}
