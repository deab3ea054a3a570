//! Error types for contour extraction.

use plot_common::{BufferError, PlotRect, StyleError};
use thiserror::Error;

/// Errors that can occur while building grids, levels or configuration.
#[derive(Error, Debug)]
pub enum ContourError {
    /// A contour needs at least one full cell.
    #[error("grid must be at least 2x2, got {nx}x{ny}")]
    InvalidDimensions { nx: usize, ny: usize },

    /// Sample count does not match the grid dimensions.
    #[error("buffer holds {actual} samples but a {nx}x{ny} grid needs {expected}")]
    LengthMismatch {
        nx: usize,
        ny: usize,
        expected: usize,
        actual: usize,
    },

    /// Plot rectangle has non-finite components.
    #[error("invalid plot rectangle: {0:?}")]
    InvalidRect(PlotRect),

    /// Raw sample data could not be decoded.
    #[error(transparent)]
    Buffer(#[from] BufferError),

    /// Logarithmic levels over a range that is not strictly positive.
    #[error("logarithmic levels need a strictly positive data range, got [{min}, {max}]")]
    InvalidRange { min: f64, max: f64 },

    /// Logarithmic base that cannot produce a spacing.
    #[error("logarithmic base must be finite and greater than 1, got {0}")]
    InvalidBase(f64),

    /// An operation needed grid data but none has been set.
    #[error("no grid data has been set")]
    NoData,

    /// Configuration failed validation.
    #[error("invalid contour configuration: {0}")]
    InvalidConfig(String),

    /// Style definition error.
    #[error(transparent)]
    Style(#[from] StyleError),

    /// Storage/IO error.
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration file could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),
}

impl ContourError {
    /// Create an InvalidConfig error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

impl From<std::io::Error> for ContourError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ContourError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for ContourError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(format!("YAML error: {}", err))
    }
}

/// Result type for contour operations.
pub type Result<T> = std::result::Result<T, ContourError>;
