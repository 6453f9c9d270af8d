//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid configuration, misaligned layers, coordinate-reference problems, empty samples,
//! and IO/parse failures of the bundled file formats.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("layer {layer} has shape {found:?} (rows, cols), expected {expected:?}")]
    ShapeMismatch {
        layer: usize,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("coordinate reference mismatch: raster is '{raster}', points are '{points}'")]
    CrsMismatch { raster: String, points: String },

    #[error("{what} has no coordinate reference system")]
    MissingCrs { what: &'static str },

    #[error("empty sample: {0}")]
    EmptySample(String),

    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            message: message.into(),
        }
    }
}
