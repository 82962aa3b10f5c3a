//! Error types for pose computation and view-parameter parsing.

use thiserror::Error;

/// Result type for pose operations.
pub type PoseResult<T> = Result<T, PoseError>;

/// Errors that can occur when deriving a camera orientation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PoseError {
    /// The camera position vector has (near-)zero norm, so no view
    /// direction can be derived from it.
    #[error("camera position has zero norm ({norm:e}); a view direction requires a non-zero position")]
    ZeroNormPosition { norm: f64 },
}

/// Errors that can occur when parsing a view-parameter file.
///
/// Lines are numbered from 1, matching what an editor shows.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewParamsError {
    /// A line did not contain exactly four whitespace-separated fields.
    #[error("line {line}: expected 4 fields `azimuth elevation tilt distance`, found {found}")]
    FieldCount { line: usize, found: usize },

    /// A field could not be parsed as a float.
    #[error("line {line}: invalid {field} value `{value}`")]
    InvalidFloat {
        line: usize,
        field: &'static str,
        value: String,
    },

    /// The distance field was zero or negative.
    #[error("line {line}: distance must be positive, got {distance}")]
    NonPositiveDistance { line: usize, distance: f64 },
}

impl ViewParamsError {
    /// Returns the 1-based line number the error occurred on.
    pub fn line(&self) -> usize {
        match self {
            ViewParamsError::FieldCount { line, .. }
            | ViewParamsError::InvalidFloat { line, .. }
            | ViewParamsError::NonPositiveDistance { line, .. } => *line,
        }
    }
}
