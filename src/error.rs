//! Error types for the detection-map library.

use thiserror::Error;

/// Result type for detection-map operations.
pub type Result<T> = std::result::Result<T, DetectionMapError>;

/// Error types that can occur while building inputs or evaluating them.
///
/// Degenerate inputs (empty categories, zero-area boxes, missing
/// predictions) are not errors; they evaluate to well-defined values.
#[derive(Error, Debug)]
pub enum DetectionMapError {
    /// Error while parsing a JSON configuration or annotation record.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Negative width/height or a non-finite coordinate.
    #[error("Invalid bounding box: {0}")]
    InvalidBoundingBox(String),

    /// Confidence score outside [0, 1] or NaN.
    #[error("Invalid score: {0}")]
    InvalidScore(String),

    /// IoU or confidence threshold outside its valid range.
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),
}
