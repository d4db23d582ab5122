//! Error types for sketch operations.

use thiserror::Error;

/// Result type for sketch operations.
pub type SketchResult<T> = Result<T, SketchError>;

/// Errors that can occur in sketch operations.
#[derive(Debug, Error)]
pub enum SketchError {
    /// A point was appended while no stroke was being drawn.
    #[error("No active stroke to extend")]
    NoActiveStroke,

    /// A submission is already in flight.
    #[error("A submission is already in progress")]
    Busy,

    /// A submission outcome arrived while no submission was in flight.
    #[error("No submission in progress")]
    NotSubmitting,

    /// A stroke was loaded without any points.
    #[error("Stroke has no points")]
    EmptyStroke,

    /// The drawing has no strokes to submit.
    #[error("Please draw something first")]
    EmptyDrawing,

    /// Touch log or drawing serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A generated image payload could not be decoded.
    #[error("Invalid image payload: {0}")]
    InvalidImage(String),
}
