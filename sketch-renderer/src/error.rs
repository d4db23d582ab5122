//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur during rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The intermediate SVG could not be parsed.
    #[error("SVG parsing failed: {0}")]
    Svg(String),

    /// The raster target could not be allocated.
    #[error("Rasterization failed: {0}")]
    Raster(String),

    /// Encoding the snapshot failed.
    #[error("PNG encoding failed: {0}")]
    Encode(String),

    /// A returned image could not be decoded.
    #[error("Image decoding failed: {0}")]
    Decode(String),
}
