//! Submission and loading errors.

use std::path::PathBuf;

use sketch_client::ClientError;
use sketch_core::SketchError;
use sketch_renderer::RenderError;
use thiserror::Error;

/// Everything that can go wrong with one submission.
///
/// Every variant is handled at the submission boundary: its `Display` text
/// is what the user sees.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Nothing has been drawn.
    #[error("Please draw something first")]
    Validation,
    /// Another submission is in flight.
    #[error("A submission is already in progress")]
    Busy,
    /// No rendering surface is mounted.
    #[error("The canvas is not ready to be captured")]
    CaptureUnavailable,
    /// Snapshotting the canvas failed.
    #[error("Could not capture the sketch: {0}")]
    CaptureFailed(#[source] RenderError),
    /// The server answered with a non-2xx status.
    #[error("Server error {status}: {body}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Response body text.
        body: String,
    },
    /// The server reported a logical error.
    #[error("{0}")]
    Application(String),
    /// The server response had no usable image.
    #[error("Unexpected server response: {0}")]
    Protocol(String),
    /// The server could not be reached.
    #[error("Network error: {0}")]
    Network(String),
}

impl From<ClientError> for SubmitError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Server { status, body } => Self::Server { status, body },
            ClientError::Application(message) => Self::Application(message),
            ClientError::Protocol(message) => Self::Protocol(message),
            ClientError::Network(e) => Self::Network(e.to_string()),
            ClientError::InvalidUrl(message) => Self::Network(message),
        }
    }
}

impl From<SketchError> for SubmitError {
    fn from(err: SketchError) -> Self {
        match err {
            SketchError::Busy => Self::Busy,
            SketchError::EmptyDrawing | SketchError::NoActiveStroke => Self::Validation,
            SketchError::Serialization(e) => Self::Protocol(e.to_string()),
            SketchError::InvalidImage(message) => Self::Protocol(message),
            e @ (SketchError::NotSubmitting | SketchError::EmptyStroke) => {
                Self::Protocol(e.to_string())
            }
        }
    }
}

/// Errors reading a recorded touch log.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The file is not a touch log.
    #[error("invalid touch log {path}: {source}")]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: SketchError,
    },
}
