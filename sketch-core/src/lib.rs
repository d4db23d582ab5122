//! # Sketch Core
//!
//! Core sketch logic: touch-to-path capture and the session state machine.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 sketch-core                 │
//! ├─────────────────────────────────────────────┤
//! │  Drawing Model   │  Input Handler           │
//! │  - Points        │  - Touch events          │
//! │  - Strokes       │  - Gesture ownership     │
//! │  - Segments      │                          │
//! ├─────────────────────────────────────────────┤
//! │  State Machine                              │
//! │  - Capture actions (begin/extend/end/clear) │
//! │  - Single-flight submission status          │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod event;
pub mod geometry;
pub mod image;
pub mod state;
pub mod stroke;

pub use error::{SketchError, SketchResult};
pub use event::{TouchEvent, TouchPhase, TouchPoint};
pub use geometry::{CanvasSize, Point, Segment};
pub use image::GeneratedImage;
pub use state::{Action, SketchState, SubmitStatus};
pub use stroke::{Drawing, Stroke};

/// Sketch core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
