//! # Sketch2Img
//!
//! Host layer for the sketch-to-image client: a [`SketchSession`] that turns
//! touch input into strokes and submits the captured sketch, plus the
//! configuration behind the `sketch2img` command line.
//!
//! ## Usage
//!
//! ```bash
//! sketch2img --endpoint http://localhost:5001 generate --events touches.json -o shoe.png
//! sketch2img render --events touches.json -o sketch.png
//! sketch2img health
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `AppConfig` - Endpoint, canvas and stroke settings
//! - `SketchSession` - State, capture surface and generator wired together

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod error;
mod session;

pub use error::{LoadError, SubmitError};
pub use session::SketchSession;

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use sketch_client::{ClientConfig, DEFAULT_BASE_URL};
use sketch_core::geometry::{DEFAULT_CANVAS_SIZE, DEFAULT_STROKE_WIDTH};
use sketch_core::{CanvasSize, SketchState, TouchEvent};

/// Command-line arguments for sketch2img.
#[derive(Debug, Clone, Parser)]
#[command(name = "sketch2img")]
#[command(about = "Turn freehand sketches into generated images")]
#[command(version)]
pub struct CliArgs {
    /// Generation server base URL
    #[arg(long, global = true, env = "SKETCH_GENERATOR_URL", default_value = DEFAULT_BASE_URL)]
    pub endpoint: String,

    /// Canvas edge length in pixels (square canvas)
    #[arg(long, global = true, default_value_t = DEFAULT_CANVAS_SIZE)]
    pub canvas_size: f32,

    /// Stroke width in pixels
    #[arg(long, global = true, default_value_t = DEFAULT_STROKE_WIDTH)]
    pub stroke_width: f32,

    /// Request timeout in seconds (HTTP client default when unset)
    #[arg(long, global = true, env = "SKETCH_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// sketch2img subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Replay a touch log, submit the sketch and save the generated image
    Generate {
        /// JSON array of touch events
        #[arg(long)]
        events: PathBuf,
        /// Where to write the generated image
        #[arg(short, long, default_value = "generated.png")]
        output: PathBuf,
    },
    /// Replay a touch log and save the captured sketch without submitting
    Render {
        /// JSON array of touch events
        #[arg(long)]
        events: PathBuf,
        /// Where to write the sketch
        #[arg(short, long, default_value = "sketch.png")]
        output: PathBuf,
        /// Write the vector render (SVG) instead of PNG
        #[arg(long)]
        svg: bool,
    },
    /// Check that the generation server is up
    Health,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Generation server base URL.
    pub endpoint: String,
    /// Canvas bounds.
    pub canvas: CanvasSize,
    /// Stroke width in pixels.
    pub stroke_width: f32,
    /// Request timeout.
    pub timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_BASE_URL.to_string(),
            canvas: CanvasSize::default(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            timeout: None,
        }
    }

    /// Client settings derived from this configuration.
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: self.timeout,
            ..ClientConfig::new(self.endpoint.clone())
        }
    }

    /// A fresh session state for this canvas.
    #[must_use]
    pub fn initial_state(&self) -> SketchState {
        SketchState::new(self.canvas).with_stroke_width(self.stroke_width)
    }
}

impl From<&CliArgs> for AppConfig {
    fn from(args: &CliArgs) -> Self {
        Self {
            endpoint: args.endpoint.clone(),
            canvas: CanvasSize::square(args.canvas_size),
            stroke_width: args.stroke_width,
            timeout: args.timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Read a recorded touch log from disk.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be read or parsed.
pub fn load_touch_log(path: &Path) -> Result<Vec<TouchEvent>, LoadError> {
    let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    TouchEvent::parse_log(&json).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
