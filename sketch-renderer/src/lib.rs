//! # Sketch Renderer
//!
//! Turns a sketch session into pixels and back.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ SketchState  │ -> │ SVG segments │ -> │ PNG (resvg)  │ -> server
//! └──────────────┘    └──────────────┘    └──────────────┘
//!
//! server -> GeneratedImage (base64) -> DecodedImage (image crate)
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod display;
pub mod error;
pub mod export;
pub mod surface;

pub use display::{decode_generated, DecodedImage};
pub use error::{RenderError, RenderResult};
pub use export::{ExportConfig, SketchExporter};
pub use surface::{CaptureSurface, RasterSurface};
