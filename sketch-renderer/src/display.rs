//! Decoding generated images for display.

use image::ImageFormat;
use sketch_core::GeneratedImage;

use crate::error::{RenderError, RenderResult};

/// A generated image, decoded and ready to show.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Detected container format.
    pub format: ImageFormat,
    /// The encoded bytes as received.
    pub encoded: Vec<u8>,
    /// Decoded RGBA8 pixels, row-major.
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    /// Preferred file extension for the detected format.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        self.format.extensions_str().first().copied().unwrap_or("bin")
    }
}

/// Decode a base64 image returned by the generation server.
///
/// # Errors
///
/// Returns [`RenderError::Decode`] if the payload is not base64 or not a
/// supported raster image.
pub fn decode_generated(image: &GeneratedImage) -> RenderResult<DecodedImage> {
    let encoded = image
        .to_bytes()
        .map_err(|e| RenderError::Decode(e.to_string()))?;
    let format = image::guess_format(&encoded).map_err(|e| RenderError::Decode(e.to_string()))?;
    let pixels = image::load_from_memory_with_format(&encoded, format)
        .map_err(|e| RenderError::Decode(e.to_string()))?
        .to_rgba8();

    let (width, height) = pixels.dimensions();
    tracing::debug!("Decoded generated {format:?} image {width}x{height}");

    Ok(DecodedImage {
        width,
        height,
        format,
        encoded,
        rgba: pixels.into_raw(),
    })
}
