//! Capture surfaces: anything that can snapshot the canvas region as PNG.

use sketch_core::SketchState;

use crate::{RenderResult, SketchExporter};

/// A mounted rendering surface that can be captured.
pub trait CaptureSurface: Send + Sync {
    /// Snapshot exactly the canvas region as PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or encoding fails.
    fn snapshot(&self, state: &SketchState) -> RenderResult<Vec<u8>>;
}

/// In-process raster surface backed by [`SketchExporter`].
#[derive(Debug, Clone, Default)]
pub struct RasterSurface {
    exporter: SketchExporter,
}

impl RasterSurface {
    /// Create a surface that renders with the given exporter.
    #[must_use]
    pub fn new(exporter: SketchExporter) -> Self {
        Self { exporter }
    }
}

impl CaptureSurface for RasterSurface {
    fn snapshot(&self, state: &SketchState) -> RenderResult<Vec<u8>> {
        self.exporter.render_to_png(state)
    }
}
