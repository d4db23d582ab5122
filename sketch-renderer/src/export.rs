//! Sketch export to SVG and PNG.
//!
//! Every stroke segment becomes a `<rect>` rotated about its left edge. The
//! SVG is then rasterized with the resvg/tiny-skia pipeline, covering exactly
//! the canvas region.

use std::fmt::Write;

use sketch_core::{Segment, SketchState};

use crate::error::{RenderError, RenderResult};

/// Configuration for sketch export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Background color as RGBA bytes.
    pub background: [u8; 4],
    /// Stroke color as RGBA bytes.
    pub stroke_color: [u8; 4],
    /// Scale factor (e.g. 2.0 for retina).
    pub scale: f32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            background: [255, 255, 255, 255],
            stroke_color: [0, 0, 0, 255],
            scale: 1.0,
        }
    }
}

/// Renders a [`SketchState`] to SVG or PNG.
#[derive(Debug, Clone)]
pub struct SketchExporter {
    config: ExportConfig,
}

impl SketchExporter {
    /// Create a new exporter with the given configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }

    /// The exporter configuration.
    #[must_use]
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Export the sketch to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if rasterization or encoding fails.
    pub fn render_to_png(&self, state: &SketchState) -> RenderResult<Vec<u8>> {
        let (width, height) = self.output_dimensions(state);
        let pixmap = rasterize(&self.render_to_svg(state), width, height)?;

        let png = pixmap
            .encode_png()
            .map_err(|e| RenderError::Encode(e.to_string()))?;
        tracing::debug!(
            "Captured {}x{} sketch ({} bytes)",
            pixmap.width(),
            pixmap.height(),
            png.len()
        );
        Ok(png)
    }

    /// Export the sketch to an SVG string.
    #[must_use]
    pub fn render_to_svg(&self, state: &SketchState) -> String {
        let (out_w, out_h) = self.output_dimensions(state);
        let canvas = state.canvas();

        let mut svg = String::with_capacity(256 + state.drawing().point_count() * 96);
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{out_w}\" height=\"{out_h}\" viewBox=\"0 0 {} {}\">",
            canvas.width, canvas.height,
        );

        let bg = &self.config.background;
        let _ = write!(
            svg,
            "<rect width=\"100%\" height=\"100%\" fill=\"rgba({},{},{},{})\"/>",
            bg[0],
            bg[1],
            bg[2],
            f32::from(bg[3]) / 255.0,
        );

        let fg = &self.config.stroke_color;
        let _ = write!(
            svg,
            "<g fill=\"rgb({},{},{})\" fill-opacity=\"{}\">",
            fg[0],
            fg[1],
            fg[2],
            f32::from(fg[3]) / 255.0,
        );
        for segment in state.segments() {
            render_segment_svg(&mut svg, &segment);
        }
        svg.push_str("</g></svg>");
        svg
    }

    /// Output dimensions (width, height) in pixels.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn output_dimensions(&self, state: &SketchState) -> (u32, u32) {
        let canvas = state.canvas();
        let out_w = (canvas.width.max(1.0) * self.config.scale).round() as u32;
        let out_h = (canvas.height.max(1.0) * self.config.scale).round() as u32;
        (out_w.max(1), out_h.max(1))
    }
}

impl Default for SketchExporter {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Draw the sketch SVG into a `width`x`height` pixmap, stretching the
/// document to fill it.
#[allow(clippy::cast_precision_loss)]
fn rasterize(svg: &str, width: u32, height: u32) -> RenderResult<tiny_skia::Pixmap> {
    let tree = usvg::Tree::from_str(svg, &usvg::Options::default())
        .map_err(|e| RenderError::Svg(e.to_string()))?;
    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| RenderError::Raster(format!("no {width}x{height} pixmap for the sketch")))?;

    let size = tree.size();
    let fit = tiny_skia::Transform::from_scale(
        width as f32 / size.width(),
        height as f32 / size.height(),
    );
    resvg::render(&tree, fit, &mut pixmap.as_mut());
    Ok(pixmap)
}

/// Render one segment as a rectangle rotated about its left edge.
fn render_segment_svg(svg: &mut String, segment: &Segment) {
    let Segment {
        origin,
        length,
        width,
        ..
    } = *segment;
    if length <= f32::EPSILON {
        return;
    }
    let top = origin.y - width / 2.0;
    let _ = write!(
        svg,
        "<rect x=\"{}\" y=\"{top}\" width=\"{length}\" height=\"{width}\" transform=\"rotate({} {} {})\"/>",
        origin.x,
        segment.angle_degrees(),
        origin.x,
        origin.y,
    );
}
