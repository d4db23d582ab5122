//! Canvas-local geometry: points, canvas bounds and stroke segments.

use serde::{Deserialize, Serialize};

/// Default canvas edge length in logical pixels.
pub const DEFAULT_CANVAS_SIZE: f32 = 300.0;

/// Default stroke width in logical pixels.
pub const DEFAULT_STROKE_WIDTH: f32 = 4.0;

/// A point in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X position (pixels from left).
    pub x: f32,
    /// Y position (pixels from top).
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Dimensions of the drawing canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl CanvasSize {
    /// Create a canvas of the given dimensions.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Create a square canvas.
    #[must_use]
    pub const fn square(size: f32) -> Self {
        Self::new(size, size)
    }

    /// Clamp a raw touch position into the canvas bounds.
    ///
    /// Non-finite coordinates collapse to the origin edge.
    #[must_use]
    pub fn clamp(&self, point: Point) -> Point {
        Point {
            x: clamp_axis(point.x, self.width),
            y: clamp_axis(point.y, self.height),
        }
    }

    /// Check whether a point lies within the canvas bounds.
    #[must_use]
    pub fn contains(&self, point: &Point) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::square(DEFAULT_CANVAS_SIZE)
    }
}

fn clamp_axis(value: f32, max: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, max.max(0.0))
}

/// One rendered piece of a stroke: a rectangle rotated about its left edge.
///
/// A segment spans two consecutive stroke points. Its rectangle has
/// `length` along the direction of travel and `width` across it, and is
/// anchored at `origin`, vertically centred on the path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// The earlier of the two points.
    pub origin: Point,
    /// Distance between the two points.
    pub length: f32,
    /// Rotation in radians, `atan2(dy, dx)`.
    pub angle: f32,
    /// Stroke width.
    pub width: f32,
}

impl Segment {
    /// Build the segment joining `from` to `to`.
    #[must_use]
    pub fn between(from: Point, to: Point, width: f32) -> Self {
        Self {
            origin: from,
            length: from.distance_to(&to),
            angle: (to.y - from.y).atan2(to.x - from.x),
            width,
        }
    }

    /// Rotation in degrees, as used by SVG transforms.
    #[must_use]
    pub fn angle_degrees(&self) -> f32 {
        self.angle.to_degrees()
    }

    /// The far end of the segment.
    #[must_use]
    pub fn end(&self) -> Point {
        Point {
            x: self.length.mul_add(self.angle.cos(), self.origin.x),
            y: self.length.mul_add(self.angle.sin(), self.origin.y),
        }
    }
}
