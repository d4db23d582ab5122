//! Strokes and the drawing that owns them.

use serde::{Deserialize, Serialize};

use crate::{Point, Segment, SketchError};

/// One continuous touch-drag: an ordered, append-only list of points.
///
/// A stroke always holds at least one point; deserializing an empty one fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StrokeRepr")]
pub struct Stroke {
    points: Vec<Point>,
}

#[derive(Deserialize)]
struct StrokeRepr {
    points: Vec<Point>,
}

impl TryFrom<StrokeRepr> for Stroke {
    type Error = SketchError;

    fn try_from(repr: StrokeRepr) -> Result<Self, Self::Error> {
        if repr.points.is_empty() {
            return Err(SketchError::EmptyStroke);
        }
        Ok(Self {
            points: repr.points,
        })
    }
}

impl Stroke {
    /// Start a stroke at the given point.
    #[must_use]
    pub fn new(start: Point) -> Self {
        Self {
            points: vec![start],
        }
    }

    /// Append a point.
    pub(crate) fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Points in chronological order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a constructed stroke.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The render segments of this stroke, one per consecutive point pair.
    pub fn segments(&self, width: f32) -> impl Iterator<Item = Segment> + '_ {
        self.points
            .windows(2)
            .map(move |pair| Segment::between(pair[0], pair[1], width))
    }
}

/// The full sketch. Insertion order is draw order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    strokes: Vec<Stroke>,
}

impl Drawing {
    /// Create an empty drawing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stroke and return its index.
    pub(crate) fn push(&mut self, stroke: Stroke) -> usize {
        self.strokes.push(stroke);
        self.strokes.len() - 1
    }

    /// The most recently added stroke.
    pub(crate) fn last_mut(&mut self) -> Option<&mut Stroke> {
        self.strokes.last_mut()
    }

    /// Remove every stroke.
    pub(crate) fn clear(&mut self) {
        self.strokes.clear();
    }

    /// All strokes in draw order.
    #[must_use]
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Number of strokes.
    #[must_use]
    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    /// Total number of points across all strokes.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.strokes.iter().map(Stroke::len).sum()
    }

    /// Check if nothing has been drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// All render segments in draw order.
    pub fn segments(&self, width: f32) -> impl Iterator<Item = Segment> + '_ {
        self.strokes.iter().flat_map(move |s| s.segments(width))
    }
}
