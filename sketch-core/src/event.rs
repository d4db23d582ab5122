//! Touch input events for the sketch canvas.

use serde::{Deserialize, Serialize};

use crate::{Point, SketchError, SketchResult};

/// Phase of a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchPhase {
    /// Touch started (finger down).
    Start,
    /// Touch moved (finger dragging).
    Move,
    /// Touch ended (finger up).
    End,
    /// Touch cancelled (e.g., palm rejection or responder termination).
    Cancel,
}

/// A single touch point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    /// Touch identifier (for multi-touch).
    #[serde(default)]
    pub id: u32,
    /// X position relative to the canvas origin.
    pub x: f32,
    /// Y position relative to the canvas origin.
    pub y: f32,
    /// Pressure (0.0 to 1.0, if available).
    #[serde(default)]
    pub pressure: Option<f32>,
}

impl TouchPoint {
    /// Position of this touch as a canvas point (unclamped).
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A touch event with one or more touch points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    /// Phase of this touch event.
    pub phase: TouchPhase,
    /// All current touch points.
    pub touches: Vec<TouchPoint>,
    /// Timestamp in milliseconds since canvas start.
    #[serde(default)]
    pub timestamp_ms: u64,
}

impl TouchEvent {
    /// Create a new touch event.
    #[must_use]
    pub fn new(phase: TouchPhase, touches: Vec<TouchPoint>, timestamp_ms: u64) -> Self {
        Self {
            phase,
            touches,
            timestamp_ms,
        }
    }

    /// Create a single-finger touch event.
    #[must_use]
    pub fn single(phase: TouchPhase, x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self::new(
            phase,
            vec![TouchPoint {
                id: 0,
                x,
                y,
                pressure: None,
            }],
            timestamp_ms,
        )
    }

    /// Get the primary (first) touch point.
    #[must_use]
    pub fn primary_touch(&self) -> Option<&TouchPoint> {
        self.touches.first()
    }

    /// Check if this is a multi-touch event.
    #[must_use]
    pub fn is_multi_touch(&self) -> bool {
        self.touches.len() > 1
    }

    /// Parse a recorded touch log (a JSON array of events).
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn parse_log(json: &str) -> SketchResult<Vec<Self>> {
        serde_json::from_str(json).map_err(SketchError::Serialization)
    }
}
