//! Sketch session state management.
//!
//! The whole session (drawing, active stroke, submission status, result and
//! error) is one value. It only changes through [`SketchState::apply`], which
//! validates an [`Action`] before mutating anything, so a rejected action
//! leaves the state untouched.

use serde::{Deserialize, Serialize};

use crate::geometry::DEFAULT_STROKE_WIDTH;
use crate::{
    CanvasSize, Drawing, GeneratedImage, Point, Segment, SketchError, SketchResult, Stroke,
    TouchEvent, TouchPhase,
};

/// Submission status of the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitStatus {
    /// No submission in flight.
    #[default]
    Idle,
    /// A submission is in flight; further submissions are rejected.
    Busy,
}

/// Explicit transitions of the session state.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Touch-begin: start a new stroke at a raw (unclamped) position.
    BeginStroke(Point),
    /// Touch-move: append a raw position to the active stroke.
    ExtendStroke(Point),
    /// Touch-end: finalize the active stroke.
    EndStroke,
    /// Empty the drawing and forget any result or error.
    Clear,
    /// A submission is starting.
    SubmitStart,
    /// The submission produced an image.
    SubmitSuccess(GeneratedImage),
    /// The submission failed with a user-facing message.
    SubmitFailure(String),
    /// A submission was refused before it started. Shows the message
    /// without touching the submission status.
    Reject(String),
}

/// The complete sketch session state.
///
/// Only built through [`SketchState::new`] and changed through
/// [`SketchState::apply`], so it is serializable but not deserializable.
#[derive(Debug, Clone, Serialize)]
pub struct SketchState {
    canvas: CanvasSize,
    stroke_width: f32,
    drawing: Drawing,
    /// Whether the last stroke of `drawing` is still being appended to.
    active: bool,
    status: SubmitStatus,
    result: Option<GeneratedImage>,
    error: Option<String>,
}

impl SketchState {
    /// Create an empty session for a canvas.
    #[must_use]
    pub fn new(canvas: CanvasSize) -> Self {
        Self {
            canvas,
            stroke_width: DEFAULT_STROKE_WIDTH,
            drawing: Drawing::new(),
            active: false,
            status: SubmitStatus::Idle,
            result: None,
            error: None,
        }
    }

    /// Set the rendered stroke width.
    #[must_use]
    pub fn with_stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width;
        self
    }

    /// Apply an action.
    ///
    /// # Errors
    ///
    /// - [`SketchError::NoActiveStroke`] for `ExtendStroke` with no active stroke.
    /// - [`SketchError::EmptyDrawing`] for `SubmitStart` with nothing drawn.
    /// - [`SketchError::Busy`] for `SubmitStart` while a submission is in flight.
    /// - [`SketchError::NotSubmitting`] for `SubmitSuccess`/`SubmitFailure`
    ///   with no submission in flight.
    ///
    /// The state is unchanged when an error is returned.
    pub fn apply(&mut self, action: Action) -> SketchResult<()> {
        match action {
            Action::BeginStroke(raw) => {
                if self.active {
                    tracing::debug!("Closing stroke implicitly on new touch-begin");
                }
                let point = self.canvas.clamp(raw);
                let index = self.drawing.push(Stroke::new(point));
                self.active = true;
                tracing::debug!("Stroke {index} started at ({}, {})", point.x, point.y);
            }
            Action::ExtendStroke(raw) => {
                if !self.active {
                    return Err(SketchError::NoActiveStroke);
                }
                let point = self.canvas.clamp(raw);
                let stroke = self
                    .drawing
                    .last_mut()
                    .ok_or(SketchError::NoActiveStroke)?;
                stroke.push(point);
            }
            Action::EndStroke => {
                if self.active {
                    self.active = false;
                    tracing::debug!(
                        "Stroke {} finished with {} points",
                        self.drawing.stroke_count().saturating_sub(1),
                        self.drawing.strokes().last().map_or(0, Stroke::len)
                    );
                }
            }
            Action::Clear => {
                self.drawing.clear();
                self.active = false;
                self.result = None;
                self.error = None;
                tracing::debug!("Drawing cleared");
            }
            Action::SubmitStart => {
                if self.status == SubmitStatus::Busy {
                    return Err(SketchError::Busy);
                }
                if self.drawing.is_empty() {
                    return Err(SketchError::EmptyDrawing);
                }
                self.status = SubmitStatus::Busy;
                self.result = None;
                self.error = None;
            }
            Action::SubmitSuccess(image) => {
                if self.status != SubmitStatus::Busy {
                    return Err(SketchError::NotSubmitting);
                }
                self.status = SubmitStatus::Idle;
                self.result = Some(image);
                self.error = None;
            }
            Action::SubmitFailure(message) => {
                if self.status != SubmitStatus::Busy {
                    return Err(SketchError::NotSubmitting);
                }
                self.status = SubmitStatus::Idle;
                self.error = Some(message);
            }
            Action::Reject(message) => {
                self.result = None;
                self.error = Some(message);
            }
        }
        Ok(())
    }

    /// Route a touch event to the matching capture action.
    ///
    /// Only the primary touch is tracked. A move with no active stroke is
    /// dropped, as is any event without a touch point where one is needed.
    /// Returns whether the drawing changed.
    pub fn handle_touch(&mut self, event: &TouchEvent) -> bool {
        match event.phase {
            TouchPhase::Start => event.primary_touch().is_some_and(|touch| {
                self.apply(Action::BeginStroke(touch.position())).is_ok()
            }),
            TouchPhase::Move => event.primary_touch().is_some_and(|touch| {
                self.apply(Action::ExtendStroke(touch.position())).is_ok()
            }),
            TouchPhase::End | TouchPhase::Cancel => {
                let was_active = self.active;
                // EndStroke never fails
                let _ = self.apply(Action::EndStroke);
                was_active
            }
        }
    }

    /// The drawing.
    #[must_use]
    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    /// The canvas bounds.
    #[must_use]
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    /// The rendered stroke width.
    #[must_use]
    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    /// The stroke currently being drawn, if any.
    #[must_use]
    pub fn active_stroke(&self) -> Option<&Stroke> {
        if self.active {
            self.drawing.strokes().last()
        } else {
            None
        }
    }

    /// Whether the canvas owns the current gesture.
    ///
    /// Hosts disable container scrolling while this is true.
    #[must_use]
    pub fn owns_gesture(&self) -> bool {
        self.active
    }

    /// Render segments of the whole drawing.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.drawing.segments(self.stroke_width)
    }

    /// Render segments of the active stroke only.
    pub fn active_segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.active_stroke()
            .into_iter()
            .flat_map(|s| s.segments(self.stroke_width))
    }

    /// Current submission status.
    #[must_use]
    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    /// Check if a submission is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.status == SubmitStatus::Busy
    }

    /// Whether the submit control should be enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.is_busy() && !self.drawing.is_empty()
    }

    /// The last generated image.
    #[must_use]
    pub fn result(&self) -> Option<&GeneratedImage> {
        self.result.as_ref()
    }

    /// The last user-facing error message.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl Default for SketchState {
    fn default() -> Self {
        Self::new(CanvasSize::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drawn_state() -> SketchState {
        let mut state = SketchState::new(CanvasSize::square(100.0));
        state.apply(Action::BeginStroke(Point::new(10.0, 10.0))).expect("begin");
        state.apply(Action::ExtendStroke(Point::new(20.0, 20.0))).expect("extend");
        state.apply(Action::EndStroke).expect("end");
        state
    }

    #[test]
    fn test_begin_extend_end() {
        let state = drawn_state();
        assert_eq!(state.drawing().stroke_count(), 1);
        assert_eq!(state.drawing().point_count(), 2);
        assert!(state.active_stroke().is_none());
        assert!(!state.owns_gesture());
        assert_eq!(state.segments().count(), 1);
    }

    #[test]
    fn test_extend_without_active_is_rejected() {
        let mut state = drawn_state();
        let err = state
            .apply(Action::ExtendStroke(Point::new(50.0, 50.0)))
            .unwrap_err();
        assert!(matches!(err, SketchError::NoActiveStroke));
        assert_eq!(state.drawing().point_count(), 2);
    }

    #[test]
    fn test_begin_closes_active_stroke() {
        let mut state = SketchState::new(CanvasSize::square(100.0));
        state.apply(Action::BeginStroke(Point::new(1.0, 1.0))).expect("first");
        state.apply(Action::BeginStroke(Point::new(2.0, 2.0))).expect("second");
        state.apply(Action::ExtendStroke(Point::new(3.0, 3.0))).expect("extend");

        let strokes = state.drawing().strokes();
        assert_eq!(strokes.len(), 2);
        assert_eq!(strokes[0].len(), 1);
        assert_eq!(strokes[1].len(), 2);
    }

    #[test]
    fn test_points_are_clamped() {
        let mut state = SketchState::new(CanvasSize::square(100.0));
        state.apply(Action::BeginStroke(Point::new(-10.0, 50.0))).expect("begin");
        state.apply(Action::ExtendStroke(Point::new(150.0, 250.0))).expect("extend");

        let points = state.drawing().strokes()[0].points();
        assert_eq!(points[0], Point::new(0.0, 50.0));
        assert_eq!(points[1], Point::new(100.0, 100.0));
    }

    #[test]
    fn test_active_segments_only_cover_active_stroke() {
        let mut state = drawn_state();
        state.apply(Action::BeginStroke(Point::new(0.0, 0.0))).expect("begin");
        assert_eq!(state.active_segments().count(), 0);
        state.apply(Action::ExtendStroke(Point::new(0.0, 5.0))).expect("extend");
        assert_eq!(state.active_segments().count(), 1);
        assert_eq!(state.segments().count(), 2);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut state = drawn_state();
        state.apply(Action::SubmitStart).expect("start");
        state
            .apply(Action::SubmitFailure("boom".to_string()))
            .expect("failure");
        state.apply(Action::BeginStroke(Point::new(5.0, 5.0))).expect("begin");

        state.apply(Action::Clear).expect("clear");
        assert!(state.drawing().is_empty());
        assert!(state.active_stroke().is_none());
        assert!(state.result().is_none());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_submit_lifecycle_success() {
        let mut state = drawn_state();
        assert!(state.can_submit());

        state.apply(Action::SubmitStart).expect("start");
        assert!(state.is_busy());
        assert!(!state.can_submit());

        state
            .apply(Action::SubmitSuccess(GeneratedImage::from_base64("abc123")))
            .expect("success");
        assert_eq!(state.status(), SubmitStatus::Idle);
        assert_eq!(state.result().map(GeneratedImage::as_base64), Some("abc123"));
        assert!(state.error().is_none());
    }

    #[test]
    fn test_submit_start_while_busy_is_rejected() {
        let mut state = drawn_state();
        state.apply(Action::SubmitStart).expect("start");
        assert!(matches!(
            state.apply(Action::SubmitStart),
            Err(SketchError::Busy)
        ));
        assert!(state.is_busy());
    }

    #[test]
    fn test_submit_start_on_empty_drawing() {
        let mut state = SketchState::default();
        assert!(!state.can_submit());
        assert!(matches!(
            state.apply(Action::SubmitStart),
            Err(SketchError::EmptyDrawing)
        ));
        assert_eq!(state.status(), SubmitStatus::Idle);
    }

    #[test]
    fn test_submit_start_clears_previous_result() {
        let mut state = drawn_state();
        state.apply(Action::SubmitStart).expect("start");
        state
            .apply(Action::SubmitSuccess(GeneratedImage::from_base64("first")))
            .expect("success");

        state.apply(Action::SubmitStart).expect("restart");
        assert!(state.result().is_none());
        state
            .apply(Action::SubmitFailure("server said no".to_string()))
            .expect("failure");
        assert!(state.result().is_none());
        assert_eq!(state.error(), Some("server said no"));
    }

    #[test]
    fn test_handle_touch_sequence() {
        let mut state = SketchState::new(CanvasSize::square(100.0));
        assert!(!state.handle_touch(&TouchEvent::single(TouchPhase::Move, 1.0, 1.0, 0)));
        assert!(state.handle_touch(&TouchEvent::single(TouchPhase::Start, 1.0, 1.0, 1)));
        assert!(state.owns_gesture());
        assert!(state.handle_touch(&TouchEvent::single(TouchPhase::Move, 2.0, 2.0, 2)));
        assert!(state.handle_touch(&TouchEvent::new(TouchPhase::Cancel, vec![], 3)));
        assert!(!state.owns_gesture());
        assert!(!state.handle_touch(&TouchEvent::new(TouchPhase::End, vec![], 4)));
        assert_eq!(state.drawing().point_count(), 2);
    }

    #[test]
    fn test_outcome_without_submission_is_rejected() {
        let mut state = drawn_state();
        assert!(matches!(
            state.apply(Action::SubmitFailure("late".to_string())),
            Err(SketchError::NotSubmitting)
        ));
        assert!(matches!(
            state.apply(Action::SubmitSuccess(GeneratedImage::from_base64("late"))),
            Err(SketchError::NotSubmitting)
        ));
        assert!(state.error().is_none());
        assert!(state.result().is_none());
    }

    #[test]
    fn test_reject_keeps_busy_status() {
        let mut state = drawn_state();
        state.apply(Action::SubmitStart).expect("start");
        state
            .apply(Action::Reject("Please draw something first".to_string()))
            .expect("reject");
        assert!(state.is_busy());
        assert_eq!(state.error(), Some("Please draw something first"));

        state
            .apply(Action::SubmitSuccess(GeneratedImage::from_base64("abc")))
            .expect("success");
        assert!(!state.is_busy());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_clear_while_busy_keeps_submission() {
        let mut state = drawn_state();
        state.apply(Action::SubmitStart).expect("start");
        state.apply(Action::Clear).expect("clear");
        assert!(state.is_busy());
        assert!(matches!(
            state.apply(Action::SubmitStart),
            Err(SketchError::Busy)
        ));

        state
            .apply(Action::SubmitSuccess(GeneratedImage::from_base64("abc")))
            .expect("success");
        assert_eq!(state.result().map(GeneratedImage::as_base64), Some("abc"));
        assert!(state.drawing().is_empty());
    }
}
