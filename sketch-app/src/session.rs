//! A sketch session: touch capture plus single-flight submission.
//!
//! The session owns one [`SketchState`] behind a lock and forwards every
//! change through [`Action`]s. Locks are released before any `.await`, so a
//! session can be shared between tasks; the `Busy` status guarantees at most
//! one submission in flight.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use sketch_client::ImageGenerator;
use sketch_core::{
    Action, GeneratedImage, Point, SketchError, SketchResult, SketchState, TouchEvent,
};
use sketch_renderer::{decode_generated, CaptureSurface, DecodedImage, RenderResult};

use crate::SubmitError;

/// Interactive sketch session.
pub struct SketchSession<G> {
    state: RwLock<SketchState>,
    surface: RwLock<Option<Arc<dyn CaptureSurface>>>,
    generator: G,
}

impl<G: ImageGenerator> SketchSession<G> {
    /// Create a session with no mounted surface.
    #[must_use]
    pub fn new(state: SketchState, generator: G) -> Self {
        Self {
            state: RwLock::new(state),
            surface: RwLock::new(None),
            generator,
        }
    }

    /// Mount a surface at construction time.
    #[must_use]
    pub fn with_surface(self, surface: impl CaptureSurface + 'static) -> Self {
        self.mount_surface(Arc::new(surface));
        self
    }

    fn read_state(&self) -> RwLockReadGuard<'_, SketchState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SketchState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mount the rendering surface that `capture` snapshots.
    pub fn mount_surface(&self, surface: Arc<dyn CaptureSurface>) {
        *self.surface.write().unwrap_or_else(PoisonError::into_inner) = Some(surface);
        tracing::debug!("Capture surface mounted");
    }

    /// Unmount the rendering surface.
    pub fn unmount_surface(&self) {
        *self.surface.write().unwrap_or_else(PoisonError::into_inner) = None;
        tracing::debug!("Capture surface unmounted");
    }

    /// Route a touch event into the drawing. Returns whether it changed.
    pub fn handle_touch(&self, event: &TouchEvent) -> bool {
        self.write_state().handle_touch(event)
    }

    /// Replay a recorded touch log. Returns how many events changed the drawing.
    pub fn replay(&self, events: &[TouchEvent]) -> usize {
        let mut state = self.write_state();
        events.iter().filter(|e| state.handle_touch(e)).count()
    }

    /// Start a new stroke.
    pub fn begin_stroke(&self, point: Point) {
        // BeginStroke never fails
        let _ = self.write_state().apply(Action::BeginStroke(point));
    }

    /// Append to the active stroke.
    ///
    /// # Errors
    ///
    /// Returns [`sketch_core::SketchError::NoActiveStroke`] if no stroke is active.
    pub fn extend_stroke(&self, point: Point) -> SketchResult<()> {
        self.write_state().apply(Action::ExtendStroke(point))
    }

    /// Finish the active stroke.
    pub fn end_stroke(&self) {
        let _ = self.write_state().apply(Action::EndStroke);
    }

    /// Clear the drawing, result and error.
    pub fn clear(&self) {
        let _ = self.write_state().apply(Action::Clear);
    }

    /// A copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> SketchState {
        self.read_state().clone()
    }

    /// Whether a submission is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.read_state().is_busy()
    }

    /// Whether the canvas currently owns the gesture (scroll-lock).
    #[must_use]
    pub fn owns_gesture(&self) -> bool {
        self.read_state().owns_gesture()
    }

    /// The last generated image, decoded for display.
    #[must_use]
    pub fn decoded_result(&self) -> Option<RenderResult<DecodedImage>> {
        let image = self.read_state().result().cloned()?;
        Some(decode_generated(&image))
    }

    /// Snapshot the canvas region as PNG bytes.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::CaptureUnavailable`] if no surface is mounted.
    /// - [`SubmitError::CaptureFailed`] if the snapshot fails.
    pub fn capture(&self) -> Result<Vec<u8>, SubmitError> {
        let state = self.snapshot();
        self.capture_state(&state)
    }

    fn capture_state(&self, state: &SketchState) -> Result<Vec<u8>, SubmitError> {
        let surface = self
            .surface
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(SubmitError::CaptureUnavailable)?;
        surface.snapshot(state).map_err(SubmitError::CaptureFailed)
    }

    /// Capture the sketch, send it for generation and record the outcome.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::Busy`] if another submission is in flight. This is
    ///   checked first, so the in-flight submission is never disturbed.
    /// - [`SubmitError::Validation`] if nothing is drawn; no request is made.
    /// - Capture and server failures, see [`SubmitError`].
    ///
    /// On failure the message is stored as the session error and the session
    /// returns to idle.
    pub async fn submit(&self) -> Result<GeneratedImage, SubmitError> {
        let pending = {
            let mut state = self.write_state();
            match state.apply(Action::SubmitStart) {
                Ok(()) => state.clone(),
                Err(SketchError::EmptyDrawing) => {
                    let err = SubmitError::Validation;
                    tracing::warn!("Submit rejected: {err}");
                    let _ = state.apply(Action::Reject(err.to_string()));
                    return Err(err);
                }
                Err(e) => {
                    tracing::debug!("Submit rejected: {e}");
                    return Err(e.into());
                }
            }
        };

        tracing::info!(
            "Submitting sketch: {} strokes, {} points",
            pending.drawing().stroke_count(),
            pending.drawing().point_count()
        );
        let outcome = self.run_submission(&pending).await;

        let mut state = self.write_state();
        match &outcome {
            Ok(image) => {
                tracing::info!("Generation succeeded ({} base64 chars)", image.as_base64().len());
                let _ = state.apply(Action::SubmitSuccess(image.clone()));
            }
            Err(e) => {
                tracing::warn!("Generation failed: {e}");
                let _ = state.apply(Action::SubmitFailure(e.to_string()));
            }
        }
        outcome
    }

    async fn run_submission(&self, pending: &SketchState) -> Result<GeneratedImage, SubmitError> {
        let png = self.capture_state(pending)?;
        Ok(self.generator.generate(&png).await?)
    }
}
