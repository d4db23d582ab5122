//! Property tests for stroke capture.
//!
//! Arbitrary touch sequences must always produce a well-formed drawing.

use proptest::prelude::*;
use sketch_core::{Action, CanvasSize, Point, SketchState, TouchEvent, TouchPhase};

const CANVAS: f32 = 300.0;

#[derive(Debug, Clone)]
enum Gesture {
    Begin(f32, f32),
    Move(f32, f32),
    End,
}

fn arb_gesture() -> impl Strategy<Value = Gesture> {
    let coord = -100.0f32..400.0f32;
    prop_oneof![
        (coord.clone(), coord.clone()).prop_map(|(x, y)| Gesture::Begin(x, y)),
        (coord.clone(), coord).prop_map(|(x, y)| Gesture::Move(x, y)),
        Just(Gesture::End),
    ]
}

/// A well-formed drag: begin, some moves, end.
fn arb_drag() -> impl Strategy<Value = Vec<(f32, f32)>> {
    prop::collection::vec((-50.0f32..350.0f32, -50.0f32..350.0f32), 1..20)
}

fn to_event(gesture: &Gesture, timestamp_ms: u64) -> TouchEvent {
    match *gesture {
        Gesture::Begin(x, y) => TouchEvent::single(TouchPhase::Start, x, y, timestamp_ms),
        Gesture::Move(x, y) => TouchEvent::single(TouchPhase::Move, x, y, timestamp_ms),
        Gesture::End => TouchEvent::new(TouchPhase::End, vec![], timestamp_ms),
    }
}

proptest! {
    #[test]
    fn prop_one_stroke_per_drag_in_order(drags in prop::collection::vec(arb_drag(), 0..8)) {
        let canvas = CanvasSize::square(CANVAS);
        let mut state = SketchState::new(canvas);

        for drag in &drags {
            let (x0, y0) = drag[0];
            state.apply(Action::BeginStroke(Point::new(x0, y0))).expect("begin");
            for &(x, y) in &drag[1..] {
                state.apply(Action::ExtendStroke(Point::new(x, y))).expect("extend");
            }
            state.apply(Action::EndStroke).expect("end");
        }

        let strokes = state.drawing().strokes();
        prop_assert_eq!(strokes.len(), drags.len());
        for (stroke, drag) in strokes.iter().zip(&drags) {
            prop_assert_eq!(stroke.len(), drag.len());
            for (point, &(x, y)) in stroke.points().iter().zip(drag) {
                prop_assert_eq!(*point, canvas.clamp(Point::new(x, y)));
            }
        }
    }

    #[test]
    fn prop_arbitrary_touch_sequences_keep_invariants(
        gestures in prop::collection::vec(arb_gesture(), 0..60)
    ) {
        let canvas = CanvasSize::square(CANVAS);
        let mut state = SketchState::new(canvas);
        let begins = gestures.iter().filter(|g| matches!(g, Gesture::Begin(..))).count();

        for (ts, gesture) in gestures.iter().enumerate() {
            state.handle_touch(&to_event(gesture, ts as u64));
        }

        prop_assert_eq!(state.drawing().stroke_count(), begins);
        for stroke in state.drawing().strokes() {
            prop_assert!(!stroke.is_empty());
            for point in stroke.points() {
                prop_assert!(canvas.contains(point), "{:?} outside canvas", point);
            }
        }
        prop_assert_eq!(state.active_stroke().is_some(), state.owns_gesture());
    }

    #[test]
    fn prop_clear_always_resets(gestures in prop::collection::vec(arb_gesture(), 0..30)) {
        let mut state = SketchState::new(CanvasSize::square(CANVAS));
        for (ts, gesture) in gestures.iter().enumerate() {
            state.handle_touch(&to_event(gesture, ts as u64));
        }
        if state.apply(Action::SubmitStart).is_ok() {
            state.apply(Action::SubmitFailure("boom".to_string())).expect("failure");
        }

        state.apply(Action::Clear).expect("clear");

        prop_assert!(state.drawing().is_empty());
        prop_assert!(state.active_stroke().is_none());
        prop_assert!(state.result().is_none());
        prop_assert!(state.error().is_none());
    }
}
