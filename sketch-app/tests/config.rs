//! Command-line parsing, configuration and touch log loading.

use std::io::Write;
use std::time::Duration;

use clap::Parser;
use sketch_app::{load_touch_log, AppConfig, CliArgs, Command, LoadError};
use sketch_core::{CanvasSize, TouchPhase};

#[test]
fn test_defaults() {
    let args = CliArgs::try_parse_from(["sketch2img", "health"]).expect("parse");
    assert!(matches!(args.command, Command::Health));

    let config = AppConfig::from(&args);
    // The env var may be set on a developer machine; only check the rest.
    assert_eq!(config.canvas, CanvasSize::square(300.0));
    assert!((config.stroke_width - 4.0).abs() < f32::EPSILON);
    assert_eq!(config.timeout, None);
}

#[test]
fn test_global_options_after_subcommand() {
    let args = CliArgs::try_parse_from([
        "sketch2img",
        "generate",
        "--events",
        "touches.json",
        "--endpoint",
        "http://10.0.0.2:5001",
        "--canvas-size",
        "512",
        "--timeout-secs",
        "30",
    ])
    .expect("parse");

    match &args.command {
        Command::Generate { events, output } => {
            assert_eq!(events.to_str(), Some("touches.json"));
            assert_eq!(output.to_str(), Some("generated.png"));
        }
        other => panic!("unexpected command: {other:?}"),
    }

    let config = AppConfig::from(&args);
    assert_eq!(config.endpoint, "http://10.0.0.2:5001");
    assert_eq!(config.canvas, CanvasSize::square(512.0));
    assert_eq!(config.timeout, Some(Duration::from_secs(30)));

    let client = config.client_config();
    assert_eq!(client.base_url, "http://10.0.0.2:5001");
    assert_eq!(client.timeout, Some(Duration::from_secs(30)));

    let state = config.initial_state();
    assert_eq!(state.canvas(), CanvasSize::square(512.0));
    assert!(state.drawing().is_empty());
}

#[test]
fn test_render_requires_events() {
    assert!(CliArgs::try_parse_from(["sketch2img", "render"]).is_err());
}

#[test]
fn test_load_touch_log() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    write!(
        file,
        r#"[
            {{"phase": "start", "touches": [{{"x": 5, "y": 5}}], "timestamp_ms": 0}},
            {{"phase": "move", "touches": [{{"x": 50, "y": 40}}], "timestamp_ms": 16}},
            {{"phase": "end", "touches": [], "timestamp_ms": 32}}
        ]"#
    )
    .expect("write");

    let events = load_touch_log(file.path()).expect("load");
    assert_eq!(events.len(), 3);
    assert_eq!(events[1].phase, TouchPhase::Move);
}

#[test]
fn test_load_touch_log_errors() {
    let dir = tempfile::tempdir().expect("tempdir");

    let missing = dir.path().join("missing.json");
    assert!(matches!(
        load_touch_log(&missing),
        Err(LoadError::Io { .. })
    ));

    let garbage = dir.path().join("garbage.json");
    std::fs::write(&garbage, "{not json").expect("write");
    assert!(matches!(
        load_touch_log(&garbage),
        Err(LoadError::Parse { .. })
    ));
}
