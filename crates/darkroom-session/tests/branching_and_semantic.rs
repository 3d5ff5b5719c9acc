//! Integration tests: branching from earlier outputs, semantic edits,
//! and concurrent access to one session.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Barrier;

use darkroom_pipeline::{
    RawParams, RgbImage, SemanticAxis, SemanticDescriptor, apply_chain, decode_rgb, encode_png,
    map_axes, process,
};
use darkroom_session::{
    EngineConfig, IterationOutcome, SessionEngine, SessionError, SessionStore, Suggestion,
};
use image::Rgb;
use serde_json::json;

fn photo() -> RgbImage {
    RgbImage::from_fn(48, 32, |x, y| {
        #[allow(clippy::cast_possible_truncation)]
        let v = (x * 5 + y * 3) as u8;
        Rgb([v, 180 - v / 2, 60 + v / 3])
    })
}

fn read(dir: &Path, name: &str) -> RgbImage {
    decode_rgb(&fs::read(dir.join(name)).unwrap()).unwrap()
}

fn started(root: &Path) -> (SessionEngine, darkroom_session::SessionId) {
    let engine = SessionEngine::new(root, EngineConfig::default());
    let id = engine
        .upload(&encode_png(&photo()).unwrap(), "cinematic")
        .unwrap();
    let first = Suggestion::new(
        RawParams::from(json!({"adjust_exposure": 25, "adjust_contrast": 1.3})),
        "open up",
    );
    engine.start(id, &first).unwrap();
    (engine, id)
}

#[test]
fn branch_runs_against_named_file() {
    let root = tempfile::tempdir().unwrap();
    let (engine, id) = started(root.path());
    let dir = engine.session_dir(id);

    let second = Suggestion::new(RawParams::from(json!({"adjust_saturation": 0.5})), "calm");
    engine.iterate(id, &second, None).unwrap();

    let raw = RawParams::from(json!({"adjust_temp_tint": {"temp": 30}, "apply_haze": 0.2}));
    let branch = Suggestion::new(raw.clone(), "warm branch");
    let IterationOutcome::Applied(report) = engine.iterate(id, &branch, Some("01_final.png")).unwrap()
    else {
        unreachable!("below the ceiling");
    };
    assert_eq!(report.base, "01_final.png");
    assert_eq!(report.output, "03_final.png");

    let expected = process(&read(&dir, "01_final.png"), &raw).image;
    assert_eq!(read(&dir, "03_final.png"), expected);

    // Without an override the next iteration builds on the branch.
    let next = engine.iterate(id, &Suggestion::default(), None).unwrap();
    let IterationOutcome::Applied(report) = next else {
        unreachable!("below the ceiling");
    };
    assert_eq!(report.base, "03_final.png");
    assert_eq!(read(&dir, "04_final.png"), expected);
}

#[test]
fn branch_from_original() {
    let root = tempfile::tempdir().unwrap();
    let (engine, id) = started(root.path());

    engine
        .iterate(id, &Suggestion::default(), Some("original.png"))
        .unwrap();
    assert_eq!(read(&engine.session_dir(id), "02_final.png"), photo());
}

#[test]
fn semantic_edit_requires_init() {
    let root = tempfile::tempdir().unwrap();
    let (engine, id) = started(root.path());
    assert!(matches!(
        engine.semantic_edit(id, &BTreeMap::new(), None),
        Err(SessionError::SemanticNotInitialized(_))
    ));
}

#[test]
fn semantic_init_falls_back_on_bad_descriptor() {
    let root = tempfile::tempdir().unwrap();
    let (engine, id) = started(root.path());

    for text in [None, Some("not json"), Some(r#"{"axes": []}"#)] {
        let descriptor = engine.semantic_init(id, text).unwrap();
        assert_eq!(descriptor, SemanticDescriptor::fallback(), "{text:?}");
    }
}

#[test]
fn semantic_init_replaces_descriptor() {
    let root = tempfile::tempdir().unwrap();
    let (engine, id) = started(root.path());
    let text = r#"{"axes": [
        {"name": "Moody-Airy", "left_pole": "Moody", "right_pole": "Airy", "description": "mood"},
        {"name": "gritty–clean", "left_pole": "Gritty", "right_pole": "Clean", "description": "texture"}
    ]}"#;

    engine.semantic_init(id, None).unwrap();
    let descriptor = engine.semantic_init(id, Some(text)).unwrap();
    assert_eq!(descriptor.axes[0].axis, SemanticAxis::MoodyAiry);
    assert_eq!(descriptor.axes[1].axis, SemanticAxis::GrittyClean);

    let stored = engine.store().get(id).unwrap().unwrap();
    assert_eq!(stored.descriptor, Some(descriptor));
}

#[test]
fn semantic_edit_writes_numbered_outputs() {
    let root = tempfile::tempdir().unwrap();
    let (engine, id) = started(root.path());
    let dir = engine.session_dir(id);
    let descriptor = engine.semantic_init(id, None).unwrap();
    let before = engine.session_info(id).unwrap();

    let coordinates = BTreeMap::from([
        ("Cool-Warm".to_owned(), 0.6),
        ("vibrant–muted".to_owned(), 3.0),
        ("Bright-Dark".to_owned(), 1.0),
    ]);
    let report = engine.semantic_edit(id, &coordinates, None).unwrap();
    assert_eq!(report.edit, 1);
    assert_eq!(report.output, "semantic_01.png");
    assert_eq!(report.base, "01_final.png");
    assert!((report.coordinates[0] - 0.6).abs() < f64::EPSILON);
    assert!((report.coordinates[1] - 1.0).abs() < f64::EPSILON);
    assert_eq!(report.iteration, 1);

    let expected_params = map_axes([0.6, 1.0], &descriptor);
    assert_eq!(report.parameters, expected_params);
    let expected = apply_chain(&read(&dir, "01_final.png"), &expected_params).image;
    assert_eq!(read(&dir, "semantic_01.png"), expected);

    let second = engine
        .semantic_edit(id, &BTreeMap::new(), Some("original.png"))
        .unwrap();
    assert_eq!(second.output, "semantic_02.png");
    assert_eq!(read(&dir, "semantic_02.png"), photo());

    // Semantic edits do not touch the iteration history.
    assert_eq!(engine.session_info(id).unwrap(), before);
}

#[test]
fn semantic_edit_validates_override() {
    let root = tempfile::tempdir().unwrap();
    let (engine, id) = started(root.path());
    engine.semantic_init(id, None).unwrap();

    assert!(matches!(
        engine.semantic_edit(id, &BTreeMap::new(), Some("05_final.png")),
        Err(SessionError::BaseImageNotFound(_))
    ));
    assert!(matches!(
        engine.semantic_edit(id, &BTreeMap::new(), Some("..")),
        Err(SessionError::InvalidBaseName(_))
    ));
    assert!(!engine.session_dir(id).join("semantic_01.png").exists());
}

#[test]
fn busy_session_rejects_other_calls() {
    let root = tempfile::tempdir().unwrap();
    let (engine, id) = started(root.path());
    let other = engine
        .upload(&encode_png(&photo()).unwrap(), "other")
        .unwrap();
    engine.start(other, &Suggestion::default()).unwrap();

    let mut busy = engine.store().get(id).unwrap().unwrap();
    busy.in_flight = true;
    engine.store().put(busy.clone()).unwrap();

    assert!(matches!(
        engine.iterate(id, &Suggestion::default(), None),
        Err(SessionError::IterationInProgress(_))
    ));
    assert!(matches!(
        engine.start(id, &Suggestion::default()),
        Err(SessionError::IterationInProgress(_))
    ));
    assert!(matches!(
        engine.semantic_edit(id, &BTreeMap::new(), None),
        Err(SessionError::IterationInProgress(_))
    ));
    assert_eq!(engine.store().get(id).unwrap(), Some(busy.clone()));

    // Reads and other sessions are unaffected.
    assert_eq!(engine.session_info(id).unwrap().iteration, 1);
    assert!(engine.iterate(other, &Suggestion::default(), None).is_ok());

    busy.in_flight = false;
    engine.store().put(busy).unwrap();
    assert!(engine.iterate(id, &Suggestion::default(), None).is_ok());
}

#[test]
fn racing_iterations_never_interleave() {
    let root = tempfile::tempdir().unwrap();
    let (engine, id) = started(root.path());
    let barrier = Barrier::new(4);
    let step = Suggestion::new(RawParams::from(json!({"adjust_exposure": 2})), "nudge");

    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    engine.iterate(id, &step, None)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let applied = results.iter().filter(|r| r.is_ok()).count();
    assert!(applied >= 1);
    assert!(
        results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, SessionError::IterationInProgress(_)))
    );

    let info = engine.session_info(id).unwrap();
    assert_eq!(info.history.len(), 1 + applied);
    let ordinals: Vec<_> = info.history.iter().map(|h| h.iteration).collect();
    let expected: Vec<u32> = (1..).take(ordinals.len()).collect();
    assert_eq!(ordinals, expected);
    assert!(!engine.store().get(id).unwrap().unwrap().in_flight);
}
