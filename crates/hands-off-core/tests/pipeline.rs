//! Frame pipeline integration tests using scripted landmark providers.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::missing_panics_doc)]

use std::sync::Arc;

use hands_off_core::session::{status_channel, FrameOutcome, FramePipeline, Outputs, Providers};
use hands_off_core::{AlertState, FrameEvent, ProximityConfig, ProximityDetector, StatusWatcher};
use hands_off_test_support::{
    FaceBuilder, FrameBuilder, HandBuilder, MockAlertSink, MockEventSink, MockPreprocessor,
    ScriptedFaces, ScriptedHands,
};

struct Harness {
    pipeline: FramePipeline,
    audio: MockAlertSink,
    events: MockEventSink,
    status: StatusWatcher,
}

fn harness(hands: ScriptedHands, faces: ScriptedFaces, preprocessor: MockPreprocessor) -> Harness {
    let audio = MockAlertSink::new();
    let events = MockEventSink::new();
    let (publisher, status) = status_channel();
    let pipeline = FramePipeline::new(
        ProximityDetector::new(ProximityConfig::default()),
        Box::new(preprocessor),
        Providers {
            hands: Box::new(hands),
            faces: Box::new(faces),
        },
        Outputs {
            audio: Box::new(audio.clone()),
            status: publisher,
            events: Arc::new(events.clone()),
        },
    );
    Harness {
        pipeline,
        audio,
        events,
        status,
    }
}

/// Hands scripted so that frame `i` is near the mouth iff `pattern[i]`.
fn hands_following(pattern: &[bool]) -> ScriptedHands {
    pattern
        .iter()
        .enumerate()
        .fold(ScriptedHands::empty(), |hands, (i, &near)| {
            let hand = if near {
                HandBuilder::away().fingertip(hands_off_core::Fingertip::Index, 0.52, 0.5)
            } else {
                HandBuilder::away()
            };
            hands.on_frame(i as u64, vec![hand.build()])
        })
}

fn centered_face() -> ScriptedFaces {
    ScriptedFaces::always(vec![FaceBuilder::with_mouth_at(0.5, 0.5).build()])
}

#[test]
fn test_alert_sequence_plays_once_per_rising_edge() {
    let pattern = [false, true, true, false, true];
    let mut h = harness(
        hands_following(&pattern),
        centered_face(),
        MockPreprocessor::new(),
    );

    let states: Vec<AlertState> = (0..pattern.len() as u64)
        .map(|seq| match h.pipeline.process(&FrameBuilder::blank(seq)) {
            FrameOutcome::Processed { state, .. } => state,
            FrameOutcome::Skipped { reason } => panic!("unexpected skip: {reason}"),
        })
        .collect();

    assert_eq!(
        states,
        vec![
            AlertState::Monitoring,
            AlertState::Alerting,
            AlertState::Alerting,
            AlertState::Monitoring,
            AlertState::Alerting,
        ]
    );
    assert_eq!(h.audio.plays(), 2);
    assert_eq!(h.pipeline.stats().alerts, 2);
    assert_eq!(h.pipeline.stats().processed, 5);
}

#[test]
fn test_every_processed_frame_is_published() {
    let mut h = harness(
        hands_following(&[true, true]),
        centered_face(),
        MockPreprocessor::new(),
    );

    h.pipeline.process(&FrameBuilder::blank(0));
    let first = h.status.latest();
    h.pipeline.process(&FrameBuilder::blank(1));
    let second = h.status.latest();

    assert_eq!(first.state, AlertState::Alerting);
    assert_eq!(first.frame, Some(0));
    assert_eq!(second.state, AlertState::Alerting);
    assert_eq!(second.frame, Some(1));
    assert!(second.version > first.version);
}

#[test]
fn test_decode_failure_skips_frame_without_state_change() {
    let mut h = harness(
        hands_following(&[true, true, true]),
        centered_face(),
        MockPreprocessor::new().failing_on(1),
    );

    h.pipeline.process(&FrameBuilder::blank(0));
    let published = h.status.latest();

    let outcome = h.pipeline.process(&FrameBuilder::blank(1));
    assert!(matches!(outcome, FrameOutcome::Skipped { .. }));
    assert_eq!(h.pipeline.state(), AlertState::Alerting);
    assert_eq!(h.status.latest(), published);

    h.pipeline.process(&FrameBuilder::blank(2));
    assert_eq!(h.audio.plays(), 1);
    assert_eq!(h.events.skipped_count(), 1);
    assert_eq!(h.events.processed_count(), 2);
}

#[test]
fn test_provider_failure_skips_frame() {
    let mut h = harness(
        ScriptedHands::empty().failing_on(0),
        centered_face(),
        MockPreprocessor::new(),
    );

    let outcome = h.pipeline.process(&FrameBuilder::blank(0));
    match outcome {
        FrameOutcome::Skipped { reason } => assert!(reason.contains("hand detection failed")),
        FrameOutcome::Processed { .. } => panic!("frame should be skipped"),
    }
    assert_eq!(h.pipeline.stats().skipped, 1);
    assert_eq!(h.pipeline.state(), AlertState::Monitoring);
}

#[test]
fn test_no_face_never_alerts() {
    let mut h = harness(
        hands_following(&[true, true]),
        ScriptedFaces::empty(),
        MockPreprocessor::new(),
    );

    for seq in 0..2 {
        h.pipeline.process(&FrameBuilder::blank(seq));
    }
    assert_eq!(h.pipeline.state(), AlertState::Monitoring);
    assert_eq!(h.audio.plays(), 0);
}

#[test]
fn test_finish_resets_to_monitoring() {
    let mut h = harness(
        hands_following(&[true]),
        centered_face(),
        MockPreprocessor::new(),
    );
    h.pipeline.process(&FrameBuilder::blank(0));
    assert_eq!(h.status.latest().state, AlertState::Alerting);

    let stats = h.pipeline.finish(3);

    let last = h.status.latest();
    assert_eq!(last.state, AlertState::Monitoring);
    assert_eq!(last.frame, None);
    assert!(h.status.is_closed());
    assert_eq!(stats.dropped, 3);
    assert_eq!(stats.alerts, 1);
    assert_eq!(h.events.finished_stats(), Some(stats));
    assert!(matches!(
        h.events.events().last(),
        Some(FrameEvent::Finished(_))
    ));
}
