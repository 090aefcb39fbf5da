//! Mock implementations of core port traits.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use hands_off_core::domain::{
    DecodedFrame, FaceObservation, HandObservation, RawFrame, SessionStats,
};
use hands_off_core::error::PreprocessError;
use hands_off_core::ports::{
    AlertSink, FaceLandmarkProvider, FrameEvent, FrameEventSink, FramePreprocessor, FrameSource,
    HandLandmarkProvider, LandmarkBackend,
};
use image::RgbImage;

/// Counts how many tracked resources have been dropped.
///
/// Hand a [`ReleaseGuard`] to each mock that should report its release.
#[derive(Debug, Clone, Default)]
pub struct ReleaseTracker {
    released: Arc<AtomicUsize>,
}

impl ReleaseTracker {
    /// Creates a tracker with nothing released.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A guard that counts as released when dropped.
    #[must_use]
    pub fn guard(&self) -> ReleaseGuard {
        ReleaseGuard {
            released: Arc::clone(&self.released),
        }
    }

    /// Number of guards dropped so far.
    #[must_use]
    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

/// Increments its [`ReleaseTracker`] on drop.
#[derive(Debug)]
pub struct ReleaseGuard {
    released: Arc<AtomicUsize>,
}

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// Mock implementation of `FrameSource` for testing.
///
/// Yields pre-built frames, optionally followed by an endless stream of
/// copies of a template frame.
pub struct MockFrameSource {
    frames: VecDeque<RawFrame>,
    repeat: Option<RawFrame>,
    next_sequence: u64,
    delay: Option<Duration>,
    fail_at_end: bool,
    pulls: Arc<AtomicUsize>,
    _guard: Option<ReleaseGuard>,
}

impl MockFrameSource {
    /// Creates a source that yields `frames` and then ends.
    #[must_use]
    pub fn new(frames: Vec<RawFrame>) -> Self {
        let next_sequence = frames.last().map_or(0, |f| f.sequence + 1);
        Self {
            frames: frames.into(),
            repeat: None,
            next_sequence,
            delay: None,
            fail_at_end: false,
            pulls: Arc::new(AtomicUsize::new(0)),
            _guard: None,
        }
    }

    /// Creates a source that never ends, renumbering copies of `template`.
    #[must_use]
    pub fn endless(template: RawFrame) -> Self {
        let mut source = Self::new(vec![]);
        source.next_sequence = template.sequence;
        source.repeat = Some(template);
        source
    }

    /// Sleeps before every frame, like a camera at a fixed frame rate.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fails instead of ending once the frames run out.
    #[must_use]
    pub const fn failing_at_end(mut self) -> Self {
        self.fail_at_end = true;
        self
    }

    /// Reports this source's release to `tracker`.
    #[must_use]
    pub fn tracked_by(mut self, tracker: &ReleaseTracker) -> Self {
        self._guard = Some(tracker.guard());
        self
    }

    /// Shared counter of `next_frame` calls.
    #[must_use]
    pub fn pull_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.pulls)
    }
}

impl FrameSource for MockFrameSource {
    fn next_frame(&mut self) -> anyhow::Result<Option<RawFrame>> {
        self.pulls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        if let Some(frame) = self.frames.pop_front() {
            return Ok(Some(frame));
        }
        if let Some(template) = &self.repeat {
            let mut frame = template.clone();
            frame.sequence = self.next_sequence;
            self.next_sequence += 1;
            return Ok(Some(frame));
        }
        if self.fail_at_end {
            anyhow::bail!("camera disconnected");
        }
        Ok(None)
    }
}

/// Mock implementation of `FramePreprocessor` for testing.
///
/// Produces a black image of the frame's size without looking at the
/// pixels, failing on chosen sequence numbers.
#[derive(Debug, Clone, Default)]
pub struct MockPreprocessor {
    failing: HashSet<u64>,
}

impl MockPreprocessor {
    /// Creates a preprocessor that accepts every frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects the frame with this sequence number.
    #[must_use]
    pub fn failing_on(mut self, sequence: u64) -> Self {
        self.failing.insert(sequence);
        self
    }
}

impl FramePreprocessor for MockPreprocessor {
    fn decode(&self, frame: &RawFrame) -> Result<DecodedFrame, PreprocessError> {
        if self.failing.contains(&frame.sequence) {
            return Err(PreprocessError::BufferSizeMismatch {
                sequence: frame.sequence,
                format: frame.format,
                expected: frame.format.buffer_len(frame.width, frame.height),
                actual: 0,
            });
        }
        Ok(DecodedFrame::new(
            frame.sequence,
            RgbImage::new(frame.width, frame.height),
        ))
    }
}

/// Scripted landmark provider for testing.
///
/// Answers by frame sequence number, so dropped frames never shift the
/// script. Unscripted frames get the default observations.
pub struct ScriptedProvider<T> {
    by_sequence: HashMap<u64, Vec<T>>,
    default: Vec<T>,
    failing: HashSet<u64>,
    calls: Arc<AtomicUsize>,
    _guard: Option<ReleaseGuard>,
}

/// Scripted hand detector.
pub type ScriptedHands = ScriptedProvider<HandObservation>;

/// Scripted face detector.
pub type ScriptedFaces = ScriptedProvider<FaceObservation>;

impl<T: Clone> ScriptedProvider<T> {
    /// A provider that never detects anything.
    #[must_use]
    pub fn empty() -> Self {
        Self::always(vec![])
    }

    /// A provider that reports `observations` on every frame.
    #[must_use]
    pub fn always(observations: Vec<T>) -> Self {
        Self {
            by_sequence: HashMap::new(),
            default: observations,
            failing: HashSet::new(),
            calls: Arc::new(AtomicUsize::new(0)),
            _guard: None,
        }
    }

    /// Overrides the observations for one frame.
    #[must_use]
    pub fn on_frame(mut self, sequence: u64, observations: Vec<T>) -> Self {
        self.by_sequence.insert(sequence, observations);
        self
    }

    /// Fails inference on one frame.
    #[must_use]
    pub fn failing_on(mut self, sequence: u64) -> Self {
        self.failing.insert(sequence);
        self
    }

    /// Reports this provider's release to `tracker`.
    #[must_use]
    pub fn tracked_by(mut self, tracker: &ReleaseTracker) -> Self {
        self._guard = Some(tracker.guard());
        self
    }

    /// Shared counter of detection calls.
    #[must_use]
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    fn observe(&self, frame: &DecodedFrame) -> anyhow::Result<Vec<T>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(&frame.sequence) {
            anyhow::bail!("inference failed on frame {}", frame.sequence);
        }
        Ok(self
            .by_sequence
            .get(&frame.sequence)
            .unwrap_or(&self.default)
            .clone())
    }
}

impl HandLandmarkProvider for ScriptedHands {
    fn detect_hands(&mut self, frame: &DecodedFrame) -> anyhow::Result<Vec<HandObservation>> {
        self.observe(frame)
    }
}

impl FaceLandmarkProvider for ScriptedFaces {
    fn detect_faces(&mut self, frame: &DecodedFrame) -> anyhow::Result<Vec<FaceObservation>> {
        self.observe(frame)
    }
}

/// Mock implementation of `LandmarkBackend` for testing.
///
/// Hands out each scripted provider once; a missing provider behaves like a
/// model that fails to load.
pub struct MockBackend {
    hands: Mutex<Option<ScriptedHands>>,
    faces: Mutex<Option<ScriptedFaces>>,
}

impl MockBackend {
    /// A backend that opens the given providers.
    #[must_use]
    pub fn new(hands: ScriptedHands, faces: ScriptedFaces) -> Self {
        Self {
            hands: Mutex::new(Some(hands)),
            faces: Mutex::new(Some(faces)),
        }
    }

    /// A backend whose hand detector fails to initialize.
    #[must_use]
    pub fn without_hands(faces: ScriptedFaces) -> Self {
        Self {
            hands: Mutex::new(None),
            faces: Mutex::new(Some(faces)),
        }
    }

    /// A backend whose face detector fails to initialize.
    #[must_use]
    pub fn without_faces(hands: ScriptedHands) -> Self {
        Self {
            hands: Mutex::new(Some(hands)),
            faces: Mutex::new(None),
        }
    }
}

impl LandmarkBackend for MockBackend {
    fn open_hands(&self) -> anyhow::Result<Box<dyn HandLandmarkProvider>> {
        let hands = self
            .hands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or_else(|| anyhow::anyhow!("hand_landmarker.task could not be loaded"))?;
        Ok(Box::new(hands))
    }

    fn open_faces(&self) -> anyhow::Result<Box<dyn FaceLandmarkProvider>> {
        let faces = self
            .faces
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or_else(|| anyhow::anyhow!("face_landmarker.task could not be loaded"))?;
        Ok(Box::new(faces))
    }
}

/// Mock implementation of `AlertSink` for testing.
///
/// Clones share the play counter, so a clone can be kept for assertions
/// while another is boxed into a session.
#[derive(Debug, Clone, Default)]
pub struct MockAlertSink {
    plays: Arc<AtomicUsize>,
}

impl MockAlertSink {
    /// Creates a sink that has not played yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times the sound was played.
    #[must_use]
    pub fn plays(&self) -> usize {
        self.plays.load(Ordering::SeqCst)
    }
}

impl AlertSink for MockAlertSink {
    fn play_once(&self) {
        self.plays.fetch_add(1, Ordering::SeqCst);
    }
}

/// Mock implementation of `FrameEventSink` for testing.
///
/// Captures events for later assertions; clones share the log.
#[derive(Debug, Clone, Default)]
pub struct MockEventSink {
    events: Arc<Mutex<Vec<FrameEvent>>>,
}

impl MockEventSink {
    /// Creates an empty event log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<FrameEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of `Processed` events.
    #[must_use]
    pub fn processed_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, FrameEvent::Processed { .. }))
            .count()
    }

    /// Returns the number of `Skipped` events.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, FrameEvent::Skipped { .. }))
            .count()
    }

    /// Returns the stats from the `Finished` event, if any.
    #[must_use]
    pub fn finished_stats(&self) -> Option<SessionStats> {
        self.events().iter().find_map(|e| match e {
            FrameEvent::Finished(stats) => Some(*stats),
            _ => None,
        })
    }
}

impl FrameEventSink for MockEventSink {
    fn on_event(&self, event: FrameEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{FaceBuilder, FrameBuilder, HandBuilder};

    #[test]
    fn test_mock_frame_source_ends() {
        let mut source = MockFrameSource::new(vec![FrameBuilder::blank(0), FrameBuilder::blank(1)]);
        assert_eq!(source.next_frame().unwrap().map(|f| f.sequence), Some(0));
        assert_eq!(source.next_frame().unwrap().map(|f| f.sequence), Some(1));
        assert!(source.next_frame().unwrap().is_none());
        assert_eq!(source.pull_counter().load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_mock_frame_source_endless_renumbers() {
        let mut source = MockFrameSource::endless(FrameBuilder::blank(10));
        let sequences: Vec<u64> = (0..3)
            .map(|_| source.next_frame().unwrap().unwrap().sequence)
            .collect();
        assert_eq!(sequences, vec![10, 11, 12]);
    }

    #[test]
    fn test_mock_frame_source_failing_at_end() {
        let mut source = MockFrameSource::new(vec![]).failing_at_end();
        assert!(source.next_frame().is_err());
    }

    #[test]
    fn test_scripted_provider_by_sequence() {
        let hand = HandBuilder::away().build();
        let mut hands = ScriptedHands::empty()
            .on_frame(2, vec![hand])
            .failing_on(3);
        let frame = |seq| DecodedFrame::new(seq, RgbImage::new(1, 1));

        assert!(hands.detect_hands(&frame(1)).unwrap().is_empty());
        assert_eq!(hands.detect_hands(&frame(2)).unwrap().len(), 1);
        assert!(hands.detect_hands(&frame(3)).is_err());
        assert_eq!(hands.call_counter().load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_mock_backend_opens_once() {
        let backend = MockBackend::new(
            ScriptedHands::empty(),
            ScriptedFaces::always(vec![FaceBuilder::with_mouth_at(0.5, 0.5).build()]),
        );
        assert!(backend.open_hands().is_ok());
        assert!(backend.open_hands().is_err());
        assert!(backend.open_faces().is_ok());
    }

    #[test]
    fn test_release_tracker_counts_drops() {
        let tracker = ReleaseTracker::new();
        let hands = ScriptedHands::empty().tracked_by(&tracker);
        let source = MockFrameSource::new(vec![]).tracked_by(&tracker);
        assert_eq!(tracker.released(), 0);
        drop(hands);
        drop(source);
        assert_eq!(tracker.released(), 2);
    }

    #[test]
    fn test_mock_alert_sink_shares_counter() {
        let sink = MockAlertSink::new();
        let boxed: Box<dyn AlertSink> = Box::new(sink.clone());
        boxed.play_once();
        boxed.play_once();
        assert_eq!(sink.plays(), 2);
    }

    #[test]
    fn test_mock_event_sink() {
        let sink = MockEventSink::new();
        sink.on_event(FrameEvent::Skipped {
            sequence: 0,
            reason: "bad frame".into(),
        });
        sink.on_event(FrameEvent::Finished(SessionStats::default()));

        assert_eq!(sink.skipped_count(), 1);
        assert_eq!(sink.processed_count(), 0);
        assert_eq!(sink.finished_stats(), Some(SessionStats::default()));
    }

    #[test]
    fn test_mock_preprocessor_failing_on() {
        let pre = MockPreprocessor::new().failing_on(1);
        assert!(pre.decode(&FrameBuilder::blank(0)).is_ok());
        assert!(pre.decode(&FrameBuilder::blank(1)).is_err());
    }
}
