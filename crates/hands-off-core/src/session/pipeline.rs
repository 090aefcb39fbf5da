//! The per-frame detect-then-advance pipeline run by the session worker.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::status::StatusPublisher;
use crate::alert::AlertMachine;
use crate::detector::ProximityDetector;
use crate::domain::{AlertState, RawFrame, SessionStats};
use crate::error::SessionError;
use crate::ports::{
    AlertSink, FaceLandmarkProvider, FrameEvent, FrameEventSink, FramePreprocessor,
    HandLandmarkProvider, LandmarkBackend,
};

/// The two landmark detectors held for the lifetime of a session.
pub struct Providers {
    /// Hand detector.
    pub hands: Box<dyn HandLandmarkProvider>,
    /// Face detector.
    pub faces: Box<dyn FaceLandmarkProvider>,
}

impl Providers {
    /// Acquires both detectors from `backend`.
    ///
    /// If the face detector fails, the already opened hand detector is
    /// released before returning.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ProviderUnavailable`] naming the detector that
    /// failed to initialize.
    pub fn open(backend: &dyn LandmarkBackend) -> Result<Self, SessionError> {
        let hands = backend
            .open_hands()
            .map_err(|source| SessionError::ProviderUnavailable {
                provider: "hand",
                source,
            })?;
        let faces = backend
            .open_faces()
            .map_err(|source| SessionError::ProviderUnavailable {
                provider: "face",
                source,
            })?;
        Ok(Self { hands, faces })
    }
}

/// Where the pipeline delivers its side effects.
pub struct Outputs {
    /// Plays the alert sound on each rising edge.
    pub audio: Box<dyn AlertSink>,
    /// Publishes the alert state after every processed frame.
    pub status: StatusPublisher,
    /// Receives per-frame events.
    pub events: Arc<dyn FrameEventSink>,
}

/// What happened to one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Detection ran.
    Processed {
        /// Whether a hand was near the mouth.
        detected: bool,
        /// Alert state after the frame.
        state: AlertState,
        /// Whether the sound was triggered.
        alerted: bool,
    },
    /// Decoding or landmark detection failed; state unchanged.
    Skipped {
        /// Failure description.
        reason: String,
    },
}

/// Runs decode, landmark detection, proximity detection and the alert state
/// machine for one frame at a time.
pub struct FramePipeline {
    detector: ProximityDetector,
    preprocessor: Box<dyn FramePreprocessor>,
    providers: Providers,
    machine: AlertMachine,
    outputs: Outputs,
    stats: SessionStats,
}

impl FramePipeline {
    /// Assembles a pipeline in [`AlertState::Monitoring`].
    #[must_use]
    pub fn new(
        detector: ProximityDetector,
        preprocessor: Box<dyn FramePreprocessor>,
        providers: Providers,
        outputs: Outputs,
    ) -> Self {
        Self {
            detector,
            preprocessor,
            providers,
            machine: AlertMachine::new(),
            outputs,
            stats: SessionStats::default(),
        }
    }

    /// Current alert state.
    #[must_use]
    pub const fn state(&self) -> AlertState {
        self.machine.state()
    }

    /// Counters so far. `dropped` is only filled in by [`finish`](Self::finish).
    #[must_use]
    pub const fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Processes one frame.
    pub fn process(&mut self, frame: &RawFrame) -> FrameOutcome {
        let sequence = frame.sequence;

        let decoded = match self.preprocessor.decode(frame) {
            Ok(decoded) => decoded,
            Err(e) => return self.skip(sequence, e.to_string()),
        };

        let hands = match self.providers.hands.detect_hands(&decoded) {
            Ok(hands) => hands,
            Err(e) => return self.skip(sequence, format!("hand detection failed: {e:#}")),
        };
        let faces = match self.providers.faces.detect_faces(&decoded) {
            Ok(faces) => faces,
            Err(e) => return self.skip(sequence, format!("face detection failed: {e:#}")),
        };

        let detected = self.detector.detect(&hands, &faces);
        let alerted = self.machine.step(detected);
        let state = self.machine.state();

        if alerted {
            info!("Hand near mouth at frame {sequence}");
            self.outputs.audio.play_once();
            self.stats.alerts += 1;
        }
        debug!(
            "Frame {sequence}: {} hand(s), {} face(s), detected={detected}, state={state:?}",
            hands.len(),
            faces.len()
        );

        self.outputs.status.publish(state, Some(sequence));
        self.stats.processed += 1;
        self.outputs.events.on_event(FrameEvent::Processed {
            sequence,
            detected,
            state,
            alerted,
        });

        FrameOutcome::Processed {
            detected,
            state,
            alerted,
        }
    }

    fn skip(&mut self, sequence: u64, reason: String) -> FrameOutcome {
        warn!("Skipping frame {sequence}: {reason}");
        self.stats.skipped += 1;
        self.outputs.events.on_event(FrameEvent::Skipped {
            sequence,
            reason: reason.clone(),
        });
        FrameOutcome::Skipped { reason }
    }

    /// Ends the session: resets the state to monitoring, publishes it, and
    /// releases every held resource.
    pub fn finish(mut self, dropped: u64) -> SessionStats {
        self.machine.reset();
        self.outputs.status.publish(self.machine.state(), None);
        self.stats.dropped = dropped;
        self.outputs.events.on_event(FrameEvent::Finished(self.stats));
        self.stats
    }
}
