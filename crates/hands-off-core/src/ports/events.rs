//! Per-frame event port for logging and output integration.

use serde::Serialize;

use crate::domain::{AlertState, SessionStats};

/// Events emitted by the pipeline worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FrameEvent {
    /// A frame ran through detection.
    Processed {
        /// Frame sequence number.
        sequence: u64,
        /// Whether a hand was near the mouth.
        detected: bool,
        /// Alert state after this frame.
        state: AlertState,
        /// Whether this frame triggered the sound.
        alerted: bool,
    },
    /// A frame was skipped; the alert state is unchanged.
    Skipped {
        /// Frame sequence number.
        sequence: u64,
        /// Why the frame was skipped.
        reason: String,
    },
    /// The session ended.
    Finished(SessionStats),
}

/// Port for receiving pipeline events.
pub trait FrameEventSink: Send + Sync {
    /// Called for every event, on the worker thread.
    fn on_event(&self, event: FrameEvent);
}

/// Event sink that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardEvents;

impl FrameEventSink for DiscardEvents {
    fn on_event(&self, _event: FrameEvent) {}
}
