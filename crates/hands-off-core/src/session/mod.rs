//! Session lifecycle: capture thread, worker thread, and scoped resources.
//!
//! A [`Session`] owns everything acquired at start (frame source, landmark
//! detectors, audio sink). The capture thread feeds a keep-only-latest
//! [`FrameSlot`]; the worker drains it through a [`FramePipeline`]. Stopping,
//! joining, or dropping the session releases all of it and leaves the
//! published state at [`AlertState::Monitoring`].

mod pipeline;
mod slot;
mod status;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, info, warn};

pub use pipeline::{FrameOutcome, FramePipeline, Outputs, Providers};
pub use slot::FrameSlot;
pub use status::{status_channel, StatusPublisher, StatusUpdate, StatusWatcher};

use crate::detector::{ProximityConfig, ProximityDetector};
use crate::domain::{AlertState, SessionStats};
use crate::error::SessionError;
use crate::ports::{AlertSink, FrameEventSink, FramePreprocessor, FrameSource, LandmarkBackend};

/// Session settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionConfig {
    /// Proximity detection settings.
    pub proximity: ProximityConfig,
}

/// Collaborators handed to a session at start, besides the landmark backend.
pub struct SessionParts {
    /// Camera or recording.
    pub source: Box<dyn FrameSource>,
    /// Raw frame decoder.
    pub preprocessor: Box<dyn FramePreprocessor>,
    /// Alert sound.
    pub audio: Box<dyn AlertSink>,
    /// Per-frame event observer.
    pub events: Arc<dyn FrameEventSink>,
}

/// A running detection session.
pub struct Session {
    shutdown: Arc<AtomicBool>,
    slot: Arc<FrameSlot>,
    status: StatusWatcher,
    capture: Option<JoinHandle<()>>,
    worker: Option<JoinHandle<SessionStats>>,
}

impl Session {
    /// Acquires the landmark detectors and starts capture and worker threads.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ProviderUnavailable`] if a detector cannot be
    /// initialized, or [`SessionError::Spawn`] if a thread cannot start.
    /// Anything acquired before the failure is released.
    pub fn start(
        config: SessionConfig,
        backend: &dyn LandmarkBackend,
        parts: SessionParts,
    ) -> Result<Self, SessionError> {
        let providers = Providers::open(backend)?;
        let (publisher, status) = status_channel();
        let pipeline = FramePipeline::new(
            ProximityDetector::new(config.proximity),
            parts.preprocessor,
            providers,
            Outputs {
                audio: parts.audio,
                status: publisher,
                events: parts.events,
            },
        );

        let slot = Arc::new(FrameSlot::new());
        let shutdown = Arc::new(AtomicBool::new(false));

        let worker = spawn_worker(pipeline, Arc::clone(&slot), Arc::clone(&shutdown))?;
        let capture = match spawn_capture(parts.source, Arc::clone(&slot), Arc::clone(&shutdown)) {
            Ok(capture) => capture,
            Err(e) => {
                shutdown.store(true, Ordering::Release);
                slot.close();
                if worker.join().is_err() {
                    warn!("Worker thread panicked during failed start");
                }
                return Err(e);
            }
        };

        info!("Session started (threshold {})", config.proximity.threshold);

        Ok(Self {
            shutdown,
            slot,
            status,
            capture: Some(capture),
            worker: Some(worker),
        })
    }

    /// A watcher for the published alert state.
    #[must_use]
    pub fn status(&self) -> StatusWatcher {
        self.status.clone()
    }

    /// Current alert state.
    #[must_use]
    pub fn state(&self) -> AlertState {
        self.status.latest().state
    }

    /// Returns true once the worker has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.worker.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Stops capture and detection now and releases all resources.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ThreadPanicked`] if a session thread panicked.
    pub fn stop(mut self) -> Result<SessionStats, SessionError> {
        self.request_shutdown();
        self.finish()
    }

    /// Waits for the frame source to run out, then releases all resources.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ThreadPanicked`] if a session thread panicked.
    pub fn join(mut self) -> Result<SessionStats, SessionError> {
        self.finish()
    }

    fn request_shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);
        self.slot.close();
    }

    fn finish(&mut self) -> Result<SessionStats, SessionError> {
        let capture = self.capture.take().map(JoinHandle::join);
        let worker = self.worker.take().map(JoinHandle::join);

        if matches!(capture, Some(Err(_))) {
            return Err(SessionError::ThreadPanicked { thread: "capture" });
        }
        let stats = match worker {
            Some(Ok(stats)) => stats,
            Some(Err(_)) => return Err(SessionError::ThreadPanicked { thread: "worker" }),
            None => SessionStats::default(),
        };

        info!(
            "Session ended: {} processed, {} skipped, {} dropped, {} alert(s)",
            stats.processed, stats.skipped, stats.dropped, stats.alerts
        );
        Ok(stats)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.worker.is_some() || self.capture.is_some() {
            self.request_shutdown();
            if let Err(e) = self.finish() {
                warn!("Session teardown failed: {e}");
            }
        }
    }
}

/// Runs the worker loop until the slot closes or shutdown is requested.
///
/// A frame taken after shutdown is discarded and counted as dropped.
fn drain(mut pipeline: FramePipeline, slot: &FrameSlot, shutdown: &AtomicBool) -> SessionStats {
    let mut discarded = 0;
    while let Some(frame) = slot.take() {
        if shutdown.load(Ordering::Acquire) {
            debug!("Discarding frame {} on shutdown", frame.sequence);
            discarded = 1;
            break;
        }
        pipeline.process(&frame);
    }
    pipeline.finish(slot.dropped() + discarded)
}

fn spawn_worker(
    pipeline: FramePipeline,
    slot: Arc<FrameSlot>,
    shutdown: Arc<AtomicBool>,
) -> Result<JoinHandle<SessionStats>, SessionError> {
    thread::Builder::new()
        .name("hands-off-worker".into())
        .spawn(move || drain(pipeline, &slot, &shutdown))
        .map_err(|source| SessionError::Spawn {
            thread: "worker",
            source,
        })
}

fn spawn_capture(
    mut source: Box<dyn FrameSource>,
    slot: Arc<FrameSlot>,
    shutdown: Arc<AtomicBool>,
) -> Result<JoinHandle<()>, SessionError> {
    thread::Builder::new()
        .name("hands-off-capture".into())
        .spawn(move || {
            while !shutdown.load(Ordering::Acquire) {
                match source.next_frame() {
                    Ok(Some(frame)) => {
                        if slot.offer(frame) {
                            debug!("Worker busy, dropped older frame");
                        }
                    }
                    Ok(None) => {
                        debug!("Frame source exhausted");
                        break;
                    }
                    Err(e) => {
                        warn!("Frame source failed: {e:#}");
                        break;
                    }
                }
            }
            slot.close();
        })
        .map_err(|source| SessionError::Spawn {
            thread: "capture",
            source,
        })
}
