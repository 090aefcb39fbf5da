//! Single-entry, keep-only-latest frame mailbox between capture and worker.

use std::sync::{Condvar, Mutex, PoisonError};

use crate::domain::RawFrame;

#[derive(Default)]
struct SlotState {
    pending: Option<RawFrame>,
    closed: bool,
    dropped: u64,
}

/// Hands frames from the capture thread to the worker, keeping only the
/// newest one.
///
/// `offer` never blocks on the consumer: a frame still waiting when a newer
/// one arrives is discarded and counted as dropped.
#[derive(Default)]
pub struct FrameSlot {
    state: Mutex<SlotState>,
    ready: Condvar,
}

impl FrameSlot {
    /// Creates an empty, open slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `frame`, replacing any frame the worker has not taken yet.
    ///
    /// Returns true if an older frame was discarded. Frames offered after
    /// [`close`](Self::close) are ignored.
    pub fn offer(&self, frame: RawFrame) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.closed {
            return false;
        }
        let replaced = state.pending.replace(frame).is_some();
        if replaced {
            state.dropped += 1;
        }
        drop(state);
        self.ready.notify_one();
        replaced
    }

    /// Blocks until a frame is pending or the slot is closed.
    ///
    /// A frame offered before closing is still handed out; `None` means the
    /// slot is closed and empty.
    pub fn take(&self) -> Option<RawFrame> {
        let guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let mut state = self
            .ready
            .wait_while(guard, |s| s.pending.is_none() && !s.closed)
            .unwrap_or_else(PoisonError::into_inner);
        state.pending.take()
    }

    /// Closes the slot and wakes the worker.
    pub fn close(&self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .closed = true;
        self.ready.notify_all();
    }

    /// Returns true once [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .closed
    }

    /// Number of frames discarded so far.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .dropped
    }
}
