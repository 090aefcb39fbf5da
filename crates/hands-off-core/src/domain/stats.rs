//! Per-session counters.

use serde::{Deserialize, Serialize};

/// Counters collected over the lifetime of one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Frames run through detection.
    pub processed: u64,
    /// Frames skipped because decoding or a provider failed.
    pub skipped: u64,
    /// Frames discarded because the worker was still busy.
    pub dropped: u64,
    /// Rising edges, i.e. sounds played.
    pub alerts: u64,
}
