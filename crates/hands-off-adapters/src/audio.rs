//! Alert sound adapters.

use std::io::Write;

use hands_off_core::AlertSink;
use tracing::{debug, warn};

/// Rings the terminal bell on stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl AlertSink for TerminalBell {
    fn play_once(&self) {
        let mut stderr = std::io::stderr().lock();
        if let Err(e) = stderr.write_all(b"\x07").and_then(|()| stderr.flush()) {
            warn!("Failed to ring terminal bell: {e}");
        }
    }
}

/// Plays nothing. Used when the sound is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAlert;

impl AlertSink for SilentAlert {
    fn play_once(&self) {
        debug!("Alert sound muted");
    }
}
