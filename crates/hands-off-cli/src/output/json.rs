//! JSON Lines event output adapter.

use hands_off_core::{FrameEvent, FrameEventSink};
use serde::Serialize;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};

/// One output line: the event plus when it happened.
#[derive(Serialize)]
struct TimestampedEvent<'a> {
    timestamp: String,
    #[serde(flatten)]
    event: &'a FrameEvent,
}

/// Writes every pipeline event as a JSON object on its own line.
pub struct JsonEventOutput {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventOutput {
    /// Creates a new JSON output writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    /// Creates a new JSON output writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    fn write(&self, event: &FrameEvent) -> anyhow::Result<()> {
        let line = serde_json::to_string(&TimestampedEvent {
            timestamp: iso_timestamp(),
            event,
        })?;
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{line}")?;
        if matches!(event, FrameEvent::Finished(_)) {
            writer.flush()?;
        }
        Ok(())
    }
}

impl FrameEventSink for JsonEventOutput {
    fn on_event(&self, event: FrameEvent) {
        if let Err(e) = self.write(&event) {
            warn!("Failed to write event: {e:#}");
        }
    }
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}
