//! Audio alert port.

/// Port for the one-shot alert sound.
pub trait AlertSink: Send {
    /// Starts the alert sound and returns immediately.
    ///
    /// May do nothing if no audio device is available.
    fn play_once(&self);
}
