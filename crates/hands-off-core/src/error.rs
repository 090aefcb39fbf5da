//! Error types for observations, frame preprocessing, and sessions.

use thiserror::Error;

use crate::domain::PixelFormat;

/// Errors raised when a landmark provider hands over a malformed observation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObservationError {
    /// A hand observation did not carry the fixed 21-point layout.
    #[error("hand observation needs {expected} landmarks, got {actual}")]
    WrongLandmarkCount {
        /// Required landmark count.
        expected: usize,
        /// Landmarks actually supplied.
        actual: usize,
    },

    /// A face observation is too short to contain the lip-center landmarks.
    #[error("face observation needs at least {required} landmarks to reach the lip centers, got {actual}")]
    MissingLipLandmarks {
        /// Minimum landmark count.
        required: usize,
        /// Landmarks actually supplied.
        actual: usize,
    },
}

/// Errors raised while turning a raw camera frame into an upright RGB image.
///
/// A failed frame is skipped; it never changes the alert state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreprocessError {
    /// The frame reports a zero width or height.
    #[error("frame {sequence} has zero dimensions ({width}x{height})")]
    ZeroDimensions {
        /// Frame sequence number.
        sequence: u64,
        /// Reported width.
        width: u32,
        /// Reported height.
        height: u32,
    },

    /// The pixel buffer does not match the size implied by format and dimensions.
    #[error("buffer size mismatch for {format} frame {sequence}: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch {
        /// Frame sequence number.
        sequence: u64,
        /// Declared pixel format.
        format: PixelFormat,
        /// Expected buffer length.
        expected: usize,
        /// Actual buffer length.
        actual: usize,
    },
}

/// Errors raised while starting or tearing down a detection session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A landmark detector could not be initialized. Detection is unavailable
    /// for this session; there is no automatic retry.
    #[error("{provider} landmark provider unavailable")]
    ProviderUnavailable {
        /// Which provider failed ("hand" or "face").
        provider: &'static str,
        /// Underlying failure.
        #[source]
        source: anyhow::Error,
    },

    /// A session thread could not be spawned.
    #[error("failed to spawn {thread} thread")]
    Spawn {
        /// Thread role.
        thread: &'static str,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A session thread panicked before it could hand back its results.
    #[error("{thread} thread panicked")]
    ThreadPanicked {
        /// Thread role.
        thread: &'static str,
    },
}
