//! Frame source port for camera-like producers.

use crate::domain::RawFrame;

/// Port for pulling frames from a camera or a recording.
///
/// Called repeatedly from a dedicated capture thread. Implementations pace
/// themselves (a camera blocks until the next exposure); dropping frames the
/// worker cannot keep up with is handled by the session, not here.
pub trait FrameSource: Send {
    /// Returns the next frame, or `None` once the stream has ended.
    ///
    /// # Errors
    ///
    /// Returns an error if the device fails. Capture stops at the first error.
    fn next_frame(&mut self) -> anyhow::Result<Option<RawFrame>>;
}
