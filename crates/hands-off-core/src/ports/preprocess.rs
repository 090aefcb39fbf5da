//! Frame preprocessing port.

use crate::domain::{DecodedFrame, RawFrame};
use crate::error::PreprocessError;

/// Port for turning device-native frames into upright RGB images.
pub trait FramePreprocessor: Send {
    /// Decodes `frame` and applies its rotation hint.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed frames; the caller skips them.
    fn decode(&self, frame: &RawFrame) -> Result<DecodedFrame, PreprocessError>;
}
