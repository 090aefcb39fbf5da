//! Landmark provider ports.
//!
//! Hand and face detection are external models. These traits are the
//! narrow contracts the pipeline needs from them.

use crate::domain::{DecodedFrame, FaceObservation, HandObservation};

/// Port for a hand-landmark detector.
pub trait HandLandmarkProvider: Send {
    /// Detects zero or more hands in `frame`.
    ///
    /// # Errors
    ///
    /// Returns an error if inference fails for this frame.
    fn detect_hands(&mut self, frame: &DecodedFrame) -> anyhow::Result<Vec<HandObservation>>;
}

/// Port for a face-landmark detector.
pub trait FaceLandmarkProvider: Send {
    /// Detects zero or more faces in `frame`.
    ///
    /// # Errors
    ///
    /// Returns an error if inference fails for this frame.
    fn detect_faces(&mut self, frame: &DecodedFrame) -> anyhow::Result<Vec<FaceObservation>>;
}

/// Port for acquiring landmark detectors at session start.
///
/// Each returned provider is owned by the session and released by dropping
/// it when the session ends.
pub trait LandmarkBackend {
    /// Initializes the hand detector.
    ///
    /// # Errors
    ///
    /// Returns an error if the detector cannot be initialized.
    fn open_hands(&self) -> anyhow::Result<Box<dyn HandLandmarkProvider>>;

    /// Initializes the face detector.
    ///
    /// # Errors
    ///
    /// Returns an error if the detector cannot be initialized.
    fn open_faces(&self) -> anyhow::Result<Box<dyn FaceLandmarkProvider>>;
}
