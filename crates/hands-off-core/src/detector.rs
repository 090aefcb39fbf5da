//! Hand-to-mouth proximity detection.
//!
//! Compares the five fingertips of every detected hand against the mouth
//! center of the first detected face. Distances are measured in normalized
//! image coordinates, so the threshold does not adapt to face size.

use crate::domain::{FaceObservation, HandObservation};

/// Default fingertip-to-mouth distance, in normalized units, below which a
/// hand counts as touching the mouth.
pub const DEFAULT_THRESHOLD: f32 = 0.1;

/// Configuration for proximity detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityConfig {
    /// Strict upper bound on fingertip-to-mouth distance.
    pub threshold: f32,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Decides per frame whether any fingertip is near the mouth.
///
/// Stateless and `Sync`; one instance may be shared across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProximityDetector {
    config: ProximityConfig,
}

impl ProximityDetector {
    /// Creates a detector with the given configuration.
    #[must_use]
    pub const fn new(config: ProximityConfig) -> Self {
        Self { config }
    }

    /// The distance threshold in use.
    #[must_use]
    pub const fn threshold(&self) -> f32 {
        self.config.threshold
    }

    /// Returns true if any fingertip of any hand lies strictly closer than
    /// the threshold to the mouth center of `faces[0]`.
    ///
    /// No face or no hand means no touch. Scanning stops at the first
    /// qualifying fingertip.
    #[must_use]
    pub fn detect(&self, hands: &[HandObservation], faces: &[FaceObservation]) -> bool {
        let Some(face) = faces.first() else {
            return false;
        };
        let mouth = face.mouth_center();

        hands
            .iter()
            .flat_map(HandObservation::fingertips)
            .any(|(_, tip)| tip.distance_to(&mouth) < self.config.threshold)
    }
}

/// Runs [`ProximityDetector::detect`] with the default threshold.
#[must_use]
pub fn detect(hands: &[HandObservation], faces: &[FaceObservation]) -> bool {
    ProximityDetector::default().detect(hands, faces)
}
