//! Hand and face observations for a single frame.

use serde::{Deserialize, Serialize};

use super::Landmark;
use crate::error::ObservationError;

/// Number of landmarks in a hand observation.
pub const HAND_LANDMARK_COUNT: usize = 21;

/// Face landmark index of the upper lip center.
pub const UPPER_LIP_CENTER: usize = 13;

/// Face landmark index of the lower lip center.
pub const LOWER_LIP_CENTER: usize = 14;

/// The five fingertips of the 21-point hand layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fingertip {
    /// Landmark 4.
    Thumb,
    /// Landmark 8.
    Index,
    /// Landmark 12.
    Middle,
    /// Landmark 16.
    Ring,
    /// Landmark 20.
    Pinky,
}

impl Fingertip {
    /// All fingertips, thumb first.
    pub const ALL: [Self; 5] = [Self::Thumb, Self::Index, Self::Middle, Self::Ring, Self::Pinky];

    /// Index of this fingertip within a hand observation.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Thumb => 4,
            Self::Index => 8,
            Self::Middle => 12,
            Self::Ring => 16,
            Self::Pinky => 20,
        }
    }
}

/// One detected hand: exactly 21 landmarks in the fixed anatomical order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Landmark>", into = "Vec<Landmark>")]
pub struct HandObservation {
    landmarks: [Landmark; HAND_LANDMARK_COUNT],
}

impl HandObservation {
    /// Wraps a complete set of hand landmarks.
    #[must_use]
    pub const fn from_array(landmarks: [Landmark; HAND_LANDMARK_COUNT]) -> Self {
        Self { landmarks }
    }

    /// Builds a hand observation from a provider's landmark list.
    ///
    /// # Errors
    ///
    /// Returns [`ObservationError::WrongLandmarkCount`] unless exactly 21
    /// landmarks are given.
    pub fn new(landmarks: Vec<Landmark>) -> Result<Self, ObservationError> {
        let actual = landmarks.len();
        let landmarks = <[Landmark; HAND_LANDMARK_COUNT]>::try_from(landmarks).map_err(|_| {
            ObservationError::WrongLandmarkCount {
                expected: HAND_LANDMARK_COUNT,
                actual,
            }
        })?;
        Ok(Self { landmarks })
    }

    /// All 21 landmarks.
    #[must_use]
    pub const fn landmarks(&self) -> &[Landmark; HAND_LANDMARK_COUNT] {
        &self.landmarks
    }

    /// The landmark of a single fingertip.
    #[must_use]
    pub const fn fingertip(&self, tip: Fingertip) -> Landmark {
        self.landmarks[tip.index()]
    }

    /// Iterates over the five fingertips.
    pub fn fingertips(&self) -> impl Iterator<Item = (Fingertip, Landmark)> + '_ {
        Fingertip::ALL.into_iter().map(|tip| (tip, self.fingertip(tip)))
    }
}

impl TryFrom<Vec<Landmark>> for HandObservation {
    type Error = ObservationError;

    fn try_from(landmarks: Vec<Landmark>) -> Result<Self, Self::Error> {
        Self::new(landmarks)
    }
}

impl From<HandObservation> for Vec<Landmark> {
    fn from(hand: HandObservation) -> Self {
        hand.landmarks.to_vec()
    }
}

/// One detected face mesh.
///
/// Only the lip-center landmarks are consulted, so any mesh reaching index
/// 14 is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Landmark>", into = "Vec<Landmark>")]
pub struct FaceObservation {
    landmarks: Vec<Landmark>,
}

impl FaceObservation {
    /// Minimum landmark count for a usable face observation.
    pub const MIN_LANDMARKS: usize = LOWER_LIP_CENTER + 1;

    /// Builds a face observation from a provider's landmark list.
    ///
    /// # Errors
    ///
    /// Returns [`ObservationError::MissingLipLandmarks`] when the list is too
    /// short to contain both lip centers.
    pub fn new(landmarks: Vec<Landmark>) -> Result<Self, ObservationError> {
        if landmarks.len() < Self::MIN_LANDMARKS {
            return Err(ObservationError::MissingLipLandmarks {
                required: Self::MIN_LANDMARKS,
                actual: landmarks.len(),
            });
        }
        Ok(Self { landmarks })
    }

    /// All landmarks of the mesh.
    #[must_use]
    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    /// Upper lip center (landmark 13).
    #[must_use]
    pub fn upper_lip(&self) -> Landmark {
        self.landmarks[UPPER_LIP_CENTER]
    }

    /// Lower lip center (landmark 14).
    #[must_use]
    pub fn lower_lip(&self) -> Landmark {
        self.landmarks[LOWER_LIP_CENTER]
    }

    /// Midpoint of the two lip centers.
    #[must_use]
    pub fn mouth_center(&self) -> Landmark {
        self.upper_lip().midpoint(&self.lower_lip())
    }
}

impl TryFrom<Vec<Landmark>> for FaceObservation {
    type Error = ObservationError;

    fn try_from(landmarks: Vec<Landmark>) -> Result<Self, Self::Error> {
        Self::new(landmarks)
    }
}

impl From<FaceObservation> for Vec<Landmark> {
    fn from(face: FaceObservation) -> Self {
        face.landmarks
    }
}

/// Both providers' output for one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameObservations {
    /// Detected hands, in no particular order.
    pub hands: Vec<HandObservation>,
    /// Detected faces; only the first is used.
    pub faces: Vec<FaceObservation>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn points(n: usize) -> Vec<Landmark> {
        (0..n)
            .map(|i| Landmark::new(i as f32 / 100.0, 0.5))
            .collect()
    }

    #[test]
    fn test_hand_requires_21_landmarks() {
        assert!(HandObservation::new(points(21)).is_ok());
        assert_eq!(
            HandObservation::new(points(20)),
            Err(ObservationError::WrongLandmarkCount {
                expected: 21,
                actual: 20
            })
        );
        assert!(HandObservation::new(points(22)).is_err());
    }

    #[test]
    fn test_fingertip_indices() {
        let hand = HandObservation::new(points(21)).unwrap();
        let indices: Vec<usize> = hand.fingertips().map(|(tip, _)| tip.index()).collect();
        assert_eq!(indices, vec![4, 8, 12, 16, 20]);
        assert_eq!(hand.fingertip(Fingertip::Pinky), hand.landmarks()[20]);
    }

    #[test]
    fn test_face_requires_lip_landmarks() {
        assert!(FaceObservation::new(points(15)).is_ok());
        assert_eq!(
            FaceObservation::new(points(14)),
            Err(ObservationError::MissingLipLandmarks {
                required: 15,
                actual: 14
            })
        );
    }

    #[test]
    fn test_mouth_center_is_lip_midpoint() {
        let mut landmarks = points(478);
        landmarks[13] = Landmark::new(0.40, 0.50);
        landmarks[14] = Landmark::new(0.40, 0.60);
        let face = FaceObservation::new(landmarks).unwrap();
        let center = face.mouth_center();
        assert!((center.x - 0.40).abs() < 1e-6);
        assert!((center.y - 0.55).abs() < 1e-6);
    }

    #[test]
    fn test_frame_observations_from_json() {
        let hand: Vec<String> = (0..21).map(|_| r#"{"x":0.1,"y":0.2}"#.to_string()).collect();
        let json = format!(r#"{{"hands":[[{}]]}}"#, hand.join(","));
        let frame: FrameObservations = serde_json::from_str(&json).unwrap();
        assert_eq!(frame.hands.len(), 1);
        assert!(frame.faces.is_empty());
    }

    #[test]
    fn test_short_hand_rejected_by_serde() {
        let json = r#"{"hands":[[{"x":0.1,"y":0.2}]]}"#;
        let err = serde_json::from_str::<FrameObservations>(json).unwrap_err();
        assert!(err.to_string().contains("21 landmarks"));
    }
}
