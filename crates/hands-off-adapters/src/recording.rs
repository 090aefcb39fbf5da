//! Recorded landmarks replayed in place of live inference.
//!
//! A recording is JSON Lines: one [`FrameObservations`] object per frame,
//! frame n on the n-th non-blank line.
//!
//! ```text
//! {"hands": [[{"x": 0.51, "y": 0.49}, ...21 points]], "faces": [[...478 points]]}
//! {"hands": [], "faces": [[...]]}
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use hands_off_core::{
    DecodedFrame, FaceLandmarkProvider, FaceObservation, FrameObservations, HandLandmarkProvider,
    HandObservation, LandmarkBackend,
};
use tracing::{debug, trace};

/// Per-frame landmark observations loaded from a JSON Lines file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LandmarkRecording {
    frames: Vec<FrameObservations>,
}

impl LandmarkRecording {
    /// Wraps already parsed frames.
    #[must_use]
    pub const fn new(frames: Vec<FrameObservations>) -> Self {
        Self { frames }
    }

    /// Reads a recording from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a line is not a valid
    /// frame.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open recording: {}", path.display()))?;
        let recording = Self::parse(BufReader::new(file))
            .with_context(|| format!("Invalid recording: {}", path.display()))?;
        debug!(
            "Loaded {} recorded frames from {}",
            recording.len(),
            path.display()
        );
        Ok(recording)
    }

    /// Parses JSON Lines, ignoring blank lines.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first line that fails to parse.
    pub fn parse(reader: impl BufRead) -> Result<Self> {
        let mut frames = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", index + 1))?;
            if line.trim().is_empty() {
                continue;
            }
            let frame: FrameObservations = serde_json::from_str(&line)
                .with_context(|| format!("Line {} is not a valid frame", index + 1))?;
            frames.push(frame);
        }
        Ok(Self { frames })
    }

    /// Number of recorded frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Observations for frame `sequence`, if recorded.
    #[must_use]
    pub fn get(&self, sequence: u64) -> Option<&FrameObservations> {
        usize::try_from(sequence)
            .ok()
            .and_then(|i| self.frames.get(i))
    }

    /// All recorded frames in order.
    #[must_use]
    pub fn frames(&self) -> &[FrameObservations] {
        &self.frames
    }
}

/// Reads a single frame's observations from a JSON document.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid frame.
pub fn load_frame(path: &Path) -> Result<FrameObservations> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read frame: {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid frame: {}", path.display()))
}

/// Landmark backend answering from a recording by frame sequence number.
///
/// Frames past the end of the recording have no observations.
#[derive(Debug, Clone)]
pub struct RecordedLandmarks {
    recording: Arc<LandmarkRecording>,
}

impl RecordedLandmarks {
    /// Creates a backend over `recording`.
    #[must_use]
    pub fn new(recording: LandmarkRecording) -> Self {
        Self {
            recording: Arc::new(recording),
        }
    }

    /// The underlying recording.
    #[must_use]
    pub fn recording(&self) -> &LandmarkRecording {
        &self.recording
    }
}

impl LandmarkBackend for RecordedLandmarks {
    fn open_hands(&self) -> Result<Box<dyn HandLandmarkProvider>> {
        Ok(Box::new(RecordedHands {
            recording: Arc::clone(&self.recording),
        }))
    }

    fn open_faces(&self) -> Result<Box<dyn FaceLandmarkProvider>> {
        Ok(Box::new(RecordedFaces {
            recording: Arc::clone(&self.recording),
        }))
    }
}

struct RecordedHands {
    recording: Arc<LandmarkRecording>,
}

impl HandLandmarkProvider for RecordedHands {
    fn detect_hands(&mut self, frame: &DecodedFrame) -> Result<Vec<HandObservation>> {
        let hands = self
            .recording
            .get(frame.sequence)
            .map(|f| f.hands.clone())
            .unwrap_or_default();
        trace!("Frame {}: {} recorded hand(s)", frame.sequence, hands.len());
        Ok(hands)
    }
}

struct RecordedFaces {
    recording: Arc<LandmarkRecording>,
}

impl FaceLandmarkProvider for RecordedFaces {
    fn detect_faces(&mut self, frame: &DecodedFrame) -> Result<Vec<FaceObservation>> {
        Ok(self
            .recording
            .get(frame.sequence)
            .map(|f| f.faces.clone())
            .unwrap_or_default())
    }
}
