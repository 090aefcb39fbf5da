//! Hands Off Adapters - External adapters for hands-off.
//!
//! This crate provides adapters for:
//! - Raw frame decoding (NV21, I420, packed RGB)
//! - Frame sources (image directory, blank frames)
//! - Recorded landmarks standing in for live inference
//! - Alert sounds

pub mod audio;
pub mod blank;
pub mod fs;
pub mod pacing;
pub mod preprocess;
pub mod recording;

pub use audio::{SilentAlert, TerminalBell};
pub use blank::BlankFrameSource;
pub use fs::FsFrameSource;
pub use pacing::FramePacer;
pub use preprocess::YuvPreprocessor;
pub use recording::{load_frame, LandmarkRecording, RecordedLandmarks};
