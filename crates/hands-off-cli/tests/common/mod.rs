//! Shared helpers for CLI integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use hands_off_core::{Fingertip, FrameObservations};
use hands_off_test_support::{FaceBuilder, HandBuilder};

/// A frame with the index fingertip `distance` to the right of a centered mouth.
pub fn frame_with_tip_at(distance: f32) -> FrameObservations {
    FrameObservations {
        hands: vec![HandBuilder::away()
            .fingertip(Fingertip::Index, 0.5 + distance, 0.5)
            .build()],
        faces: vec![FaceBuilder::with_mouth_at(0.5, 0.5).build()],
    }
}

/// A frame with the hand touching the mouth.
pub fn near() -> FrameObservations {
    frame_with_tip_at(0.02)
}

/// A frame with the hand far from the mouth.
pub fn far() -> FrameObservations {
    frame_with_tip_at(0.4)
}

/// Writes `frames` as a JSON Lines recording.
pub fn write_recording(dir: &Path, frames: &[FrameObservations]) -> PathBuf {
    let path = dir.join("landmarks.jsonl");
    let text: Vec<String> = frames
        .iter()
        .map(|f| serde_json::to_string(f).unwrap())
        .collect();
    std::fs::write(&path, text.join("\n") + "\n").unwrap();
    path
}

/// Writes one frame as a JSON document.
pub fn write_frame(dir: &Path, frame: &FrameObservations) -> PathBuf {
    let path = dir.join("frame.json");
    std::fs::write(&path, serde_json::to_string(frame).unwrap()).unwrap();
    path
}

/// The binary, isolated from any user config and running in `cwd`.
#[allow(deprecated)]
pub fn hands_off(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("hands-off").unwrap();
    cmd.current_dir(cwd)
        .env("XDG_CONFIG_HOME", cwd.join("xdg"))
        .env_remove("RUST_LOG");
    cmd
}

/// Parses stdout as JSON Lines.
pub fn json_lines(stdout: &[u8]) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}
