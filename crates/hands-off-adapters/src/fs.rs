//! Filesystem adapter replaying a directory of captured frames.

use anyhow::{Context, Result};
use hands_off_core::{FrameSource, PixelFormat, RawFrame, Rotation};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::pacing::FramePacer;

/// Supported image extensions.
const FRAME_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "webp"];

/// Frame source reading image files in file-name order.
///
/// The n-th file becomes frame n, so frames line up with a landmark
/// recording captured alongside them. Unreadable files are skipped without
/// renumbering the rest.
pub struct FsFrameSource {
    files: Vec<PathBuf>,
    next: usize,
    rotation: Rotation,
    pacer: FramePacer,
}

impl FsFrameSource {
    /// Scans `dir` for frame images.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    pub fn open(dir: &Path) -> Result<Self> {
        let files = collect_frames(dir)?;
        debug!("Found {} frame files in {}", files.len(), dir.display());
        Ok(Self::from_files(files))
    }

    /// Replays exactly these files, in this order.
    #[must_use]
    pub const fn from_files(files: Vec<PathBuf>) -> Self {
        Self {
            files,
            next: 0,
            rotation: Rotation::Deg0,
            pacer: FramePacer::unpaced(),
        }
    }

    /// Tags every frame with the sensor rotation hint.
    #[must_use]
    pub const fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Paces frames like a camera running at the pacer's rate.
    #[must_use]
    pub fn with_pacer(mut self, pacer: FramePacer) -> Self {
        self.pacer = pacer;
        self
    }

    /// Number of frames this source will attempt to yield.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if there are no frames at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FrameSource for FsFrameSource {
    fn next_frame(&mut self) -> Result<Option<RawFrame>> {
        while let Some(path) = self.files.get(self.next) {
            let sequence = self.next as u64;
            self.next += 1;

            match load_frame(path, sequence) {
                Ok(frame) => {
                    self.pacer.wait();
                    return Ok(Some(frame.with_rotation(self.rotation)));
                }
                Err(e) => warn!("Skipping frame {sequence}: {e:#}"),
            }
        }
        Ok(None)
    }
}

fn collect_frames(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read frame directory: {}", dir.display()))?;

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_supported_frame(path))
        .collect();
    files.sort();
    Ok(files)
}

/// Checks if a path has a supported image extension.
fn is_supported_frame(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|e| FRAME_EXTENSIONS.contains(&e.as_str()))
}

/// Loads an image file as a packed RGB frame.
fn load_frame(path: &Path, sequence: u64) -> Result<RawFrame> {
    let image = image::open(path)
        .with_context(|| format!("Failed to open frame: {}", path.display()))?
        .into_rgb8();
    let (width, height) = image.dimensions();

    Ok(RawFrame::new(
        sequence,
        width,
        height,
        PixelFormat::Rgb8,
        image.into_raw(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_supported_frame() {
        assert!(is_supported_frame(Path::new("frame_0001.jpg")));
        assert!(is_supported_frame(Path::new("frame_0001.PNG")));
        assert!(is_supported_frame(Path::new("frame.webp")));
        assert!(!is_supported_frame(Path::new("landmarks.jsonl")));
        assert!(!is_supported_frame(Path::new("frame")));
    }
}
