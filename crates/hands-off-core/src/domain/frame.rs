//! Raw camera frames and their decoded, upright counterparts.

use std::fmt;

use image::RgbImage;
use serde::{Deserialize, Serialize};

/// Pixel encoding of a raw camera frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelFormat {
    /// Y plane followed by interleaved V/U samples at quarter resolution.
    Nv21,
    /// Y plane, then U plane, then V plane, chroma at quarter resolution.
    I420,
    /// Packed RGB, 3 bytes per pixel.
    Rgb8,
    /// Packed RGBA, 4 bytes per pixel.
    Rgba8,
}

impl PixelFormat {
    /// Buffer length required for a `width` x `height` frame.
    ///
    /// Chroma planes round odd dimensions up.
    #[must_use]
    pub const fn buffer_len(self, width: u32, height: u32) -> usize {
        let luma = width as usize * height as usize;
        let chroma = (width as usize).div_ceil(2) * (height as usize).div_ceil(2);
        match self {
            Self::Nv21 | Self::I420 => luma + 2 * chroma,
            Self::Rgb8 => luma * 3,
            Self::Rgba8 => luma * 4,
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Nv21 => "nv21",
            Self::I420 => "i420",
            Self::Rgb8 => "rgb8",
            Self::Rgba8 => "rgba8",
        };
        f.write_str(name)
    }
}

/// Clockwise rotation that brings a frame to device-physical "up".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    /// Already upright.
    #[default]
    Deg0,
    /// Rotate a quarter turn clockwise.
    Deg90,
    /// Rotate a half turn.
    Deg180,
    /// Rotate three quarter turns clockwise.
    Deg270,
}

impl Rotation {
    /// Parses a rotation hint given in degrees.
    ///
    /// Returns `None` for anything other than 0, 90, 180 or 270.
    #[must_use]
    pub const fn from_degrees(degrees: u32) -> Option<Self> {
        match degrees {
            0 => Some(Self::Deg0),
            90 => Some(Self::Deg90),
            180 => Some(Self::Deg180),
            270 => Some(Self::Deg270),
            _ => None,
        }
    }

    /// The rotation in degrees.
    #[must_use]
    pub const fn degrees(self) -> u32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }
}

/// A frame as delivered by the camera, before any decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    /// Monotonic frame counter assigned by the source.
    pub sequence: u64,
    /// Width in pixels, before rotation.
    pub width: u32,
    /// Height in pixels, before rotation.
    pub height: u32,
    /// Pixel encoding of `data`.
    pub format: PixelFormat,
    /// Rotation hint reported by the camera.
    pub rotation: Rotation,
    /// Pixel data.
    pub data: Vec<u8>,
}

impl RawFrame {
    /// Creates an upright raw frame.
    #[must_use]
    pub const fn new(
        sequence: u64,
        width: u32,
        height: u32,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Self {
        Self {
            sequence,
            width,
            height,
            format,
            rotation: Rotation::Deg0,
            data,
        }
    }

    /// Sets the rotation hint.
    #[must_use]
    pub const fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }
}

/// A decoded frame in standard RGB with "up" matching device-physical up.
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    /// Sequence number of the raw frame this came from.
    pub sequence: u64,
    /// Upright RGB pixels.
    pub image: RgbImage,
}

impl DecodedFrame {
    /// Wraps an upright image.
    #[must_use]
    pub const fn new(sequence: u64, image: RgbImage) -> Self {
        Self { sequence, image }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }
}
