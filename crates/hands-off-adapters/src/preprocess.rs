//! Raw camera frame decoding: YUV or packed RGB to an upright RGB image.

use hands_off_core::{
    DecodedFrame, FramePreprocessor, PixelFormat, PreprocessError, RawFrame, Rotation,
};
use image::{imageops, Rgb, RgbImage};
use tracing::trace;

/// Decodes NV21, I420, RGB8 and RGBA8 frames and applies the rotation hint.
///
/// YUV input is treated as full-range BT.601 (JFIF), which is what camera
/// preview streams deliver.
#[derive(Debug, Clone, Copy, Default)]
pub struct YuvPreprocessor;

impl YuvPreprocessor {
    /// Creates a preprocessor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl FramePreprocessor for YuvPreprocessor {
    fn decode(&self, frame: &RawFrame) -> Result<DecodedFrame, PreprocessError> {
        validate(frame)?;

        let (w, h) = (frame.width, frame.height);
        let upright = match frame.format {
            PixelFormat::Nv21 => yuv_to_rgb(w, h, &frame.data, ChromaLayout::InterleavedVu),
            PixelFormat::I420 => yuv_to_rgb(w, h, &frame.data, ChromaLayout::Planar),
            PixelFormat::Rgb8 => packed_to_rgb(w, h, &frame.data, 3),
            PixelFormat::Rgba8 => packed_to_rgb(w, h, &frame.data, 4),
        };
        let image = rotate(upright, frame.rotation);

        trace!(
            "Decoded {} frame {} ({}x{} -> {}x{})",
            frame.format,
            frame.sequence,
            w,
            h,
            image.width(),
            image.height()
        );
        Ok(DecodedFrame::new(frame.sequence, image))
    }
}

fn validate(frame: &RawFrame) -> Result<(), PreprocessError> {
    if frame.width == 0 || frame.height == 0 {
        return Err(PreprocessError::ZeroDimensions {
            sequence: frame.sequence,
            width: frame.width,
            height: frame.height,
        });
    }
    let expected = frame.format.buffer_len(frame.width, frame.height);
    if frame.data.len() != expected {
        return Err(PreprocessError::BufferSizeMismatch {
            sequence: frame.sequence,
            format: frame.format,
            expected,
            actual: frame.data.len(),
        });
    }
    Ok(())
}

#[derive(Clone, Copy)]
enum ChromaLayout {
    /// V and U samples alternate in a single plane (NV21).
    InterleavedVu,
    /// A full U plane followed by a full V plane (I420).
    Planar,
}

fn yuv_to_rgb(width: u32, height: u32, data: &[u8], layout: ChromaLayout) -> RgbImage {
    let w = width as usize;
    let luma_len = w * height as usize;
    let chroma_w = w.div_ceil(2);
    let chroma_len = chroma_w * (height as usize).div_ceil(2);
    let (luma, chroma) = data.split_at(luma_len);

    RgbImage::from_fn(width, height, |x, y| {
        let (x, y) = (x as usize, y as usize);
        let c = (y / 2) * chroma_w + x / 2;
        let (u, v) = match layout {
            ChromaLayout::InterleavedVu => (chroma[2 * c + 1], chroma[2 * c]),
            ChromaLayout::Planar => (chroma[c], chroma[chroma_len + c]),
        };
        Rgb(ycbcr_to_rgb(luma[y * w + x], u, v))
    })
}

/// Full-range BT.601 conversion.
fn ycbcr_to_rgb(y: u8, u: u8, v: u8) -> [u8; 3] {
    let y = f32::from(y);
    let u = f32::from(u) - 128.0;
    let v = f32::from(v) - 128.0;

    let r = 1.402f32.mul_add(v, y);
    let g = 0.714_136f32.mul_add(-v, 0.344_136f32.mul_add(-u, y));
    let b = 1.772f32.mul_add(u, y);
    [clamp(r), clamp(g), clamp(b)]
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

fn packed_to_rgb(width: u32, height: u32, data: &[u8], channels: usize) -> RgbImage {
    let rgb = data
        .chunks_exact(channels)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();
    // Buffer length was validated against the dimensions.
    RgbImage::from_raw(width, height, rgb).unwrap_or_else(|| RgbImage::new(width, height))
}

fn rotate(image: RgbImage, rotation: Rotation) -> RgbImage {
    match rotation {
        Rotation::Deg0 => image,
        Rotation::Deg90 => imageops::rotate90(&image),
        Rotation::Deg180 => imageops::rotate180(&image),
        Rotation::Deg270 => imageops::rotate270(&image),
    }
}
