//! Synthetic observation and frame builders for testing.

use hands_off_core::domain::{
    FaceObservation, Fingertip, HandObservation, Landmark, PixelFormat, RawFrame,
    HAND_LANDMARK_COUNT, LOWER_LIP_CENTER, UPPER_LIP_CENTER,
};
use image::RgbImage;

/// Where [`HandBuilder::away`] parks every landmark.
const AWAY: Landmark = Landmark::new(0.95, 0.95);

/// Builder for 21-point hand observations.
///
/// Start from a resting position and move individual landmarks.
#[derive(Debug, Clone)]
pub struct HandBuilder {
    landmarks: [Landmark; HAND_LANDMARK_COUNT],
}

impl HandBuilder {
    /// All 21 landmarks at `(x, y)`.
    #[must_use]
    pub const fn resting_at(x: f32, y: f32) -> Self {
        Self {
            landmarks: [Landmark::new(x, y); HAND_LANDMARK_COUNT],
        }
    }

    /// All landmarks in the bottom-right corner, far from a centered face.
    #[must_use]
    pub const fn away() -> Self {
        Self {
            landmarks: [AWAY; HAND_LANDMARK_COUNT],
        }
    }

    /// Five fingertips spread evenly on a circle of `radius` around
    /// `(cx, cy)`; every other landmark stays away.
    #[must_use]
    pub fn fingertips_around(cx: f32, cy: f32, radius: f32) -> Self {
        let mut builder = Self::away();
        for (i, tip) in Fingertip::ALL.into_iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let angle = std::f32::consts::TAU * i as f32 / 5.0;
            builder = builder.fingertip(
                tip,
                radius.mul_add(angle.cos(), cx),
                radius.mul_add(angle.sin(), cy),
            );
        }
        builder
    }

    /// Moves one fingertip.
    #[must_use]
    pub fn fingertip(self, tip: Fingertip, x: f32, y: f32) -> Self {
        self.landmark(tip.index(), x, y)
    }

    /// Moves every fingertip to the same point.
    #[must_use]
    pub fn all_fingertips(mut self, x: f32, y: f32) -> Self {
        for tip in Fingertip::ALL {
            self = self.fingertip(tip, x, y);
        }
        self
    }

    /// Moves an arbitrary landmark.
    #[must_use]
    pub fn landmark(mut self, index: usize, x: f32, y: f32) -> Self {
        self.landmarks[index] = Landmark::new(x, y);
        self
    }

    /// Finishes the observation.
    #[must_use]
    pub const fn build(self) -> HandObservation {
        HandObservation::from_array(self.landmarks)
    }
}

/// Builder for face meshes.
///
/// Produces a full 478-point mesh with both lip centers placed explicitly
/// and every other landmark on the forehead.
#[derive(Debug, Clone)]
pub struct FaceBuilder {
    landmarks: Vec<Landmark>,
}

impl FaceBuilder {
    /// Landmark count of a full face mesh.
    pub const MESH_SIZE: usize = 478;

    /// Both lip centers at `(x, y)`, so the mouth center is exactly there.
    #[must_use]
    pub fn with_mouth_at(x: f32, y: f32) -> Self {
        Self {
            landmarks: vec![Landmark::new(0.5, 0.1); Self::MESH_SIZE],
        }
        .lips((x, y), (x, y))
    }

    /// Places the upper and lower lip centers separately.
    #[must_use]
    pub fn lips(mut self, upper: (f32, f32), lower: (f32, f32)) -> Self {
        self.landmarks[UPPER_LIP_CENTER] = Landmark::new(upper.0, upper.1);
        self.landmarks[LOWER_LIP_CENTER] = Landmark::new(lower.0, lower.1);
        self
    }

    /// Cuts the mesh down to the first `len` landmarks.
    ///
    /// Values below 15 make [`build`](Self::build) panic.
    #[must_use]
    pub fn truncated(mut self, len: usize) -> Self {
        self.landmarks.truncate(len);
        self
    }

    /// Finishes the observation.
    ///
    /// # Panics
    ///
    /// Panics if the mesh was truncated below the lip landmarks.
    #[must_use]
    pub fn build(self) -> FaceObservation {
        match FaceObservation::new(self.landmarks) {
            Ok(face) => face,
            Err(e) => panic!("invalid synthetic face: {e}"),
        }
    }
}

/// Builder for raw camera frames.
pub struct FrameBuilder;

impl FrameBuilder {
    /// A 2x2 black RGB frame.
    #[must_use]
    pub fn blank(sequence: u64) -> RawFrame {
        Self::rgb_solid(sequence, 2, 2, [0, 0, 0])
    }

    /// A solid-color RGB frame.
    #[must_use]
    pub fn rgb_solid(sequence: u64, width: u32, height: u32, rgb: [u8; 3]) -> RawFrame {
        let data = rgb
            .iter()
            .copied()
            .cycle()
            .take(PixelFormat::Rgb8.buffer_len(width, height))
            .collect();
        RawFrame::new(sequence, width, height, PixelFormat::Rgb8, data)
    }

    /// A frame carrying the pixels of `image`.
    #[must_use]
    pub fn from_rgb(sequence: u64, image: &RgbImage) -> RawFrame {
        RawFrame::new(
            sequence,
            image.width(),
            image.height(),
            PixelFormat::Rgb8,
            image.as_raw().clone(),
        )
    }

    /// A uniform NV21 frame with the given luma and chroma samples.
    #[must_use]
    pub fn nv21_uniform(sequence: u64, width: u32, height: u32, y: u8, u: u8, v: u8) -> RawFrame {
        let luma = width as usize * height as usize;
        let len = PixelFormat::Nv21.buffer_len(width, height);
        let mut data = vec![y; luma];
        data.extend([v, u].iter().copied().cycle().take(len - luma));
        RawFrame::new(sequence, width, height, PixelFormat::Nv21, data)
    }

    /// A uniform I420 frame with the given luma and chroma samples.
    #[must_use]
    pub fn i420_uniform(sequence: u64, width: u32, height: u32, y: u8, u: u8, v: u8) -> RawFrame {
        let luma = width as usize * height as usize;
        let chroma = (PixelFormat::I420.buffer_len(width, height) - luma) / 2;
        let mut data = vec![y; luma];
        data.extend(std::iter::repeat(u).take(chroma));
        data.extend(std::iter::repeat(v).take(chroma));
        RawFrame::new(sequence, width, height, PixelFormat::I420, data)
    }

    /// An NV21 frame whose buffer is too short to decode.
    #[must_use]
    pub fn truncated(sequence: u64) -> RawFrame {
        RawFrame::new(sequence, 4, 4, PixelFormat::Nv21, vec![0; 5])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingertips_around_distance() {
        let hand = HandBuilder::fingertips_around(0.5, 0.5, 0.2).build();
        let center = Landmark::new(0.5, 0.5);
        for (_, tip) in hand.fingertips() {
            assert!((tip.distance_to(&center) - 0.2).abs() < 1e-5);
        }
    }

    #[test]
    fn test_face_mouth_center_exact() {
        let face = FaceBuilder::with_mouth_at(0.3, 0.6).build();
        assert_eq!(face.mouth_center(), Landmark::new(0.3, 0.6));
        assert_eq!(face.landmarks().len(), FaceBuilder::MESH_SIZE);
    }

    #[test]
    fn test_frame_buffers_match_format() {
        for frame in [
            FrameBuilder::blank(0),
            FrameBuilder::rgb_solid(1, 3, 5, [1, 2, 3]),
            FrameBuilder::nv21_uniform(2, 5, 3, 16, 128, 128),
            FrameBuilder::i420_uniform(3, 4, 4, 16, 128, 128),
        ] {
            assert_eq!(
                frame.data.len(),
                frame.format.buffer_len(frame.width, frame.height)
            );
        }
    }
}
