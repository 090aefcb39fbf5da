//! Normalized 2D keypoints produced by landmark providers.

use serde::{Deserialize, Serialize};

/// A detected anatomical keypoint in normalized image coordinates.
///
/// `x` and `y` are pixel positions divided by image width and height, so
/// both nominally lie in `[0, 1]`. Providers may report a depth `z`; the
/// proximity check ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal position, `0.0` = left edge.
    pub x: f32,
    /// Vertical position, `0.0` = top edge.
    pub y: f32,
    /// Optional relative depth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f32>,
}

impl Landmark {
    /// Creates a 2D landmark.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: None }
    }

    /// Creates a landmark carrying a depth value.
    #[must_use]
    pub const fn with_z(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// Euclidean distance to `other` in the image plane.
    ///
    /// Computed in normalized units; depth is ignored.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Point halfway between `self` and `other` in the image plane.
    #[must_use]
    pub fn midpoint(&self, other: &Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_exact_on_axis() {
        let a = Landmark::new(0.0, 0.0);
        let b = Landmark::new(0.0, 0.1);
        assert_eq!(a.distance_to(&b), 0.1);
    }

    #[test]
    fn test_distance_is_plain_square_root() {
        // Near the 0.1 radius, where hypot rounds differently.
        let mouth = Landmark::new(0.5, 0.5);
        let tip = Landmark::new(0.577_552_2, 0.563_132_05);
        let dx = tip.x - mouth.x;
        let dy = tip.y - mouth.y;
        assert_eq!(tip.distance_to(&mouth), (dx * dx + dy * dy).sqrt());
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Landmark::new(0.12, 0.87);
        let b = Landmark::new(0.64, 0.33);
        assert_eq!(a.distance_to(&b), b.distance_to(&a));
    }

    #[test]
    fn test_distance_ignores_depth() {
        let a = Landmark::with_z(0.5, 0.5, -0.4);
        let b = Landmark::with_z(0.5, 0.5, 0.9);
        assert_eq!(a.distance_to(&b), 0.0);
    }

    #[test]
    fn test_midpoint() {
        let upper = Landmark::new(0.4, 0.5);
        let lower = Landmark::new(0.6, 0.7);
        let mid = upper.midpoint(&lower);
        assert!((mid.x - 0.5).abs() < 1e-6);
        assert!((mid.y - 0.6).abs() < 1e-6);
        assert!(mid.z.is_none());
    }

    #[test]
    fn test_deserialize_without_depth() {
        let lm: Landmark = serde_json::from_str(r#"{"x":0.25,"y":0.75}"#).unwrap_or_else(|e| {
            panic!("parse landmark: {e}");
        });
        assert_eq!(lm, Landmark::new(0.25, 0.75));
    }
}
