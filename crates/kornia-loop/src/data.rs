//! Views over the keyframes and landmarks read during constraint construction.

use glam::{Vec2, Vec3A};

use crate::camera::Camera;

/// An undistorted keypoint and the pyramid octave it was detected at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyPoint {
    /// Undistorted pixel coordinates
    pub pt: Vec2,
    /// Pyramid level of the detection
    pub octave: usize,
}

impl KeyPoint {
    /// Create a keypoint at `(x, y)` detected at `octave`.
    pub fn new(x: f32, y: f32, octave: usize) -> Self {
        Self {
            pt: Vec2::new(x, y),
            octave,
        }
    }
}

/// A camera viewpoint (keyframe) with its undistorted features.
pub trait Shot {
    /// Camera model of the shot.
    fn camera(&self) -> &Camera;

    /// Undistorted keypoints, indexed by feature index.
    fn undist_keypoints(&self) -> &[KeyPoint];

    /// Inverse variance of the keypoint position, indexed by pyramid octave.
    fn inv_level_sigma_sq(&self) -> &[f32];
}

/// A triangulated 3D point.
pub trait Landmark {
    /// Current position in the world frame.
    fn pos_in_world(&self) -> Vec3A;
}

/// Compute the per-octave inverse variance of a scale pyramid.
///
/// The keypoint standard deviation at octave `n` is `scale_factor^n` pixels,
/// so the inverse variance is `1 / scale_factor^(2n)`.
///
/// # Arguments
///
/// * `scale_factor` - Downscale ratio between consecutive octaves.
/// * `num_levels` - Number of octaves in the pyramid.
pub fn inv_level_sigma_sq(scale_factor: f32, num_levels: usize) -> Vec<f32> {
    let scale_factor_sq = scale_factor * scale_factor;
    let mut out = Vec::with_capacity(num_levels);
    let mut sigma_sq = 1.0f32;
    for _ in 0..num_levels {
        out.push(1.0 / sigma_sq);
        sigma_sq *= scale_factor_sq;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_inv_level_sigma_sq() {
        let table = inv_level_sigma_sq(2.0, 3);
        assert_eq!(table, vec![1.0, 0.25, 0.0625]);
    }

    #[test]
    fn test_inv_level_sigma_sq_orb_defaults() {
        let table = inv_level_sigma_sq(1.2, 8);
        assert_eq!(table.len(), 8);
        assert_eq!(table[0], 1.0);
        assert_relative_eq!(table[7], 1.0 / 1.2f32.powi(14), epsilon = 1e-6);
        assert!(table.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_inv_level_sigma_sq_empty() {
        assert!(inv_level_sigma_sq(1.2, 0).is_empty());
    }
}
