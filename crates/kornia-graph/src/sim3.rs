//! Similarity transform Sim(3): uniform scale, rotation and translation in 3D.
//!
//! A point is mapped as `x' = s * R * x + t`. This is the quantity estimated
//! when closing a loop with a monocular camera, where the drift between the
//! two ends of the loop includes an unknown scale.

use glam::{Quat, Vec3A};

/// Similarity transformation in 3D.
///
/// 7 degrees of freedom: 3 for rotation, 3 for translation and 1 for scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sim3 {
    /// Rotation component (unit quaternion).
    pub rotation: Quat,
    /// Translation component.
    pub translation: Vec3A,
    /// Uniform scale, strictly positive.
    pub scale: f32,
}

impl Default for Sim3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Sim3 {
    /// Identity transformation
    pub const IDENTITY: Self = Self {
        rotation: Quat::IDENTITY,
        translation: Vec3A::ZERO,
        scale: 1.0,
    };

    /// Create from rotation, translation and scale.
    pub fn new(rotation: Quat, translation: Vec3A, scale: f32) -> Self {
        Self {
            rotation,
            translation,
            scale,
        }
    }

    /// Inverse transformation
    ///
    /// x = (1/s) * R^T * (x' - t)
    pub fn inverse(&self) -> Self {
        let rotation = self.rotation.inverse();
        let scale = 1.0 / self.scale;
        let translation = -scale * rotation.mul_vec3a(self.translation);
        Self {
            rotation,
            translation,
            scale,
        }
    }

    /// Apply the transformation to a 3D point.
    pub fn transform_point(&self, point: Vec3A) -> Vec3A {
        self.scale * self.rotation.mul_vec3a(point) + self.translation
    }
}

impl std::ops::Mul<Sim3> for Sim3 {
    type Output = Sim3;

    fn mul(self, rhs: Sim3) -> Self::Output {
        Sim3 {
            rotation: (self.rotation * rhs.rotation).normalize(),
            translation: self.transform_point(rhs.translation),
            scale: self.scale * rhs.scale,
        }
    }
}

impl std::ops::Mul<Vec3A> for Sim3 {
    type Output = Vec3A;

    fn mul(self, rhs: Vec3A) -> Self::Output {
        self.transform_point(rhs)
    }
}
