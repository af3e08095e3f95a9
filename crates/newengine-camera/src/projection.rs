#![forbid(unsafe_op_in_unsafe_fn)]

use glam::Mat4;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Perspective lens.
///
/// Engine baseline:
/// - Right-handed.
/// - Vulkan clip Z: 0..1.
/// - Y flip baked into the matrix.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Perspective {
    /// Vertical FOV in radians.
    pub fovy: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Perspective {
    fn default() -> Self {
        Self::new(60f32.to_radians(), 16.0 / 9.0, 0.1, 1000.0)
    }
}

impl Perspective {
    #[inline]
    pub fn new(fovy: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fovy,
            aspect: aspect.max(1e-6),
            near: near.max(1e-6),
            far: far.max(near + 1e-3),
        }
    }

    #[inline]
    pub fn fov_degrees(&self) -> f32 {
        self.fovy.to_degrees()
    }

    #[inline]
    pub fn set_fov_degrees(&mut self, degrees: f32) {
        self.fovy = degrees.to_radians();
    }

    #[inline]
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        let w = width.max(1) as f32;
        let h = height.max(1) as f32;
        self.aspect = w / h;
    }

    /// RH perspective, Vulkan Z: 0..1, Y flipped.
    #[inline]
    pub fn matrix_vk(&self) -> Mat4 {
        let f = 1.0 / (0.5 * self.fovy).tan();
        let aspect = self.aspect.max(1e-6);
        let near = self.near.max(1e-6);
        let far = self.far.max(near + 1e-3);
        let nf = 1.0 / (near - far);

        Mat4::from_cols_array(&[
            f / aspect, 0.0, 0.0, 0.0,
            0.0, -f, 0.0, 0.0,
            0.0, 0.0, far * nf, -1.0,
            0.0, 0.0, far * near * nf, 0.0,
        ])
    }
}
