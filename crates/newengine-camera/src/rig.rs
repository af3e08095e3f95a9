#![forbid(unsafe_op_in_unsafe_fn)]

use glam::{Mat3, Mat4, Quat, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::projection::Perspective;

/// Camera transform in world space.
///
/// The rig is purely spatial; the lens is handled separately by `Perspective`.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CameraRig {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl CameraRig {
    #[inline]
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// World->View matrix.
    #[inline]
    pub fn view_matrix(&self) -> Mat4 {
        // Inverse of T * R.
        Mat4::from_quat(self.rotation.conjugate()) * Mat4::from_translation(-self.position)
    }

    /// Turns the rig towards `target`, keeping its position.
    ///
    /// Convention: camera forward is -Z.
    #[inline]
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        self.rotation = look_at_rotation(self.position, target, up);
    }
}

#[inline]
fn look_at_rotation(position: Vec3, target: Vec3, up: Vec3) -> Quat {
    let f = (target - position).normalize_or_zero();
    if f.length_squared() < 1e-8 {
        return Quat::IDENTITY;
    }

    let z_axis = -f;
    let mut x_axis = up.cross(z_axis);
    if x_axis.length_squared() < 1e-8 {
        // Fallback if up is parallel to forward.
        x_axis = Vec3::Y.cross(z_axis);
        if x_axis.length_squared() < 1e-8 {
            x_axis = Vec3::X.cross(z_axis);
        }
    }
    x_axis = x_axis.normalize();
    let y_axis = z_axis.cross(x_axis).normalize();

    Quat::from_mat3(&Mat3::from_cols(x_axis, y_axis, z_axis))
}

/// Camera operations the fly controller drives.
///
/// Field of view crosses this boundary in degrees.
pub trait CameraHandle {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);

    fn fov_degrees(&self) -> f32;
    fn set_fov_degrees(&mut self, degrees: f32);

    /// Recomputes the view transform so the camera faces `target` with the given `up`.
    fn look_at(&mut self, target: Vec3, up: Vec3);
}

/// Rig plus perspective lens.
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PerspectiveCamera {
    pub rig: CameraRig,
    pub lens: Perspective,
}

impl PerspectiveCamera {
    #[inline]
    pub fn new(position: Vec3, lens: Perspective) -> Self {
        Self {
            rig: CameraRig::new(position, Quat::IDENTITY),
            lens,
        }
    }

    #[inline]
    pub fn view_projection(&self) -> Mat4 {
        self.lens.matrix_vk() * self.rig.view_matrix()
    }
}

impl CameraHandle for PerspectiveCamera {
    #[inline]
    fn position(&self) -> Vec3 {
        self.rig.position
    }

    #[inline]
    fn set_position(&mut self, position: Vec3) {
        self.rig.position = position;
    }

    #[inline]
    fn fov_degrees(&self) -> f32 {
        self.lens.fov_degrees()
    }

    #[inline]
    fn set_fov_degrees(&mut self, degrees: f32) {
        self.lens.set_fov_degrees(degrees);
    }

    #[inline]
    fn look_at(&mut self, target: Vec3, up: Vec3) {
        self.rig.look_at(target, up);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_at_points_forward_at_target() {
        let mut rig = CameraRig::new(Vec3::new(0.0, 0.0, 5.0), Quat::IDENTITY);
        rig.look_at(Vec3::new(5.0, 0.0, 5.0), Vec3::Y);
        assert!(rig.forward().abs_diff_eq(Vec3::X, 1e-5));
        assert!(rig.up().abs_diff_eq(Vec3::Y, 1e-5));
    }

    #[test]
    fn look_at_honours_rolled_up_vector() {
        let mut rig = CameraRig::default();
        rig.look_at(Vec3::NEG_Z, Vec3::X);
        assert!(rig.forward().abs_diff_eq(Vec3::NEG_Z, 1e-5));
        assert!(rig.up().abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn view_matrix_moves_camera_to_origin() {
        let rig = CameraRig::new(Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY);
        let p = rig.view_matrix().transform_point3(Vec3::new(1.0, 2.0, 3.0));
        assert!(p.abs_diff_eq(Vec3::ZERO, 1e-6));
    }

    #[test]
    fn camera_handle_reports_fov_in_degrees() {
        let mut cam = PerspectiveCamera::new(Vec3::ZERO, Perspective::default());
        cam.set_fov_degrees(45.0);
        assert!((cam.fov_degrees() - 45.0).abs() < 1e-4);
        assert!(cam.view_projection().is_finite());
    }
}
