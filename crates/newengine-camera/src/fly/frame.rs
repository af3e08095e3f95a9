use glam::{Quat, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::constraint::{constraint_ok, Constraints};
use super::movement::FrameOp;

/// Which vector vertical translation and yaw read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UpMode {
    /// Scene up; FPS-style, the horizon stays level under yaw.
    World,
    /// Camera's own up; flight-sim style.
    #[default]
    Camera,
}

/// Accumulated rotation since the last re-orientation, in radians.
///
/// Only used for constraint checks; the frame itself is updated incrementally.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rotation {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

/// Kinematic state of the fly camera: position plus orthonormal forward/up basis.
///
/// Right-handed: right is `forward × up`, a default camera looks down -Z with +Y up.
///
/// `forward` and `up` stay unit length and perpendicular after every operation.
/// Inputs that make `forward` parallel to the reference up (or `target == position`)
/// produce a non-finite frame; keep world-up pitch constraints strictly inside ±90°.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlyFrame {
    position: Vec3,
    forward: Vec3,
    up: Vec3,
    world_up: Vec3,
    rotation: Rotation,
    mode: UpMode,
}

impl FlyFrame {
    pub fn new(position: Vec3, target: Vec3, world_up: Vec3, mode: UpMode) -> Self {
        let mut frame = Self {
            position,
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
            world_up,
            rotation: Rotation::default(),
            mode,
        };
        frame.reorient(target, world_up);
        frame
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.up
    }

    #[inline]
    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    #[inline]
    pub fn right(&self) -> Vec3 {
        self.forward.cross(self.up).normalize()
    }

    #[inline]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[inline]
    pub fn mode(&self) -> UpMode {
        self.mode
    }

    /// Point one unit ahead of the camera; what the camera should look at.
    #[inline]
    pub fn look_target(&self) -> Vec3 {
        self.position + self.forward
    }

    #[inline]
    fn vertical_axis(&self) -> Vec3 {
        match self.mode {
            UpMode::World => self.world_up,
            UpMode::Camera => self.up,
        }
    }

    #[inline]
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Rebuilds the basis facing `target` from the current position and zeroes the accumulated rotation.
    pub fn reorient(&mut self, target: Vec3, world_up: Vec3) {
        self.rotation = Rotation::default();
        self.world_up = world_up;
        self.forward = (target - self.position).normalize();
        let right = self.forward.cross(world_up).normalize();
        self.up = right.cross(self.forward).normalize();
    }

    /// Switches the up reference and re-derives the basis along the current view direction.
    pub fn set_mode(&mut self, mode: UpMode) {
        self.mode = mode;
        let target = self.look_target();
        self.reorient(target, self.world_up);
    }

    #[inline]
    pub fn translate_forward(&mut self, delta: f32) {
        self.position += self.forward * delta;
    }

    #[inline]
    pub fn translate_right(&mut self, delta: f32) {
        self.position += self.right() * delta;
    }

    #[inline]
    pub fn translate_up(&mut self, delta: f32) {
        self.position += self.vertical_axis() * delta;
    }

    /// Positive delta turns right. Returns false if the constraint rejected it.
    pub fn yaw(&mut self, delta: f32, constraints: &Constraints) -> bool {
        let yaw = self.rotation.yaw + delta;
        if !Self::accepts(constraints, FrameOp::Yaw, yaw) {
            return false;
        }
        self.rotation.yaw = yaw;
        // Positive rotation about up turns a right-handed camera left.
        self.rotate(self.vertical_axis(), -delta);
        true
    }

    /// Positive delta tilts the view up.
    pub fn pitch(&mut self, delta: f32, constraints: &Constraints) -> bool {
        let pitch = self.rotation.pitch + delta;
        if !Self::accepts(constraints, FrameOp::Pitch, pitch) {
            return false;
        }
        self.rotation.pitch = pitch;
        self.rotate(self.right(), delta);
        true
    }

    /// Positive delta banks to the right.
    pub fn roll(&mut self, delta: f32, constraints: &Constraints) -> bool {
        let roll = self.rotation.roll + delta;
        if !Self::accepts(constraints, FrameOp::Roll, roll) {
            return false;
        }
        self.rotation.roll = roll;
        self.rotate(self.forward, delta);
        true
    }

    #[inline]
    fn accepts(constraints: &Constraints, op: FrameOp, value: f32) -> bool {
        match op.bounds() {
            Some((low, high)) => constraint_ok(constraints, value, low, high),
            None => true,
        }
    }

    /// Rotates forward and up together, then re-orthonormalizes.
    fn rotate(&mut self, axis: Vec3, angle: f32) {
        let q = Quat::from_axis_angle(axis.normalize(), angle);
        self.forward = (q * self.forward).normalize();
        let up = q * self.up;
        self.up = (up - self.forward * up.dot(self.forward)).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fly::movement::FlyMovement;
    use approx::assert_abs_diff_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::f32::consts::FRAC_PI_2;

    fn looking_down_neg_z(mode: UpMode) -> FlyFrame {
        FlyFrame::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y, mode)
    }

    fn assert_orthonormal(f: &FlyFrame) {
        assert_abs_diff_eq!(f.forward().length(), 1.0, epsilon = 1e-4);
        assert_abs_diff_eq!(f.up().length(), 1.0, epsilon = 1e-4);
        assert_abs_diff_eq!(f.forward().dot(f.up()), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn reorient_builds_orthonormal_basis() {
        let f = FlyFrame::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 0.0, -2.0), Vec3::Y, UpMode::World);
        assert_orthonormal(&f);
        assert!(f.right().dot(Vec3::Y).abs() < 1e-5);
    }

    #[test]
    fn positive_yaw_turns_right() {
        let mut f = looking_down_neg_z(UpMode::World);
        assert!(f.yaw(FRAC_PI_2, &Constraints::new()));
        assert!(f.forward().abs_diff_eq(Vec3::X, 1e-5));
        assert!(f.up().abs_diff_eq(Vec3::Y, 1e-5));
        assert_abs_diff_eq!(f.rotation().yaw, FRAC_PI_2);
    }

    #[test]
    fn positive_pitch_looks_up() {
        let mut f = looking_down_neg_z(UpMode::Camera);
        assert!(f.pitch(FRAC_PI_2, &Constraints::new()));
        assert!(f.forward().abs_diff_eq(Vec3::Y, 1e-5));
        assert!(f.up().abs_diff_eq(Vec3::Z, 1e-5));
    }

    #[test]
    fn positive_roll_banks_right_and_keeps_forward() {
        let mut f = looking_down_neg_z(UpMode::Camera);
        assert!(f.roll(FRAC_PI_2, &Constraints::new()));
        assert!(f.forward().abs_diff_eq(Vec3::NEG_Z, 1e-5));
        assert!(f.up().abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn rejected_rotation_leaves_frame_untouched() {
        let c: Constraints = [(FlyMovement::PitchDown, -0.5), (FlyMovement::PitchUp, 0.5)]
            .into_iter()
            .collect();
        let mut f = looking_down_neg_z(UpMode::World);
        assert!(f.pitch(0.4, &c));
        let before = f;
        assert!(!f.pitch(0.2, &c));
        assert_eq!(f, before);
    }

    #[test]
    fn reorient_is_idempotent() {
        let mut f = looking_down_neg_z(UpMode::Camera);
        f.roll(0.3, &Constraints::new());
        let target = Vec3::new(2.0, 1.0, -4.0);
        f.reorient(target, Vec3::Y);
        let once = (f.forward(), f.up());
        f.reorient(target, Vec3::Y);
        assert_eq!((f.forward(), f.up()), once);
        assert_eq!(f.rotation(), Rotation::default());
    }

    #[test]
    fn translate_up_follows_mode() {
        let mut f = looking_down_neg_z(UpMode::Camera);
        f.roll(FRAC_PI_2, &Constraints::new());
        f.translate_up(1.0);
        assert!(f.position().abs_diff_eq(Vec3::X, 1e-5));

        let mut w = looking_down_neg_z(UpMode::World);
        w.pitch(0.3, &Constraints::new());
        w.translate_up(1.0);
        assert!(w.position().abs_diff_eq(Vec3::Y, 1e-5));
    }

    #[test]
    fn translations_move_along_basis() {
        let mut f = looking_down_neg_z(UpMode::Camera);
        f.translate_forward(2.0);
        f.translate_right(-1.0);
        assert!(f.position().abs_diff_eq(Vec3::new(-1.0, 0.0, -2.0), 1e-5));
        f.translate_forward(0.0);
        assert!(f.position().abs_diff_eq(Vec3::new(-1.0, 0.0, -2.0), 1e-5));
    }

    #[test]
    fn mode_switch_keeps_position_and_view_direction() {
        let mut f = FlyFrame::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 1.0, -1.0), Vec3::Y, UpMode::Camera);
        f.roll(0.4, &Constraints::new());
        let fwd = f.forward();
        f.set_mode(UpMode::World);
        assert_eq!(f.mode(), UpMode::World);
        assert!(f.forward().abs_diff_eq(fwd, 1e-5));
        assert_eq!(f.position(), Vec3::new(0.0, 1.0, 0.0));
        assert_abs_diff_eq!(f.rotation().roll, 0.0);
        assert!(f.right().dot(Vec3::Y).abs() < 1e-5);
    }

    #[test]
    fn random_rotations_stay_orthonormal() {
        let c: Constraints = [(FlyMovement::PitchDown, -1.4), (FlyMovement::PitchUp, 1.4)]
            .into_iter()
            .collect();
        for mode in [UpMode::World, UpMode::Camera] {
            let mut rng = StdRng::seed_from_u64(7);
            let mut f = looking_down_neg_z(mode);
            for _ in 0..2000 {
                let d: f32 = rng.gen_range(-0.2..0.2);
                match rng.gen_range(0..3) {
                    0 => f.yaw(d, &c),
                    1 => f.pitch(d, &c),
                    _ => mode == UpMode::Camera && f.roll(d, &c),
                };
                assert_orthonormal(&f);
            }
        }
    }
}
