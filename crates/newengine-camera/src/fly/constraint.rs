use super::movement::{FlyMovement, MovementMap};

/// Optional scalar bound per movement.
///
/// Angular and zoom bounds are in radians. Translation entries are ignored.
pub type Constraints = MovementMap<f32>;

/// Whether `value` lies within the bounds stored under `low` and `high`.
///
/// A missing bound leaves that side open, so an empty table accepts everything.
#[inline]
pub fn constraint_ok(constraints: &Constraints, value: f32, low: FlyMovement, high: FlyMovement) -> bool {
    if let Some(min) = constraints.value(low) {
        if value < min {
            return false;
        }
    }
    if let Some(max) = constraints.value(high) {
        if value > max {
            return false;
        }
    }
    true
}
