//! Input-driven fly camera.
//!
//! Layers, bottom-up: `frame` (kinematics), `constraint` (bounds), `movement` (names and
//! dispatch targets), `bindings` (tables and presets), `resolver` (raw events to movements),
//! `control` (the controller that ties them to a camera, an event hub and a window).

mod bindings;
mod constraint;
mod control;
mod error;
mod frame;
mod movement;
mod resolver;

pub use bindings::{
    CaptureRequirement, CaptureToggle, Chord, FlyBindings, FlyOptions, FlyPreset, GestureTable,
    MouseGesture,
};
pub use constraint::{constraint_ok, Constraints};
pub use control::FlyControl;
pub use error::BindingError;
pub use frame::{FlyFrame, Rotation, UpMode};
pub use movement::{FlyMovement, FrameOp, MouseMotion, MovementMap};
pub use resolver::{Dispatches, InputResolver, Resolution, CURSOR_MODERATION};
