#![forbid(unsafe_op_in_unsafe_fn)]

mod projection;
mod rig;

pub mod fly;

pub use fly::{
    BindingError, FlyBindings, FlyControl, FlyFrame, FlyMovement, FlyOptions, FlyPreset, UpMode,
};
pub use projection::Perspective;
pub use rig::{CameraHandle, CameraRig, PerspectiveCamera};
