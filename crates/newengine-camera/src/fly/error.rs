use newengine_core::KeyCode;
use thiserror::Error;

use super::movement::FlyMovement;

#[derive(Debug, Error, PartialEq)]
pub enum BindingError {
    #[error("unknown movement `{0}`")]
    UnknownMovement(String),

    #[error("key {key:?} is bound to both {first} and {second}")]
    DuplicateKey {
        key: KeyCode,
        first: FlyMovement,
        second: FlyMovement,
    },

    #[error("capture toggle key {key:?} is also bound to {movement}")]
    CaptureKeyBound { key: KeyCode, movement: FlyMovement },

    #[error("constraint {low} = {low_value} is above {high} = {high_value}")]
    InvertedBounds {
        low: FlyMovement,
        low_value: f32,
        high: FlyMovement,
        high_value: f32,
    },
}
