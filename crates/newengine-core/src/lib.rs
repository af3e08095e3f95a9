#![forbid(unsafe_op_in_unsafe_fn)]

pub mod error;
pub mod events;
pub mod host_events;
pub mod window;

pub use crate::error::{EngineError, EngineResult};
pub use crate::events::{EventHub, SubscriberId, Subscription};
pub use crate::host_events::{ButtonSet, InputHostEvent, InputTopic, KeyCode, KeyState, MouseButton};
pub use crate::window::{HeadlessWindow, WindowApi};
