#![forbid(unsafe_op_in_unsafe_fn)]

mod app;
mod events;
mod window;

pub use app::{run_winit_app, HostApp, WindowSettings};
pub use events::{map_button, map_key, map_physical_key, map_state, translate_window_event};
pub use window::WinitWindow;
