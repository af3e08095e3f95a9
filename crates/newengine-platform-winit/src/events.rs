use newengine_core::{InputHostEvent, KeyCode, KeyState, MouseButton};
use winit::event::{ElementState, KeyEvent, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode as WinitKey, PhysicalKey};

/// Trackpads report pixels; the wheel convention downstream is lines.
const PIXELS_PER_LINE: f64 = 32.0;

/// Translates a winit window event into a host input event.
///
/// Returns `None` for events that carry no input (resize, focus, redraw, ...).
pub fn translate_window_event(event: &WindowEvent) -> Option<InputHostEvent> {
    match event {
        WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    physical_key,
                    state,
                    repeat,
                    ..
                },
            ..
        } => Some(InputHostEvent::Key {
            code: map_physical_key(*physical_key),
            state: map_state(*state),
            repeat: *repeat,
        }),

        WindowEvent::MouseInput { state, button, .. } => Some(InputHostEvent::MouseButton {
            button: map_button(*button),
            state: map_state(*state),
        }),

        WindowEvent::CursorMoved { position, .. } => Some(InputHostEvent::CursorMoved {
            x: position.x as f32,
            y: position.y as f32,
        }),

        WindowEvent::MouseWheel { delta, .. } => {
            let (dx, dy) = match *delta {
                MouseScrollDelta::LineDelta(x, y) => (x, y),
                MouseScrollDelta::PixelDelta(p) => {
                    ((p.x / PIXELS_PER_LINE) as f32, (p.y / PIXELS_PER_LINE) as f32)
                }
            };
            Some(InputHostEvent::MouseWheel { dx, dy })
        }

        _ => None,
    }
}

#[inline]
pub fn map_state(state: ElementState) -> KeyState {
    match state {
        ElementState::Pressed => KeyState::Pressed,
        ElementState::Released => KeyState::Released,
    }
}

#[inline]
pub fn map_button(button: winit::event::MouseButton) -> MouseButton {
    use winit::event::MouseButton as W;
    match button {
        W::Left => MouseButton::Left,
        W::Right => MouseButton::Right,
        W::Middle => MouseButton::Middle,
        W::Back => MouseButton::Back,
        W::Forward => MouseButton::Forward,
        W::Other(n) => MouseButton::Other(n),
    }
}

#[inline]
pub fn map_physical_key(key: PhysicalKey) -> KeyCode {
    match key {
        PhysicalKey::Code(code) => map_key(code),
        PhysicalKey::Unidentified(_) => KeyCode::Unknown,
    }
}

/// Layout-independent: letters follow their US-QWERTY position.
pub fn map_key(key: WinitKey) -> KeyCode {
    match key {
        WinitKey::Escape => KeyCode::Escape,
        WinitKey::Enter | WinitKey::NumpadEnter => KeyCode::Enter,
        WinitKey::Space => KeyCode::Space,
        WinitKey::Tab => KeyCode::Tab,
        WinitKey::Backspace => KeyCode::Backspace,

        WinitKey::ArrowUp => KeyCode::ArrowUp,
        WinitKey::ArrowDown => KeyCode::ArrowDown,
        WinitKey::ArrowLeft => KeyCode::ArrowLeft,
        WinitKey::ArrowRight => KeyCode::ArrowRight,

        WinitKey::PageUp => KeyCode::PageUp,
        WinitKey::PageDown => KeyCode::PageDown,
        WinitKey::Home => KeyCode::Home,
        WinitKey::End => KeyCode::End,
        WinitKey::Insert => KeyCode::Insert,
        WinitKey::Delete => KeyCode::Delete,

        WinitKey::Minus | WinitKey::NumpadSubtract => KeyCode::Minus,
        WinitKey::Equal | WinitKey::NumpadAdd => KeyCode::Equal,

        WinitKey::ShiftLeft => KeyCode::ShiftLeft,
        WinitKey::ShiftRight => KeyCode::ShiftRight,
        WinitKey::ControlLeft => KeyCode::ControlLeft,
        WinitKey::ControlRight => KeyCode::ControlRight,
        WinitKey::AltLeft => KeyCode::AltLeft,
        WinitKey::AltRight => KeyCode::AltRight,

        WinitKey::KeyA => KeyCode::A,
        WinitKey::KeyB => KeyCode::B,
        WinitKey::KeyC => KeyCode::C,
        WinitKey::KeyD => KeyCode::D,
        WinitKey::KeyE => KeyCode::E,
        WinitKey::KeyF => KeyCode::F,
        WinitKey::KeyG => KeyCode::G,
        WinitKey::KeyH => KeyCode::H,
        WinitKey::KeyI => KeyCode::I,
        WinitKey::KeyJ => KeyCode::J,
        WinitKey::KeyK => KeyCode::K,
        WinitKey::KeyL => KeyCode::L,
        WinitKey::KeyM => KeyCode::M,
        WinitKey::KeyN => KeyCode::N,
        WinitKey::KeyO => KeyCode::O,
        WinitKey::KeyP => KeyCode::P,
        WinitKey::KeyQ => KeyCode::Q,
        WinitKey::KeyR => KeyCode::R,
        WinitKey::KeyS => KeyCode::S,
        WinitKey::KeyT => KeyCode::T,
        WinitKey::KeyU => KeyCode::U,
        WinitKey::KeyV => KeyCode::V,
        WinitKey::KeyW => KeyCode::W,
        WinitKey::KeyX => KeyCode::X,
        WinitKey::KeyY => KeyCode::Y,
        WinitKey::KeyZ => KeyCode::Z,

        WinitKey::Digit0 => KeyCode::Digit0,
        WinitKey::Digit1 => KeyCode::Digit1,
        WinitKey::Digit2 => KeyCode::Digit2,
        WinitKey::Digit3 => KeyCode::Digit3,
        WinitKey::Digit4 => KeyCode::Digit4,
        WinitKey::Digit5 => KeyCode::Digit5,
        WinitKey::Digit6 => KeyCode::Digit6,
        WinitKey::Digit7 => KeyCode::Digit7,
        WinitKey::Digit8 => KeyCode::Digit8,
        WinitKey::Digit9 => KeyCode::Digit9,

        WinitKey::F1 => KeyCode::F1,
        WinitKey::F2 => KeyCode::F2,
        WinitKey::F3 => KeyCode::F3,
        WinitKey::F4 => KeyCode::F4,
        WinitKey::F5 => KeyCode::F5,
        WinitKey::F6 => KeyCode::F6,
        WinitKey::F7 => KeyCode::F7,
        WinitKey::F8 => KeyCode::F8,
        WinitKey::F9 => KeyCode::F9,
        WinitKey::F10 => KeyCode::F10,
        WinitKey::F11 => KeyCode::F11,
        WinitKey::F12 => KeyCode::F12,

        _ => KeyCode::Unknown,
    }
}
