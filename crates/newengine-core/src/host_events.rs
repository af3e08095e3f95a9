use serde::{Deserialize, Serialize};

/// Platform-independent key code.
///
/// Platform crates translate their native key codes into this set; anything
/// without a mapping arrives as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeyCode {
    Escape,
    Enter,
    Space,
    Tab,
    Backspace,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    PageUp,
    PageDown,
    Home,
    End,
    Insert,
    Delete,

    Minus,
    Equal,

    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,

    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

/// Raw input delivered by the platform adapter.
///
/// Cursor positions are absolute window coordinates; wheel offsets are line
/// deltas (±1 per notch on most platforms).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputHostEvent {
    Key {
        code: KeyCode,
        state: KeyState,
        repeat: bool,
    },
    MouseButton {
        button: MouseButton,
        state: KeyState,
    },
    CursorMoved {
        x: f32,
        y: f32,
    },
    MouseWheel {
        dx: f32,
        dy: f32,
    },
}

impl InputHostEvent {
    #[inline]
    pub fn topic(&self) -> InputTopic {
        match *self {
            Self::Key { state: KeyState::Released, .. } => InputTopic::KeyUp,
            Self::Key { repeat: true, .. } => InputTopic::KeyRepeat,
            Self::Key { .. } => InputTopic::KeyDown,
            Self::MouseButton { state: KeyState::Pressed, .. } => InputTopic::MouseDown,
            Self::MouseButton { state: KeyState::Released, .. } => InputTopic::MouseUp,
            Self::CursorMoved { .. } => InputTopic::Cursor,
            Self::MouseWheel { .. } => InputTopic::Scroll,
        }
    }
}

/// Subscription topics of the event hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputTopic {
    KeyDown,
    KeyRepeat,
    KeyUp,
    MouseDown,
    MouseUp,
    Cursor,
    Scroll,
}

impl InputTopic {
    pub const ALL: [InputTopic; 7] = [
        InputTopic::KeyDown,
        InputTopic::KeyRepeat,
        InputTopic::KeyUp,
        InputTopic::MouseDown,
        InputTopic::MouseUp,
        InputTopic::Cursor,
        InputTopic::Scroll,
    ];

    #[inline(always)]
    pub const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Bit assigned to a mouse button in a [`ButtonSet`].
///
/// `Other(n)` buttons share the upper bits; anything past bit 31 folds onto it.
#[inline(always)]
pub fn mouse_bit(btn: MouseButton) -> u32 {
    match btn {
        MouseButton::Left => 1 << 0,
        MouseButton::Right => 1 << 1,
        MouseButton::Middle => 1 << 2,
        MouseButton::Back => 1 << 3,
        MouseButton::Forward => 1 << 4,
        MouseButton::Other(n) => 1 << (5 + (n as u32).min(26)),
    }
}

fn button_from_bit(index: u32) -> MouseButton {
    match index {
        0 => MouseButton::Left,
        1 => MouseButton::Right,
        2 => MouseButton::Middle,
        3 => MouseButton::Back,
        4 => MouseButton::Forward,
        n => MouseButton::Other((n - 5) as u16),
    }
}

/// Set of mouse buttons, one bit per button.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<MouseButton>", into = "Vec<MouseButton>")]
pub struct ButtonSet(u32);

impl ButtonSet {
    pub const EMPTY: ButtonSet = ButtonSet(0);

    #[inline]
    pub fn from_buttons(buttons: &[MouseButton]) -> Self {
        let mut set = Self::EMPTY;
        for &b in buttons {
            set.insert(b);
        }
        set
    }

    #[inline(always)]
    pub fn bits(self) -> u32 {
        self.0
    }

    #[inline(always)]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub fn contains(self, btn: MouseButton) -> bool {
        self.0 & mouse_bit(btn) != 0
    }

    #[inline(always)]
    pub fn insert(&mut self, btn: MouseButton) {
        self.0 |= mouse_bit(btn);
    }

    #[inline(always)]
    pub fn remove(&mut self, btn: MouseButton) {
        self.0 &= !mouse_bit(btn);
    }

    /// Flips the button's bit.
    #[inline(always)]
    pub fn toggle(&mut self, btn: MouseButton) {
        self.0 ^= mouse_bit(btn);
    }

    pub fn iter(self) -> impl Iterator<Item = MouseButton> {
        (0..32u32)
            .filter(move |i| self.0 & (1 << i) != 0)
            .map(button_from_bit)
    }
}

impl std::fmt::Debug for ButtonSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl From<Vec<MouseButton>> for ButtonSet {
    fn from(v: Vec<MouseButton>) -> Self {
        Self::from_buttons(&v)
    }
}

impl From<ButtonSet> for Vec<MouseButton> {
    fn from(set: ButtonSet) -> Self {
        set.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_topics_follow_state_and_repeat() {
        let down = InputHostEvent::Key { code: KeyCode::W, state: KeyState::Pressed, repeat: false };
        let rep = InputHostEvent::Key { code: KeyCode::W, state: KeyState::Pressed, repeat: true };
        let up = InputHostEvent::Key { code: KeyCode::W, state: KeyState::Released, repeat: false };
        assert_eq!(down.topic(), InputTopic::KeyDown);
        assert_eq!(rep.topic(), InputTopic::KeyRepeat);
        assert_eq!(up.topic(), InputTopic::KeyUp);
    }

    #[test]
    fn toggle_twice_clears_the_bit() {
        let mut set = ButtonSet::EMPTY;
        set.toggle(MouseButton::Right);
        assert!(set.contains(MouseButton::Right));
        set.toggle(MouseButton::Right);
        assert!(set.is_empty());
    }

    #[test]
    fn iter_round_trips_other_buttons() {
        let set = ButtonSet::from_buttons(&[MouseButton::Left, MouseButton::Other(3)]);
        let buttons: Vec<MouseButton> = set.iter().collect();
        assert_eq!(buttons, vec![MouseButton::Left, MouseButton::Other(3)]);
    }

    #[test]
    fn chord_equality_ignores_order() {
        let a = ButtonSet::from_buttons(&[MouseButton::Left, MouseButton::Right]);
        let b = ButtonSet::from_buttons(&[MouseButton::Right, MouseButton::Left]);
        assert_eq!(a, b);
    }
}
