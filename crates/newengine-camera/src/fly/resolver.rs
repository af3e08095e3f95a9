use glam::Vec2;
use newengine_core::{ButtonSet, InputHostEvent, KeyCode, KeyState, MouseButton};
use smallvec::SmallVec;

use super::bindings::FlyBindings;
use super::movement::{FlyMovement, FrameOp, MouseMotion};

/// Scale applied to raw cursor deltas before sensitivity.
pub const CURSOR_MODERATION: f32 = 0.5;

/// Movements produced by a single event, in dispatch order.
pub type Dispatches = SmallVec<[(FlyMovement, f32); 4]>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub moves: Dispatches,
    /// The capture toggle key went down.
    pub toggle_capture: bool,
}

impl Resolution {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty() && !self.toggle_capture
    }
}

/// Turns raw host events into weighted movements.
///
/// Transient state only: held buttons, the previous cursor sample and the capture flag.
/// Button state is flipped on every down and up event, so a lost up event leaves the
/// bit stuck until the next event for that button.
#[derive(Debug, Clone, Default)]
pub struct InputResolver {
    held: ButtonSet,
    prev_cursor: Option<Vec2>,
    captured: bool,
}

impl InputResolver {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn held(&self) -> ButtonSet {
        self.held
    }

    #[inline]
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    #[inline]
    pub fn prev_cursor(&self) -> Option<Vec2> {
        self.prev_cursor
    }

    /// Records a capture change. The next cursor sample only seeds the position.
    #[inline]
    pub fn set_captured(&mut self, captured: bool) {
        self.captured = captured;
        self.prev_cursor = None;
    }

    #[inline]
    pub fn reset_cursor(&mut self) {
        self.prev_cursor = None;
    }

    pub fn resolve(&mut self, ev: &InputHostEvent, bindings: &FlyBindings) -> Resolution {
        match *ev {
            InputHostEvent::Key {
                code,
                state: KeyState::Pressed,
                repeat,
            } => self.on_key(code, repeat, bindings),
            InputHostEvent::Key { .. } => Resolution::default(),
            InputHostEvent::MouseButton { button, .. } => {
                self.on_button(button);
                Resolution::default()
            }
            InputHostEvent::CursorMoved { x, y } => Resolution {
                moves: self.on_cursor(Vec2::new(x, y), bindings),
                toggle_capture: false,
            },
            InputHostEvent::MouseWheel { dx, dy } => Resolution {
                moves: self.on_scroll(dx, dy, bindings),
                toggle_capture: false,
            },
        }
    }

    fn on_key(&self, code: KeyCode, repeat: bool, bindings: &FlyBindings) -> Resolution {
        if bindings.capture_toggle == Some(code) {
            return Resolution {
                moves: Dispatches::new(),
                toggle_capture: !repeat,
            };
        }

        let mut moves = Dispatches::new();
        if let Some(m) = bindings.movement_for_key(code) {
            moves.push((m, bindings.speed(m)));
        }
        Resolution {
            moves,
            toggle_capture: false,
        }
    }

    fn on_button(&mut self, button: MouseButton) {
        self.held.toggle(button);
        log::trace!("fly: mouse buttons {:?}", self.held);
    }

    fn on_cursor(&mut self, pos: Vec2, bindings: &FlyBindings) -> Dispatches {
        let Some(prev) = self.prev_cursor.replace(pos) else {
            return Dispatches::new();
        };

        let d = (pos - prev) * CURSOR_MODERATION * bindings.sensitivity;
        let mx = MouseMotion::pointer_x(d.x);
        let my = MouseMotion::pointer_y(d.y);
        self.match_gestures(bindings, (mx, d.x), (my, d.y))
    }

    fn on_scroll(&self, dx: f32, dy: f32, bindings: &FlyBindings) -> Dispatches {
        let sx = MouseMotion::scroll_x(dx);
        let sy = MouseMotion::scroll_y(dy);
        self.match_gestures(bindings, (sx, dx), (sy, dy))
    }

    fn match_gestures(
        &self,
        bindings: &FlyBindings,
        horizontal: (MouseMotion, f32),
        vertical: (MouseMotion, f32),
    ) -> Dispatches {
        let mut out = Dispatches::new();
        for (m, gestures) in bindings.mouse.iter() {
            for g in gestures.iter().filter(|g| g.matches(self.held, self.captured)) {
                for (motion, delta) in [horizontal, vertical] {
                    if motion != MouseMotion::None && g.motion == motion {
                        out.push((m, Self::magnitude(bindings, m, motion, delta)));
                    }
                }
            }
        }
        out
    }

    #[inline]
    fn magnitude(bindings: &FlyBindings, m: FlyMovement, motion: MouseMotion, delta: f32) -> f32 {
        let v = delta.abs() * bindings.speed(m);
        if bindings.invert_pitch && motion.is_pointer() && m.op() == FrameOp::Pitch {
            -v
        } else {
            v
        }
    }
}
