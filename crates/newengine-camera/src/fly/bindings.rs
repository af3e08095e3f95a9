//! Input binding tables and the named control presets.
//!
//! Tables are plain configuration: which key drives which movement, how far a
//! single event moves, where rotation and zoom stop, and which mouse gestures
//! apply. Logic lives in the resolver and the controller.

use newengine_core::{ButtonSet, KeyCode, MouseButton};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::constraint::Constraints;
use super::error::BindingError;
use super::frame::UpMode;
use super::movement::{FlyMovement, FrameOp, MouseMotion, MovementMap};

/// Buttons that must be held for a gesture to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Chord {
    /// Fires regardless of held buttons.
    Any,
    /// Held set must equal this set exactly; empty means "no buttons held".
    Exact(ButtonSet),
}

impl Default for Chord {
    fn default() -> Self {
        Chord::Exact(ButtonSet::EMPTY)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CaptureRequirement {
    Captured,
    Released,
    #[default]
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MouseGesture {
    pub motion: MouseMotion,
    #[cfg_attr(feature = "serde", serde(default))]
    pub chord: Chord,
    #[cfg_attr(feature = "serde", serde(default))]
    pub capture: CaptureRequirement,
}

impl MouseGesture {
    /// Pointer motion with no buttons held, only while the cursor is captured.
    #[inline]
    pub fn look(motion: MouseMotion) -> Self {
        Self {
            motion,
            chord: Chord::default(),
            capture: CaptureRequirement::Captured,
        }
    }

    /// Wheel motion in any capture state.
    #[inline]
    pub fn wheel(motion: MouseMotion) -> Self {
        Self {
            motion,
            chord: Chord::default(),
            capture: CaptureRequirement::Any,
        }
    }

    #[inline]
    pub fn holding(mut self, buttons: &[MouseButton]) -> Self {
        self.chord = Chord::Exact(ButtonSet::from_buttons(buttons));
        self
    }

    #[inline]
    pub fn matches(&self, held: ButtonSet, captured: bool) -> bool {
        let chord_ok = match self.chord {
            Chord::Any => true,
            Chord::Exact(set) => set == held,
        };
        let capture_ok = match self.capture {
            CaptureRequirement::Captured => captured,
            CaptureRequirement::Released => !captured,
            CaptureRequirement::Any => true,
        };
        chord_ok && capture_ok
    }
}

pub type GestureTable = MovementMap<Vec<MouseGesture>>;

/// Complete table set the controller runs on.
#[derive(Debug, Clone, PartialEq)]
pub struct FlyBindings {
    pub keys: MovementMap<KeyCode>,
    /// Units/event for translations, radians/event for rotation and zoom. Sign is direction.
    pub speeds: MovementMap<f32>,
    pub constraints: Constraints,
    pub mouse: GestureTable,
    /// Key that toggles cursor capture. Never dispatched as a movement.
    pub capture_toggle: Option<KeyCode>,
    /// Multiplier on every cursor-derived magnitude.
    pub sensitivity: f32,
    /// Negates pitch magnitudes that come from pointer motion.
    pub invert_pitch: bool,
    pub up_mode: UpMode,
}

impl Default for FlyBindings {
    fn default() -> Self {
        FlyPreset::Classic.bindings()
    }
}

impl FlyBindings {
    /// Reverse scan of the key table.
    pub fn movement_for_key(&self, key: KeyCode) -> Option<FlyMovement> {
        self.keys.iter().find(|(_, &k)| k == key).map(|(m, _)| m)
    }

    #[inline]
    pub fn speed(&self, m: FlyMovement) -> f32 {
        self.speeds.value(m).unwrap_or(0.0)
    }

    /// Configuration checks the controller itself never runs.
    ///
    /// Rejects a key bound to two movements, a capture toggle key that shadows a movement,
    /// and low/high bounds that cross.
    pub fn validate(&self) -> Result<(), BindingError> {
        let bound: Vec<(FlyMovement, KeyCode)> = self.keys.iter().map(|(m, &k)| (m, k)).collect();
        for (i, &(first, key)) in bound.iter().enumerate() {
            if let Some(&(second, _)) = bound[i + 1..].iter().find(|(_, k)| *k == key) {
                return Err(BindingError::DuplicateKey { key, first, second });
            }
        }

        if let Some(key) = self.capture_toggle {
            if let Some(movement) = self.movement_for_key(key) {
                return Err(BindingError::CaptureKeyBound { key, movement });
            }
        }

        for op in [FrameOp::Yaw, FrameOp::Pitch, FrameOp::Roll, FrameOp::Zoom] {
            let Some((low, high)) = op.bounds() else {
                continue;
            };
            if let (Some(low_value), Some(high_value)) =
                (self.constraints.value(low), self.constraints.value(high))
            {
                if low_value > high_value {
                    return Err(BindingError::InvertedBounds {
                        low,
                        low_value,
                        high,
                        high_value,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Named control conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FlyPreset {
    /// Arrow keys translate, WASD yaw/pitch, Q/E roll; camera-relative up.
    #[default]
    Classic,
    /// World-up locked, pitch clamped to ±85°, no roll bindings, yaw unbounded.
    Fps,
    /// Free yaw/pitch/roll about the camera's own axes; only zoom is bounded.
    FlightSim,
}

fn default_speeds() -> MovementMap<f32> {
    use FlyMovement::*;
    [
        (Forward, 1.0),
        (Backward, -1.0),
        (Right, 1.0),
        (Left, -1.0),
        (Up, 1.0),
        (Down, -1.0),
        (YawRight, 0.1),
        (YawLeft, -0.1),
        (PitchUp, 0.1),
        (PitchDown, -0.1),
        (RollRight, 0.1),
        (RollLeft, -0.1),
        (ZoomOut, 0.1),
        (ZoomIn, -0.1),
    ]
    .into_iter()
    .collect()
}

fn flight_keys() -> MovementMap<KeyCode> {
    use FlyMovement::*;
    [
        (Forward, KeyCode::ArrowUp),
        (Backward, KeyCode::ArrowDown),
        (Right, KeyCode::ArrowRight),
        (Left, KeyCode::ArrowLeft),
        (Up, KeyCode::PageUp),
        (Down, KeyCode::PageDown),
        (YawRight, KeyCode::D),
        (YawLeft, KeyCode::A),
        (PitchUp, KeyCode::W),
        (PitchDown, KeyCode::S),
        (RollRight, KeyCode::E),
        (RollLeft, KeyCode::Q),
        (ZoomOut, KeyCode::Minus),
        (ZoomIn, KeyCode::Equal),
    ]
    .into_iter()
    .collect()
}

fn fps_keys() -> MovementMap<KeyCode> {
    use FlyMovement::*;
    [
        (Forward, KeyCode::W),
        (Backward, KeyCode::S),
        (Right, KeyCode::D),
        (Left, KeyCode::A),
        (Up, KeyCode::PageUp),
        (Down, KeyCode::PageDown),
        (YawRight, KeyCode::ArrowRight),
        (YawLeft, KeyCode::ArrowLeft),
        (PitchUp, KeyCode::ArrowUp),
        (PitchDown, KeyCode::ArrowDown),
        (ZoomOut, KeyCode::Minus),
        (ZoomIn, KeyCode::Equal),
    ]
    .into_iter()
    .collect()
}

fn zoom_limits() -> [(FlyMovement, f32); 2] {
    [
        (FlyMovement::ZoomIn, 1f32.to_radians()),
        (FlyMovement::ZoomOut, 100f32.to_radians()),
    ]
}

fn look_gestures() -> GestureTable {
    use FlyMovement::*;
    [
        (YawRight, vec![MouseGesture::look(MouseMotion::PointerRight)]),
        (YawLeft, vec![MouseGesture::look(MouseMotion::PointerLeft)]),
        (PitchUp, vec![MouseGesture::look(MouseMotion::PointerUp)]),
        (PitchDown, vec![MouseGesture::look(MouseMotion::PointerDown)]),
    ]
    .into_iter()
    .collect()
}

impl FlyPreset {
    pub fn bindings(self) -> FlyBindings {
        match self {
            FlyPreset::Classic => {
                let mut mouse = look_gestures();
                mouse.insert(
                    FlyMovement::ZoomIn,
                    vec![MouseGesture::wheel(MouseMotion::ScrollUp).holding(&[MouseButton::Right])],
                );
                mouse.insert(
                    FlyMovement::ZoomOut,
                    vec![MouseGesture::wheel(MouseMotion::ScrollDown).holding(&[MouseButton::Right])],
                );

                let mut constraints: Constraints = [
                    (FlyMovement::PitchUp, 90f32.to_radians()),
                    (FlyMovement::PitchDown, -90f32.to_radians()),
                    (FlyMovement::RollRight, 45f32.to_radians()),
                    (FlyMovement::RollLeft, -45f32.to_radians()),
                ]
                .into_iter()
                .collect();
                for (m, v) in zoom_limits() {
                    constraints.insert(m, v);
                }

                FlyBindings {
                    keys: flight_keys(),
                    speeds: default_speeds(),
                    constraints,
                    mouse,
                    capture_toggle: Some(KeyCode::Space),
                    sensitivity: 0.5,
                    invert_pitch: false,
                    up_mode: UpMode::Camera,
                }
            }
            FlyPreset::Fps => {
                let mut mouse = look_gestures();
                mouse.insert(FlyMovement::ZoomIn, vec![MouseGesture::wheel(MouseMotion::ScrollUp)]);
                mouse.insert(FlyMovement::ZoomOut, vec![MouseGesture::wheel(MouseMotion::ScrollDown)]);

                let mut constraints: Constraints = [
                    (FlyMovement::PitchUp, 85f32.to_radians()),
                    (FlyMovement::PitchDown, -85f32.to_radians()),
                ]
                .into_iter()
                .collect();
                for (m, v) in zoom_limits() {
                    constraints.insert(m, v);
                }

                FlyBindings {
                    keys: fps_keys(),
                    speeds: default_speeds(),
                    constraints,
                    mouse,
                    capture_toggle: Some(KeyCode::Space),
                    sensitivity: 0.5,
                    invert_pitch: false,
                    up_mode: UpMode::World,
                }
            }
            FlyPreset::FlightSim => {
                let mut mouse = look_gestures();
                mouse.insert(
                    FlyMovement::RollRight,
                    vec![MouseGesture::look(MouseMotion::PointerRight).holding(&[MouseButton::Left])],
                );
                mouse.insert(
                    FlyMovement::RollLeft,
                    vec![MouseGesture::look(MouseMotion::PointerLeft).holding(&[MouseButton::Left])],
                );
                mouse.insert(
                    FlyMovement::ZoomIn,
                    vec![MouseGesture::wheel(MouseMotion::ScrollUp).holding(&[MouseButton::Right])],
                );
                mouse.insert(
                    FlyMovement::ZoomOut,
                    vec![MouseGesture::wheel(MouseMotion::ScrollDown).holding(&[MouseButton::Right])],
                );

                FlyBindings {
                    keys: flight_keys(),
                    speeds: default_speeds(),
                    constraints: zoom_limits().into_iter().collect(),
                    mouse,
                    capture_toggle: Some(KeyCode::Space),
                    sensitivity: 0.5,
                    invert_pitch: false,
                    up_mode: UpMode::Camera,
                }
            }
        }
    }
}

/// Capture toggle override. `Off` removes the preset's toggle key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CaptureToggle {
    Off,
    Key(KeyCode),
}

impl From<CaptureToggle> for Option<KeyCode> {
    #[inline]
    fn from(t: CaptureToggle) -> Self {
        match t {
            CaptureToggle::Off => None,
            CaptureToggle::Key(k) => Some(k),
        }
    }
}

/// Overrides applied on top of a preset. Each table replaces the preset's table wholesale.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FlyOptions {
    pub preset: FlyPreset,
    pub speeds: Option<MovementMap<f32>>,
    pub keys: Option<MovementMap<KeyCode>>,
    pub mouse: Option<GestureTable>,
    pub constraints: Option<Constraints>,
    pub sensitivity: Option<f32>,
    pub invert_pitch: Option<bool>,
    pub capture_toggle: Option<CaptureToggle>,
    pub up_mode: Option<UpMode>,
}

impl FlyOptions {
    #[inline]
    pub fn preset(preset: FlyPreset) -> Self {
        Self {
            preset,
            ..Self::default()
        }
    }

    pub fn into_bindings(self) -> FlyBindings {
        let mut b = self.preset.bindings();
        if let Some(v) = self.speeds {
            b.speeds = v;
        }
        if let Some(v) = self.keys {
            b.keys = v;
        }
        if let Some(v) = self.mouse {
            b.mouse = v;
        }
        if let Some(v) = self.constraints {
            b.constraints = v;
        }
        if let Some(v) = self.sensitivity {
            b.sensitivity = v;
        }
        if let Some(v) = self.invert_pitch {
            b.invert_pitch = v;
        }
        if let Some(v) = self.capture_toggle {
            b.capture_toggle = v.into();
        }
        if let Some(v) = self.up_mode {
            b.up_mode = v;
        }
        b
    }
}
