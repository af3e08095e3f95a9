use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::BindingError;

/// Named camera movements.
///
/// Paired movements (Forward/Backward, ...) route to the same frame operation;
/// the direction is carried by the sign of the magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FlyMovement {
    Forward,
    Backward,
    Right,
    Left,
    Up,
    Down,
    YawRight,
    YawLeft,
    PitchUp,
    PitchDown,
    RollRight,
    RollLeft,
    ZoomOut,
    ZoomIn,
}

/// Frame operation a movement resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOp {
    TranslateForward,
    TranslateRight,
    TranslateUp,
    Yaw,
    Pitch,
    Roll,
    Zoom,
}

impl FlyMovement {
    pub const COUNT: usize = 14;

    pub const ALL: [FlyMovement; Self::COUNT] = [
        FlyMovement::Forward,
        FlyMovement::Backward,
        FlyMovement::Right,
        FlyMovement::Left,
        FlyMovement::Up,
        FlyMovement::Down,
        FlyMovement::YawRight,
        FlyMovement::YawLeft,
        FlyMovement::PitchUp,
        FlyMovement::PitchDown,
        FlyMovement::RollRight,
        FlyMovement::RollLeft,
        FlyMovement::ZoomOut,
        FlyMovement::ZoomIn,
    ];

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn op(self) -> FrameOp {
        match self {
            Self::Forward | Self::Backward => FrameOp::TranslateForward,
            Self::Right | Self::Left => FrameOp::TranslateRight,
            Self::Up | Self::Down => FrameOp::TranslateUp,
            Self::YawRight | Self::YawLeft => FrameOp::Yaw,
            Self::PitchUp | Self::PitchDown => FrameOp::Pitch,
            Self::RollRight | Self::RollLeft => FrameOp::Roll,
            Self::ZoomOut | Self::ZoomIn => FrameOp::Zoom,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Forward => "Forward",
            Self::Backward => "Backward",
            Self::Right => "Right",
            Self::Left => "Left",
            Self::Up => "Up",
            Self::Down => "Down",
            Self::YawRight => "YawRight",
            Self::YawLeft => "YawLeft",
            Self::PitchUp => "PitchUp",
            Self::PitchDown => "PitchDown",
            Self::RollRight => "RollRight",
            Self::RollLeft => "RollLeft",
            Self::ZoomOut => "ZoomOut",
            Self::ZoomIn => "ZoomIn",
        }
    }
}

impl FrameOp {
    /// Constraint entries bounding the accumulated value of this operation, as (low, high).
    ///
    /// Translations are never constrained.
    #[inline]
    pub const fn bounds(self) -> Option<(FlyMovement, FlyMovement)> {
        match self {
            Self::TranslateForward | Self::TranslateRight | Self::TranslateUp => None,
            Self::Yaw => Some((FlyMovement::YawLeft, FlyMovement::YawRight)),
            Self::Pitch => Some((FlyMovement::PitchDown, FlyMovement::PitchUp)),
            Self::Roll => Some((FlyMovement::RollLeft, FlyMovement::RollRight)),
            Self::Zoom => Some((FlyMovement::ZoomIn, FlyMovement::ZoomOut)),
        }
    }
}

impl fmt::Display for FlyMovement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FlyMovement {
    type Err = BindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| BindingError::UnknownMovement(s.to_string()))
    }
}

/// Discrete motion classification of pointer or wheel input.
///
/// Screen space: +X right, +Y down. Wheel: +Y is away from the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MouseMotion {
    None,
    PointerRight,
    PointerLeft,
    PointerDown,
    PointerUp,
    ScrollRight,
    ScrollLeft,
    ScrollDown,
    ScrollUp,
}

impl MouseMotion {
    /// Strict sign classification; zero never classifies.
    #[inline]
    pub fn pointer_x(dx: f32) -> Self {
        if dx > 0.0 {
            Self::PointerRight
        } else if dx < 0.0 {
            Self::PointerLeft
        } else {
            Self::None
        }
    }

    #[inline]
    pub fn pointer_y(dy: f32) -> Self {
        if dy > 0.0 {
            Self::PointerDown
        } else if dy < 0.0 {
            Self::PointerUp
        } else {
            Self::None
        }
    }

    #[inline]
    pub fn scroll_x(dx: f32) -> Self {
        if dx > 0.0 {
            Self::ScrollRight
        } else if dx < 0.0 {
            Self::ScrollLeft
        } else {
            Self::None
        }
    }

    #[inline]
    pub fn scroll_y(dy: f32) -> Self {
        if dy > 0.0 {
            Self::ScrollUp
        } else if dy < 0.0 {
            Self::ScrollDown
        } else {
            Self::None
        }
    }

    #[inline]
    pub fn is_pointer(self) -> bool {
        matches!(
            self,
            Self::PointerRight | Self::PointerLeft | Self::PointerDown | Self::PointerUp
        )
    }
}

/// Fixed-size table keyed by [`FlyMovement`].
///
/// Serialized as a string-keyed map, e.g. `{ "PitchUp" = 1.48 }`.
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "BTreeMap<String, T>",
        into = "BTreeMap<String, T>",
        bound(serialize = "T: Serialize + Clone", deserialize = "T: Deserialize<'de>")
    )
)]
pub struct MovementMap<T> {
    slots: [Option<T>; FlyMovement::COUNT],
}

impl<T> Default for MovementMap<T> {
    fn default() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }
}

impl<T> MovementMap<T> {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, m: FlyMovement) -> Option<&T> {
        self.slots[m.index()].as_ref()
    }

    #[inline]
    pub fn insert(&mut self, m: FlyMovement, value: T) -> Option<T> {
        self.slots[m.index()].replace(value)
    }

    #[inline]
    pub fn remove(&mut self, m: FlyMovement) -> Option<T> {
        self.slots[m.index()].take()
    }

    #[inline]
    pub fn contains(&self, m: FlyMovement) -> bool {
        self.slots[m.index()].is_some()
    }

    /// Entries in movement declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (FlyMovement, &T)> {
        FlyMovement::ALL
            .into_iter()
            .zip(self.slots.iter())
            .filter_map(|(m, v)| v.as_ref().map(|v| (m, v)))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|v| v.is_some()).count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Copy> MovementMap<T> {
    #[inline]
    pub fn value(&self, m: FlyMovement) -> Option<T> {
        self.slots[m.index()]
    }
}

impl<T> FromIterator<(FlyMovement, T)> for MovementMap<T> {
    fn from_iter<I: IntoIterator<Item = (FlyMovement, T)>>(iter: I) -> Self {
        let mut map = Self::default();
        for (m, v) in iter {
            map.insert(m, v);
        }
        map
    }
}

impl<T: fmt::Debug> fmt::Debug for MovementMap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<T> TryFrom<BTreeMap<String, T>> for MovementMap<T> {
    type Error = BindingError;

    fn try_from(raw: BTreeMap<String, T>) -> Result<Self, Self::Error> {
        let mut map = Self::default();
        for (name, v) in raw {
            map.insert(name.parse()?, v);
        }
        Ok(map)
    }
}

impl<T> From<MovementMap<T>> for BTreeMap<String, T> {
    fn from(map: MovementMap<T>) -> Self {
        FlyMovement::ALL
            .into_iter()
            .zip(map.slots)
            .filter_map(|(m, v)| v.map(|v| (m.name().to_string(), v)))
            .collect()
    }
}
