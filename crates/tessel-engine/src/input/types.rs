use std::fmt;

use crate::coords::Vec2;

/// Stable identifier for one pointer (mouse, touch contact, pinch source).
///
/// The host assigns ids; the only requirement is that an id stays the same
/// from `Began` to `Ended`/`Cancelled`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct PointerId(pub u32);

impl PointerId {
    /// The primary pointer (mouse, first touch).
    pub const PRIMARY: PointerId = PointerId(0);
}

impl fmt::Display for PointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// Where a pointer is in its press lifecycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PointerPhase {
    /// Press started.
    Began,
    /// Moved while pressed.
    Moved,
    /// Press released normally.
    Ended,
    /// Press aborted by the platform (focus loss, gesture stolen, ...).
    Cancelled,
}

impl PointerPhase {
    /// `true` for `Ended` and `Cancelled`.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, PointerPhase::Ended | PointerPhase::Cancelled)
    }
}

/// Pointer event in screen-space logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerEvent {
    pub id: PointerId,
    pub phase: PointerPhase,
    pub position: Vec2,
}

impl PointerEvent {
    #[inline]
    pub fn new(id: PointerId, phase: PointerPhase, position: Vec2) -> Self {
        Self { id, phase, position }
    }

    #[inline]
    pub fn began(id: PointerId, x: f32, y: f32) -> Self {
        Self::new(id, PointerPhase::Began, Vec2::new(x, y))
    }

    #[inline]
    pub fn moved(id: PointerId, x: f32, y: f32) -> Self {
        Self::new(id, PointerPhase::Moved, Vec2::new(x, y))
    }

    #[inline]
    pub fn ended(id: PointerId, x: f32, y: f32) -> Self {
        Self::new(id, PointerPhase::Ended, Vec2::new(x, y))
    }

    #[inline]
    pub fn cancelled(id: PointerId, x: f32, y: f32) -> Self {
        Self::new(id, PointerPhase::Cancelled, Vec2::new(x, y))
    }
}

/// Platform-agnostic input events emitted by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Pointer(PointerEvent),

    /// Surface focus change. Losing focus cancels every held pointer.
    Focused(bool),
}

impl From<PointerEvent> for InputEvent {
    fn from(ev: PointerEvent) -> Self {
        InputEvent::Pointer(ev)
    }
}
