use std::collections::HashSet;

use super::types::{InputEvent, PointerEvent, PointerId};

/// Per-frame input deltas.
///
/// `InputState` provides the current state (held pointers and positions).
/// `InputFrame` provides events and transition sets for the current frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order, including cancellations synthesized by
    /// `InputState` on focus loss.
    pub events: Vec<InputEvent>,

    /// Pointers pressed this frame.
    pub pointers_began: HashSet<PointerId>,

    /// Pointers released or cancelled this frame.
    pub pointers_ended: HashSet<PointerId>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.pointers_began.clear();
        self.pointers_ended.clear();
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }

    /// Pointer events of this frame, in arrival order.
    pub fn pointer_events(&self) -> impl Iterator<Item = &PointerEvent> + '_ {
        self.events.iter().filter_map(|ev| match ev {
            InputEvent::Pointer(p) => Some(p),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
