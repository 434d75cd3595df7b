use std::collections::HashMap;

use crate::coords::Vec2;

use super::frame::InputFrame;
use super::types::{InputEvent, PointerEvent, PointerId, PointerPhase};

/// Current input state for a single surface.
///
/// Holds which pointers are pressed and where they are.
/// Per-frame transitions are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the surface is focused.
    pub focused: bool,

    /// Pressed pointers and their last known position.
    pub pointers_down: HashMap<PointerId, Vec2>,
}

impl InputState {
    /// Applies an input event to the current state and writes deltas to `frame`.
    ///
    /// Pointer events are filtered so that the frame only ever sees a
    /// well-formed lifecycle: `Moved`/`Ended`/`Cancelled` for a pointer that
    /// is not down are dropped, and a second `Began` for a held pointer is
    /// downgraded to `Moved`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = f;
                if !f {
                    // Conservative behavior: on focus loss, cancel every held
                    // pointer so no drag stays stuck.
                    let mut held: Vec<(PointerId, Vec2)> = self.pointers_down.drain().collect();
                    held.sort_by_key(|(id, _)| *id);
                    for (id, pos) in held {
                        log::debug!("focus lost: cancelling pointer {id}");
                        frame.pointers_ended.insert(id);
                        frame.push_event(InputEvent::Pointer(PointerEvent::new(
                            id,
                            PointerPhase::Cancelled,
                            pos,
                        )));
                    }
                }
                frame.push_event(InputEvent::Focused(f));
            }

            InputEvent::Pointer(mut p) => {
                match p.phase {
                    PointerPhase::Began => {
                        if self.pointers_down.insert(p.id, p.position).is_some() {
                            p.phase = PointerPhase::Moved;
                        } else {
                            frame.pointers_began.insert(p.id);
                        }
                    }
                    PointerPhase::Moved => {
                        match self.pointers_down.get_mut(&p.id) {
                            Some(pos) => *pos = p.position,
                            None => return,
                        }
                    }
                    PointerPhase::Ended | PointerPhase::Cancelled => {
                        if self.pointers_down.remove(&p.id).is_none() {
                            return;
                        }
                        frame.pointers_ended.insert(p.id);
                    }
                }
                frame.push_event(InputEvent::Pointer(p));
            }
        }
    }

    /// Helper queries
    pub fn pointer_down(&self, id: PointerId) -> bool {
        self.pointers_down.contains_key(&id)
    }

    pub fn pointer_pos(&self, id: PointerId) -> Option<Vec2> {
        self.pointers_down.get(&id).copied()
    }
}
