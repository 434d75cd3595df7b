//! Input subsystem.
//!
//! Public API is platform-agnostic: the host translates its own pointer,
//! touch, or pinch stream into `InputEvent`s and feeds them through
//! `InputState::apply_event` once per frame.

mod frame;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, PointerEvent, PointerId, PointerPhase};
