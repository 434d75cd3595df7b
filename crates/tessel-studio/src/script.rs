//! Pointer replay scripts.
//!
//! One command per line; blank lines and `#` comments are skipped.
//!
//! ```text
//! down 0 100 40     # pointer 0 pressed at (100, 40)
//! move 0 220 40
//! frame             # end of frame
//! up 0 220 40
//! cancel 1 0 0
//! blur              # focus lost
//! ```
//!
//! Events after the last `frame` form one final frame.

use std::fmt;

use tessel_engine::input::{InputEvent, PointerEvent, PointerId, PointerPhase};
use tessel_engine::coords::Vec2;

#[derive(Debug, Clone, PartialEq)]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "script line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ScriptError {}

/// Events grouped into frames, in order.
pub fn parse_script(src: &str) -> Result<Vec<Vec<InputEvent>>, ScriptError> {
    let mut frames = Vec::new();
    let mut current = Vec::new();

    for (i, raw) in src.lines().enumerate() {
        let line = i + 1;
        let text = raw.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }
        let words: Vec<&str> = text.split_whitespace().collect();
        let err = |message: String| ScriptError { line, message };

        match words[0] {
            "frame" => frames.push(std::mem::take(&mut current)),
            "blur" => current.push(InputEvent::Focused(false)),
            "focus" => current.push(InputEvent::Focused(true)),
            cmd @ ("down" | "move" | "up" | "cancel") => {
                let phase = match cmd {
                    "down" => PointerPhase::Began,
                    "move" => PointerPhase::Moved,
                    "up" => PointerPhase::Ended,
                    _ => PointerPhase::Cancelled,
                };
                let [_, id, x, y] = words[..] else {
                    return Err(err(format!("`{cmd}` takes <pointer> <x> <y>")));
                };
                let id: u32 = id.parse().map_err(|_| err(format!("bad pointer id `{id}`")))?;
                let x: f32 = x.parse().map_err(|_| err(format!("bad x `{x}`")))?;
                let y: f32 = y.parse().map_err(|_| err(format!("bad y `{y}`")))?;
                current.push(InputEvent::Pointer(PointerEvent::new(PointerId(id), phase, Vec2::new(x, y))));
            }
            other => return Err(err(format!("unknown command `{other}`"))),
        }
    }

    if !current.is_empty() {
        frames.push(current);
    }
    Ok(frames)
}
