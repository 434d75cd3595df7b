//! Coordinate and geometry types shared by the engine and the grid layer.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! Pointer positions arrive in screen space and are mapped into this space
//! through a [`ViewTransform`].

mod rect;
mod transform;
mod vec2;

pub use rect::Rect;
pub use transform::ViewTransform;
pub use vec2::Vec2;

/// Axis identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// The perpendicular axis.
    #[inline]
    pub fn cross(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}
