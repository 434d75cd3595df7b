use super::Vec2;

/// Maps screen-space pointer positions into the logical space a grid lives in.
///
/// This stands in for the reference camera of the host: the host projects
/// its pointer onto the UI plane, and what arrives here is a zoom plus a
/// translation. `logical = (screen - offset) / zoom`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewTransform {
    /// Screen-space position of the logical origin.
    pub offset: Vec2,
    /// Screen pixels per logical pixel. Clamped to `[0.05, 32.0]` on use.
    pub zoom: f32,
}

impl ViewTransform {
    pub const IDENTITY: Self = Self { offset: Vec2::zero(), zoom: 1.0 };

    #[inline]
    pub const fn new(offset: Vec2, zoom: f32) -> Self {
        Self { offset, zoom }
    }

    #[inline]
    fn zoom(self) -> f32 {
        if self.zoom.is_finite() { self.zoom.clamp(0.05, 32.0) } else { 1.0 }
    }

    /// Screen → logical.
    #[inline]
    pub fn to_logical(self, screen: Vec2) -> Vec2 {
        (screen - self.offset) / self.zoom()
    }

    /// Logical → screen.
    #[inline]
    pub fn to_screen(self, logical: Vec2) -> Vec2 {
        logical * self.zoom() + self.offset
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
