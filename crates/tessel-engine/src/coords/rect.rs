use super::{Axis, Vec2};

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x, self.origin.y + self.size.y)
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(
            self.origin.x + self.size.x * 0.5,
            self.origin.y + self.size.y * 0.5,
        )
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Leading edge on `axis` (left for X, top for Y).
    #[inline]
    pub fn start(self, axis: Axis) -> f32 {
        self.origin.along(axis)
    }

    /// Extent on `axis` (width for X, height for Y).
    #[inline]
    pub fn extent(self, axis: Axis) -> f32 {
        self.size.along(axis)
    }

    /// Position of `p` along `axis` as a fraction of this rect's extent.
    ///
    /// 0.0 is the leading edge, 1.0 the trailing edge. Points outside the
    /// rect map outside `[0, 1]`; callers clamp. Returns `None` for an empty
    /// extent.
    #[inline]
    pub fn fraction_along(self, p: Vec2, axis: Axis) -> Option<f32> {
        let extent = self.extent(axis);
        if extent <= 0.0 || !extent.is_finite() {
            return None;
        }
        Some((p.along(axis) - self.start(axis)) / extent)
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        p.x >= self.origin.x
            && p.y >= self.origin.y
            && p.x < (self.origin.x + self.size.x)
            && p.y < (self.origin.y + self.size.y)
    }
}
