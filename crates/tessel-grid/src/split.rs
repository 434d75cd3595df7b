//! Two-group panel splitter working in absolute pixels.
//!
//! Unlike the grid, a split has no weights: a knob moves inside a fixed
//! local range and the primary group's extent follows it linearly, clamped
//! so both groups keep at least `min_panel_extent`.

use tessel_engine::coords::{Axis, Vec2};

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitConstraints {
    /// Knob position at which the primary group would be empty.
    pub knob_min: f32,
    /// Knob position at which the primary group would fill `total_extent`.
    pub knob_max: f32,
    /// Combined extent of both groups.
    pub total_extent: f32,
    pub min_panel_extent: f32,
}

impl Default for SplitConstraints {
    fn default() -> Self {
        Self { knob_min: -500.0, knob_max: 0.0, total_extent: 1000.0, min_panel_extent: 100.0 }
    }
}

impl SplitConstraints {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if (self.knob_max - self.knob_min).abs() <= f32::EPSILON {
            return Err(ConfigError::DegenerateKnobRange { min: self.knob_min, max: self.knob_max });
        }
        if self.min_panel_extent * 2.0 > self.total_extent {
            return Err(ConfigError::PanelsExceedTotal {
                min_panel: self.min_panel_extent,
                total: self.total_extent,
            });
        }
        Ok(())
    }

    /// Sizes for a requested knob position, or `None` for a degenerate range.
    pub fn sizes_for_knob(&self, desired_knob: f32) -> Option<(f32, f32, f32)> {
        let range = self.knob_max - self.knob_min;
        if range.abs() <= f32::EPSILON || self.total_extent <= 0.0 || !desired_knob.is_finite() {
            return None;
        }
        let desired_primary = self.total_extent * (desired_knob - self.knob_min) / range;
        let lo = self.min_panel_extent;
        let hi = (self.total_extent - self.min_panel_extent).max(lo);
        let primary = desired_primary.max(lo).min(hi);
        let secondary = self.total_extent - primary;
        let knob = self.knob_min + range * (primary / self.total_extent);
        Some((primary, secondary, knob))
    }
}

/// Result of one splitter drag step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitSizes {
    pub primary: f32,
    pub secondary: f32,
    /// Knob position matching the clamped primary extent.
    pub knob: f32,
    /// How far the secondary group moved since the drag began.
    pub secondary_offset: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Anchor {
    pointer: f32,
    knob: f32,
}

#[derive(Debug, Clone)]
pub struct PanelSplit {
    axis: Axis,
    constraints: SplitConstraints,
    knob: f32,
    anchor: Option<Anchor>,
}

impl PanelSplit {
    pub fn new(axis: Axis, constraints: SplitConstraints, knob: f32) -> Result<Self, ConfigError> {
        constraints.validate()?;
        Ok(Self { axis, constraints, knob, anchor: None })
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn constraints(&self) -> &SplitConstraints {
        &self.constraints
    }

    pub fn knob(&self) -> f32 {
        self.knob
    }

    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }

    /// Start a drag with the pointer at `pointer` (local space).
    pub fn begin(&mut self, pointer: Vec2) {
        self.anchor = Some(Anchor { pointer: pointer.along(self.axis), knob: self.knob });
    }

    /// Move the knob by the pointer's travel since [`PanelSplit::begin`].
    pub fn drag(&mut self, pointer: Vec2) -> Option<SplitSizes> {
        let anchor = self.anchor?;
        let desired = anchor.knob + (pointer.along(self.axis) - anchor.pointer);
        let (primary, secondary, knob) = self.constraints.sizes_for_knob(desired)?;
        self.knob = knob;
        Some(SplitSizes { primary, secondary, knob, secondary_offset: knob - anchor.knob })
    }

    pub fn end(&mut self) {
        self.anchor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizontal() -> PanelSplit {
        let c = SplitConstraints { knob_min: 0.0, knob_max: 1200.0, total_extent: 1200.0, min_panel_extent: 100.0 };
        PanelSplit::new(Axis::X, c, 600.0).unwrap()
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn drag_moves_knob_by_pointer_travel() {
        let mut s = horizontal();
        s.begin(Vec2::new(50.0, 10.0));
        let sizes = s.drag(Vec2::new(150.0, 99.0)).unwrap();
        assert!(approx(sizes.primary, 700.0));
        assert!(approx(sizes.secondary, 500.0));
        assert!(approx(sizes.knob, 700.0));
        assert!(approx(sizes.secondary_offset, 100.0));
        assert!(approx(s.knob(), 700.0));
    }

    #[test]
    fn primary_is_clamped_and_knob_snaps() {
        let mut s = horizontal();
        s.begin(Vec2::new(0.0, 0.0));
        let sizes = s.drag(Vec2::new(-900.0, 0.0)).unwrap();
        assert!(approx(sizes.primary, 100.0));
        assert!(approx(sizes.secondary, 1100.0));
        assert!(approx(sizes.knob, 100.0));
        assert!(approx(sizes.secondary_offset, -500.0));

        // The anchor stays put, so travel is measured from the press.
        let sizes = s.drag(Vec2::new(5000.0, 0.0)).unwrap();
        assert!(approx(sizes.primary, 1100.0));
        assert!(approx(sizes.knob, 1100.0));
    }

    #[test]
    fn vertical_split_reads_y() {
        let c = SplitConstraints::default();
        let mut s = PanelSplit::new(Axis::Y, c, -250.0).unwrap();
        s.begin(Vec2::new(0.0, 0.0));
        let sizes = s.drag(Vec2::new(300.0, 100.0)).unwrap();
        // -150 sits at 0.7 of [-500, 0].
        assert!(approx(sizes.primary, 700.0));
        assert!(approx(sizes.secondary, 300.0));
    }

    #[test]
    fn drag_without_begin_does_nothing() {
        let mut s = horizontal();
        assert_eq!(s.drag(Vec2::new(10.0, 0.0)), None);
        s.begin(Vec2::zero());
        s.end();
        assert!(!s.is_dragging());
        assert_eq!(s.drag(Vec2::new(10.0, 0.0)), None);
    }

    #[test]
    fn constraint_validation() {
        assert!(SplitConstraints::default().validate().is_ok());
        let c = SplitConstraints { min_panel_extent: 600.0, ..SplitConstraints::default() };
        assert!(matches!(c.validate(), Err(ConfigError::PanelsExceedTotal { .. })));
        let c = SplitConstraints { knob_min: 3.0, knob_max: 3.0, ..SplitConstraints::default() };
        assert!(matches!(c.validate(), Err(ConfigError::DegenerateKnobRange { .. })));
        assert_eq!(c.sizes_for_knob(3.0), None);
    }
}
