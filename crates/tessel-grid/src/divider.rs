//! Maps pointer drags on a divider handle to grid boundary resizes.
//!
//! A divider does not own any layout state. It holds its configuration, its
//! drag state, and a cached handle rectangle that is re-read from the grid
//! weights on every [`Divider::sync`].

use tessel_engine::coords::{Axis, Rect, Vec2, ViewTransform};
use tessel_engine::input::{PointerEvent, PointerId, PointerPhase};

use crate::error::ConfigError;
use crate::grid::{CellAddr, GridLayout, TrackSelector};

/// Coordinates closer than this to the last applied one are skipped.
pub const MOVE_EPSILON: f32 = 1e-3;

// ── Configuration ─────────────────────────────────────────────────────────

/// Which way the handle travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DividerDirection {
    /// Travels along X and resizes the cells of a row.
    #[default]
    Horizontal,
    /// Travels along Y and resizes the rows.
    Vertical,
}

impl DividerDirection {
    pub fn axis(self) -> Axis {
        match self {
            DividerDirection::Horizontal => Axis::X,
            DividerDirection::Vertical => Axis::Y,
        }
    }
}

/// How far the divider's effect reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlRange {
    /// Only the target row; the handle spans that row (or cell).
    #[default]
    LocalLine,
    /// Every row at once; the handle spans the whole grid.
    AllLine,
}

/// The boundary a divider controls: the leading edge of `cell` in `row`
/// for horizontal dividers, the top edge of `row` for vertical ones.
pub type DividerTarget = CellAddr;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DividerConfig {
    pub direction: DividerDirection,
    pub control_range: ControlRange,
    /// Lowest normalized coordinate the divider will request.
    pub min_movement_ratio: f32,
    /// Highest normalized coordinate the divider will request.
    pub max_movement_ratio: f32,
    /// Map the pointer fraction `n` to `1 - n`.
    pub invert_axis: bool,
    pub target: DividerTarget,
    /// Half-width of the grabbable strip around the handle, in logical px.
    pub grab_radius: f32,
}

impl Default for DividerConfig {
    fn default() -> Self {
        Self {
            direction: DividerDirection::Horizontal,
            control_range: ControlRange::LocalLine,
            min_movement_ratio: 0.01,
            max_movement_ratio: 0.99,
            invert_axis: false,
            target: DividerTarget::new(0, 1),
            grab_radius: 12.0,
        }
    }
}

impl DividerConfig {
    pub fn horizontal(row: usize, cell: usize) -> Self {
        Self { target: DividerTarget::new(row, cell), ..Self::default() }
    }

    pub fn vertical(row: usize) -> Self {
        Self {
            direction: DividerDirection::Vertical,
            target: DividerTarget::new(row, 0),
            ..Self::default()
        }
    }

    pub fn with_range(mut self, range: ControlRange) -> Self {
        self.control_range = range;
        self
    }

    pub fn with_movement(mut self, min: f32, max: f32) -> Self {
        self.min_movement_ratio = min;
        self.max_movement_ratio = max;
        self
    }

    pub fn inverted(mut self, invert: bool) -> Self {
        self.invert_axis = invert;
        self
    }

    pub fn with_grab_radius(mut self, radius: f32) -> Self {
        self.grab_radius = radius;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.min_movement_ratio, self.max_movement_ratio);
        let in_unit = |v: f32| v.is_finite() && (0.0..=1.0).contains(&v);
        if !in_unit(min) || !in_unit(max) || min > max {
            return Err(ConfigError::InvalidMovementRange { min, max });
        }
        if !self.grab_radius.is_finite() || self.grab_radius < 0.0 {
            return Err(ConfigError::InvalidGrabRadius(self.grab_radius));
        }
        Ok(())
    }
}

// ── Divider ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    Dragging { pointer: PointerId, last_coord: Option<f32> },
}

/// What a pointer event did to a divider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DividerEffect {
    /// The event was not for this divider.
    Ignored,
    /// A press landed on the handle; the pointer is now captured.
    Grabbed,
    /// The drag requested `coord`; `changed` is false when the grid was
    /// already at its limit.
    Resized { coord: f32, changed: bool },
    /// The pointer moved less than [`MOVE_EPSILON`] along the axis.
    Unchanged,
    /// The captured pointer was released or cancelled.
    Released { changed: bool },
}

#[derive(Debug, Clone)]
pub struct Divider {
    config: DividerConfig,
    state: DragState,
    handle: Option<Rect>,
}

impl Divider {
    pub fn new(config: DividerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, state: DragState::Idle, handle: None })
    }

    pub fn config(&self) -> &DividerConfig {
        &self.config
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn dragging_pointer(&self) -> Option<PointerId> {
        match self.state {
            DragState::Dragging { pointer, .. } => Some(pointer),
            DragState::Idle => None,
        }
    }

    /// Grabbable strip around the handle, in logical px. `None` while the
    /// target boundary does not exist in the grid.
    pub fn handle(&self) -> Option<Rect> {
        self.handle
    }

    pub fn handle_position(&self) -> Option<Vec2> {
        self.handle.map(Rect::center)
    }

    /// Re-read the handle geometry from the grid weights.
    pub fn sync(&mut self, grid: &GridLayout, bounds: Rect) {
        self.handle = self.compute_handle(grid, bounds);
    }

    fn compute_handle(&self, grid: &GridLayout, bounds: Rect) -> Option<Rect> {
        let axis = self.config.direction.axis();
        let target = self.config.target;
        let pos = grid.handle_position(target, axis, bounds)?;

        let start = bounds.start(axis);
        let along = pos.along(axis);
        let along = if self.config.invert_axis {
            start + bounds.extent(axis) - (along - start)
        } else {
            along
        };

        let cross_rect = match (self.config.control_range, self.config.direction) {
            (ControlRange::AllLine, _) => bounds,
            (ControlRange::LocalLine, DividerDirection::Horizontal) => grid.row_rect(target.row, bounds)?,
            (ControlRange::LocalLine, DividerDirection::Vertical) => {
                grid.cell_rect(target, bounds).unwrap_or(bounds)
            }
        };
        let cross = axis.cross();
        let (c0, cw) = (cross_rect.start(cross), cross_rect.extent(cross));
        let r = self.config.grab_radius;

        Some(match axis {
            Axis::X => Rect::new(along - r, c0, 2.0 * r, cw),
            Axis::Y => Rect::new(c0, along - r, cw, 2.0 * r),
        })
    }

    /// Whether a press at logical position `p` grabs this divider.
    pub fn hit(&self, p: Vec2) -> bool {
        self.handle.is_some_and(|h| h.contains(p))
    }

    /// The normalized coordinate a pointer at logical position `local`
    /// requests, after inversion and the movement clamp.
    pub fn coordinate_for(&self, local: Vec2, bounds: Rect) -> Option<f32> {
        let n = bounds.fraction_along(local, self.config.direction.axis())?;
        if !n.is_finite() {
            return None;
        }
        let n = if self.config.invert_axis { 1.0 - n } else { n };
        Some(n.clamp(self.config.min_movement_ratio, self.config.max_movement_ratio))
    }

    /// Drop any active drag without touching the grid.
    pub fn release(&mut self) {
        if let DragState::Dragging { pointer, .. } = self.state {
            log::debug!("divider drag by {pointer} dropped");
        }
        self.state = DragState::Idle;
    }

    // ── Event handling ────────────────────────────────────────────────────

    /// Feed one pointer event in screen space.
    pub fn handle_pointer(
        &mut self,
        ev: &PointerEvent,
        grid: &mut GridLayout,
        bounds: Rect,
        view: ViewTransform,
    ) -> DividerEffect {
        let local = view.to_logical(ev.position);

        match self.state {
            DragState::Idle => {
                if ev.phase == PointerPhase::Began && self.hit(local) {
                    log::debug!("divider grabbed by {} at {:?}", ev.id, local);
                    self.state = DragState::Dragging { pointer: ev.id, last_coord: None };
                    DividerEffect::Grabbed
                } else {
                    DividerEffect::Ignored
                }
            }
            DragState::Dragging { pointer, .. } if pointer != ev.id => DividerEffect::Ignored,
            DragState::Dragging { .. } => match ev.phase {
                PointerPhase::Began => DividerEffect::Ignored,
                PointerPhase::Moved => match self.drag_to(local, grid, bounds) {
                    Some((coord, changed)) => DividerEffect::Resized { coord, changed },
                    None => DividerEffect::Unchanged,
                },
                PointerPhase::Ended => {
                    let changed = self.drag_to(local, grid, bounds).is_some_and(|(_, c)| c);
                    log::debug!("divider released by {}", ev.id);
                    self.state = DragState::Idle;
                    DividerEffect::Released { changed }
                }
                PointerPhase::Cancelled => {
                    log::debug!("divider drag by {} cancelled", ev.id);
                    self.state = DragState::Idle;
                    DividerEffect::Released { changed: false }
                }
            },
        }
    }

    fn drag_to(&mut self, local: Vec2, grid: &mut GridLayout, bounds: Rect) -> Option<(f32, bool)> {
        let DragState::Dragging { pointer, last_coord } = self.state else {
            return None;
        };
        let coord = self.coordinate_for(local, bounds)?;
        if last_coord.is_some_and(|last| (coord - last).abs() < MOVE_EPSILON) {
            return None;
        }

        let target = self.config.target;
        let changed = match self.config.direction {
            DividerDirection::Horizontal => {
                let rows = match self.config.control_range {
                    ControlRange::LocalLine => TrackSelector::Row(target.row),
                    ControlRange::AllLine => TrackSelector::All,
                };
                grid.resize_columns(rows, target.cell, coord)
            }
            DividerDirection::Vertical => grid.resize_rows(target.row, coord),
        };
        log::trace!("divider drag by {pointer} -> {coord:.4} (changed: {changed})");

        self.state = DragState::Dragging { pointer, last_coord: Some(coord) };
        Some((coord, changed))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
