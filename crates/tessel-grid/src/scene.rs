use std::collections::HashMap;

use tessel_engine::coords::{Rect, ViewTransform};
use tessel_engine::input::{InputEvent, InputFrame, PointerEvent, PointerId};

use crate::divider::{Divider, DividerConfig, DividerEffect};
use crate::error::{BuildError, ConfigError};
use crate::grid::{CellRect, GridLayout, GridStructure};
use crate::key::DividerKey;

// ── FrameReport ───────────────────────────────────────────────────────────

/// What happened during one [`GridScene::frame`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Dividers whose drag changed at least one weight, in first-change order.
    pub resized: Vec<DividerKey>,
    pub grabbed: Vec<DividerKey>,
    pub released: Vec<DividerKey>,
    /// `true` when any weight changed; the host should re-run its layout.
    pub grid_changed: bool,
}

impl FrameReport {
    fn mark_resized(&mut self, key: &DividerKey) {
        self.grid_changed = true;
        if !self.resized.contains(key) {
            self.resized.push(key.clone());
        }
    }
}

// ── GridScene ─────────────────────────────────────────────────────────────

/// Owns a grid, its bounds, and the dividers that drive it.
///
/// Each frame, pointer events are routed to dividers (a captured pointer
/// goes to its owner, a press goes to the first divider whose handle it
/// hits), resizes are applied, and every handle is re-read from the weights.
#[derive(Debug, Clone)]
pub struct GridScene {
    grid: GridLayout,
    bounds: Rect,
    view: ViewTransform,
    dividers: Vec<(DividerKey, Divider)>,
    divider_index: HashMap<DividerKey, usize>,
    captures: HashMap<PointerId, usize>,
}

impl GridScene {
    pub fn new(grid: GridLayout, bounds: Rect) -> Self {
        Self {
            grid,
            bounds,
            view: ViewTransform::IDENTITY,
            dividers: Vec::new(),
            divider_index: HashMap::new(),
            captures: HashMap::new(),
        }
    }

    pub fn with_view(mut self, view: ViewTransform) -> Self {
        self.view = view;
        self
    }

    pub fn grid(&self) -> &GridLayout {
        &self.grid
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn view(&self) -> ViewTransform {
        self.view
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.sync();
    }

    pub fn set_view(&mut self, view: ViewTransform) {
        self.view = view;
    }

    pub fn add_divider(
        &mut self,
        key: impl Into<DividerKey>,
        config: DividerConfig,
    ) -> Result<(), ConfigError> {
        let key = key.into();
        if self.divider_index.contains_key(&key) {
            return Err(ConfigError::DuplicateDivider(key));
        }
        let mut divider = Divider::new(config)?;
        divider.sync(&self.grid, self.bounds);
        if divider.handle().is_none() {
            log::warn!("divider `{key}` targets a boundary the grid does not have; it stays inert");
        }
        self.divider_index.insert(key.clone(), self.dividers.len());
        self.dividers.push((key, divider));
        Ok(())
    }

    pub fn divider(&self, key: &str) -> Option<&Divider> {
        let i = *self.divider_index.get(key)?;
        self.dividers.get(i).map(|(_, d)| d)
    }

    pub fn dividers(&self) -> impl Iterator<Item = (&DividerKey, &Divider)> + '_ {
        self.dividers.iter().map(|(k, d)| (k, d))
    }

    pub fn cell_rects(&self) -> Vec<CellRect<'_>> {
        self.grid.cell_rects(self.bounds)
    }

    /// Forward a structure change to the grid. Active drags are dropped,
    /// since their target indices may now mean something else.
    pub fn rebuild(&mut self, structure: &GridStructure) -> Result<(), BuildError> {
        self.grid.rebuild(structure)?;
        self.release_all();
        self.sync();
        Ok(())
    }

    /// Re-read every handle from the grid weights.
    pub fn sync(&mut self) {
        for (_, d) in &mut self.dividers {
            d.sync(&self.grid, self.bounds);
        }
    }

    fn release_all(&mut self) {
        for (_, d) in &mut self.dividers {
            d.release();
        }
        self.captures.clear();
    }

    // ── Frame ─────────────────────────────────────────────────────────────

    pub fn frame(&mut self, input: &InputFrame) -> FrameReport {
        let mut report = FrameReport::default();

        for ev in &input.events {
            match ev {
                InputEvent::Pointer(p) => self.route(p, &mut report),
                InputEvent::Focused(false) => {
                    for (key, d) in &self.dividers {
                        if d.is_dragging() {
                            report.released.push(key.clone());
                        }
                    }
                    self.release_all();
                }
                InputEvent::Focused(true) => {}
            }
        }

        self.sync();
        report
    }

    fn route(&mut self, ev: &PointerEvent, report: &mut FrameReport) {
        if let Some(&i) = self.captures.get(&ev.id) {
            let (key, divider) = &mut self.dividers[i];
            match divider.handle_pointer(ev, &mut self.grid, self.bounds, self.view) {
                DividerEffect::Resized { changed: true, .. } => report.mark_resized(key),
                DividerEffect::Released { changed } => {
                    if changed {
                        report.mark_resized(key);
                    }
                    report.released.push(key.clone());
                    self.captures.remove(&ev.id);
                }
                _ => {}
            }
            return;
        }

        for (i, (key, divider)) in self.dividers.iter_mut().enumerate() {
            if divider.is_dragging() {
                continue;
            }
            if divider.handle_pointer(ev, &mut self.grid, self.bounds, self.view) == DividerEffect::Grabbed {
                report.grabbed.push(key.clone());
                self.captures.insert(ev.id, i);
                return;
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
