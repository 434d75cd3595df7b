//! The two-level grid: a track of rows, and one track of cells per row.
//!
//! `GridLayout` is the single source of truth for weights. Keys are resolved
//! through its lookup tables; everything downstream (dividers, the scene,
//! the host's layout pass) works with indices and reads geometry back from
//! the weights.

use std::collections::{HashMap, HashSet};

use tessel_engine::coords::{Axis, Rect, Vec2};

use crate::error::BuildError;
use crate::key::{CellKey, Key, RowKey};
use crate::track::{Cell, ResizeRules, Track};

// ── Structure description ─────────────────────────────────────────────────

/// A cell as declared by the host. `weight` is a relative hint used only
/// when the cell's track has no surviving weights to inherit.
#[derive(Debug, Clone, PartialEq)]
pub struct CellSpec {
    pub key: CellKey,
    pub weight: Option<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowSpec {
    pub key: RowKey,
    pub weight: Option<f32>,
    pub cells: Vec<CellSpec>,
}

impl RowSpec {
    pub fn new(key: impl Into<RowKey>) -> Self {
        Self { key: key.into(), weight: None, cells: Vec::new() }
    }

    pub fn weight(mut self, weight: f32) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn cell(mut self, key: impl Into<CellKey>) -> Self {
        self.cells.push(CellSpec { key: key.into(), weight: None });
        self
    }

    pub fn weighted_cell(mut self, key: impl Into<CellKey>, weight: f32) -> Self {
        self.cells.push(CellSpec { key: key.into(), weight: Some(weight) });
        self
    }
}

/// What the grid looks like: rows top to bottom, cells left to right.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridStructure {
    pub rows: Vec<RowSpec>,
}

impl GridStructure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(mut self, row: RowSpec) -> Self {
        self.rows.push(row);
        self
    }

    /// Row keys must be unique, cell keys must be unique across the whole
    /// grid, and declared weights must be finite and positive.
    pub fn validate(&self) -> Result<(), BuildError> {
        let mut rows = HashSet::new();
        let mut cells = HashSet::new();
        for row in &self.rows {
            if !rows.insert(row.key.as_str()) {
                return Err(BuildError::DuplicateRow(row.key.clone()));
            }
            check_weight(&row.key, row.weight)?;
            for cell in &row.cells {
                if !cells.insert(cell.key.as_str()) {
                    return Err(BuildError::DuplicateCell(cell.key.clone()));
                }
                check_weight(&cell.key, cell.weight)?;
            }
        }
        Ok(())
    }
}

fn check_weight(key: &Key, weight: Option<f32>) -> Result<(), BuildError> {
    match weight {
        Some(w) if !w.is_finite() || w <= 0.0 => {
            Err(BuildError::InvalidWeight { key: key.clone(), weight: w })
        }
        _ => Ok(()),
    }
}

// ── Addressing ────────────────────────────────────────────────────────────

/// Which row tracks a column resize applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackSelector {
    /// Every row at once.
    All,
    Row(usize),
}

/// Position of a cell in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellAddr {
    pub row: usize,
    pub cell: usize,
}

impl CellAddr {
    pub const fn new(row: usize, cell: usize) -> Self {
        Self { row, cell }
    }
}

/// A cell's pixel rectangle, as produced by [`GridLayout::cell_rects`].
#[derive(Debug, Clone, PartialEq)]
pub struct CellRect<'a> {
    pub addr: CellAddr,
    pub key: &'a CellKey,
    pub rect: Rect,
}

// ── GridLayout ────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct GridLayout {
    rules: ResizeRules,
    rows: Track,
    columns: Vec<Track>,
    row_index: HashMap<RowKey, usize>,
    cell_index: HashMap<CellKey, CellAddr>,
}

impl GridLayout {
    pub fn new(structure: &GridStructure, rules: ResizeRules) -> Result<Self, BuildError> {
        rules.validate()?;
        structure.validate()?;

        let mut grid = Self {
            rules,
            rows: Track::default(),
            columns: Vec::new(),
            row_index: HashMap::new(),
            cell_index: HashMap::new(),
        };
        grid.apply_structure(structure);
        Ok(grid)
    }

    pub fn rules(&self) -> &ResizeRules {
        &self.rules
    }

    /// The track of row heights.
    pub fn rows(&self) -> &Track {
        &self.rows
    }

    /// The track of cell widths in row `row`.
    pub fn row(&self, row: usize) -> Option<&Track> {
        self.columns.get(row)
    }

    pub fn row_count(&self) -> usize {
        self.columns.len()
    }

    pub fn locate_row(&self, key: &str) -> Option<usize> {
        self.row_index.get(key).copied()
    }

    pub fn locate_cell(&self, key: &str) -> Option<CellAddr> {
        self.cell_index.get(key).copied()
    }

    pub fn cell_weight(&self, addr: CellAddr) -> Option<f32> {
        self.columns.get(addr.row)?.weight(addr.cell)
    }

    // ── Structure ─────────────────────────────────────────────────────────

    /// Re-read the grid from a new structure description.
    ///
    /// Rows and cells whose keys survive keep their weights. Newcomers get
    /// the mean of the survivors in their track; a track with no survivors
    /// starts from the declared weights (1 when absent). Every track is then
    /// normalized. On error the grid is left untouched.
    pub fn rebuild(&mut self, structure: &GridStructure) -> Result<(), BuildError> {
        structure.validate()?;
        self.apply_structure(structure);
        Ok(())
    }

    fn apply_structure(&mut self, structure: &GridStructure) {
        let min_ratio = self.rules.min_ratio;

        let rows = seed_track(
            structure.rows.iter().map(|r| (r.key.clone(), r.weight)),
            |key| self.locate_row(key).and_then(|i| self.rows.weight(i)),
            min_ratio,
        );
        let columns: Vec<Track> = structure
            .rows
            .iter()
            .map(|row| {
                seed_track(
                    row.cells.iter().map(|c| (c.key.clone(), c.weight)),
                    |key| self.locate_cell(key).and_then(|a| self.cell_weight(a)),
                    min_ratio,
                )
            })
            .collect();

        self.row_index = structure
            .rows
            .iter()
            .enumerate()
            .map(|(i, r)| (r.key.clone(), i))
            .collect();
        self.cell_index = structure
            .rows
            .iter()
            .enumerate()
            .flat_map(|(r, row)| {
                row.cells.iter().enumerate().map(move |(c, cell)| (cell.key.clone(), CellAddr::new(r, c)))
            })
            .collect();
        self.rows = rows;
        self.columns = columns;

        log::debug!(
            "grid rebuilt: {} rows, {} cells",
            self.row_index.len(),
            self.cell_index.len()
        );
    }

    // ── Resize ────────────────────────────────────────────────────────────

    /// Move the leading edge of cell `cell` to `coord` in the selected rows.
    pub fn resize_columns(&mut self, rows: TrackSelector, cell: usize, coord: f32) -> bool {
        let rules = self.rules;
        match rows {
            TrackSelector::All => self
                .columns
                .iter_mut()
                .fold(false, |changed, t| t.resize_boundary(cell, coord, &rules) | changed),
            TrackSelector::Row(r) => self
                .columns
                .get_mut(r)
                .is_some_and(|t| t.resize_boundary(cell, coord, &rules)),
        }
    }

    /// Move the top edge of row `row` to `coord`.
    pub fn resize_rows(&mut self, row: usize, coord: f32) -> bool {
        let rules = self.rules;
        self.rows.resize_boundary(row, coord, &rules)
    }

    /// Repair every track after direct weight edits.
    pub fn normalize(&mut self) {
        let min_ratio = self.rules.min_ratio;
        self.rows.normalize(min_ratio);
        for t in &mut self.columns {
            t.normalize(min_ratio);
        }
    }

    /// Mutable access to one row's cells, for bulk edits such as
    /// [`Track::scale_weight_range`].
    pub fn row_mut(&mut self, row: usize) -> Option<&mut Track> {
        self.columns.get_mut(row)
    }

    // ── Geometry ──────────────────────────────────────────────────────────

    pub fn row_rect(&self, row: usize, bounds: Rect) -> Option<Rect> {
        let (y, h) = self.rows.spans(bounds.origin.y, bounds.size.y).nth(row)?;
        Some(Rect::new(bounds.origin.x, y, bounds.size.x, h))
    }

    pub fn cell_rect(&self, addr: CellAddr, bounds: Rect) -> Option<Rect> {
        let row = self.row_rect(addr.row, bounds)?;
        let (x, w) = self.columns.get(addr.row)?.spans(row.origin.x, row.size.x).nth(addr.cell)?;
        Some(Rect::new(x, row.origin.y, w, row.size.y))
    }

    /// Every cell's rectangle, rows top to bottom, cells left to right.
    pub fn cell_rects(&self, bounds: Rect) -> Vec<CellRect<'_>> {
        let mut out = Vec::new();
        for (r, (y, h)) in self.rows.spans(bounds.origin.y, bounds.size.y).enumerate() {
            let Some(track) = self.columns.get(r) else { continue };
            for ((c, cell), (x, w)) in track
                .cells()
                .iter()
                .enumerate()
                .zip(track.spans(bounds.origin.x, bounds.size.x))
            {
                out.push(CellRect {
                    addr: CellAddr::new(r, c),
                    key: &cell.key,
                    rect: Rect::new(x, y, w, h),
                });
            }
        }
        out
    }

    /// Where the handle for the boundary ahead of `target` sits in `bounds`.
    ///
    /// For [`Axis::X`] this is the edge between cells `target.cell - 1` and
    /// `target.cell` of row `target.row`, centred vertically on that row.
    /// For [`Axis::Y`] it is the top edge of row `target.row`, centred
    /// horizontally on `target.cell` when that cell exists. Returns `None`
    /// when the boundary does not exist.
    pub fn handle_position(&self, target: CellAddr, axis: Axis, bounds: Rect) -> Option<Vec2> {
        match axis {
            Axis::X => {
                let track = self.columns.get(target.row)?;
                if target.cell == 0 || target.cell >= track.len() {
                    return None;
                }
                let along = track.boundary(target.cell)?;
                let row = self.row_rect(target.row, bounds)?;
                Some(Vec2::new(bounds.origin.x + along * bounds.size.x, row.center().y))
            }
            Axis::Y => {
                if target.row == 0 || target.row >= self.rows.len() {
                    return None;
                }
                let along = self.rows.boundary(target.row)?;
                let x = self
                    .cell_rect(target, bounds)
                    .map_or(bounds.center().x, |r| r.center().x);
                Some(Vec2::new(x, bounds.origin.y + along * bounds.size.y))
            }
        }
    }
}

/// Build a normalized track from declared `(key, weight)` pairs, inheriting
/// weights for keys `prior` knows about.
fn seed_track(
    entries: impl Iterator<Item = (Key, Option<f32>)>,
    prior: impl Fn(&str) -> Option<f32>,
    min_ratio: f32,
) -> Track {
    let entries: Vec<(Key, Option<f32>, Option<f32>)> = entries
        .map(|(key, declared)| {
            let kept = prior(key.as_str());
            (key, declared, kept)
        })
        .collect();

    let kept: Vec<f32> = entries.iter().filter_map(|(_, _, k)| *k).collect();
    let cells = if kept.is_empty() {
        entries
            .into_iter()
            .map(|(key, declared, _)| Cell::new(key, declared.unwrap_or(1.0)))
            .collect()
    } else {
        let mean = kept.iter().sum::<f32>() / kept.len() as f32;
        entries
            .into_iter()
            .map(|(key, _, k)| Cell::new(key, k.unwrap_or(mean)))
            .collect()
    };
    Track::normalized(cells, min_ratio)
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn weights(t: &Track) -> Vec<f32> {
        t.weights().collect()
    }

    fn editor() -> GridStructure {
        GridStructure::new()
            .row(RowSpec::new("top").weight(3.0).weighted_cell("tree", 1.0).weighted_cell("editor", 3.0))
            .row(RowSpec::new("bottom").weight(1.0).cell("console"))
    }

    fn grid() -> GridLayout {
        GridLayout::new(&editor(), ResizeRules::default()).unwrap()
    }

    #[test]
    fn declared_weights_are_normalized() {
        let g = grid();
        assert_eq!(weights(g.rows()), vec![0.75, 0.25]);
        assert_eq!(weights(g.row(0).unwrap()), vec![0.25, 0.75]);
        assert_eq!(weights(g.row(1).unwrap()), vec![1.0]);
    }

    #[test]
    fn lookup_tables() {
        let g = grid();
        assert_eq!(g.locate_row("bottom"), Some(1));
        assert_eq!(g.locate_cell("editor"), Some(CellAddr::new(0, 1)));
        assert_eq!(g.locate_cell("console"), Some(CellAddr::new(1, 0)));
        assert_eq!(g.locate_cell("nope"), None);
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let s = GridStructure::new().row(RowSpec::new("a").cell("x")).row(RowSpec::new("b").cell("x"));
        assert_eq!(
            GridLayout::new(&s, ResizeRules::default()).unwrap_err(),
            BuildError::DuplicateCell(Key::from("x"))
        );
        let s = GridStructure::new().row(RowSpec::new("a")).row(RowSpec::new("a"));
        assert!(matches!(s.validate(), Err(BuildError::DuplicateRow(_))));
    }

    #[test]
    fn bad_weight_is_rejected() {
        let s = GridStructure::new().row(RowSpec::new("a").weighted_cell("x", -1.0));
        assert!(matches!(s.validate(), Err(BuildError::InvalidWeight { .. })));
    }

    #[test]
    fn resize_one_row_or_all() {
        let s = GridStructure::new()
            .row(RowSpec::new("a").cell("a0").cell("a1"))
            .row(RowSpec::new("b").cell("b0").cell("b1"));
        let mut g = GridLayout::new(&s, ResizeRules::default()).unwrap();

        assert!(g.resize_columns(TrackSelector::Row(1), 1, 0.8));
        assert_eq!(weights(g.row(0).unwrap()), vec![0.5, 0.5]);
        assert!(approx(g.row(1).unwrap().weight(0).unwrap(), 0.8));

        assert!(g.resize_columns(TrackSelector::All, 1, 0.3));
        assert!(approx(g.row(0).unwrap().weight(0).unwrap(), 0.3));
        assert!(approx(g.row(1).unwrap().weight(0).unwrap(), 0.3));
    }

    #[test]
    fn invalid_targets_are_no_ops() {
        let mut g = grid();
        assert!(!g.resize_columns(TrackSelector::Row(5), 1, 0.5));
        assert!(!g.resize_columns(TrackSelector::Row(1), 1, 0.5));
        assert!(!g.resize_rows(0, 0.5));
        assert!(!g.resize_rows(2, 0.5));
        assert_eq!(weights(g.rows()), vec![0.75, 0.25]);
    }

    #[test]
    fn resize_rows_moves_row_edge() {
        let mut g = grid();
        assert!(g.resize_rows(1, 0.6));
        assert!(approx(g.rows().weight(0).unwrap(), 0.6));
        assert!(approx(g.rows().weight(1).unwrap(), 0.4));
    }

    #[test]
    fn rebuild_keeps_surviving_weights() {
        let mut g = grid();
        g.resize_columns(TrackSelector::Row(0), 1, 0.4);

        let s = GridStructure::new()
            .row(RowSpec::new("top").cell("tree").cell("editor").cell("preview"))
            .row(RowSpec::new("bottom").cell("console"));
        g.rebuild(&s).unwrap();

        // tree 0.4 and editor 0.6 survive; preview enters at their mean 0.5.
        let w = weights(g.row(0).unwrap());
        assert!(approx(w[0], 0.4 / 1.5));
        assert!(approx(w[1], 0.6 / 1.5));
        assert!(approx(w[2], 0.5 / 1.5));
        assert_eq!(g.locate_cell("preview"), Some(CellAddr::new(0, 2)));
        assert_eq!(weights(g.rows()), vec![0.75, 0.25]);
    }

    #[test]
    fn failed_rebuild_leaves_grid_alone() {
        let mut g = grid();
        let s = GridStructure::new().row(RowSpec::new("x").cell("dup").cell("dup"));
        assert!(g.rebuild(&s).is_err());
        assert_eq!(g.locate_cell("tree"), Some(CellAddr::new(0, 0)));
    }

    #[test]
    fn cell_rects_tile_bounds() {
        let g = grid();
        let rects = g.cell_rects(Rect::new(0.0, 0.0, 400.0, 200.0));
        assert_eq!(rects.len(), 3);
        assert_eq!(rects[0].key.as_str(), "tree");
        assert_eq!(rects[0].rect, Rect::new(0.0, 0.0, 100.0, 150.0));
        assert_eq!(rects[1].rect, Rect::new(100.0, 0.0, 300.0, 150.0));
        assert_eq!(rects[2].rect, Rect::new(0.0, 150.0, 400.0, 50.0));
        assert_eq!(g.cell_rect(CellAddr::new(0, 1), Rect::new(0.0, 0.0, 400.0, 200.0)), Some(rects[1].rect));
    }

    #[test]
    fn handle_positions() {
        let g = grid();
        let b = Rect::new(0.0, 0.0, 400.0, 200.0);
        assert_eq!(g.handle_position(CellAddr::new(0, 1), Axis::X, b), Some(Vec2::new(100.0, 75.0)));
        assert_eq!(g.handle_position(CellAddr::new(1, 0), Axis::Y, b), Some(Vec2::new(200.0, 150.0)));
        assert_eq!(g.handle_position(CellAddr::new(0, 0), Axis::X, b), None);
        assert_eq!(g.handle_position(CellAddr::new(0, 0), Axis::Y, b), None);
        assert_eq!(g.handle_position(CellAddr::new(1, 1), Axis::X, b), None);
    }
}
