//! Tracks of weighted cells and the boundary redistributor.
//!
//! A track is one row of cells (column resize) or the column of rows (row
//! resize). Its weights always sum to 1 and never drop below the track's
//! floor; every mutation below preserves that except
//! [`Track::scale_weight_range`], which is documented as approximate.

use std::ops::Range;

use crate::error::ConfigError;
use crate::key::CellKey;

/// Default minimum share of a track that any cell keeps.
pub const MINIMUM_RATIO: f32 = 0.05;

/// Tolerance for the sum-to-one invariant.
pub const WEIGHT_EPSILON: f32 = 1e-4;

/// Weight changes at or below this are not reported as a change.
const CHANGE_EPSILON: f32 = 1e-6;

// ── ResizeRules ───────────────────────────────────────────────────────────

/// How the cells ahead of a dragged boundary absorb the movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Redistribution {
    /// Only the cell directly ahead of the boundary grows or shrinks. Cells
    /// further back are touched only when that cell would fall below the floor.
    #[default]
    Adjacent,
    /// Every cell ahead of the boundary is rescaled proportionally.
    Proportional,
}

/// Parameters shared by every resize on a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeRules {
    pub min_ratio: f32,
    pub redistribution: Redistribution,
}

impl Default for ResizeRules {
    fn default() -> Self {
        Self { min_ratio: MINIMUM_RATIO, redistribution: Redistribution::Adjacent }
    }
}

impl ResizeRules {
    pub fn with_min_ratio(mut self, min_ratio: f32) -> Self {
        self.min_ratio = min_ratio;
        self
    }

    pub fn with_redistribution(mut self, redistribution: Redistribution) -> Self {
        self.redistribution = redistribution;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_ratio.is_finite() || !(0.0..1.0).contains(&self.min_ratio) {
            return Err(ConfigError::InvalidMinRatio(self.min_ratio));
        }
        Ok(())
    }
}

// ── Cell ──────────────────────────────────────────────────────────────────

/// One resizable element of a track.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub key: CellKey,
    weight: f32,
}

impl Cell {
    pub fn new(key: impl Into<CellKey>, weight: f32) -> Self {
        Self { key: key.into(), weight }
    }

    #[inline]
    pub fn weight(&self) -> f32 {
        self.weight
    }
}

// ── Track ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    cells: Vec<Cell>,
}

impl Track {
    /// Wrap cells as-is. Call [`Track::normalize`] unless the weights are
    /// already known to be valid.
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Wrap cells and normalize them under `min_ratio`.
    pub fn normalized(cells: Vec<Cell>, min_ratio: f32) -> Self {
        let mut track = Self::new(cells);
        track.normalize(min_ratio);
        track
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn weight(&self, index: usize) -> Option<f32> {
        self.cells.get(index).map(Cell::weight)
    }

    pub fn weights(&self) -> impl Iterator<Item = f32> + '_ {
        self.cells.iter().map(Cell::weight)
    }

    pub fn total(&self) -> f32 {
        self.weights().sum()
    }

    /// The effective floor: `min_ratio`, lowered to `1 / len` when the track
    /// has too many cells for every one of them to get `min_ratio`.
    pub fn floor(&self, min_ratio: f32) -> f32 {
        if self.cells.is_empty() {
            return min_ratio;
        }
        min_ratio.min(1.0 / self.cells.len() as f32)
    }

    /// Normalized position of the leading edge of cell `index`.
    ///
    /// `boundary(0)` is 0 and `boundary(len)` is the track total.
    pub fn boundary(&self, index: usize) -> Option<f32> {
        if index > self.cells.len() {
            return None;
        }
        Some(self.cells[..index].iter().map(Cell::weight).sum())
    }

    /// `(offset, size)` of every cell when the track covers
    /// `[start, start + extent)`.
    pub fn spans(&self, start: f32, extent: f32) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.cells.iter().scan(start, move |cursor, cell| {
            let size = cell.weight * extent;
            let offset = *cursor;
            *cursor += size;
            Some((offset, size))
        })
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Rescale the weights so they sum to 1 with every cell at or above the
    /// floor. Non-finite and negative weights count as zero; an all-zero
    /// track is split evenly.
    pub fn normalize(&mut self, min_ratio: f32) {
        let floor = self.floor(min_ratio);
        let mut weights: Vec<f32> = self
            .weights()
            .map(|w| if w.is_finite() { w.max(0.0) } else { 0.0 })
            .collect();
        fill_floored(&mut weights, 1.0, floor);
        self.commit(weights);
    }

    /// Move the leading edge of cell `cell` to `coord`.
    ///
    /// `cell` is the first cell after the boundary, so it must be in
    /// `1..len`; anything else is ignored. `coord` is clamped to the
    /// interval where every cell can keep its floor. Returns whether any
    /// weight changed.
    pub fn resize_boundary(&mut self, cell: usize, coord: f32, rules: &ResizeRules) -> bool {
        let len = self.cells.len();
        if cell == 0 || cell >= len || !coord.is_finite() {
            return false;
        }

        let floor = self.floor(rules.min_ratio);
        let lo = cell as f32 * floor;
        let hi = (1.0 - (len - cell) as f32 * floor).max(lo);
        let coord = coord.max(lo).min(hi);

        let mut weights: Vec<f32> = self.weights().collect();
        let target = cell - 1;

        match rules.redistribution {
            Redistribution::Adjacent => {
                let before: f32 = weights[..target].iter().sum();
                let target_weight = coord - before;
                if target_weight >= floor {
                    weights[target] = target_weight;
                } else {
                    // The target bottoms out; the cells behind it give way.
                    weights[target] = floor;
                    fill_floored(&mut weights[..target], coord - floor, floor);
                }
            }
            Redistribution::Proportional => {
                fill_floored(&mut weights[..cell], coord, floor);
            }
        }
        fill_floored(&mut weights[cell..], 1.0 - coord, floor);

        let changed = self.commit(weights);
        if changed {
            log::trace!("boundary {cell} moved to {coord:.4}");
        }
        changed
    }

    /// Multiply the weights in `range` by `scale` and clamp each to the floor.
    ///
    /// The track is not renormalized afterwards, so its total drifts from 1
    /// by the scaled amount. Follow up with [`Track::normalize`] when the
    /// invariant matters.
    pub fn scale_weight_range(&mut self, range: Range<usize>, scale: f32, min_ratio: f32) {
        let floor = self.floor(min_ratio);
        let end = range.end.min(self.cells.len());
        let start = range.start.min(end);
        for cell in &mut self.cells[start..end] {
            let scaled = cell.weight * scale;
            cell.weight = if scaled.is_finite() { scaled.max(floor) } else { floor };
        }
    }

    fn commit(&mut self, weights: Vec<f32>) -> bool {
        let mut changed = false;
        for (cell, w) in self.cells.iter_mut().zip(weights) {
            if (cell.weight - w).abs() > CHANGE_EPSILON {
                changed = true;
            }
            cell.weight = w;
        }
        changed
    }
}

/// Spread `budget` over `weights` proportionally to their current values,
/// pinning any cell that would end up below `floor` at exactly `floor` and
/// re-spreading the remainder over the rest. An all-zero range is split
/// evenly. The result sums to `budget` whenever `budget >= len * floor`.
fn fill_floored(weights: &mut [f32], budget: f32, floor: f32) {
    let n = weights.len();
    if n == 0 {
        return;
    }

    let mut pinned = vec![false; n];
    loop {
        let pinned_count = pinned.iter().filter(|p| **p).count();
        let free_count = n - pinned_count;
        if free_count == 0 {
            let share = budget / n as f32;
            weights.iter_mut().for_each(|w| *w = share);
            return;
        }

        let free_budget = budget - pinned_count as f32 * floor;
        let free_sum: f32 = weights
            .iter()
            .zip(&pinned)
            .filter(|(_, p)| !**p)
            .map(|(w, _)| w.max(0.0))
            .sum();
        let share = |w: f32| {
            if free_sum > f32::EPSILON {
                w.max(0.0) * (free_budget / free_sum)
            } else {
                free_budget / free_count as f32
            }
        };

        let mut newly_pinned = false;
        for (w, p) in weights.iter().zip(pinned.iter_mut()) {
            if !*p && share(*w) < floor {
                *p = true;
                newly_pinned = true;
            }
        }

        if !newly_pinned {
            for (w, p) in weights.iter_mut().zip(&pinned) {
                *w = if *p { floor } else { share(*w) };
            }
            return;
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn track(weights: &[f32]) -> Track {
        Track::new(
            weights
                .iter()
                .enumerate()
                .map(|(i, w)| Cell::new(format!("c{i}"), *w))
                .collect(),
        )
    }

    fn assert_weights(t: &Track, expected: &[f32]) {
        let got: Vec<f32> = t.weights().collect();
        assert_eq!(got.len(), expected.len(), "{got:?} vs {expected:?}");
        for (g, e) in got.iter().zip(expected) {
            assert!((g - e).abs() < 1e-5, "{got:?} vs {expected:?}");
        }
    }

    fn assert_invariant(t: &Track, min_ratio: f32) {
        let floor = t.floor(min_ratio);
        assert!((t.total() - 1.0).abs() < WEIGHT_EPSILON, "total {}", t.total());
        for w in t.weights() {
            assert!(w >= floor - 1e-6, "weight {w} below floor {floor}");
        }
    }

    const ADJ: ResizeRules = ResizeRules { min_ratio: MINIMUM_RATIO, redistribution: Redistribution::Adjacent };
    const PROP: ResizeRules =
        ResizeRules { min_ratio: MINIMUM_RATIO, redistribution: Redistribution::Proportional };

    // ── resize_boundary ───────────────────────────────────────────────────

    #[test]
    fn two_cells_grow_first() {
        let mut t = track(&[0.5, 0.5]);
        assert!(t.resize_boundary(1, 0.8, &ADJ));
        assert_weights(&t, &[0.8, 0.2]);
    }

    #[test]
    fn two_cells_clamp_at_floor() {
        let mut t = track(&[0.5, 0.5]);
        t.resize_boundary(1, 0.02, &ADJ);
        assert_weights(&t, &[0.05, 0.95]);
    }

    #[test]
    fn four_cells_adjacent() {
        let mut t = track(&[0.25; 4]);
        t.resize_boundary(2, 0.6, &ADJ);
        assert_weights(&t, &[0.25, 0.35, 0.2, 0.2]);
    }

    #[test]
    fn four_cells_proportional() {
        let mut t = track(&[0.25; 4]);
        t.resize_boundary(2, 0.6, &PROP);
        assert_weights(&t, &[0.3, 0.3, 0.2, 0.2]);
    }

    #[test]
    fn target_below_floor_shrinks_cells_behind() {
        let mut t = track(&[0.3, 0.3, 0.4]);
        t.resize_boundary(2, 0.32, &ADJ);
        assert_weights(&t, &[0.27, 0.05, 0.68]);
        assert_invariant(&t, MINIMUM_RATIO);
    }

    #[test]
    fn trailing_cells_pin_at_floor() {
        let mut t = track(&[0.4, 0.5, 0.1]);
        t.resize_boundary(1, 0.8, &ADJ);
        assert_weights(&t, &[0.8, 0.15, 0.05]);
    }

    #[test]
    fn coord_clamped_to_feasible_interval() {
        let mut t = track(&[0.25; 4]);
        t.resize_boundary(3, 1.0, &ADJ);
        assert_weights(&t, &[0.25, 0.25, 0.45, 0.05]);
        t.resize_boundary(1, 0.0, &ADJ);
        assert_eq!(t.weight(0), Some(0.05));
        assert_invariant(&t, MINIMUM_RATIO);
    }

    #[test]
    fn zero_trailing_weights_split_evenly() {
        let mut t = track(&[1.0, 0.0, 0.0]);
        t.resize_boundary(1, 0.6, &ADJ);
        assert_weights(&t, &[0.6, 0.2, 0.2]);
    }

    #[test]
    fn out_of_range_cells_are_ignored() {
        let mut t = track(&[0.5, 0.5]);
        assert!(!t.resize_boundary(0, 0.3, &ADJ));
        assert!(!t.resize_boundary(2, 0.3, &ADJ));
        assert!(!t.resize_boundary(7, 0.3, &ADJ));
        assert!(!t.resize_boundary(1, f32::NAN, &ADJ));
        assert_weights(&t, &[0.5, 0.5]);
    }

    #[test]
    fn resizing_to_current_boundary_is_a_no_op() {
        let mut t = track(&[0.2, 0.3, 0.5]);
        let at = t.boundary(2).unwrap();
        assert!(!t.resize_boundary(2, at, &ADJ));
        assert!(!t.resize_boundary(2, at, &PROP));
        assert_weights(&t, &[0.2, 0.3, 0.5]);
    }

    #[test]
    fn crowded_track_uses_lowered_floor() {
        let mut t = track(&[1.0 / 30.0; 30]);
        assert!((t.floor(MINIMUM_RATIO) - 1.0 / 30.0).abs() < 1e-7);
        t.resize_boundary(15, 0.9, &ADJ);
        assert_invariant(&t, MINIMUM_RATIO);
    }

    // ── normalize / scale ─────────────────────────────────────────────────

    #[test]
    fn normalize_rescales() {
        let mut t = track(&[1.0, 3.0]);
        t.normalize(MINIMUM_RATIO);
        assert_weights(&t, &[0.25, 0.75]);
    }

    #[test]
    fn normalize_lifts_tiny_cells() {
        let mut t = track(&[0.01, 0.99]);
        t.normalize(MINIMUM_RATIO);
        assert_weights(&t, &[0.05, 0.95]);
    }

    #[test]
    fn normalize_repairs_garbage() {
        let mut t = track(&[f32::NAN, -1.0, 0.0]);
        t.normalize(MINIMUM_RATIO);
        assert_weights(&t, &[1.0 / 3.0; 3]);
    }

    #[test]
    fn scale_range_does_not_renormalize() {
        let mut t = track(&[0.25; 4]);
        t.scale_weight_range(1..3, 0.1, MINIMUM_RATIO);
        assert_weights(&t, &[0.25, 0.05, 0.05, 0.25]);
        assert!((t.total() - 0.6).abs() < 1e-6);
        t.normalize(MINIMUM_RATIO);
        assert_invariant(&t, MINIMUM_RATIO);
    }

    #[test]
    fn scale_range_clips_to_track() {
        let mut t = track(&[0.5, 0.5]);
        t.scale_weight_range(1..9, 2.0, MINIMUM_RATIO);
        assert_weights(&t, &[0.5, 1.0]);
        t.scale_weight_range(5..9, 2.0, MINIMUM_RATIO);
        assert_weights(&t, &[0.5, 1.0]);
    }

    // ── geometry ──────────────────────────────────────────────────────────

    #[test]
    fn boundaries_and_spans() {
        let t = track(&[0.25, 0.25, 0.5]);
        assert_eq!(t.boundary(0), Some(0.0));
        assert_eq!(t.boundary(2), Some(0.5));
        assert_eq!(t.boundary(4), None);
        let spans: Vec<_> = t.spans(10.0, 200.0).collect();
        assert_eq!(spans, vec![(10.0, 50.0), (60.0, 50.0), (110.0, 100.0)]);
    }

    #[test]
    fn rules_validation() {
        assert!(ResizeRules::default().validate().is_ok());
        assert!(ResizeRules::default().with_min_ratio(1.0).validate().is_err());
        assert!(ResizeRules::default().with_min_ratio(-0.1).validate().is_err());
        assert!(ResizeRules::default().with_min_ratio(f32::NAN).validate().is_err());
    }
}
