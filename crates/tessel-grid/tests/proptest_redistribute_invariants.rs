//! Property-based invariant tests for the boundary redistributor.
//!
//! 1. Any sequence of resizes keeps every track summing to 1 with every
//!    weight at or above the floor, under both redistribution policies.
//! 2. The dragged boundary lands on the (clamped) requested coordinate.
//! 3. Resizing to the current boundary changes nothing.
//! 4. Out-of-range cell indices never touch the weights.
//! 5. `normalize` repairs arbitrary non-negative weights.
//! 6. Random pointer traffic through a scene keeps the whole grid valid.

use proptest::prelude::*;
use tessel_engine::coords::Rect;
use tessel_engine::input::{InputEvent, InputFrame, InputState, PointerEvent, PointerId};
use tessel_grid::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

const TOLERANCE: f32 = 1e-4;

fn raw_weights(max_len: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(0.0f32..10.0, 1..=max_len)
}

fn policy() -> impl Strategy<Value = Redistribution> {
    prop_oneof![Just(Redistribution::Adjacent), Just(Redistribution::Proportional)]
}

fn track_of(weights: &[f32]) -> Track {
    let cells = weights.iter().enumerate().map(|(i, w)| Cell::new(format!("c{i}"), *w)).collect();
    Track::normalized(cells, MINIMUM_RATIO)
}

fn check_track(t: &Track) -> Result<(), TestCaseError> {
    let floor = t.floor(MINIMUM_RATIO);
    prop_assert!((t.total() - 1.0).abs() < TOLERANCE, "total {} for {:?}", t.total(), t.cells());
    for w in t.weights() {
        prop_assert!(w >= floor - 1e-5, "weight {} below floor {}", w, floor);
        prop_assert!(w.is_finite());
    }
    Ok(())
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Sum-to-one and floor survive any resize sequence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn resizes_preserve_invariant(
        weights in raw_weights(16),
        policy in policy(),
        steps in proptest::collection::vec((0usize..20, -0.5f32..1.5), 1..40),
    ) {
        let rules = ResizeRules::default().with_redistribution(policy);
        let mut t = track_of(&weights);
        check_track(&t)?;
        for (cell, coord) in steps {
            t.resize_boundary(cell, coord, &rules);
            check_track(&t)?;
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. The boundary lands on the clamped coordinate
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn boundary_lands_on_request(
        weights in raw_weights(12),
        policy in policy(),
        cell_seed in any::<usize>(),
        coord in 0.0f32..1.0,
    ) {
        prop_assume!(weights.len() >= 2);
        let rules = ResizeRules::default().with_redistribution(policy);
        let mut t = track_of(&weights);
        let n = t.len();
        let cell = 1 + cell_seed % (n - 1);

        let floor = t.floor(MINIMUM_RATIO);
        let lo = cell as f32 * floor;
        let hi = (1.0 - (n - cell) as f32 * floor).max(lo);
        let expected = coord.max(lo).min(hi);

        t.resize_boundary(cell, coord, &rules);
        let got = t.boundary(cell).unwrap();
        prop_assert!((got - expected).abs() < TOLERANCE, "boundary {} expected {}", got, expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Idempotence at the current boundary
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn resize_to_current_boundary_is_stable(
        weights in raw_weights(12),
        policy in policy(),
        cell_seed in any::<usize>(),
    ) {
        prop_assume!(weights.len() >= 2);
        let rules = ResizeRules::default().with_redistribution(policy);
        let mut t = track_of(&weights);
        let cell = 1 + cell_seed % (t.len() - 1);
        let before: Vec<f32> = t.weights().collect();

        let at = t.boundary(cell).unwrap();
        t.resize_boundary(cell, at, &rules);

        for (a, b) in before.iter().zip(t.weights()) {
            prop_assert!((a - b).abs() < 1e-5, "{:?} -> {:?}", before, t.cells());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Invalid indices are no-ops
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn invalid_cells_do_nothing(weights in raw_weights(12), extra in 0usize..10, coord in 0.0f32..1.0) {
        let mut t = track_of(&weights);
        let snapshot = t.clone();
        let rules = ResizeRules::default();
        prop_assert!(!t.resize_boundary(0, coord, &rules));
        prop_assert!(!t.resize_boundary(t.len() + extra, coord, &rules));
        prop_assert_eq!(t, snapshot);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. normalize repairs anything
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn normalize_repairs(weights in proptest::collection::vec(0.0f32..1000.0, 1..40)) {
        let cells = weights.iter().enumerate().map(|(i, w)| Cell::new(format!("c{i}"), *w)).collect();
        let mut t = Track::new(cells);
        t.normalize(MINIMUM_RATIO);
        check_track(&t)?;
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Pointer traffic through a scene
// ═════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
enum Step {
    Down(u32, f32, f32),
    Move(u32, f32, f32),
    Up(u32, f32, f32),
    Cancel(u32),
    Blur,
}

fn step() -> impl Strategy<Value = Step> {
    let pos = (-50.0f32..450.0, -50.0f32..250.0);
    prop_oneof![
        (0u32..3, pos.clone()).prop_map(|(p, (x, y))| Step::Down(p, x, y)),
        (0u32..3, pos.clone()).prop_map(|(p, (x, y))| Step::Move(p, x, y)),
        (0u32..3, pos).prop_map(|(p, (x, y))| Step::Up(p, x, y)),
        (0u32..3).prop_map(Step::Cancel),
        Just(Step::Blur),
    ]
}

const LAYOUT: &str = r#"
Grid {
    Row "top" { weight: 2  Cell "a"  Cell "b"  Cell "c" }
    Row "mid" { Cell "d"  Cell "e" }
    Row "bottom" { Cell "f" }
    Divider "ab" { cell: b  range: all  grab_radius: 40 }
    Divider "bc" { cell: c  grab_radius: 40 }
    Divider "de" { cell: e  grab_radius: 40 }
    Divider "rows" { direction: vertical  row: bottom  grab_radius: 40 }
    Divider "flip" { direction: vertical  row: mid  invert: true  grab_radius: 40 }
}
"#;

proptest! {
    #[test]
    fn scene_traffic_keeps_grid_valid(frames in proptest::collection::vec(proptest::collection::vec(step(), 0..6), 1..30)) {
        let mut scene = load_str(LAYOUT).unwrap().into_scene(Rect::new(0.0, 0.0, 400.0, 200.0)).unwrap();
        let mut state = InputState::default();

        for steps in frames {
            let mut frame = InputFrame::default();
            for s in steps {
                let ev = match s {
                    Step::Down(p, x, y) => InputEvent::Pointer(PointerEvent::began(PointerId(p), x, y)),
                    Step::Move(p, x, y) => InputEvent::Pointer(PointerEvent::moved(PointerId(p), x, y)),
                    Step::Up(p, x, y) => InputEvent::Pointer(PointerEvent::ended(PointerId(p), x, y)),
                    Step::Cancel(p) => InputEvent::Pointer(PointerEvent::cancelled(PointerId(p), 0.0, 0.0)),
                    Step::Blur => InputEvent::Focused(false),
                };
                state.apply_event(&mut frame, ev);
            }
            scene.frame(&frame);

            let grid = scene.grid();
            check_track(grid.rows())?;
            for r in 0..grid.row_count() {
                check_track(grid.row(r).unwrap())?;
            }
            for (_, d) in scene.dividers() {
                if let Some(p) = d.dragging_pointer() {
                    prop_assert!(state.pointer_down(p), "divider held by released pointer {}", p);
                }
            }
        }
    }
}
