//! Proportional grid layout with drag-to-resize dividers.
//!
//! A grid is a track of rows, each row a track of cells. Every track holds
//! normalized weights: they sum to 1 and none drops below the minimum ratio.
//! Dividers turn pointer drags into boundary moves, and the redistributor
//! reshuffles the weights around the moved boundary.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`track`] | `Track`, `Cell`, `ResizeRules`, the redistributor |
//! | [`grid`] | `GridLayout`, `GridStructure`, key lookup, geometry |
//! | [`divider`] | `Divider`, `DividerConfig`, pointer-to-coordinate mapping |
//! | [`split`] | `PanelSplit`, a pixel-based two-group splitter |
//! | [`scene`] | `GridScene`: per-frame routing and handle sync |
//! | [`markup`] | building all of the above from `.tgrid` files |
//!
//! # Quick start
//!
//! ```rust
//! use tessel_grid::prelude::*;
//!
//! let structure = GridStructure::new()
//!     .row(RowSpec::new("top").cell("left").cell("right"));
//! let mut grid = GridLayout::new(&structure, ResizeRules::default()).unwrap();
//!
//! // Drag the edge between `left` and `right` to 80%.
//! assert!(grid.resize_columns(TrackSelector::Row(0), 1, 0.8));
//! let w: Vec<f32> = grid.row(0).unwrap().weights().collect();
//! assert!((w[0] - 0.8).abs() < 1e-4 && (w[1] - 0.2).abs() < 1e-4);
//! ```

pub mod divider;
pub mod error;
pub mod grid;
pub mod key;
pub mod markup;
pub mod scene;
pub mod split;
pub mod track;

pub mod prelude {
    pub use crate::divider::{
        ControlRange, Divider, DividerConfig, DividerDirection, DividerEffect, DividerTarget,
    };
    pub use crate::error::{BuildError, ConfigError, LoadError};
    pub use crate::grid::{CellAddr, CellRect, CellSpec, GridLayout, GridStructure, RowSpec, TrackSelector};
    pub use crate::key::{CellKey, DividerKey, Key, RowKey};
    pub use crate::markup::{Layout, load_str};
    pub use crate::scene::{FrameReport, GridScene};
    pub use crate::split::{PanelSplit, SplitConstraints, SplitSizes};
    pub use crate::track::{Cell, MINIMUM_RATIO, Redistribution, ResizeRules, Track};
}
