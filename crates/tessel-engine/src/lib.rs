//! Tessel engine crate.
//!
//! This crate owns the platform-agnostic pieces used by the grid layer:
//! geometry, pointer input, and logger setup. It knows nothing about grids.

pub mod coords;
pub mod input;
pub mod logging;
