//! Error types for configuration, structure building, and layout loading.
//!
//! Resize operations never fail: invalid indices are no-ops. Errors only
//! come out of the configuration surface.

use std::fmt;

use tessel_markup::ParseError;

use crate::key::Key;

// ── ConfigError ───────────────────────────────────────────────────────────

/// A configuration value that cannot be used.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `min_ratio` must be finite and in `[0, 1)`.
    InvalidMinRatio(f32),
    /// Movement ratios must be finite, in `[0, 1]`, and `min <= max`.
    InvalidMovementRange { min: f32, max: f32 },
    /// Grab radius must be finite and non-negative.
    InvalidGrabRadius(f32),
    /// The splitter knob range has (almost) zero length.
    DegenerateKnobRange { min: f32, max: f32 },
    /// Two minimum-size panels do not fit in the total extent.
    PanelsExceedTotal { min_panel: f32, total: f32 },
    /// A divider with this key is already registered.
    DuplicateDivider(Key),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidMinRatio(v) => {
                write!(f, "min_ratio {v} is outside [0, 1)")
            }
            ConfigError::InvalidMovementRange { min, max } => {
                write!(f, "movement range [{min}, {max}] is not a sub-range of [0, 1]")
            }
            ConfigError::InvalidGrabRadius(v) => write!(f, "grab radius {v} is not usable"),
            ConfigError::DegenerateKnobRange { min, max } => {
                write!(f, "knob range [{min}, {max}] has no length")
            }
            ConfigError::PanelsExceedTotal { min_panel, total } => write!(
                f,
                "two panels of at least {min_panel} cannot fit in a total extent of {total}"
            ),
            ConfigError::DuplicateDivider(key) => write!(f, "divider `{key}` is already registered"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ── BuildError ────────────────────────────────────────────────────────────

/// A grid structure or layout document that cannot be turned into a grid.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildError {
    DuplicateRow(Key),
    /// Cell keys are unique across the whole grid.
    DuplicateCell(Key),
    InvalidWeight { key: Key, weight: f32 },
    /// A layout document is well-formed but does not describe a valid grid.
    Markup { line: usize, message: String },
    Config(ConfigError),
}

impl BuildError {
    pub(crate) fn markup(line: usize, message: impl Into<String>) -> Self {
        BuildError::Markup { line, message: message.into() }
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::DuplicateRow(key) => write!(f, "row `{key}` is declared twice"),
            BuildError::DuplicateCell(key) => write!(f, "cell `{key}` is declared twice"),
            BuildError::InvalidWeight { key, weight } => {
                write!(f, "`{key}` has weight {weight}; weights must be finite and positive")
            }
            BuildError::Markup { line, message } => write!(f, "line {line}: {message}"),
            BuildError::Config(e) => write!(f, "invalid configuration: {e}"),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for BuildError {
    fn from(e: ConfigError) -> Self {
        BuildError::Config(e)
    }
}

// ── LoadError ─────────────────────────────────────────────────────────────

/// Failure to load a `.tgrid` layout from source text.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    Parse(ParseError),
    Build(BuildError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Parse(e) => e.fmt(f),
            LoadError::Build(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Parse(e) => Some(e),
            LoadError::Build(e) => Some(e),
        }
    }
}

impl From<ParseError> for LoadError {
    fn from(e: ParseError) -> Self {
        LoadError::Parse(e)
    }
}

impl From<BuildError> for LoadError {
    fn from(e: BuildError) -> Self {
        LoadError::Build(e)
    }
}
