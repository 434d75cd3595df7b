use std::borrow::Borrow;
use std::fmt;

/// Stable identifier for a row, a cell, or a divider.
///
/// Keys are resolved to indices once, through the grid's lookup table, and
/// survive structure rebuilds; indices do not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(String);

impl Key {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Key of a cell inside a row.
pub type CellKey = Key;
/// Key of a row in the grid.
pub type RowKey = Key;
/// Key of a divider registered with a scene.
pub type DividerKey = Key;
