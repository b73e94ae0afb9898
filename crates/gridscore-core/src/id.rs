//! Strongly-typed identifiers for grid cells and study-area parts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a cell within a grid.
///
/// Cells are numbered sequentially during grid generation and renumbered
/// once when per-part grids are merged, so within one merged grid every
/// `CellId(n)` is unique and addresses the n-th cell record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(pub u64);

impl CellId {
    /// Position of this cell in the owning arena's flat record storage.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CellId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Identifies one connected part of a multi-part study-area boundary.
///
/// Parts are gridded independently so that disjoint land masses are not
/// bridged by a single bounding-box grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PartId(pub u32);

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PartId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
