//! Flat arena storage for grid cells.
//!
//! Cell state lives in a single `Vec<CellRecord>` indexed by
//! [`CellId`], written in separate passes: the generator creates
//! records with `statistic = 0` and no score, the reducer writes
//! statistics once, the classifier writes scores once. There is no
//! shared mutable attribute bag — each pass replaces one field.

use crate::error::GridError;
use geo::Rect;
use gridscore_core::{CellId, Score};
use gridscore_geom::Crs;

/// One grid cell: stable id, rectangle geometry, statistic, score.
#[derive(Clone, Debug, PartialEq)]
pub struct CellRecord {
    /// Stable id, unique within the owning arena.
    pub id: CellId,
    /// Axis-aligned cell rectangle in grid CRS units.
    pub rect: Rect<f64>,
    /// Reduction statistic; `0.0` until the reducer pass runs.
    pub statistic: f64,
    /// Classification score; `None` until the classifier pass runs.
    pub score: Option<Score>,
}

/// Ordered collection of cells plus grid metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct CellArena {
    cells: Vec<CellRecord>,
    h_spacing: f64,
    v_spacing: f64,
    crs: Crs,
}

impl CellArena {
    /// An empty arena with the given spacing and CRS.
    pub fn new(h_spacing: f64, v_spacing: f64, crs: Crs) -> Self {
        Self {
            cells: Vec::new(),
            h_spacing,
            v_spacing,
            crs,
        }
    }

    /// Append a cell, assigning the next sequential id.
    pub fn push_cell(&mut self, rect: Rect<f64>) -> CellId {
        let id = CellId(self.cells.len() as u64);
        self.cells.push(CellRecord {
            id,
            rect,
            statistic: 0.0,
            score: None,
        });
        id
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when the arena holds no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Horizontal cell spacing.
    pub fn h_spacing(&self) -> f64 {
        self.h_spacing
    }

    /// Vertical cell spacing.
    pub fn v_spacing(&self) -> f64 {
        self.v_spacing
    }

    /// Grid CRS.
    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    /// All cell records in id order.
    pub fn cells(&self) -> &[CellRecord] {
        &self.cells
    }

    /// Look up one cell.
    pub fn get(&self, id: CellId) -> Option<&CellRecord> {
        self.cells.get(id.index())
    }

    /// Replace every cell's statistic in one pass.
    ///
    /// `stats` must hold exactly one value per cell, in id order.
    pub fn apply_statistics(&mut self, stats: &[f64]) -> Result<(), GridError> {
        if stats.len() != self.cells.len() {
            return Err(GridError::StatisticLength {
                expected: self.cells.len(),
                got: stats.len(),
            });
        }
        for (cell, &stat) in self.cells.iter_mut().zip(stats) {
            cell.statistic = stat;
        }
        Ok(())
    }

    /// Derive every cell's score from its statistic in one pass.
    pub fn apply_scores(&mut self, classify: impl Fn(f64) -> Score) {
        for cell in &mut self.cells {
            cell.score = Some(classify(cell.statistic));
        }
    }

    /// Restore one cell's persisted state when reading a grid file.
    pub(crate) fn set_state(&mut self, id: CellId, statistic: f64, score: Option<Score>) {
        if let Some(cell) = self.cells.get_mut(id.index()) {
            cell.statistic = statistic;
            cell.score = score;
        }
    }

    /// A copy with statistics and scores reset to their initial state.
    ///
    /// Used when several feature layers score the same grid: each layer
    /// starts from the unscored base grid.
    pub fn fresh_copy(&self) -> CellArena {
        let mut out = CellArena::new(self.h_spacing, self.v_spacing, self.crs.clone());
        for cell in &self.cells {
            out.push_cell(cell.rect);
        }
        out
    }
}
