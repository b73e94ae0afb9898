//! The classifier pass: statistics in, discrete scores out.

use gridscore_core::ScoreTable;
use gridscore_grid::CellArena;

/// Derive every cell's score from its statistic through the table.
///
/// This is the second and final write pass over the arena; after it,
/// every cell carries `Some(score)`. Band evaluation order and the
/// first-match rule live in [`ScoreTable::classify`].
pub fn classify(arena: &mut CellArena, table: &ScoreTable) {
    arena.apply_scores(|statistic| table.classify(statistic));
}
