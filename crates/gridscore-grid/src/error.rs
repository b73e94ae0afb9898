//! Grid-subsystem error types.

use gridscore_core::PartId;
use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Errors from grid generation and grid persistence.
///
/// A generation failure in any part aborts the whole run: a partially
/// merged grid is not a safe output, because downstream scoring relies
/// on the grid being complete.
#[derive(Clone, Debug, PartialEq)]
pub enum GridError {
    /// Cell spacing must be strictly positive on both axes.
    InvalidSpacing {
        /// Configured horizontal spacing.
        h_spacing: f64,
        /// Configured vertical spacing.
        v_spacing: f64,
    },
    /// Grid or clip failure while processing one study-area part.
    GenerationFailed {
        /// The failing part.
        part: PartId,
        /// Human-readable description of the failure.
        reason: String,
    },
    /// A statistic pass supplied the wrong number of values.
    StatisticLength {
        /// Number of cells in the arena.
        expected: usize,
        /// Number of statistic values supplied.
        got: usize,
    },
    /// A grid file could not be written or read back.
    Persistence {
        /// The path involved.
        path: PathBuf,
        /// Human-readable description of the I/O or format problem.
        reason: String,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSpacing {
                h_spacing,
                v_spacing,
            } => {
                write!(
                    f,
                    "cell spacing must be positive, got {h_spacing} x {v_spacing}"
                )
            }
            Self::GenerationFailed { part, reason } => {
                write!(f, "grid generation failed for part {part}: {reason}")
            }
            Self::StatisticLength { expected, got } => {
                write!(
                    f,
                    "statistic pass length mismatch: {got} values for {expected} cells"
                )
            }
            Self::Persistence { path, reason } => {
                write!(f, "grid persistence failed at {}: {reason}", path.display())
            }
        }
    }
}

impl Error for GridError {}
