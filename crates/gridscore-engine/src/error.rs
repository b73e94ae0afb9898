//! The workflow-level error taxonomy.
//!
//! Subsystem errors propagate to the orchestrator unchanged — no
//! silent local recovery — because a partially computed grid or raster
//! would silently corrupt the composite index downstream. The one
//! deliberate exception is the grid cache shortcut, which is a no-op
//! reuse, not recovery.

use crate::config::ConfigError;
use gridscore_geom::GeomError;
use gridscore_grid::GridError;
use gridscore_raster::RasterError;
use gridscore_score::ScoreError;
use std::error::Error;
use std::fmt;

/// Everything a workflow run can report.
///
/// `Cancelled` is an outcome, not a failure: it means the cooperative
/// cancellation token was observed and the run stopped with no partial
/// outputs retained.
#[derive(Clone, Debug, PartialEq)]
pub enum WorkflowError {
    /// Configuration rejected before any stage ran.
    Config(ConfigError),
    /// Boundary loading, validation, or reprojection failed (stage 1).
    Boundary(GeomError),
    /// Grid generation or grid persistence failed (stage 2).
    Grid(GridError),
    /// Feature reduction or classification failed (stages 3-5).
    Scoring(ScoreError),
    /// Raster burning or writing failed (stage 6).
    Rasterization(RasterError),
    /// Cooperative cancellation observed at a checkpoint.
    Cancelled,
}

impl fmt::Display for WorkflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid configuration: {e}"),
            Self::Boundary(e) => write!(f, "boundary stage failed: {e}"),
            Self::Grid(e) => write!(f, "grid generation failed: {e}"),
            Self::Scoring(e) => write!(f, "scoring failed: {e}"),
            Self::Rasterization(e) => write!(f, "rasterization failed: {e}"),
            Self::Cancelled => write!(f, "workflow cancelled"),
        }
    }
}

impl Error for WorkflowError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Boundary(e) => Some(e),
            Self::Grid(e) => Some(e),
            Self::Scoring(e) => Some(e),
            Self::Rasterization(e) => Some(e),
            Self::Cancelled => None,
        }
    }
}

impl From<ConfigError> for WorkflowError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<GeomError> for WorkflowError {
    fn from(e: GeomError) -> Self {
        Self::Boundary(e)
    }
}

impl From<GridError> for WorkflowError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<ScoreError> for WorkflowError {
    fn from(e: ScoreError) -> Self {
        // A cancellation observed inside the reduction loop surfaces
        // as the cancelled outcome, not as a scoring failure.
        match e {
            ScoreError::Cancelled => Self::Cancelled,
            other => Self::Scoring(other),
        }
    }
}

impl From<RasterError> for WorkflowError {
    fn from(e: RasterError) -> Self {
        Self::Rasterization(e)
    }
}
