//! Workflow configuration and validation.

use gridscore_core::{ReducePolicy, ScoreTable, ScoreTableError};
use gridscore_geom::{Crs, GeometryKind};
use gridscore_grid::GridParams;
use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Configuration for one workflow invocation.
///
/// Outputs land under `work_dir` with filenames derived from `stem`,
/// so two invocations with distinct (dir, stem) pairs never touch each
/// other's files.
#[derive(Clone, Debug)]
pub struct WorkflowConfig {
    /// CRS the grid and raster are produced in.
    pub target_crs: Crs,
    /// Horizontal cell spacing in target-CRS units.
    pub h_spacing: f64,
    /// Vertical cell spacing in target-CRS units.
    pub v_spacing: f64,
    /// Raster pixel edge length in target-CRS units.
    pub pixel_size: f64,
    /// NoData sentinel for raster pixels outside every cell.
    pub nodata: u16,
    /// Directory all intermediate and final outputs are written to.
    pub work_dir: PathBuf,
    /// Filename stem for this invocation's outputs.
    pub stem: String,
}

impl WorkflowConfig {
    /// Check structural invariants before any work starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.h_spacing > 0.0 && self.h_spacing.is_finite())
            || !(self.v_spacing > 0.0 && self.v_spacing.is_finite())
        {
            return Err(ConfigError::NonPositiveSpacing {
                h_spacing: self.h_spacing,
                v_spacing: self.v_spacing,
            });
        }
        if !(self.pixel_size > 0.0 && self.pixel_size.is_finite()) {
            return Err(ConfigError::NonPositivePixelSize {
                pixel_size: self.pixel_size,
            });
        }
        if self.stem.is_empty() {
            return Err(ConfigError::EmptyStem);
        }
        Ok(())
    }

    /// The grid parameters this configuration implies.
    pub fn grid_params(&self) -> GridParams {
        GridParams {
            h_spacing: self.h_spacing,
            v_spacing: self.v_spacing,
            crs: self.target_crs.clone(),
        }
    }
}

/// Scoring configuration for one feature layer.
#[derive(Clone, Debug)]
pub struct LayerConfig {
    /// Name used for this layer's output files and the result map.
    pub name: String,
    /// Geometry kind the layer is expected to carry; features of other
    /// kinds are ignored by the reducer.
    pub geometry: GeometryKind,
    /// How intersecting features fold into a cell statistic.
    pub policy: ReducePolicy,
    /// Ordered threshold table mapping statistics to scores.
    pub table: ScoreTable,
}

impl LayerConfig {
    /// Check the layer's threshold table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::EmptyLayerName);
        }
        self.table
            .validate()
            .map_err(|source| ConfigError::Table {
                layer: self.name.clone(),
                source,
            })
    }
}

/// Errors detected during configuration validation.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Cell spacing must be strictly positive on both axes.
    NonPositiveSpacing {
        /// Configured horizontal spacing.
        h_spacing: f64,
        /// Configured vertical spacing.
        v_spacing: f64,
    },
    /// Raster pixel size must be strictly positive.
    NonPositivePixelSize {
        /// The configured pixel size.
        pixel_size: f64,
    },
    /// The output filename stem is empty.
    EmptyStem,
    /// A layer has no name to derive output files from.
    EmptyLayerName,
    /// A layer's score table failed validation.
    Table {
        /// The offending layer.
        layer: String,
        /// The underlying table error.
        source: ScoreTableError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveSpacing {
                h_spacing,
                v_spacing,
            } => write!(
                f,
                "cell spacing must be positive, got {h_spacing} x {v_spacing}"
            ),
            Self::NonPositivePixelSize { pixel_size } => {
                write!(f, "pixel size must be positive, got {pixel_size}")
            }
            Self::EmptyStem => write!(f, "output filename stem is empty"),
            Self::EmptyLayerName => write!(f, "layer name is empty"),
            Self::Table { layer, source } => {
                write!(f, "score table for layer '{layer}' is invalid: {source}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Table { source, .. } => Some(source),
            _ => None,
        }
    }
}
