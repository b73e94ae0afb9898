//! The workflow runner: six stages, strict order, one invocation.

use crate::config::{LayerConfig, WorkflowConfig};
use crate::error::WorkflowError;
use gridscore_core::{CancelToken, Extent};
use gridscore_geom::{resolve, Boundary, Feature};
use gridscore_grid::{generate_cached, write_grid, CellArena, GridError, GridPaths};
use gridscore_raster::{align_extent, burn, write_tiff, RasterSurface};
use gridscore_score::{classify, reduce, CellIndex};
use indexmap::IndexMap;
use log::{debug, info};
use std::fs;
use std::path::PathBuf;

/// Results for one scored feature layer.
#[derive(Debug)]
pub struct LayerOutput {
    /// The scored grid for this layer.
    pub grid: CellArena,
    /// The burned raster surface.
    pub surface: RasterSurface,
    /// Path of the scored grid GeoJSON.
    pub grid_path: PathBuf,
    /// Path of the raster TIFF.
    pub raster_path: PathBuf,
}

/// Results for one workflow invocation.
#[derive(Debug)]
pub struct WorkflowOutput {
    /// Resolved study-area extent in the target CRS.
    pub extent: Extent,
    /// Path of the merged (unscored) grid.
    pub grid_path: PathBuf,
    /// Number of cells in the merged grid.
    pub cell_count: usize,
    /// Per-layer outputs, keyed by layer name in configuration order.
    pub layers: IndexMap<String, LayerOutput>,
}

/// One synchronous scoring invocation over one study area.
///
/// The workflow owns its grid for the duration of the run; nothing
/// else may mutate it. Cancellation is cooperative: the token is
/// checked between stages and periodically inside the reduction loop,
/// and an observed cancellation ends the run with
/// [`WorkflowError::Cancelled`] and no partial layer outputs on disk.
pub struct Workflow {
    config: WorkflowConfig,
    cancel: CancelToken,
}

impl Workflow {
    /// Validate the configuration and build a workflow.
    pub fn new(config: WorkflowConfig) -> Result<Self, WorkflowError> {
        config.validate()?;
        Ok(Self {
            config,
            cancel: CancelToken::new(),
        })
    }

    /// A token an external scheduler can use to cancel this run.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// The validated configuration.
    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// Run the full pipeline: resolve, grid, then score every layer.
    pub fn run(
        &self,
        boundary: &Boundary,
        layers: &[(LayerConfig, Vec<Feature>)],
    ) -> Result<WorkflowOutput, WorkflowError> {
        for (layer, _) in layers {
            layer.validate()?;
        }

        self.checkpoint()?;
        info!(
            "resolving boundary ({} parts) to {}",
            boundary.part_count(),
            self.config.target_crs
        );
        let resolved = resolve(boundary, &self.config.target_crs)?;
        debug!("resolved extent {}", resolved.extent);

        self.checkpoint()?;
        fs::create_dir_all(&self.config.work_dir).map_err(|e| {
            GridError::Persistence {
                path: self.config.work_dir.clone(),
                reason: format!("cannot create work directory: {e}"),
            }
        })?;
        let paths = GridPaths::new(&self.config.work_dir, self.config.stem.as_str());
        let grid = generate_cached(&resolved.boundary, &self.config.grid_params(), &paths)?;
        info!("grid ready with {} cells", grid.len());

        self.checkpoint()?;
        let index = CellIndex::build(&grid);
        let raster_extent = align_extent(&resolved.extent, self.config.pixel_size);

        let mut outputs = IndexMap::new();
        for (layer, features) in layers {
            self.checkpoint()?;
            let output = self.score_layer(&grid, &index, &raster_extent, layer, features)?;
            outputs.insert(layer.name.clone(), output);
        }

        Ok(WorkflowOutput {
            extent: resolved.extent,
            grid_path: paths.merged_path(),
            cell_count: grid.len(),
            layers: outputs,
        })
    }

    /// Score one feature layer against an already generated grid
    /// (stages 3-5 plus rasterization).
    ///
    /// Each layer starts from a fresh copy of the base grid, so layers
    /// never see each other's statistics. On any error after output
    /// files were created, those files are removed before the error
    /// propagates.
    pub fn score_layer(
        &self,
        base: &CellArena,
        index: &CellIndex,
        raster_extent: &Extent,
        layer: &LayerConfig,
        features: &[Feature],
    ) -> Result<LayerOutput, WorkflowError> {
        layer.validate()?;
        info!(
            "scoring layer '{}' ({} features, {} policy)",
            layer.name,
            features.len(),
            layer.policy
        );

        let matching: Vec<Feature> = features
            .iter()
            .filter(|f| f.kind() == Some(layer.geometry))
            .cloned()
            .collect();
        debug!(
            "layer '{}': {} of {} features match the configured geometry kind",
            layer.name,
            matching.len(),
            features.len()
        );

        let mut grid = base.fresh_copy();
        reduce(&mut grid, index, &matching, &layer.policy, &self.cancel)?;
        classify(&mut grid, &layer.table);

        let grid_path = self.layer_path(&layer.name, "scored.geojson");
        let raster_path = self.layer_path(&layer.name, "scores.tif");
        let result = (|| -> Result<RasterSurface, WorkflowError> {
            write_grid(&grid, &grid_path)?;
            self.checkpoint()?;
            let surface = burn(&grid, raster_extent, self.config.pixel_size, self.config.nodata)?;
            write_tiff(&surface, &raster_path)?;
            Ok(surface)
        })();

        match result {
            Ok(surface) => Ok(LayerOutput {
                grid,
                surface,
                grid_path,
                raster_path,
            }),
            Err(e) => {
                // No partial layer outputs survive a failed or
                // cancelled run.
                let _ = fs::remove_file(&grid_path);
                let _ = fs::remove_file(&raster_path);
                Err(e)
            }
        }
    }

    fn layer_path(&self, layer: &str, suffix: &str) -> PathBuf {
        self.config
            .work_dir
            .join(format!("{}_{layer}_{suffix}", self.config.stem))
    }

    fn checkpoint(&self) -> Result<(), WorkflowError> {
        if self.cancel.is_cancelled() {
            Err(WorkflowError::Cancelled)
        } else {
            Ok(())
        }
    }
}
