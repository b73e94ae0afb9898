//! Gridscore: grid-based spatial scoring from boundary to raster.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all gridscore sub-crates. For most users, adding `gridscore`
//! as a single dependency is sufficient.
//!
//! The pipeline runs six stages in strict order: resolve the study-area
//! boundary into a target CRS, tile it into a uniform cell grid, index
//! the cells, fold each feature layer into one statistic per cell,
//! classify statistics into scores through a band table, and burn the
//! scored grid into a georeferenced TIFF.
//!
//! # Quick start
//!
//! Classification alone needs no I/O:
//!
//! ```rust
//! use gridscore::prelude::*;
//!
//! let table = ScoreTable::feature_count();
//! assert_eq!(table.classify(0.0), Score(0));
//! assert_eq!(table.classify(1.0), Score(3));
//! assert_eq!(table.classify(7.0), Score(5));
//! ```
//!
//! A full run takes a boundary, a feature layer, and a working
//! directory for the grid cache and outputs:
//!
//! ```rust,no_run
//! use gridscore::prelude::*;
//! use std::path::{Path, PathBuf};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let boundary = Boundary::from_geojson_file(Path::new("study_area.geojson"), Crs::WGS84)?;
//! let features = read_features_file(Path::new("wells.geojson"))?;
//!
//! let config = WorkflowConfig {
//!     target_crs: Crs::Epsg(3857),
//!     h_spacing: 500.0,
//!     v_spacing: 500.0,
//!     pixel_size: 100.0,
//!     nodata: 65_535,
//!     work_dir: PathBuf::from("out"),
//!     stem: "study".into(),
//! };
//! let layer = LayerConfig {
//!     name: "wells".into(),
//!     geometry: GeometryKind::Point,
//!     policy: ReducePolicy::Count,
//!     table: ScoreTable::feature_count(),
//! };
//!
//! let workflow = Workflow::new(config)?;
//! let output = workflow.run(&boundary, &[(layer, features)])?;
//! println!("scored {} cells", output.cell_count);
//! # Ok(()) }
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `gridscore-core` | IDs, extents, score tables, policies, cancellation |
//! | [`geom`] | `gridscore-geom` | Boundaries, features, CRS transforms, resolution |
//! | [`grid`] | `gridscore-grid` | Grid generation, cell arena, GeoJSON cache |
//! | [`score`] | `gridscore-score` | Spatial index, reducer, classifier |
//! | [`raster`] | `gridscore-raster` | Burn pass and TIFF output |
//! | [`engine`] | `gridscore-engine` | Workflow orchestration and configuration |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core vocabulary types (`gridscore-core`).
///
/// Cell and part identifiers, [`types::Extent`], score band tables,
/// reduction policies, and the cooperative [`types::CancelToken`].
pub use gridscore_core as types;

/// Vector-data handling (`gridscore-geom`).
///
/// Load boundaries and feature layers from GeoJSON, reproject between
/// coordinate reference systems, and resolve extents.
pub use gridscore_geom as geom;

/// Grid generation and storage (`gridscore-grid`).
///
/// The generator tiles a boundary into a [`grid::CellArena`]; the cache
/// module persists grids as GeoJSON with idempotent re-entry.
pub use gridscore_grid as grid;

/// Reduction and classification (`gridscore-score`).
///
/// [`score::CellIndex`] for candidate lookup, [`score::reduce`] to fold
/// features into statistics, [`score::classify`] to assign scores.
pub use gridscore_score as score;

/// Rasterization (`gridscore-raster`).
///
/// [`raster::burn`] turns a scored grid into a [`raster::RasterSurface`];
/// [`raster::write_tiff`] persists it with a world-file sidecar.
pub use gridscore_raster as raster;

/// Workflow orchestration (`gridscore-engine`).
///
/// [`engine::Workflow`] drives the whole pipeline for one study area.
pub use gridscore_engine as engine;

/// Common imports for typical gridscore usage.
///
/// ```rust
/// use gridscore::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use gridscore_core::{
        CancelToken, CellId, Extent, ReducePolicy, Score, ScoreBand, ScoreTable,
    };

    // Vector data
    pub use gridscore_geom::{read_features, read_features_file, Boundary, Crs, Feature, GeometryKind};

    // Grid
    pub use gridscore_grid::{CellArena, CellRecord, GridParams, GridPaths};

    // Raster
    pub use gridscore_raster::RasterSurface;

    // Engine
    pub use gridscore_engine::{
        LayerConfig, LayerOutput, Workflow, WorkflowConfig, WorkflowError, WorkflowOutput,
    };
}
