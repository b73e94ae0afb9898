//! Rasterization: burning scored grids into aligned pixel surfaces.
//!
//! The rasterizer reads a scored [`CellArena`](gridscore_grid::CellArena)
//! and writes an independent [`RasterSurface`] — no shared mutable
//! state survives the pass. Surfaces persist as single-band TIFF files
//! with an ESRI world-file sidecar carrying the geotransform.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod burn;
pub mod error;
pub mod surface;
pub mod writer;

pub use burn::burn;
pub use error::RasterError;
pub use surface::{align_extent, RasterSurface};
pub use writer::{world_file_path, write_tiff};
