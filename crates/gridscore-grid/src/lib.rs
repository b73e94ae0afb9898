//! Grid generation and cell storage.
//!
//! The grid generator discretises a (possibly multi-part) study-area
//! boundary into a uniform rectangular cell grid, part by part, and
//! merges the parts into one [`CellArena`] — a flat array of cell
//! records indexed by stable [`CellId`](gridscore_core::CellId).
//! Per-part grids and the merged grid persist as GeoJSON at
//! caller-supplied paths, and an existing path short-circuits
//! regeneration (idempotent re-entry after partial failure).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod cache;
pub mod error;
pub mod generator;

pub use arena::{CellArena, CellRecord};
pub use cache::{read_grid, write_grid, GridPaths};
pub use error::GridError;
pub use generator::{generate, generate_cached, GridParams};
