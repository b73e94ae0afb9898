//! Feature-to-cell reduction and score classification.
//!
//! This crate owns stages 3-5 of the pipeline: a bounding-box R-tree
//! over grid cells, the two-phase (coarse-then-exact) reducer that
//! folds intersecting features into one statistic per cell, and the
//! classifier pass that maps statistics through a
//! [`ScoreTable`](gridscore_core::ScoreTable).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod classify;
pub mod error;
pub mod index;
pub mod reduce;

pub use classify::classify;
pub use error::ScoreError;
pub use index::CellIndex;
pub use reduce::reduce;
