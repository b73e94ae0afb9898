//! Boundary handling, CRS transforms, and extent resolution.
//!
//! This crate is the engine's door to the outside world's vector data:
//! it loads study-area boundaries and feature layers from GeoJSON,
//! reprojects geometry between coordinate reference systems with
//! `proj4rs`, and resolves a boundary to its bounding [`Extent`] in the
//! target CRS.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod crs;
pub mod error;
pub mod feature;
pub mod resolve;

pub use boundary::Boundary;
pub use crs::{CoordTransformer, Crs};
pub use error::GeomError;
pub use feature::{read_features, read_features_file, Feature, GeometryKind};
pub use resolve::{resolve, ResolvedBoundary};
