//! Core types for the gridscore spatial scoring engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental vocabulary shared by every stage of the scoring
//! pipeline: cell identifiers, bounding extents, score band tables,
//! reduction policies, and the cooperative cancellation token.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cancel;
pub mod extent;
pub mod id;
pub mod reduce;
pub mod score;

pub use cancel::CancelToken;
pub use extent::Extent;
pub use id::{CellId, PartId};
pub use reduce::ReducePolicy;
pub use score::{Score, ScoreBand, ScoreTable, ScoreTableError};
