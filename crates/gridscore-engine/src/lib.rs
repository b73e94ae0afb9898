//! Workflow orchestration for the gridscore pipeline.
//!
//! One [`Workflow`] invocation drives the six stages in strict order
//! (extent resolution, grid generation, spatial indexing, feature
//! reduction, classification, rasterization) for one study area.
//! Stages 3-5 repeat once per feature layer, since multiple indicator
//! workflows share the same grid but apply different layers and
//! threshold tables. The engine itself is synchronous and
//! single-threaded; concurrency, when wanted, comes from running
//! independent invocations on an external scheduler.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod workflow;

pub use config::{ConfigError, LayerConfig, WorkflowConfig};
pub use error::WorkflowError;
pub use workflow::{LayerOutput, Workflow, WorkflowOutput};
