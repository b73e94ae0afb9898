//! Geometry-subsystem error types.

use std::error::Error;
use std::fmt;

/// Errors from boundary loading, validation, and reprojection.
///
/// Both variants are fatal and never retried: an unreadable or invalid
/// boundary cannot be gridded, and a CRS pair that fails to transform
/// will keep failing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GeomError {
    /// The boundary source was unreadable or its geometry is invalid.
    InvalidBoundary {
        /// Human-readable description of what was wrong with the source.
        reason: String,
    },
    /// A CRS transform could not be constructed or applied.
    ReprojectionFailed {
        /// Human-readable description of the transform failure.
        reason: String,
    },
}

impl fmt::Display for GeomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBoundary { reason } => write!(f, "invalid boundary: {reason}"),
            Self::ReprojectionFailed { reason } => write!(f, "reprojection failed: {reason}"),
        }
    }
}

impl Error for GeomError {}
