//! Raster-subsystem error types.

use gridscore_core::CellId;
use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Errors from burning and writing raster surfaces.
///
/// All variants are fatal for the workflow run; a partially written
/// raster file is removed before the error is returned.
#[derive(Clone, Debug, PartialEq)]
pub enum RasterError {
    /// Pixel size must be strictly positive and finite.
    InvalidPixelSize {
        /// The configured pixel size.
        pixel_size: f64,
    },
    /// The target extent has zero width or height — nothing to burn.
    EmptyExtent,
    /// A cell reached the rasterizer without a score. The classifier
    /// pass must run before burning.
    MissingScore {
        /// The unscored cell.
        cell: CellId,
    },
    /// The TIFF backend reported a failure.
    Backend {
        /// Human-readable description from the encoder.
        reason: String,
    },
    /// Raster or world file could not be written.
    Io {
        /// The path involved.
        path: PathBuf,
        /// Human-readable description of the I/O failure.
        reason: String,
    },
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPixelSize { pixel_size } => {
                write!(f, "pixel size must be positive, got {pixel_size}")
            }
            Self::EmptyExtent => write!(f, "raster extent is empty"),
            Self::MissingScore { cell } => {
                write!(f, "cell {cell} has no score; classify before rasterizing")
            }
            Self::Backend { reason } => write!(f, "raster backend failed: {reason}"),
            Self::Io { path, reason } => {
                write!(f, "raster I/O failed at {}: {reason}", path.display())
            }
        }
    }
}

impl Error for RasterError {}
