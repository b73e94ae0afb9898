//! The extent resolver: boundary in, target-CRS boundary + extent out.

use crate::boundary::Boundary;
use crate::crs::Crs;
use crate::error::GeomError;
use gridscore_core::Extent;

/// A boundary normalised to the target CRS, with its bounding extent.
#[derive(Clone, Debug)]
pub struct ResolvedBoundary {
    /// The boundary, reprojected if its source CRS differed.
    pub boundary: Boundary,
    /// Bounding extent in target-CRS units.
    pub extent: Extent,
}

/// Resolve a boundary against a target CRS.
///
/// Reprojects when the source CRS differs, then computes the bounding
/// extent. The original boundary is untouched; the reprojected copy is
/// in-memory only. Reprojection failures are fatal and not retried.
pub fn resolve(boundary: &Boundary, target: &Crs) -> Result<ResolvedBoundary, GeomError> {
    let boundary = boundary.reprojected(target)?;
    let extent = boundary.extent()?;
    if !extent.is_finite() {
        return Err(GeomError::ReprojectionFailed {
            reason: format!("boundary extent is non-finite after reprojection: {extent}"),
        });
    }
    Ok(ResolvedBoundary { boundary, extent })
}
