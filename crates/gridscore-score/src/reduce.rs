//! The feature-to-cell reducer: two-phase filter plus policy fold.
//!
//! One loop handles every workflow. For each feature the index supplies
//! a coarse candidate set by bounding box; line and polygon features
//! are then refined with an exact geometry-intersects test so a cell
//! sharing only bbox overlap is never credited. Point features skip the
//! refinement — cells are axis-aligned rectangles, so the bbox test is
//! already exact for points. Each feature contributes exactly once to
//! every cell it genuinely intersects.

use crate::error::ScoreError;
use crate::index::{Candidates, CellIndex};
use geo::{BoundingRect, Euclidean, Geometry, Length, LineString, Polygon};
use gridscore_core::{CancelToken, ReducePolicy};
use gridscore_geom::{Feature, GeometryKind};
use gridscore_grid::CellArena;

/// How many features are processed between cancellation checks.
const CANCEL_STRIDE: usize = 64;

/// Fold a feature layer into per-cell statistics on the arena.
///
/// Cells with no intersecting features keep the identity statistic
/// `0.0`. The pass writes each cell's statistic exactly once, after the
/// whole layer has been folded.
pub fn reduce(
    arena: &mut CellArena,
    index: &CellIndex,
    features: &[Feature],
    policy: &ReducePolicy,
    cancel: &CancelToken,
) -> Result<(), ScoreError> {
    let mut stats = vec![0.0f64; arena.len()];

    for (i, feature) in features.iter().enumerate() {
        if i % CANCEL_STRIDE == 0 && cancel.is_cancelled() {
            return Err(ScoreError::Cancelled);
        }

        let Some(kind) = feature.kind() else {
            continue;
        };
        if feature.geometry.bounding_rect().is_none() {
            // Empty geometry carries no position; skip.
            continue;
        }
        let Some(metric) = feature_metric(feature, i, policy)? else {
            continue;
        };

        let cells = match kind {
            GeometryKind::Point => point_cells(&feature.geometry, index),
            GeometryKind::Line | GeometryKind::Polygon => {
                refined_cells(&feature.geometry, index, arena)
            }
        };

        for id in cells {
            let slot = &mut stats[id.index()];
            *slot = policy.combine(*slot, metric);
        }
    }

    arena
        .apply_statistics(&stats)
        .map_err(|e| ScoreError::StatisticPassFailed {
            reason: e.to_string(),
        })
}

/// Cells containing a point feature, deduplicated for multipoints.
fn point_cells(geometry: &Geometry<f64>, index: &CellIndex) -> Candidates {
    let mut cells = Candidates::new();
    let mut add_point = |x: f64, y: f64| {
        for id in index.locate_point(x, y) {
            if !cells.contains(&id) {
                cells.push(id);
            }
        }
    };
    match geometry {
        Geometry::Point(p) => add_point(p.x(), p.y()),
        Geometry::MultiPoint(mp) => {
            for p in &mp.0 {
                add_point(p.x(), p.y());
            }
        }
        _ => {}
    }
    cells
}

/// Coarse candidates refined by exact intersection with cell polygons.
fn refined_cells(geometry: &Geometry<f64>, index: &CellIndex, arena: &CellArena) -> Candidates {
    use geo::Intersects;
    index
        .candidates(geometry)
        .into_iter()
        .filter(|id| {
            arena
                .get(*id)
                .is_some_and(|cell| geometry.intersects(&cell.rect.to_polygon()))
        })
        .collect()
}

/// The per-feature metric a policy folds, or `None` when the feature's
/// geometry type does not participate in the policy's workflow.
fn feature_metric(
    feature: &Feature,
    feature_index: usize,
    policy: &ReducePolicy,
) -> Result<Option<f64>, ScoreError> {
    match policy {
        ReducePolicy::Count => Ok(Some(0.0)),
        ReducePolicy::MaxPerimeter => Ok(match &feature.geometry {
            Geometry::Polygon(p) => Some(perimeter(p)),
            Geometry::MultiPolygon(mp) => Some(mp.0.iter().map(perimeter).sum()),
            _ => None,
        }),
        ReducePolicy::MaxLength => Ok(match &feature.geometry {
            Geometry::LineString(ls) => Some(Euclidean.length(ls)),
            Geometry::MultiLineString(mls) => {
                Some(mls.0.iter().map(|ls| Euclidean.length(ls)).sum())
            }
            _ => None,
        }),
        ReducePolicy::MaxScore { attribute } => {
            // Any geometry kind may carry a precomputed score.
            feature
                .numeric_attribute(attribute)
                .map(Some)
                .ok_or(ScoreError::MissingAttribute {
                    name: attribute.clone(),
                    feature: feature_index,
                })
        }
    }
}

/// Total boundary length of a polygon: exterior ring plus holes.
fn perimeter(polygon: &Polygon<f64>) -> f64 {
    let ring_length = |ring: &LineString<f64>| Euclidean.length(ring);
    ring_length(polygon.exterior())
        + polygon
            .interiors()
            .iter()
            .map(ring_length)
            .sum::<f64>()
}
