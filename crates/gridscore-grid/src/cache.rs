//! Grid persistence and the idempotent path cache.
//!
//! Grids are written as GeoJSON FeatureCollections: one polygon
//! feature per cell with `id`, `intersecting_features`, and `score`
//! properties, plus grid metadata (spacing, CRS) as foreign members.
//! Paths are deterministic and caller-chosen, so re-running the same
//! configuration finds its prior outputs.

use crate::arena::CellArena;
use crate::error::GridError;
use crate::generator::GridParams;
use geo::{BoundingRect, Rect};
use geojson::{Feature, FeatureCollection, GeoJson};
use gridscore_core::{CellId, Score};
use gridscore_geom::Crs;
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Deterministic output paths for one grid-generation invocation.
///
/// Every invocation writes to its own `work_dir`/`stem` pair, so
/// concurrent invocations never share mutable files.
#[derive(Clone, Debug)]
pub struct GridPaths {
    work_dir: PathBuf,
    stem: String,
}

impl GridPaths {
    /// Paths rooted at `work_dir` with the given filename stem.
    pub fn new(work_dir: impl Into<PathBuf>, stem: impl Into<String>) -> Self {
        Self {
            work_dir: work_dir.into(),
            stem: stem.into(),
        }
    }

    /// Path for the clipped grid of one study-area part.
    pub fn part_path(&self, part: usize) -> PathBuf {
        self.work_dir
            .join(format!("{}_part_{part}.geojson", self.stem))
    }

    /// Path for the merged grid.
    pub fn merged_path(&self) -> PathBuf {
        self.work_dir.join(format!("{}_grid.geojson", self.stem))
    }
}

/// Write a grid to a GeoJSON file.
pub fn write_grid(arena: &CellArena, path: &Path) -> Result<(), GridError> {
    let features = arena
        .cells()
        .iter()
        .map(|cell| {
            let mut properties = Map::new();
            properties.insert("id".into(), json!(cell.id.0));
            properties.insert(
                "intersecting_features".into(),
                json!(cell.statistic),
            );
            properties.insert(
                "score".into(),
                cell.score.map(|s| json!(s.0)).unwrap_or(Value::Null),
            );
            Feature {
                bbox: None,
                geometry: Some(geojson::Geometry::new(geojson::Value::from(
                    &cell.rect.to_polygon(),
                ))),
                id: Some(geojson::feature::Id::Number(cell.id.0.into())),
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    let mut foreign = Map::new();
    foreign.insert("h_spacing".into(), json!(arena.h_spacing()));
    foreign.insert("v_spacing".into(), json!(arena.v_spacing()));
    foreign.insert(
        "crs".into(),
        serde_json::to_value(arena.crs()).map_err(|e| GridError::Persistence {
            path: path.to_path_buf(),
            reason: format!("cannot serialise CRS: {e}"),
        })?,
    );

    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: Some(foreign),
    };
    fs::write(path, GeoJson::FeatureCollection(collection).to_string()).map_err(|e| {
        GridError::Persistence {
            path: path.to_path_buf(),
            reason: format!("write failed: {e}"),
        }
    })
}

/// Read a grid back from a GeoJSON file written by [`write_grid`].
///
/// The file's spacing and CRS metadata must match `params`; a mismatch
/// means the cached grid belongs to a different configuration and
/// reusing it would silently misalign every downstream stage.
pub fn read_grid(path: &Path, params: &GridParams) -> Result<CellArena, GridError> {
    let persistence_err = |reason: String| GridError::Persistence {
        path: path.to_path_buf(),
        reason,
    };

    let text = fs::read_to_string(path).map_err(|e| persistence_err(format!("read failed: {e}")))?;
    let gj: GeoJson = text
        .parse()
        .map_err(|e| persistence_err(format!("not valid GeoJSON: {e}")))?;
    let GeoJson::FeatureCollection(collection) = gj else {
        return Err(persistence_err("expected a FeatureCollection".into()));
    };

    let foreign = collection
        .foreign_members
        .as_ref()
        .ok_or_else(|| persistence_err("missing grid metadata".into()))?;
    let h_spacing = foreign
        .get("h_spacing")
        .and_then(Value::as_f64)
        .ok_or_else(|| persistence_err("missing h_spacing metadata".into()))?;
    let v_spacing = foreign
        .get("v_spacing")
        .and_then(Value::as_f64)
        .ok_or_else(|| persistence_err("missing v_spacing metadata".into()))?;
    if h_spacing != params.h_spacing || v_spacing != params.v_spacing {
        return Err(persistence_err(format!(
            "cached grid spacing {h_spacing} x {v_spacing} does not match requested {} x {}",
            params.h_spacing, params.v_spacing
        )));
    }
    let crs: Crs = foreign
        .get("crs")
        .cloned()
        .ok_or_else(|| persistence_err("missing crs metadata".into()))
        .and_then(|value| {
            serde_json::from_value(value)
                .map_err(|e| persistence_err(format!("unreadable crs metadata: {e}")))
        })?;
    if crs != params.crs {
        return Err(persistence_err(format!(
            "cached grid CRS {crs} does not match requested {}",
            params.crs
        )));
    }

    let mut arena = CellArena::new(h_spacing, v_spacing, params.crs.clone());
    for (index, feature) in collection.features.into_iter().enumerate() {
        let rect = feature_rect(&feature)
            .ok_or_else(|| persistence_err(format!("feature {index} has no polygon geometry")))?;
        let id = arena.push_cell(rect);
        if id.0 != index as u64 {
            return Err(persistence_err(format!(
                "cell ids are not sequential at feature {index}"
            )));
        }
        let props = feature.properties.unwrap_or_default();
        let stored_id = props.get("id").and_then(Value::as_u64);
        if stored_id != Some(index as u64) {
            return Err(persistence_err(format!(
                "feature {index} carries id {stored_id:?}, expected {index}"
            )));
        }
        let statistic = props
            .get("intersecting_features")
            .and_then(Value::as_f64)
            .unwrap_or(0.0);
        let score = props
            .get("score")
            .and_then(Value::as_u64)
            .map(|s| Score(s as u8));
        arena.set_state(CellId(index as u64), statistic, score);
    }
    Ok(arena)
}

/// Recover the axis-aligned cell rectangle from a persisted polygon.
fn feature_rect(feature: &Feature) -> Option<Rect<f64>> {
    let geometry = feature.geometry.as_ref()?;
    let geom = geo::Geometry::<f64>::try_from(geometry.value.clone()).ok()?;
    match geom {
        geo::Geometry::Polygon(p) => p.bounding_rect(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    fn small_arena() -> CellArena {
        let mut a = CellArena::new(1.0, 1.0, Crs::Epsg(3857));
        a.push_cell(Rect::new(
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 1.0, y: 1.0 },
        ));
        a.push_cell(Rect::new(
            coord! { x: 1.0, y: 0.0 },
            coord! { x: 2.0, y: 1.0 },
        ));
        a
    }

    fn small_params() -> GridParams {
        GridParams {
            h_spacing: 1.0,
            v_spacing: 1.0,
            crs: Crs::Epsg(3857),
        }
    }

    #[test]
    fn round_trip_preserves_cells_and_scores() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.geojson");

        let mut arena = small_arena();
        arena.apply_statistics(&[2.0, 0.0]).unwrap();
        arena.apply_scores(|s| if s > 1.0 { Score(5) } else { Score(0) });
        write_grid(&arena, &path).unwrap();

        let restored = read_grid(&path, &small_params()).unwrap();
        assert_eq!(restored.len(), 2);
        assert_eq!(restored.get(CellId(0)).unwrap().statistic, 2.0);
        assert_eq!(restored.get(CellId(0)).unwrap().score, Some(Score(5)));
        assert_eq!(restored.get(CellId(1)).unwrap().score, Some(Score(0)));
        assert_eq!(restored.get(CellId(0)).unwrap().rect, arena.cells()[0].rect);
    }

    #[test]
    fn spacing_mismatch_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.geojson");
        write_grid(&small_arena(), &path).unwrap();

        let mut wrong = small_params();
        wrong.h_spacing = 2.0;
        let err = read_grid(&path, &wrong).unwrap_err();
        assert!(matches!(err, GridError::Persistence { .. }));
    }

    #[test]
    fn crs_mismatch_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.geojson");
        write_grid(&small_arena(), &path).unwrap();

        let mut wrong = small_params();
        wrong.crs = Crs::Epsg(32633);
        let err = read_grid(&path, &wrong).unwrap_err();
        assert!(matches!(err, GridError::Persistence { .. }));
    }

    #[test]
    fn missing_file_is_persistence_error() {
        let err = read_grid(Path::new("/nonexistent/grid.geojson"), &small_params()).unwrap_err();
        assert!(matches!(err, GridError::Persistence { .. }));
    }

    #[test]
    fn paths_are_deterministic() {
        let p = GridPaths::new("/tmp/run", "study");
        assert_eq!(
            p.part_path(2),
            PathBuf::from("/tmp/run/study_part_2.geojson")
        );
        assert_eq!(p.merged_path(), PathBuf::from("/tmp/run/study_grid.geojson"));
    }
}
