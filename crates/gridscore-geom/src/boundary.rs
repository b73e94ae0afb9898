//! Study-area boundaries: loading, validation, part decomposition.

use crate::crs::{CoordTransformer, Crs};
use crate::error::GeomError;
use geo::{BoundingRect, Coord, MapCoords, MultiPolygon, Polygon, Validation};
use geojson::GeoJson;
use std::fs;
use std::path::Path;

/// A study-area boundary: one or more polygon parts with a CRS.
///
/// Each part is one connected polygon component; multi-part boundaries
/// (island nations, enclaves) are gridded part-by-part so disjoint land
/// masses are never bridged by a shared bounding box.
#[derive(Clone, Debug)]
pub struct Boundary {
    geometry: MultiPolygon<f64>,
    crs: Crs,
}

impl Boundary {
    /// Wrap an in-memory multipolygon, checking the data-model
    /// invariant that every part is a valid (non-self-intersecting)
    /// geometry.
    pub fn new(geometry: MultiPolygon<f64>, crs: Crs) -> Result<Self, GeomError> {
        if geometry.0.is_empty() {
            return Err(GeomError::InvalidBoundary {
                reason: "boundary has no polygon parts".into(),
            });
        }
        for (i, part) in geometry.0.iter().enumerate() {
            if part.exterior().0.len() < 4 {
                return Err(GeomError::InvalidBoundary {
                    reason: format!("part {i} has fewer than 3 distinct vertices"),
                });
            }
            if !part.is_valid() {
                return Err(GeomError::InvalidBoundary {
                    reason: format!("part {i} is not a valid polygon"),
                });
            }
        }
        Ok(Self { geometry, crs })
    }

    /// Parse a boundary from GeoJSON text.
    ///
    /// Accepts a bare geometry, a feature, or a feature collection;
    /// every Polygon/MultiPolygon found contributes its parts. Non-areal
    /// geometry in the source is rejected rather than skipped, since a
    /// boundary file containing points or lines is almost certainly the
    /// wrong file.
    pub fn from_geojson_str(text: &str, crs: Crs) -> Result<Self, GeomError> {
        let gj: GeoJson = text.parse().map_err(|e| GeomError::InvalidBoundary {
            reason: format!("not valid GeoJSON: {e}"),
        })?;

        let mut parts: Vec<Polygon<f64>> = Vec::new();
        let mut collect = |value: geojson::Value| -> Result<(), GeomError> {
            match geo_types::Geometry::<f64>::try_from(value) {
                Ok(geo_types::Geometry::Polygon(p)) => {
                    parts.push(p);
                    Ok(())
                }
                Ok(geo_types::Geometry::MultiPolygon(mp)) => {
                    parts.extend(mp.0);
                    Ok(())
                }
                Ok(other) => Err(GeomError::InvalidBoundary {
                    reason: format!("boundary contains non-areal geometry ({other:?})"),
                }),
                Err(e) => Err(GeomError::InvalidBoundary {
                    reason: format!("unconvertible geometry: {e}"),
                }),
            }
        };

        match gj {
            GeoJson::Geometry(g) => collect(g.value)?,
            GeoJson::Feature(f) => {
                let g = f.geometry.ok_or_else(|| GeomError::InvalidBoundary {
                    reason: "boundary feature has no geometry".into(),
                })?;
                collect(g.value)?;
            }
            GeoJson::FeatureCollection(fc) => {
                for f in fc.features {
                    if let Some(g) = f.geometry {
                        collect(g.value)?;
                    }
                }
            }
        }

        Self::new(MultiPolygon(parts), crs)
    }

    /// Load a boundary from a GeoJSON file.
    pub fn from_geojson_file(path: &Path, crs: Crs) -> Result<Self, GeomError> {
        let text = fs::read_to_string(path).map_err(|e| GeomError::InvalidBoundary {
            reason: format!("cannot read {}: {e}", path.display()),
        })?;
        Self::from_geojson_str(&text, crs)
    }

    /// The boundary's CRS.
    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    /// The full multipolygon geometry.
    pub fn geometry(&self) -> &MultiPolygon<f64> {
        &self.geometry
    }

    /// Iterate the connected parts in source order.
    pub fn parts(&self) -> impl Iterator<Item = &Polygon<f64>> {
        self.geometry.0.iter()
    }

    /// Number of connected parts.
    pub fn part_count(&self) -> usize {
        self.geometry.0.len()
    }

    /// Reproject every coordinate into `target`, leaving this boundary
    /// untouched. A same-CRS call returns a plain clone.
    pub fn reprojected(&self, target: &Crs) -> Result<Boundary, GeomError> {
        if &self.crs == target {
            return Ok(self.clone());
        }
        let transformer = CoordTransformer::new(&self.crs, target)?;
        let geometry = self
            .geometry
            .try_map_coords(|c: Coord<f64>| -> Result<Coord<f64>, GeomError> {
                let (x, y) = transformer.apply(c.x, c.y)?;
                Ok(Coord { x, y })
            })?;
        Ok(Boundary {
            geometry,
            crs: target.clone(),
        })
    }

    /// Bounding extent of the whole boundary in its own CRS.
    pub fn extent(&self) -> Result<gridscore_core::Extent, GeomError> {
        let rect = self
            .geometry
            .bounding_rect()
            .ok_or_else(|| GeomError::InvalidBoundary {
                reason: "boundary has no coordinates".into(),
            })?;
        Ok(gridscore_core::Extent::new(
            rect.min().x,
            rect.min().y,
            rect.max().x,
            rect.max().y,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    fn unit_square() -> Polygon<f64> {
        polygon![
            (x: 0.0, y: 0.0),
            (x: 10.0, y: 0.0),
            (x: 10.0, y: 10.0),
            (x: 0.0, y: 10.0),
            (x: 0.0, y: 0.0),
        ]
    }

    #[test]
    fn accepts_valid_polygon() {
        let b = Boundary::new(MultiPolygon(vec![unit_square()]), Crs::Epsg(3857)).unwrap();
        assert_eq!(b.part_count(), 1);
    }

    #[test]
    fn rejects_empty_multipolygon() {
        let err = Boundary::new(MultiPolygon(vec![]), Crs::WGS84).unwrap_err();
        assert!(matches!(err, GeomError::InvalidBoundary { .. }));
    }

    #[test]
    fn rejects_self_intersecting_part() {
        // Bowtie: exterior crosses itself.
        let bowtie = polygon![
            (x: 0.0, y: 0.0),
            (x: 2.0, y: 2.0),
            (x: 2.0, y: 0.0),
            (x: 0.0, y: 2.0),
            (x: 0.0, y: 0.0),
        ];
        let err = Boundary::new(MultiPolygon(vec![bowtie]), Crs::WGS84).unwrap_err();
        assert!(matches!(err, GeomError::InvalidBoundary { .. }));
    }

    #[test]
    fn parses_feature_collection() {
        let text = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0,0],[10,0],[10,10],[0,10],[0,0]]]
                }
            }]
        }"#;
        let b = Boundary::from_geojson_str(text, Crs::Epsg(3857)).unwrap();
        assert_eq!(b.part_count(), 1);
        let e = b.extent().unwrap();
        assert_eq!(e.width(), 10.0);
    }

    #[test]
    fn rejects_garbage_text() {
        let err = Boundary::from_geojson_str("not json at all", Crs::WGS84).unwrap_err();
        assert!(matches!(err, GeomError::InvalidBoundary { .. }));
    }

    #[test]
    fn rejects_point_boundary() {
        let text = r#"{"type": "Point", "coordinates": [1.0, 2.0]}"#;
        let err = Boundary::from_geojson_str(text, Crs::WGS84).unwrap_err();
        assert!(matches!(err, GeomError::InvalidBoundary { .. }));
    }

    #[test]
    fn same_crs_reprojection_is_clone() {
        let b = Boundary::new(MultiPolygon(vec![unit_square()]), Crs::Epsg(3857)).unwrap();
        let r = b.reprojected(&Crs::Epsg(3857)).unwrap();
        assert_eq!(r.geometry(), b.geometry());
    }
}
