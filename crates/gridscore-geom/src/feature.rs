//! Input features: a geometry plus opaque attributes.

use crate::error::GeomError;
use geo::Geometry;
use geojson::GeoJson;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Broad geometry classification used to route reducer behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeometryKind {
    /// Point or MultiPoint.
    Point,
    /// LineString or MultiLineString.
    Line,
    /// Polygon or MultiPolygon.
    Polygon,
}

/// A single input feature. Read-only to the engine: the geometry is
/// queried for intersection and measured, the attributes are only read
/// when a reduction policy names one.
#[derive(Clone, Debug)]
pub struct Feature {
    /// The feature's geometry in the layer's CRS.
    pub geometry: Geometry<f64>,
    /// Opaque attributes carried through from the source layer.
    pub attributes: Map<String, Value>,
}

impl Feature {
    /// A feature with no attributes.
    pub fn bare(geometry: Geometry<f64>) -> Self {
        Self {
            geometry,
            attributes: Map::new(),
        }
    }

    /// Classify the geometry, or `None` for collection/degenerate types
    /// the reducer does not credit (GeometryCollection, Rect, Triangle,
    /// Line).
    pub fn kind(&self) -> Option<GeometryKind> {
        match &self.geometry {
            Geometry::Point(_) | Geometry::MultiPoint(_) => Some(GeometryKind::Point),
            Geometry::LineString(_) | Geometry::MultiLineString(_) => Some(GeometryKind::Line),
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => Some(GeometryKind::Polygon),
            _ => None,
        }
    }

    /// Look up a numeric attribute by name.
    pub fn numeric_attribute(&self, name: &str) -> Option<f64> {
        self.attributes.get(name).and_then(Value::as_f64)
    }
}

/// Parse a feature layer from GeoJSON text.
///
/// Features with unconvertible or missing geometry are dropped; a layer
/// that parses but yields nothing is fine (an empty study area simply
/// scores zero everywhere). Only text that is not GeoJSON at all is an
/// error.
pub fn read_features(text: &str) -> Result<Vec<Feature>, GeomError> {
    let gj: GeoJson = text.parse().map_err(|e| GeomError::InvalidBoundary {
        reason: format!("feature layer is not valid GeoJSON: {e}"),
    })?;

    let mut out = Vec::new();
    match gj {
        GeoJson::Geometry(g) => {
            if let Ok(geom) = Geometry::<f64>::try_from(g.value) {
                out.push(Feature::bare(geom));
            }
        }
        GeoJson::Feature(f) => {
            if let Some(feat) = convert_feature(f) {
                out.push(feat);
            }
        }
        GeoJson::FeatureCollection(fc) => {
            out.extend(fc.features.into_iter().filter_map(convert_feature));
        }
    }
    Ok(out)
}

/// Load a feature layer from a GeoJSON file.
pub fn read_features_file(path: &Path) -> Result<Vec<Feature>, GeomError> {
    let text = fs::read_to_string(path).map_err(|e| GeomError::InvalidBoundary {
        reason: format!("cannot read {}: {e}", path.display()),
    })?;
    read_features(&text)
}

fn convert_feature(f: geojson::Feature) -> Option<Feature> {
    let geometry = Geometry::<f64>::try_from(f.geometry?.value).ok()?;
    Some(Feature {
        geometry,
        attributes: f.properties.unwrap_or_default(),
    })
}
