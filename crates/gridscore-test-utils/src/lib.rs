//! Test fixtures and builders for gridscore development.
//!
//! Small constructors for boundaries and features used across the
//! workspace's unit and integration tests. Everything here builds in
//! a projected CRS with metre units unless a caller says otherwise.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use geo::{Geometry, LineString, MultiPolygon, Point, Polygon};
use gridscore_geom::{Boundary, Crs, Feature};
use serde_json::{Map, Value};

/// Web Mercator, the projected CRS most tests run in.
pub const TEST_CRS: Crs = Crs::Epsg(3857);

/// An axis-aligned square polygon with its lower-left corner at
/// (`min_x`, `min_y`).
pub fn square(min_x: f64, min_y: f64, side: f64) -> Polygon<f64> {
    Polygon::new(
        LineString::from(vec![
            (min_x, min_y),
            (min_x + side, min_y),
            (min_x + side, min_y + side),
            (min_x, min_y + side),
            (min_x, min_y),
        ]),
        vec![],
    )
}

/// A single-part square boundary with its lower-left corner at the
/// origin, in [`TEST_CRS`].
pub fn square_boundary(side: f64) -> Boundary {
    Boundary::new(MultiPolygon(vec![square(0.0, 0.0, side)]), TEST_CRS)
        .expect("square boundary is valid")
}

/// A two-part boundary: one square at the origin and one offset by
/// `gap` past the first square's far edge, both of size `side`.
pub fn two_island_boundary(side: f64, gap: f64) -> Boundary {
    Boundary::new(
        MultiPolygon(vec![square(0.0, 0.0, side), square(side + gap, 0.0, side)]),
        TEST_CRS,
    )
    .expect("two-island boundary is valid")
}

/// A point feature with no attributes.
pub fn point_feature(x: f64, y: f64) -> Feature {
    Feature::bare(Geometry::Point(Point::new(x, y)))
}

/// A line feature through the given coordinates, no attributes.
pub fn line_feature(coords: &[(f64, f64)]) -> Feature {
    Feature::bare(Geometry::LineString(LineString::from(coords.to_vec())))
}

/// A square polygon feature with no attributes.
pub fn square_feature(min_x: f64, min_y: f64, side: f64) -> Feature {
    Feature::bare(Geometry::Polygon(square(min_x, min_y, side)))
}

/// Attach one numeric attribute to a feature.
pub fn with_attribute(mut feature: Feature, name: &str, value: f64) -> Feature {
    let mut attrs = Map::new();
    attrs.insert(name.to_string(), Value::from(value));
    feature.attributes = attrs;
    feature
}
