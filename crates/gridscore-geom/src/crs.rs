//! Coordinate reference systems and point transforms.
//!
//! `proj4rs` is a pure-Rust proj port with no bundled EPSG registry, so
//! [`Crs::Epsg`] resolves through a small internal table of the codes
//! this engine is actually used with; anything else is expressed as an
//! explicit proj string via [`Crs::Proj`]. Geographic CRSs work in
//! radians inside proj4rs, so the transformer converts degrees at both
//! ends when needed.

use crate::error::GeomError;
use proj4rs::proj::Proj;
use proj4rs::transform::transform;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A coordinate reference system, identified by EPSG code or given as a
/// raw proj string.
///
/// Equality on `Crs` decides whether reprojection is needed at all; two
/// different spellings of the same CRS are treated as different, which
/// costs a no-op transform rather than correctness.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Crs {
    /// Well-known EPSG code (e.g. 4326, 3857, 32633).
    Epsg(u32),
    /// Explicit proj string for systems outside the EPSG table.
    Proj(String),
}

impl Crs {
    /// WGS84 geographic coordinates (lon/lat degrees).
    pub const WGS84: Crs = Crs::Epsg(4326);

    /// Resolve to a proj string, or fail for unknown EPSG codes.
    pub fn proj_string(&self) -> Result<String, GeomError> {
        match self {
            Crs::Proj(s) => Ok(s.clone()),
            Crs::Epsg(code) => {
                epsg_proj_string(*code).ok_or_else(|| GeomError::ReprojectionFailed {
                    reason: format!("EPSG:{code} is not in the built-in table"),
                })
            }
        }
    }

    /// True when coordinates are lon/lat degrees rather than metres.
    pub fn is_geographic(&self) -> bool {
        self.proj_string()
            .map(|s| s.contains("+proj=longlat"))
            .unwrap_or(false)
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Crs::Epsg(code) => write!(f, "EPSG:{code}"),
            Crs::Proj(s) => write!(f, "{s}"),
        }
    }
}

/// Proj strings for the EPSG codes the engine supports natively.
///
/// UTM zones are generated: 32601-32660 (north) and 32701-32760 (south).
fn epsg_proj_string(code: u32) -> Option<String> {
    match code {
        4326 => Some("+proj=longlat +datum=WGS84 +no_defs".into()),
        3857 => Some(
            "+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 \
             +x_0=0 +y_0=0 +k=1 +units=m +no_defs"
                .into(),
        ),
        6933 => Some(
            "+proj=cea +lat_ts=30 +lon_0=0 +x_0=0 +y_0=0 +datum=WGS84 +units=m +no_defs".into(),
        ),
        2154 => Some(
            "+proj=lcc +lat_1=49 +lat_2=44 +lat_0=46.5 +lon_0=3 +x_0=700000 \
             +y_0=6600000 +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs"
                .into(),
        ),
        25832 => Some(
            "+proj=utm +zone=32 +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs".into(),
        ),
        32601..=32660 => Some(format!(
            "+proj=utm +zone={} +datum=WGS84 +units=m +no_defs",
            code - 32600
        )),
        32701..=32760 => Some(format!(
            "+proj=utm +zone={} +south +datum=WGS84 +units=m +no_defs",
            code - 32700
        )),
        _ => None,
    }
}

/// A reusable point transform between two CRSs.
///
/// Construction is the expensive part (proj string parsing), so callers
/// build one transformer per boundary or layer and apply it per
/// coordinate.
pub struct CoordTransformer {
    source: Proj,
    target: Proj,
    source_is_geographic: bool,
    target_is_geographic: bool,
}

impl fmt::Debug for CoordTransformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoordTransformer")
            .field("source_is_geographic", &self.source_is_geographic)
            .field("target_is_geographic", &self.target_is_geographic)
            .finish_non_exhaustive()
    }
}

impl CoordTransformer {
    /// Build a transformer from `source` to `target`.
    pub fn new(source: &Crs, target: &Crs) -> Result<Self, GeomError> {
        let source_str = source.proj_string()?;
        let target_str = target.proj_string()?;
        let source_proj =
            Proj::from_proj_string(&source_str).map_err(|e| GeomError::ReprojectionFailed {
                reason: format!("invalid source projection {source}: {e:?}"),
            })?;
        let target_proj =
            Proj::from_proj_string(&target_str).map_err(|e| GeomError::ReprojectionFailed {
                reason: format!("invalid target projection {target}: {e:?}"),
            })?;
        Ok(Self {
            source: source_proj,
            target: target_proj,
            source_is_geographic: source.is_geographic(),
            target_is_geographic: target.is_geographic(),
        })
    }

    /// Transform one coordinate pair from the source to the target CRS.
    pub fn apply(&self, x: f64, y: f64) -> Result<(f64, f64), GeomError> {
        let (in_x, in_y) = if self.source_is_geographic {
            (x.to_radians(), y.to_radians())
        } else {
            (x, y)
        };

        let mut point = (in_x, in_y, 0.0);
        transform(&self.source, &self.target, &mut point).map_err(|e| {
            GeomError::ReprojectionFailed {
                reason: format!("transform failed at ({x}, {y}): {e:?}"),
            }
        })?;

        if self.target_is_geographic {
            Ok((point.0.to_degrees(), point.1.to_degrees()))
        } else {
            Ok((point.0, point.1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn display_forms() {
        assert_eq!(Crs::Epsg(4326).to_string(), "EPSG:4326");
        assert_eq!(
            Crs::Proj("+proj=longlat +datum=WGS84 +no_defs".into()).to_string(),
            "+proj=longlat +datum=WGS84 +no_defs"
        );
    }

    #[test]
    fn wgs84_is_geographic_webmerc_is_not() {
        assert!(Crs::WGS84.is_geographic());
        assert!(!Crs::Epsg(3857).is_geographic());
    }

    #[test]
    fn unknown_epsg_fails() {
        let err = Crs::Epsg(99999).proj_string().unwrap_err();
        assert!(matches!(err, GeomError::ReprojectionFailed { .. }));
    }

    #[test]
    fn utm_zones_generated() {
        assert!(Crs::Epsg(32633).proj_string().unwrap().contains("+zone=33"));
        assert!(Crs::Epsg(32733).proj_string().unwrap().contains("+south"));
    }

    #[test]
    fn wgs84_to_webmerc_equator_origin() {
        let t = CoordTransformer::new(&Crs::WGS84, &Crs::Epsg(3857)).unwrap();
        let (x, y) = t.apply(0.0, 0.0).unwrap();
        assert!(x.abs() < 1e-6);
        assert!(y.abs() < 1e-6);
    }

    #[test]
    fn wgs84_to_webmerc_known_meridian() {
        // One degree of longitude on the spherical-mercator equator.
        let t = CoordTransformer::new(&Crs::WGS84, &Crs::Epsg(3857)).unwrap();
        let (x, _) = t.apply(1.0, 0.0).unwrap();
        assert!((x - 111_319.490_793).abs() < 1.0);
    }

    #[test]
    fn round_trip_through_webmerc() {
        let fwd = CoordTransformer::new(&Crs::WGS84, &Crs::Epsg(3857)).unwrap();
        let back = CoordTransformer::new(&Crs::Epsg(3857), &Crs::WGS84).unwrap();
        let (mx, my) = fwd.apply(13.4, 52.5).unwrap();
        let (lon, lat) = back.apply(mx, my).unwrap();
        assert!((lon - 13.4).abs() < 1e-6);
        assert!((lat - 52.5).abs() < 1e-6);
    }

    proptest! {
        // Forward-then-inverse through web mercator is the identity to
        // well under reprojection tolerance, away from the poles.
        #[test]
        fn webmerc_round_trip_is_identity(
            lon in -179.0f64..179.0,
            lat in -84.0f64..84.0,
        ) {
            let fwd = CoordTransformer::new(&Crs::WGS84, &Crs::Epsg(3857)).unwrap();
            let back = CoordTransformer::new(&Crs::Epsg(3857), &Crs::WGS84).unwrap();
            let (mx, my) = fwd.apply(lon, lat).unwrap();
            let (lon2, lat2) = back.apply(mx, my).unwrap();
            prop_assert!((lon2 - lon).abs() < 1e-6);
            prop_assert!((lat2 - lat).abs() < 1e-6);
        }
    }
}
