//! Korean national grid to WGS84 conversion.
//!
//! The railway open-data feed reports station positions as projected
//! eastings/northings (Korea 2000 / Central Belt, a Transverse Mercator
//! grid centered on 127°E) delivered as strings. Conversion is done with
//! proj4rs from inline PROJ4 definitions.
//!
//! The contract is deliberately fail-soft: any malformed input or
//! projection failure yields `LatLng::INVALID` rather than an error, so
//! that catalog building can filter bad records in bulk without
//! per-record error handling.

use proj4rs::proj::Proj;
use proj4rs::transform::transform;

use crate::domain::LatLng;

/// Korea 2000 / Central Belt (EPSG:5181).
const KOREA_CENTRAL_BELT: &str = "+proj=tmerc +lat_0=38 +lon_0=127 +k=1 +x_0=200000 \
     +y_0=500000 +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs";

/// WGS84 geographic.
const WGS84: &str = "+proj=longlat +ellps=WGS84 +towgs84=0,0,0 +no_defs";

/// Convert a projected grid coordinate pair to WGS84.
///
/// `x` and `y` are easting/northing strings as they arrive from the
/// upstream API. Returns `LatLng::INVALID` if either value is missing or
/// unparseable, or if the projection library reports failure. Never
/// panics.
pub fn grid_to_wgs84(x: &str, y: &str) -> LatLng {
    let Some((x, y)) = parse_pair(x, y) else {
        return LatLng::INVALID;
    };

    let Ok(source) = Proj::from_proj_string(KOREA_CENTRAL_BELT) else {
        return LatLng::INVALID;
    };
    let Ok(target) = Proj::from_proj_string(WGS84) else {
        return LatLng::INVALID;
    };

    let mut point = (x, y, 0.0);
    if transform(&source, &target, &mut point).is_err() {
        return LatLng::INVALID;
    }

    // proj4rs reports geographic coordinates in radians
    let lng = point.0.to_degrees();
    let lat = point.1.to_degrees();

    if !lat.is_finite() || !lng.is_finite() {
        return LatLng::INVALID;
    }

    LatLng::new(lat, lng)
}

/// Parse both inputs to finite floats, or give up.
fn parse_pair(x: &str, y: &str) -> Option<(f64, f64)> {
    let x: f64 = x.trim().parse().ok()?;
    let y: f64 = y.trim().parse().ok()?;
    if x.is_finite() && y.is_finite() {
        Some((x, y))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_inputs_yield_sentinel() {
        assert_eq!(grid_to_wgs84("", "500000"), LatLng::INVALID);
        assert_eq!(grid_to_wgs84("200000", ""), LatLng::INVALID);
        assert_eq!(grid_to_wgs84("abc", "500000"), LatLng::INVALID);
        assert_eq!(grid_to_wgs84("200000", "xyz"), LatLng::INVALID);
        assert_eq!(grid_to_wgs84("12,345", "500000"), LatLng::INVALID);
    }

    #[test]
    fn non_finite_inputs_yield_sentinel() {
        // "NaN" and "inf" parse as f64 but must not reach the projection
        assert_eq!(grid_to_wgs84("NaN", "500000"), LatLng::INVALID);
        assert_eq!(grid_to_wgs84("200000", "inf"), LatLng::INVALID);
    }

    #[test]
    fn grid_origin_maps_to_projection_center() {
        // The false origin (200000, 500000) sits at 38°N 127°E
        let p = grid_to_wgs84("200000", "500000");
        assert!(p.is_valid());
        assert!((p.lat - 38.0).abs() < 0.1, "lat {}", p.lat);
        assert!((p.lng - 127.0).abs() < 0.1, "lng {}", p.lng);
    }

    #[test]
    fn seoul_city_hall_vicinity() {
        // ~2 km west and ~48 km south of the false origin: central Seoul
        let p = grid_to_wgs84("198000", "452000");
        assert!(p.is_valid());
        assert!((p.lat - 37.567).abs() < 0.05, "lat {}", p.lat);
        assert!((p.lng - 126.977).abs() < 0.05, "lng {}", p.lng);
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let p = grid_to_wgs84(" 200000 ", "\t500000\n");
        assert!(p.is_valid());
    }

    #[test]
    fn deterministic() {
        let a = grid_to_wgs84("198000", "452000");
        let b = grid_to_wgs84("198000", "452000");
        assert_eq!(a.lat.to_bits(), b.lat.to_bits());
        assert_eq!(a.lng.to_bits(), b.lng.to_bits());
    }
}
