//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::Station;
use crate::locate::StationMatch;

/// Query parameters for the nearby-station lookup.
#[derive(Debug, Deserialize)]
pub struct NearbyStationRequest {
    /// Query latitude, WGS84 decimal degrees.
    pub lat: f64,

    /// Query longitude, WGS84 decimal degrees.
    pub lng: f64,

    /// Optional free-text address used for locality weighting.
    pub address: Option<String>,
}

/// A station in a response body.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub lines: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl StationResult {
    pub fn from_station(station: &Station) -> Self {
        Self {
            name: station.name.clone(),
            lat: station.location.lat,
            lng: station.location.lng,
            lines: station.lines.clone(),
            address: station.address.clone(),
        }
    }
}

/// Successful nearby-station response.
#[derive(Debug, Serialize)]
pub struct NearbyStationResponse {
    pub station: StationResult,

    /// True physical distance in meters (never the weighted score).
    pub distance_meters: f64,
}

impl NearbyStationResponse {
    pub fn from_match(m: &StationMatch) -> Self {
        Self {
            station: StationResult::from_station(&m.station),
            distance_meters: m.distance_meters,
        }
    }
}

/// Catalog listing response.
#[derive(Debug, Serialize)]
pub struct StationListResponse {
    pub count: usize,
    pub stations: Vec<StationResult>,
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
