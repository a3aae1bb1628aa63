//! Station and coordinate types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate pair in decimal degrees.
///
/// The pair `(0, 0)` is reserved as the "conversion failed / no valid
/// location" sentinel. Nothing in this domain sits in the Gulf of Guinea,
/// so the sentinel never collides with a real position.
///
/// # Examples
///
/// ```
/// use locator_server::domain::LatLng;
///
/// let seoul = LatLng::new(37.5547, 126.9707);
/// assert!(seoul.is_valid());
/// assert!(!LatLng::INVALID.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
}

impl LatLng {
    /// The sentinel value signalling "no valid location".
    pub const INVALID: LatLng = LatLng { lat: 0.0, lng: 0.0 };

    /// Create a coordinate pair.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns true if this is a usable coordinate: finite and not the
    /// `(0, 0)` sentinel.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite() && !(self.lat == 0.0 && self.lng == 0.0)
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

/// A subway station as consumed by the resolver.
///
/// Station names are not globally unique in the raw feed (one record per
/// line); the catalog builder merges records sharing a name into a single
/// station with the union of lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    /// Display name, e.g. "역삼".
    pub name: String,

    /// WGS84 location. `LatLng::INVALID` marks a failed conversion; such
    /// stations are dropped at catalog build time.
    pub location: LatLng,

    /// Lines serving this station, in first-seen order.
    pub lines: Vec<String>,

    /// Administrative address (road or lot), used only for locality
    /// scoring, never for distance.
    pub address: Option<String>,
}

impl Station {
    /// Create a station on a single line.
    pub fn new(
        name: impl Into<String>,
        location: LatLng,
        line: impl Into<String>,
        address: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            location,
            lines: vec![line.into()],
            address,
        }
    }
}
