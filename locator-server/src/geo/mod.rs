//! Geospatial primitives: grid-to-WGS84 conversion and haversine distance.

pub mod distance;
pub mod transform;

pub use distance::haversine_meters;
pub use transform::grid_to_wgs84;
