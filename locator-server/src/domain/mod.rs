//! Domain types for the station locator.
//!
//! These types represent validated catalog data. A `Station` in a built
//! catalog always carries a valid (non-sentinel) location; the resolver
//! still checks defensively because snapshots can be constructed by hand
//! in tests.

mod station;

pub use station::{LatLng, Station};
