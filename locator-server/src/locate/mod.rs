//! Nearest-station resolution.
//!
//! The resolver is a pure linear scan over a catalog snapshot: haversine
//! distance, a hard search radius, and a locality discount that biases
//! ranking toward stations sharing the query address's administrative
//! district or neighborhood. The discount decides who wins; the reported
//! distance is always the winner's true physical distance.

mod address;
mod resolver;

pub use address::LocalityTokens;
pub use resolver::{ResolverConfig, StationMatch, find_nearby_station};
