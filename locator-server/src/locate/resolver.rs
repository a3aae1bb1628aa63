//! Weighted nearest-station search.

use serde::Serialize;

use crate::domain::{LatLng, Station};
use crate::geo::haversine_meters;

use super::address::LocalityTokens;

/// Tuning parameters for the nearest-station search.
///
/// The defaults are the reference business constants; they have no derived
/// meaning beyond having been tuned in production.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Hard search radius in meters. Stations farther than this are never
    /// considered, regardless of address match.
    pub max_radius_meters: f64,

    /// Multiplier applied when the station shares the query's neighborhood.
    pub neighborhood_discount: f64,

    /// Multiplier applied when the station shares only the query's district.
    pub district_discount: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_radius_meters: 3000.0,
            neighborhood_discount: 0.75,
            district_discount: 0.90,
        }
    }
}

/// A resolved station together with its true physical distance.
///
/// `distance_meters` is always the unweighted haversine distance. The
/// locality discount only influences which station wins; it never leaks
/// into the reported value.
#[derive(Debug, Clone, Serialize)]
pub struct StationMatch {
    pub station: Station,
    pub distance_meters: f64,
}

/// Find the best-matching station for a query point.
///
/// Walks the catalog once, tracking the minimum locality-weighted
/// distance. Stations without a valid location are skipped; stations
/// beyond the radius are discarded before weighting. Ties on the weighted
/// distance go to the first candidate in catalog order — the comparison
/// is a strict less-than, so iteration order is part of the contract and
/// the catalog builder keeps it deterministic.
///
/// Returns `None` when no station survives the radius filter.
pub fn find_nearby_station(
    stations: &[Station],
    query: LatLng,
    address: Option<&str>,
    config: &ResolverConfig,
) -> Option<StationMatch> {
    let query_tokens = address.map(LocalityTokens::parse).unwrap_or_default();

    let mut best: Option<(usize, f64, f64)> = None; // (index, weighted, physical)

    for (idx, station) in stations.iter().enumerate() {
        if !station.location.is_valid() {
            continue;
        }

        let distance = haversine_meters(query, station.location);
        if distance > config.max_radius_meters {
            continue;
        }

        let weighted = distance * discount_factor(station, &query_tokens, config);

        if best.is_none_or(|(_, best_weighted, _)| weighted < best_weighted) {
            best = Some((idx, weighted, distance));
        }
    }

    best.map(|(idx, _, distance)| StationMatch {
        station: stations[idx].clone(),
        distance_meters: distance,
    })
}

/// Locality discount for one candidate. The two levels are mutually
/// exclusive: a neighborhood match must not also receive the district
/// discount, which would compound into an unintended deeper discount.
fn discount_factor(station: &Station, query: &LocalityTokens, config: &ResolverConfig) -> f64 {
    if query.is_empty() {
        return 1.0;
    }

    let Some(address) = station.address.as_deref() else {
        return 1.0;
    };
    let station_tokens = LocalityTokens::parse(address);

    if query.same_neighborhood(&station_tokens) {
        config.neighborhood_discount
    } else if query.same_district(&station_tokens) {
        config.district_discount
    } else {
        1.0
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::geo::haversine_meters;
    use proptest::prelude::*;

    fn arb_station() -> impl Strategy<Value = Station> {
        (
            "[a-z]{1,8}",
            37.3f64..37.7,
            126.8f64..127.2,
            proptest::option::of(proptest::sample::select(vec![
                "강남구 역삼동 1",
                "강남구 논현동 2",
                "서초구 반포동 3",
                "중구 남대문로5가 4",
            ])),
        )
            .prop_map(|(name, lat, lng, addr)| {
                Station::new(name, LatLng::new(lat, lng), "2호선", addr.map(String::from))
            })
    }

    proptest! {
        /// Whatever the catalog, a returned match is within the radius, has
        /// a valid location, and reports its true physical distance.
        #[test]
        fn radius_and_truthful_distance(
            stations in proptest::collection::vec(arb_station(), 0..40),
            qlat in 37.3f64..37.7,
            qlng in 126.8f64..127.2,
            address in proptest::option::of(proptest::sample::select(vec![
                "강남구 역삼동 7", "서초구 반포동 8", "not an address",
            ])),
        ) {
            let q = LatLng::new(qlat, qlng);
            let config = ResolverConfig::default();

            if let Some(m) = find_nearby_station(&stations, q, address, &config) {
                prop_assert!(m.distance_meters <= config.max_radius_meters);
                prop_assert!(m.station.location.is_valid());
                let true_distance = haversine_meters(q, m.station.location);
                prop_assert!((m.distance_meters - true_distance).abs() < 1e-9);
            }
        }

        /// Without an address, the result is exactly the physically nearest
        /// in-radius station.
        #[test]
        fn unweighted_is_plain_nearest(
            stations in proptest::collection::vec(arb_station(), 1..40),
            qlat in 37.3f64..37.7,
            qlng in 126.8f64..127.2,
        ) {
            let q = LatLng::new(qlat, qlng);
            let config = ResolverConfig::default();

            let result = find_nearby_station(&stations, q, None, &config);

            let nearest = stations
                .iter()
                .map(|s| haversine_meters(q, s.location))
                .filter(|d| *d <= config.max_radius_meters)
                .fold(f64::INFINITY, f64::min);

            match result {
                Some(m) => prop_assert!((m.distance_meters - nearest).abs() < 1e-9),
                None => prop_assert!(nearest.is_infinite()),
            }
        }
    }
}
