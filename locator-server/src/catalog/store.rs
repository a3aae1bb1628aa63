//! In-memory station catalog with background refresh support.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use tracing::info;

use crate::domain::{LatLng, Station};
use crate::geo::grid_to_wgs84;

use super::client::StationDto;
use super::error::CatalogError;
use super::source::TieredSource;

/// An immutable view of the catalog at a point in time.
///
/// The generation counter increments on every refresh; it lets downstream
/// caches key on the snapshot identity instead of its contents.
#[derive(Clone)]
pub struct CatalogSnapshot {
    /// Built stations, in deterministic first-seen order.
    pub stations: Arc<Vec<Station>>,
    /// Monotonic snapshot generation, starting at 0.
    pub generation: u64,
}

/// Thread-safe station catalog.
///
/// Resolvers always operate on a snapshot; `refresh` swaps the snapshot
/// atomically and preserves the old one when the live fetch fails.
#[derive(Clone)]
pub struct StationCatalog {
    inner: Arc<RwLock<CatalogSnapshot>>,
    source: Arc<TieredSource>,
}

impl StationCatalog {
    /// Load the catalog through the tiered source chain.
    ///
    /// Only fails if every tier fails, including the bundled snapshot.
    pub async fn load(source: TieredSource) -> Result<Self, CatalogError> {
        let (dtos, origin) = source.load().await?;
        let stations = build_stations(dtos);

        info!(count = stations.len(), origin = %origin, "station catalog loaded");

        Ok(Self {
            inner: Arc::new(RwLock::new(CatalogSnapshot {
                stations: Arc::new(stations),
                generation: 0,
            })),
            source: Arc::new(source),
        })
    }

    /// Get the current snapshot.
    pub async fn snapshot(&self) -> CatalogSnapshot {
        self.inner.read().await.clone()
    }

    /// Get the number of stations in the current snapshot.
    pub async fn len(&self) -> usize {
        self.inner.read().await.stations.len()
    }

    /// Check if the catalog is empty.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.stations.is_empty()
    }

    /// Refresh the catalog from the live API.
    ///
    /// On success, swaps in a new snapshot and returns the station count.
    /// On failure, the existing snapshot is preserved and the error is
    /// returned.
    pub async fn refresh(&self) -> Result<usize, CatalogError> {
        let dtos = self.source.fetch_live().await?;
        let stations = build_stations(dtos);
        let count = stations.len();

        let mut guard = self.inner.write().await;
        guard.generation += 1;
        guard.stations = Arc::new(stations);

        Ok(count)
    }
}

/// Build resolver-ready stations from raw feed records.
///
/// Positions are taken from the pre-resolved lat/lng when present,
/// otherwise converted from the projected grid strings. Records whose
/// position resolves to the sentinel are dropped. Records sharing a name
/// are merged: lines are unioned, the first valid position and first
/// non-empty address win. First-seen order is preserved so resolver
/// iteration (and therefore tie-breaking) is deterministic.
pub fn build_stations(dtos: Vec<StationDto>) -> Vec<Station> {
    let mut stations: Vec<Station> = Vec::new();
    let mut by_name: HashMap<String, usize> = HashMap::new();

    for dto in dtos {
        let location = resolve_location(&dto);

        match by_name.get(&dto.name) {
            Some(&idx) => {
                let existing = &mut stations[idx];
                if !existing.lines.contains(&dto.line) {
                    existing.lines.push(dto.line);
                }
                if existing.address.is_none()
                    && let Some(addr) = dto.address
                    && !addr.trim().is_empty()
                {
                    existing.address = Some(addr);
                }
            }
            None => {
                if !location.is_valid() {
                    continue;
                }
                by_name.insert(dto.name.clone(), stations.len());
                stations.push(Station {
                    name: dto.name,
                    location,
                    lines: vec![dto.line],
                    address: dto.address.filter(|a| !a.trim().is_empty()),
                });
            }
        }
    }

    stations
}

/// Resolve a record's position: pre-resolved lat/lng first, then the
/// projected grid pair, then the sentinel.
fn resolve_location(dto: &StationDto) -> LatLng {
    if let (Some(lat), Some(lng)) = (dto.lat, dto.lng) {
        let point = LatLng::new(lat, lng);
        if point.is_valid() {
            return point;
        }
    }

    match (dto.x.as_deref(), dto.y.as_deref()) {
        (Some(x), Some(y)) => grid_to_wgs84(x, y),
        _ => LatLng::INVALID,
    }
}
