//! Tiered catalog sourcing with graceful degradation.
//!
//! Station data is tried in order: live API, then the disk cache
//! regardless of age, then a bundled snapshot compiled into the binary.
//! The service therefore starts and answers queries even with no API key
//! and no network, just with older data.

use std::fmt;

use tracing::{info, warn};

use super::cache::CatalogCache;
use super::client::{KricClient, StationDto};
use super::error::CatalogError;

/// Bundled snapshot of the metropolitan network, used as the last tier.
const BUNDLED_STATIONS: &str = include_str!("../../data/stations_fallback.json");

/// Which tier produced the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogOrigin {
    /// Fetched from the live API.
    Live,
    /// Loaded from the disk cache (possibly stale).
    Cache,
    /// Bundled snapshot compiled into the binary.
    Bundled,
}

impl fmt::Display for CatalogOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogOrigin::Live => f.write_str("live"),
            CatalogOrigin::Cache => f.write_str("cache"),
            CatalogOrigin::Bundled => f.write_str("bundled"),
        }
    }
}

/// Ordered fallback chain of station data sources.
pub struct TieredSource {
    client: Option<KricClient>,
    cache: CatalogCache,
}

impl TieredSource {
    /// Create a tiered source. `client` is `None` when no API key is
    /// configured; the live tier is then skipped.
    pub fn new(client: Option<KricClient>, cache: CatalogCache) -> Self {
        Self { client, cache }
    }

    /// Fetch from the live API only, writing through to the disk cache.
    ///
    /// This is the refresh path: callers keep their previous snapshot when
    /// it fails.
    pub async fn fetch_live(&self) -> Result<Vec<StationDto>, CatalogError> {
        let client = self.client.as_ref().ok_or(CatalogError::MissingApiKey)?;
        let stations = client.fetch_all().await?;

        if let Err(e) = self.cache.save(&stations) {
            warn!(error = %e, "failed to write station cache");
        }

        Ok(stations)
    }

    /// Load station records from the first tier that answers.
    ///
    /// Only fails if every tier fails, including the bundled snapshot —
    /// which would mean a broken build.
    pub async fn load(&self) -> Result<(Vec<StationDto>, CatalogOrigin), CatalogError> {
        match self.fetch_live().await {
            Ok(stations) => return Ok((stations, CatalogOrigin::Live)),
            Err(e) => warn!(error = %e, "live station fetch failed, trying disk cache"),
        }

        if let Some(stations) = self.cache.load_any_age() {
            info!(path = %self.cache.path().display(), "loaded stations from disk cache");
            return Ok((stations, CatalogOrigin::Cache));
        }

        let stations = bundled_stations()?;
        info!(count = stations.len(), "using bundled station snapshot");
        Ok((stations, CatalogOrigin::Bundled))
    }
}

/// Parse the bundled snapshot.
pub fn bundled_stations() -> Result<Vec<StationDto>, CatalogError> {
    serde_json::from_str(BUNDLED_STATIONS).map_err(|e| CatalogError::Json {
        message: format!("bundled station snapshot is invalid: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::cache::CatalogCacheConfig;
    use tempfile::tempdir;

    #[test]
    fn bundled_snapshot_parses() {
        let stations = bundled_stations().unwrap();
        assert!(!stations.is_empty());

        // Every bundled record carries a pre-resolved position
        for dto in &stations {
            assert!(dto.lat.is_some() && dto.lng.is_some(), "{} lacks lat/lng", dto.name);
        }
    }

    #[test]
    fn bundled_snapshot_covers_transfer_stations() {
        let stations = bundled_stations().unwrap();
        let city_hall: Vec<_> = stations.iter().filter(|d| d.name == "시청").collect();
        // One record per line, merged later by the catalog builder
        assert!(city_hall.len() >= 2);
    }

    #[tokio::test]
    async fn falls_back_to_stale_cache_without_client() {
        let dir = tempdir().unwrap();
        let config = CatalogCacheConfig::new(dir.path().join("stations.json"))
            .with_ttl(std::time::Duration::from_secs(0));
        let cache = CatalogCache::new(config);

        let dto = StationDto {
            name: "서울역".to_string(),
            line: "1호선".to_string(),
            address: None,
            x: None,
            y: None,
            lat: Some(37.5547),
            lng: Some(126.9707),
        };
        cache.save(&[dto]).unwrap();

        let source = TieredSource::new(None, cache);
        let (stations, origin) = source.load().await.unwrap();

        assert_eq!(origin, CatalogOrigin::Cache);
        assert_eq!(stations.len(), 1);
    }

    #[tokio::test]
    async fn falls_back_to_bundled_without_client_or_cache() {
        let dir = tempdir().unwrap();
        let cache = CatalogCache::new(CatalogCacheConfig::new(dir.path().join("missing.json")));

        let source = TieredSource::new(None, cache);
        let (stations, origin) = source.load().await.unwrap();

        assert_eq!(origin, CatalogOrigin::Bundled);
        assert!(!stations.is_empty());
    }

    #[tokio::test]
    async fn fetch_live_without_client_is_an_error() {
        let dir = tempdir().unwrap();
        let cache = CatalogCache::new(CatalogCacheConfig::new(dir.path().join("missing.json")));

        let source = TieredSource::new(None, cache);
        assert!(matches!(
            source.fetch_live().await,
            Err(CatalogError::MissingApiKey)
        ));
    }
}
