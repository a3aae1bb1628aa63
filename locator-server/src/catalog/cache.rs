//! Disk-based cache for raw station records.
//!
//! The cache stores the DTO payload, not built stations, so a refreshed
//! binary with different merge or conversion logic reuses old data
//! correctly. A second, TTL-ignoring load path serves as the "stale"
//! tier of the fallback chain.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use super::client::StationDto;
use super::error::CatalogError;

/// Default cache TTL: 24 hours.
const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Cached station records with metadata.
#[derive(Debug, Serialize, Deserialize)]
struct CachedCatalog {
    /// Unix timestamp when the cache was written.
    cached_at_secs: u64,
    /// The cached station records.
    stations: Vec<StationDto>,
}

/// Configuration for the catalog disk cache.
#[derive(Debug, Clone)]
pub struct CatalogCacheConfig {
    /// Path to the cache file.
    pub path: PathBuf,
    /// How long the cache remains fresh.
    pub ttl: Duration,
}

impl CatalogCacheConfig {
    /// Create a new cache config with the given path and default TTL (24 hours).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ttl: DEFAULT_TTL,
        }
    }

    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for CatalogCacheConfig {
    fn default() -> Self {
        Self::new("stations_cache.json")
    }
}

/// Disk cache for station records.
#[derive(Debug, Clone)]
pub struct CatalogCache {
    config: CatalogCacheConfig,
}

impl CatalogCache {
    /// Create a new catalog cache with the given config.
    pub fn new(config: CatalogCacheConfig) -> Self {
        Self { config }
    }

    /// Try to load fresh records from the cache.
    ///
    /// Returns `None` if the cache doesn't exist, is invalid, or has expired.
    pub fn load(&self) -> Option<Vec<StationDto>> {
        let cached = self.read()?;

        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .ok()?
            .as_secs();

        let age_secs = now.saturating_sub(cached.cached_at_secs);
        if age_secs >= self.config.ttl.as_secs() {
            return None;
        }

        Some(cached.stations)
    }

    /// Load records regardless of age.
    ///
    /// Used as the stale tier when the live API is unreachable: outdated
    /// station data beats no station data.
    pub fn load_any_age(&self) -> Option<Vec<StationDto>> {
        self.read().map(|cached| cached.stations)
    }

    fn read(&self) -> Option<CachedCatalog> {
        let contents = std::fs::read_to_string(&self.config.path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Save records to the cache.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, stations: &[StationDto]) -> Result<(), CatalogError> {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_err(|_| CatalogError::Cache {
                message: "system time before unix epoch".to_string(),
            })?
            .as_secs();

        let cached = CachedCatalog {
            cached_at_secs: now,
            stations: stations.to_vec(),
        };

        if let Some(parent) = self.config.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| CatalogError::Cache {
                message: format!("failed to create cache directory: {}", e),
            })?;
        }

        let json = serde_json::to_string_pretty(&cached).map_err(|e| CatalogError::Cache {
            message: format!("failed to serialize cache: {}", e),
        })?;

        std::fs::write(&self.config.path, json).map_err(|e| CatalogError::Cache {
            message: format!("failed to write cache file: {}", e),
        })?;

        Ok(())
    }

    /// Get the cache file path.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Get the cache TTL.
    pub fn ttl(&self) -> Duration {
        self.config.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn dto(name: &str, line: &str) -> StationDto {
        StationDto {
            name: name.to_string(),
            line: line.to_string(),
            address: None,
            x: Some("198000".to_string()),
            y: Some("452000".to_string()),
            lat: None,
            lng: None,
        }
    }

    #[test]
    fn save_and_load_cache() {
        let dir = tempdir().unwrap();
        let cache_path = dir.path().join("stations.json");
        let cache = CatalogCache::new(CatalogCacheConfig::new(&cache_path));

        let stations = vec![dto("서울역", "1호선"), dto("시청", "2호선")];
        cache.save(&stations).unwrap();

        let loaded = cache.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].name, "서울역");
        assert_eq!(loaded[1].name, "시청");
    }

    #[test]
    fn expired_cache_returns_none_but_stale_load_succeeds() {
        let dir = tempdir().unwrap();
        let cache_path = dir.path().join("stations.json");
        let config = CatalogCacheConfig::new(&cache_path).with_ttl(Duration::from_secs(0));
        let cache = CatalogCache::new(config);

        cache.save(&[dto("서울역", "1호선")]).unwrap();

        // With 0 TTL, the fresh load is immediately expired
        assert!(cache.load().is_none());

        // But the stale tier still sees the data
        let stale = cache.load_any_age().unwrap();
        assert_eq!(stale.len(), 1);
    }

    #[test]
    fn missing_cache_returns_none() {
        let cache = CatalogCache::new(CatalogCacheConfig::new("/nonexistent/path/stations.json"));
        assert!(cache.load().is_none());
        assert!(cache.load_any_age().is_none());
    }

    #[test]
    fn corrupt_cache_returns_none() {
        let dir = tempdir().unwrap();
        let cache_path = dir.path().join("stations.json");
        std::fs::write(&cache_path, "not json at all").unwrap();

        let cache = CatalogCache::new(CatalogCacheConfig::new(&cache_path));
        assert!(cache.load().is_none());
        assert!(cache.load_any_age().is_none());
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempdir().unwrap();
        let cache_path = dir.path().join("nested").join("dir").join("stations.json");
        let cache = CatalogCache::new(CatalogCacheConfig::new(&cache_path));

        cache.save(&[dto("서울역", "1호선")]).unwrap();
        assert!(cache_path.exists());
    }
}
