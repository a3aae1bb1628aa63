//! Caching layer for resolver lookups.
//!
//! Resolution is cheap but the same business records get looked up
//! repeatedly (bulk proposal generation hits the same addresses). Keys
//! include the catalog generation, so entries from a superseded snapshot
//! expire naturally without explicit invalidation. Negative results are
//! cached too.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::locate::StationMatch;

/// Cache key: catalog generation plus the exact query.
///
/// Coordinates are keyed on their bit patterns; queries for the same
/// business record repeat bit-identically, and near-misses are cheap to
/// recompute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey {
    generation: u64,
    lat_bits: u64,
    lng_bits: u64,
    address: Option<String>,
}

impl LookupKey {
    /// Build a key for a query against a specific catalog generation.
    pub fn new(generation: u64, lat: f64, lng: f64, address: Option<&str>) -> Self {
        Self {
            generation,
            lat_bits: lat.to_bits(),
            lng_bits: lng.to_bits(),
            address: address.map(|a| a.trim().to_string()),
        }
    }
}

/// A cached resolution outcome; `None` records "no station in radius".
pub type LookupEntry = Arc<Option<StationMatch>>;

/// Configuration for the lookup cache.
#[derive(Debug, Clone)]
pub struct LookupCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for LookupCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 10_000,
        }
    }
}

/// Cache for nearest-station lookups.
pub struct LookupCache {
    entries: MokaCache<LookupKey, LookupEntry>,
}

impl LookupCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &LookupCacheConfig) -> Self {
        let entries = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { entries }
    }

    /// Get a cached lookup result.
    pub async fn get(&self, key: &LookupKey) -> Option<LookupEntry> {
        self.entries.get(key).await
    }

    /// Insert a lookup result.
    pub async fn insert(&self, key: LookupKey, entry: LookupEntry) {
        self.entries.insert(key, entry).await;
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }
}
