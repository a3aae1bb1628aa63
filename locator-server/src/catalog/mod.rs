//! Station catalog: open-data API client, tiered sourcing, and the
//! in-memory snapshot store.
//!
//! The catalog is fetched from the railway open-data API, cached on disk,
//! and falls back to a bundled snapshot when both the API and the cache
//! are unavailable. Consumers only ever see an immutable snapshot; a
//! background task refreshes it on a daily schedule.

mod cache;
mod client;
mod error;
mod source;
mod store;

pub use cache::{CatalogCache, CatalogCacheConfig};
pub use client::{KricClient, KricClientConfig, StationDto};
pub use error::CatalogError;
pub use source::{CatalogOrigin, TieredSource, bundled_stations};
pub use store::{CatalogSnapshot, StationCatalog, build_stations};
