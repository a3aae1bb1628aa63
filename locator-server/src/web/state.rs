//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::LookupCache;
use crate::catalog::StationCatalog;
use crate::locate::ResolverConfig;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Station catalog (snapshot provider, refreshed in the background)
    pub catalog: StationCatalog,

    /// Nearest-station search tuning
    pub resolver: Arc<ResolverConfig>,

    /// Cache of recent lookup results
    pub lookups: Arc<LookupCache>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(catalog: StationCatalog, resolver: ResolverConfig, lookups: LookupCache) -> Self {
        Self {
            catalog,
            resolver: Arc::new(resolver),
            lookups: Arc::new(lookups),
        }
    }
}
