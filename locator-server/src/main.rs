use std::net::SocketAddr;
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use locator_server::cache::{LookupCache, LookupCacheConfig};
use locator_server::catalog::{
    CatalogCache, CatalogCacheConfig, KricClient, KricClientConfig, StationCatalog, TieredSource,
};
use locator_server::locate::ResolverConfig;
use locator_server::web::{AppState, create_router};

/// How often to refresh the station catalog (24 hours).
const CATALOG_REFRESH_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Optional API key: without it the service runs from cache/bundled data
    let client = match std::env::var("KRIC_API_KEY") {
        Ok(key) if !key.is_empty() => Some(
            KricClient::new(KricClientConfig::new(key)).expect("Failed to create KRIC client"),
        ),
        _ => {
            warn!("KRIC_API_KEY not set; live station data is unavailable");
            None
        }
    };

    let cache_path = std::env::var("CATALOG_CACHE_PATH")
        .unwrap_or_else(|_| "stations_cache.json".to_string());
    let cache = CatalogCache::new(CatalogCacheConfig::new(cache_path));

    let source = TieredSource::new(client, cache);
    let catalog = StationCatalog::load(source)
        .await
        .expect("Failed to load station catalog");
    info!(count = catalog.len().await, "station catalog ready");

    // Refresh the catalog daily; failures keep the current snapshot
    let catalog_refresh = catalog.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CATALOG_REFRESH_INTERVAL);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match catalog_refresh.refresh().await {
                Ok(count) => info!(count, "refreshed station catalog"),
                Err(e) => error!(error = %e, "failed to refresh station catalog"),
            }
        }
    });

    let state = AppState::new(
        catalog,
        ResolverConfig::default(),
        LookupCache::new(&LookupCacheConfig::default()),
    );

    let app = create_router(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    info!(%addr, "station locator listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
