//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::warn;

use crate::cache::LookupKey;
use crate::domain::LatLng;
use crate::locate::find_nearby_station;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", get(list_stations))
        .route("/stations/nearby", get(nearby_station))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List the current catalog snapshot.
async fn list_stations(State(state): State<AppState>) -> Json<StationListResponse> {
    let snapshot = state.catalog.snapshot().await;

    let stations: Vec<StationResult> = snapshot
        .stations
        .iter()
        .map(StationResult::from_station)
        .collect();

    Json(StationListResponse {
        count: stations.len(),
        stations,
    })
}

/// Resolve the nearest station for a query point.
async fn nearby_station(
    State(state): State<AppState>,
    Query(req): Query<NearbyStationRequest>,
) -> Result<Response, AppError> {
    if !req.lat.is_finite() || !req.lng.is_finite() {
        return Err(AppError::BadRequest {
            message: "lat and lng must be finite numbers".to_string(),
        });
    }

    let snapshot = state.catalog.snapshot().await;
    let key = LookupKey::new(snapshot.generation, req.lat, req.lng, req.address.as_deref());

    let entry = match state.lookups.get(&key).await {
        Some(entry) => entry,
        None => {
            let result = find_nearby_station(
                &snapshot.stations,
                LatLng::new(req.lat, req.lng),
                req.address.as_deref(),
                &state.resolver,
            );
            let entry = Arc::new(result);
            state.lookups.insert(key, entry.clone()).await;
            entry
        }
    };

    match entry.as_ref() {
        Some(m) => Ok(Json(NearbyStationResponse::from_match(m)).into_response()),
        None => Err(AppError::NotFound {
            message: format!(
                "no station within {} m of ({}, {})",
                state.resolver.max_radius_meters, req.lat, req.lng
            ),
        }),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            warn!(%status, %message, "request failed");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
