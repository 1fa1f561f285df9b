//! Liveness check backed by a store round-trip.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use papertrack_core::PaperStore;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::error::ServerError;
use crate::state::AppState;

const STORE_UNAVAILABLE: &str = "Past-paper store unavailable";

#[derive(OpenApi)]
#[openapi(paths(get_health), components(schemas(HealthResponse)))]
pub struct HealthApi;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: &'static str,
    pub version: &'static str,
    /// Records currently held by the store.
    #[schema(example = 12)]
    pub papers: i64,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}

/// Reports `ok` once the store has answered a record count.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Server and store are up", body = HealthResponse),
        (status = 500, description = "Store did not answer"),
    )
)]
pub async fn get_health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, ServerError> {
    let papers = state
        .store
        .count()
        .await
        .map_err(ServerError::query(STORE_UNAVAILABLE))?;
    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        papers,
    }))
}
