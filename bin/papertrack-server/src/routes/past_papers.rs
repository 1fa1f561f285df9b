//! Past-paper query endpoints.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use papertrack_core::{FilterError, FilterRequest, PaperStore, SearchQuery, SearchRequest};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::schemas::past_paper::PastPaperResponse;
use crate::state::AppState;

const FETCH_FAILED: &str = "Failed to fetch past papers";
const FILTER_FAILED: &str = "Failed to filter past papers";
const SEARCH_FAILED: &str = "Failed to search past papers";

#[derive(OpenApi)]
#[openapi(
    paths(list_past_papers, filter_past_papers, search_past_papers),
    components(schemas(PastPaperResponse, FilterRequest, SearchRequest))
)]
pub struct PastPapersApi;

/// Register past-paper routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/past-papers", get(list_past_papers))
        .route("/past-papers/filter", post(filter_past_papers))
        .route("/past-papers/search", post(search_past_papers))
}

#[utoipa::path(
    get,
    path = "/api/past-papers",
    tag = "past-papers",
    responses(
        (status = 200, description = "Every past-paper record", body = Vec<PastPaperResponse>),
        (status = 500, description = "Store failure"),
    )
)]
pub async fn list_past_papers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PastPaperResponse>>, ServerError> {
    let papers = state
        .store
        .list_all()
        .await
        .map_err(ServerError::query(FETCH_FAILED))?;
    info!(count = papers.len(), "listed past papers");
    Ok(Json(papers.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/api/past-papers/filter",
    tag = "past-papers",
    request_body = FilterRequest,
    responses(
        (status = 200, description = "Records matching every criterion", body = Vec<PastPaperResponse>),
        (status = 400, description = "Missing criteria, invalid year or invalid paper type"),
        (status = 500, description = "Store failure"),
    )
)]
pub async fn filter_past_papers(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Vec<PastPaperResponse>>, ServerError> {
    let request = parse_filter_body(&body)?;
    info!(?request, "received filter data");

    let criteria = request.validate()?;
    let papers = state
        .store
        .filter(&criteria)
        .await
        .map_err(ServerError::query(FILTER_FAILED))?;

    info!(count = papers.len(), "filtered past papers");
    debug!(ids = ?papers.iter().map(|p| p.id).collect::<Vec<_>>(), "filtered query results");
    Ok(Json(papers.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/api/past-papers/search",
    tag = "past-papers",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Records matching the search term", body = Vec<PastPaperResponse>),
        (status = 400, description = "Malformed JSON body"),
        (status = 500, description = "Store failure"),
    )
)]
pub async fn search_past_papers(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Vec<PastPaperResponse>>, ServerError> {
    let request: SearchRequest = parse_json(&body)?;
    let query = SearchQuery::new(request.search_term.as_deref().unwrap_or_default());
    info!(term = query.term(), "searching past papers");

    let papers = state
        .store
        .search(&query)
        .await
        .map_err(ServerError::query(SEARCH_FAILED))?;

    info!(count = papers.len(), "search finished");
    debug!(ids = ?papers.iter().map(|p| p.id).collect::<Vec<_>>(), "search results");
    Ok(Json(papers.into_iter().map(Into::into).collect()))
}

// ── body parsing ──────────────────────────────────────────────────────────────

/// An empty body, `null` or `{}` carries no criteria at all.
fn parse_filter_body(body: &[u8]) -> Result<FilterRequest, ServerError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(FilterError::MissingCriteria.into());
    }
    let value: Value = parse_json(body)?;
    match &value {
        Value::Null => Err(FilterError::MissingCriteria.into()),
        Value::Object(map) if map.is_empty() => Err(FilterError::MissingCriteria.into()),
        Value::Object(_) => serde_json::from_value(value)
            .map_err(|_| ServerError::BadRequest("Invalid filter payload".into())),
        _ => Err(ServerError::BadRequest("Invalid filter payload".into())),
    }
}

fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ServerError> {
    serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, "rejecting malformed JSON body");
        ServerError::BadRequest("Invalid JSON body".into())
    })
}
