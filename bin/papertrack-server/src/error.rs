//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors become a JSON
//! `{"error": "..."}` body with an appropriate status code.
//!
//! Store failures are logged with full detail; the caller only sees the
//! endpoint's generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use papertrack_core::{FilterError, StoreError};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// All errors that can occur in the papertrack-server request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Filter criteria failed validation.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// The caller sent an invalid or malformed request.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The request body exceeded the configured limit.
    #[error("request body larger than {limit} bytes")]
    PayloadTooLarge { limit: usize },

    /// A store query failed. `message` is what the caller sees.
    #[error("{message}: {source}")]
    Query {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ServerError {
    /// Wrap a store failure with the endpoint's client-facing message.
    pub fn query(message: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| ServerError::Query { message, source }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, client_message) = match &self {
            ServerError::Filter(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ServerError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            ServerError::PayloadTooLarge { .. } => {
                (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large".to_owned())
            }
            ServerError::Query { message, source } => {
                error!(error = %source, "{message}");
                (StatusCode::INTERNAL_SERVER_ERROR, (*message).to_owned())
            }
        };
        (status, Json(json!({ "error": client_message }))).into_response()
    }
}
