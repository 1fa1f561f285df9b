use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use std::time::Instant;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::error::ServerError;

pub static X_TRACE_ID: &str = "x-trace-id";

/// JSON bodies up to this size are written to the debug log verbatim.
const MAX_LOGGED_BODY: usize = 1024;

/// Request bodies past this size are refused with 413 before any handler runs.
pub const MAX_REQUEST_BODY: usize = 2 * 1024 * 1024;

/// Tag every request with a trace ID, log both bodies, status and latency.
///
/// An incoming `x-trace-id` header is reused when it holds a valid UUID.
pub async fn trace_middleware(req: Request<Body>, next: Next) -> Response {
    let start_time = Instant::now();

    let trace_id = req
        .headers()
        .get(X_TRACE_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);
    let trace_header = HeaderValue::from_str(&trace_id.to_string()).ok();

    let span = info_span!(
        "http_request",
        trace_id = %trace_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    async move {
        info!("→ request started");
        let mut response = match buffer_request(req).await {
            Ok(mut req) => {
                if let Some(value) = &trace_header {
                    req.headers_mut().insert(X_TRACE_ID, value.clone());
                }
                buffer_response(next.run(req).await).await
            }
            Err(e) => e.into_response(),
        };
        if let Some(value) = trace_header {
            response.headers_mut().insert(X_TRACE_ID, value);
        }

        info!(
            status = response.status().as_u16(),
            latency_ms = start_time.elapsed().as_millis(),
            "← response finished"
        );
        response
    }
    .instrument(span)
    .await
}

async fn buffer_request(req: Request<Body>) -> Result<Request<Body>, ServerError> {
    let (parts, body) = req.into_parts();
    let bytes = match Limited::new(body, MAX_REQUEST_BODY).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.is::<LengthLimitError>() => {
            warn!(limit = MAX_REQUEST_BODY, "request body too large");
            return Err(ServerError::PayloadTooLarge {
                limit: MAX_REQUEST_BODY,
            });
        }
        Err(e) => {
            warn!(error = %e, "request body could not be read");
            return Err(ServerError::BadRequest("Invalid request body".into()));
        }
    };
    log_body("request", &parts.headers, &bytes);
    Ok(Request::from_parts(parts, Body::from(bytes)))
}

async fn buffer_response(response: Response) -> Response {
    let (parts, body) = response.into_parts();
    match body.collect().await {
        Ok(collected) => {
            let bytes = collected.to_bytes();
            log_body("response", &parts.headers, &bytes);
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(e) => {
            error!(error = %e, "response body could not be read");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn log_body(direction: &str, headers: &header::HeaderMap, bytes: &Bytes) {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if content_type.contains("application/json") && bytes.len() <= MAX_LOGGED_BODY {
        if let Ok(text) = std::str::from_utf8(bytes) {
            debug!("{direction} body: {text}");
        }
    } else if !bytes.is_empty() {
        debug!("{direction} body: [skipped: type={content_type}, size={}]", bytes.len());
    }
}
