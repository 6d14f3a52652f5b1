//! Middleware for logging requests and responses.

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::json_error;

/// Bodies longer than this many bytes are truncated when logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Request bodies larger than this many bytes are rejected with 413 Payload Too Large.
///
/// Matches the default body limit of axum's extractors.
pub const REQUEST_BODY_SIZE_LIMIT: usize = 2 * 1024 * 1024;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
///
/// Request bodies are read up to [REQUEST_BODY_SIZE_LIMIT] bytes. A request
/// whose body goes past the limit is answered with 413 without reaching the
/// handler.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = match axum::body::to_bytes(body, REQUEST_BODY_SIZE_LIMIT).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::warn!(
                "rejected {} {}: could not read request body within {REQUEST_BODY_SIZE_LIMIT} bytes: {error}",
                parts.method,
                parts.uri
            );
            return json_error(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large");
        }
    };
    log_body(
        &format!("Received request: {} {}", parts.method, parts.uri),
        "request",
        &body_bytes,
    );

    let response = next.run(Request::from_parts(parts, body_bytes.into())).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    log_body(
        &format!("Sending response: {}", parts.status),
        "response",
        &body_bytes,
    );

    Response::from_parts(parts, body_bytes.into())
}

fn log_body(summary: &str, kind: &str, body: &[u8]) {
    let body = String::from_utf8_lossy(body);

    match truncate(&body, LOG_BODY_LENGTH_LIMIT) {
        Some(truncated) => {
            tracing::info!("{summary}\nbody: {truncated}...");
            tracing::debug!("Full {kind} body: {body:?}");
        }
        None => tracing::info!("{summary}\nbody: {body:?}"),
    }
}

/// Cut `text` down to at most `limit` bytes without splitting a character.
///
/// Returns `None` if `text` already fits.
fn truncate(text: &str, limit: usize) -> Option<&str> {
    if text.len() <= limit {
        return None;
    }

    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    Some(&text[..end])
}
