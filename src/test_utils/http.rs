use axum::{body::Body, http::StatusCode, response::Response};
use serde::Deserialize;

#[track_caller]
pub(crate) fn assert_status_ok(response: &Response<Body>) {
    assert_eq!(response.status(), StatusCode::OK);
}

#[track_caller]
pub(crate) fn assert_content_type(response: &Response<Body>, content_type: &str) {
    let content_type_header = response
        .headers()
        .get("content-type")
        .expect("content-type header missing");
    assert_eq!(content_type_header, content_type);
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Get the message from a JSON error body, e.g. `{"error": "Expense not found"}`.
pub(crate) async fn parse_json_error(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not get response body");

    serde_json::from_slice::<ErrorBody>(&body)
        .expect("Response body is not a JSON error")
        .error
}
