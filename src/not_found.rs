use axum::{http::StatusCode, response::Response};

use crate::json_error;

/// The fallback handler for routes that do not exist.
pub async fn get_404_not_found() -> Response {
    json_error(StatusCode::NOT_FOUND, "Not found")
}

#[cfg(test)]
mod not_found_tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::test_utils::{get_test_app_state, get_test_server};

    #[tokio::test]
    async fn unknown_route_returns_json_not_found() {
        let server = get_test_server(get_test_app_state());

        let response = server.get("/api/budgets").await;

        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({ "error": "Not found" }));
    }
}
