//! Category creation endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    category::{CategoryName, CategoryState, NewCategoryRequest, create_category},
    request::json_body,
};

/// Create a category from a JSON body `{"name": "..."}`.
///
/// Responds with 201 and the new category, or 400 if the name is missing or blank.
pub async fn create_category_endpoint(
    State(state): State<CategoryState>,
    body: Result<Json<NewCategoryRequest>, JsonRejection>,
) -> Response {
    let request = match json_body(body) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };

    let name = match CategoryName::new(request.name.as_deref().unwrap_or_default()) {
        Ok(name) => name,
        Err(error) => return error.into_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_json_response("Failed to create category");
        }
    };

    match create_category(name, &connection) {
        Ok(category) => (StatusCode::CREATED, Json(category)).into_response(),
        Err(error) => error.into_json_response("Failed to create category"),
    }
}

#[cfg(test)]
mod create_category_endpoint_tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::{
        category::{Category, NewCategoryRequest, get_category},
        endpoints,
        test_utils::{get_test_app_state, get_test_server},
    };

    #[tokio::test]
    async fn can_create_category() {
        let state = get_test_app_state();
        let server = get_test_server(state.clone());

        let response = server
            .post(endpoints::CATEGORIES)
            .json(&NewCategoryRequest {
                name: Some("  Travel  ".to_owned()),
            })
            .await;

        response.assert_status(StatusCode::CREATED);
        let category = response.json::<Category>();
        assert_eq!(category.name.as_ref(), "Travel");
        assert_eq!(
            Ok(category.clone()),
            get_category(category.id, &state.db_connection.lock().unwrap())
        );
    }

    #[tokio::test]
    async fn create_category_fails_on_blank_name() {
        let server = get_test_server(get_test_app_state());

        let response = server
            .post(endpoints::CATEGORIES)
            .json(&json!({ "name": "   " }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "error": "Category name is required" }));
    }

    #[tokio::test]
    async fn create_category_fails_on_missing_name() {
        let server = get_test_server(get_test_app_state());

        let response = server.post(endpoints::CATEGORIES).json(&json!({})).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "error": "Category name is required" }));
    }

    #[tokio::test]
    async fn create_category_fails_on_malformed_body() {
        let server = get_test_server(get_test_app_state());

        let response = server
            .post(endpoints::CATEGORIES)
            .json(&json!({ "name": 42 }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
