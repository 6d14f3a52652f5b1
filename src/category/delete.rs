//! Category deletion endpoint.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    category::{CategoryId, CategoryState, delete_category},
    request::path_id,
};

/// Delete a category. Responds with 204 on success or 404 if the category doesn't exist.
///
/// Expenses in the deleted category are kept and show up as uncategorized.
pub async fn delete_category_endpoint(
    State(state): State<CategoryState>,
    category_id: Result<Path<CategoryId>, PathRejection>,
) -> Response {
    let category_id = match path_id(category_id) {
        Ok(category_id) => category_id,
        Err(error) => return error.into_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_json_response("Failed to delete category");
        }
    };

    match delete_category(category_id, &connection) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error.into_json_response("Failed to delete category"),
    }
}
