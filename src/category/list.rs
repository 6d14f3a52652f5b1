//! Category listing endpoint.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    category::{CategoryState, get_all_categories},
};

/// Return all categories ordered by name.
pub async fn list_categories_endpoint(State(state): State<CategoryState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_json_response("Failed to fetch categories");
        }
    };

    match get_all_categories(&connection) {
        Ok(categories) => Json(categories).into_response(),
        Err(error) => error.into_json_response("Failed to fetch categories"),
    }
}
