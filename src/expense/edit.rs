//! Expense update endpoint.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    expense::{ExpenseId, ExpenseState, ExpenseUpdate, UpdateExpenseFields, update_expense},
    request::{json_body, path_id},
};

/// Update some or all fields of an expense and return the updated expense.
///
/// Responds with 404 if the expense doesn't exist and 400 if the body
/// contains unknown fields or invalid values.
pub async fn update_expense_endpoint(
    State(state): State<ExpenseState>,
    expense_id: Result<Path<ExpenseId>, PathRejection>,
    body: Result<Json<UpdateExpenseFields>, JsonRejection>,
) -> Response {
    let expense_id = match path_id(expense_id) {
        Ok(expense_id) => expense_id,
        Err(error) => return error.into_response(),
    };

    let update = match json_body(body).and_then(ExpenseUpdate::try_from) {
        Ok(update) => update,
        Err(error) => return error.into_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_json_response("Failed to update expense");
        }
    };

    match update_expense(expense_id, update, &connection) {
        Ok(expense) => Json(expense).into_response(),
        Err(error) => error.into_json_response("Failed to update expense"),
    }
}
