//! Endpoints for reading expenses.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    expense::{ExpenseFilters, ExpenseId, ExpenseQuery, ExpenseState, get_expense, list_expenses},
    request::{path_id, query_params},
};

/// Return the expenses matching the filter query parameters, most recent first.
///
/// Supported parameters are `startDate`, `endDate`, `category`, `minAmount`,
/// `maxAmount` and `search`. Responds with 400 if a parameter cannot be parsed.
pub async fn list_expenses_endpoint(
    State(state): State<ExpenseState>,
    query: Result<Query<ExpenseQuery>, QueryRejection>,
) -> Response {
    let filters = match query_params(query).and_then(ExpenseFilters::try_from) {
        Ok(filters) => filters,
        Err(error) => return error.into_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_json_response("Failed to fetch expenses");
        }
    };

    match list_expenses(&filters, &connection) {
        Ok(expenses) => Json(expenses).into_response(),
        Err(error) => error.into_json_response("Failed to fetch expenses"),
    }
}

/// Return a single expense, or 404 if it doesn't exist.
pub async fn get_expense_endpoint(
    State(state): State<ExpenseState>,
    expense_id: Result<Path<ExpenseId>, PathRejection>,
) -> Response {
    let expense_id = match path_id(expense_id) {
        Ok(expense_id) => expense_id,
        Err(error) => return error.into_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_json_response("Failed to fetch expense");
        }
    };

    match get_expense(expense_id, &connection) {
        Ok(expense) => Json(expense).into_response(),
        Err(error) => error.into_json_response("Failed to fetch expense"),
    }
}
