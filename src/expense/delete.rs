//! Expense deletion endpoint.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    expense::{ExpenseId, ExpenseState, delete_expense},
    request::path_id,
};

/// Delete an expense. Responds with 204 on success or 404 if the expense doesn't exist.
pub async fn delete_expense_endpoint(
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
            return Error::DatabaseLockError.into_json_response("Failed to delete expense");
        }
    };

    match delete_expense(expense_id, &connection) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error.into_json_response("Failed to delete expense"),
    }
}

#[cfg(test)]
mod delete_expense_endpoint_tests {
    use axum::http::StatusCode;
    use serde_json::json;
    use time::macros::date;

    use crate::{
        Error,
        endpoints::{self, format_endpoint},
        expense::get_expense,
        test_utils::{
            get_test_app_state, get_test_server, insert_test_category, insert_test_expense,
        },
    };

    #[tokio::test]
    async fn delete_expense_succeeds() {
        let state = get_test_app_state();
        let travel = insert_test_category(&state, "Travel");
        let expense = insert_test_expense(&state, "Flight", 450, travel, date!(2025 - 03 - 14));
        let server = get_test_server(state.clone());

        let response = server
            .delete(&format_endpoint(endpoints::EXPENSE, expense.id))
            .await;

        response.assert_status(StatusCode::NO_CONTENT);
        assert_eq!(
            get_expense(expense.id, &state.db_connection.lock().unwrap()),
            Err(Error::MissingExpense)
        );
    }

    #[tokio::test]
    async fn delete_missing_expense_returns_not_found() {
        let server = get_test_server(get_test_app_state());

        let response = server
            .delete(&format_endpoint(endpoints::EXPENSE, 31))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({ "error": "Expense not found" }));
    }
}
