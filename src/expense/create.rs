//! Expense creation endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    expense::{CreateExpenseRequest, ExpenseState, NewExpense, create_expense},
    request::json_body,
};

/// Create an expense from a JSON body.
///
/// Responds with 201 and the new expense. Responds with 400 if the title,
/// amount, category or date is missing, the amount is negative, or the
/// category does not exist.
pub async fn create_expense_endpoint(
    State(state): State<ExpenseState>,
    body: Result<Json<CreateExpenseRequest>, JsonRejection>,
) -> Response {
    let new_expense = match json_body(body).and_then(NewExpense::try_from) {
        Ok(new_expense) => new_expense,
        Err(error) => return error.into_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_json_response("Failed to create expense");
        }
    };

    match create_expense(new_expense, &connection) {
        Ok(expense) => {
            tracing::debug!("created expense {}", expense.id);
            (StatusCode::CREATED, Json(expense)).into_response()
        }
        Err(error) => error.into_json_response("Failed to create expense"),
    }
}

#[cfg(test)]
mod create_expense_endpoint_tests {
    use axum::http::StatusCode;
    use rust_decimal::Decimal;
    use serde_json::json;
    use time::macros::date;

    use crate::{
        endpoints,
        expense::{Expense, get_expense},
        test_utils::{get_test_app_state, get_test_server, insert_test_category},
    };

    #[tokio::test]
    async fn can_create_expense() {
        let state = get_test_app_state();
        let category_id = insert_test_category(&state, "Travel");
        let server = get_test_server(state.clone());

        let response = server
            .post(endpoints::EXPENSES)
            .json(&json!({
                "title": "Flight to NY",
                "amount": 450.5,
                "category_id": category_id,
                "date": "2025-03-14",
                "description": "Conference"
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let expense = response.json::<Expense>();
        assert_eq!(expense.title, "Flight to NY");
        assert_eq!(expense.amount, Decimal::new(4505, 1));
        assert_eq!(expense.date, date!(2025 - 03 - 14));
        assert_eq!(expense.description.as_deref(), Some("Conference"));
        assert_eq!(expense.category_name(), Some("Travel"));
        assert_eq!(
            get_expense(expense.id, &state.db_connection.lock().unwrap())
                .unwrap()
                .amount,
            Decimal::new(4505, 1)
        );
    }

    #[tokio::test]
    async fn create_fails_on_missing_fields() {
        let state = get_test_app_state();
        let category_id = insert_test_category(&state, "Travel");
        let server = get_test_server(state);

        let response = server
            .post(endpoints::EXPENSES)
            .json(&json!({ "title": "Flight", "category_id": category_id }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({
            "error": "Title, amount, category, and date are required"
        }));
    }

    #[tokio::test]
    async fn create_fails_on_unknown_category() {
        let server = get_test_server(get_test_app_state());

        let response = server
            .post(endpoints::EXPENSES)
            .json(&json!({
                "title": "Flight",
                "amount": 10,
                "category_id": 77,
                "date": "2025-03-14"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "error": "Could not find a category with the ID 77" }));
    }

    #[tokio::test]
    async fn create_fails_on_negative_amount() {
        let state = get_test_app_state();
        let category_id = insert_test_category(&state, "Travel");
        let server = get_test_server(state);

        let response = server
            .post(endpoints::EXPENSES)
            .json(&json!({
                "title": "Refund",
                "amount": -10,
                "category_id": category_id,
                "date": "2025-03-14"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "error": "Expense amount cannot be negative" }));
    }

    #[tokio::test]
    async fn create_fails_on_invalid_date() {
        let state = get_test_app_state();
        let category_id = insert_test_category(&state, "Travel");
        let server = get_test_server(state);

        let response = server
            .post(endpoints::EXPENSES)
            .json(&json!({
                "title": "Flight",
                "amount": 10,
                "category_id": category_id,
                "date": "14/03/2025"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_fails_on_amount_too_large() {
        let state = get_test_app_state();
        let category_id = insert_test_category(&state, "Travel");
        let server = get_test_server(state.clone());

        let response = server
            .post(endpoints::EXPENSES)
            .json(&json!({
                "title": "Yacht",
                "amount": 2e12,
                "category_id": category_id,
                "date": "2025-03-14"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({
            "error": "Expense amount cannot be more than 1,000,000,000,000"
        }));

        for _ in 0..2 {
            server
                .post(endpoints::EXPENSES)
                .json(&json!({
                    "title": "Yacht",
                    "amount": 7e28,
                    "category_id": category_id,
                    "date": "2025-03-14"
                }))
                .await
                .assert_status(StatusCode::BAD_REQUEST);
        }

        server
            .get(endpoints::EXPENSE_SUMMARY)
            .await
            .assert_status(StatusCode::OK);
    }
}
