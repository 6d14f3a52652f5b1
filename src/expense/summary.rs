//! Expense statistics endpoint.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    expense::{ExpenseState, compute_stats, get_all_expenses},
};

/// Return all-time statistics across every expense.
///
/// Filters are not applied here, the summary always covers the whole table.
pub async fn get_expense_summary_endpoint(State(state): State<ExpenseState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_json_response("Failed to fetch statistics");
        }
    };

    let expenses = match get_all_expenses(&connection) {
        Ok(expenses) => expenses,
        Err(error) => return error.into_json_response("Failed to fetch statistics"),
    };
    drop(connection);

    Json(compute_stats(&expenses)).into_response()
}

#[cfg(test)]
mod expense_summary_endpoint_tests {
    use std::collections::BTreeMap;

    use axum::http::StatusCode;
    use rust_decimal::Decimal;
    use time::macros::date;

    use crate::{
        category::delete_category,
        endpoints,
        expense::{
            ExpenseAmount, ExpenseStats, MAX_EXPENSE_AMOUNT, UNCATEGORIZED_LABEL, create_expense,
        },
        test_utils::{
            get_test_app_state, get_test_server, insert_test_category, insert_test_expense,
            new_test_expense,
        },
    };

    #[tokio::test]
    async fn empty_database_returns_zeroes() {
        let server = get_test_server(get_test_app_state());

        let response = server.get(endpoints::EXPENSE_SUMMARY).await;

        response.assert_status(StatusCode::OK);
        let stats = response.json::<ExpenseStats>();
        assert_eq!(stats.total, Decimal::ZERO);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.average, Decimal::ZERO);
        assert!(stats.category_breakdown.is_empty());
    }

    #[tokio::test]
    async fn summarizes_all_expenses_with_orphans_uncategorized() {
        let state = get_test_app_state();
        let travel = insert_test_category(&state, "Travel");
        let gone = insert_test_category(&state, "Gone");
        insert_test_expense(&state, "Travel to NY", 100, travel, date!(2025 - 01 - 10));
        insert_test_expense(&state, "Office Travel", 50, travel, date!(2025 - 02 - 10));
        insert_test_expense(&state, "Supplies", 25, gone, date!(2025 - 03 - 10));
        delete_category(gone, &state.db_connection.lock().unwrap()).unwrap();
        let server = get_test_server(state);

        let response = server.get(endpoints::EXPENSE_SUMMARY).await;

        response.assert_status(StatusCode::OK);
        let body = response.json::<serde_json::Value>();
        assert!(body.get("categoryBreakdown").is_some());
        let stats = response.json::<ExpenseStats>();
        assert_eq!(stats.total, Decimal::from(175));
        assert_eq!(stats.count, 3);
        assert_eq!(stats.average.round_dp(2), Decimal::new(5833, 2));
        assert_eq!(
            stats.category_breakdown,
            BTreeMap::from([
                ("Travel".to_owned(), Decimal::from(150)),
                (UNCATEGORIZED_LABEL.to_owned(), Decimal::from(25)),
            ])
        );
    }

    #[tokio::test]
    async fn summarizes_expenses_at_the_maximum_amount() {
        let state = get_test_app_state();
        let category_id = insert_test_category(&state, "Capital");
        {
            let connection = state.db_connection.lock().unwrap();
            for title in ["Factory", "Warehouse"] {
                let mut new_expense = new_test_expense(title, 0, category_id, date!(2025 - 01 - 10));
                new_expense.amount = ExpenseAmount::new(MAX_EXPENSE_AMOUNT).unwrap();
                create_expense(new_expense, &connection).unwrap();
            }
        }
        let server = get_test_server(state.clone());

        let response = server.get(endpoints::EXPENSE_SUMMARY).await;

        response.assert_status(StatusCode::OK);
        let stats = response.json::<ExpenseStats>();
        assert_eq!(stats.total, MAX_EXPENSE_AMOUNT * Decimal::TWO);
        assert!(
            state.db_connection.lock().is_ok(),
            "the database lock should not be poisoned"
        );
    }
}
