#![allow(missing_docs)]

pub(crate) mod html;
pub(crate) mod http;

use axum_test::TestServer;
use rusqlite::Connection;
use rust_decimal::Decimal;
use time::Date;

use crate::{
    AppState,
    category::{CategoryId, CategoryName, create_category},
    expense::{Expense, ExpenseAmount, ExpenseTitle, NewExpense, create_expense},
    routing::build_router,
};

pub(crate) use html::{assert_valid_html, parse_html_document};
pub(crate) use http::{assert_content_type, assert_status_ok, parse_json_error};

/// Create an app state backed by a fresh in-memory database.
#[track_caller]
pub(crate) fn get_test_app_state() -> AppState {
    let connection =
        Connection::open_in_memory().expect("Could not open database in memory.");

    AppState::new(connection).expect("Could not initialize app state.")
}

/// Create a test server that routes requests through the full app router.
#[track_caller]
pub(crate) fn get_test_server(state: AppState) -> TestServer {
    TestServer::try_new(build_router(state)).expect("Could not create test server.")
}

/// Create an expense for `category_id` with a whole dollar `amount` and no description.
#[track_caller]
pub(crate) fn new_test_expense(
    title: &str,
    amount: i64,
    category_id: CategoryId,
    date: Date,
) -> NewExpense {
    NewExpense::new(
        ExpenseTitle::new(title).expect("Invalid test expense title"),
        ExpenseAmount::new(Decimal::from(amount)).expect("Invalid test expense amount"),
        category_id,
        date,
    )
}

#[track_caller]
pub(crate) fn insert_test_category(state: &AppState, name: &str) -> CategoryId {
    let connection = state
        .db_connection
        .lock()
        .expect("Could not acquire database lock");

    create_category(CategoryName::new_unchecked(name), &connection)
        .expect("Could not create test category")
        .id
}

#[track_caller]
pub(crate) fn insert_test_expense(
    state: &AppState,
    title: &str,
    amount: i64,
    category_id: CategoryId,
    date: Date,
) -> Expense {
    let connection = state
        .db_connection
        .lock()
        .expect("Could not acquire database lock");

    create_expense(
        new_test_expense(title, amount, category_id, date),
        &connection,
    )
    .expect("Could not create test expense")
}
