//! Expense management: the expense model, its database queries, filtering,
//! summary statistics, the JSON endpoints, and the expense pages.

mod create;
mod create_page;
mod db;
mod delete;
mod detail_page;
mod domain;
mod edit;
mod edit_page;
mod filter;
mod form;
mod list;
mod stats;
mod summary;

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

pub use create::create_expense_endpoint;
pub use create_page::{create_expense_form_endpoint, get_new_expense_page};
pub use db::{
    create_expense, create_expense_table, delete_expense, get_all_expenses, get_expense,
    list_expenses, update_expense,
};
pub use delete::delete_expense_endpoint;
pub use detail_page::{delete_expense_form_endpoint, get_expense_page};
pub use domain::{
    CreateExpenseRequest, Expense, ExpenseAmount, ExpenseCategory, ExpenseId, ExpenseTitle,
    ExpenseUpdate, MAX_EXPENSE_AMOUNT, NewExpense, UpdateExpenseFields,
};
pub use edit::update_expense_endpoint;
pub use edit_page::{get_edit_expense_page, update_expense_form_endpoint};
pub use filter::{ExpenseFilters, ExpenseQuery, filter_expenses};
pub use form::ExpenseForm;
pub use list::{get_expense_endpoint, list_expenses_endpoint};
pub use stats::{CategoryShare, ExpenseStats, UNCATEGORIZED_LABEL, compute_stats};
pub use summary::get_expense_summary_endpoint;

/// The state needed by the expense endpoints.
#[derive(Debug, Clone)]
pub struct ExpenseState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}
