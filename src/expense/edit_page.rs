//! The page for editing an existing expense.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use maud::{Markup, html};

use crate::{
    Error,
    category::{Category, get_all_categories},
    endpoints::{self, format_endpoint},
    expense::{
        ExpenseForm, ExpenseId, ExpenseState, ExpenseUpdate, NewExpense, form::expense_form_view,
        get_expense, update_expense,
    },
    html::{PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    request::path_id,
};

fn edit_expense_view(
    expense_id: ExpenseId,
    form: &ExpenseForm,
    categories: &[Category],
    error: Option<&str>,
) -> Markup {
    let action = format_endpoint(endpoints::EDIT_EXPENSE_VIEW, expense_id);

    let content = html! {
        (NavBar::new(endpoints::DASHBOARD_VIEW).into_html())

        main class=(PAGE_CONTAINER_STYLE)
        {
            h1 { "Edit Expense" }

            (expense_form_view(&action, "Save Changes", form, categories, error))
        }
    };

    base("Edit Expense", &content)
}

/// Display the expense form filled in with the expense's current values.
pub async fn get_edit_expense_page(
    State(state): State<ExpenseState>,
    expense_id: Result<Path<ExpenseId>, PathRejection>,
) -> Response {
    let expense_id = match path_id(expense_id) {
        Ok(expense_id) => expense_id,
        Err(error) => return error.into_html_response("Failed to load the expense form"),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_html_response("Failed to load the expense form");
        }
    };

    let expense = match get_expense(expense_id, &connection) {
        Ok(expense) => expense,
        Err(error) => return error.into_html_response("Failed to load the expense form"),
    };

    let categories = match get_all_categories(&connection) {
        Ok(categories) => categories,
        Err(error) => return error.into_html_response("Failed to load the expense form"),
    };

    edit_expense_view(expense_id, &ExpenseForm::from(&expense), &categories, None).into_response()
}

/// Replace the expense's fields with the submitted form and redirect to its page.
///
/// An invalid form is shown again with the error and a 400 status.
pub async fn update_expense_form_endpoint(
    State(state): State<ExpenseState>,
    expense_id: Result<Path<ExpenseId>, PathRejection>,
    Form(form): Form<ExpenseForm>,
) -> Response {
    let expense_id = match path_id(expense_id) {
        Ok(expense_id) => expense_id,
        Err(error) => return error.into_html_response("Failed to update expense"),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_html_response("Failed to update expense");
        }
    };

    let result = NewExpense::try_from(&form)
        .map(ExpenseUpdate::from)
        .and_then(|update| update_expense(expense_id, update, &connection));

    match result {
        Ok(expense) => {
            tracing::debug!("updated expense {} from form", expense.id);
            Redirect::to(&format_endpoint(endpoints::EXPENSE_VIEW, expense.id)).into_response()
        }
        Err(error) if error.status_code() == StatusCode::BAD_REQUEST => {
            let categories = match get_all_categories(&connection) {
                Ok(categories) => categories,
                Err(error) => return error.into_html_response("Failed to update expense"),
            };

            (
                StatusCode::BAD_REQUEST,
                edit_expense_view(expense_id, &form, &categories, Some(&error.to_string())),
            )
                .into_response()
        }
        Err(error) => error.into_html_response("Failed to update expense"),
    }
}
