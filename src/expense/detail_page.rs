//! The page showing a single expense, and the form target for deleting it.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    response::{IntoResponse, Redirect, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    endpoints::{self, format_endpoint},
    expense::{Expense, ExpenseId, ExpenseState, UNCATEGORIZED_LABEL, delete_expense, get_expense},
    html::{
        BUTTON_DELETE_STYLE, CARD_LABEL_STYLE, CATEGORY_BADGE_STYLE, PAGE_CONTAINER_STYLE, base,
        format_currency, link,
    },
    navigation::NavBar,
    request::path_id,
};

fn expense_view(expense: &Expense) -> Markup {
    let content = html! {
        (NavBar::new(endpoints::DASHBOARD_VIEW).into_html())

        main class=(PAGE_CONTAINER_STYLE)
        {
            h1 { (expense.title) }

            dl id="expense"
            {
                dt class=(CARD_LABEL_STYLE) { "Amount" }
                dd { (format_currency(expense.amount)) }

                dt class=(CARD_LABEL_STYLE) { "Category" }
                dd
                {
                    span class=(CATEGORY_BADGE_STYLE)
                    {
                        (expense.category_name().unwrap_or(UNCATEGORIZED_LABEL))
                    }
                }

                dt class=(CARD_LABEL_STYLE) { "Date" }
                dd { (expense.date) }

                @if let Some(description) = &expense.description {
                    dt class=(CARD_LABEL_STYLE) { "Description" }
                    dd { (description) }
                }

                dt class=(CARD_LABEL_STYLE) { "Recorded" }
                dd { (expense.created_at.date()) }
            }

            p
            {
                (link(&format_endpoint(endpoints::EDIT_EXPENSE_VIEW, expense.id), "Edit"))
                " "
                (link(endpoints::DASHBOARD_VIEW, "Back to Dashboard"))
            }

            form
                method="post"
                action=(format_endpoint(endpoints::DELETE_EXPENSE_VIEW, expense.id))
            {
                button type="submit" class=(BUTTON_DELETE_STYLE) { "Delete" }
            }
        }
    };

    base(&expense.title, &content)
}

/// Display a single expense with links to edit and delete it.
pub async fn get_expense_page(
    State(state): State<ExpenseState>,
    expense_id: Result<Path<ExpenseId>, PathRejection>,
) -> Response {
    let expense_id = match path_id(expense_id) {
        Ok(expense_id) => expense_id,
        Err(error) => return error.into_html_response("Failed to load expense"),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_html_response("Failed to load expense");
        }
    };

    match get_expense(expense_id, &connection) {
        Ok(expense) => expense_view(&expense).into_response(),
        Err(error) => error.into_html_response("Failed to load expense"),
    }
}

/// Delete an expense and redirect to the dashboard.
pub async fn delete_expense_form_endpoint(
    State(state): State<ExpenseState>,
    expense_id: Result<Path<ExpenseId>, PathRejection>,
) -> Response {
    let expense_id = match path_id(expense_id) {
        Ok(expense_id) => expense_id,
        Err(error) => return error.into_html_response("Failed to delete expense"),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_html_response("Failed to delete expense");
        }
    };

    match delete_expense(expense_id, &connection) {
        Ok(()) => {
            tracing::debug!("deleted expense {expense_id} from form");
            Redirect::to(endpoints::DASHBOARD_VIEW).into_response()
        }
        Err(error) => error.into_html_response("Failed to delete expense"),
    }
}

#[cfg(test)]
mod expense_page_tests {
    use axum::http::StatusCode;
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        Error,
        category::delete_category,
        endpoints::{self, format_endpoint},
        expense::get_expense,
        test_utils::{
            assert_valid_html, get_test_app_state, get_test_server, insert_test_category,
            insert_test_expense,
        },
    };

    fn texts(document: &Html, selector: &str) -> Vec<String> {
        let selector = Selector::parse(selector).unwrap();
        document
            .select(&selector)
            .map(|element| element.text().collect::<String>().trim().to_owned())
            .collect()
    }

    #[tokio::test]
    async fn shows_expense_details() {
        let state = get_test_app_state();
        let travel = insert_test_category(&state, "Travel");
        let expense = insert_test_expense(&state, "Flight", 1450, travel, date!(2025 - 03 - 14));
        let server = get_test_server(state);

        let response = server
            .get(&format_endpoint(endpoints::EXPENSE_VIEW, expense.id))
            .await;

        response.assert_status_ok();
        let document = Html::parse_document(&response.text());
        assert_valid_html(&document);
        assert_eq!(texts(&document, "h1"), vec!["Flight"]);
        assert_eq!(
            texts(&document, "#expense dd"),
            vec![
                "$1,450.00".to_owned(),
                "Travel".to_owned(),
                "2025-03-14".to_owned(),
                expense.created_at.date().to_string(),
            ]
        );

        let edit_url = format_endpoint(endpoints::EDIT_EXPENSE_VIEW, expense.id);
        let edit_link = document
            .select(&Selector::parse("main a").unwrap())
            .find(|link| link.value().attr("href") == Some(edit_url.as_str()));
        assert!(edit_link.is_some(), "edit link missing");

        let delete_form = document
            .select(&Selector::parse("form[method=post]").unwrap())
            .next()
            .expect("delete form missing");
        assert_eq!(
            delete_form.value().attr("action"),
            Some(format_endpoint(endpoints::DELETE_EXPENSE_VIEW, expense.id).as_str())
        );
    }

    #[tokio::test]
    async fn orphaned_expense_is_uncategorized() {
        let state = get_test_app_state();
        let gone = insert_test_category(&state, "Gone");
        let expense = insert_test_expense(&state, "Flight", 10, gone, date!(2025 - 03 - 14));
        delete_category(gone, &state.db_connection.lock().unwrap()).unwrap();
        let server = get_test_server(state);

        let response = server
            .get(&format_endpoint(endpoints::EXPENSE_VIEW, expense.id))
            .await;

        let document = Html::parse_document(&response.text());
        assert_eq!(texts(&document, "#expense .badge"), vec!["Uncategorized"]);
    }

    #[tokio::test]
    async fn missing_expense_shows_not_found_page() {
        let server = get_test_server(get_test_app_state());

        let response = server
            .get(&format_endpoint(endpoints::EXPENSE_VIEW, 404))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        let document = Html::parse_document(&response.text());
        assert_valid_html(&document);
        assert_eq!(texts(&document, "h1"), vec!["404"]);
        assert!(response.text().contains("Expense not found"));
    }

    #[tokio::test]
    async fn delete_form_removes_expense_and_redirects() {
        let state = get_test_app_state();
        let travel = insert_test_category(&state, "Travel");
        let expense = insert_test_expense(&state, "Flight", 10, travel, date!(2025 - 03 - 14));
        let server = get_test_server(state.clone());

        let response = server
            .post(&format_endpoint(endpoints::DELETE_EXPENSE_VIEW, expense.id))
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), endpoints::DASHBOARD_VIEW);
        assert_eq!(
            get_expense(expense.id, &state.db_connection.lock().unwrap()),
            Err(Error::MissingExpense)
        );
    }

    #[tokio::test]
    async fn delete_form_for_missing_expense_shows_not_found_page() {
        let server = get_test_server(get_test_app_state());

        let response = server
            .post(&format_endpoint(endpoints::DELETE_EXPENSE_VIEW, 8))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert!(response.text().contains("Expense not found"));
    }
}
