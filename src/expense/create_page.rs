//! The page for recording a new expense.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use maud::{Markup, html};
use time::OffsetDateTime;

use crate::{
    Error,
    category::{Category, get_all_categories},
    endpoints::{self, format_endpoint},
    expense::{ExpenseForm, ExpenseState, NewExpense, create_expense, form::expense_form_view},
    html::{PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
};

fn new_expense_view(form: &ExpenseForm, categories: &[Category], error: Option<&str>) -> Markup {
    let content = html! {
        (NavBar::new(endpoints::NEW_EXPENSE_VIEW).into_html())

        main class=(PAGE_CONTAINER_STYLE)
        {
            h1 { "Add Expense" }

            (expense_form_view(endpoints::NEW_EXPENSE_VIEW, "Add Expense", form, categories, error))
        }
    };

    base("Add Expense", &content)
}

/// Display the form for recording an expense, with the date set to today.
pub async fn get_new_expense_page(State(state): State<ExpenseState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_html_response("Failed to load the expense form");
        }
    };

    let categories = match get_all_categories(&connection) {
        Ok(categories) => categories,
        Err(error) => return error.into_html_response("Failed to load the expense form"),
    };

    let form = ExpenseForm {
        date: OffsetDateTime::now_utc().date().to_string(),
        ..Default::default()
    };

    new_expense_view(&form, &categories, None).into_response()
}

/// Create an expense from the submitted form and redirect to its page.
///
/// An invalid form is shown again with the error and a 400 status.
pub async fn create_expense_form_endpoint(
    State(state): State<ExpenseState>,
    // Must use axum_extra's Form since that parses an empty string as None instead of crashing like axum::Form
    Form(form): Form<ExpenseForm>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_html_response("Failed to create expense");
        }
    };

    let result =
        NewExpense::try_from(&form).and_then(|new_expense| create_expense(new_expense, &connection));

    match result {
        Ok(expense) => {
            tracing::debug!("created expense {} from form", expense.id);
            Redirect::to(&format_endpoint(endpoints::EXPENSE_VIEW, expense.id)).into_response()
        }
        Err(error) if error.status_code() == StatusCode::BAD_REQUEST => {
            let categories = match get_all_categories(&connection) {
                Ok(categories) => categories,
                Err(error) => return error.into_html_response("Failed to create expense"),
            };

            (
                StatusCode::BAD_REQUEST,
                new_expense_view(&form, &categories, Some(&error.to_string())),
            )
                .into_response()
        }
        Err(error) => error.into_html_response("Failed to create expense"),
    }
}

#[cfg(test)]
mod create_expense_page_tests {
    use axum::http::StatusCode;
    use rust_decimal::Decimal;
    use scraper::{Html, Selector};
    use time::{OffsetDateTime, macros::date};

    use crate::{
        endpoints::{self, format_endpoint},
        expense::{ExpenseForm, get_all_expenses},
        test_utils::{assert_valid_html, get_test_app_state, get_test_server, insert_test_category},
    };

    #[tokio::test]
    async fn form_defaults_to_today() {
        let state = get_test_app_state();
        insert_test_category(&state, "Travel");
        let server = get_test_server(state);

        let response = server.get(endpoints::NEW_EXPENSE_VIEW).await;

        response.assert_status_ok();
        let document = Html::parse_document(&response.text());
        assert_valid_html(&document);
        let date_input = document
            .select(&Selector::parse("input[name=date]").unwrap())
            .next()
            .expect("date input missing");
        assert_eq!(
            date_input.value().attr("value"),
            Some(OffsetDateTime::now_utc().date().to_string().as_str())
        );
        let form = document
            .select(&Selector::parse("form").unwrap())
            .next()
            .expect("form missing");
        assert_eq!(form.value().attr("method"), Some("post"));
        assert_eq!(form.value().attr("action"), Some(endpoints::NEW_EXPENSE_VIEW));
    }

    #[tokio::test]
    async fn submitting_form_creates_expense_and_redirects() {
        let state = get_test_app_state();
        let category_id = insert_test_category(&state, "Travel");
        let server = get_test_server(state.clone());

        let response = server
            .post(endpoints::NEW_EXPENSE_VIEW)
            .form(&ExpenseForm {
                title: "Flight to NY".to_owned(),
                amount: "450.50".to_owned(),
                category_id: Some(category_id),
                date: "2025-03-14".to_owned(),
                description: "Conference".to_owned(),
            })
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        let expenses = get_all_expenses(&state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].title, "Flight to NY");
        assert_eq!(expenses[0].amount, Decimal::new(45050, 2));
        assert_eq!(expenses[0].date, date!(2025 - 03 - 14));
        assert_eq!(expenses[0].description.as_deref(), Some("Conference"));
        assert_eq!(
            response.header("location"),
            format_endpoint(endpoints::EXPENSE_VIEW, expenses[0].id)
        );
    }

    #[tokio::test]
    async fn invalid_form_is_shown_again_with_error() {
        let state = get_test_app_state();
        let category_id = insert_test_category(&state, "Travel");
        let server = get_test_server(state.clone());

        let response = server
            .post(endpoints::NEW_EXPENSE_VIEW)
            .form(&ExpenseForm {
                title: "Yacht".to_owned(),
                amount: "2000000000000".to_owned(),
                category_id: Some(category_id),
                date: "2025-03-14".to_owned(),
                description: "".to_owned(),
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let document = Html::parse_document(&response.text());
        assert_valid_html(&document);
        let alert = document
            .select(&Selector::parse("[role=alert]").unwrap())
            .next()
            .expect("error message missing");
        assert_eq!(
            alert.text().collect::<String>(),
            "Expense amount cannot be more than 1,000,000,000,000"
        );
        let title_input = document
            .select(&Selector::parse("input[name=title]").unwrap())
            .next()
            .expect("title input missing");
        assert_eq!(title_input.value().attr("value"), Some("Yacht"));
        assert!(
            get_all_expenses(&state.db_connection.lock().unwrap())
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn unknown_category_is_shown_as_form_error() {
        let state = get_test_app_state();
        insert_test_category(&state, "Travel");
        let server = get_test_server(state);

        let response = server
            .post(endpoints::NEW_EXPENSE_VIEW)
            .form(&ExpenseForm {
                title: "Flight".to_owned(),
                amount: "10".to_owned(),
                category_id: Some(77),
                date: "2025-03-14".to_owned(),
                description: "".to_owned(),
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let text = response.text();
        assert!(
            text.contains("Could not find a category with the ID 77"),
            "got {text}"
        );
    }
}
