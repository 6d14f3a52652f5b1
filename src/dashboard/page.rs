//! Dashboard HTTP handler and view rendering.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::get_all_categories,
    dashboard::view_model::{DashboardViewModel, build_view_model},
    endpoints::{self, format_endpoint},
    expense::{ExpenseFilters, ExpenseQuery, compute_stats, filter_expenses, get_all_expenses},
    html::{
        BUTTON_PRIMARY_STYLE, CARD_LABEL_STYLE, CARD_STYLE, CARD_VALUE_STYLE,
        CATEGORY_BADGE_STYLE, FORM_INPUT_STYLE, FORM_LABEL_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, TABLE_STYLE, base,
        format_currency, format_percentage, link,
    },
    navigation::NavBar,
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display a page with an overview of all expenses and the expenses matching
/// the filter query parameters.
///
/// The overview always covers every expense. Filters that cannot be parsed
/// are reported on the page and the full list is shown instead.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    query: Result<Query<ExpenseQuery>, QueryRejection>,
) -> Response {
    let (query, filters) = match query {
        Ok(Query(query)) => {
            let filters = ExpenseFilters::try_from(query.clone());
            (query, filters)
        }
        Err(rejection) => (
            ExpenseQuery::default(),
            Err(Error::InvalidRequestBody(rejection.body_text())),
        ),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_html_response("Failed to load the dashboard");
        }
    };

    let all_expenses = match get_all_expenses(&connection) {
        Ok(expenses) => expenses,
        Err(error) => return error.into_html_response("Failed to load the dashboard"),
    };
    let categories = match get_all_categories(&connection) {
        Ok(categories) => categories,
        Err(error) => return error.into_html_response("Failed to load the dashboard"),
    };
    drop(connection);

    let stats = compute_stats(&all_expenses);

    let view_model = match filters {
        Ok(filters) => {
            let expenses = filter_expenses(all_expenses, &filters);
            build_view_model(&expenses, &categories, &stats, &filters)
        }
        Err(error) => {
            tracing::debug!("ignoring invalid dashboard filters: {error}");
            let filters = ExpenseFilters::default();
            let expenses = filter_expenses(all_expenses, &filters);
            build_view_model(&expenses, &categories, &stats, &filters)
                .with_filter_error(query, error.to_string())
        }
    };

    dashboard_view(&view_model).into_response()
}

fn dashboard_view(view_model: &DashboardViewModel) -> Markup {
    let content = html! {
        (NavBar::new(endpoints::DASHBOARD_VIEW).into_html())

        main class=(PAGE_CONTAINER_STYLE)
        {
            h1 { "Expenses" }

            p { (link(endpoints::NEW_EXPENSE_VIEW, "Add an expense")) }

            (overview_cards(view_model))
            (top_categories_view(view_model))
            (filter_form(view_model))
            (expense_table(view_model))
        }
    };

    base("Dashboard", &content)
}

fn overview_cards(view_model: &DashboardViewModel) -> Markup {
    html! {
        section id="overview" class="cards"
        {
            (overview_card("Total Spent", &format_currency(view_model.total)))
            (overview_card("Expenses", &view_model.count.to_string()))
            (overview_card("Average Expense", &format_currency(view_model.average)))
        }
    }
}

fn overview_card(label: &str, value: &str) -> Markup {
    html! {
        div class=(CARD_STYLE)
        {
            p class=(CARD_LABEL_STYLE) { (label) }
            p class=(CARD_VALUE_STYLE) { (value) }
        }
    }
}

fn top_categories_view(view_model: &DashboardViewModel) -> Markup {
    html! {
        section id="top-categories"
        {
            h2 { "Top Categories" }

            @if view_model.top_categories.is_empty() {
                p { "No spending recorded yet." }
            } @else {
                ul
                {
                    @for share in &view_model.top_categories {
                        li
                        {
                            div
                            {
                                span class=(CATEGORY_BADGE_STYLE) { (share.name) }
                                " "
                                span { (format_currency(share.amount)) }
                                " "
                                span class=(CARD_LABEL_STYLE) { (format_percentage(share.percentage)) }
                            }

                            div class="bar"
                            {
                                div
                                    class="bar-fill"
                                    style=(format!("width: {:.1}%", share.percentage.round_dp(1)))
                                {}
                            }
                        }
                    }
                }
            }
        }
    }
}

fn filter_form(view_model: &DashboardViewModel) -> Markup {
    let values = &view_model.filter_values;

    html! {
        form method="get" action=(endpoints::DASHBOARD_VIEW) class="filters"
        {
            (filter_input("startDate", "From", "date", values.start_date.as_deref()))
            (filter_input("endDate", "To", "date", values.end_date.as_deref()))

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                select id="category" name="category" class=(FORM_INPUT_STYLE)
                {
                    option value="" { "All categories" }

                    @for option in &view_model.category_options {
                        option value=(option.id) selected[option.selected] { (option.name) }
                    }
                }
            }

            (filter_input("minAmount", "Min amount", "number", values.min_amount.as_deref()))
            (filter_input("maxAmount", "Max amount", "number", values.max_amount.as_deref()))
            (filter_input("search", "Search", "search", values.search.as_deref()))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Apply" }

            @if view_model.has_active_filters {
                (link(endpoints::DASHBOARD_VIEW, "Clear all"))
            }
        }

        @if let Some(error) = &view_model.filter_error {
            p id="filter-error" role="alert" { (error) }
        }
    }
}

fn filter_input(name: &str, label: &str, type_: &str, value: Option<&str>) -> Markup {
    html! {
        div
        {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }

            @if type_ == "number" {
                input
                    id=(name)
                    name=(name)
                    type="number"
                    min="0"
                    step="0.01"
                    class=(FORM_INPUT_STYLE)
                    value=[value];
            } @else {
                input id=(name) name=(name) type=(type_) class=(FORM_INPUT_STYLE) value=[value];
            }
        }
    }
}

fn expense_table(view_model: &DashboardViewModel) -> Markup {
    html! {
        section id="expenses"
        {
            @if view_model.expenses.is_empty() {
                p
                {
                    @if view_model.has_active_filters {
                        "No expenses match the current filters."
                    } @else {
                        "No expenses recorded yet."
                    }
                }
            } @else {
                table class=(TABLE_STYLE)
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Title" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        }
                    }

                    tbody
                    {
                        @for expense in &view_model.expenses {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td class=(TABLE_CELL_STYLE) { (expense.date) }
                                td class=(TABLE_CELL_STYLE)
                                {
                                    (link(&format_endpoint(endpoints::EXPENSE_VIEW, expense.id), &expense.title))

                                    @if let Some(description) = &expense.description {
                                        br;
                                        small { (description) }
                                    }
                                }
                                td class=(TABLE_CELL_STYLE)
                                {
                                    span class=(CATEGORY_BADGE_STYLE) { (expense.category_name) }
                                }
                                td class=(TABLE_CELL_STYLE) { (format_currency(expense.amount)) }
                            }
                        }
                    }
                }
            }
        }
    }
}
