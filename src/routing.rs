//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{delete, get, post},
};

use crate::{
    AppState,
    category::{
        create_category_endpoint, create_category_form_endpoint, delete_category_endpoint,
        delete_category_form_endpoint, get_categories_page, list_categories_endpoint,
    },
    dashboard::get_dashboard_page,
    endpoints,
    expense::{
        create_expense_endpoint, create_expense_form_endpoint, delete_expense_endpoint,
        delete_expense_form_endpoint, get_edit_expense_page, get_expense_endpoint,
        get_expense_page, get_expense_summary_endpoint, get_new_expense_page,
        list_expenses_endpoint, update_expense_endpoint, update_expense_form_endpoint,
    },
    health::get_health,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(endpoints::HEALTH, get(get_health))
        .route(
            endpoints::EXPENSES,
            get(list_expenses_endpoint).post(create_expense_endpoint),
        )
        .route(
            endpoints::EXPENSE_SUMMARY,
            get(get_expense_summary_endpoint),
        )
        .route(
            endpoints::EXPENSE,
            get(get_expense_endpoint)
                .put(update_expense_endpoint)
                .delete(delete_expense_endpoint),
        )
        .route(
            endpoints::CATEGORIES,
            get(list_categories_endpoint).post(create_category_endpoint),
        )
        .route(endpoints::CATEGORY, delete(delete_category_endpoint));

    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(
            endpoints::NEW_EXPENSE_VIEW,
            get(get_new_expense_page).post(create_expense_form_endpoint),
        )
        .route(endpoints::EXPENSE_VIEW, get(get_expense_page))
        .route(
            endpoints::EDIT_EXPENSE_VIEW,
            get(get_edit_expense_page).post(update_expense_form_endpoint),
        )
        .route(
            endpoints::DELETE_EXPENSE_VIEW,
            post(delete_expense_form_endpoint),
        )
        .route(
            endpoints::CATEGORIES_VIEW,
            get(get_categories_page).post(create_category_form_endpoint),
        )
        .route(
            endpoints::DELETE_CATEGORY_VIEW,
            post(delete_category_form_endpoint),
        );

    page_routes
        .merge(api_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}
