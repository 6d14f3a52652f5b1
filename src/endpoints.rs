//! The URIs for the HTML pages and JSON API.
//!
//! For endpoints that take a parameter, e.g., '/api/expenses/{expense_id}', use [format_endpoint].

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The page summarizing and listing expenses.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page with the form for recording an expense.
pub const NEW_EXPENSE_VIEW: &str = "/expenses/new";
/// The page showing a single expense.
pub const EXPENSE_VIEW: &str = "/expenses/{expense_id}";
/// The page with the form for editing an expense.
pub const EDIT_EXPENSE_VIEW: &str = "/expenses/{expense_id}/edit";
/// The form target for deleting an expense from its page.
pub const DELETE_EXPENSE_VIEW: &str = "/expenses/{expense_id}/delete";
/// The page for listing, adding, and deleting categories.
pub const CATEGORIES_VIEW: &str = "/categories";
/// The form target for deleting a category from the categories page.
pub const DELETE_CATEGORY_VIEW: &str = "/categories/{category_id}/delete";

/// The route for checking that the server is up.
pub const HEALTH: &str = "/api/health";
/// The route to list and create expenses.
pub const EXPENSES: &str = "/api/expenses";
/// The route to get, update, or delete a single expense.
pub const EXPENSE: &str = "/api/expenses/{expense_id}";
/// The route for all-time expense statistics.
pub const EXPENSE_SUMMARY: &str = "/api/expenses/stats/summary";
/// The route to list and create categories.
pub const CATEGORIES: &str = "/api/categories";
/// The route to delete a single category.
pub const CATEGORY: &str = "/api/categories/{category_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter starts with a left brace and ends with a right brace, e.g.
/// '{expense_id}' in '/api/expenses/{expense_id}'. Only the first parameter is
/// replaced. An unclosed parameter runs to the end of the path.
///
/// If no parameter is found in `endpoint_path`, the original path is returned.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
