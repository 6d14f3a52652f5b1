//! The page for managing categories.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use maud::{Markup, html};

use crate::{
    Error,
    category::{
        Category, CategoryId, CategoryName, CategoryState, NewCategoryRequest, create_category,
        delete_category, get_all_categories,
    },
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, FORM_ERROR_STYLE, FORM_INPUT_STYLE,
        FORM_LABEL_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, TABLE_STYLE, base,
    },
    navigation::NavBar,
    request::path_id,
};

fn categories_view(categories: &[Category], name: &str, error: Option<&str>) -> Markup {
    let content = html! {
        (NavBar::new(endpoints::CATEGORIES_VIEW).into_html())

        main class=(PAGE_CONTAINER_STYLE)
        {
            h1 { "Categories" }

            form method="post" action=(endpoints::CATEGORIES_VIEW) class="form"
            {
                @if let Some(error) = error {
                    p class=(FORM_ERROR_STYLE) role="alert" { (error) }
                }

                div
                {
                    label for="name" class=(FORM_LABEL_STYLE) { "Name" }

                    input
                        id="name"
                        name="name"
                        type="text"
                        required
                        placeholder="Category name"
                        value=(name)
                        class=(FORM_INPUT_STYLE);
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Category" }
            }

            section id="categories"
            {
                @if categories.is_empty() {
                    p { "No categories yet." }
                } @else {
                    table class=(TABLE_STYLE)
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Created" }
                                th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Actions" } }
                            }
                        }

                        tbody
                        {
                            @for category in categories {
                                tr class=(TABLE_ROW_STYLE)
                                {
                                    td class=(TABLE_CELL_STYLE) { (category.name) }
                                    td class=(TABLE_CELL_STYLE) { (category.created_at.date()) }
                                    td class=(TABLE_CELL_STYLE)
                                    {
                                        form
                                            method="post"
                                            action=(format_endpoint(endpoints::DELETE_CATEGORY_VIEW, category.id))
                                        {
                                            button type="submit" class=(BUTTON_DELETE_STYLE) { "Delete" }
                                        }
                                    }
                                }
                            }
                        }
                    }

                    p { "Expenses in a deleted category are shown as Uncategorized." }
                }
            }
        }
    };

    base("Categories", &content)
}

/// Display every category with a form for adding another.
pub async fn get_categories_page(State(state): State<CategoryState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_html_response("Failed to load categories");
        }
    };

    match get_all_categories(&connection) {
        Ok(categories) => categories_view(&categories, "", None).into_response(),
        Err(error) => error.into_html_response("Failed to load categories"),
    }
}

/// Create a category from the submitted form and redirect back to the categories page.
///
/// A blank name is shown again with the error and a 400 status.
pub async fn create_category_form_endpoint(
    State(state): State<CategoryState>,
    // Must use axum_extra's Form since that parses an empty string as None instead of crashing like axum::Form
    Form(form): Form<NewCategoryRequest>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_html_response("Failed to create category");
        }
    };

    let submitted_name = form.name.unwrap_or_default();
    let result = CategoryName::new(&submitted_name).and_then(|name| create_category(name, &connection));

    match result {
        Ok(category) => {
            tracing::debug!("created category {} from form", category.id);
            Redirect::to(endpoints::CATEGORIES_VIEW).into_response()
        }
        Err(Error::EmptyCategoryName) => {
            let categories = match get_all_categories(&connection) {
                Ok(categories) => categories,
                Err(error) => return error.into_html_response("Failed to create category"),
            };

            (
                StatusCode::BAD_REQUEST,
                categories_view(
                    &categories,
                    &submitted_name,
                    Some(&Error::EmptyCategoryName.to_string()),
                ),
            )
                .into_response()
        }
        Err(error) => error.into_html_response("Failed to create category"),
    }
}

/// Delete a category and redirect back to the categories page.
pub async fn delete_category_form_endpoint(
    State(state): State<CategoryState>,
    category_id: Result<Path<CategoryId>, PathRejection>,
) -> Response {
    let category_id = match path_id(category_id) {
        Ok(category_id) => category_id,
        Err(error) => return error.into_html_response("Failed to delete category"),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_html_response("Failed to delete category");
        }
    };

    match delete_category(category_id, &connection) {
        Ok(()) => {
            tracing::debug!("deleted category {category_id} from form");
            Redirect::to(endpoints::CATEGORIES_VIEW).into_response()
        }
        Err(error) => error.into_html_response("Failed to delete category"),
    }
}
