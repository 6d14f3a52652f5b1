//! Category management for grouping expenses.

mod categories_page;
mod create;
mod db;
mod delete;
mod domain;
mod list;

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

pub use categories_page::{
    create_category_form_endpoint, delete_category_form_endpoint, get_categories_page,
};
pub use create::create_category_endpoint;
pub use db::{
    create_category, create_category_table, delete_category, get_all_categories,
    get_category,
};
pub use delete::delete_category_endpoint;
pub use domain::{Category, CategoryId, CategoryName, NewCategoryRequest};
pub use list::list_categories_endpoint;

/// The state needed by the category endpoints and page.
#[derive(Debug, Clone)]
pub struct CategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}
