//! An expense tracker for recording, filtering, and summarizing spending.
//!
//! This library provides a JSON API over a SQLite database of expenses and
//! categories, and server-rendered pages for viewing and editing them.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::Serialize;
use tokio::signal;

use crate::internal_server_error::{InternalServerError, error_page};

mod app_state;
mod category;
mod dashboard;
mod database_id;
mod db;
mod endpoints;
mod expense;
mod health;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod request;
mod routing;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use category::{Category, CategoryId, CategoryName, create_category};
pub use db::initialize as initialize_db;
pub use expense::{
    Expense, ExpenseAmount, ExpenseFilters, ExpenseId, ExpenseStats, ExpenseTitle, NewExpense,
    compute_stats, create_expense, filter_expenses,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, REQUEST_BODY_SIZE_LIMIT, logging_middleware};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// One or more of the fields required to create an expense were missing.
    #[error("Title, amount, category, and date are required")]
    MissingExpenseFields,

    /// An empty string was used as an expense title.
    #[error("Expense title cannot be empty")]
    EmptyExpenseTitle,

    /// A negative amount was used for an expense.
    ///
    /// Expenses record money spent, so amounts must be zero or greater.
    #[error("Expense amount cannot be negative")]
    NegativeAmount,

    /// An amount larger than [expense::MAX_EXPENSE_AMOUNT] was used for an expense.
    #[error("Expense amount cannot be more than 1,000,000,000,000")]
    AmountTooLarge,

    /// An empty string was used to create a category name.
    #[error("Category name is required")]
    EmptyCategoryName,

    /// The category ID used for an expense did not match a valid category.
    #[error("Could not find a category with the ID {0}")]
    InvalidCategory(category::CategoryId),

    /// A filter query parameter could not be parsed.
    ///
    /// The first string is the parameter name and the second is the value
    /// that was rejected.
    #[error("Invalid value for filter \"{0}\": \"{1}\"")]
    InvalidFilter(&'static str, String),

    /// A field submitted from an HTML form could not be parsed.
    ///
    /// The first string is the field label and the second is the value
    /// that was rejected.
    #[error("Invalid value for {0}: \"{1}\"")]
    InvalidFormField(&'static str, String),

    /// The request body could not be parsed.
    #[error("Invalid request body: {0}")]
    InvalidRequestBody(String),

    /// The ID in the request path could not be parsed.
    #[error("Invalid ID: {0}")]
    InvalidId(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to get an expense that does not exist.
    #[error("Expense not found")]
    MissingExpense,

    /// Tried to update an expense that does not exist.
    #[error("Expense not found")]
    UpdateMissingExpense,

    /// Tried to delete an expense that does not exist.
    #[error("Expense not found")]
    DeleteMissingExpense,

    /// Tried to delete a category that does not exist.
    #[error("Category not found")]
    DeleteMissingCategory,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

/// The JSON body sent to the client when a request fails.
#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}

/// Build a JSON error response with the body `{"error": message}`.
pub(crate) fn json_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.to_owned(),
        }),
    )
        .into_response()
}

impl Error {
    /// The status code the client should see for this error.
    pub(crate) fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingExpenseFields
            | Error::EmptyExpenseTitle
            | Error::NegativeAmount
            | Error::AmountTooLarge
            | Error::EmptyCategoryName
            | Error::InvalidCategory(_)
            | Error::InvalidFilter(_, _)
            | Error::InvalidFormField(_, _)
            | Error::InvalidRequestBody(_)
            | Error::InvalidId(_) => StatusCode::BAD_REQUEST,
            Error::NotFound
            | Error::MissingExpense
            | Error::UpdateMissingExpense
            | Error::DeleteMissingExpense
            | Error::DeleteMissingCategory => StatusCode::NOT_FOUND,
            Error::SqlError(_) | Error::DatabaseLockError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert the error into a JSON response.
    ///
    /// Client errors (400, 404) carry the error's own message. Server errors
    /// are logged and replaced with `fallback_message` so that internal
    /// details never reach the client.
    pub(crate) fn into_json_response(self, fallback_message: &str) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("{fallback_message}: {self}");
            json_error(status, fallback_message)
        } else {
            json_error(status, &self.to_string())
        }
    }

    /// Convert the error into an HTML error page.
    ///
    /// Like [Error::into_json_response], server errors are logged and shown
    /// as `fallback_message`.
    pub(crate) fn into_html_response(self, fallback_message: &str) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("{fallback_message}: {self}");
            InternalServerError {
                description: fallback_message,
                ..Default::default()
            }
            .into_response()
        } else {
            error_page(status, &self.to_string(), "Check the address or go back and try again.")
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        self.into_json_response("Something went wrong")
    }
}
