//! Error pages for the HTML routes.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// The page shown when a page handler fails for reasons outside the user's control.
pub struct InternalServerError<'a> {
    pub description: &'a str,
    pub fix: &'a str,
}

impl Default for InternalServerError<'_> {
    fn default() -> Self {
        Self {
            description: "Sorry, something went wrong.",
            fix: "Try again later or check the server logs",
        }
    }
}

impl InternalServerError<'_> {
    pub fn into_html(self) -> Html<String> {
        Html(error_view("Internal Server Error", "500", self.description, self.fix).into_string())
    }
}

impl IntoResponse for InternalServerError<'_> {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.into_html()).into_response()
    }
}

/// Render an error page for a client error such as a missing expense.
pub(crate) fn error_page(status: StatusCode, description: &str, fix: &str) -> Response {
    let title = status.canonical_reason().unwrap_or("Error");
    let header = status.as_str();

    (
        status,
        Html(error_view(title, header, description, fix).into_string()),
    )
        .into_response()
}

#[cfg(test)]
mod internal_server_error_tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use scraper::Selector;

    use crate::test_utils::{assert_content_type, assert_valid_html, parse_html_document};

    use super::{InternalServerError, error_page};

    #[tokio::test]
    async fn renders_default_message() {
        let response = InternalServerError::default().into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_content_type(&response, "text/html; charset=utf-8");
        let document = parse_html_document(response).await;
        assert_valid_html(&document);

        let header = document
            .select(&Selector::parse("h1").unwrap())
            .next()
            .expect("missing header");
        assert_eq!(header.text().collect::<String>(), "500");
        let text = document.root_element().text().collect::<String>();
        assert!(text.contains("Sorry, something went wrong."));
    }

    #[tokio::test]
    async fn error_page_uses_status_code() {
        let response = error_page(StatusCode::NOT_FOUND, "Expense not found", "Go back");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);

        let title = document
            .select(&Selector::parse("title").unwrap())
            .next()
            .expect("missing title");
        assert_eq!(title.text().collect::<String>(), "Not Found - Expense Tracker");
    }
}
