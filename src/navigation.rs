//! The navigation bar shown at the top of every page.

use maud::{Markup, html};

use crate::{endpoints, html::LINK_STYLE};

/// A link in the navigation bar.
///
/// Only one link should be current at any one time.
struct Link<'a> {
    url: &'a str,
    title: &'a str,
    is_current: bool,
}

impl Link<'_> {
    fn into_html(self) -> Markup {
        html! {
            @if self.is_current {
                a href=(self.url) class=(LINK_STYLE) aria-current="page" { strong { (self.title) } }
            } @else {
                a href=(self.url) class=(LINK_STYLE) { (self.title) }
            }
        }
    }
}

pub struct NavBar<'a> {
    links: Vec<Link<'a>>,
}

impl NavBar<'_> {
    /// Get the navigation bar.
    ///
    /// If a link matches `active_endpoint`, then that link will be
    /// marked as the current page.
    pub fn new(active_endpoint: &str) -> NavBar<'_> {
        let links = [
            (endpoints::DASHBOARD_VIEW, "Dashboard"),
            (endpoints::NEW_EXPENSE_VIEW, "Add Expense"),
            (endpoints::CATEGORIES_VIEW, "Categories"),
        ]
        .into_iter()
        .map(|(url, title)| Link {
            url,
            title,
            is_current: active_endpoint == url,
        })
        .collect();

        NavBar { links }
    }

    pub fn into_html(self) -> Markup {
        html! {
            nav class="nav"
            {
                @for link in self.links {
                    (link.into_html())
                }
            }
        }
    }
}
