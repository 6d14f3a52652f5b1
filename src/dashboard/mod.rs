//! Dashboard module
//!
//! This module provides the dashboard page, which shows:
//! - All-time totals as overview cards
//! - The top categories by spend
//! - A filter form and the filtered list of expenses

mod page;
mod view_model;

pub use page::get_dashboard_page;
