//! The data shown on the dashboard, computed ahead of rendering.

use rust_decimal::Decimal;
use time::Date;

use crate::{
    category::{Category, CategoryId},
    expense::{
        CategoryShare, Expense, ExpenseFilters, ExpenseId, ExpenseQuery, ExpenseStats,
        UNCATEGORIZED_LABEL,
    },
};

/// How many categories to list in the top categories section.
pub(super) const TOP_CATEGORY_COUNT: usize = 5;

/// Everything the dashboard page displays.
///
/// Built once per request by [build_view_model] and never modified, so
/// rendering is a pure function of this value.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct DashboardViewModel {
    pub total: Decimal,
    pub count: usize,
    pub average: Decimal,
    pub top_categories: Vec<CategoryShare>,
    /// The filter values to prefill the filter form with.
    pub filter_values: ExpenseQuery,
    pub has_active_filters: bool,
    pub category_options: Vec<CategoryOption>,
    pub expenses: Vec<ExpenseRow>,
    /// A message explaining why the filters could not be applied.
    pub filter_error: Option<String>,
}

/// An entry in the category drop-down of the filter form.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct CategoryOption {
    pub id: CategoryId,
    pub name: String,
    pub selected: bool,
}

/// A row in the expense table.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct ExpenseRow {
    pub id: ExpenseId,
    pub title: String,
    pub date: Date,
    pub amount: Decimal,
    pub category_name: String,
    pub description: Option<String>,
}

impl From<&Expense> for ExpenseRow {
    fn from(expense: &Expense) -> Self {
        Self {
            id: expense.id,
            title: expense.title.clone(),
            date: expense.date,
            amount: expense.amount,
            category_name: expense
                .category_name()
                .unwrap_or(UNCATEGORIZED_LABEL)
                .to_owned(),
            description: expense.description.clone(),
        }
    }
}

/// Assemble the dashboard from the already filtered `expenses`, all
/// `categories`, the all-time `stats`, and the active `filters`.
pub(super) fn build_view_model(
    expenses: &[Expense],
    categories: &[Category],
    stats: &ExpenseStats,
    filters: &ExpenseFilters,
) -> DashboardViewModel {
    let category_options = categories
        .iter()
        .map(|category| CategoryOption {
            id: category.id,
            name: category.name.to_string(),
            selected: filters.category == Some(category.id),
        })
        .collect();

    DashboardViewModel {
        total: stats.total,
        count: stats.count,
        average: stats.average,
        top_categories: stats.top_categories(TOP_CATEGORY_COUNT),
        filter_values: filters.to_query(),
        has_active_filters: !filters.is_empty(),
        category_options,
        expenses: expenses.iter().map(ExpenseRow::from).collect(),
        filter_error: None,
    }
}

impl DashboardViewModel {
    /// Record that the filters in `query` could not be applied.
    ///
    /// The rejected values are kept so that the user can correct them.
    pub(super) fn with_filter_error(self, query: ExpenseQuery, error: String) -> Self {
        Self {
            filter_values: query,
            has_active_filters: true,
            filter_error: Some(error),
            ..self
        }
    }
}
