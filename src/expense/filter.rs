//! Narrowing a collection of expenses down to those matching a set of filters.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, macros::format_description};

use crate::{Error, category::CategoryId, expense::Expense};

/// The raw filter query parameters, e.g. `?startDate=2025-01-01&search=travel`.
///
/// Empty values are treated the same as absent ones.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub category: Option<String>,
    pub min_amount: Option<String>,
    pub max_amount: Option<String>,
    pub search: Option<String>,
}

/// Optional criteria for narrowing a list of expenses.
///
/// Every criterion that is set must hold for an expense to be kept.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExpenseFilters {
    /// Keep expenses on or after this date.
    pub start_date: Option<Date>,
    /// Keep expenses on or before this date.
    pub end_date: Option<Date>,
    /// Keep expenses in this category.
    pub category: Option<CategoryId>,
    /// Keep expenses of at least this amount.
    pub min_amount: Option<Decimal>,
    /// Keep expenses of at most this amount.
    pub max_amount: Option<Decimal>,
    /// Keep expenses whose title contains this text, ignoring case.
    pub search: Option<String>,
}

impl ExpenseFilters {
    /// Whether no criteria are set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether `expense` satisfies every criterion that is set.
    pub fn matches(&self, expense: &Expense) -> bool {
        self.start_date.is_none_or(|start| expense.date >= start)
            && self.end_date.is_none_or(|end| expense.date <= end)
            && self
                .category
                .is_none_or(|category| expense.category_id == category)
            && self.min_amount.is_none_or(|min| expense.amount >= min)
            && self.max_amount.is_none_or(|max| expense.amount <= max)
            && self.search.as_deref().is_none_or(|search| {
                expense
                    .title
                    .to_lowercase()
                    .contains(&search.to_lowercase())
            })
    }

    /// Convert the filters back into query parameters, e.g. to prefill a form.
    pub fn to_query(&self) -> ExpenseQuery {
        ExpenseQuery {
            start_date: self.start_date.map(|date| date.to_string()),
            end_date: self.end_date.map(|date| date.to_string()),
            category: self.category.map(|category| category.to_string()),
            min_amount: self.min_amount.map(|amount| amount.to_string()),
            max_amount: self.max_amount.map(|amount| amount.to_string()),
            search: self.search.clone(),
        }
    }
}

impl TryFrom<ExpenseQuery> for ExpenseFilters {
    type Error = Error;

    fn try_from(query: ExpenseQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            start_date: parse_param("startDate", query.start_date, parse_date)?,
            end_date: parse_param("endDate", query.end_date, parse_date)?,
            category: parse_param("category", query.category, |value| {
                CategoryId::from_str(value).ok()
            })?,
            min_amount: parse_param("minAmount", query.min_amount, parse_amount)?,
            max_amount: parse_param("maxAmount", query.max_amount, parse_amount)?,
            search: non_empty(query.search),
        })
    }
}

/// Keep the expenses matching `filters`, ordered by date with the most recent first.
///
/// Expenses with the same date keep their relative order from `expenses`.
pub fn filter_expenses(expenses: Vec<Expense>, filters: &ExpenseFilters) -> Vec<Expense> {
    let mut expenses: Vec<Expense> = expenses
        .into_iter()
        .filter(|expense| filters.matches(expense))
        .collect();

    expenses.sort_by(|a, b| b.date.cmp(&a.date));

    expenses
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

fn parse_param<T>(
    name: &'static str,
    value: Option<String>,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, Error> {
    match non_empty(value) {
        None => Ok(None),
        Some(value) => match parse(value.trim()) {
            Some(parsed) => Ok(Some(parsed)),
            None => Err(Error::InvalidFilter(name, value)),
        },
    }
}

fn parse_date(value: &str) -> Option<Date> {
    Date::parse(value, format_description!("[year]-[month]-[day]")).ok()
}

fn parse_amount(value: &str) -> Option<Decimal> {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .ok()
}
