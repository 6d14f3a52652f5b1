//! Summary statistics over a collection of expenses.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::expense::Expense;

/// The category name used for expenses without a category, or whose category has been deleted.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Totals across a set of expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseStats {
    /// The sum of all expense amounts.
    pub total: Decimal,
    /// The number of expenses.
    pub count: usize,
    /// `total / count`, or zero when there are no expenses.
    pub average: Decimal,
    /// The sum of expense amounts for each category name.
    ///
    /// Categories that share a name share an entry.
    pub category_breakdown: BTreeMap<String, Decimal>,
}

/// A category's total along with its share of the overall total.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub name: String,
    pub amount: Decimal,
    /// The category's share of the total, from 0 to 100.
    pub percentage: Decimal,
}

/// Calculate the total, count, average and per-category totals for `expenses`.
pub fn compute_stats(expenses: &[Expense]) -> ExpenseStats {
    let mut total = Decimal::ZERO;
    let mut category_breakdown = BTreeMap::new();

    for expense in expenses {
        total += expense.amount;

        let category_name = expense.category_name().unwrap_or(UNCATEGORIZED_LABEL);
        *category_breakdown
            .entry(category_name.to_owned())
            .or_insert(Decimal::ZERO) += expense.amount;
    }

    let count = expenses.len();
    let average = if count > 0 {
        total / Decimal::from(count)
    } else {
        Decimal::ZERO
    };

    ExpenseStats {
        total,
        count,
        average,
        category_breakdown,
    }
}

impl ExpenseStats {
    /// The `limit` categories with the largest totals, largest first.
    ///
    /// Categories with equal totals are ordered by name.
    pub fn top_categories(&self, limit: usize) -> Vec<CategoryShare> {
        let mut categories: Vec<(&String, &Decimal)> = self.category_breakdown.iter().collect();
        // The breakdown is already sorted by name, and the sort is stable.
        categories.sort_by(|(_, a), (_, b)| b.cmp(a));

        categories
            .into_iter()
            .take(limit)
            .map(|(name, &amount)| CategoryShare {
                name: name.to_owned(),
                amount,
                percentage: self.percentage_of_total(amount),
            })
            .collect()
    }

    fn percentage_of_total(&self, amount: Decimal) -> Decimal {
        if self.total.is_zero() {
            Decimal::ZERO
        } else {
            amount / self.total * Decimal::ONE_HUNDRED
        }
    }
}
