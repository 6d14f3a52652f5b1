//! Core expense domain types.

use std::fmt::Display;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    category::{CategoryId, CategoryName},
    database_id::DatabaseId,
};

/// Database identifier for an expense.
pub type ExpenseId = DatabaseId;

/// A recorded spending transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// A short name for what the money was spent on.
    pub title: String,
    /// The amount of money spent. Never negative.
    pub amount: Decimal,
    /// The ID of the category the expense was filed under.
    ///
    /// This may refer to a category that has since been deleted, in which
    /// case [Expense::category] is `None`.
    pub category_id: CategoryId,
    /// When the money was spent.
    pub date: Date,
    /// Optional free text notes.
    pub description: Option<String>,
    /// When the expense was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// The category referenced by `category_id`, if it still exists.
    pub category: Option<ExpenseCategory>,
}

impl Expense {
    /// The display name of the expense's category, if the category exists.
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|category| category.name.as_ref())
    }
}

/// The category fields joined onto an [Expense].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseCategory {
    pub id: CategoryId,
    pub name: CategoryName,
}

/// A validated, non-empty expense title.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseTitle(String);

impl ExpenseTitle {
    /// Create an expense title with surrounding whitespace removed.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyExpenseTitle] if `title` is empty or only whitespace.
    pub fn new(title: &str) -> Result<Self, Error> {
        let title = title.trim();

        if title.is_empty() {
            Err(Error::EmptyExpenseTitle)
        } else {
            Ok(Self(title.to_owned()))
        }
    }
}

impl AsRef<str> for ExpenseTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ExpenseTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The largest amount a single expense may record: one trillion.
///
/// Summing amounts up to this bound cannot overflow a [Decimal] for any
/// realistic number of expenses.
pub const MAX_EXPENSE_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// A validated amount of money between zero and [MAX_EXPENSE_AMOUNT].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpenseAmount(Decimal);

impl ExpenseAmount {
    /// Create an expense amount.
    ///
    /// # Errors
    ///
    /// Returns [Error::NegativeAmount] if `amount` is less than zero, or
    /// [Error::AmountTooLarge] if `amount` is more than [MAX_EXPENSE_AMOUNT].
    pub fn new(amount: Decimal) -> Result<Self, Error> {
        if amount < Decimal::ZERO {
            Err(Error::NegativeAmount)
        } else if amount > MAX_EXPENSE_AMOUNT {
            Err(Error::AmountTooLarge)
        } else {
            Ok(Self(amount))
        }
    }

    /// The amount as a decimal.
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

/// The validated fields for creating an expense.
///
/// To create a [NewExpense] from untrusted input, use `NewExpense::try_from`
/// on a [CreateExpenseRequest].
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// A short name for what the money was spent on.
    pub title: ExpenseTitle,
    /// The amount of money spent.
    pub amount: ExpenseAmount,
    /// The category to file the expense under. Must exist when the expense is created.
    pub category_id: CategoryId,
    /// When the money was spent.
    pub date: Date,
    /// Optional free text notes. Never blank.
    pub description: Option<String>,
}

impl NewExpense {
    /// Create a new expense without a description.
    pub fn new(
        title: ExpenseTitle,
        amount: ExpenseAmount,
        category_id: CategoryId,
        date: Date,
    ) -> Self {
        Self {
            title,
            amount,
            category_id,
            date,
            description: None,
        }
    }

    /// Set the description. Blank descriptions are stored as no description.
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = normalize_description(description);
        self
    }
}

/// Request body for creating an expense.
///
/// Every field is optional so that missing fields are reported as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    pub title: Option<String>,
    pub amount: Option<Decimal>,
    pub category_id: Option<CategoryId>,
    pub date: Option<Date>,
    pub description: Option<String>,
}

impl TryFrom<CreateExpenseRequest> for NewExpense {
    type Error = Error;

    fn try_from(request: CreateExpenseRequest) -> Result<Self, Self::Error> {
        let (Some(title), Some(amount), Some(category_id), Some(date)) = (
            request.title.filter(|title| !title.trim().is_empty()),
            request.amount,
            request.category_id,
            request.date,
        ) else {
            return Err(Error::MissingExpenseFields);
        };

        Ok(NewExpense::new(
            ExpenseTitle::new(&title)?,
            ExpenseAmount::new(amount)?,
            category_id,
            date,
        )
        .description(request.description))
    }
}

/// The fields that may be changed on an existing expense.
///
/// Absent fields are left unchanged. Fields not listed here are rejected.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateExpenseFields {
    pub title: Option<String>,
    pub amount: Option<Decimal>,
    pub category_id: Option<CategoryId>,
    pub date: Option<Date>,
    /// An empty string removes the description.
    pub description: Option<String>,
}

/// A validated set of changes to an expense.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExpenseUpdate {
    pub title: Option<ExpenseTitle>,
    pub amount: Option<ExpenseAmount>,
    pub category_id: Option<CategoryId>,
    pub date: Option<Date>,
    /// `Some(None)` removes the description.
    pub description: Option<Option<String>>,
}

impl TryFrom<UpdateExpenseFields> for ExpenseUpdate {
    type Error = Error;

    fn try_from(fields: UpdateExpenseFields) -> Result<Self, Self::Error> {
        Ok(Self {
            title: fields
                .title
                .as_deref()
                .map(ExpenseTitle::new)
                .transpose()?,
            amount: fields.amount.map(ExpenseAmount::new).transpose()?,
            category_id: fields.category_id,
            date: fields.date,
            description: fields
                .description
                .map(|description| normalize_description(Some(description))),
        })
    }
}

impl ExpenseUpdate {
    /// Apply the changes to `expense`, leaving absent fields untouched.
    pub(crate) fn apply_to(self, expense: &mut Expense) {
        if let Some(title) = self.title {
            expense.title = title.0;
        }

        if let Some(amount) = self.amount {
            expense.amount = amount.as_decimal();
        }

        if let Some(category_id) = self.category_id {
            expense.category_id = category_id;
        }

        if let Some(date) = self.date {
            expense.date = date;
        }

        if let Some(description) = self.description {
            expense.description = description;
        }
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description.filter(|description| !description.trim().is_empty())
}
