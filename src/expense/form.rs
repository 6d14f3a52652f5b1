//! The HTML form for recording and editing expenses.

use std::str::FromStr;

use maud::{Markup, html};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, macros::format_description};

use crate::{
    Error,
    category::{Category, CategoryId},
    endpoints,
    expense::{Expense, ExpenseAmount, ExpenseTitle, ExpenseUpdate, MAX_EXPENSE_AMOUNT, NewExpense},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_ERROR_STYLE, FORM_INPUT_STYLE, FORM_LABEL_STYLE, LINK_STYLE,
        link,
    },
};

/// The fields posted by the expense form.
///
/// Text fields are kept as typed so that a rejected form can be shown again
/// without losing the user's input.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub amount: String,
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
}

impl From<&Expense> for ExpenseForm {
    fn from(expense: &Expense) -> Self {
        Self {
            title: expense.title.clone(),
            amount: expense.amount.to_string(),
            category_id: Some(expense.category_id),
            date: expense.date.to_string(),
            description: expense.description.clone().unwrap_or_default(),
        }
    }
}

impl TryFrom<&ExpenseForm> for NewExpense {
    type Error = Error;

    fn try_from(form: &ExpenseForm) -> Result<Self, Self::Error> {
        let title = form.title.trim();
        let amount = form.amount.trim();
        let date = form.date.trim();

        let Some(category_id) = form.category_id else {
            return Err(Error::MissingExpenseFields);
        };

        if title.is_empty() || amount.is_empty() || date.is_empty() {
            return Err(Error::MissingExpenseFields);
        }

        let amount = Decimal::from_str(amount)
            .map_err(|_| Error::InvalidFormField("amount", amount.to_owned()))?;
        let date = Date::parse(date, format_description!("[year]-[month]-[day]"))
            .map_err(|_| Error::InvalidFormField("date", date.to_owned()))?;

        Ok(NewExpense::new(
            ExpenseTitle::new(title)?,
            ExpenseAmount::new(amount)?,
            category_id,
            date,
        )
        .description(Some(form.description.clone())))
    }
}

/// The form replaces every field, so an empty description removes it.
impl From<NewExpense> for ExpenseUpdate {
    fn from(new_expense: NewExpense) -> Self {
        Self {
            title: Some(new_expense.title),
            amount: Some(new_expense.amount),
            category_id: Some(new_expense.category_id),
            date: Some(new_expense.date),
            description: Some(new_expense.description),
        }
    }
}

/// Render the expense form posting to `action`.
///
/// `error` is shown above the fields when a previous submission was rejected.
pub(super) fn expense_form_view(
    action: &str,
    submit_label: &str,
    form: &ExpenseForm,
    categories: &[Category],
    error: Option<&str>,
) -> Markup {
    if categories.is_empty() && form.category_id.is_none() {
        return html! {
            p
            {
                "Expenses are filed under a category. "
                (link(endpoints::CATEGORIES_VIEW, "Add a category"))
                " first."
            }
        };
    }

    html! {
        form method="post" action=(action) class="form"
        {
            @if let Some(error) = error {
                p class=(FORM_ERROR_STYLE) role="alert" { (error) }
            }

            div
            {
                label for="title" class=(FORM_LABEL_STYLE) { "Title" }

                input
                    id="title"
                    name="title"
                    type="text"
                    required
                    autofocus
                    value=(form.title)
                    class=(FORM_INPUT_STYLE);
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                input
                    id="amount"
                    name="amount"
                    type="number"
                    step="0.01"
                    min="0"
                    max=(MAX_EXPENSE_AMOUNT)
                    required
                    value=(form.amount)
                    class=(FORM_INPUT_STYLE);
            }

            div
            {
                label for="category_id" class=(FORM_LABEL_STYLE) { "Category" }

                select id="category_id" name="category_id" required class=(FORM_INPUT_STYLE)
                {
                    option value="" { "Select a category" }

                    @for category in categories {
                        option
                            value=(category.id)
                            selected[form.category_id == Some(category.id)]
                        {
                            (category.name)
                        }
                    }
                }
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    id="date"
                    name="date"
                    type="date"
                    required
                    value=(form.date)
                    class=(FORM_INPUT_STYLE);
            }

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                textarea id="description" name="description" rows="3" class=(FORM_INPUT_STYLE)
                {
                    (form.description)
                }
            }

            div
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { (submit_label) }
                " "
                a href=(endpoints::DASHBOARD_VIEW) class=(LINK_STYLE) { "Cancel" }
            }
        }
    }
}
