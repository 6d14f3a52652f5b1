//! Database operations for expenses.

use std::str::FromStr;

use rusqlite::{Connection, Row, types::Type};
use rust_decimal::Decimal;
use time::OffsetDateTime;

use crate::{
    Error,
    category::{CategoryId, CategoryName, get_category},
    expense::{
        Expense, ExpenseCategory, ExpenseFilters, ExpenseId, ExpenseUpdate, NewExpense,
        filter_expenses,
    },
};

/// Select expenses with their category joined in.
///
/// `LEFT JOIN` so that expenses whose category has been deleted are still returned.
const SELECT_EXPENSE: &str = "SELECT e.id, e.title, e.amount, e.category_id, e.date, \
    e.description, e.created_at, c.id, c.name \
    FROM expense e \
    LEFT JOIN category c ON c.id = e.category_id";

/// Create a new expense in the database.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidCategory] if `new_expense.category_id` does not refer to a stored category,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_expense(new_expense: NewExpense, connection: &Connection) -> Result<Expense, Error> {
    ensure_category_exists(new_expense.category_id, connection)?;

    let id: ExpenseId = connection
        .prepare(
            "INSERT INTO expense (title, amount, category_id, date, description, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id",
        )?
        .query_row(
            (
                new_expense.title.as_ref(),
                new_expense.amount.as_decimal().to_string(),
                new_expense.category_id,
                new_expense.date,
                new_expense.description,
                OffsetDateTime::now_utc(),
            ),
            |row| row.get(0),
        )?;

    get_expense(id, connection)
}

fn ensure_category_exists(category_id: CategoryId, connection: &Connection) -> Result<(), Error> {
    match get_category(category_id, connection) {
        Ok(_) => Ok(()),
        Err(Error::NotFound) => Err(Error::InvalidCategory(category_id)),
        Err(error) => Err(error),
    }
}

/// Retrieve an expense from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::MissingExpense] if `id` does not refer to a stored expense,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    connection
        .prepare(&format!("{SELECT_EXPENSE} WHERE e.id = :id"))?
        .query_row(&[(":id", &id)], map_expense_row)
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::MissingExpense,
            error => error.into(),
        })
}

/// Retrieve every expense, most recent first.
///
/// Expenses on the same date are ordered by ID so the order is stable.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_all_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(&format!("{SELECT_EXPENSE} ORDER BY e.date DESC, e.id ASC"))?
        .query_map([], map_expense_row)?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the expenses that satisfy every criterion in `filters`, most recent first.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn list_expenses(
    filters: &ExpenseFilters,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    let expenses = get_all_expenses(connection)?;

    Ok(filter_expenses(expenses, filters))
}

/// Apply `update` to the expense with `id` and return the updated expense.
///
/// # Errors
/// This function will return a:
/// - [Error::UpdateMissingExpense] if `id` does not refer to a stored expense,
/// - or [Error::InvalidCategory] if the update moves the expense to a category that does not exist,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_expense(
    id: ExpenseId,
    update: ExpenseUpdate,
    connection: &Connection,
) -> Result<Expense, Error> {
    let mut expense = match get_expense(id, connection) {
        Ok(expense) => expense,
        Err(Error::MissingExpense) => return Err(Error::UpdateMissingExpense),
        Err(error) => return Err(error),
    };

    if let Some(category_id) = update.category_id {
        if category_id != expense.category_id {
            ensure_category_exists(category_id, connection)?;
        }
    }

    update.apply_to(&mut expense);

    let rows_affected = connection.execute(
        "UPDATE expense
         SET title = ?1, amount = ?2, category_id = ?3, date = ?4, description = ?5
         WHERE id = ?6",
        (
            &expense.title,
            expense.amount.to_string(),
            expense.category_id,
            expense.date,
            &expense.description,
            id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingExpense);
    }

    get_expense(id, connection)
}

/// Delete an expense by ID. Returns an error if the expense doesn't exist.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM expense WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingExpense);
    }

    Ok(())
}

/// Create the expense table in the database.
///
/// `category_id` has no foreign key, so deleting a category leaves its
/// expenses pointing at the old ID.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS expense (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            amount TEXT NOT NULL,
            category_id INTEGER NOT NULL,
            date TEXT NOT NULL,
            description TEXT,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_expense_date_category ON expense(date, category_id);",
    )?;

    Ok(())
}

/// Map a row selected with [SELECT_EXPENSE] to an [Expense].
fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let category = match (
        row.get::<usize, Option<i64>>(7)?,
        row.get::<usize, Option<String>>(8)?,
    ) {
        (Some(id), Some(name)) => Some(ExpenseCategory {
            id,
            name: CategoryName::new_unchecked(&name),
        }),
        _ => None,
    };

    Ok(Expense {
        id: row.get(0)?,
        title: row.get(1)?,
        amount: get_decimal(row, 2)?,
        category_id: row.get(3)?,
        date: row.get(4)?,
        description: row.get(5)?,
        created_at: row.get(6)?,
        category,
    })
}

/// Amounts are stored as text so they keep their exact decimal value.
fn get_decimal(row: &Row, index: usize) -> Result<Decimal, rusqlite::Error> {
    let text: String = row.get(index)?;

    Decimal::from_str(&text)
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(error)))
}
