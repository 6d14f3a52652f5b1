//! Database operations for categories.

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    category::{Category, CategoryId, CategoryName},
};

/// Create a category and return it with its generated ID.
pub fn create_category(name: CategoryName, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare(
            "INSERT INTO category (name, created_at) VALUES (?1, ?2)
             RETURNING id, name, created_at;",
        )?
        .query_row((name.as_ref(), OffsetDateTime::now_utc()), map_row)
        .map_err(|error| error.into())
}

/// Retrieve a single category by ID.
pub fn get_category(category_id: CategoryId, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare("SELECT id, name, created_at FROM category WHERE id = :id;")?
        .query_row(&[(":id", &category_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all categories ordered alphabetically by name.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT id, name, created_at FROM category ORDER BY name ASC, id ASC;")?
        .query_map([], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Delete a category by ID. Returns an error if the category doesn't exist.
///
/// Expenses that reference the category are left untouched and keep the
/// now dangling category ID.
pub fn delete_category(category_id: CategoryId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM category WHERE id = ?1", [category_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingCategory);
    }

    Ok(())
}

/// Initialize the category table and indexes.
///
/// IDs are never reused, so an expense left pointing at a deleted category
/// cannot end up attached to a category created later.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_category_name ON category(name);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let name = CategoryName::new_unchecked(&raw_name);
    let created_at = row.get(2)?;

    Ok(Category {
        id,
        name,
        created_at,
    })
}
