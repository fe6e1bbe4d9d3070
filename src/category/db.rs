//! Database operations for categories.
//!
//! Every query is scoped to the user that owns the categories.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    auth::UserID,
    category::{Category, CategoryId, CategoryLabel, CategoryName, Color},
};

/// Initialize the category table.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES user(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            color TEXT NOT NULL,
            UNIQUE(user_id, name)
        );",
    )?;

    Ok(())
}

fn map_unique_name_error(error: rusqlite::Error, name: &CategoryName) -> Error {
    match error {
        // Code 2067 occurs when a UNIQUE constraint failed.
        rusqlite::Error::SqliteFailure(sql_error, _) if sql_error.extended_code == 2067 => {
            Error::DuplicateCategoryName(name.to_string())
        }
        error => error.into(),
    }
}

/// Create a category owned by `user_id` and return it with its generated ID.
///
/// # Errors
///
/// Returns [Error::DuplicateCategoryName] if the user already has a category called `name`.
pub fn create_category(
    user_id: UserID,
    name: CategoryName,
    color: Color,
    connection: &Connection,
) -> Result<Category, Error> {
    connection
        .execute(
            "INSERT INTO category (user_id, name, color) VALUES (?1, ?2, ?3);",
            (user_id.as_i64(), name.as_ref(), color.as_ref()),
        )
        .map_err(|error| map_unique_name_error(error, &name))?;

    let id = connection.last_insert_rowid();

    Ok(Category { id, name, color })
}

/// Retrieve one of the user's categories by ID.
///
/// # Errors
///
/// Returns [Error::NotFound] if the category does not exist or belongs to someone else.
pub fn get_category(
    user_id: UserID,
    category_id: CategoryId,
    connection: &Connection,
) -> Result<Category, Error> {
    connection
        .prepare("SELECT id, name, color FROM category WHERE id = :id AND user_id = :user_id;")?
        .query_row(
            &[(":id", &category_id), (":user_id", &user_id.as_i64())],
            map_row,
        )
        .map_err(|error| error.into())
}

/// Retrieve all of the user's categories ordered by name, ignoring case.
pub fn get_all_categories(user_id: UserID, connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare(
            "SELECT id, name, color FROM category WHERE user_id = :user_id
            ORDER BY name COLLATE NOCASE ASC, id ASC;",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the id and name of each of the user's categories, ordered like [get_all_categories].
pub fn get_category_labels(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<CategoryLabel>, Error> {
    connection
        .prepare(
            "SELECT id, name FROM category WHERE user_id = :user_id
            ORDER BY name COLLATE NOCASE ASC, id ASC;",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], |row| {
            Ok(CategoryLabel {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .map(|maybe_label| maybe_label.map_err(|error| error.into()))
        .collect()
}

/// Update the name and color of one of the user's categories.
///
/// Transactions that use the old name keep it.
///
/// # Errors
///
/// Returns:
/// - [Error::UpdateMissingCategory] if the category does not exist or belongs to someone else,
/// - [Error::DuplicateCategoryName] if another of the user's categories is already called `name`.
pub fn update_category(
    user_id: UserID,
    category_id: CategoryId,
    name: CategoryName,
    color: Color,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection
        .execute(
            "UPDATE category SET name = ?1, color = ?2 WHERE id = ?3 AND user_id = ?4",
            (name.as_ref(), color.as_ref(), category_id, user_id.as_i64()),
        )
        .map_err(|error| map_unique_name_error(error, &name))?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingCategory);
    }

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let raw_color: String = row.get(2)?;

    Ok(Category {
        id,
        name: CategoryName::new_unchecked(&raw_name),
        color: Color::new_unchecked(&raw_color),
    })
}
