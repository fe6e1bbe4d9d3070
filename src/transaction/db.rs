//! Database operations for transactions.
//!
//! Every query takes the ID of the user that owns the transactions, so one
//! user can never read or change another user's rows.

use rusqlite::{Connection, Row, types::Type};

use crate::{
    Error,
    auth::UserID,
    transaction::{NewTransaction, Transaction, TransactionId, TransactionType},
};

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES user(id) ON DELETE CASCADE,
                amount REAL NOT NULL CHECK (amount > 0),
                type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
                category TEXT NOT NULL,
                date TEXT NOT NULL,
                note TEXT
                )",
        (),
    )?;

    // Covers the list page query.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_user_date ON \"transaction\"(user_id, date);",
        (),
    )?;

    Ok(())
}

/// Save a new transaction for `user_id`.
///
/// # Errors
/// Returns [Error::SqlError] if the row could not be inserted.
pub fn create_transaction(
    user_id: UserID,
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (user_id, amount, type, category, date, note)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, amount, type, category, date, note",
        )?
        .query_row(
            (
                user_id.as_i64(),
                new_transaction.amount,
                new_transaction.type_.as_str(),
                new_transaction.category,
                new_transaction.date,
                new_transaction.note,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve one of the user's transactions by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to one of the user's transactions,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(
    user_id: UserID,
    id: TransactionId,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, amount, type, category, date, note FROM \"transaction\"
             WHERE id = :id AND user_id = :user_id",
        )?
        .query_one(
            &[(":id", &id), (":user_id", &user_id.as_i64())],
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve all of the user's transactions, most recent date first.
///
/// Transactions on the same date are ordered newest first.
pub fn get_all_transactions(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, amount, type, category, date, note FROM \"transaction\"
             WHERE user_id = :user_id
             ORDER BY date DESC, id DESC",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// Overwrite every field of one of the user's transactions.
///
/// # Errors
/// Returns [Error::UpdateMissingTransaction] if no transaction with `id` belongs to the user.
pub fn update_transaction(
    user_id: UserID,
    id: TransactionId,
    new_values: NewTransaction,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE \"transaction\"
         SET amount = ?1, type = ?2, category = ?3, date = ?4, note = ?5
         WHERE id = ?6 AND user_id = ?7",
        (
            new_values.amount,
            new_values.type_.as_str(),
            new_values.category,
            new_values.date,
            new_values.note,
            id,
            user_id.as_i64(),
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingTransaction);
    }

    Ok(())
}

/// Delete one of the user's transactions.
///
/// # Errors
/// Returns [Error::DeleteMissingTransaction] if no transaction with `id` belongs to the user.
pub fn delete_transaction(
    user_id: UserID,
    id: TransactionId,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM \"transaction\" WHERE id = ?1 AND user_id = ?2",
        (id, user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingTransaction);
    }

    Ok(())
}

fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let raw_type: String = row.get(2)?;
    let type_ = raw_type.parse::<TransactionType>().map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(error))
    })?;
    let category = row.get(3)?;
    let date = row.get(4)?;
    let note = row.get(5)?;

    Ok(Transaction {
        id,
        amount,
        type_,
        category,
        date,
        note,
    })
}
