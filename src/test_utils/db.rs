use std::str::FromStr;

use email_address::EmailAddress;
use rusqlite::Connection;

use crate::{
    auth::{PasswordHash, User, ValidatedPassword, create_user},
    db::initialize,
};

pub(crate) const TEST_EMAIL: &str = "test@example.com";
pub(crate) const TEST_PASSWORD: &str = "averysafeandsecurepassword";

/// An in-memory database with every table created.
pub(crate) fn get_test_connection() -> Connection {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    initialize(&connection).expect("Could not initialize database");

    connection
}

/// Register a user with the given email and [TEST_PASSWORD].
///
/// Uses the minimum bcrypt cost to keep tests fast.
pub(crate) fn insert_user(email: &str, connection: &Connection) -> User {
    let password_hash = PasswordHash::new(ValidatedPassword::new_unchecked(TEST_PASSWORD), 4)
        .expect("Could not hash test password");

    create_user(
        EmailAddress::from_str(email).expect("Invalid test email"),
        password_hash,
        connection,
    )
    .expect("Could not create test user")
}

/// Register the default test user with [TEST_EMAIL] and [TEST_PASSWORD].
pub(crate) fn insert_test_user(connection: &Connection) -> User {
    insert_user(TEST_EMAIL, connection)
}
