//! The endpoint behind a transaction's delete button.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HX_TRIGGER;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::Alert,
    auth::Session,
    transaction::{TransactionId, delete_transaction},
};

/// The client event that makes the transaction list reload itself.
pub const TRANSACTIONS_CHANGED_EVENT: &str = "transactions-changed";

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting a transaction, responds with an alert.
///
/// The response always asks the page to reload the transaction list, so the
/// list shows what is in the database even when the delete failed.
pub async fn delete_transaction_endpoint(
    session: Session,
    Path(transaction_id): Path<TransactionId>,
    State(state): State<DeleteTransactionState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let response = match delete_transaction(session.user_id, transaction_id, &connection) {
        Ok(()) => Alert::SuccessSimple {
            message: "Transaction deleted successfully".to_owned(),
        }
        .into_response(),
        Err(Error::DeleteMissingTransaction) => {
            tracing::warn!(
                "user {} tried to delete missing transaction {transaction_id}",
                session.user_id
            );
            Error::DeleteMissingTransaction.into_alert_response()
        }
        Err(error) => {
            tracing::error!("could not delete transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    };

    ([(HX_TRIGGER, TRANSACTIONS_CHANGED_EVENT)], response).into_response()
}
