//! The edit transaction page and the endpoint it submits to.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{Form, PrivateCookieJar};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    auth::Session,
    category::{CategoryLabel, get_category_labels},
    endpoints,
    flash::set_flash,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_CONTAINER_STYLE, base,
        dollar_input_styles,
    },
    navigation::NavBar,
    transaction::{
        Transaction, TransactionId, get_transaction,
        form::{TransactionForm, TransactionFormDefaults, transaction_form_fields},
        update_transaction,
    },
};

pub const TRANSACTION_UPDATED_MESSAGE: &str = "Transaction updated successfully";

/// The state needed for the edit transaction page and for updating a transaction.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders the edit page pre-filled with the stored transaction, or the 404
/// page if the user has no transaction with that ID.
pub async fn get_edit_transaction_page(
    session: Session,
    Path(transaction_id): Path<TransactionId>,
    State(state): State<EditTransactionState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transaction =
        get_transaction(session.user_id, transaction_id, &connection).inspect_err(|error| {
            if *error != Error::NotFound {
                tracing::error!("could not get transaction {transaction_id}: {error}");
            }
        })?;

    let categories = get_category_labels(session.user_id, &connection).inspect_err(|error| {
        tracing::error!("Failed to retrieve categories for edit transaction page: {error}")
    })?;

    Ok(edit_transaction_view(&transaction, &categories).into_response())
}

/// A route handler for updating a transaction, redirects to the transactions
/// view on success.
pub async fn update_transaction_endpoint(
    session: Session,
    Path(transaction_id): Path<TransactionId>,
    State(state): State<EditTransactionState>,
    jar: PrivateCookieJar,
    Form(form): Form<TransactionForm>,
) -> Response {
    let new_values = match form.validate() {
        Ok(new_values) => new_values,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match update_transaction(session.user_id, transaction_id, new_values, &connection) {
        Ok(()) => (
            StatusCode::SEE_OTHER,
            HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
            set_flash(jar, TRANSACTION_UPDATED_MESSAGE),
        )
            .into_response(),
        Err(Error::UpdateMissingTransaction) => {
            Error::UpdateMissingTransaction.into_alert_response()
        }
        Err(error) => {
            tracing::error!("could not update transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}

fn edit_transaction_view(transaction: &Transaction, categories: &[CategoryLabel]) -> Markup {
    let edit_url = endpoints::format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id);
    let update_url = endpoints::format_endpoint(endpoints::TRANSACTION, transaction.id);
    let nav_bar = NavBar::new(&edit_url).into_html();

    let defaults = TransactionFormDefaults {
        transaction_type: transaction.type_,
        amount: Some(transaction.amount),
        category: &transaction.category,
        date: transaction.date,
        note: transaction.note.as_deref().unwrap_or_default(),
    };

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "Edit Transaction" }

            form
                hx-put=(update_url)
                hx-target-error="#alert-container"
                hx-sync="this:drop"
                hx-disabled-elt="#submit-button"
                class="w-full space-y-4 md:space-y-6"
            {
                (transaction_form_fields(&defaults, categories))

                button type="submit" id="submit-button" class=(BUTTON_PRIMARY_STYLE)
                {
                    "Update Transaction"
                }

                a href=(endpoints::TRANSACTIONS_VIEW) class=(BUTTON_SECONDARY_STYLE) { "Cancel" }
            }
        }
    };

    base("Edit Transaction", &[dollar_input_styles()], &content)
}
