//! Transactions: dated income and expense records filed under a category.
//!
//! This module contains:
//! - the `Transaction` model and validation of submitted amounts,
//! - database functions for storing, querying, updating and deleting transactions,
//! - the filters for the transaction list,
//! - the handlers for the transaction pages and endpoints.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod filter;
mod form;
mod list;

pub use create::{create_transaction_endpoint, get_new_transaction_page};
pub use db::{
    create_transaction, create_transaction_table, delete_transaction, get_all_transactions,
    get_transaction, update_transaction,
};
pub use delete::delete_transaction_endpoint;
pub use domain::{NewTransaction, Transaction, TransactionId, TransactionType};
pub use edit::{get_edit_transaction_page, update_transaction_endpoint};
pub use list::get_transactions_page;
