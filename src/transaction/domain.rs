//! Core transaction domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

/// Database identifier for a transaction.
pub type TransactionId = i64;

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money earned.
    Income,
    /// Money spent.
    #[default]
    Expense,
}

impl TransactionType {
    /// The lowercase name used in forms, query strings and the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(Error::InvalidTransactionType(other.to_owned())),
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An income or expense recorded by a user.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// Always a finite number greater than zero, the type gives the direction.
    pub amount: f64,
    /// Whether the money was earned or spent.
    pub type_: TransactionType,
    /// The name of the category at the time the transaction was saved.
    pub category: String,
    /// When the transaction happened.
    pub date: Date,
    /// Free text, `None` rather than an empty string.
    pub note: Option<String>,
}

/// The fields of a transaction that has not been saved yet, or the new
/// values for an existing one.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct NewTransaction {
    pub amount: f64,
    pub type_: TransactionType,
    pub category: String,
    pub date: Date,
    pub note: Option<String>,
}

/// Parse a user supplied amount.
///
/// # Errors
///
/// Returns [Error::InvalidAmount] unless `text` is a finite number greater than zero.
pub fn parse_amount(text: &str) -> Result<f64, Error> {
    match text.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(Error::InvalidAmount),
    }
}

/// Treat a blank note as no note.
pub fn normalize_note(note: &str) -> Option<String> {
    let note = note.trim();

    if note.is_empty() {
        None
    } else {
        Some(note.to_owned())
    }
}


#[cfg(test)]
mod parse_amount_tests {
    use crate::{Error, transaction::domain::parse_amount};

    #[test]
    fn rejects_non_positive_and_non_numbers() {
        for text in ["0", "-5", "abc", "", "NaN", "inf", "-0.01", "   "] {
            assert_eq!(
                parse_amount(text),
                Err(Error::InvalidAmount),
                "want {text:?} to be rejected"
            );
        }
    }

    #[test]
    fn accepts_positive_numbers() {
        assert_eq!(parse_amount("0.01"), Ok(0.01));
        assert_eq!(parse_amount("100"), Ok(100.0));
        assert_eq!(parse_amount(" 12.50 "), Ok(12.5));
    }
}
