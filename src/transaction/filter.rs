//! Narrowing the transaction list by category, type and date range.

use serde::{Deserialize, Serialize};

use crate::transaction::Transaction;

/// The filters for the transaction list, read from the list page's query string.
///
/// An empty field places no constraint on the list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub category: String,
    #[serde(default, rename = "type")]
    pub type_: String,
    /// An ISO date, e.g. "2024-02-01". Inclusive.
    #[serde(default)]
    pub start_date: String,
    /// An ISO date. Inclusive.
    #[serde(default)]
    pub end_date: String,
}

impl FilterState {
    /// Whether no filter is set.
    pub fn is_empty(&self) -> bool {
        self.category.is_empty()
            && self.type_.is_empty()
            && self.start_date.is_empty()
            && self.end_date.is_empty()
    }

    /// Encode the non-empty filters as a query string without the leading '?'.
    pub fn to_query_string(&self) -> String {
        let pairs = [
            ("category", &self.category),
            ("type", &self.type_),
            ("start_date", &self.start_date),
            ("end_date", &self.end_date),
        ];
        let non_empty = pairs
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .collect::<Vec<_>>();

        serde_urlencoded::to_string(non_empty).unwrap_or_else(|error| {
            tracing::warn!("could not encode filters {self:?}: {error}");
            String::new()
        })
    }
}

/// Keep the transactions that satisfy every non-empty filter, in their original order.
///
/// Dates are compared as ISO strings, so a malformed bound is compared
/// lexicographically rather than rejected.
pub fn apply_filters(transactions: Vec<Transaction>, filters: &FilterState) -> Vec<Transaction> {
    transactions
        .into_iter()
        .filter(|transaction| {
            filters.category.is_empty() || transaction.category == filters.category
        })
        .filter(|transaction| {
            filters.type_.is_empty() || transaction.type_.as_str() == filters.type_
        })
        .filter(|transaction| {
            filters.start_date.is_empty() || transaction.date.to_string() >= filters.start_date
        })
        .filter(|transaction| {
            filters.end_date.is_empty() || transaction.date.to_string() <= filters.end_date
        })
        .collect()
}

#[cfg(test)]
mod apply_filters_tests {
    use time::macros::date;

    use crate::transaction::{
        Transaction, TransactionType,
        filter::{FilterState, apply_filters},
    };

    fn scenario() -> Vec<Transaction> {
        vec![
            Transaction {
                id: 2,
                amount: 2000.0,
                type_: TransactionType::Income,
                category: "Salary".to_owned(),
                date: date!(2024 - 02 - 10),
                note: None,
            },
            Transaction {
                id: 1,
                amount: 12.5,
                type_: TransactionType::Expense,
                category: "Food".to_owned(),
                date: date!(2024 - 01 - 05),
                note: Some("lunch".to_owned()),
            },
        ]
    }

    fn ids(transactions: &[Transaction]) -> Vec<i64> {
        transactions.iter().map(|t| t.id).collect()
    }

    #[test]
    fn empty_filters_keep_everything_in_order() {
        let got = apply_filters(scenario(), &FilterState::default());

        assert_eq!(got, scenario());
    }

    #[test]
    fn start_date_keeps_later_transactions() {
        let filters = FilterState {
            start_date: "2024-02-01".to_owned(),
            ..Default::default()
        };

        assert_eq!(ids(&apply_filters(scenario(), &filters)), vec![2]);
    }

    #[test]
    fn type_keeps_matching_transactions() {
        let filters = FilterState {
            type_: "expense".to_owned(),
            ..Default::default()
        };

        assert_eq!(ids(&apply_filters(scenario(), &filters)), vec![1]);
    }

    #[test]
    fn filters_combine_with_and() {
        let filters = FilterState {
            type_: "expense".to_owned(),
            start_date: "2024-02-01".to_owned(),
            ..Default::default()
        };

        assert!(apply_filters(scenario(), &filters).is_empty());
    }

    #[test]
    fn category_must_match_exactly() {
        let filters = FilterState {
            category: "food".to_owned(),
            ..Default::default()
        };
        assert!(apply_filters(scenario(), &filters).is_empty());

        let filters = FilterState {
            category: "Food".to_owned(),
            ..Default::default()
        };
        assert_eq!(ids(&apply_filters(scenario(), &filters)), vec![1]);
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let filters = FilterState {
            start_date: "2024-01-05".to_owned(),
            end_date: "2024-01-05".to_owned(),
            ..Default::default()
        };

        assert_eq!(ids(&apply_filters(scenario(), &filters)), vec![1]);
    }

    #[test]
    fn kept_rows_match_and_dropped_rows_do_not() {
        let filters = FilterState {
            end_date: "2024-01-31".to_owned(),
            ..Default::default()
        };
        let all = scenario();

        let kept = apply_filters(all.clone(), &filters);

        for transaction in &all {
            let matches = transaction.date.to_string() <= filters.end_date;
            assert_eq!(kept.contains(transaction), matches, "{transaction:?}");
        }
    }
}
