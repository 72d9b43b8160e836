//! Balance summaries over a set of transactions.

use serde::{Deserialize, Serialize};

use crate::models::{Transaction, TransactionType};

/// The income, expense, and net balance of a set of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of income magnitudes. Never negative.
    pub income: f64,
    /// Sum of expense magnitudes. Never negative.
    pub expense: f64,
    /// `income - expense`.
    pub balance: f64,
}

/// Sum a set of transactions into income, expense, and balance.
///
/// Magnitudes are summed with the sign stripped, so the result does not
/// depend on the amount sign convention of whoever produced the records.
/// Callers that want totals for a period filter the collection by date
/// range first.
pub fn aggregate(transactions: &[Transaction]) -> Totals {
    let mut income = 0.0;
    let mut expense = 0.0;

    for transaction in transactions {
        match transaction.kind {
            TransactionType::Income => income += transaction.amount.abs(),
            TransactionType::Expense => expense += transaction.amount.abs(),
        }
    }

    Totals {
        income,
        expense,
        balance: income - expense,
    }
}
