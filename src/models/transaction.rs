//! Core transaction domain types and the amount sign convention.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Error, models::CategoryName};

/// Identifier assigned to a transaction by a store.
///
/// The in-memory store issues decimal strings from a monotonic counter;
/// a remote backend issues its own opaque strings. An empty string means
/// the identifier was never set.
pub type TransactionId = String;

/// Whether a transaction records money spent or money earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Money spent. Stored with a negative amount.
    Expense,
    /// Money earned. Stored with a positive amount.
    Income,
}

impl TransactionType {
    /// Force `amount` onto the sign this type of transaction stores:
    /// negative for [TransactionType::Expense], positive for
    /// [TransactionType::Income]. The sign the caller supplied is ignored.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::ZeroAmount] if `amount` is
    /// exactly zero. A zero amount is a validation failure, not something
    /// to normalize away.
    pub fn normalize_amount(self, amount: f64) -> Result<f64, Error> {
        if amount == 0.0 {
            return Err(Error::ZeroAmount);
        }

        match self {
            TransactionType::Expense => Ok(-amount.abs()),
            TransactionType::Income => Ok(amount.abs()),
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Expense => write!(f, "EXPENSE"),
            TransactionType::Income => write!(f, "INCOME"),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or
/// earned.
///
/// Amounts follow one convention everywhere: expenses are stored with a
/// negative amount, incomes with a positive one, regardless of the sign
/// the caller supplied. Stores enforce this on every insert and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The identifier assigned by the store that owns this transaction.
    pub id: TransactionId,
    /// The amount of money spent or earned, signed per the type.
    pub amount: f64,
    /// The name of the category this transaction belongs to.
    pub category: CategoryName,
    /// Whether this is an expense or an income.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// When the transaction happened, as entered. Free-form; see
    /// [crate::date::parse_transaction_date] for the accepted formats.
    pub date: String,
    /// A text note describing the transaction.
    #[serde(default)]
    pub note: String,
    /// Optional opaque reference to an attached photo.
    pub photo_ref: Option<String>,
}

impl Transaction {
    /// Validate this record for an update and force the amount onto the
    /// canonical sign convention.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::MissingId] if the id was never
    /// set, or an [Error::ZeroAmount] if the amount is exactly zero.
    pub fn normalize(mut self) -> Result<Self, Error> {
        if self.id.is_empty() {
            return Err(Error::MissingId);
        }

        self.amount = self.kind.normalize_amount(self.amount)?;

        Ok(self)
    }
}

/// A transaction draft as supplied by a caller. The store assigns the
/// identifier and normalizes the amount sign on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    /// The amount of money spent or earned. Any sign is accepted; the
    /// store forces it onto the canonical convention.
    pub amount: f64,
    /// The name of the category this transaction belongs to.
    pub category: CategoryName,
    /// Whether this is an expense or an income.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// When the transaction happened.
    pub date: String,
    /// A text note describing the transaction.
    #[serde(default)]
    pub note: String,
    /// Optional opaque reference to an attached photo.
    pub photo_ref: Option<String>,
}

impl NewTransaction {
    /// Create a draft with an empty note and no photo.
    pub fn new(amount: f64, category: CategoryName, kind: TransactionType, date: &str) -> Self {
        Self {
            amount,
            category,
            kind,
            date: date.to_string(),
            note: String::new(),
            photo_ref: None,
        }
    }

    /// Set the note for the transaction.
    pub fn note(mut self, note: &str) -> Self {
        self.note = note.to_string();
        self
    }

    /// Set the photo reference for the transaction.
    pub fn photo_ref(mut self, photo_ref: Option<String>) -> Self {
        self.photo_ref = photo_ref;
        self
    }

    /// Force the amount onto the canonical sign convention.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::ZeroAmount] if the amount is
    /// exactly zero.
    pub fn normalize(mut self) -> Result<Self, Error> {
        self.amount = self.kind.normalize_amount(self.amount)?;

        Ok(self)
    }
}
