//! Spendnote tracks monetary transactions (incomes and expenses) grouped
//! into categories, and can list, filter, and total them.
//!
//! This crate is the engine only: it owns the ledger data, the query
//! evaluator, and the totals aggregator. Rendering results and capturing
//! input belong to whatever presentation layer sits on top.
//!
//! Storage is a capability with two variants selected at composition
//! time: an in-memory [Ledger](stores::Ledger) and a remote JSON backend.
//! The [query evaluator](query::filter_transactions) and the
//! [totals aggregator](totals::aggregate) are backend-agnostic and only
//! operate on already-fetched collections.

#![warn(missing_docs)]

mod error;

pub mod date;
pub mod models;
pub mod query;
pub mod stores;
pub mod totals;

pub use error::Error;
pub use models::{
    Category, CategoryId, CategoryName, NewCategory, NewTransaction, Transaction, TransactionId,
    TransactionType,
};
pub use query::{DateRange, TransactionQuery, filter_transactions};
pub use stores::{CategoryStore, TransactionStore};
pub use totals::Totals;
