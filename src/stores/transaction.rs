//! Defines the transaction store trait.

use async_trait::async_trait;

use crate::{
    Error,
    models::{NewTransaction, Transaction, TransactionId},
    query::{DateRange, TransactionQuery},
    totals::Totals,
};

/// Handles the storage, retrieval, and summarising of transactions.
///
/// Both store variants implement this trait: the in-memory variant
/// completes each operation synchronously, while the remote variant
/// suspends until the backend responds. Operations carry no ordering
/// guarantee relative to one another unless the caller sequences the
/// awaits itself; a `list` raced against an `insert` may or may not
/// reflect it.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Return a snapshot of the stored transactions in store order (most
    /// recent first), filtered by `query` when one is given.
    async fn list(&self, query: Option<&TransactionQuery>) -> Result<Vec<Transaction>, Error>;

    /// Retrieve a transaction by its id.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `id` does not refer to a stored
    /// transaction.
    async fn get(&self, id: &TransactionId) -> Result<Transaction, Error>;

    /// Store a new transaction and return it with its assigned id.
    ///
    /// The amount sign is normalized before the draft reaches the store.
    ///
    /// # Errors
    /// Returns [Error::ZeroAmount] if the draft's amount is exactly zero.
    async fn insert(&self, draft: NewTransaction) -> Result<Transaction, Error>;

    /// Replace the stored transaction carrying the same id as
    /// `transaction`.
    ///
    /// Returns whether the id referred to a stored transaction. When it
    /// did not, the store is left unchanged; callers must check the
    /// result rather than assume the write took effect.
    ///
    /// # Errors
    /// Returns [Error::MissingId] if the id was never set, or
    /// [Error::ZeroAmount] if the amount is exactly zero.
    async fn update(&self, transaction: Transaction) -> Result<bool, Error>;

    /// Remove a transaction by its id, reporting whether it was present.
    ///
    /// Deleting an unknown id is not an error; it returns `Ok(false)`.
    async fn delete(&self, id: &TransactionId) -> Result<bool, Error>;

    /// Compute income, expense, and balance over the stored transactions,
    /// optionally limited to a date range.
    async fn totals(&self, range: Option<DateRange>) -> Result<Totals, Error>;
}
