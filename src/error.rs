//! Defines the crate level error type.

/// The errors that may occur when validating records or talking to a
/// ledger store.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used to create a category name.
    #[error("an empty string is not a valid category name")]
    EmptyCategoryName,

    /// A transaction was created or updated with an amount of exactly zero.
    #[error("a transaction amount must be non-zero")]
    ZeroAmount,

    /// An update was attempted on a record whose identifier was never set.
    #[error("an identifier is required to update a record")]
    MissingId,

    /// The requested record could not be found.
    #[error("the requested record could not be found")]
    NotFound,

    /// The remote backend processed the request but declined it.
    ///
    /// Carries the message the backend attached to its response.
    #[error("the backend declined the request: {0}")]
    Backend(String),

    /// The remote backend could not be reached or returned an unreadable
    /// response.
    ///
    /// The underlying error is carried as a string.
    #[error("transport error: {0}")]
    Transport(String),
}
