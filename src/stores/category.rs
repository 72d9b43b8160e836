//! Defines the category store trait.

use async_trait::async_trait;

use crate::{
    Error,
    models::{Category, CategoryId, NewCategory},
};

/// Handles the storage and retrieval of transaction categories.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Return a snapshot of all stored categories in store order.
    async fn list(&self) -> Result<Vec<Category>, Error>;

    /// Retrieve a category by its id.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `id` does not refer to a stored
    /// category.
    async fn get(&self, id: &CategoryId) -> Result<Category, Error>;

    /// Store a new category and return it with its assigned id.
    async fn insert(&self, draft: NewCategory) -> Result<Category, Error>;

    /// Replace the stored category carrying the same id as `category`.
    ///
    /// Returns whether the id referred to a stored category; when it did
    /// not, the store is left unchanged.
    ///
    /// # Errors
    /// Returns [Error::MissingId] if the id was never set.
    async fn update(&self, category: Category) -> Result<bool, Error>;

    /// Remove a category by its id, reporting whether it was present.
    ///
    /// Deleting an unknown id is not an error; it returns `Ok(false)`.
    /// Transactions referencing the category keep their category name.
    async fn delete(&self, id: &CategoryId) -> Result<bool, Error>;
}
