//! Core category domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Identifier assigned to a category by a store.
///
/// The in-memory store issues decimal strings from a monotonic counter;
/// a remote backend issues its own opaque strings. An empty string means
/// the identifier was never set.
pub type CategoryId = String;

/// A validated, non-empty category name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// Leading and trailing whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyCategoryName] if `name` is
    /// empty or contains only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty. Intended for
    /// values read back from a store, which were validated on the way in.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryName::new(s)
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A category for expenses and income, e.g. 'Food', 'Transport', 'Salary'.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Category {
    /// The identifier assigned by the store that owns this category.
    pub id: CategoryId,
    /// The display name of the category.
    pub name: CategoryName,
    /// Optional packed ARGB display colour.
    pub color: Option<i32>,
    /// Optional icon reference understood by the presentation layer.
    pub icon: Option<String>,
}

/// A category draft as supplied by a caller. The store assigns the
/// identifier on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    /// The display name for the new category.
    pub name: CategoryName,
    /// Optional packed ARGB display colour.
    pub color: Option<i32>,
    /// Optional icon reference understood by the presentation layer.
    pub icon: Option<String>,
}

impl NewCategory {
    /// Create a draft with just a name.
    pub fn named(name: CategoryName) -> Self {
        Self {
            name,
            color: None,
            icon: None,
        }
    }
}
