//! Implements the in-memory ledger store.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::debug;

use crate::{
    Error,
    models::{
        Category, CategoryId, CategoryName, NewCategory, NewTransaction, Transaction,
        TransactionId,
    },
    query::{DateRange, TransactionQuery, filter_transactions},
    stores::{CategoryStore, TransactionStore},
    totals::{self, Totals},
};

/// The category names every fresh ledger starts out with.
const DEFAULT_CATEGORY_NAMES: [&str; 7] = [
    "Food",
    "Transport",
    "Health",
    "Entertainment",
    "Home",
    "Salary",
    "Other",
];

/// The in-memory collections behind the memory-backed stores.
///
/// Construct one at the composition root, wrap it in [SharedLedger], and
/// hand clones of the handle to [MemoryTransactionStore] and
/// [MemoryCategoryStore]. The mutex serializes identifier assignment, so
/// two concurrent inserts never receive the same id.
#[derive(Debug)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
    next_transaction_id: u64,
    next_category_id: u64,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
            categories: Vec::new(),
            next_transaction_id: 1,
            next_category_id: 1,
        }
    }

    /// Create a ledger seeded with the stock category set (Food,
    /// Transport, Health, Entertainment, Home, Salary, Other).
    pub fn with_default_categories() -> Self {
        let mut ledger = Self::new();

        for name in DEFAULT_CATEGORY_NAMES {
            let id = ledger.issue_category_id();
            ledger.categories.push(Category {
                id,
                name: CategoryName::new_unchecked(name),
                color: None,
                icon: None,
            });
        }

        ledger
    }

    /// Wrap this ledger in a handle the store types accept.
    pub fn into_shared(self) -> SharedLedger {
        Arc::new(Mutex::new(self))
    }

    // Identifiers count up for the lifetime of the process and are never
    // reused, deletions included.
    fn issue_transaction_id(&mut self) -> TransactionId {
        let id = self.next_transaction_id;
        self.next_transaction_id += 1;

        id.to_string()
    }

    fn issue_category_id(&mut self) -> CategoryId {
        let id = self.next_category_id;
        self.next_category_id += 1;

        id.to_string()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

/// A shareable handle to an in-memory [Ledger].
pub type SharedLedger = Arc<Mutex<Ledger>>;

/// Stores transactions in a shared in-memory [Ledger].
#[derive(Debug, Clone)]
pub struct MemoryTransactionStore {
    ledger: SharedLedger,
}

impl MemoryTransactionStore {
    /// Create a new store over the shared `ledger`.
    pub fn new(ledger: SharedLedger) -> Self {
        Self { ledger }
    }
}

#[async_trait]
impl TransactionStore for MemoryTransactionStore {
    async fn list(&self, query: Option<&TransactionQuery>) -> Result<Vec<Transaction>, Error> {
        let ledger = self.ledger.lock().unwrap();
        let snapshot = ledger.transactions.clone();

        Ok(match query {
            Some(query) => filter_transactions(snapshot, &ledger.categories, query),
            None => snapshot,
        })
    }

    async fn get(&self, id: &TransactionId) -> Result<Transaction, Error> {
        self.ledger
            .lock()
            .unwrap()
            .transactions
            .iter()
            .find(|transaction| &transaction.id == id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    async fn insert(&self, draft: NewTransaction) -> Result<Transaction, Error> {
        let draft = draft.normalize()?;
        let mut ledger = self.ledger.lock().unwrap();

        let transaction = Transaction {
            id: ledger.issue_transaction_id(),
            amount: draft.amount,
            category: draft.category,
            kind: draft.kind,
            date: draft.date,
            note: draft.note,
            photo_ref: draft.photo_ref,
        };

        // Newest first, so the record shows at the top of listings.
        ledger.transactions.insert(0, transaction.clone());
        debug!(id = %transaction.id, "inserted transaction");

        Ok(transaction)
    }

    async fn update(&self, transaction: Transaction) -> Result<bool, Error> {
        let transaction = transaction.normalize()?;
        let mut ledger = self.ledger.lock().unwrap();

        match ledger
            .transactions
            .iter()
            .position(|stored| stored.id == transaction.id)
        {
            Some(index) => {
                ledger.transactions[index] = transaction;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &TransactionId) -> Result<bool, Error> {
        let mut ledger = self.ledger.lock().unwrap();
        let count_before = ledger.transactions.len();
        ledger.transactions.retain(|transaction| &transaction.id != id);

        Ok(ledger.transactions.len() < count_before)
    }

    async fn totals(&self, range: Option<DateRange>) -> Result<Totals, Error> {
        let query = TransactionQuery {
            date_range: range,
            ..TransactionQuery::default()
        };
        let filtered = self.list(Some(&query)).await?;

        Ok(totals::aggregate(&filtered))
    }
}

/// Stores categories in a shared in-memory [Ledger].
#[derive(Debug, Clone)]
pub struct MemoryCategoryStore {
    ledger: SharedLedger,
}

impl MemoryCategoryStore {
    /// Create a new store over the shared `ledger`.
    pub fn new(ledger: SharedLedger) -> Self {
        Self { ledger }
    }
}

#[async_trait]
impl CategoryStore for MemoryCategoryStore {
    async fn list(&self) -> Result<Vec<Category>, Error> {
        Ok(self.ledger.lock().unwrap().categories.clone())
    }

    async fn get(&self, id: &CategoryId) -> Result<Category, Error> {
        self.ledger
            .lock()
            .unwrap()
            .categories
            .iter()
            .find(|category| &category.id == id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    async fn insert(&self, draft: NewCategory) -> Result<Category, Error> {
        let mut ledger = self.ledger.lock().unwrap();

        let category = Category {
            id: ledger.issue_category_id(),
            name: draft.name,
            color: draft.color,
            icon: draft.icon,
        };

        ledger.categories.push(category.clone());
        debug!(id = %category.id, "inserted category");

        Ok(category)
    }

    async fn update(&self, category: Category) -> Result<bool, Error> {
        if category.id.is_empty() {
            return Err(Error::MissingId);
        }

        let mut ledger = self.ledger.lock().unwrap();

        match ledger
            .categories
            .iter()
            .position(|stored| stored.id == category.id)
        {
            Some(index) => {
                ledger.categories[index] = category;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &CategoryId) -> Result<bool, Error> {
        let mut ledger = self.ledger.lock().unwrap();
        let count_before = ledger.categories.len();
        ledger.categories.retain(|category| &category.id != id);

        Ok(ledger.categories.len() < count_before)
    }
}
