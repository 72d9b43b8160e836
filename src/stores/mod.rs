//! Contains traits and implementations for objects that store the domain
//! [models](crate::models).

mod category;
mod memory;
mod remote;
mod transaction;

pub use category::CategoryStore;
pub use memory::{Ledger, MemoryCategoryStore, MemoryTransactionStore, SharedLedger};
pub use remote::{ApiClient, RemoteCategoryStore, RemoteConfig, RemoteTransactionStore};
pub use transaction::TransactionStore;
