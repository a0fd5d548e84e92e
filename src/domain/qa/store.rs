//! Durable entry store trait

use async_trait::async_trait;

use super::{Entry, NewEntry};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Durable source of truth for Q&A entries.
///
/// Implementations map every backend failure to [`DomainError::StoreUnavailable`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EntryStore: Send + Sync + std::fmt::Debug {
    /// Lists every entry in insertion order
    async fn list(&self) -> Result<Vec<Entry>, DomainError>;

    /// Finds the first entry whose intent equals `intent` exactly
    async fn find_by_intent(&self, intent: &str) -> Result<Option<Entry>, DomainError>;

    /// Persists a new entry, assigning its id
    async fn insert(&self, entry: NewEntry) -> Result<Entry, DomainError>;

    /// Persists a batch of entries, returns how many were written
    async fn insert_batch(&self, entries: Vec<NewEntry>) -> Result<usize, DomainError>;

    /// Removes every entry, returns how many were removed
    async fn clear(&self) -> Result<usize, DomainError>;

    /// Returns the number of stored entries
    async fn count(&self) -> Result<usize, DomainError>;
}
