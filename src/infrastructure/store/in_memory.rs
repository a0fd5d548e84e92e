//! In-memory entry store implementation

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::qa::{Entry, EntryId, EntryStore, NewEntry};
use crate::domain::DomainError;

/// Thread-safe in-memory entry store
///
/// Useful for testing and development. Data is lost when the process terminates.
/// Entries are kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryEntryStore {
    entries: RwLock<Vec<Entry>>,
}

impl InMemoryEntryStore {
    /// Creates a new empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with entries
    pub fn with_entries(entries: Vec<Entry>) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl EntryStore for InMemoryEntryStore {
    async fn list(&self) -> Result<Vec<Entry>, DomainError> {
        let entries = self.entries.read().map_err(|e| {
            DomainError::store_unavailable(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(entries.clone())
    }

    async fn find_by_intent(&self, intent: &str) -> Result<Option<Entry>, DomainError> {
        let entries = self.entries.read().map_err(|e| {
            DomainError::store_unavailable(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(entries.iter().find(|e| e.intent() == Some(intent)).cloned())
    }

    async fn insert(&self, entry: NewEntry) -> Result<Entry, DomainError> {
        let mut entries = self.entries.write().map_err(|e| {
            DomainError::store_unavailable(format!("Failed to acquire write lock: {}", e))
        })?;

        let entry = entry.into_entry(EntryId::generate());
        entries.push(entry.clone());
        Ok(entry)
    }

    async fn insert_batch(&self, batch: Vec<NewEntry>) -> Result<usize, DomainError> {
        let mut entries = self.entries.write().map_err(|e| {
            DomainError::store_unavailable(format!("Failed to acquire write lock: {}", e))
        })?;

        let written = batch.len();
        entries.extend(
            batch
                .into_iter()
                .map(|entry| entry.into_entry(EntryId::generate())),
        );
        Ok(written)
    }

    async fn clear(&self) -> Result<usize, DomainError> {
        let mut entries = self.entries.write().map_err(|e| {
            DomainError::store_unavailable(format!("Failed to acquire write lock: {}", e))
        })?;

        let removed = entries.len();
        entries.clear();
        Ok(removed)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let entries = self.entries.read().map_err(|e| {
            DomainError::store_unavailable(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_entry(intent: Option<&str>, question: &str) -> NewEntry {
        NewEntry::new(intent.map(String::from), question, "answer").unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_unique_ids() {
        let store = InMemoryEntryStore::new();

        let a = store.insert(new_entry(None, "A?")).await.unwrap();
        let b = store.insert(new_entry(None, "B?")).await.unwrap();

        assert_ne!(a.id(), b.id());
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let store = InMemoryEntryStore::new();

        for q in ["first?", "second?", "third?"] {
            store.insert(new_entry(None, q)).await.unwrap();
        }

        let questions: Vec<String> = store
            .list()
            .await
            .unwrap()
            .iter()
            .map(|e| e.question().to_string())
            .collect();
        assert_eq!(questions, vec!["first?", "second?", "third?"]);
    }

    #[tokio::test]
    async fn test_find_by_intent_is_case_sensitive_and_first_wins() {
        let store = InMemoryEntryStore::new();
        store.insert(new_entry(Some("geo"), "first?")).await.unwrap();
        store.insert(new_entry(Some("geo"), "second?")).await.unwrap();

        let found = store.find_by_intent("geo").await.unwrap().unwrap();
        assert_eq!(found.question(), "first?");

        assert!(store.find_by_intent("GEO").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_batch_and_clear() {
        let store = InMemoryEntryStore::new();

        let written = store
            .insert_batch(vec![new_entry(None, "A?"), new_entry(None, "B?")])
            .await
            .unwrap();
        assert_eq!(written, 2);

        let removed = store.clear().await.unwrap();
        assert_eq!(removed, 2);
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
