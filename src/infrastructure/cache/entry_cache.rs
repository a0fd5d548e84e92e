//! In-memory entry cache
//!
//! Holds a complete, read-only snapshot of every admissible entry in the store.
//! A reload builds a new snapshot off to the side and publishes it with a
//! single pointer swap, so readers see either the previous or the new snapshot
//! and never a mixture. Reloads are serialized; the last one to finish wins.

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::domain::qa::{Entry, EntryStore};
use crate::domain::DomainError;
use crate::infrastructure::observability::record_cache_reload;

/// One load generation of the cache
#[derive(Debug, Default)]
pub struct CacheSnapshot {
    entries: Vec<Entry>,
    loaded: bool,
    generation: u64,
    loaded_at: Option<DateTime<Utc>>,
}

impl CacheSnapshot {
    /// Entries in store insertion order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of successful loads that produced this snapshot
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    /// First entry whose intent matches case-insensitively
    pub fn find_by_intent_ignore_case(&self, intent: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.has_intent_ignore_case(intent))
    }
}

/// Read-through snapshot of the durable entry store
pub struct EntryCache {
    store: Arc<dyn EntryStore>,
    current: RwLock<Arc<CacheSnapshot>>,
    reload_lock: Mutex<()>,
}

impl std::fmt::Debug for EntryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("EntryCache")
            .field("loaded", &snapshot.is_loaded())
            .field("size", &snapshot.len())
            .field("generation", &snapshot.generation())
            .finish()
    }
}

impl EntryCache {
    /// Creates an empty, not-yet-loaded cache over `store`
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self {
            store,
            current: RwLock::new(Arc::new(CacheSnapshot::default())),
            reload_lock: Mutex::new(()),
        }
    }

    /// Fetches every entry from the store and atomically replaces the snapshot.
    ///
    /// On failure the previous snapshot is left untouched and the store error
    /// is returned.
    pub async fn load(&self) -> Result<usize, DomainError> {
        let _guard = self.reload_lock.lock().await;

        info!("Loading Q&A entries from store");

        let fetched = match self.store.list().await {
            Ok(entries) => entries,
            Err(e) => {
                error!(error = %e, "Failed to load Q&A entries");
                record_cache_reload(false, self.size());
                return Err(e);
            }
        };

        let fetched_count = fetched.len();
        let entries = admit(fetched);

        if entries.len() != fetched_count {
            warn!(
                skipped = fetched_count - entries.len(),
                "Skipped entries with empty question/answer or duplicate id"
            );
        }

        let count = entries.len();
        let generation = self.snapshot().generation() + 1;

        self.publish(CacheSnapshot {
            entries,
            loaded: true,
            generation,
            loaded_at: Some(Utc::now()),
        });

        info!(count, generation, "Loaded Q&A entries into cache");
        record_cache_reload(true, count);

        Ok(count)
    }

    /// Returns the current snapshot
    pub fn snapshot(&self) -> Arc<CacheSnapshot> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot().is_loaded()
    }

    pub fn size(&self) -> usize {
        self.snapshot().len()
    }

    fn publish(&self, snapshot: CacheSnapshot) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Arc::new(snapshot);
    }
}

/// Drops inadmissible entries and repeated ids, keeping first occurrences
fn admit(entries: Vec<Entry>) -> Vec<Entry> {
    let mut seen = HashSet::with_capacity(entries.len());

    entries
        .into_iter()
        .filter(|e| e.is_admissible())
        .filter(|e| seen.insert(e.id().clone()))
        .collect()
}
