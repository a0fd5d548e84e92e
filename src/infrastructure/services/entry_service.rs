//! Entry service - admin mutations and bulk import

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::matching::random_questions;
use crate::domain::qa::{EntryDocument, EntryId, EntryStore, NewEntry};
use crate::domain::DomainError;
use crate::infrastructure::cache::EntryCache;

/// Request to add a single entry
#[derive(Debug, Clone, Default)]
pub struct AddEntryRequest {
    pub intent: Option<String>,
    pub question: String,
    pub answer: String,
}

/// Options for a bulk import
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Remove every stored entry before importing
    pub clear_existing: bool,
    pub batch_size: usize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            clear_existing: true,
            batch_size: 500,
        }
    }
}

/// Outcome of a bulk import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub cleared: usize,
    pub inserted: usize,
    pub skipped: usize,
    /// Entry count reported by the store after the import
    pub stored: usize,
}

/// Point-in-time cache statistics
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub total_questions: usize,
    pub is_loaded: bool,
    pub generation: u64,
    pub loaded_at: Option<DateTime<Utc>>,
}

/// Write-side operations over the store, keeping the cache in step
pub struct EntryService {
    store: Arc<dyn EntryStore>,
    cache: Arc<EntryCache>,
}

impl std::fmt::Debug for EntryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryService").finish()
    }
}

impl EntryService {
    pub fn new(store: Arc<dyn EntryStore>, cache: Arc<EntryCache>) -> Self {
        Self { store, cache }
    }

    /// Persists a new entry and reloads the cache before returning.
    ///
    /// A missing intent is replaced by a time-derived placeholder.
    pub async fn add_entry(&self, request: AddEntryRequest) -> Result<EntryId, DomainError> {
        let entry = NewEntry::new(request.intent, request.question, request.answer)?
            .with_placeholder_intent();

        let stored = self.store.insert(entry).await?;
        info!(id = %stored.id(), intent = ?stored.intent(), "Added Q&A entry");

        self.cache.load().await?;

        Ok(stored.id().clone())
    }

    /// Reloads the cache from the store
    pub async fn reload(&self) -> Result<usize, DomainError> {
        self.cache.load().await
    }

    pub fn stats(&self) -> CacheStats {
        let snapshot = self.cache.snapshot();

        CacheStats {
            total_questions: snapshot.len(),
            is_loaded: snapshot.is_loaded(),
            generation: snapshot.generation(),
            loaded_at: snapshot.loaded_at(),
        }
    }

    /// Up to `count` distinct questions drawn at random from the cache
    pub fn sample_questions(&self, count: usize) -> Vec<String> {
        let snapshot = self.cache.snapshot();
        random_questions(snapshot.entries(), count, &mut rand::thread_rng())
    }

    /// Writes dataset records to the store in batches.
    ///
    /// Records with an empty question or answer are skipped with a warning.
    /// The cache is not touched; a running server picks the data up on reload.
    pub async fn import(
        &self,
        records: Vec<EntryDocument>,
        options: &ImportOptions,
    ) -> Result<ImportReport, DomainError> {
        let mut report = ImportReport::default();

        if options.clear_existing {
            report.cleared = self.store.clear().await?;
            info!(removed = report.cleared, "Cleared existing entries");
        }

        let record_count = records.len();
        let entries: Vec<NewEntry> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match NewEntry::from_document(record) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(index, error = %e, "Skipping invalid record");
                    None
                }
            })
            .collect();

        let total = entries.len();
        report.skipped = record_count - total;
        let batch_size = options.batch_size.max(1);
        let started = Instant::now();

        let mut pending = entries.into_iter().peekable();
        while pending.peek().is_some() {
            let batch: Vec<NewEntry> = pending.by_ref().take(batch_size).collect();
            report.inserted += self.store.insert_batch(batch).await?;

            let elapsed = started.elapsed().as_secs_f64();
            let rate = if elapsed > 0.0 {
                report.inserted as f64 / elapsed
            } else {
                report.inserted as f64
            };

            info!(
                inserted = report.inserted,
                total,
                percent = format!("{:.1}", report.inserted as f64 * 100.0 / total as f64),
                rate = format!("{:.0}/s", rate),
                "Import progress"
            );
        }

        report.stored = self.store.count().await?;

        info!(
            inserted = report.inserted,
            skipped = report.skipped,
            stored = report.stored,
            elapsed_secs = started.elapsed().as_secs_f64(),
            "Import complete"
        );

        Ok(report)
    }
}
