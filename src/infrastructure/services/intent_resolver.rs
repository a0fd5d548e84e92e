//! Intent resolver - turns a classifier label into an entry lookup

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::intent::{IntentMatch, IntentSource};
use crate::domain::qa::EntryStore;
use crate::infrastructure::cache::EntryCache;

/// Resolves intent labels against the durable store, then the cache
#[derive(Debug, Clone)]
pub struct IntentResolver {
    store: Arc<dyn EntryStore>,
    cache: Arc<EntryCache>,
}

impl IntentResolver {
    pub fn new(store: Arc<dyn EntryStore>, cache: Arc<EntryCache>) -> Self {
        Self { store, cache }
    }

    /// Looks up the entry tagged with `intent`.
    ///
    /// The store is queried first with an exact match. When it has nothing, or
    /// the query fails, the current cache snapshot is scanned ignoring case.
    pub async fn resolve_by_intent(&self, intent: &str) -> Option<IntentMatch> {
        match self.store.find_by_intent(intent).await {
            Ok(Some(entry)) => {
                debug!(intent, "Intent resolved from store");
                return Some(IntentMatch {
                    answer: entry.answer().to_string(),
                    question: entry.question().to_string(),
                    source: IntentSource::Store,
                });
            }
            Ok(None) => {}
            Err(e) => {
                warn!(intent, error = %e, "Store intent lookup failed, scanning cache");
            }
        }

        let snapshot = self.cache.snapshot();
        let entry = snapshot.find_by_intent_ignore_case(intent)?;

        debug!(intent, "Intent resolved from cache");
        Some(IntentMatch {
            answer: entry.answer().to_string(),
            question: entry.question().to_string(),
            source: IntentSource::Cache,
        })
    }
}
