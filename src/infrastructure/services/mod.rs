//! Infrastructure services

mod entry_service;
mod intent_resolver;
mod resolution_service;

pub use entry_service::{AddEntryRequest, CacheStats, EntryService, ImportOptions, ImportReport};
pub use intent_resolver::IntentResolver;
pub use resolution_service::ResolutionService;
