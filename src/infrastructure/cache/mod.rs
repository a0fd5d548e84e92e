//! Cache infrastructure - atomically swapped entry snapshot

mod entry_cache;

pub use entry_cache::{CacheSnapshot, EntryCache};
