//! Q&A domain - entries and the durable store contract

mod entry;
mod store;

pub use entry::{Entry, EntryDocument, EntryId, NewEntry};
pub use store::EntryStore;

#[cfg(test)]
pub use store::MockEntryStore;
