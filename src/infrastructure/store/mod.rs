//! Entry store infrastructure - durable store implementations and dataset files

pub mod dataset;
mod factory;
mod in_memory;
mod postgres;

pub use factory::{StoreType, create_entry_store};
pub use in_memory::InMemoryEntryStore;
pub use postgres::{PostgresConfig, PostgresEntryStore};
