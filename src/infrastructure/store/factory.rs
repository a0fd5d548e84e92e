//! Store factory for runtime backend selection

use std::sync::Arc;

use tracing::info;

use crate::config::StorageConfig;
use crate::domain::qa::EntryStore;
use crate::domain::DomainError;

use super::in_memory::InMemoryEntryStore;
use super::postgres::{PostgresConfig, PostgresEntryStore};

/// Supported store backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreType {
    /// In-memory store (for testing/development)
    InMemory,
    /// PostgreSQL store
    Postgres,
}

impl StoreType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InMemory => "memory",
            Self::Postgres => "postgres",
        }
    }
}

/// Creates the entry store described by the storage configuration
pub async fn create_entry_store(
    config: &StorageConfig,
) -> Result<Arc<dyn EntryStore>, DomainError> {
    let store_type = StoreType::from_str(&config.backend).ok_or_else(|| {
        DomainError::configuration(format!("Unknown storage backend '{}'", config.backend))
    })?;

    match store_type {
        StoreType::InMemory => {
            info!("Using in-memory entry store");
            Ok(Arc::new(InMemoryEntryStore::new()))
        }
        StoreType::Postgres => {
            let url = config.database_url.as_deref().ok_or_else(|| {
                DomainError::configuration("storage.database_url is required for postgres")
            })?;

            info!(table = %config.table, "Connecting to PostgreSQL entry store");
            let pg_config = PostgresConfig::new(url)
                .with_table(config.table.clone())
                .with_max_connections(config.max_connections);

            Ok(Arc::new(PostgresEntryStore::connect(&pg_config).await?))
        }
    }
}
