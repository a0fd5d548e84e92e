//! PostgreSQL entry store with connection pooling

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;
use tracing::warn;

use crate::domain::qa::{Entry, EntryDocument, EntryId, EntryStore, NewEntry};
use crate::domain::DomainError;

/// PostgreSQL store configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Table holding the entry documents
    pub table: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            table: "qa_pairs".to_string(),
            max_connections: 10,
            connect_timeout_secs: 30,
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }
}

/// Entry store backed by a PostgreSQL table
///
/// Each row keeps the persisted document `{intent?, question, answer, createdAt}`
/// as JSONB under a store-assigned id. A `seq` column preserves insertion order.
pub struct PostgresEntryStore {
    pool: PgPool,
    table: String,
}

impl std::fmt::Debug for PostgresEntryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresEntryStore")
            .field("table", &self.table)
            .finish()
    }
}

impl PostgresEntryStore {
    pub fn new(pool: PgPool, table: impl Into<String>) -> Self {
        Self {
            pool,
            table: table.into(),
        }
    }

    /// Connects a pool and ensures the entry table exists
    pub async fn connect(config: &PostgresConfig) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(std::time::Duration::from_secs(config.connect_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(|e| {
                DomainError::store_unavailable(format!("Failed to connect to PostgreSQL: {}", e))
            })?;

        let store = Self::new(pool, config.table.clone());
        store.ensure_table().await?;
        Ok(store)
    }

    /// Ensures the entry table exists
    pub async fn ensure_table(&self) -> Result<(), DomainError> {
        let query = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                seq BIGSERIAL,
                id VARCHAR(64) PRIMARY KEY,
                data JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            self.table
        );

        sqlx::query(&query)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::store_unavailable(format!("Failed to create table: {}", e)))?;

        Ok(())
    }

    fn row_to_entry(row: &sqlx::postgres::PgRow) -> Result<Entry, DomainError> {
        decode_entry(row.get("id"), row.get("data"))
    }

    fn document_json(document: &EntryDocument) -> Result<serde_json::Value, DomainError> {
        serde_json::to_value(document)
            .map_err(|e| DomainError::internal(format!("Failed to serialize entry: {}", e)))
    }
}

fn decode_entry(id: String, data: serde_json::Value) -> Result<Entry, DomainError> {
    let document: EntryDocument = serde_json::from_value(data).map_err(|e| {
        DomainError::store_unavailable(format!("Failed to deserialize entry '{}': {}", id, e))
    })?;

    Ok(Entry::from_document(EntryId::new(id), document))
}

/// Decodes listed rows, skipping any whose document is malformed
fn decode_entries(rows: impl IntoIterator<Item = (String, serde_json::Value)>) -> Vec<Entry> {
    rows.into_iter()
        .filter_map(|(id, data)| match decode_entry(id, data) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "Skipping undecodable entry row");
                None
            }
        })
        .collect()
}

#[async_trait]
impl EntryStore for PostgresEntryStore {
    async fn list(&self) -> Result<Vec<Entry>, DomainError> {
        let query = format!("SELECT id, data FROM {} ORDER BY seq", self.table);

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::store_unavailable(format!("Failed to list entries: {}", e)))?;

        Ok(decode_entries(rows.iter().map(|row| {
            let id: String = row.get("id");
            let data: serde_json::Value = row.get("data");
            (id, data)
        })))
    }

    async fn find_by_intent(&self, intent: &str) -> Result<Option<Entry>, DomainError> {
        let query = format!(
            "SELECT id, data FROM {} WHERE data->>'intent' = $1 ORDER BY seq LIMIT 1",
            self.table
        );

        let row = sqlx::query(&query)
            .bind(intent)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::store_unavailable(format!("Failed to query by intent: {}", e))
            })?;

        row.as_ref().map(Self::row_to_entry).transpose()
    }

    async fn insert(&self, entry: NewEntry) -> Result<Entry, DomainError> {
        let id = EntryId::generate();
        let entry = entry.into_entry(id);
        let data = Self::document_json(&entry.to_document())?;

        let query = format!(
            "INSERT INTO {} (id, data, created_at) VALUES ($1, $2, $3)",
            self.table
        );

        sqlx::query(&query)
            .bind(entry.id().as_str())
            .bind(&data)
            .bind(entry.created_at())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::store_unavailable(format!("Failed to insert entry: {}", e)))?;

        Ok(entry)
    }

    async fn insert_batch(&self, entries: Vec<NewEntry>) -> Result<usize, DomainError> {
        let query = format!(
            "INSERT INTO {} (id, data, created_at) VALUES ($1, $2, $3)",
            self.table
        );

        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::store_unavailable(format!("Failed to begin transaction: {}", e))
        })?;

        let written = entries.len();

        for entry in entries {
            let entry = entry.into_entry(EntryId::generate());
            let data = Self::document_json(&entry.to_document())?;

            sqlx::query(&query)
                .bind(entry.id().as_str())
                .bind(&data)
                .bind(entry.created_at())
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    DomainError::store_unavailable(format!("Failed to insert entry: {}", e))
                })?;
        }

        tx.commit().await.map_err(|e| {
            DomainError::store_unavailable(format!("Failed to commit batch: {}", e))
        })?;

        Ok(written)
    }

    async fn clear(&self) -> Result<usize, DomainError> {
        let query = format!("DELETE FROM {}", self.table);

        let result = sqlx::query(&query)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::store_unavailable(format!("Failed to clear entries: {}", e)))?;

        Ok(result.rows_affected() as usize)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let query = format!("SELECT COUNT(*) as count FROM {}", self.table);

        let row = sqlx::query(&query)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::store_unavailable(format!("Failed to count entries: {}", e)))?;

        let count: i64 = row.get("count");
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_config_builder() {
        let config = PostgresConfig::new("postgres://localhost/knowledge")
            .with_table("trivia")
            .with_max_connections(4);

        assert_eq!(config.url, "postgres://localhost/knowledge");
        assert_eq!(config.table, "trivia");
        assert_eq!(config.max_connections, 4);
        assert_eq!(config.connect_timeout_secs, 30);
    }

    #[test]
    fn test_malformed_rows_are_skipped_when_listing() {
        let rows = vec![
            (
                "a".to_string(),
                serde_json::json!({"intent": "capital_france", "question": "Capital of France?", "answer": "Paris"}),
            ),
            ("b".to_string(), serde_json::json!({"question": 42})),
            (
                "c".to_string(),
                serde_json::json!({"question": "Largest ocean?", "answer": "Pacific"}),
            ),
        ];

        let entries = decode_entries(rows);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id().as_str(), "a");
        assert_eq!(entries[0].intent(), Some("capital_france"));
        assert_eq!(entries[1].answer(), "Pacific");
    }

    #[test]
    fn test_decode_entry_reports_bad_document() {
        let result = decode_entry("x".to_string(), serde_json::json!("not an object"));
        assert!(matches!(result, Err(DomainError::StoreUnavailable { .. })));
    }

    #[test]
    fn test_default_table_name() {
        assert_eq!(PostgresConfig::new("postgres://x").table, "qa_pairs");
    }
}
