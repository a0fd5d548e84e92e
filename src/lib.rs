//! Knowledge Chat
//!
//! Answers free-text questions from a curated question/answer collection:
//! - Durable entry store (in-memory or Postgres) behind an atomically swapped cache
//! - Optional external intent classifier with keyword-overlap fallback
//! - HTTP API for chat, sampling, statistics and admin mutations

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use api::state::{AppState, ServiceInfo};
use domain::{DomainError, EntryStore, IntentClassifier};
use infrastructure::{
    cache::EntryCache,
    classifier::create_classifier,
    services::{EntryService, ImportOptions, IntentResolver, ResolutionService},
    store::{StoreType, create_entry_store, dataset},
};

/// Builds application state from configuration.
///
/// An in-memory store is seeded from `storage.seed_file`, or from the bundled
/// sample dataset when none is set. The cache starts empty; callers decide
/// when to run the initial load.
pub async fn create_app_state(config: &AppConfig) -> Result<AppState, DomainError> {
    let store = create_entry_store(&config.storage).await?;
    let classifier = create_classifier(config)?;
    let state = create_app_state_with(store, classifier, config);

    if StoreType::from_str(&config.storage.backend) == Some(StoreType::InMemory) {
        seed_memory_store(&state, config.storage.seed_file.as_deref()).await?;
    }

    Ok(state)
}

async fn seed_memory_store(state: &AppState, seed_file: Option<&str>) -> Result<(), DomainError> {
    let records = match seed_file {
        Some(path) => dataset::read_dataset(Path::new(path))?,
        None => dataset::bundled_sample()?,
    };

    let report = state
        .entry_service
        .import(
            records,
            &ImportOptions {
                clear_existing: false,
                ..ImportOptions::default()
            },
        )
        .await?;

    info!(
        source = seed_file.unwrap_or("bundled sample"),
        entries = report.inserted,
        "Seeded in-memory store"
    );

    Ok(())
}

/// Wires services over an explicit store and classifier
pub fn create_app_state_with(
    store: Arc<dyn EntryStore>,
    classifier: Option<Arc<dyn IntentClassifier>>,
    config: &AppConfig,
) -> AppState {
    let cache = Arc::new(EntryCache::new(store.clone()));
    let resolver = IntentResolver::new(store.clone(), cache.clone());
    let resolution_service = Arc::new(ResolutionService::new(
        cache.clone(),
        resolver,
        classifier,
    ));
    let entry_service = Arc::new(EntryService::new(store, cache.clone()));

    AppState::new(
        cache,
        resolution_service,
        entry_service,
        ServiceInfo {
            environment: config.environment,
            project_id: config.project_id().to_string(),
        },
    )
}
