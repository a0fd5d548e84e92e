//! Application state for shared services

use std::sync::Arc;

use crate::config::Environment;
use crate::infrastructure::cache::EntryCache;
use crate::infrastructure::services::{EntryService, ResolutionService};

/// Deployment facts reported by the status endpoints
#[derive(Debug, Clone)]
pub struct ServiceInfo {
    pub environment: Environment,
    pub project_id: String,
}

/// Application state shared by all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub cache: Arc<EntryCache>,
    pub resolution_service: Arc<ResolutionService>,
    pub entry_service: Arc<EntryService>,
    pub info: Arc<ServiceInfo>,
}

impl AppState {
    pub fn new(
        cache: Arc<EntryCache>,
        resolution_service: Arc<ResolutionService>,
        entry_service: Arc<EntryService>,
        info: ServiceInfo,
    ) -> Self {
        Self {
            cache,
            resolution_service,
            entry_service,
            info: Arc::new(info),
        }
    }

    pub fn classifier_enabled(&self) -> bool {
        self.resolution_service.classifier_enabled()
    }
}
