//! Service status and health endpoints

use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::state::AppState;
use crate::api::types::Json;
use crate::config::Environment;

const SERVICE_NAME: &str = "Knowledge Chat";

/// `GET /` body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub environment: Environment,
    pub classifier_enabled: bool,
    pub data_loaded: bool,
    pub total_questions: usize,
    pub timestamp: DateTime<Utc>,
}

/// `GET /health` body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub data_loaded: bool,
    pub classifier_enabled: bool,
}

/// Service status with cache state
pub async fn service_status(State(state): State<AppState>) -> Json<ServiceStatus> {
    let snapshot = state.cache.snapshot();

    Json(ServiceStatus {
        status: "ok",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        environment: state.info.environment,
        classifier_enabled: state.classifier_enabled(),
        data_loaded: snapshot.is_loaded(),
        total_questions: snapshot.len(),
        timestamp: Utc::now(),
    })
}

/// Liveness check; always 200 while the process is serving
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        data_loaded: state.cache.is_loaded(),
        classifier_enabled: state.classifier_enabled(),
    })
}
