//! Admin endpoints - entry mutation and cache reload

use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::error;

use super::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::DomainError;
use crate::infrastructure::services::AddEntryRequest;

#[derive(Debug, Default, Deserialize)]
pub struct AddQaRequest {
    #[serde(default)]
    pub intent: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddQaResponse {
    pub message: String,
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReloadResponse {
    pub message: String,
    pub count: usize,
}

/// `POST /api/admin/add-qa` - stores an entry and reloads the cache
pub async fn add_qa(
    State(state): State<AppState>,
    Json(request): Json<AddQaRequest>,
) -> Result<Json<AddQaResponse>, ApiError> {
    let (Some(question), Some(answer)) = (request.question, request.answer) else {
        return Err(ApiError::bad_request("question and answer are required"));
    };

    let id = state
        .entry_service
        .add_entry(AddEntryRequest {
            intent: request.intent,
            question,
            answer,
        })
        .await
        .map_err(|e| match e {
            DomainError::Validation { .. } => ApiError::from(e),
            other => {
                error!(error = %other, "Error adding Q&A");
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to add Q&A pair")
                    .with_message(other.message())
            }
        })?;

    Ok(Json(AddQaResponse {
        message: "Q&A pair added successfully".to_string(),
        id: id.to_string(),
    }))
}

/// `POST /api/admin/reload` - rebuilds the cache from the store
pub async fn reload(State(state): State<AppState>) -> Result<Json<ReloadResponse>, ApiError> {
    let count = state.entry_service.reload().await.map_err(|e| {
        error!(error = %e, "Cache reload failed");
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to reload Q&A data")
            .with_message(e.message())
    })?;

    Ok(Json(ReloadResponse {
        message: "Q&A data reloaded".to_string(),
        count,
    }))
}
