//! Chat endpoint

use axum::extract::State;
use tracing::info;

use super::state::AppState;
use crate::api::types::{ApiError, ChatRequest, ChatResponse, Json};

/// `POST /api/chat` - answers one utterance
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = request
        .message
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ApiError::bad_request("Message is required"))?;

    if !state.cache.is_loaded() {
        return Err(ApiError::unavailable(
            "Service is loading data. Please try again in a moment.",
        ));
    }

    let session_id = request
        .session_id
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    info!(session_id = %session_id, message = %message, "User question");

    let result = state
        .resolution_service
        .resolve(&message, &session_id)
        .await;

    Ok(Json(ChatResponse::from_result(result, session_id)))
}
