use std::any::Any;

use axum::{
    Router,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::error;

use super::middleware::track_http_metrics;
use super::state::AppState;
use super::types::ApiError;
use super::{admin, chat, health, questions};

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat::chat))
        .route("/sample-questions", get(questions::sample_questions))
        .route("/stats", get(questions::stats))
        .route("/admin/add-qa", post(admin::add_qa))
        .route("/admin/reload", post(admin::reload))
}

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::service_status))
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
        .fallback(route_not_found)
        .with_state(state)
        .layer(middleware::from_fn(track_http_metrics))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn route_not_found() -> ApiError {
    ApiError::not_found("Not found")
}

/// Turns a handler panic into `500 {error, message}`
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };

    error!(panic = %detail, "Request handler panicked");

    ApiError::internal(detail).into_response()
}
