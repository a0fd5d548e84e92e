//! Sample questions and statistics endpoints

use axum::extract::{Query, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::config::Environment;

const DEFAULT_SAMPLE_COUNT: usize = 10;

#[derive(Debug, Default, Deserialize)]
pub struct SampleQuery {
    pub count: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SampleQuestionsResponse {
    pub count: usize,
    pub questions: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub environment: Environment,
    pub classifier_enabled: bool,
    pub total_questions: usize,
    pub is_loaded: bool,
    pub project_id: String,
    pub cache_generation: u64,
    pub loaded_at: Option<DateTime<Utc>>,
    pub timestamp: DateTime<Utc>,
}

/// Absent, unparsable or zero counts fall back to the default; negatives yield nothing
fn parse_count(raw: Option<&str>) -> usize {
    match raw.and_then(leading_integer) {
        None | Some(0) => DEFAULT_SAMPLE_COUNT,
        Some(n) if n < 0 => 0,
        Some(n) => usize::try_from(n).unwrap_or(usize::MAX),
    }
}

/// Reads the optionally signed integer prefix, ignoring whatever trails it
fn leading_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (negative, rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    let magnitude = rest[..digits]
        .bytes()
        .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(i64::from(d - b'0')));

    Some(if negative { -magnitude } else { magnitude })
}

/// `GET /api/sample-questions?count=N`
pub async fn sample_questions(
    State(state): State<AppState>,
    Query(query): Query<SampleQuery>,
) -> Result<Json<SampleQuestionsResponse>, ApiError> {
    if !state.cache.is_loaded() {
        return Err(ApiError::unavailable("Data not loaded yet"));
    }

    let questions = state
        .entry_service
        .sample_questions(parse_count(query.count.as_deref()));

    Ok(Json(SampleQuestionsResponse {
        count: questions.len(),
        questions,
    }))
}

/// `GET /api/stats`
pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.entry_service.stats();

    Json(StatsResponse {
        environment: state.info.environment,
        classifier_enabled: state.classifier_enabled(),
        total_questions: stats.total_questions,
        is_loaded: stats.is_loaded,
        project_id: state.info.project_id.clone(),
        cache_generation: stats.generation,
        loaded_at: stats.loaded_at,
        timestamp: Utc::now(),
    })
}
