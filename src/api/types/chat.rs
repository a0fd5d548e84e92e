//! Chat endpoint payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ConfidenceTier, MatchResult, ResolutionMethod};

/// `POST /api/chat` body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// `POST /api/chat` reply
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_question: Option<String>,
    pub confidence: ConfidenceTier,
    pub method: ResolutionMethod,
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatResponse {
    pub fn from_result(result: MatchResult, session_id: String) -> Self {
        Self {
            reply: result.answer,
            matched_question: result.matched_question,
            confidence: result.confidence,
            method: result.method,
            session_id,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accepts_camel_case_session() {
        let request: ChatRequest =
            serde_json::from_str(r#"{"message":"hi","sessionId":"abc"}"#).unwrap();
        assert_eq!(request.message.as_deref(), Some("hi"));
        assert_eq!(request.session_id.as_deref(), Some("abc"));

        let request: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(request.message.is_none());
    }

    #[test]
    fn test_no_match_response_omits_matched_question() {
        let response = ChatResponse::from_result(MatchResult::no_match(), "s1".to_string());
        let value = serde_json::to_value(&response).unwrap();

        assert!(value.get("matchedQuestion").is_none());
        assert_eq!(value["confidence"], "none");
        assert_eq!(value["method"], "none");
        assert_eq!(value["sessionId"], "s1");
    }
}
