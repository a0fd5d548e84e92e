//! Resolution domain - confidence tiers and the normalized pipeline result

use serde::{Deserialize, Serialize};

use crate::domain::intent::IntentSource;

/// Classifier confidence must exceed this for the intent tier to be used
pub const INTENT_MIN_CONFIDENCE: f64 = 0.5;

/// Classifier confidence above this is reported as high
pub const INTENT_HIGH_CONFIDENCE: f64 = 0.8;

/// Keyword scores above this are reported as high
pub const KEYWORD_HIGH_SCORE: f64 = 15.0;

/// Reply returned when neither tier finds an answer
pub const FALLBACK_REPLY: &str = "I'm sorry, I don't have a good answer to that question. \
Try asking about general knowledge topics like history, science, geography, or famous people!";

/// Coarse bucket summarizing match quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    None,
    Medium,
    High,
}

impl ConfidenceTier {
    /// Tier for an intent match with the given classifier confidence
    pub fn for_intent_confidence(confidence: f64) -> Self {
        if confidence > INTENT_HIGH_CONFIDENCE {
            Self::High
        } else {
            Self::Medium
        }
    }

    /// Tier for a keyword match with the given score
    pub fn for_keyword_score(score: f64) -> Self {
        if score > KEYWORD_HIGH_SCORE {
            Self::High
        } else {
            Self::Medium
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Whether a classifier confidence qualifies for the intent tier
pub fn intent_confidence_qualifies(confidence: f64) -> bool {
    confidence > INTENT_MIN_CONFIDENCE
}

/// Resolution tier that produced the answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionMethod {
    None,
    Intent,
    Keyword,
}

impl ResolutionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Intent => "intent",
            Self::Keyword => "keyword",
        }
    }
}

/// Normalized output of the resolution pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub answer: String,
    pub matched_question: Option<String>,
    pub confidence: ConfidenceTier,
    pub method: ResolutionMethod,
    /// Where the intent tier found its entry
    pub intent_source: Option<IntentSource>,
}

impl MatchResult {
    pub fn intent(
        answer: String,
        question: String,
        confidence: f64,
        source: IntentSource,
    ) -> Self {
        Self {
            answer,
            matched_question: Some(question),
            confidence: ConfidenceTier::for_intent_confidence(confidence),
            method: ResolutionMethod::Intent,
            intent_source: Some(source),
        }
    }

    pub fn keyword(answer: String, question: String, score: f64) -> Self {
        Self {
            answer,
            matched_question: Some(question),
            confidence: ConfidenceTier::for_keyword_score(score),
            method: ResolutionMethod::Keyword,
            intent_source: None,
        }
    }

    pub fn no_match() -> Self {
        Self {
            answer: FALLBACK_REPLY.to_string(),
            matched_question: None,
            confidence: ConfidenceTier::None,
            method: ResolutionMethod::None,
            intent_source: None,
        }
    }

    pub fn is_match(&self) -> bool {
        self.method != ResolutionMethod::None
    }
}
