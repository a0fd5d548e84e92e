//! Intent domain - external classifier contract and intent lookup results

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Output of an intent classifier for one utterance
#[derive(Debug, Clone, PartialEq)]
pub struct IntentPrediction {
    pub intent: String,
    /// Classifier confidence in `[0, 1]`
    pub confidence: f64,
    pub fulfillment_text: Option<String>,
}

impl IntentPrediction {
    pub fn new(intent: impl Into<String>, confidence: f64) -> Self {
        Self {
            intent: intent.into(),
            confidence: confidence.clamp(0.0, 1.0),
            fulfillment_text: None,
        }
    }

    pub fn with_fulfillment_text(mut self, text: impl Into<String>) -> Self {
        self.fulfillment_text = Some(text.into());
        self
    }
}

/// Capability interface over an external natural-language intent classifier
#[cfg_attr(test, automock)]
#[async_trait]
pub trait IntentClassifier: Send + Sync + std::fmt::Debug {
    /// Classifies an utterance. `Ok(None)` means the classifier had no intent for it.
    async fn classify(
        &self,
        utterance: &str,
        session_id: &str,
    ) -> Result<Option<IntentPrediction>, DomainError>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Where an intent lookup found its entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentSource {
    Store,
    Cache,
}

impl std::fmt::Display for IntentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store => write!(f, "store"),
            Self::Cache => write!(f, "cache"),
        }
    }
}

/// Entry found for an intent label
#[derive(Debug, Clone, PartialEq)]
pub struct IntentMatch {
    pub answer: String,
    pub question: String,
    pub source: IntentSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_confidence_is_clamped() {
        assert_eq!(IntentPrediction::new("x", 1.7).confidence, 1.0);
        assert_eq!(IntentPrediction::new("x", -0.2).confidence, 0.0);
        assert_eq!(IntentPrediction::new("x", 0.5).confidence, 0.5);
    }

    #[test]
    fn test_intent_source_display() {
        assert_eq!(IntentSource::Store.to_string(), "store");
        assert_eq!(IntentSource::Cache.to_string(), "cache");
    }
}
