//! Deterministic rule-based intent classifier

use async_trait::async_trait;

use crate::domain::intent::{IntentClassifier, IntentPrediction};
use crate::domain::DomainError;

/// Classifier answering from a fixed rule table.
///
/// A rule fires when the lowercased utterance contains its phrase; the first
/// matching rule wins. Handy for tests and offline demos.
#[derive(Debug, Default, Clone)]
pub struct StaticIntentClassifier {
    rules: Vec<(String, IntentPrediction)>,
    failure: Option<String>,
}

impl StaticIntentClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule mapping `phrase` to `intent` with `confidence`
    pub fn with_rule(mut self, phrase: &str, intent: &str, confidence: f64) -> Self {
        self.rules.push((
            phrase.to_lowercase(),
            IntentPrediction::new(intent, confidence),
        ));
        self
    }

    /// Makes every call fail with a classifier error
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            rules: Vec::new(),
            failure: Some(message.into()),
        }
    }
}

#[async_trait]
impl IntentClassifier for StaticIntentClassifier {
    async fn classify(
        &self,
        utterance: &str,
        _session_id: &str,
    ) -> Result<Option<IntentPrediction>, DomainError> {
        if let Some(message) = &self.failure {
            return Err(DomainError::classifier(message.clone()));
        }

        let utterance = utterance.to_lowercase();

        Ok(self
            .rules
            .iter()
            .find(|(phrase, _)| utterance.contains(phrase.as_str()))
            .map(|(_, prediction)| prediction.clone()))
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
