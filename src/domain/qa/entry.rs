//! Q&A entry entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Opaque entry identifier assigned by the durable store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persisted document shape: `{intent?, question, answer, createdAt}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    pub question: String,
    pub answer: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// A stored question/answer pair, optionally tagged with an intent label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    id: EntryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    intent: Option<String>,
    question: String,
    answer: String,
    created_at: DateTime<Utc>,
}

impl Entry {
    /// Builds an entry from a store-assigned id and its persisted document
    pub fn from_document(id: EntryId, document: EntryDocument) -> Self {
        Self {
            id,
            intent: document.intent,
            question: document.question,
            answer: document.answer,
            created_at: document.created_at,
        }
    }

    pub fn id(&self) -> &EntryId {
        &self.id
    }

    pub fn intent(&self) -> Option<&str> {
        self.intent.as_deref()
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the entry may be admitted into the cache
    pub fn is_admissible(&self) -> bool {
        !self.question.trim().is_empty() && !self.answer.trim().is_empty()
    }

    /// Case-insensitive intent comparison
    pub fn has_intent_ignore_case(&self, intent: &str) -> bool {
        self.intent
            .as_deref()
            .is_some_and(|own| own.to_lowercase() == intent.to_lowercase())
    }

    pub fn to_document(&self) -> EntryDocument {
        EntryDocument {
            intent: self.intent.clone(),
            question: self.question.clone(),
            answer: self.answer.clone(),
            created_at: self.created_at,
        }
    }
}

/// Validated input for creating an entry
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    intent: Option<String>,
    question: String,
    answer: String,
    created_at: DateTime<Utc>,
}

impl NewEntry {
    /// Validates that question and answer are non-empty
    pub fn new(
        intent: Option<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let question = question.into();
        let answer = answer.into();

        if question.trim().is_empty() || answer.trim().is_empty() {
            return Err(DomainError::validation("question and answer are required"));
        }

        Ok(Self {
            intent: intent.filter(|i| !i.trim().is_empty()),
            question,
            answer,
            created_at: Utc::now(),
        })
    }

    /// Builds a new entry from a dataset record, keeping its timestamp
    pub fn from_document(document: EntryDocument) -> Result<Self, DomainError> {
        let created_at = document.created_at;
        let mut entry = Self::new(document.intent, document.question, document.answer)?;
        entry.created_at = created_at;
        Ok(entry)
    }

    /// Fills in a placeholder intent derived from the current time when none was given
    pub fn with_placeholder_intent(mut self) -> Self {
        if self.intent.is_none() {
            self.intent = Some(format!("custom_{}", Utc::now().timestamp_millis()));
        }
        self
    }

    pub fn intent(&self) -> Option<&str> {
        self.intent.as_deref()
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn into_document(self) -> EntryDocument {
        EntryDocument {
            intent: self.intent,
            question: self.question,
            answer: self.answer,
            created_at: self.created_at,
        }
    }

    /// Materializes the entry under a store-assigned id
    pub fn into_entry(self, id: EntryId) -> Entry {
        Entry::from_document(id, self.into_document())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_rejects_empty_question() {
        let result = NewEntry::new(None, "  ", "Paris");
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[test]
    fn test_new_entry_rejects_empty_answer() {
        let result = NewEntry::new(None, "What is the capital of France?", "");
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[test]
    fn test_placeholder_intent_only_when_missing() {
        let generated = NewEntry::new(None, "Q", "A").unwrap().with_placeholder_intent();
        assert!(generated.intent().unwrap().starts_with("custom_"));

        let kept = NewEntry::new(Some("geo_france".to_string()), "Q", "A")
            .unwrap()
            .with_placeholder_intent();
        assert_eq!(kept.intent(), Some("geo_france"));
    }

    #[test]
    fn test_blank_intent_is_treated_as_missing() {
        let entry = NewEntry::new(Some(" ".to_string()), "Q", "A").unwrap();
        assert_eq!(entry.intent(), None);
    }

    #[test]
    fn test_intent_ignore_case() {
        let entry = NewEntry::new(Some("Capital_France".to_string()), "Q", "A")
            .unwrap()
            .into_entry(EntryId::new("1"));

        assert!(entry.has_intent_ignore_case("capital_france"));
        assert!(!entry.has_intent_ignore_case("capital_spain"));
    }

    #[test]
    fn test_document_serialization_shape() {
        let document = NewEntry::new(None, "Q", "A").unwrap().into_document();
        let json = serde_json::to_value(&document).unwrap();

        assert!(json.get("createdAt").is_some());
        assert!(json.get("intent").is_none());
        assert_eq!(json["question"], "Q");
    }

    #[test]
    fn test_document_without_created_at_deserializes() {
        let document: EntryDocument =
            serde_json::from_str(r#"{"question":"Q","answer":"A","intent":"x"}"#).unwrap();
        assert_eq!(document.intent.as_deref(), Some("x"));
    }
}
