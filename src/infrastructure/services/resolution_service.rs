//! Resolution pipeline - intent tier, then keyword tier, then fallback

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::IntentResolver;
use crate::domain::intent::{IntentClassifier, IntentPrediction};
use crate::domain::matching::find_best_match;
use crate::domain::resolution::{MatchResult, intent_confidence_qualifies};
use crate::infrastructure::cache::EntryCache;
use crate::infrastructure::observability::record_resolution;

/// Answers utterances from the entry cache, optionally guided by a classifier.
///
/// `resolve` never fails: classifier and lookup errors degrade to the next tier.
#[derive(Debug, Clone)]
pub struct ResolutionService {
    cache: Arc<EntryCache>,
    resolver: IntentResolver,
    classifier: Option<Arc<dyn IntentClassifier>>,
}

impl ResolutionService {
    pub fn new(
        cache: Arc<EntryCache>,
        resolver: IntentResolver,
        classifier: Option<Arc<dyn IntentClassifier>>,
    ) -> Self {
        Self {
            cache,
            resolver,
            classifier,
        }
    }

    pub fn classifier_enabled(&self) -> bool {
        self.classifier.is_some()
    }

    pub async fn resolve(&self, utterance: &str, session_id: &str) -> MatchResult {
        let result = match self.resolve_by_classifier(utterance, session_id).await {
            Some(result) => result,
            None => self.resolve_by_keywords(utterance),
        };

        if result.is_match() {
            info!(
                session_id,
                method = result.method.as_str(),
                confidence = result.confidence.as_str(),
                matched_question = result.matched_question.as_deref().unwrap_or_default(),
                intent_source = result.intent_source.map(tracing::field::display),
                "Resolved answer"
            );
        } else {
            info!(session_id, "No match found");
        }

        record_resolution(result.method, result.confidence);
        result
    }

    async fn resolve_by_classifier(&self, utterance: &str, session_id: &str) -> Option<MatchResult> {
        let classifier = self.classifier.as_ref()?;

        let prediction = match classifier.classify(utterance, session_id).await {
            Ok(Some(prediction)) => prediction,
            Ok(None) => return None,
            Err(e) => {
                warn!(
                    classifier = classifier.name(),
                    error = %e,
                    "Intent classification failed, falling back to keyword matching"
                );
                return None;
            }
        };

        let IntentPrediction {
            intent, confidence, ..
        } = prediction;

        if !intent_confidence_qualifies(confidence) {
            debug!(intent = %intent, confidence, "Intent confidence too low");
            return None;
        }

        let found = self.resolver.resolve_by_intent(&intent).await?;

        Some(MatchResult::intent(
            found.answer,
            found.question,
            confidence,
            found.source,
        ))
    }

    fn resolve_by_keywords(&self, utterance: &str) -> MatchResult {
        let snapshot = self.cache.snapshot();

        match find_best_match(utterance, snapshot.entries()) {
            Some(m) => {
                debug!(score = m.score, overlap = m.overlap, "Keyword match");
                MatchResult::keyword(
                    m.entry.answer().to_string(),
                    m.entry.question().to_string(),
                    m.score,
                )
            }
            None => MatchResult::no_match(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::domain::intent::{IntentSource, MockIntentClassifier};
    use crate::domain::qa::{Entry, EntryId, EntryStore, MockEntryStore, NewEntry};
    use crate::domain::resolution::{ConfidenceTier, FALLBACK_REPLY, ResolutionMethod};
    use crate::infrastructure::classifier::StaticIntentClassifier;
    use crate::infrastructure::store::InMemoryEntryStore;

    fn entry(id: &str, intent: Option<&str>, question: &str, answer: &str) -> Entry {
        NewEntry::new(intent.map(str::to_string), question, answer)
            .unwrap()
            .into_entry(EntryId::new(id))
    }

    async fn service(
        entries: Vec<Entry>,
        classifier: Option<Arc<dyn IntentClassifier>>,
    ) -> ResolutionService {
        let store: Arc<dyn EntryStore> = Arc::new(InMemoryEntryStore::with_entries(entries));
        let cache = Arc::new(EntryCache::new(store.clone()));
        cache.load().await.unwrap();
        let resolver = IntentResolver::new(store, cache.clone());
        ResolutionService::new(cache, resolver, classifier)
    }

    fn france() -> Entry {
        entry(
            "1",
            Some("capital_france"),
            "What is the capital of France?",
            "Paris",
        )
    }

    #[tokio::test]
    async fn test_keyword_match_without_classifier() {
        let service = service(vec![france()], None).await;

        let result = service.resolve("capital of france", "s1").await;

        assert_eq!(result.method, ResolutionMethod::Keyword);
        assert_eq!(result.confidence, ConfidenceTier::High);
        assert_eq!(result.answer, "Paris");
        assert!(result.intent_source.is_none());
        assert_eq!(
            result.matched_question.as_deref(),
            Some("What is the capital of France?")
        );
    }

    #[tokio::test]
    async fn test_empty_cache_returns_fallback() {
        let service = service(vec![], None).await;

        let result = service.resolve("anything at all", "s1").await;

        assert_eq!(result.method, ResolutionMethod::None);
        assert_eq!(result.confidence, ConfidenceTier::None);
        assert_eq!(result.answer, FALLBACK_REPLY);
        assert!(result.matched_question.is_none());
    }

    #[tokio::test]
    async fn test_intent_tier_high_confidence() {
        let classifier = StaticIntentClassifier::new().with_rule("paris", "capital_france", 0.95);
        let service = service(vec![france()], Some(Arc::new(classifier))).await;

        let result = service.resolve("tell me about paris", "s1").await;

        assert_eq!(result.method, ResolutionMethod::Intent);
        assert_eq!(result.confidence, ConfidenceTier::High);
        assert_eq!(result.answer, "Paris");
        assert_eq!(result.intent_source, Some(IntentSource::Store));
    }

    #[tokio::test]
    async fn test_intent_tier_medium_at_exact_high_boundary() {
        let classifier = StaticIntentClassifier::new().with_rule("paris", "capital_france", 0.8);
        let service = service(vec![france()], Some(Arc::new(classifier))).await;

        let result = service.resolve("paris", "s1").await;

        assert_eq!(result.method, ResolutionMethod::Intent);
        assert_eq!(result.confidence, ConfidenceTier::Medium);
    }

    #[tokio::test]
    async fn test_confidence_of_exactly_half_skips_intent_tier() {
        let classifier =
            StaticIntentClassifier::new().with_rule("capital", "capital_france", 0.5);
        let service = service(vec![france()], Some(Arc::new(classifier))).await;

        let result = service.resolve("capital of france", "s1").await;

        assert_eq!(result.method, ResolutionMethod::Keyword);
    }

    #[tokio::test]
    async fn test_classifier_failure_degrades_to_keyword() {
        let classifier = StaticIntentClassifier::failing("connection refused");
        let service = service(vec![france()], Some(Arc::new(classifier))).await;

        let result = service.resolve("capital of france", "s1").await;

        assert_eq!(result.method, ResolutionMethod::Keyword);
        assert_eq!(result.answer, "Paris");
    }

    #[tokio::test]
    async fn test_unknown_intent_degrades_to_keyword() {
        let classifier = StaticIntentClassifier::new().with_rule("capital", "no_such_intent", 0.99);
        let service = service(vec![france()], Some(Arc::new(classifier))).await;

        let result = service.resolve("capital of france", "s1").await;

        assert_eq!(result.method, ResolutionMethod::Keyword);
    }

    #[tokio::test]
    async fn test_classifier_receives_session_id() {
        let mut classifier = MockIntentClassifier::new();
        classifier
            .expect_classify()
            .withf(|utterance, session_id| {
                utterance.to_string() == "hello there" && session_id.to_string() == "abc-123"
            })
            .times(1)
            .returning(|_, _| Ok(None));
        classifier.expect_name().return_const("mock");

        let service = service(vec![france()], Some(Arc::new(classifier))).await;
        let result = service.resolve("hello there", "abc-123").await;

        assert_eq!(result.method, ResolutionMethod::None);
    }

    #[tokio::test]
    async fn test_store_failure_during_intent_lookup_uses_cache() {
        let mut store = MockEntryStore::new();
        store.expect_list().returning(|| Ok(vec![france()]));
        store
            .expect_find_by_intent()
            .returning(|_| Err(DomainError::store_unavailable("down")));
        let store: Arc<dyn EntryStore> = Arc::new(store);

        let cache = Arc::new(EntryCache::new(store.clone()));
        cache.load().await.unwrap();

        let classifier = StaticIntentClassifier::new().with_rule("paris", "CAPITAL_FRANCE", 0.9);
        let service = ResolutionService::new(
            cache.clone(),
            IntentResolver::new(store, cache),
            Some(Arc::new(classifier)),
        );

        let result = service.resolve("paris please", "s1").await;

        assert_eq!(result.method, ResolutionMethod::Intent);
        assert_eq!(result.answer, "Paris");
        assert_eq!(result.intent_source, Some(IntentSource::Cache));
    }
}
