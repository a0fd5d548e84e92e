//! Domain layer - Core business logic and entities

pub mod error;
pub mod intent;
pub mod matching;
pub mod qa;
pub mod resolution;

pub use error::DomainError;
pub use intent::{IntentClassifier, IntentMatch, IntentPrediction, IntentSource};
pub use matching::{KeywordMatch, find_best_match, random_questions};
pub use qa::{Entry, EntryDocument, EntryId, EntryStore, NewEntry};
pub use resolution::{ConfidenceTier, FALLBACK_REPLY, MatchResult, ResolutionMethod};
