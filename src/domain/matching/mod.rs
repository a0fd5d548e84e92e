//! Matching domain - lexical keyword scoring and sampling

pub mod keyword;
mod sampling;

pub use keyword::{KeywordMatch, MIN_MATCH_SCORE, find_best_match};
pub use sampling::random_questions;
