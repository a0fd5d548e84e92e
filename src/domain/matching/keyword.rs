//! Keyword-overlap matcher
//!
//! Scores an utterance against entry questions by lexical token overlap:
//! `score = overlap * 10 + (overlap / max(|utterance|, |question|)) * 5`.
//! Exact token equality and substring containment (for tokens longer than
//! three characters) both count as overlap, at most once per utterance token.

use crate::domain::qa::Entry;

/// Matches at or below this score are rejected
pub const MIN_MATCH_SCORE: f64 = 5.0;

/// Utterance tokens of this length or shorter are discarded
const MIN_UTTERANCE_TOKEN_LEN: usize = 2;

/// Tokens longer than this may match by substring containment
const SUBSTRING_MATCH_MIN_LEN: usize = 3;

const OVERLAP_WEIGHT: f64 = 10.0;
const RATIO_WEIGHT: f64 = 5.0;

/// Best keyword candidate for an utterance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeywordMatch<'a> {
    pub entry: &'a Entry,
    pub score: f64,
    pub overlap: usize,
}

/// Lowercases, strips everything except alphanumerics, underscores and
/// whitespace, then splits on whitespace.
fn normalize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    cleaned.split_whitespace().map(str::to_string).collect()
}

/// Tokenizes a user utterance, dropping tokens of two characters or fewer
pub fn tokenize_utterance(utterance: &str) -> Vec<String> {
    normalize(utterance)
        .into_iter()
        .filter(|token| token.chars().count() > MIN_UTTERANCE_TOKEN_LEN)
        .collect()
}

/// Tokenizes an entry question; short tokens are kept
pub fn tokenize_question(question: &str) -> Vec<String> {
    normalize(question)
}

fn tokens_match(utterance_token: &str, entry_token: &str) -> bool {
    utterance_token == entry_token
        || (utterance_token.chars().count() > SUBSTRING_MATCH_MIN_LEN
            && entry_token.contains(utterance_token))
        || (entry_token.chars().count() > SUBSTRING_MATCH_MIN_LEN
            && utterance_token.contains(entry_token))
}

/// Counts utterance tokens credited by at least one entry token
pub fn overlap(utterance_tokens: &[String], entry_tokens: &[String]) -> usize {
    utterance_tokens
        .iter()
        .filter(|u| entry_tokens.iter().any(|e| tokens_match(u, e)))
        .count()
}

/// Combines overlap and token-set sizes into the final score
pub fn final_score(overlap: usize, utterance_len: usize, entry_len: usize) -> f64 {
    let denominator = utterance_len.max(entry_len);
    let match_ratio = if denominator == 0 {
        0.0
    } else {
        overlap as f64 / denominator as f64
    };

    overlap as f64 * OVERLAP_WEIGHT + match_ratio * RATIO_WEIGHT
}

/// Finds the highest scoring entry for `utterance`.
///
/// Ties keep the entry seen first, so the result depends on `entries` order.
/// Returns `None` unless the best score is strictly above [`MIN_MATCH_SCORE`].
pub fn find_best_match<'a>(utterance: &str, entries: &'a [Entry]) -> Option<KeywordMatch<'a>> {
    let utterance_tokens = tokenize_utterance(utterance);
    let mut best: Option<KeywordMatch<'a>> = None;
    let mut best_score = 0.0;

    for entry in entries {
        let entry_tokens = tokenize_question(entry.question());
        let overlap = overlap(&utterance_tokens, &entry_tokens);
        let score = final_score(overlap, utterance_tokens.len(), entry_tokens.len());

        if score > best_score {
            best_score = score;
            best = Some(KeywordMatch {
                entry,
                score,
                overlap,
            });
        }
    }

    best.filter(|m| m.score > MIN_MATCH_SCORE)
}
