//! Q&A dataset files: a JSON array of `{intent?, question, answer, createdAt?}`

use std::path::Path;

use crate::domain::DomainError;
use crate::domain::qa::EntryDocument;

/// Bundled sample dataset, used to seed the in-memory store when no file is configured
const BUNDLED_SAMPLE: &str = include_str!("../../../qa_sample.json");

pub fn parse_dataset(raw: &str) -> Result<Vec<EntryDocument>, DomainError> {
    serde_json::from_str(raw).map_err(|e| {
        DomainError::configuration(format!("Dataset is not a JSON array of Q&A records: {}", e))
    })
}

pub fn read_dataset(path: &Path) -> Result<Vec<EntryDocument>, DomainError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        DomainError::configuration(format!("Failed to read dataset {}: {}", path.display(), e))
    })?;

    parse_dataset(&raw)
}

pub fn bundled_sample() -> Result<Vec<EntryDocument>, DomainError> {
    parse_dataset(BUNDLED_SAMPLE)
}
