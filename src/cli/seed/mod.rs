//! Seed command - bulk loads a Q&A dataset into the configured store

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::domain::EntryDocument;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::store::dataset;
use crate::infrastructure::services::{ImportOptions, ImportReport};

const DEFAULT_DATASET: &str = "qa_dataset.json";
const SAMPLE_DATASET: &str = "qa_sample.json";

#[derive(Debug, Clone, Args)]
pub struct SeedArgs {
    /// Dataset file: a JSON array of `{intent?, question, answer}`
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Load the small sample dataset instead of the full one
    #[arg(long, conflicts_with = "file")]
    pub sample: bool,

    /// Append to the store instead of clearing it first
    #[arg(long)]
    pub keep_existing: bool,

    /// Records written per batch
    #[arg(long, default_value_t = 500)]
    pub batch_size: usize,
}

impl SeedArgs {
    fn dataset_path(&self) -> PathBuf {
        match (&self.file, self.sample) {
            (Some(file), _) => file.clone(),
            (None, true) => PathBuf::from(SAMPLE_DATASET),
            (None, false) => PathBuf::from(DEFAULT_DATASET),
        }
    }

    fn import_options(&self) -> ImportOptions {
        ImportOptions {
            clear_existing: !self.keep_existing,
            batch_size: self.batch_size,
        }
    }
}

/// Run the seed command
pub async fn run(args: SeedArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    init_logging(&config.logging);

    if config.storage.backend == "memory" {
        warn!(
            "Seeding the in-memory store; data is discarded when this command exits. \
             Point storage.seed_file at the dataset to serve it from memory"
        );
    }

    let path = args.dataset_path();
    let records = read_dataset(&path)?;
    info!(path = %path.display(), records = records.len(), "Loaded dataset");

    let state = crate::create_app_state(&config).await?;
    let report = state
        .entry_service
        .import(records, &args.import_options())
        .await?;

    verify(&report);

    Ok(())
}

/// Reads a JSON array of Q&A records
pub fn read_dataset(path: &Path) -> anyhow::Result<Vec<EntryDocument>> {
    dataset::read_dataset(path).with_context(|| format!("Invalid dataset {}", path.display()))
}

fn verify(report: &ImportReport) {
    let expected = report.inserted;

    if report.stored == expected {
        info!(stored = report.stored, "Verified stored entry count");
    } else {
        warn!(
            stored = report.stored,
            inserted = report.inserted,
            "Stored entry count differs from inserted count"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn args() -> SeedArgs {
        SeedArgs {
            file: None,
            sample: false,
            keep_existing: false,
            batch_size: 500,
        }
    }

    #[test]
    fn test_dataset_path_selection() {
        assert_eq!(args().dataset_path(), PathBuf::from("qa_dataset.json"));

        let sample = SeedArgs {
            sample: true,
            ..args()
        };
        assert_eq!(sample.dataset_path(), PathBuf::from("qa_sample.json"));

        let custom = SeedArgs {
            file: Some(PathBuf::from("data/trivia.json")),
            ..args()
        };
        assert_eq!(custom.dataset_path(), PathBuf::from("data/trivia.json"));
    }

    #[test]
    fn test_import_options() {
        let options = SeedArgs {
            keep_existing: true,
            batch_size: 50,
            ..args()
        }
        .import_options();

        assert!(!options.clear_existing);
        assert_eq!(options.batch_size, 50);
    }

    #[test]
    fn test_read_dataset() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"intent": "capital_france", "question": "What is the capital of France?", "answer": "Paris"}},
                {{"question": "Who wrote Hamlet?", "answer": "Shakespeare", "createdAt": "2024-01-01T00:00:00Z"}}
            ]"#
        )
        .unwrap();

        let records = read_dataset(file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].intent.as_deref(), Some("capital_france"));
        assert!(records[1].intent.is_none());
        assert_eq!(records[1].answer, "Shakespeare");
    }

    #[test]
    fn test_read_dataset_rejects_non_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"question": "Q"}}"#).unwrap();

        assert!(read_dataset(file.path()).is_err());
    }

    #[test]
    fn test_read_missing_dataset() {
        assert!(read_dataset(Path::new("/nonexistent/qa.json")).is_err());
    }
}
