//! Intent classifier infrastructure - adapters for the external classifier

mod dialogflow;
mod static_rules;

pub use dialogflow::{DialogflowClassifier, DialogflowConfig};
pub use static_rules::StaticIntentClassifier;

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::config::AppConfig;
use crate::domain::intent::IntentClassifier;
use crate::domain::DomainError;

/// Creates the configured classifier, or `None` when classification is disabled
pub fn create_classifier(
    config: &AppConfig,
) -> Result<Option<Arc<dyn IntentClassifier>>, DomainError> {
    if !config.classifier.enabled {
        info!("Intent classifier disabled - using keyword matching");
        return Ok(None);
    }

    info!(endpoint = %config.classifier.endpoint, "Initializing intent classifier");

    let mut df_config = DialogflowConfig::new(&config.classifier.endpoint, config.project_id())
        .with_language_code(&config.classifier.language_code)
        .with_timeout(Duration::from_secs(config.classifier.timeout_secs));

    if let Some(token) = &config.classifier.access_token {
        df_config = df_config.with_access_token(token);
    }

    Ok(Some(Arc::new(DialogflowClassifier::new(df_config)?)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_classifier() {
        let config = AppConfig::default();
        assert!(create_classifier(&config).unwrap().is_none());
    }

    #[test]
    fn test_enabled_classifier() {
        let mut config = AppConfig::default();
        config.classifier.enabled = true;

        let classifier = create_classifier(&config).unwrap().unwrap();
        assert_eq!(classifier.name(), "dialogflow");
    }
}
