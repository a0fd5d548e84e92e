//! Dialogflow-compatible intent classifier over HTTP

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::domain::intent::{IntentClassifier, IntentPrediction};
use crate::domain::DomainError;

/// Settings for [`DialogflowClassifier`]
#[derive(Debug, Clone)]
pub struct DialogflowConfig {
    /// Base URL, e.g. `https://dialogflow.googleapis.com/v2`
    pub endpoint: String,
    pub project_id: String,
    pub language_code: String,
    pub access_token: Option<String>,
    pub timeout: Duration,
}

impl DialogflowConfig {
    pub fn new(endpoint: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            project_id: project_id.into(),
            language_code: "en-US".to_string(),
            access_token: None,
            timeout: Duration::from_secs(5),
        }
    }

    pub fn with_language_code(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = language_code.into();
        self
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetectIntentResponse {
    query_result: Option<QueryResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryResult {
    intent: Option<DetectedIntent>,
    #[serde(default)]
    intent_detection_confidence: f64,
    fulfillment_text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetectedIntent {
    #[serde(default)]
    display_name: String,
}

/// Calls the `detectIntent` session endpoint
#[derive(Debug, Clone)]
pub struct DialogflowClassifier {
    client: reqwest::Client,
    base_url: Url,
    config: DialogflowConfig,
}

impl DialogflowClassifier {
    pub fn new(config: DialogflowConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        let base_url = Url::parse(&config.endpoint).map_err(|e| {
            DomainError::configuration(format!(
                "Invalid classifier endpoint '{}': {}",
                config.endpoint, e
            ))
        })?;

        if base_url.cannot_be_a_base() {
            return Err(DomainError::configuration(format!(
                "Classifier endpoint '{}' cannot carry a path",
                config.endpoint
            )));
        }

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// Session endpoint URL. Project and session ids are appended as single
    /// percent-encoded path segments, so `/`, `?` or `..` cannot leave the
    /// project's session path.
    fn session_url(&self, session_id: &str) -> Result<Url, DomainError> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|_| DomainError::configuration("Classifier endpoint cannot carry a path"))?
            .pop_if_empty()
            .extend(["projects", self.config.project_id.as_str(), "agent", "sessions"])
            .push(&format!("{}:detectIntent", session_id));

        Ok(url)
    }
}

#[async_trait]
impl IntentClassifier for DialogflowClassifier {
    async fn classify(
        &self,
        utterance: &str,
        session_id: &str,
    ) -> Result<Option<IntentPrediction>, DomainError> {
        let body = json!({
            "queryInput": {
                "text": {
                    "text": utterance,
                    "languageCode": self.config.language_code,
                }
            }
        });

        let mut request = self.client.post(self.session_url(session_id)?).json(&body);

        if let Some(token) = &self.config.access_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::classifier(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(DomainError::classifier(format!(
                "HTTP {}: {}",
                status, error_body
            )));
        }

        let parsed: DetectIntentResponse = response
            .json()
            .await
            .map_err(|e| DomainError::classifier(format!("Failed to parse response: {}", e)))?;

        let Some(result) = parsed.query_result else {
            return Ok(None);
        };

        let Some(intent) = result.intent.filter(|i| !i.display_name.is_empty()) else {
            return Ok(None);
        };

        debug!(
            intent = %intent.display_name,
            confidence = result.intent_detection_confidence,
            "Classifier detected intent"
        );

        let mut prediction =
            IntentPrediction::new(intent.display_name, result.intent_detection_confidence);

        if let Some(text) = result.fulfillment_text.filter(|t| !t.is_empty()) {
            prediction = prediction.with_fulfillment_text(text);
        }

        Ok(Some(prediction))
    }

    fn name(&self) -> &'static str {
        "dialogflow"
    }
}
