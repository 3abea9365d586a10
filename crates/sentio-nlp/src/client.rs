//! HTTP client for the managed NLP capability.

use async_trait::async_trait;
use sentio_core::analysis::{PiiOutcome, SentimentOutcome};
use sentio_core::ports::{PiiDetector, SentimentAnalyzer};
use sentio_core::{Error, Result};
use serde::Serialize;
use tracing::debug;

/// NLP service configuration.
#[derive(Debug, Clone)]
pub struct NlpConfig {
    /// Service base URL.
    pub base_url: String,
    /// API key sent as a bearer token, if required.
    pub api_key: Option<String>,
}

impl Default for NlpConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9200".to_string(),
            api_key: None,
        }
    }
}

/// Client for the sentiment and PII-detection endpoints.
pub struct NlpClient {
    config: NlpConfig,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
    language_code: &'a str,
}

impl NlpClient {
    pub fn new(config: NlpConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        request: &AnalyzeRequest<'_>,
    ) -> Result<T> {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        let mut builder = self.client.post(&url).json(request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }
        let response = builder
            .send()
            .await
            .map_err(|e| Error::dependency("nlp service", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::dependency(
                "nlp service",
                format!("{} returned {}", path, status),
            ));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| Error::dependency("nlp service", e))
    }
}

#[async_trait]
impl SentimentAnalyzer for NlpClient {
    async fn analyze(&self, text: &str, language_code: &str) -> Result<SentimentOutcome> {
        let outcome: SentimentOutcome = self
            .post("/v1/sentiment", &AnalyzeRequest { text, language_code })
            .await?;
        debug!(sentiment = ?outcome.sentiment, language_code = %outcome.language_code, "sentiment analyzed");
        Ok(outcome)
    }
}

#[async_trait]
impl PiiDetector for NlpClient {
    async fn detect(&self, text: &str, language_code: &str) -> Result<PiiOutcome> {
        let outcome: PiiOutcome = self
            .post("/v1/pii", &AnalyzeRequest { text, language_code })
            .await?;
        debug!(entity_count = outcome.entity_count(), "PII detection completed");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentio_core::analysis::Sentiment;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> NlpClient {
        NlpClient::new(NlpConfig {
            base_url: server.uri(),
            api_key: None,
        })
    }

    #[tokio::test]
    async fn test_analyze_decodes_outcome() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/sentiment"))
            .and(body_partial_json(serde_json::json!({
                "text": "great stuff",
                "language_code": "en",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "sentiment": "POSITIVE",
                "scores": {"positive": 0.93, "negative": 0.01, "neutral": 0.05, "mixed": 0.01},
                "language_code": "en",
            })))
            .mount(&server)
            .await;

        let outcome = client(&server).analyze("great stuff", "en").await.unwrap();
        assert_eq!(outcome.sentiment, Sentiment::Positive);
        assert_eq!(outcome.scores.positive, 0.93);
    }

    #[tokio::test]
    async fn test_detect_decodes_entities() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/pii"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "entities": [
                    {"entity_type": "EMAIL", "begin_offset": 6, "end_offset": 17, "score": 0.98}
                ],
            })))
            .mount(&server)
            .await;

        let outcome = client(&server).detect("mail: a@example.co", "en").await.unwrap();
        assert!(outcome.pii_detected());
        assert_eq!(outcome.entities[0].entity_type, "EMAIL");
    }

    #[tokio::test]
    async fn test_upstream_error_propagates_as_dependency() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client(&server).analyze("text", "en").await.unwrap_err();
        assert!(matches!(err, Error::Dependency { .. }));
    }
}
