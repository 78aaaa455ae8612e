//! Anonymization service client

use crate::{
    client::{create_client, HttpClientConfig},
    ClientError, Result,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use veil_core::{AnonymizationResult, DeanonymizationResult, Entity, OperatorConfig};
use veil_detect::{Recognizer, RegexRecognizer};

const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Environment variable naming the service base URL
pub const SERVICE_URL_ENV: &str = "VEIL_SERVICE_URL";

/// Environment variable naming the de-anonymization key
pub const DECRYPT_KEY_ENV: &str = "VEIL_DECRYPT_KEY";

const DEFAULT_BASE_URL: &str = "http://localhost:5001";

/// Service client configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base URL of the anonymization service
    pub base_url: String,

    /// Key used by the `DEFAULT` decrypt operator on de-anonymize calls.
    /// There is deliberately no built-in fallback: de-anonymization refuses
    /// to run without an explicitly supplied key.
    pub deanonymize_key: Option<String>,

    /// HTTP client configuration
    pub client_config: HttpClientConfig,
}

impl ServiceConfig {
    /// Create a configuration for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            deanonymize_key: None,
            client_config: HttpClientConfig::default(),
        }
    }

    /// Set the de-anonymization key
    pub fn with_deanonymize_key(mut self, key: impl Into<String>) -> Self {
        self.deanonymize_key = Some(key.into());
        self
    }

    /// Read base URL and key from `VEIL_SERVICE_URL` / `VEIL_DECRYPT_KEY`
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(SERVICE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let deanonymize_key = std::env::var(DECRYPT_KEY_ENV).ok();

        Self {
            base_url,
            deanonymize_key,
            client_config: HttpClientConfig::default(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[derive(Serialize)]
struct AnonymizeRequest<'a> {
    text: &'a str,
    anonymizers: &'a OperatorConfig,
    analyzer_results: &'a [Entity],
}

#[derive(Serialize)]
struct DeanonymizeRequest<'a> {
    text: &'a str,
    deanonymizers: Deanonymizers<'a>,
    anonymizer_results: &'a [serde_json::Value],
}

#[derive(Serialize)]
struct Deanonymizers<'a> {
    #[serde(rename = "DEFAULT")]
    default: DecryptOperator<'a>,
}

#[derive(Serialize)]
struct DecryptOperator<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    key: &'a str,
}

/// Shared shape of both endpoint responses: `{ text, items }`
#[derive(Deserialize)]
struct ServiceResponse {
    text: String,
    #[serde(default)]
    items: Vec<serde_json::Value>,
}

/// Client for the external anonymization service.
///
/// One outbound request per call, awaited to completion; no pipelining and
/// no automatic retries. Calls are not idempotent at the service boundary
/// (reversible operators consume non-deterministic state such as nonces), so
/// any retry policy belongs to the caller. Cancellation, if needed, is a
/// transport-layer concern (drop the future).
pub struct ServiceClient {
    config: ServiceConfig,
    client: Client,
    recognizer: RegexRecognizer,
}

impl ServiceClient {
    /// Create a new service client
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let client = create_client(&config.client_config)?;
        let recognizer = RegexRecognizer::new()
            .map_err(|e| ClientError::Config(format!("Failed to compile patterns: {}", e)))?;

        Ok(Self {
            config,
            client,
            recognizer,
        })
    }

    /// Anonymize `text` under the given operator configuration.
    ///
    /// Runs the local recognizer, submits text + configuration + entities to
    /// `POST /anonymize`, and folds the response into a single result
    /// record. Empty or whitespace-only text fails with `InvalidInput`
    /// before any network activity.
    #[instrument(skip_all, fields(text_len = text.len()))]
    pub async fn anonymize(
        &self,
        text: &str,
        config: &OperatorConfig,
    ) -> Result<AnonymizationResult> {
        if text.trim().is_empty() {
            return Err(ClientError::InvalidInput(
                "text to anonymize is empty".to_string(),
            ));
        }

        let entities = self.recognizer.detect(text);
        debug!(entities = entities.len(), "Recognized entities locally");

        let request = AnonymizeRequest {
            text,
            anonymizers: config,
            analyzer_results: &entities,
        };

        let response = self
            .client
            .post(format!("{}/anonymize", self.config.base_url))
            .json(&request)
            .send()
            .await?;

        let body = self.read_response(response).await?;

        Ok(AnonymizationResult {
            original: text.to_string(),
            anonymized: body.text,
            entities,
            operator_results: body.items,
            deanonymized: None,
        })
    }

    /// Recover original values from previously anonymized text.
    ///
    /// `operator_results` must be the exact records returned by the prior
    /// anonymize call for this text, and reversible (encrypt) operator
    /// output. Fails with `InvalidInput` on an empty record list and with
    /// `MissingKey` when no decrypt key is configured, both before any
    /// network activity.
    #[instrument(skip_all, fields(results = operator_results.len()))]
    pub async fn deanonymize(
        &self,
        text: &str,
        operator_results: &[serde_json::Value],
    ) -> Result<DeanonymizationResult> {
        if operator_results.is_empty() {
            return Err(ClientError::InvalidInput(
                "no operator results available for de-anonymization".to_string(),
            ));
        }

        let key = self
            .config
            .deanonymize_key
            .as_deref()
            .ok_or(ClientError::MissingKey)?;

        let request = DeanonymizeRequest {
            text,
            deanonymizers: Deanonymizers {
                default: DecryptOperator {
                    kind: "decrypt",
                    key,
                },
            },
            anonymizer_results: operator_results,
        };

        let response = self
            .client
            .post(format!("{}/deanonymize", self.config.base_url))
            .json(&request)
            .send()
            .await?;

        let body = self.read_response(response).await?;

        Ok(DeanonymizationResult {
            text: body.text,
            items: body.items,
        })
    }

    /// Liveness probe against `GET /health`.
    ///
    /// True on HTTP 200 within a bounded timeout; false on anything else,
    /// including transport errors. Never returns an error.
    pub async fn health(&self) -> bool {
        let result = self
            .client
            .get(format!("{}/health", self.config.base_url))
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await;

        match result {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("Health probe failed: {}", e);
                false
            }
        }
    }

    /// Map a raw response to the shared `{ text, items }` shape.
    async fn read_response(&self, response: reqwest::Response) -> Result<ServiceResponse> {
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            return Err(ClientError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            ClientError::MalformedResponse(format!("Failed to parse service response: {}", e))
        })
    }
}
