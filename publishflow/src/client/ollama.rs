//! HTTP client for an Ollama-style `/api/generate` endpoint.

use async_trait::async_trait;
use std::time::Instant;

use super::config::ClientConfig;
use super::models::{GenerateRequest, GenerateResponse};
use super::TextGenerator;
use crate::errors::{PublishflowError, TransportError};

/// Longest slice of an error body kept in a [`TransportError`].
const MAX_ERROR_BODY: usize = 512;

/// Text generator backed by a local Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    config: ClientConfig,
    client: reqwest::Client,
}

impl OllamaClient {
    /// Creates a client from a validated configuration.
    pub fn new(config: ClientConfig) -> Result<Self, PublishflowError> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout()?)
            .build()
            .map_err(|e| PublishflowError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Gets the configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends a fully specified request and returns the completion text.
    ///
    /// There is no retry here; callers that want one re-send the prompt.
    pub async fn generate_with(&self, request: &GenerateRequest) -> Result<String, TransportError> {
        let endpoint = self.config.endpoint.as_str();
        let start = Instant::now();

        tracing::debug!(
            endpoint,
            model = %request.model,
            prompt_chars = request.prompt.len(),
            "Sending generate request"
        );

        let response = self
            .client
            .post(endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::request(endpoint, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            tracing::warn!(endpoint, status = status.as_u16(), "Generate request rejected");
            return Err(TransportError::status(endpoint, status.as_u16(), body));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| TransportError::decode(endpoint, e.to_string()))?;

        tracing::debug!(
            endpoint,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            total_tokens = parsed.total_tokens(),
            "Generate request completed"
        );

        Ok(parsed.into_text())
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String, TransportError> {
        let request = self.config.generate_request(prompt);
        self.generate_with(&request).await
    }
}
