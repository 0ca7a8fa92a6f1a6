//! Configuration for the text generation client.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::models::GenerateRequest;
use crate::errors::PublishflowError;

/// Configuration for talking to the inference endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Full URL of the generate endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: f64,
    /// Whether to ask the endpoint for a streamed response.
    #[serde(default)]
    pub stream: bool,
    /// Extra model options forwarded verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,
}

fn default_endpoint() -> String {
    "http://localhost:11434/api/generate".to_string()
}

fn default_model() -> String {
    "llama3.2:3b".to_string()
}

fn default_timeout() -> f64 {
    180.0
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            timeout_seconds: default_timeout(),
            stream: false,
            options: None,
        }
    }
}

impl ClientConfig {
    /// Creates a new client configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the endpoint URL.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Sets the model options.
    #[must_use]
    pub fn with_options(mut self, options: serde_json::Value) -> Self {
        self.options = Some(options);
        self
    }

    /// Gets timeout as Duration.
    ///
    /// Fails for negative, non-finite, or out-of-range values.
    pub fn timeout(&self) -> Result<Duration, PublishflowError> {
        Duration::try_from_secs_f64(self.timeout_seconds).map_err(|e| {
            PublishflowError::Config(format!(
                "timeout_seconds {} is out of range: {e}",
                self.timeout_seconds
            ))
        })
    }

    /// Builds a request for `prompt` using the configured model settings.
    #[must_use]
    pub fn generate_request(&self, prompt: impl Into<String>) -> GenerateRequest {
        GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.into(),
            stream: self.stream,
            options: self.options.clone(),
        }
    }

    /// Checks the configuration for values the client cannot work with.
    pub fn validate(&self) -> Result<(), PublishflowError> {
        if self.endpoint.trim().is_empty() {
            return Err(PublishflowError::Config("endpoint must not be empty".to_string()));
        }
        if self.model.trim().is_empty() {
            return Err(PublishflowError::Config("model must not be empty".to_string()));
        }
        if !self.timeout_seconds.is_finite() || self.timeout_seconds <= 0.0 {
            return Err(PublishflowError::Config(format!(
                "timeout_seconds must be positive, got {}",
                self.timeout_seconds
            )));
        }
        self.timeout()?;
        Ok(())
    }
}
