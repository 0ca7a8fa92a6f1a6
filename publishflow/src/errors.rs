//! Error types for the publishflow pipeline.
//!
//! Only transport failures are fatal. Malformed or incomplete model output is
//! absorbed by the structured caller and the stage shaping defaults, so it has
//! no variant here.

use serde_json::json;
use std::collections::HashMap;
use thiserror::Error;

use crate::stages::StageKind;

/// The main error type for publishflow operations.
#[derive(Debug, Error)]
pub enum PublishflowError {
    /// The inference endpoint could not be reached or rejected the request.
    #[error("{0}")]
    Transport(#[from] TransportError),

    /// A stage degraded to an empty result and the pipeline was configured
    /// to treat that as fatal.
    #[error("Stage {stage} degraded after {attempts} attempt(s)")]
    Degraded {
        /// The stage that degraded.
        stage: StageKind,
        /// Number of generation attempts made.
        attempts: usize,
    },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for PublishflowError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Errors raised while talking to the text generation endpoint.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The request could not be sent or timed out.
    #[error("Request to {endpoint} failed: {reason}")]
    Request {
        /// The endpoint URL.
        endpoint: String,
        /// The underlying failure.
        reason: String,
    },

    /// The endpoint answered with a non-success status.
    #[error("Endpoint {endpoint} returned status {status}: {body}")]
    Status {
        /// The endpoint URL.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// The response body was not the JSON document the endpoint promises.
    #[error("Could not decode response from {endpoint}: {reason}")]
    Decode {
        /// The endpoint URL.
        endpoint: String,
        /// The decoding failure.
        reason: String,
    },
}

impl TransportError {
    /// Creates a request error.
    #[must_use]
    pub fn request(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Request {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// Creates a status error.
    #[must_use]
    pub fn status(endpoint: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            endpoint: endpoint.into(),
            status,
            body: body.into(),
        }
    }

    /// Creates a decode error.
    #[must_use]
    pub fn decode(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// Returns the endpoint the failure relates to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        match self {
            Self::Request { endpoint, .. }
            | Self::Status { endpoint, .. }
            | Self::Decode { endpoint, .. } => endpoint,
        }
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();

        match self {
            Self::Request { endpoint, reason } => {
                map.insert("type".to_string(), json!("TransportRequest"));
                map.insert("endpoint".to_string(), json!(endpoint));
                map.insert("reason".to_string(), json!(reason));
            }
            Self::Status {
                endpoint,
                status,
                body,
            } => {
                map.insert("type".to_string(), json!("TransportStatus"));
                map.insert("endpoint".to_string(), json!(endpoint));
                map.insert("status".to_string(), json!(status));
                map.insert("body".to_string(), json!(body));
            }
            Self::Decode { endpoint, reason } => {
                map.insert("type".to_string(), json!("TransportDecode"));
                map.insert("endpoint".to_string(), json!(endpoint));
                map.insert("reason".to_string(), json!(reason));
            }
        }

        map.insert("message".to_string(), json!(self.to_string()));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_display() {
        let err = TransportError::status("http://localhost:11434/api/generate", 500, "boom");
        let text = err.to_string();
        assert!(text.contains("500"));
        assert!(text.contains("boom"));
        assert_eq!(err.endpoint(), "http://localhost:11434/api/generate");
    }

    #[test]
    fn test_transport_error_to_dict() {
        let err = TransportError::request("http://x", "connection refused");
        let dict = err.to_dict();

        assert_eq!(dict.get("type").unwrap(), "TransportRequest");
        assert_eq!(dict.get("reason").unwrap(), "connection refused");
        assert!(dict.contains_key("message"));
    }

    #[test]
    fn test_publishflow_error_from_transport() {
        let err: PublishflowError = TransportError::decode("http://x", "eof").into();
        assert!(matches!(err, PublishflowError::Transport(_)));
        assert!(err.to_string().contains("eof"));
    }

    #[test]
    fn test_degraded_error_names_stage() {
        let err = PublishflowError::Degraded {
            stage: StageKind::Reviewer,
            attempts: 3,
        };
        assert_eq!(err.to_string(), "Stage reviewer degraded after 3 attempt(s)");
    }
}
