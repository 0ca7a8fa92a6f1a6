//! Wire types for the generate endpoint.

use serde::{Deserialize, Serialize};

/// Body of a generate request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Model identifier.
    pub model: String,
    /// Full prompt text.
    pub prompt: String,
    /// Whether the endpoint should stream.
    pub stream: bool,
    /// Model options, omitted when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,
}

/// Body of a generate response. Only the completion text is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Completion text; absent is treated as empty.
    #[serde(default)]
    pub response: Option<String>,
    /// Model that produced the completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Whether generation finished.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
    /// Prompt token count reported by the endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_eval_count: Option<u32>,
    /// Completion token count reported by the endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u32>,
}

impl GenerateResponse {
    /// Returns the completion text, or an empty string.
    #[must_use]
    pub fn into_text(self) -> String {
        self.response.unwrap_or_default()
    }

    /// Returns total tokens.
    #[must_use]
    pub fn total_tokens(&self) -> u32 {
        self.prompt_eval_count
            .unwrap_or(0)
            .saturating_add(self.eval_count.unwrap_or(0))
    }
}
