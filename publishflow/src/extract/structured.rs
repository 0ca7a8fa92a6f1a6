//! Structured calls: generate, extract, check keys, retry with a stricter
//! prompt.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::json::{extract_json_with_tier, JsonObject};
use crate::client::TextGenerator;
use crate::errors::{PublishflowError, TransportError};

/// Instruction appended to every structured prompt.
pub const BASE_INSTRUCTION: &str = "Return ONLY valid minified JSON (no prose, no markdown). \
     Do not add explanations. Ensure all required keys are present.";

/// Guard appended from the second attempt onward.
pub const EXTRA_GUARD: &str = "\nIf you cannot comply, return an empty JSON object {}.";

/// Configuration for structured calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredCallConfig {
    /// Maximum generation attempts, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    /// Instruction appended to every prompt.
    #[serde(default = "default_base_instruction")]
    pub base_instruction: String,
    /// Guard appended on retries.
    #[serde(default = "default_extra_guard")]
    pub extra_guard: String,
}

fn default_max_attempts() -> usize {
    3
}

fn default_base_instruction() -> String {
    BASE_INSTRUCTION.to_string()
}

fn default_extra_guard() -> String {
    EXTRA_GUARD.to_string()
}

impl Default for StructuredCallConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_instruction: default_base_instruction(),
            extra_guard: default_extra_guard(),
        }
    }
}

impl StructuredCallConfig {
    /// Creates a new config with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum attempts.
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Checks the configuration.
    pub fn validate(&self) -> Result<(), PublishflowError> {
        if self.max_attempts == 0 {
            return Err(PublishflowError::Config(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Composes the prompt sent on a given attempt (0-indexed).
    #[must_use]
    pub fn compose(&self, prompt: &str, attempt: usize) -> String {
        let guard = if attempt > 0 { self.extra_guard.as_str() } else { "" };
        format!("{prompt}\n\n{}{guard}", self.base_instruction)
    }
}

/// Result of a structured call.
#[derive(Debug, Clone, PartialEq)]
pub enum StructuredOutcome {
    /// A parsed object holding every required key.
    Accepted {
        /// The accepted object.
        value: JsonObject,
        /// Attempts used, counting the successful one.
        attempts: usize,
    },
    /// Every attempt failed to produce a compliant object.
    Degraded {
        /// Attempts made.
        attempts: usize,
        /// The last raw model text, kept for diagnostics.
        last_raw: String,
    },
}

impl StructuredOutcome {
    /// Returns true if the call degraded.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// Returns the number of attempts made.
    #[must_use]
    pub fn attempts(&self) -> usize {
        match self {
            Self::Accepted { attempts, .. } | Self::Degraded { attempts, .. } => *attempts,
        }
    }

    /// Returns the accepted object, or an empty one when degraded.
    #[must_use]
    pub fn into_map(self) -> JsonObject {
        match self {
            Self::Accepted { value, .. } => value,
            Self::Degraded { .. } => JsonObject::new(),
        }
    }
}

/// Drives a [`TextGenerator`] until it returns a JSON object with the
/// required keys.
#[derive(Clone)]
pub struct StructuredCaller {
    generator: Arc<dyn TextGenerator>,
    config: StructuredCallConfig,
}

impl std::fmt::Debug for StructuredCaller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StructuredCaller")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl StructuredCaller {
    /// Creates a caller with the default configuration.
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            config: StructuredCallConfig::default(),
        }
    }

    /// Creates a caller with an explicit configuration.
    pub fn with_config(
        generator: Arc<dyn TextGenerator>,
        config: StructuredCallConfig,
    ) -> Result<Self, PublishflowError> {
        config.validate()?;
        Ok(Self { generator, config })
    }

    /// Gets the configuration.
    #[must_use]
    pub fn config(&self) -> &StructuredCallConfig {
        &self.config
    }

    /// Calls the model until it yields an object containing every key in
    /// `required_keys`. Key values are not inspected.
    ///
    /// Transport failures propagate immediately. Exhausting all attempts is
    /// not an error: it returns [`StructuredOutcome::Degraded`].
    pub async fn call(
        &self,
        prompt: &str,
        required_keys: &[&str],
    ) -> Result<StructuredOutcome, TransportError> {
        let mut last_raw = String::new();

        for attempt in 0..self.config.max_attempts {
            let composed = self.config.compose(prompt, attempt);
            let raw = self.generator.generate(&composed).await?;

            match extract_json_with_tier(&raw) {
                Some((object, tier)) => {
                    let missing: Vec<&str> = required_keys
                        .iter()
                        .copied()
                        .filter(|key| !object.contains_key(*key))
                        .collect();
                    if missing.is_empty() {
                        tracing::debug!(attempt = attempt + 1, %tier, "Structured call accepted");
                        return Ok(StructuredOutcome::Accepted {
                            value: object,
                            attempts: attempt + 1,
                        });
                    }
                    tracing::debug!(
                        attempt = attempt + 1,
                        %tier,
                        ?missing,
                        "Model output is missing required keys"
                    );
                }
                None => {
                    tracing::debug!(
                        attempt = attempt + 1,
                        raw_chars = raw.len(),
                        "Model output held no JSON object"
                    );
                }
            }

            last_raw = raw;
        }

        tracing::warn!(
            attempts = self.config.max_attempts,
            ?required_keys,
            "Structured call degraded to an empty result"
        );

        Ok(StructuredOutcome::Degraded {
            attempts: self.config.max_attempts,
            last_raw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockTextGenerator;
    use crate::testing::{FailingGenerator, ScriptedGenerator};
    use pretty_assertions::assert_eq;

    const KEYS: &[&str] = &["thought", "message", "data"];

    #[test]
    fn test_compose_adds_guard_after_first_attempt() {
        let config = StructuredCallConfig::default();

        let first = config.compose("PROMPT", 0);
        assert_eq!(first, format!("PROMPT\n\n{BASE_INSTRUCTION}"));

        let second = config.compose("PROMPT", 1);
        assert_eq!(second, format!("PROMPT\n\n{BASE_INSTRUCTION}{EXTRA_GUARD}"));
        assert_eq!(config.compose("PROMPT", 2), second);
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let generator = Arc::new(ScriptedGenerator::repeating("{}"));
        let result =
            StructuredCaller::with_config(generator, StructuredCallConfig::new().with_max_attempts(0));
        assert!(matches!(result, Err(PublishflowError::Config(_))));
    }

    #[tokio::test]
    async fn test_accepts_first_compliant_object() {
        let generator = Arc::new(ScriptedGenerator::new(vec![
            r#"{"thought": "t", "message": "m", "data": {}}"#.to_string(),
        ]));
        let caller = StructuredCaller::new(generator.clone());

        let outcome = caller.call("p", KEYS).await.unwrap();

        assert_eq!(outcome.attempts(), 1);
        assert!(!outcome.is_degraded());
        assert_eq!(outcome.into_map()["thought"], "t");
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_retries_until_keys_present() {
        let generator = Arc::new(ScriptedGenerator::new(vec![
            "not json at all".to_string(),
            r#"{"thought": "only one key"}"#.to_string(),
            "```json\n{\"thought\": \"t\", \"message\": \"m\", \"data\": null}\n```".to_string(),
        ]));
        let caller = StructuredCaller::new(generator.clone());

        let outcome = caller.call("p", KEYS).await.unwrap();

        assert_eq!(outcome.attempts(), 3);
        let prompts = generator.prompts();
        assert!(!prompts[0].contains(EXTRA_GUARD.trim()));
        assert!(prompts[1].contains(EXTRA_GUARD.trim()));
        assert!(prompts[2].contains(EXTRA_GUARD.trim()));
    }

    #[tokio::test]
    async fn test_garbage_degrades_to_empty_map() {
        let generator = Arc::new(ScriptedGenerator::repeating("lorem ipsum"));
        let caller = StructuredCaller::new(generator.clone());

        let outcome = caller.call("p", KEYS).await.unwrap();

        assert!(outcome.is_degraded());
        assert_eq!(outcome.attempts(), 3);
        assert_eq!(generator.call_count(), 3);
        assert!(outcome.into_map().is_empty());
    }

    #[tokio::test]
    async fn test_degraded_keeps_last_raw() {
        let generator = Arc::new(ScriptedGenerator::new(vec![
            "one".to_string(),
            "two".to_string(),
        ]));
        let caller =
            StructuredCaller::with_config(generator, StructuredCallConfig::new().with_max_attempts(2))
                .unwrap();

        let outcome = caller.call("p", KEYS).await.unwrap();
        assert_eq!(
            outcome,
            StructuredOutcome::Degraded {
                attempts: 2,
                last_raw: "two".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let caller = StructuredCaller::new(Arc::new(FailingGenerator::new()));
        let err = caller.call("p", KEYS).await.unwrap_err();
        assert!(matches!(err, TransportError::Request { .. }));
    }

    #[tokio::test]
    async fn test_mock_generator_call_count() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate()
            .times(4)
            .returning(|_| Ok("[]".to_string()));
        let caller =
            StructuredCaller::with_config(Arc::new(mock), StructuredCallConfig::new().with_max_attempts(4))
                .unwrap();

        let outcome = caller.call("p", &["x"]).await.unwrap();
        assert!(outcome.is_degraded());
    }

    #[tokio::test]
    async fn test_empty_required_keys_accepts_any_object() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate()
            .times(1)
            .withf(|prompt: &str| prompt.starts_with("hello\n\n"))
            .returning(|_| Ok("{}".to_string()));
        let caller = StructuredCaller::new(Arc::new(mock));

        let outcome = caller.call("hello", &[]).await.unwrap();
        assert_eq!(outcome.attempts(), 1);
        assert!(outcome.into_map().is_empty());
    }
}
