//! Scripted text generators for tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

use crate::client::TextGenerator;
use crate::errors::TransportError;

/// A generator that replays queued responses and records every prompt.
///
/// Once the queue is empty it keeps returning the fallback response, which
/// defaults to an empty string.
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<Result<String, TransportError>>>,
    fallback: String,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    /// Creates a generator that returns `responses` in order.
    #[must_use]
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(Ok).collect()),
            ..Self::default()
        }
    }

    /// Creates a generator that always returns `response`.
    #[must_use]
    pub fn repeating(response: impl Into<String>) -> Self {
        Self {
            fallback: response.into(),
            ..Self::default()
        }
    }

    /// Queues another response.
    pub fn push_response(&self, response: impl Into<String>) {
        self.responses.lock().push_back(Ok(response.into()));
    }

    /// Queues a transport failure.
    pub fn push_error(&self, error: TransportError) {
        self.responses.lock().push_back(Err(error));
    }

    /// Returns every prompt received, in order.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    /// Returns the number of calls made.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.prompts.lock().len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, TransportError> {
        self.prompts.lock().push(prompt.to_string());
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}

/// A generator whose endpoint is always unreachable.
#[derive(Debug, Default)]
pub struct FailingGenerator {
    calls: Mutex<usize>,
}

impl FailingGenerator {
    /// Creates a new failing generator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of calls made.
    #[must_use]
    pub fn call_count(&self) -> usize {
        *self.calls.lock()
    }
}

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, TransportError> {
        *self.calls.lock() += 1;
        Err(TransportError::request(
            "http://localhost:11434/api/generate",
            "connection refused",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_generator_replays_then_falls_back() {
        let generator = ScriptedGenerator::new(vec!["one".to_string()]);
        generator.push_error(TransportError::request("x", "down"));

        assert_eq!(generator.generate("a").await.unwrap(), "one");
        assert!(generator.generate("b").await.is_err());
        assert_eq!(generator.generate("c").await.unwrap(), "");
        assert_eq!(generator.prompts(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_repeating_generator() {
        let generator = ScriptedGenerator::repeating("same");
        generator.push_response("first");

        assert_eq!(generator.generate("p").await.unwrap(), "first");
        assert_eq!(generator.generate("p").await.unwrap(), "same");
        assert_eq!(generator.call_count(), 2);
    }

    #[tokio::test]
    async fn test_failing_generator() {
        let generator = FailingGenerator::new();
        assert!(generator.generate("p").await.is_err());
        assert_eq!(generator.call_count(), 1);
    }
}
