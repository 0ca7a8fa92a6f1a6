//! Text generation client.
//!
//! [`TextGenerator`] is the seam the rest of the crate depends on. The
//! [`OllamaClient`] implementation talks HTTP to a local inference server;
//! tests substitute the generators in [`crate::testing`] or a mockall mock.

mod config;
mod models;
#[cfg(feature = "ollama")]
mod ollama;

pub use config::ClientConfig;
pub use models::{GenerateRequest, GenerateResponse};
#[cfg(feature = "ollama")]
pub use ollama::OllamaClient;

use async_trait::async_trait;

use crate::errors::TransportError;

/// Protocol for turning a prompt into raw model text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends `prompt` to the model and returns its completion text.
    ///
    /// Any transport-level failure is returned as an error and is not
    /// retried.
    async fn generate(&self, prompt: &str) -> Result<String, TransportError>;
}
