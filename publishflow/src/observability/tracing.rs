//! Tracing setup and stage timing helpers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use crate::stages::StageKind;

/// Output format for [`init_tracing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Installs a global fmt subscriber filtered by `RUST_LOG`, defaulting to
/// `info`.
///
/// Returns false if a global subscriber was already installed.
pub fn init_tracing(format: LogFormat) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Pretty => builder.try_init().is_ok(),
        LogFormat::Json => builder.json().try_init().is_ok(),
    }
}

/// Span attributes for one stage execution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StageSpanAttributes {
    /// Stage name.
    pub stage_name: String,
    /// Pipeline run ID.
    pub run_id: Option<String>,
    /// Generation attempts used.
    pub attempts: Option<usize>,
    /// Whether the stage degraded.
    pub degraded: Option<bool>,
    /// Duration in milliseconds.
    pub duration_ms: Option<f64>,
    /// Error message if failed.
    pub error: Option<String>,
}

impl StageSpanAttributes {
    /// Creates attributes for `stage`.
    #[must_use]
    pub fn new(stage: StageKind) -> Self {
        Self {
            stage_name: stage.to_string(),
            ..Default::default()
        }
    }

    /// Sets the run ID.
    #[must_use]
    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = Some(run_id.into());
        self
    }

    /// Records the structured call outcome.
    #[must_use]
    pub fn with_outcome(mut self, attempts: usize, degraded: bool) -> Self {
        self.attempts = Some(attempts);
        self.degraded = Some(degraded);
        self
    }

    /// Sets the duration.
    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Sets the error.
    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Converts to flat `stage.*` attributes.
    #[must_use]
    pub fn to_attributes(&self) -> HashMap<String, String> {
        let mut attrs = HashMap::new();

        attrs.insert("stage.name".to_string(), self.stage_name.clone());

        if let Some(ref v) = self.run_id {
            attrs.insert("pipeline.run_id".to_string(), v.clone());
        }
        if let Some(v) = self.attempts {
            attrs.insert("stage.attempts".to_string(), v.to_string());
        }
        if let Some(v) = self.degraded {
            attrs.insert("stage.degraded".to_string(), v.to_string());
        }
        if let Some(v) = self.duration_ms {
            attrs.insert("stage.duration_ms".to_string(), v.to_string());
        }
        if let Some(ref v) = self.error {
            attrs.insert("stage.error".to_string(), v.clone());
        }

        attrs
    }
}

/// Simple span timing helper.
#[derive(Debug)]
pub struct SpanTimer {
    start: Instant,
    name: String,
}

impl SpanTimer {
    /// Starts a new span timer.
    #[must_use]
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            name: name.into(),
        }
    }

    /// Returns the elapsed time in milliseconds.
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Returns the span name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Finishes the span and returns the duration.
    #[must_use]
    pub fn finish(self) -> f64 {
        self.elapsed_ms()
    }
}
