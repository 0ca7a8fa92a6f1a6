//! Stage result and publish package types.

use serde::{Deserialize, Serialize};

use super::StageKind;
use crate::extract::JsonObject;

/// Structured payload of a stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageData {
    /// Exactly three normalized tags once shaped.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Summary text, absent when the model omitted it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Validation findings; empty in this pipeline.
    #[serde(default)]
    pub issues: Vec<String>,
    /// Any other keys the model returned inside `data`.
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// Output of one stage call.
///
/// `thought` and `message` are left exactly as the model returned them, so
/// either may be missing after a degraded call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageResult {
    /// One-sentence reasoning from the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<String>,
    /// Short description produced by the stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Shaped payload.
    #[serde(default)]
    pub data: StageData,
    /// Any other top-level keys the model returned.
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl StageResult {
    /// Returns the message, or an empty string when absent.
    #[must_use]
    pub fn message_or_empty(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }
}

/// One entry in [`PublishPackage::agents`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentMessage {
    /// Stage role, e.g. `Planner`.
    pub role: String,
    /// The stage's message.
    pub content: String,
}

impl AgentMessage {
    /// Builds the entry for a stage result.
    #[must_use]
    pub fn from_stage(kind: StageKind, result: &StageResult) -> Self {
        Self {
            role: kind.role().to_string(),
            content: result.message_or_empty().to_string(),
        }
    }
}

/// Final tags, summary and issues carried by the publish package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalData {
    /// Exactly three normalized tags.
    pub tags: Vec<String>,
    /// Summary capped at 25 words.
    pub summary: String,
    /// Validation findings.
    pub issues: Vec<String>,
}

/// Publish-ready bundle assembled by the Finalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishPackage {
    /// Blog title.
    pub title: String,
    /// Trimmed blog body.
    pub content: String,
    /// Planner and Reviewer messages, in that order.
    pub agents: Vec<AgentMessage>,
    /// Hardened final data.
    #[serde(rename = "final")]
    pub final_data: FinalData,
    /// Build time as `YYYY-MM-DDTHH:MM:SSZ`.
    #[serde(rename = "submissionDate")]
    pub submission_date: String,
}

/// Everything the Finalizer returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalizerOutput {
    /// The hardened Finalizer stage result.
    pub finalized: StageResult,
    /// The publish package.
    pub publish: PublishPackage,
}

/// A stage output together with how the structured call went.
#[derive(Debug, Clone, PartialEq)]
pub struct StageReport<T> {
    /// The shaped output.
    pub output: T,
    /// Generation attempts made.
    pub attempts: usize,
    /// True when the model never produced a compliant object and the output
    /// was built from defaults.
    pub degraded: bool,
}

impl<T> StageReport<T> {
    /// Creates a new report.
    #[must_use]
    pub fn new(output: T, attempts: usize, degraded: bool) -> Self {
        Self {
            output,
            attempts,
            degraded,
        }
    }

    /// Discards the call details.
    #[must_use]
    pub fn into_output(self) -> T {
        self.output
    }
}
