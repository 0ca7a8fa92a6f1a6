//! The three pipeline stages.
//!
//! Each stage builds a prompt, runs a structured call, and shapes the
//! returned object into a [`StageResult`] whose tags always satisfy the
//! normalization invariants. Stages never mutate their inputs.

mod finalizer;
mod planner;
mod prompts;
mod result;
mod reviewer;
mod shaping;

pub use finalizer::{build_publish_package, choose_tags, harden_finalized, run_finalizer};
pub use planner::{run_planner, shape_planner};
pub use prompts::{finalizer_prompt, planner_prompt, reviewer_prompt};
pub use result::{
    AgentMessage, FinalData, FinalizerOutput, PublishPackage, StageData, StageReport, StageResult,
};
pub use reviewer::{run_reviewer, shape_reviewer};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Keys every stage requires from the model.
pub const REQUIRED_KEYS: &[&str] = &["thought", "message", "data"];

/// Identifies a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    /// First pass over the blog post.
    Planner,
    /// Review of the Planner output.
    Reviewer,
    /// Final synthesis and package assembly.
    Finalizer,
}

impl StageKind {
    /// Stages in execution order.
    pub const ORDER: [Self; 3] = [Self::Planner, Self::Reviewer, Self::Finalizer];

    /// Role name used in the publish package.
    #[must_use]
    pub fn role(self) -> &'static str {
        match self {
            Self::Planner => "Planner",
            Self::Reviewer => "Reviewer",
            Self::Finalizer => "Finalizer",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Planner => write!(f, "planner"),
            Self::Reviewer => write!(f, "reviewer"),
            Self::Finalizer => write!(f, "finalizer"),
        }
    }
}
