//! Finalizer stage and publish package assembly.

use super::prompts::finalizer_prompt;
use super::result::{
    AgentMessage, FinalData, FinalizerOutput, PublishPackage, StageReport, StageResult,
};
use super::shaping::RawStage;
use super::{StageKind, REQUIRED_KEYS};
use crate::errors::TransportError;
use crate::extract::{JsonObject, StructuredCaller};
use crate::text::{cap_25w, normalize_tags};
use crate::utils::submission_timestamp;

/// Picks the tags the Finalizer must use: the Reviewer's when it has any,
/// otherwise the Planner's, normalized either way.
#[must_use]
pub fn choose_tags(planner: &StageResult, reviewer: &StageResult) -> Vec<String> {
    if reviewer.data.tags.is_empty() {
        normalize_tags(&planner.data.tags)
    } else {
        normalize_tags(&reviewer.data.tags)
    }
}

/// Runs the Finalizer and builds the publish package.
pub async fn run_finalizer(
    caller: &StructuredCaller,
    title: &str,
    content: &str,
    planner: &StageResult,
    reviewer: &StageResult,
) -> Result<StageReport<FinalizerOutput>, TransportError> {
    let chosen = choose_tags(planner, reviewer);
    let prompt = finalizer_prompt(title, content, planner, reviewer, &chosen);

    let outcome = caller.call(&prompt, REQUIRED_KEYS).await?;
    let attempts = outcome.attempts();
    let degraded = outcome.is_degraded();

    let finalized = harden_finalized(outcome.into_map(), &chosen);
    let publish = build_publish_package(
        title,
        content,
        planner,
        reviewer,
        &finalized,
        submission_timestamp(),
    );

    Ok(StageReport::new(
        FinalizerOutput { finalized, publish },
        attempts,
        degraded,
    ))
}

/// Hardens a raw Finalizer object.
///
/// Missing tags fall back to `chosen`; tags are re-normalized; the summary
/// is capped at 25 words and becomes empty when absent.
#[must_use]
pub fn harden_finalized(object: JsonObject, chosen: &[String]) -> StageResult {
    let mut raw = RawStage::from_object(object);

    let tags = raw.take_tags().unwrap_or_else(|| chosen.to_vec());
    let summary = cap_25w(&raw.take_summary().unwrap_or_default());
    let issues = raw.take_issues();

    raw.finish(normalize_tags(&tags), Some(summary), issues)
}

/// Assembles the publish package from the three stage results.
///
/// `agents` always holds the Planner and Reviewer messages, in that order,
/// with an empty string standing in for a missing message.
#[must_use]
pub fn build_publish_package(
    title: &str,
    content: &str,
    planner: &StageResult,
    reviewer: &StageResult,
    finalized: &StageResult,
    submission_date: String,
) -> PublishPackage {
    PublishPackage {
        title: title.to_string(),
        content: content.trim().to_string(),
        agents: vec![
            AgentMessage::from_stage(StageKind::Planner, planner),
            AgentMessage::from_stage(StageKind::Reviewer, reviewer),
        ],
        final_data: FinalData {
            tags: finalized.data.tags.clone(),
            summary: finalized.data.summary.clone().unwrap_or_default(),
            issues: finalized.data.issues.clone(),
        },
        submission_date,
    }
}
