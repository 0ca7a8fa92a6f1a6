//! Planner stage: first read of the blog post.

use super::prompts::planner_prompt;
use super::result::{StageReport, StageResult};
use super::shaping::RawStage;
use super::REQUIRED_KEYS;
use crate::errors::TransportError;
use crate::extract::{JsonObject, StructuredCaller};
use crate::text::{normalize_tags, pad_with_placeholders, TAG_COUNT};

/// Runs the Planner against `title` and `content`.
pub async fn run_planner(
    caller: &StructuredCaller,
    title: &str,
    content: &str,
) -> Result<StageReport<StageResult>, TransportError> {
    let outcome = caller.call(&planner_prompt(title, content), REQUIRED_KEYS).await?;
    let attempts = outcome.attempts();
    let degraded = outcome.is_degraded();
    Ok(StageReport::new(shape_planner(outcome.into_map()), attempts, degraded))
}

/// Shapes a raw Planner object.
///
/// Tags are kept as given when there are exactly three, otherwise cut or
/// padded with placeholders, then normalized. `issues` defaults to empty.
#[must_use]
pub fn shape_planner(object: JsonObject) -> StageResult {
    let mut raw = RawStage::from_object(object);

    let tags = match raw.take_tags() {
        Some(tags) if tags.len() == TAG_COUNT => tags,
        other => pad_with_placeholders(other),
    };
    let summary = raw.take_summary();
    let issues = raw.take_issues();

    raw.finish(normalize_tags(&tags), summary, issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{assert_tags_well_formed, ScriptedGenerator};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    fn object(value: serde_json::Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_shape_well_formed_output() {
        let result = shape_planner(object(json!({
            "thought": "Plan it",
            "message": "About LLMs",
            "data": {"tags": ["LLMs", "Deep Learning", "datcloud"], "summary": "short", "issues": []}
        })));

        assert_eq!(result.thought.as_deref(), Some("Plan it"));
        assert_eq!(
            result.data.tags,
            vec!["large-language-models", "deep-learning", "datacloud"]
        );
        assert_eq!(result.data.summary.as_deref(), Some("short"));
        assert!(result.data.issues.is_empty());
    }

    #[test]
    fn test_shape_pads_short_tag_list() {
        let result = shape_planner(object(json!({"data": {"tags": ["rust"]}})));
        assert_eq!(result.data.tags, vec!["rust", "placeholder-tag", "topic"]);
    }

    #[test]
    fn test_shape_cuts_long_tag_list() {
        let result = shape_planner(object(json!({"data": {"tags": ["a", "b", "c", "d"]}})));
        assert_eq!(result.data.tags, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_shape_duplicate_tags() {
        let result = shape_planner(object(json!({"data": {"tags": ["a", "a", "b"]}})));
        assert_eq!(result.data.tags, vec!["a", "b", "topic"]);
    }

    #[test]
    fn test_shape_empty_object() {
        let result = shape_planner(JsonObject::new());

        assert!(result.thought.is_none());
        assert!(result.message.is_none());
        assert!(result.data.summary.is_none());
        assert!(result.data.issues.is_empty());
        assert_tags_well_formed(&result.data.tags);
    }

    #[tokio::test]
    async fn test_run_planner_prompt_and_report() {
        let generator = Arc::new(ScriptedGenerator::new(vec![json!({
            "thought": "t",
            "message": "m",
            "data": {"tags": ["x", "y", "z"], "summary": "s", "issues": []}
        })
        .to_string()]));
        let caller = StructuredCaller::new(generator.clone());

        let report = run_planner(&caller, "Title A", "Body B").await.unwrap();

        assert_eq!(report.attempts, 1);
        assert!(!report.degraded);
        assert_eq!(report.output.data.tags, vec!["x", "y", "z"]);
        assert!(generator.prompts()[0].contains("Title: Title A"));
    }

    #[tokio::test]
    async fn test_run_planner_degraded() {
        let caller = StructuredCaller::new(Arc::new(ScriptedGenerator::repeating("nope")));

        let report = run_planner(&caller, "T", "C").await.unwrap();

        assert!(report.degraded);
        assert_eq!(report.attempts, 3);
        assert_eq!(
            report.output.data.tags,
            vec!["placeholder-tag", "topic", "topic-2"]
        );
    }
}
