//! Reviewer stage: refines the Planner output.

use super::prompts::reviewer_prompt;
use super::result::{StageReport, StageResult};
use super::shaping::RawStage;
use super::REQUIRED_KEYS;
use crate::errors::TransportError;
use crate::extract::{JsonObject, StructuredCaller};
use crate::text::{normalize_tags, pad_with_placeholders};

/// Runs the Reviewer over the Planner's result.
pub async fn run_reviewer(
    caller: &StructuredCaller,
    planner: &StageResult,
) -> Result<StageReport<StageResult>, TransportError> {
    let outcome = caller.call(&reviewer_prompt(planner), REQUIRED_KEYS).await?;
    let attempts = outcome.attempts();
    let degraded = outcome.is_degraded();
    Ok(StageReport::new(shape_reviewer(outcome.into_map()), attempts, degraded))
}

/// Shapes a raw Reviewer object.
///
/// The Reviewer does not inherit Planner tags: a missing or non-list
/// `data.tags` is padded with placeholders before normalization.
#[must_use]
pub fn shape_reviewer(object: JsonObject) -> StageResult {
    let mut raw = RawStage::from_object(object);

    let issues = raw.take_issues();
    let tags = pad_with_placeholders(raw.take_tags());
    let summary = raw.take_summary();

    raw.finish(normalize_tags(&tags), summary, issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::planner::shape_planner;
    use crate::testing::{assert_tags_well_formed, ScriptedGenerator};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    fn object(value: serde_json::Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_shape_keeps_model_tags() {
        let result = shape_reviewer(object(json!({
            "thought": "fine",
            "message": "Refined",
            "data": {"tags": ["ML Ops", "llms", "vector search"], "summary": "ok"}
        })));

        assert_eq!(
            result.data.tags,
            vec!["mlops", "large-language-models", "vector-search"]
        );
        assert!(result.data.issues.is_empty());
        assert_eq!(result.message.as_deref(), Some("Refined"));
    }

    #[test]
    fn test_shape_without_tags_uses_placeholders() {
        let result = shape_reviewer(object(json!({"thought": "t", "message": "m", "data": {}})));
        assert_eq!(result.data.tags, vec!["placeholder-tag", "topic", "topic-2"]);
    }

    #[test]
    fn test_shape_non_list_tags() {
        let result = shape_reviewer(object(json!({"data": {"tags": 5}})));
        assert_tags_well_formed(&result.data.tags);
        assert_eq!(result.data.tags[0], "placeholder-tag");
    }

    #[test]
    fn test_planner_duplicates_then_reviewer_without_tags() {
        let planner = shape_planner(object(json!({"data": {"tags": ["a", "a", "b"]}})));
        assert_eq!(planner.data.tags, vec!["a", "b", "topic"]);

        let reviewer = shape_reviewer(object(json!({"thought": "t", "message": "m", "data": {}})));
        assert_eq!(reviewer.data.tags.len(), 3);
        assert_tags_well_formed(&reviewer.data.tags);
    }

    #[tokio::test]
    async fn test_run_reviewer_sends_planner_json() {
        let generator = Arc::new(ScriptedGenerator::new(vec![
            r#"{"thought": "t", "message": "m", "data": {"tags": ["q", "r", "s"]}}"#.to_string(),
        ]));
        let caller = StructuredCaller::new(generator.clone());
        let planner = shape_planner(object(json!({"message": "planner-message", "data": {}})));

        let report = run_reviewer(&caller, &planner).await.unwrap();

        assert_eq!(report.output.data.tags, vec!["q", "r", "s"]);
        assert!(generator.prompts()[0].contains("planner-message"));
    }
}
