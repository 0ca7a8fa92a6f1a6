//! Prompt templates for the three stages.

use super::result::StageResult;

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
}

/// Prompt asking the Planner for planning JSON.
#[must_use]
pub fn planner_prompt(title: &str, content: &str) -> String {
    format!(
        r#"
You are the Planner. Analyze the blog and produce planning JSON.

Title: {title}
Content: {content}

Requirements:
- "thought": one sentence capturing the plan for the blog.
- "message": a crisp 1-2 sentence description of the topic.
- "data.tags": exactly 3 topical, specific tags (lowercase).
- "data.summary": ≤25 words, single sentence.
- "data.issues": empty list.

Schema:
{{
  "thought": "string",
  "message": "string",
  "data": {{
    "tags": ["tag-1","tag-2","tag-3"],
    "summary": "string (<=25 words)",
    "issues": []
  }}
}}
"#
    )
}

/// Prompt asking the Reviewer to review the Planner output.
#[must_use]
pub fn reviewer_prompt(planner: &StageResult) -> String {
    let planner_json = to_json(planner);
    format!(
        r#"
You are the Reviewer. Here is the planner JSON:
{planner_json}

Provide a brief review JSON with this schema:
{{
  "thought": "one sentence reviewer perspective",
  "message": "1-2 sentence refined explanation",
  "data": {{
    "tags": ["tag-1","tag-2","tag-3"],   // can be the same or slightly revised
    "summary": "≤25 words reviewer summary",
    "issues": []
  }}
}}
"#
    )
}

/// Prompt asking the Finalizer for the final message and summary, pinned to
/// `tags` in order.
#[must_use]
pub fn finalizer_prompt(
    title: &str,
    content: &str,
    planner: &StageResult,
    reviewer: &StageResult,
    tags: &[String],
) -> String {
    let planner_json = to_json(planner);
    let reviewer_json = to_json(reviewer);
    let tags_json = to_json(&tags);
    format!(
        r#"
You are the Finalizer. Given the blog and prior agents, craft the final message & summary.

Title: {title}
Content: {content}

Planner JSON: {planner_json}
Reviewer JSON: {reviewer_json}

Use EXACTLY these tags (keep order): {tags_json}

Return JSON:
{{
  "thought": "one sentence explaining the final synthesis",
  "message": "1-2 sentences, clear and neutral",
  "data": {{
    "tags": {tags_json},
    "summary": "≤25 words single sentence",
    "issues": []
  }}
}}
"#
    )
}
