//! Turning a loosely typed model object into a [`StageResult`].

use serde_json::Value;

use super::result::{StageData, StageResult};
use crate::extract::JsonObject;

/// Renders a JSON value as text; `null` counts as absent.
pub(crate) fn value_as_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// A model object split into the parts the stages shape.
#[derive(Debug, Default)]
pub(crate) struct RawStage {
    thought: Option<String>,
    message: Option<String>,
    data: JsonObject,
    extra: JsonObject,
}

impl RawStage {
    /// Splits `object`. A missing or non-object `data` becomes empty.
    pub(crate) fn from_object(mut object: JsonObject) -> Self {
        let thought = object.remove("thought").and_then(value_as_text);
        let message = object.remove("message").and_then(value_as_text);
        let data = match object.remove("data") {
            Some(Value::Object(map)) => map,
            _ => JsonObject::new(),
        };
        Self {
            thought,
            message,
            data,
            extra: object,
        }
    }

    /// Removes `data.tags`. Returns `None` unless it was a list; non-string
    /// entries are dropped.
    pub(crate) fn take_tags(&mut self) -> Option<Vec<String>> {
        match self.data.remove("tags") {
            Some(Value::Array(items)) => Some(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Removes `data.summary`.
    pub(crate) fn take_summary(&mut self) -> Option<String> {
        self.data.remove("summary").and_then(value_as_text)
    }

    /// Removes `data.issues`, defaulting to an empty list.
    pub(crate) fn take_issues(&mut self) -> Vec<String> {
        match self.data.remove("issues") {
            Some(Value::Array(items)) => items.into_iter().filter_map(value_as_text).collect(),
            _ => Vec::new(),
        }
    }

    /// Assembles the result from the shaped fields and whatever is left.
    pub(crate) fn finish(
        self,
        tags: Vec<String>,
        summary: Option<String>,
        issues: Vec<String>,
    ) -> StageResult {
        StageResult {
            thought: self.thought,
            message: self.message,
            data: StageData {
                tags,
                summary,
                issues,
                extra: self.data,
            },
            extra: self.extra,
        }
    }
}
