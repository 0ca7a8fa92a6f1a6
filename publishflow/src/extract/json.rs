//! Best-effort JSON object extraction from free-form model text.
//!
//! Each tier is an independent pure function. [`extract_json`] tries them in
//! [`ExtractionTier::ORDER`] and returns the first object found.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::LazyLock;

/// A JSON object as produced by the model.
pub type JsonObject = Map<String, Value>;

static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)```(?:json)?\s*(\{[\s\S]*?\})\s*```").expect("fence pattern is valid")
});

/// The strategy that produced an extracted object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionTier {
    /// The whole trimmed text was a JSON object.
    Whole,
    /// A fenced code block held the object.
    Fenced,
    /// The span from the first `{` to the last `}` held the object.
    OuterBraces,
}

impl ExtractionTier {
    /// Tiers in the order they are tried.
    pub const ORDER: [Self; 3] = [Self::Whole, Self::Fenced, Self::OuterBraces];

    /// Runs this tier alone against `text`.
    #[must_use]
    pub fn apply(self, text: &str) -> Option<JsonObject> {
        match self {
            Self::Whole => parse_whole(text),
            Self::Fenced => parse_fenced(text),
            Self::OuterBraces => parse_outer_braces(text),
        }
    }
}

impl fmt::Display for ExtractionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Whole => write!(f, "whole"),
            Self::Fenced => write!(f, "fenced"),
            Self::OuterBraces => write!(f, "outer_braces"),
        }
    }
}

fn parse_object(candidate: &str) -> Option<JsonObject> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Parses the whole trimmed text as a JSON object.
#[must_use]
pub fn parse_whole(text: &str) -> Option<JsonObject> {
    parse_object(text.trim())
}

/// Parses the body of the first fenced code block (optionally labelled
/// `json`) that wraps a `{...}` object.
#[must_use]
pub fn parse_fenced(text: &str) -> Option<JsonObject> {
    let captures = FENCE_RE.captures(text.trim())?;
    parse_object(captures.get(1)?.as_str())
}

/// Parses the widest brace-delimited span: first `{` through last `}`.
#[must_use]
pub fn parse_outer_braces(text: &str) -> Option<JsonObject> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    parse_object(&text[start..=end])
}

/// Extracts a JSON object from model text, reporting which tier matched.
#[must_use]
pub fn extract_json_with_tier(text: &str) -> Option<(JsonObject, ExtractionTier)> {
    ExtractionTier::ORDER
        .into_iter()
        .find_map(|tier| tier.apply(text).map(|object| (object, tier)))
}

/// Extracts a JSON object from model text.
///
/// Returns `None` when no tier yields an object. That is a recoverable
/// condition for the caller, not an error.
///
/// # Examples
///
/// ```
/// use publishflow::extract::extract_json;
///
/// let object = extract_json("Sure! {\"thought\": \"ok\"} Hope that helps.").unwrap();
/// assert_eq!(object["thought"], "ok");
/// assert!(extract_json("no braces here").is_none());
/// ```
#[must_use]
pub fn extract_json(text: &str) -> Option<JsonObject> {
    extract_json_with_tier(text).map(|(object, _)| object)
}
