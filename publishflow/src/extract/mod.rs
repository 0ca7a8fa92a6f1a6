//! Resilient JSON extraction and structured model calls.

mod json;
mod structured;

pub use json::{
    extract_json, extract_json_with_tier, parse_fenced, parse_outer_braces, parse_whole,
    ExtractionTier, JsonObject,
};
pub use structured::{
    StructuredCallConfig, StructuredCaller, StructuredOutcome, BASE_INSTRUCTION, EXTRA_GUARD,
};
