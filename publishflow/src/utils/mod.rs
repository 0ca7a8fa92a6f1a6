//! Utility functions for run identifiers and timestamps.

pub mod timestamps;

pub use timestamps::{
    format_submission_date, now_utc, parse_submission_date, submission_timestamp, Timestamp,
    TimestampError, SUBMISSION_DATE_FORMAT,
};

/// Generates a random UUID v4 for a pipeline run.
#[must_use]
pub fn generate_run_id() -> uuid::Uuid {
    uuid::Uuid::new_v4()
}
