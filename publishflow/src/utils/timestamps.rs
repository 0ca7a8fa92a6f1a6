//! Timestamp helpers for publish packages.

use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

/// Represents a UTC timestamp.
pub type Timestamp = DateTime<Utc>;

/// Format of `submissionDate`: second precision with a literal `Z`.
pub const SUBMISSION_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Errors that can occur during timestamp parsing.
#[derive(Debug, Error)]
pub enum TimestampError {
    /// The timestamp string is empty.
    #[error("Empty timestamp string")]
    EmptyString,

    /// The timestamp value is invalid.
    #[error("Invalid timestamp: {0}")]
    InvalidFormat(String),
}

/// Returns the current UTC timestamp.
#[must_use]
pub fn now_utc() -> Timestamp {
    Utc::now()
}

/// Formats a timestamp as a submission date.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use publishflow::utils::format_submission_date;
///
/// let dt = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
/// assert_eq!(format_submission_date(&dt), "2024-03-09T07:05:01Z");
/// ```
#[must_use]
pub fn format_submission_date(dt: &Timestamp) -> String {
    dt.format(SUBMISSION_DATE_FORMAT).to_string()
}

/// Returns the current UTC time as a submission date.
#[must_use]
pub fn submission_timestamp() -> String {
    format_submission_date(&now_utc())
}

/// Parses a submission date back into a timestamp.
pub fn parse_submission_date(input: &str) -> Result<Timestamp, TimestampError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimestampError::EmptyString);
    }

    NaiveDateTime::parse_from_str(trimmed, SUBMISSION_DATE_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| TimestampError::InvalidFormat(format!("{trimmed}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_format_submission_date() {
        let dt = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 58).unwrap();
        assert_eq!(format_submission_date(&dt), "2025-12-31T23:59:58Z");
    }

    #[test]
    fn test_submission_timestamp_shape() {
        let ts = submission_timestamp();
        assert_eq!(ts.len(), 20);
        assert!(ts.ends_with('Z'));
        assert_eq!(&ts[10..11], "T");
        assert!(!ts.contains('.'));
    }

    #[test]
    fn test_submission_timestamp_is_now() {
        let before = now_utc() - Duration::seconds(1);
        let parsed = parse_submission_date(&submission_timestamp()).unwrap();
        let after = now_utc() + Duration::seconds(1);
        assert!(parsed >= before && parsed <= after);
    }

    #[test]
    fn test_parse_submission_date_errors() {
        assert!(matches!(parse_submission_date("  "), Err(TimestampError::EmptyString)));
        assert!(matches!(
            parse_submission_date("2024-01-01 10:00:00"),
            Err(TimestampError::InvalidFormat(_))
        ));
    }
}
