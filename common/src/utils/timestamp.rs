//! Display formatting for message timestamps.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, Utc};

use crate::models::Timestamp;

/// Shown in place of a timestamp the API sent in an unknown form.
pub const INVALID_DATE: &str = "Invalid Date";

/// Default display pattern, e.g. `3/1/2024, 10:00:00 AM`.
pub const DEFAULT_PATTERN: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

const NAIVE_PATTERNS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// How timestamps are rendered for the reader.
#[derive(Debug, Clone)]
pub struct TimestampFormat {
    pattern: String,
    offset: FixedOffset,
}

impl TimestampFormat {
    /// Creates a format from a chrono strftime pattern and display offset.
    ///
    /// # Errors
    /// Returns a description of the problem if `pattern` is not a valid
    /// strftime pattern.
    pub fn new(pattern: impl Into<String>, offset: FixedOffset) -> Result<Self, String> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(format!("invalid time format pattern: {}", pattern));
        }
        Ok(Self { pattern, offset })
    }

    /// Default pattern rendered in UTC.
    pub fn utc() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            offset: Utc.fix(),
        }
    }

    /// Formats a message timestamp, or [`INVALID_DATE`] if it cannot be parsed.
    pub fn format(&self, timestamp: &Timestamp) -> String {
        match parse_timestamp(timestamp) {
            Some(instant) => {
                let mut out = String::new();
                let local = instant.with_timezone(&self.offset);
                // Pattern validated in `new`, so formatting cannot fail.
                let _ = write!(out, "{}", local.format(&self.pattern));
                out
            }
            None => INVALID_DATE.to_string(),
        }
    }
}

/// Interprets a wire timestamp. Strings without an offset are taken as UTC.
pub fn parse_timestamp(timestamp: &Timestamp) -> Option<DateTime<Utc>> {
    match timestamp {
        Timestamp::Millis(ms) => DateTime::from_timestamp_millis(*ms),
        Timestamp::Text(text) => {
            let text = text.trim();
            if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
                return Some(parsed.with_timezone(&Utc));
            }
            for pattern in NAIVE_PATTERNS {
                if let Ok(naive) = NaiveDateTime::parse_from_str(text, pattern) {
                    return Some(naive.and_utc());
                }
            }
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        }
        Timestamp::Other(serde_json::Value::Number(n)) => n
            .as_f64()
            .filter(|ms| ms.is_finite() && ms.abs() <= i64::MAX as f64)
            .and_then(|ms| DateTime::from_timestamp_millis(ms.trunc() as i64)),
        Timestamp::Other(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Timestamp::Text("2024-03-01T10:00:00Z".into()), "3/1/2024, 10:00:00 AM")]
    #[case(Timestamp::Text("2024-03-01T10:00:00.000Z".into()), "3/1/2024, 10:00:00 AM")]
    #[case(Timestamp::Text("2024-03-01T12:00:00+02:00".into()), "3/1/2024, 10:00:00 AM")]
    #[case(Timestamp::Text("2024-03-01 22:05:09".into()), "3/1/2024, 10:05:09 PM")]
    #[case(Timestamp::Text("2024-03-01".into()), "3/1/2024, 12:00:00 AM")]
    #[case(Timestamp::Millis(1_709_287_200_000), "3/1/2024, 10:00:00 AM")]
    #[case(Timestamp::Other(serde_json::json!(1_709_287_200_000.7)), "3/1/2024, 10:00:00 AM")]
    fn test_format_utc(#[case] timestamp: Timestamp, #[case] expected: &str) {
        assert_eq!(TimestampFormat::utc().format(&timestamp), expected);
    }

    #[test]
    fn test_unparseable_is_invalid_date() {
        let ts = Timestamp::Text("yesterday".into());
        assert_eq!(TimestampFormat::utc().format(&ts), INVALID_DATE);
    }

    #[rstest]
    #[case(Timestamp::Other(serde_json::Value::Null))]
    #[case(Timestamp::Other(serde_json::json!(true)))]
    #[case(Timestamp::Other(serde_json::json!({ "seconds": 1 })))]
    #[case(Timestamp::Other(serde_json::json!(1e300)))]
    fn test_other_values_are_invalid_date(#[case] timestamp: Timestamp) {
        assert_eq!(TimestampFormat::utc().format(&timestamp), INVALID_DATE);
    }

    #[test]
    fn test_offset_is_applied() {
        let offset = FixedOffset::east_opt(8 * 3600).unwrap();
        let format = TimestampFormat::new("%Y-%m-%d %H:%M", offset).unwrap();
        let ts = Timestamp::Text("2024-03-01T20:30:00Z".into());
        assert_eq!(format.format(&ts), "2024-03-02 04:30");
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let offset = FixedOffset::east_opt(0).unwrap();
        assert!(TimestampFormat::new("%Y-%", offset).is_err());
    }
}
