//! Permissive coercions from record values to the types the engine aggregates.
//!
//! Coercion never fails. A value that cannot be read as the requested type is
//! replaced by a safe default and reported as coerced, so callers can count
//! how much data was silently substituted.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use super::value::Value;

static NUMERIC_PREFIX: Lazy<Regex> = Lazy::new(|| {
    // This regex is compile-time constant and known to be valid
    #[allow(clippy::expect_used)]
    Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?")
        .expect("Hard-coded regex pattern should be valid")
});

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Outcome of reading a value as a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericCoercion {
    /// The value was read as a finite number.
    Parsed(f64),
    /// The value was present but unreadable; it counts as zero.
    Fallback,
    /// The value was absent; it counts as zero.
    Missing,
}

impl NumericCoercion {
    /// The number to aggregate: the parsed value, or zero.
    pub fn value(self) -> f64 {
        match self {
            NumericCoercion::Parsed(n) => n,
            NumericCoercion::Fallback | NumericCoercion::Missing => 0.0,
        }
    }

    /// True when a present value had to be replaced by zero.
    pub fn is_coerced(self) -> bool {
        matches!(self, NumericCoercion::Fallback)
    }
}

/// Reads a value as a number.
///
/// Text goes through [`parse_number_permissive`]. Flags and timestamps are not
/// numbers and fall back to zero.
pub fn coerce_number(value: &Value) -> NumericCoercion {
    match value {
        Value::Number(n) if n.is_finite() => NumericCoercion::Parsed(*n),
        Value::Text(s) => {
            parse_number_permissive(s).map_or(NumericCoercion::Fallback, NumericCoercion::Parsed)
        }
        Value::Absent => NumericCoercion::Missing,
        _ => NumericCoercion::Fallback,
    }
}

/// Parses loosely formatted numeric text.
///
/// Accepts surrounding whitespace, a leading currency symbol, `,` digit
/// grouping and a trailing `%`. If the cleaned text still is not a number, the
/// longest numeric prefix is used (`"12 years"` reads as `12`). Returns `None`
/// when no finite number can be found.
pub fn parse_number_permissive(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let unprefixed = trimmed.trim_start_matches(['$', '€', '£', '¥']);
    let cleaned: String = unprefixed.chars().filter(|c| *c != ',').collect();
    let cleaned = cleaned.strip_suffix('%').unwrap_or(&cleaned).trim_end();

    if let Ok(n) = cleaned.parse::<f64>() {
        if n.is_finite() {
            return Some(n);
        }
    }

    NUMERIC_PREFIX
        .find(cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

/// Reads a value as a boolean, if it has a recognizable boolean form.
pub fn parse_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Flag(b) => Some(*b),
        Value::Number(n) if *n == 1.0 => Some(true),
        Value::Number(n) if *n == 0.0 => Some(false),
        Value::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "1" => Some(true),
            "false" | "no" | "n" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Reads a value as a boolean, defaulting to `false`.
pub fn coerce_flag(value: &Value) -> bool {
    parse_flag(value).unwrap_or(false)
}

/// Reads a value as a point in time.
///
/// Numbers (and numeric text) are epoch milliseconds. Text is tried as
/// RFC 3339, then as a naive date-time, then as a plain date at midnight UTC.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Timestamp(ts) => Some(*ts),
        Value::Number(n) => from_epoch_millis(*n),
        Value::Text(s) => parse_timestamp_text(s.trim()),
        Value::Flag(_) | Value::Absent => None,
    }
}

fn from_epoch_millis(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64)
}

fn parse_timestamp_text(text: &str) -> Option<DateTime<Utc>> {
    if text.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }

    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }

    text.parse::<f64>().ok().and_then(from_epoch_millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_coerce_number_kinds() {
        assert_eq!(coerce_number(&Value::from(42)), NumericCoercion::Parsed(42.0));
        assert_eq!(coerce_number(&Value::from("17.5")), NumericCoercion::Parsed(17.5));
        assert_eq!(coerce_number(&Value::from("N/A")), NumericCoercion::Fallback);
        assert_eq!(coerce_number(&Value::from(true)), NumericCoercion::Fallback);
        assert_eq!(coerce_number(&Value::Absent), NumericCoercion::Missing);
        assert_eq!(coerce_number(&Value::Number(f64::NAN)), NumericCoercion::Fallback);
    }

    #[test]
    fn test_coercion_values() {
        assert_eq!(NumericCoercion::Fallback.value(), 0.0);
        assert_eq!(NumericCoercion::Missing.value(), 0.0);
        assert!(NumericCoercion::Fallback.is_coerced());
        assert!(!NumericCoercion::Missing.is_coerced());
        assert!(!NumericCoercion::Parsed(1.0).is_coerced());
    }

    #[test]
    fn test_permissive_number_parsing() {
        assert_eq!(parse_number_permissive(" 12 "), Some(12.0));
        assert_eq!(parse_number_permissive("$120,000"), Some(120_000.0));
        assert_eq!(parse_number_permissive("45%"), Some(45.0));
        assert_eq!(parse_number_permissive("12 years"), Some(12.0));
        assert_eq!(parse_number_permissive("-3.5e2"), Some(-350.0));
        assert_eq!(parse_number_permissive(".5"), Some(0.5));
        assert_eq!(parse_number_permissive("N/A"), None);
        assert_eq!(parse_number_permissive("NaN"), None);
        assert_eq!(parse_number_permissive("inf"), None);
        assert_eq!(parse_number_permissive(""), None);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag(&Value::from(true)), Some(true));
        assert_eq!(parse_flag(&Value::from("Yes")), Some(true));
        assert_eq!(parse_flag(&Value::from("false")), Some(false));
        assert_eq!(parse_flag(&Value::from(0)), Some(false));
        assert_eq!(parse_flag(&Value::from("maybe")), None);
        assert!(!coerce_flag(&Value::from("maybe")));
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let rfc = parse_timestamp(&Value::from("2024-03-01T09:30:00+02:00")).unwrap();
        assert_eq!(rfc.hour(), 7);

        let naive = parse_timestamp(&Value::from("2024-03-01 09:30:00")).unwrap();
        assert_eq!(naive.hour(), 9);

        let date = parse_timestamp(&Value::from("2024-03-01")).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 3, 1));

        let us = parse_timestamp(&Value::from("03/15/2024")).unwrap();
        assert_eq!((us.month(), us.day()), (3, 15));

        let epoch = parse_timestamp(&Value::from(86_400_000)).unwrap();
        assert_eq!(epoch.day(), 2);

        let epoch_text = parse_timestamp(&Value::from("86400000")).unwrap();
        assert_eq!(epoch_text, epoch);

        assert!(parse_timestamp(&Value::from("soon")).is_none());
        assert!(parse_timestamp(&Value::from(true)).is_none());
        assert!(parse_timestamp(&Value::Absent).is_none());
    }
}
