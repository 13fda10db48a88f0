//! Single-field profiling: type inference, cardinality, and sample values.
//!
//! The type of a field is decided from two pieces of evidence, in priority order:
//!
//! 1. **Field name**: names that denote a date (`hire_date`, `created_at`,
//!    `postedOn`) are typed [`FieldType::Date`] whatever the values look like,
//!    because date columns are routinely serialized as strings or numbers.
//! 2. **First non-null value**: its runtime kind decides between
//!    [`FieldType::Date`] (timestamps), [`FieldType::Boolean`],
//!    [`FieldType::Number`] and the [`FieldType::String`] fallback.
//!
//! A field with no non-null values at all has no evidence and is typed
//! [`FieldType::String`] with an empty sample.
//!
//! # Example
//!
//! ```rust
//! use autoviz::data::Record;
//! use autoviz::profiling::{FieldProfiler, FieldType};
//!
//! let records = vec![
//!     Record::new().with("created_at", "1700000000000"),
//!     Record::new().with("created_at", "1700000360000"),
//! ];
//!
//! let profile = FieldProfiler::new().profile("created_at", &records);
//! assert_eq!(profile.inferred_type, FieldType::Date);
//! assert_eq!(profile.unique_count, 2);
//! ```

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::types::{FieldProfile, FieldType};
use crate::data::{coerce_number, parse_flag, parse_timestamp, Record, Value, ValueKind};

static CAMEL_CASE_DATE_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    // This regex is compile-time constant and known to be valid
    #[allow(clippy::expect_used)]
    Regex::new(r"[a-z0-9](At|On)$").expect("Hard-coded regex pattern should be valid")
});

/// Configuration for field profiling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilerConfig {
    /// Maximum number of distinct sample values kept per field (default: 5)
    pub sample_limit: usize,
    /// Name suffixes that mark a date field, in addition to any name containing
    /// "date" (default: `_at`, `_on`, `timestamp`). Matched case-insensitively.
    pub date_name_suffixes: Vec<String>,
    /// Names that never take the date-name shortcut, matched case-insensitively
    /// (default: none)
    pub date_name_exclusions: Vec<String>,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            sample_limit: 5,
            date_name_suffixes: vec!["_at".to_string(), "_on".to_string(), "timestamp".to_string()],
            date_name_exclusions: Vec::new(),
        }
    }
}

/// Builder for FieldProfiler
pub struct FieldProfilerBuilder {
    config: ProfilerConfig,
}

impl FieldProfilerBuilder {
    /// Set the maximum number of sample values kept per field
    pub fn sample_limit(mut self, limit: usize) -> Self {
        self.config.sample_limit = limit;
        self
    }

    /// Add a name suffix that marks a date field
    pub fn date_name_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config
            .date_name_suffixes
            .push(suffix.into().to_lowercase());
        self
    }

    /// Exclude a field name from the date-name shortcut
    pub fn exclude_date_name(mut self, name: impl Into<String>) -> Self {
        self.config
            .date_name_exclusions
            .push(name.into().to_lowercase());
        self
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: ProfilerConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the FieldProfiler
    pub fn build(self) -> FieldProfiler {
        FieldProfiler {
            config: self.config,
        }
    }
}

/// Profiles one named field across a record collection.
#[derive(Debug, Clone, Default)]
pub struct FieldProfiler {
    config: ProfilerConfig,
}

impl FieldProfiler {
    /// Create a new builder for FieldProfiler
    pub fn builder() -> FieldProfilerBuilder {
        FieldProfilerBuilder {
            config: ProfilerConfig::default(),
        }
    }

    /// Create a FieldProfiler with default configuration
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a FieldProfiler from an existing configuration
    pub fn with_config(config: ProfilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Profiles `field_name` over every record.
    ///
    /// Records without the field, or with a null value for it, are skipped: they
    /// neither count as a distinct value nor contribute evidence to the type.
    pub fn profile(&self, field_name: &str, records: &[Record]) -> FieldProfile {
        let mut distinct: HashSet<&Value> = HashSet::new();
        let mut sample_values = Vec::new();
        let mut first_kind = None;
        let mut present_count = 0;

        for value in records.iter().map(|record| record.get(field_name)) {
            if value.is_absent() {
                continue;
            }
            present_count += 1;
            if first_kind.is_none() {
                first_kind = Some(value.kind());
            }

            if distinct.insert(value) && sample_values.len() < self.config.sample_limit {
                sample_values.push(value.clone());
            }
        }

        let inferred_type = self.infer_type(field_name, first_kind);
        let coerced_count = count_coerced(field_name, inferred_type, records);

        if coerced_count > 0 {
            warn!(
                field = field_name,
                inferred_type = %inferred_type,
                coerced = coerced_count,
                "Values do not match the inferred type and will be coerced"
            );
        }

        debug!(
            field = field_name,
            inferred_type = %inferred_type,
            unique = distinct.len(),
            present = present_count,
            "Profiled field"
        );

        FieldProfile {
            name: field_name.to_string(),
            inferred_type,
            unique_count: distinct.len(),
            sample_values,
            present_count,
            coerced_count,
        }
    }

    fn infer_type(&self, field_name: &str, first_kind: Option<ValueKind>) -> FieldType {
        let Some(kind) = first_kind else {
            return FieldType::String;
        };

        if self.is_date_name(field_name) {
            return FieldType::Date;
        }

        match kind {
            ValueKind::Timestamp => FieldType::Date,
            ValueKind::Flag => FieldType::Boolean,
            ValueKind::Number => FieldType::Number,
            ValueKind::Text | ValueKind::Absent => FieldType::String,
        }
    }

    /// True when the field name alone marks a date field.
    pub fn is_date_name(&self, field_name: &str) -> bool {
        let lower = field_name.to_lowercase();
        if self
            .config
            .date_name_exclusions
            .iter()
            .any(|name| name.to_lowercase() == lower)
        {
            return false;
        }

        lower.contains("date")
            || self
                .config
                .date_name_suffixes
                .iter()
                .any(|suffix| lower.ends_with(&suffix.to_lowercase()))
            || CAMEL_CASE_DATE_SUFFIX.is_match(field_name)
    }
}

fn count_coerced(field_name: &str, inferred_type: FieldType, records: &[Record]) -> usize {
    let present = records
        .iter()
        .map(|record| record.get(field_name))
        .filter(|value| !value.is_absent());

    match inferred_type {
        FieldType::String => 0,
        FieldType::Number => present.filter(|v| coerce_number(v).is_coerced()).count(),
        FieldType::Boolean => present.filter(|v| parse_flag(v).is_none()).count(),
        FieldType::Date => present.filter(|v| parse_timestamp(v).is_none()).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records_with(field: &str, values: Vec<Value>) -> Vec<Record> {
        values
            .into_iter()
            .map(|v| Record::new().with(field, v))
            .collect()
    }

    #[test]
    fn test_profiler_config_builder() {
        let profiler = FieldProfiler::builder()
            .sample_limit(3)
            .date_name_suffix("_TIME")
            .exclude_date_name("Candidate")
            .build();

        assert_eq!(profiler.config.sample_limit, 3);
        assert!(profiler
            .config
            .date_name_suffixes
            .contains(&"_time".to_string()));
        assert_eq!(profiler.config.date_name_exclusions, vec!["candidate"]);
    }

    #[test]
    fn test_type_inference_from_first_value() {
        let profiler = FieldProfiler::new();

        let numbers = records_with("amount", vec![Value::from(1), Value::from("x")]);
        assert_eq!(profiler.profile("amount", &numbers).inferred_type, FieldType::Number);

        let flags = records_with("remote", vec![Value::from(true), Value::from(false)]);
        assert_eq!(profiler.profile("remote", &flags).inferred_type, FieldType::Boolean);

        let text = records_with("stage", vec![Value::from("Screen"), Value::from(3)]);
        assert_eq!(profiler.profile("stage", &text).inferred_type, FieldType::String);
    }

    #[test]
    fn test_first_non_null_value_decides() {
        let profiler = FieldProfiler::new();
        let records = vec![
            Record::new().with("score", Value::Absent),
            Record::new().with("other", 1),
            Record::new().with("score", 7),
            Record::new().with("score", "seven"),
        ];

        let profile = profiler.profile("score", &records);
        assert_eq!(profile.inferred_type, FieldType::Number);
        assert_eq!(profile.present_count, 2);
        assert_eq!(profile.coerced_count, 1);
    }

    #[test]
    fn test_date_name_outranks_value_kind() {
        let profiler = FieldProfiler::new();
        let records = records_with(
            "created_at",
            vec![Value::from("1700000000000"), Value::from("1700000360000")],
        );

        let profile = profiler.profile("created_at", &records);
        assert_eq!(profile.inferred_type, FieldType::Date);
        assert_eq!(profile.coerced_count, 0);
    }

    #[test]
    fn test_date_name_heuristic() {
        let profiler = FieldProfiler::new();

        assert!(profiler.is_date_name("hire_date"));
        assert!(profiler.is_date_name("DateApplied"));
        assert!(profiler.is_date_name("created_at"));
        assert!(profiler.is_date_name("posted_on"));
        assert!(profiler.is_date_name("event_timestamp"));
        assert!(profiler.is_date_name("updatedAt"));
        assert!(profiler.is_date_name("postedOn"));

        assert!(!profiler.is_date_name("status"));
        assert!(!profiler.is_date_name("location"));
        assert!(!profiler.is_date_name("At"));
        assert!(!profiler.is_date_name("salary"));
    }

    #[test]
    fn test_date_name_exclusions() {
        let default_profiler = FieldProfiler::new();
        assert!(default_profiler.is_date_name("candidate"));

        let profiler = FieldProfiler::builder().exclude_date_name("candidate").build();
        assert!(!profiler.is_date_name("Candidate"));
        assert!(profiler.is_date_name("candidate_date"));
    }

    #[test]
    fn test_mixed_case_config_entries() {
        let profiler = FieldProfiler::with_config(ProfilerConfig {
            date_name_suffixes: vec!["_at".to_string(), "_Time".to_string()],
            date_name_exclusions: vec!["Candidate".to_string()],
            ..ProfilerConfig::default()
        });
        assert!(!profiler.is_date_name("candidate"));
        assert!(!profiler.is_date_name("CANDIDATE"));
        assert!(profiler.is_date_name("start_time"));
        assert!(profiler.is_date_name("END_TIME"));
    }

    #[test]
    fn test_timestamp_values_infer_date() {
        let profiler = FieldProfiler::new();
        let ts = chrono::DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let records = records_with("interview", vec![Value::from(ts)]);

        assert_eq!(profiler.profile("interview", &records).inferred_type, FieldType::Date);
    }

    #[test]
    fn test_no_evidence_defaults_to_string() {
        let profiler = FieldProfiler::new();
        let records = vec![
            Record::new().with("created_at", Value::Absent),
            Record::new().with("other", 1),
        ];

        let profile = profiler.profile("created_at", &records);
        assert_eq!(profile.inferred_type, FieldType::String);
        assert_eq!(profile.unique_count, 0);
        assert!(profile.sample_values.is_empty());
        assert!(!profile.has_evidence());
    }

    #[test]
    fn test_sample_values_first_seen_distinct() {
        let profiler = FieldProfiler::new();
        let values = ["b", "a", "b", "c", "d", "a", "e", "f", "g"]
            .into_iter()
            .map(Value::from)
            .collect();
        let records = records_with("letter", values);

        let profile = profiler.profile("letter", &records);
        assert_eq!(profile.unique_count, 7);
        assert_eq!(
            profile.sample_values,
            vec![
                Value::from("b"),
                Value::from("a"),
                Value::from("c"),
                Value::from("d"),
                Value::from("e"),
            ]
        );
    }

    #[test]
    fn test_coerced_counts_per_type() {
        let profiler = FieldProfiler::new();

        let flags = records_with(
            "remote",
            vec![Value::from(true), Value::from("yes"), Value::from("sometimes")],
        );
        assert_eq!(profiler.profile("remote", &flags).coerced_count, 1);

        let dates = records_with(
            "start_date",
            vec![Value::from("2024-01-01"), Value::from("TBD"), Value::Absent],
        );
        assert_eq!(profiler.profile("start_date", &dates).coerced_count, 1);

        let text = records_with("name", vec![Value::from("Ada"), Value::from(3)]);
        assert_eq!(profiler.profile("name", &text).coerced_count, 0);
    }
}
