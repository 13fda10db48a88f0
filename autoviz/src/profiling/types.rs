//! Types produced by field profiling.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::Value;

/// Semantic type inferred for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    /// Numeric measures (amounts, scores, counts)
    Number,
    /// Free text or categorical labels; also the default when there is no evidence
    String,
    /// Dates and timestamps
    Date,
    /// True/false flags
    Boolean,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Number => "Number",
            FieldType::String => "String",
            FieldType::Date => "Date",
            FieldType::Boolean => "Boolean",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inferred type and summary statistics for one field across a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldProfile {
    /// Field name as it appears in the records
    pub name: String,
    /// Exactly one semantic type per field
    pub inferred_type: FieldType,
    /// Number of distinct non-null values
    pub unique_count: usize,
    /// First distinct non-null values, in first-seen order
    pub sample_values: Vec<Value>,
    /// Number of records holding a non-null value for this field
    pub present_count: usize,
    /// Non-null values that do not fit `inferred_type` and are replaced by a
    /// default (zero, `false`) when aggregated
    pub coerced_count: usize,
}

impl FieldProfile {
    /// True when the field is a string with fewer than `limit` distinct values.
    pub fn is_categorical(&self, limit: usize) -> bool {
        self.inferred_type == FieldType::String && self.unique_count < limit
    }

    /// True when at least one record holds a value for this field.
    pub fn has_evidence(&self) -> bool {
        self.present_count > 0
    }
}
