//! Records and record collections.

use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::value::Value;
use crate::error::{Result, VizError};

static ABSENT: Value = Value::Absent;
static NEXT_DATASET_ID: AtomicU64 = AtomicU64::new(1);

/// One row of input data: field name to scalar value, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets a field, keeping the original position if it already exists.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Returns the value of a field; missing fields read as [`Value::Absent`].
    pub fn get(&self, name: &str) -> &Value {
        self.fields.get(name).unwrap_or(&ABSENT)
    }

    /// Field names in insertion order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Converts a JSON object into a record.
    ///
    /// `null` becomes [`Value::Absent`]. Nested arrays and objects are not
    /// scalars; they are kept as text holding their compact JSON encoding.
    pub fn from_json_object(object: serde_json::Map<String, serde_json::Value>) -> Self {
        let fields = object
            .into_iter()
            .map(|(name, value)| {
                let value = match value {
                    serde_json::Value::Null => Value::Absent,
                    serde_json::Value::Bool(b) => Value::Flag(b),
                    serde_json::Value::Number(n) => n.as_f64().map_or(Value::Absent, Value::Number),
                    serde_json::Value::String(s) => Value::Text(s),
                    nested @ (serde_json::Value::Array(_) | serde_json::Value::Object(_)) => {
                        debug!(field = %name, "Flattening nested JSON value to text");
                        Value::Text(nested.to_string())
                    }
                };
                (name, value)
            })
            .collect();
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Identity of one version of a dataset.
///
/// Two keys are equal only if they name the same dataset at the same version,
/// which makes the key suitable for memoizing derived results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DatasetKey {
    pub id: u64,
    pub version: u64,
}

/// An ordered record collection with an explicit identity and version.
///
/// Replacing the records bumps the version; anything derived from an older
/// version must be recomputed rather than patched.
#[derive(Debug, Clone)]
pub struct Dataset {
    id: u64,
    version: u64,
    records: Vec<Record>,
}

impl Dataset {
    /// Wraps a record collection under a fresh identity.
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            id: NEXT_DATASET_ID.fetch_add(1, Ordering::Relaxed),
            version: 0,
            records,
        }
    }

    /// Parses a JSON array of objects.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_json_value(value)
    }

    /// Converts a JSON array of objects.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        let serde_json::Value::Array(items) = value else {
            return Err(VizError::invalid_input(
                "expected a JSON array of record objects",
            ));
        };

        let records = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                serde_json::Value::Object(object) => Ok(Record::from_json_object(object)),
                other => Err(VizError::invalid_input(format!(
                    "element {index} is not an object: {other}"
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(records))
    }

    /// Replaces the records after a new fetch and bumps the version.
    pub fn replace_records(&mut self, records: Vec<Record>) {
        self.records = records;
        self.version += 1;
        debug!(
            dataset_id = self.id,
            version = self.version,
            records = self.records.len(),
            "Dataset records replaced"
        );
    }

    pub fn key(&self) -> DatasetKey {
        DatasetKey {
            id: self.id,
            version: self.version,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
