//! Whole-dataset profiling.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::field::FieldProfiler;
use super::types::{FieldProfile, FieldType};
use crate::data::Record;

/// Ordered field profiles for one record collection.
///
/// Fields appear in the key order of the first record. Each field is profiled
/// over the entire collection, so sparse fields that are missing from some
/// records are still fully described.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetProfile {
    pub fields: Vec<FieldProfile>,
    pub record_count: usize,
}

impl DatasetProfile {
    /// Profiles every field with the default [`FieldProfiler`].
    ///
    /// An empty collection yields an empty profile, which callers treat as
    /// "no data" and do not plan.
    pub fn build(records: &[Record]) -> Self {
        Self::build_with(&FieldProfiler::new(), records)
    }

    /// Profiles every field with the given profiler.
    #[instrument(skip(profiler, records), fields(records = records.len()))]
    pub fn build_with(profiler: &FieldProfiler, records: &[Record]) -> Self {
        let Some(first) = records.first() else {
            debug!("No records to profile");
            return Self::default();
        };

        let fields: Vec<FieldProfile> = first
            .field_names()
            .map(|name| profiler.profile(name, records))
            .collect();

        debug!(fields = fields.len(), "Built dataset profile");

        Self {
            fields,
            record_count: records.len(),
        }
    }

    /// Looks up a field profile by name.
    pub fn get(&self, name: &str) -> Option<&FieldProfile> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldProfile> {
        self.fields.iter()
    }

    /// Fields of the given type, in column order.
    pub fn fields_of_type(&self, field_type: FieldType) -> impl Iterator<Item = &FieldProfile> {
        self.fields
            .iter()
            .filter(move |field| field.inferred_type == field_type)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a DatasetProfile {
    type Item = &'a FieldProfile;
    type IntoIter = std::slice::Iter<'a, FieldProfile>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
