//! Read-only view of a dataset handed to each planning rule.
//!
//! Every "first qualifying field" choice goes through the helpers here, which
//! scan the profile strictly left to right in column order. That scan order is
//! the tie-break rule whenever several fields qualify.

use super::config::{name_matches_any, PlannerConfig};
use crate::data::Record;
use crate::profiling::{DatasetProfile, FieldProfile, FieldType};

/// Inputs shared by all planning rules for one planning pass.
#[derive(Debug, Clone, Copy)]
pub struct PlanningContext<'a> {
    pub profile: &'a DatasetProfile,
    pub records: &'a [Record],
    pub config: &'a PlannerConfig,
}

impl<'a> PlanningContext<'a> {
    pub fn new(
        profile: &'a DatasetProfile,
        records: &'a [Record],
        config: &'a PlannerConfig,
    ) -> Self {
        Self {
            profile,
            records,
            config,
        }
    }

    /// Number of records in the collection being planned.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Numeric fields, in column order.
    pub fn number_fields(&self) -> impl Iterator<Item = &'a FieldProfile> {
        self.profile.fields_of_type(FieldType::Number)
    }

    /// Date fields, in column order.
    pub fn date_fields(&self) -> impl Iterator<Item = &'a FieldProfile> {
        self.profile.fields_of_type(FieldType::Date)
    }

    /// String fields under the categorical cardinality limit, in column order.
    pub fn categorical_fields(&self) -> impl Iterator<Item = &'a FieldProfile> {
        let limit = self.config.category_limit;
        self.profile
            .iter()
            .filter(move |field| field.is_categorical(limit))
    }

    /// The first string field whose name contains one of `hints`.
    pub fn first_string_field_named(&self, hints: &[String]) -> Option<&'a FieldProfile> {
        self.profile
            .fields_of_type(FieldType::String)
            .find(|field| name_matches_any(&field.name, hints))
    }

    /// The first field of any type whose name contains one of `hints`.
    pub fn first_field_named(&self, hints: &[String]) -> Option<&'a FieldProfile> {
        self.profile
            .iter()
            .find(|field| name_matches_any(&field.name, hints))
    }
}
