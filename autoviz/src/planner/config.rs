//! Thresholds and name hints that parameterize the planning rules.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VizError};

/// Configuration for the visualization planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// A string field is categorical when it has fewer distinct values than this (default: 20)
    pub category_limit: usize,
    /// Maximum number of numeric fields summarized as KPI cards (default: 4)
    pub max_kpi_fields: usize,
    /// Maximum distinct values per axis of the co-occurrence matrix (default: 5)
    pub matrix_side: usize,
    /// Number of entries kept in the geographic ranking (default: 10)
    pub geo_top_n: usize,
    /// Name fragments that mark a status field (default: "status", "state")
    pub status_hints: Vec<String>,
    /// Name fragments that mark a location field (default: "location", "city", "state")
    pub geo_hints: Vec<String>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            category_limit: 20,
            max_kpi_fields: 4,
            matrix_side: 5,
            geo_top_n: 10,
            status_hints: vec!["status".to_string(), "state".to_string()],
            geo_hints: vec![
                "location".to_string(),
                "city".to_string(),
                "state".to_string(),
            ],
        }
    }
}

impl PlannerConfig {
    /// Sets the categorical cardinality limit.
    pub fn with_category_limit(mut self, limit: usize) -> Self {
        self.category_limit = limit;
        self
    }

    /// Sets how many numeric fields get KPI cards.
    pub fn with_max_kpi_fields(mut self, max: usize) -> Self {
        self.max_kpi_fields = max;
        self
    }

    /// Sets the co-occurrence matrix side length.
    pub fn with_matrix_side(mut self, side: usize) -> Self {
        self.matrix_side = side;
        self
    }

    /// Sets the number of ranked locations.
    pub fn with_geo_top_n(mut self, top_n: usize) -> Self {
        self.geo_top_n = top_n;
        self
    }

    /// Replaces the status name hints.
    pub fn with_status_hints<I, S>(mut self, hints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.status_hints = hints.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the location name hints.
    pub fn with_geo_hints<I, S>(mut self, hints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.geo_hints = hints.into_iter().map(Into::into).collect();
        self
    }

    /// Checks that every limit is usable.
    pub fn validate(&self) -> Result<()> {
        let limits = [
            ("category_limit", self.category_limit),
            ("max_kpi_fields", self.max_kpi_fields),
            ("matrix_side", self.matrix_side),
            ("geo_top_n", self.geo_top_n),
        ];
        if let Some((name, _)) = limits.iter().find(|(_, value)| *value == 0) {
            return Err(VizError::invalid_config(format!(
                "{name} must be greater than zero"
            )));
        }
        if self.status_hints.iter().all(|h| h.trim().is_empty()) {
            return Err(VizError::invalid_config(
                "status_hints must contain at least one non-empty hint",
            ));
        }
        if self.geo_hints.iter().all(|h| h.trim().is_empty()) {
            return Err(VizError::invalid_config(
                "geo_hints must contain at least one non-empty hint",
            ));
        }
        Ok(())
    }
}

/// Case-insensitive check for any hint occurring in `name`.
pub(crate) fn name_matches_any(name: &str, hints: &[String]) -> bool {
    let lower = name.to_lowercase();
    hints
        .iter()
        .map(|hint| hint.trim().to_lowercase())
        .any(|hint| !hint.is_empty() && lower.contains(&hint))
}
