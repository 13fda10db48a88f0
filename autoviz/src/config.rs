//! Engine-wide configuration.
//!
//! Every section uses `#[serde(default)]`, so a JSON document only needs to
//! name the values it changes:
//!
//! ```rust
//! use autoviz::config::EngineConfig;
//!
//! let config = EngineConfig::from_json_str(r#"{"planner": {"geo_top_n": 5}}"#).unwrap();
//! assert_eq!(config.planner.geo_top_n, 5);
//! assert_eq!(config.planner.category_limit, 20);
//! assert_eq!(config.profiler.sample_limit, 5);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, VizError};
use crate::planner::PlannerConfig;
use crate::profiling::ProfilerConfig;

/// Main configuration for the profiling and planning engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Field profiling configuration
    pub profiler: ProfilerConfig,

    /// Visualization planning configuration
    pub planner: PlannerConfig,
}

impl EngineConfig {
    /// Parses and validates a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every section for unusable values.
    pub fn validate(&self) -> Result<()> {
        if self.profiler.sample_limit == 0 {
            return Err(VizError::invalid_config(
                "sample_limit must be greater than zero",
            ));
        }
        if self
            .profiler
            .date_name_suffixes
            .iter()
            .any(|suffix| suffix.trim().is_empty())
        {
            return Err(VizError::invalid_config(
                "date_name_suffixes must not contain empty suffixes",
            ));
        }
        self.planner.validate()
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
