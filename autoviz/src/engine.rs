//! One-call profiling and planning.
//!
//! [`AutoVisualizer`] wires a [`FieldProfiler`] and a [`VisualizationPlanner`]
//! together and reports why a dataset produced no plans, so callers can show
//! a "no data" state distinct from a "nothing applicable" state.
//!
//! ```rust
//! use autoviz::data::Record;
//! use autoviz::engine::{AnalysisOutcome, AutoVisualizer};
//!
//! let records = vec![
//!     Record::new().with("stage", "Screen").with("score", 3),
//!     Record::new().with("stage", "Offer").with("score", 5),
//! ];
//!
//! let analysis = AutoVisualizer::new().analyze(&records);
//! assert_eq!(analysis.outcome, AnalysisOutcome::Planned { count: 3 });
//!
//! let empty = AutoVisualizer::new().analyze(&[]);
//! assert_eq!(empty.outcome, AnalysisOutcome::EmptyInput);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::config::EngineConfig;
use crate::data::Record;
use crate::error::Result;
use crate::logging::{truncate_field, LogConfig};
use crate::planner::{PlanKind, VisualizationPlan, VisualizationPlanner};
use crate::profiling::{DatasetProfile, FieldProfiler};

/// Why an analysis produced the plans it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    /// The record collection was empty
    EmptyInput,
    /// Records were present but no rule's trigger condition held
    NoApplicableRule,
    /// At least one plan was produced
    Planned { count: usize },
}

impl AnalysisOutcome {
    fn classify(record_count: usize, plan_count: usize) -> Self {
        match (record_count, plan_count) {
            (0, _) => AnalysisOutcome::EmptyInput,
            (_, 0) => AnalysisOutcome::NoApplicableRule,
            (_, count) => AnalysisOutcome::Planned { count },
        }
    }

    /// True when there is nothing to render.
    pub fn is_empty(&self) -> bool {
        !matches!(self, AnalysisOutcome::Planned { .. })
    }
}

/// The profile and plans derived from one record collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub profile: DatasetProfile,
    pub plans: Vec<VisualizationPlan>,
    pub outcome: AnalysisOutcome,
}

impl Analysis {
    /// Kinds of the produced plans, in rule order.
    pub fn plan_kinds(&self) -> Vec<PlanKind> {
        self.plans.iter().map(VisualizationPlan::kind).collect()
    }

    /// The first plan of the given kind, if one was produced.
    pub fn plan_of_kind(&self, kind: PlanKind) -> Option<&VisualizationPlan> {
        self.plans.iter().find(|plan| plan.kind() == kind)
    }
}

/// Builder for [`AutoVisualizer`]
#[derive(Debug, Default)]
pub struct AutoVisualizerBuilder {
    profiler: Option<FieldProfiler>,
    planner: Option<VisualizationPlanner>,
    log_config: LogConfig,
}

impl AutoVisualizerBuilder {
    /// Use a custom field profiler
    pub fn profiler(mut self, profiler: FieldProfiler) -> Self {
        self.profiler = Some(profiler);
        self
    }

    /// Use a custom planner, e.g. one with additional rules
    pub fn planner(mut self, planner: VisualizationPlanner) -> Self {
        self.planner = Some(planner);
        self
    }

    /// Set the logging verbosity of the analysis
    pub fn log_config(mut self, log_config: LogConfig) -> Self {
        self.log_config = log_config;
        self
    }

    /// Build the visualizer
    pub fn build(self) -> AutoVisualizer {
        AutoVisualizer {
            profiler: self.profiler.unwrap_or_default(),
            planner: self.planner.unwrap_or_default(),
            log_config: self.log_config,
        }
    }
}

/// Profiles a record collection and plans visualizations for it.
#[derive(Debug, Default)]
pub struct AutoVisualizer {
    profiler: FieldProfiler,
    planner: VisualizationPlanner,
    log_config: LogConfig,
}

impl AutoVisualizer {
    /// Create a visualizer with default profiling and the built-in rules
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> AutoVisualizerBuilder {
        AutoVisualizerBuilder::default()
    }

    /// Create a visualizer from a validated engine configuration
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::builder()
            .profiler(FieldProfiler::with_config(config.profiler.clone()))
            .planner(VisualizationPlanner::with_config(config.planner.clone()))
            .build())
    }

    pub fn profiler(&self) -> &FieldProfiler {
        &self.profiler
    }

    pub fn planner(&self) -> &VisualizationPlanner {
        &self.planner
    }

    pub fn log_config(&self) -> &LogConfig {
        &self.log_config
    }

    /// Profiles `records` and runs every planning rule over the profile.
    ///
    /// Never fails: empty input and inapplicable rules are reported through
    /// [`Analysis::outcome`].
    #[instrument(skip(self, records), fields(records = records.len()))]
    pub fn analyze(&self, records: &[Record]) -> Analysis {
        let profile = DatasetProfile::build_with(&self.profiler, records);
        let plans = self.planner.plan(&profile, records);
        let outcome = AnalysisOutcome::classify(records.len(), plans.len());

        if self.log_config.log_field_details {
            for field in &profile {
                debug!(
                    field = %truncate_field(&field.name, self.log_config.max_field_length),
                    inferred_type = %field.inferred_type,
                    unique = field.unique_count,
                    coerced = field.coerced_count,
                    "Field summary"
                );
            }
        }
        if self.log_config.log_rule_details {
            for plan in &plans {
                debug!(kind = %plan.kind(), items = plan.item_count(), "Plan produced");
            }
        }

        info!(
            fields = profile.len(),
            plans = plans.len(),
            outcome = ?outcome,
            "Analysis complete"
        );

        Analysis {
            profile,
            plans,
            outcome,
        }
    }
}
