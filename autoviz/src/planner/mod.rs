//! Rule-based selection and aggregation of visualizations.
//!
//! ## Architecture
//!
//! The planner consists of:
//! - `PlanningRule` trait for implementing one trigger + aggregation pair
//! - `VisualizationPlan` enum representing one self-contained chart description
//! - Seven built-in rules: KPI cards, category bar, distribution, timeline,
//!   co-occurrence matrix, status board, geographic ranking
//! - `VisualizationPlanner` for running the rules in order
//!
//! Rules are additive, not exclusive. A dataset that triggers no rule yields
//! an empty plan list, which is a valid "nothing to show" answer rather than
//! an error.
//!
//! ## Example Usage
//!
//! ```rust
//! use autoviz::data::Record;
//! use autoviz::planner::{PlanKind, VisualizationPlanner};
//! use autoviz::profiling::DatasetProfile;
//!
//! let records = vec![
//!     Record::new().with("type", "A").with("n", 1),
//!     Record::new().with("type", "B").with("n", 2),
//!     Record::new().with("type", "A").with("n", 3),
//! ];
//!
//! let profile = DatasetProfile::build(&records);
//! let plans = VisualizationPlanner::new().plan(&profile, &records);
//!
//! let kinds: Vec<_> = plans.iter().map(|p| p.kind()).collect();
//! assert_eq!(
//!     kinds,
//!     vec![PlanKind::KpiCards, PlanKind::CategoryBar, PlanKind::Distribution]
//! );
//! ```

pub mod aggregate;
pub mod config;
pub mod context;
pub mod plan;
pub mod rules;

use std::fmt;

use tracing::{debug, instrument};

pub use config::PlannerConfig;
pub use context::PlanningContext;
pub use plan::{
    KpiCard, LabeledCount, LabeledValue, PlanKind, RankedEntry, ShareEntry, TimelinePoint,
    VisualizationPlan,
};
pub use rules::{
    default_rules, CategoryBarRule, CoOccurrenceRule, DistributionRule, GeoRankingRule,
    KpiCardsRule, PlanningRule, StatusBoardRule, TimelineRule,
};

use crate::data::Record;
use crate::profiling::DatasetProfile;

/// Runs an ordered list of planning rules over a profiled dataset.
pub struct VisualizationPlanner {
    rules: Vec<Box<dyn PlanningRule>>,
    config: PlannerConfig,
}

impl VisualizationPlanner {
    /// Create a planner with the built-in rules and default configuration
    pub fn new() -> Self {
        Self::with_config(PlannerConfig::default())
    }

    /// Create a planner with the built-in rules and the given configuration
    pub fn with_config(config: PlannerConfig) -> Self {
        Self {
            rules: default_rules(),
            config,
        }
    }

    /// Create a planner with no rules; add them with [`add_rule`](Self::add_rule)
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            config: PlannerConfig::default(),
        }
    }

    /// Append a rule; its plan is emitted after those of earlier rules
    pub fn add_rule(mut self, rule: Box<dyn PlanningRule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Replace the configuration
    pub fn config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn planner_config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Names of the registered rules, in evaluation order
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Produces the plans whose trigger conditions hold, in rule order.
    ///
    /// An empty profile or an empty record collection yields no plans.
    #[instrument(skip(self, profile, records), fields(fields = profile.len(), records = records.len()))]
    pub fn plan(&self, profile: &DatasetProfile, records: &[Record]) -> Vec<VisualizationPlan> {
        if profile.is_empty() || records.is_empty() {
            debug!("Nothing to plan for an empty dataset");
            return Vec::new();
        }

        let ctx = PlanningContext::new(profile, records, &self.config);
        let plans: Vec<VisualizationPlan> = self
            .rules
            .iter()
            .filter_map(|rule| {
                let plan = rule.apply(&ctx);
                rules::log_rule_outcome(&**rule, plan.as_ref());
                plan
            })
            .collect();

        debug!(plans = plans.len(), "Planned visualizations");
        plans
    }
}

impl Default for VisualizationPlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for VisualizationPlanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisualizationPlanner")
            .field("rules", &self.rule_names())
            .field("config", &self.config)
            .finish()
    }
}
