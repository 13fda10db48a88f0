//! Prelude for commonly used types and traits in autoviz.

pub use crate::cache::AnalysisCache;
pub use crate::config::EngineConfig;
pub use crate::data::{Dataset, Record, Value};
pub use crate::engine::{Analysis, AnalysisOutcome, AutoVisualizer};
pub use crate::error::{Result, VizError};
pub use crate::formatters::{FormatterConfig, HumanFormatter, JsonFormatter, PlanFormatter};
pub use crate::logging::LogConfig;
pub use crate::planner::{PlanKind, PlannerConfig, PlanningRule, VisualizationPlan, VisualizationPlanner};
pub use crate::profiling::{DatasetProfile, FieldProfile, FieldProfiler, FieldType, ProfilerConfig};
