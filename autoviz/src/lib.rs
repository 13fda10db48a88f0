//! # autoviz - Automatic visualization planning for record collections
//!
//! autoviz looks at a collection of loosely-typed records, works out what kind
//! of data each field holds, and decides which charts are worth showing. It is
//! built for dashboards that receive arbitrary JSON from an API and still need
//! to present something sensible without a hand-written chart configuration.
//!
//! ## Quick Start
//!
//! ```rust
//! use autoviz::prelude::*;
//!
//! let dataset = Dataset::from_json_str(r#"[
//!     {"status": "Screen",    "city": "Berlin", "applied_on": "2024-01-05", "salary": 60000},
//!     {"status": "Interview", "city": "Paris",  "applied_on": "2024-01-03", "salary": 72000},
//!     {"status": "Screen",    "city": "Berlin", "applied_on": "2024-01-09", "salary": "N/A"}
//! ]"#)?;
//!
//! let analysis = AutoVisualizer::new().analyze(dataset.records());
//!
//! assert_eq!(analysis.outcome, AnalysisOutcome::Planned { count: 7 });
//! assert_eq!(analysis.plan_kinds()[0], PlanKind::KpiCards);
//!
//! println!("{}", HumanFormatter::new().format(&analysis)?);
//! # Ok::<(), autoviz::VizError>(())
//! ```
//!
//! ## Pipeline
//!
//! 1. **Profiling** ([`profiling`]): every field gets an inferred
//!    [`FieldType`](profiling::FieldType), a distinct-value count and a few
//!    sample values. Field names that denote dates win over value evidence.
//! 2. **Planning** ([`planner`]): an ordered list of
//!    [`PlanningRule`](planner::PlanningRule)s inspects the profile. Every rule
//!    whose trigger holds emits one pre-aggregated
//!    [`VisualizationPlan`](planner::VisualizationPlan).
//! 3. **Presentation** ([`formatters`]): plans are serializable data; the
//!    formatters summarize them for logs and terminals.
//!
//! [`engine::AutoVisualizer`] runs the first two steps in one call and
//! [`cache::AnalysisCache`] memoizes the result per dataset version.
//!
//! ## Error Handling
//!
//! Profiling and planning never fail. Dirty values are coerced, missing fields
//! are skipped, and an empty dataset yields an empty plan list. The fallible
//! edges (JSON ingestion, configuration, output formatting) return
//! [`Result`], whose error type is [`VizError`].
//!
//! ## Logging
//!
//! The crate emits `tracing` spans and events under the `autoviz` target and
//! never installs a subscriber. See [`logging::setup::init_logging`] for a
//! ready-made setup.

pub mod cache;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod formatters;
pub mod logging;
pub mod planner;
pub mod prelude;
pub mod profiling;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_fixtures;

pub use error::{Result, VizError};
