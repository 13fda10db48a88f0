//! Summaries of analyses for logs, CLIs and API responses.
//!
//! Formatters describe *what* was planned. They do not draw charts; a renderer
//! consumes [`VisualizationPlan`]s directly.
//!
//! # Examples
//!
//! ```rust
//! use autoviz::engine::AutoVisualizer;
//! use autoviz::formatters::{HumanFormatter, PlanFormatter};
//!
//! let analysis = AutoVisualizer::new().analyze(&[]);
//! let output = HumanFormatter::new().format(&analysis).unwrap();
//! assert!(output.contains("No visualizations available"));
//! ```

use std::fmt::Write;

use serde_json::json;

use crate::engine::{Analysis, AnalysisOutcome};
use crate::error::Result;
use crate::logging::truncate_field;
use crate::planner::VisualizationPlan;

/// Configuration options for formatting analyses.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Include the per-field profile in the output
    pub include_profile: bool,
    /// Maximum number of items listed per plan (`None` for all)
    pub max_items: Option<usize>,
    /// Maximum length of a printed label
    pub max_label_length: usize,
    /// Whether to use colorized output (for human formatter)
    pub use_colors: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            include_profile: true,
            max_items: Some(10),
            max_label_length: 40,
            use_colors: true,
        }
    }
}

impl FormatterConfig {
    /// Creates a minimal configuration showing only the plan headlines.
    pub fn minimal() -> Self {
        Self {
            include_profile: false,
            max_items: Some(0),
            max_label_length: 40,
            use_colors: false,
        }
    }

    /// Creates a detailed configuration showing everything.
    pub fn detailed() -> Self {
        Self {
            include_profile: true,
            max_items: None,
            max_label_length: 256,
            use_colors: true,
        }
    }

    /// Sets whether to include the field profile.
    pub fn with_profile(mut self, include: bool) -> Self {
        self.include_profile = include;
        self
    }

    /// Sets the maximum number of items listed per plan.
    pub fn with_max_items(mut self, max: Option<usize>) -> Self {
        self.max_items = max;
        self
    }

    /// Sets whether to use colorized output.
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }
}

/// Trait for turning an [`Analysis`] into text.
///
/// # Examples
///
/// ```rust
/// use autoviz::engine::Analysis;
/// use autoviz::formatters::PlanFormatter;
///
/// struct CountFormatter;
///
/// impl PlanFormatter for CountFormatter {
///     fn format(&self, analysis: &Analysis) -> autoviz::Result<String> {
///         Ok(format!("{} plans", analysis.plans.len()))
///     }
/// }
/// ```
pub trait PlanFormatter {
    /// Formats an analysis into a string representation.
    fn format(&self, analysis: &Analysis) -> Result<String>;

    /// Formats an analysis with custom configuration.
    fn format_with_config(&self, analysis: &Analysis, _config: &FormatterConfig) -> Result<String> {
        self.format(analysis)
    }
}

/// Formats analyses as structured JSON.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    config: FormatterConfig,
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default configuration.
    pub fn new() -> Self {
        Self::with_config(FormatterConfig::default())
    }

    /// Creates a new JSON formatter with the specified configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            pretty: true,
        }
    }

    /// Sets whether to use pretty-printed JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanFormatter for JsonFormatter {
    fn format(&self, analysis: &Analysis) -> Result<String> {
        self.format_with_config(analysis, &self.config)
    }

    fn format_with_config(&self, analysis: &Analysis, config: &FormatterConfig) -> Result<String> {
        // Plans are never truncated here; JSON output feeds renderers.
        let document = if config.include_profile {
            serde_json::to_value(analysis)?
        } else {
            json!({
                "outcome": analysis.outcome,
                "plans": analysis.plans,
            })
        };

        let output = if self.pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        Ok(output)
    }
}

/// Formats analyses as human-readable text.
#[derive(Debug, Clone)]
pub struct HumanFormatter {
    config: FormatterConfig,
}

impl HumanFormatter {
    /// Creates a new human formatter with default configuration.
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
        }
    }

    /// Creates a new human formatter with the specified configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanFormatter for HumanFormatter {
    fn format(&self, analysis: &Analysis) -> Result<String> {
        self.format_with_config(analysis, &self.config)
    }

    fn format_with_config(&self, analysis: &Analysis, config: &FormatterConfig) -> Result<String> {
        let mut output = String::new();
        let profile = &analysis.profile;

        let headline = match analysis.outcome {
            AnalysisOutcome::EmptyInput => {
                "No visualizations available: the dataset is empty".to_string()
            }
            AnalysisOutcome::NoApplicableRule => {
                "No visualizations available for these fields".to_string()
            }
            AnalysisOutcome::Planned { count } => format!(
                "{count} visualization(s) from {} record(s), {} field(s)",
                profile.record_count,
                profile.len()
            ),
        };
        if config.use_colors && !analysis.outcome.is_empty() {
            writeln!(output, "\x1b[32m{headline}\x1b[0m")?;
        } else if config.use_colors {
            writeln!(output, "\x1b[33m{headline}\x1b[0m")?;
        } else {
            writeln!(output, "{headline}")?;
        }

        if config.include_profile && !profile.is_empty() {
            writeln!(output)?;
            writeln!(output, "Fields:")?;
            for field in profile {
                write!(
                    output,
                    "   {} ({}, {} unique",
                    truncate_field(&field.name, config.max_label_length),
                    field.inferred_type,
                    field.unique_count
                )?;
                if field.coerced_count > 0 {
                    write!(output, ", {} coerced", field.coerced_count)?;
                }
                writeln!(output, ")")?;
            }
        }

        if !analysis.plans.is_empty() {
            writeln!(output)?;
            writeln!(output, "Plans:")?;
            for (index, plan) in analysis.plans.iter().enumerate() {
                writeln!(output, "   {}. {}", index + 1, describe(plan, config))?;
                for line in item_lines(plan, config).iter().take(item_limit(config)) {
                    writeln!(output, "      - {line}")?;
                }
                let hidden = plan.item_count().saturating_sub(item_limit(config));
                if hidden > 0 && item_limit(config) > 0 {
                    writeln!(output, "      ... and {hidden} more")?;
                }
            }
        }

        Ok(output)
    }
}

fn item_limit(config: &FormatterConfig) -> usize {
    config.max_items.unwrap_or(usize::MAX)
}

fn describe(plan: &VisualizationPlan, config: &FormatterConfig) -> String {
    let name = |field: &str| truncate_field(field, config.max_label_length);
    match plan {
        VisualizationPlan::KpiCards { cards } => {
            let fields: Vec<_> = cards.iter().map(|card| name(&card.field)).collect();
            format!("KPI cards: {}", fields.join(", "))
        }
        VisualizationPlan::CategoryBar {
            category_field,
            value_field,
            ..
        } => format!(
            "Category bar: sum of {} by {}",
            name(value_field),
            name(category_field)
        ),
        VisualizationPlan::Distribution { field, .. } => {
            format!("Distribution: {}", name(field))
        }
        VisualizationPlan::Timeline {
            date_field,
            value_field,
            ..
        } => format!("Timeline: {} over {}", name(value_field), name(date_field)),
        VisualizationPlan::CoOccurrenceMatrix {
            row_field,
            column_field,
            rows,
            columns,
            ..
        } => format!(
            "Co-occurrence matrix: {} x {} ({}x{})",
            name(row_field),
            name(column_field),
            rows.len(),
            columns.len()
        ),
        VisualizationPlan::StatusBoard { field, total, .. } => {
            format!("Status board: {} ({total} records)", name(field))
        }
        VisualizationPlan::GeoRanking { field, .. } => {
            format!("Geographic ranking: {}", name(field))
        }
    }
}

fn item_lines(plan: &VisualizationPlan, config: &FormatterConfig) -> Vec<String> {
    let label = |text: &str| truncate_field(text, config.max_label_length);
    match plan {
        VisualizationPlan::KpiCards { cards } => cards
            .iter()
            .map(|card| {
                format!(
                    "{}: sum {}, mean {:.2}, max {}",
                    label(&card.field),
                    card.sum,
                    card.mean,
                    card.max
                )
            })
            .collect(),
        VisualizationPlan::CategoryBar { bars, .. } => bars
            .iter()
            .map(|bar| format!("{}: {}", label(&bar.label), bar.value))
            .collect(),
        VisualizationPlan::Distribution { slices, .. } => slices
            .iter()
            .map(|slice| format!("{}: {}", label(&slice.label), slice.count))
            .collect(),
        VisualizationPlan::Timeline { points, .. } => points
            .iter()
            .map(|point| format!("{}: {}", label(&point.label), point.value))
            .collect(),
        VisualizationPlan::CoOccurrenceMatrix {
            rows,
            columns,
            counts,
            ..
        } => rows
            .iter()
            .zip(counts)
            .flat_map(|(row, row_counts)| {
                columns.iter().zip(row_counts).map(move |(column, count)| {
                    format!("{} / {}: {count}", label(row), label(column))
                })
            })
            .collect(),
        VisualizationPlan::StatusBoard { entries, .. } => entries
            .iter()
            .map(|entry| {
                format!(
                    "{}: {} ({:.1}%)",
                    label(&entry.label),
                    entry.count,
                    entry.percent
                )
            })
            .collect(),
        VisualizationPlan::GeoRanking { entries, .. } => entries
            .iter()
            .enumerate()
            .map(|(rank, entry)| {
                format!("#{} {}: {}", rank + 1, label(&entry.label), entry.count)
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Record;
    use crate::engine::AutoVisualizer;

    fn sample_analysis() -> Analysis {
        let records = vec![
            Record::new().with("type", "A").with("n", 1),
            Record::new().with("type", "B").with("n", 2),
            Record::new().with("type", "A").with("n", 3),
        ];
        AutoVisualizer::new().analyze(&records)
    }

    #[test]
    fn test_human_formatter_lists_plans() {
        let output = HumanFormatter::with_config(FormatterConfig::default().with_colors(false))
            .format(&sample_analysis())
            .unwrap();

        assert!(output.starts_with("3 visualization(s) from 3 record(s), 2 field(s)"));
        assert!(output.contains("type (String, 2 unique)"));
        assert!(output.contains("1. KPI cards: n"));
        assert!(output.contains("2. Category bar: sum of n by type"));
        assert!(output.contains("- A: 4"));
        assert!(output.contains("3. Distribution: type"));
    }

    #[test]
    fn test_human_formatter_empty_states() {
        let formatter = HumanFormatter::with_config(FormatterConfig::minimal());

        let empty = AutoVisualizer::new().analyze(&[]);
        assert_eq!(
            formatter.format(&empty).unwrap(),
            "No visualizations available: the dataset is empty\n"
        );

        let flags = AutoVisualizer::new().analyze(&[Record::new().with("remote", true)]);
        assert_eq!(
            formatter.format(&flags).unwrap(),
            "No visualizations available for these fields\n"
        );
    }

    #[test]
    fn test_human_formatter_limits_items() {
        let records: Vec<Record> = (0..5)
            .map(|i| Record::new().with("stage", format!("S{i}")))
            .collect();
        let analysis = AutoVisualizer::new().analyze(&records);
        let config = FormatterConfig::default()
            .with_colors(false)
            .with_profile(false)
            .with_max_items(Some(2));

        let output = HumanFormatter::new()
            .format_with_config(&analysis, &config)
            .unwrap();
        assert!(output.contains("- S1: 1"));
        assert!(!output.contains("- S2: 1"));
        assert!(output.contains("... and 3 more"));
        assert!(!output.contains("Fields:"));
    }

    #[test]
    fn test_json_formatter() {
        let analysis = sample_analysis();

        let full: serde_json::Value =
            serde_json::from_str(&JsonFormatter::new().format(&analysis).unwrap()).unwrap();
        assert_eq!(full["plans"][0]["kind"], "kpi_cards");
        assert_eq!(full["profile"]["record_count"], 3);

        let compact = JsonFormatter::with_config(FormatterConfig::minimal())
            .with_pretty(false)
            .format(&analysis)
            .unwrap();
        assert!(!compact.contains('\n'));
        let compact: serde_json::Value = serde_json::from_str(&compact).unwrap();
        assert!(compact.get("profile").is_none());
        assert_eq!(compact["outcome"]["status"], "planned");
        assert_eq!(compact["outcome"]["count"], 3);
    }
}
