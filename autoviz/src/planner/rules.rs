//! Planning rules that decide which visualizations apply to a dataset.
//!
//! Each rule pairs a trigger condition over the dataset profile with the
//! aggregation its plan needs. Rules are independent: any number of them may
//! fire for the same dataset, and each one aggregates straight from the raw
//! records rather than from another rule's output.

use tracing::debug;

use super::aggregate::{count_by, first_distinct, summarize_numeric, sum_by};
use super::context::PlanningContext;
use super::plan::{
    KpiCard, LabeledCount, LabeledValue, RankedEntry, ShareEntry, TimelinePoint,
    VisualizationPlan,
};
use crate::data::{coerce_number, parse_timestamp};

/// Trait for implementing visualization planning rules
pub trait PlanningRule: Send + Sync {
    /// Apply this rule and return a plan if its trigger condition holds
    fn apply(&self, ctx: &PlanningContext<'_>) -> Option<VisualizationPlan>;

    /// Get a human-readable name for this rule
    fn name(&self) -> &str;

    /// Get a description of what this rule looks for
    fn description(&self) -> &str;
}

/// Returns the default rule set, in output order.
pub fn default_rules() -> Vec<Box<dyn PlanningRule>> {
    vec![
        Box::new(KpiCardsRule),
        Box::new(CategoryBarRule),
        Box::new(DistributionRule),
        Box::new(TimelineRule),
        Box::new(CoOccurrenceRule),
        Box::new(StatusBoardRule),
        Box::new(GeoRankingRule),
    ]
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Sum, mean, and max for the leading numeric fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct KpiCardsRule;

impl PlanningRule for KpiCardsRule {
    fn apply(&self, ctx: &PlanningContext<'_>) -> Option<VisualizationPlan> {
        let record_count = ctx.record_count();
        let cards: Vec<KpiCard> = ctx
            .number_fields()
            .take(ctx.config.max_kpi_fields)
            .map(|field| {
                let summary = summarize_numeric(ctx.records, &field.name);
                let mean = if record_count == 0 {
                    0.0
                } else {
                    summary.sum / record_count as f64
                };
                KpiCard {
                    field: field.name.clone(),
                    sum: summary.sum,
                    mean,
                    max: summary.max,
                    coerced_count: summary.coerced_count,
                }
            })
            .collect();

        if cards.is_empty() {
            return None;
        }
        Some(VisualizationPlan::KpiCards { cards })
    }

    fn name(&self) -> &str {
        "KpiCardsRule"
    }

    fn description(&self) -> &str {
        "Summarizes up to the first four numeric fields as sum, mean, and max"
    }
}

/// A numeric field summed per category of the first categorical field.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryBarRule;

impl PlanningRule for CategoryBarRule {
    fn apply(&self, ctx: &PlanningContext<'_>) -> Option<VisualizationPlan> {
        let category = ctx.categorical_fields().next()?;
        let value = ctx.number_fields().next()?;

        let bars = sum_by(ctx.records, &category.name, &value.name)
            .into_iter()
            .map(|(label, total)| LabeledValue {
                label: label.label(),
                value: total,
            })
            .collect();

        Some(VisualizationPlan::CategoryBar {
            category_field: category.name.clone(),
            value_field: value.name.clone(),
            bars,
        })
    }

    fn name(&self) -> &str {
        "CategoryBarRule"
    }

    fn description(&self) -> &str {
        "Sums the first numeric field per value of the first categorical field"
    }
}

/// Record counts per value of the first categorical field.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistributionRule;

impl PlanningRule for DistributionRule {
    fn apply(&self, ctx: &PlanningContext<'_>) -> Option<VisualizationPlan> {
        let field = ctx.categorical_fields().next()?;

        let slices = count_by(ctx.records, &field.name)
            .into_iter()
            .map(|(label, count)| LabeledCount {
                label: label.label(),
                count,
            })
            .collect();

        Some(VisualizationPlan::Distribution {
            field: field.name.clone(),
            slices,
        })
    }

    fn name(&self) -> &str {
        "DistributionRule"
    }

    fn description(&self) -> &str {
        "Counts records per value of the first categorical field"
    }
}

/// Raw per-record points of the first numeric field, ordered by the first date field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimelineRule;

impl PlanningRule for TimelineRule {
    fn apply(&self, ctx: &PlanningContext<'_>) -> Option<VisualizationPlan> {
        let date = ctx.date_fields().next()?;
        let value = ctx.number_fields().next()?;

        let mut points: Vec<TimelinePoint> = ctx
            .records
            .iter()
            .filter_map(|record| {
                let when = record.get(&date.name);
                if when.is_absent() {
                    return None;
                }
                Some(TimelinePoint {
                    label: when.label(),
                    at: parse_timestamp(when),
                    value: coerce_number(record.get(&value.name)).value(),
                })
            })
            .collect();

        // Unparsable dates keep their record order after every parsed one.
        points.sort_by_key(|point| (point.at.is_none(), point.at));

        Some(VisualizationPlan::Timeline {
            date_field: date.name.clone(),
            value_field: value.name.clone(),
            points,
        })
    }

    fn name(&self) -> &str {
        "TimelineRule"
    }

    fn description(&self) -> &str {
        "Plots the first numeric field against the first date field"
    }
}

/// Pair counts between the first two categorical fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoOccurrenceRule;

impl PlanningRule for CoOccurrenceRule {
    fn apply(&self, ctx: &PlanningContext<'_>) -> Option<VisualizationPlan> {
        let mut categorical = ctx.categorical_fields();
        let row_field = categorical.next()?;
        let column_field = categorical.next()?;

        let side = ctx.config.matrix_side;
        let rows = first_distinct(ctx.records, &row_field.name, side);
        let columns = first_distinct(ctx.records, &column_field.name, side);

        let mut counts = vec![vec![0u64; columns.len()]; rows.len()];
        for record in ctx.records {
            let row = rows.iter().position(|v| *v == record.get(&row_field.name));
            let column = columns
                .iter()
                .position(|v| *v == record.get(&column_field.name));
            if let (Some(i), Some(j)) = (row, column) {
                counts[i][j] += 1;
            }
        }

        Some(VisualizationPlan::CoOccurrenceMatrix {
            row_field: row_field.name.clone(),
            column_field: column_field.name.clone(),
            rows: rows.iter().map(|v| v.label()).collect(),
            columns: columns.iter().map(|v| v.label()).collect(),
            counts,
        })
    }

    fn name(&self) -> &str {
        "CoOccurrenceRule"
    }

    fn description(&self) -> &str {
        "Cross-tabulates the first two categorical fields"
    }
}

/// Counts and shares per value of the first status-like string field.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusBoardRule;

impl PlanningRule for StatusBoardRule {
    fn apply(&self, ctx: &PlanningContext<'_>) -> Option<VisualizationPlan> {
        let field = ctx.first_string_field_named(&ctx.config.status_hints)?;
        let total = ctx.record_count() as u64;

        let entries = count_by(ctx.records, &field.name)
            .into_iter()
            .map(|(label, count)| ShareEntry {
                label: label.label(),
                count,
                percent: percent(count, total),
            })
            .collect();

        Some(VisualizationPlan::StatusBoard {
            field: field.name.clone(),
            total,
            entries,
        })
    }

    fn name(&self) -> &str {
        "StatusBoardRule"
    }

    fn description(&self) -> &str {
        "Shows each status value's count and share of all records"
    }
}

/// The most frequent values of the first location-like field.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoRankingRule;

impl PlanningRule for GeoRankingRule {
    fn apply(&self, ctx: &PlanningContext<'_>) -> Option<VisualizationPlan> {
        let field = ctx.first_field_named(&ctx.config.geo_hints)?;

        let mut ranked: Vec<(String, u64)> = count_by(ctx.records, &field.name)
            .into_iter()
            .map(|(label, count)| (label.label(), count))
            .collect();
        // Stable: equal counts keep first-seen order.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(ctx.config.geo_top_n);

        let top = ranked.first().map_or(0, |(_, count)| *count);
        let entries = ranked
            .into_iter()
            .map(|(label, count)| RankedEntry {
                label,
                count,
                relative: percent(count, top),
            })
            .collect();

        Some(VisualizationPlan::GeoRanking {
            field: field.name.clone(),
            entries,
        })
    }

    fn name(&self) -> &str {
        "GeoRankingRule"
    }

    fn description(&self) -> &str {
        "Ranks the top location values by record count"
    }
}

/// Logs a rule outcome at debug level.
pub(crate) fn log_rule_outcome(rule: &dyn PlanningRule, plan: Option<&VisualizationPlan>) {
    match plan {
        Some(plan) => debug!(
            rule = rule.name(),
            kind = %plan.kind(),
            items = plan.item_count(),
            "Planning rule fired"
        ),
        None => debug!(rule = rule.name(), "Planning rule not applicable"),
    }
}
