//! Visualization plans: self-contained, pre-aggregated chart descriptions.
//!
//! A plan carries every number its renderer needs and holds no reference back
//! to the records it summarizes, so plans can be serialized, cached, or diffed
//! independently of rendering.
//!
//! Groups are keyed by value, so a field mixing kinds keeps `1` and `"1"` as
//! separate groups. Both render with the label `1`; renderers that key on
//! labels should use the entry's position instead.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of a [`VisualizationPlan`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanKind {
    KpiCards,
    CategoryBar,
    Distribution,
    Timeline,
    CoOccurrenceMatrix,
    StatusBoard,
    GeoRanking,
}

impl PlanKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanKind::KpiCards => "kpi_cards",
            PlanKind::CategoryBar => "category_bar",
            PlanKind::Distribution => "distribution",
            PlanKind::Timeline => "timeline",
            PlanKind::CoOccurrenceMatrix => "co_occurrence_matrix",
            PlanKind::StatusBoard => "status_board",
            PlanKind::GeoRanking => "geo_ranking",
        }
    }
}

impl fmt::Display for PlanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Headline figures for one numeric field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiCard {
    pub field: String,
    pub sum: f64,
    /// `sum / record_count`, over every record including those without a value
    pub mean: f64,
    pub max: f64,
    /// Values that could not be read as numbers and counted as zero
    pub coerced_count: usize,
}

/// A group label with an aggregated value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledValue {
    pub label: String,
    pub value: f64,
}

/// A group label with a record count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledCount {
    pub label: String,
    pub count: u64,
}

/// One raw point of a time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    /// The date value as it appeared in the record
    pub label: String,
    /// The parsed instant, when the date value could be parsed
    pub at: Option<DateTime<Utc>>,
    pub value: f64,
}

/// A group's count and its share of all records, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareEntry {
    pub label: String,
    pub count: u64,
    pub percent: f64,
}

/// A ranked group's count and its size relative to the top entry, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub label: String,
    pub count: u64,
    pub relative: f64,
}

/// A pre-aggregated description of one chart or table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VisualizationPlan {
    /// Sum, mean, and max for the leading numeric fields
    KpiCards { cards: Vec<KpiCard> },

    /// A numeric field summed per category
    CategoryBar {
        category_field: String,
        value_field: String,
        bars: Vec<LabeledValue>,
    },

    /// Record counts per category, for a pie chart
    Distribution {
        field: String,
        slices: Vec<LabeledCount>,
    },

    /// Per-record values ordered by date, for an area chart
    Timeline {
        date_field: String,
        value_field: String,
        points: Vec<TimelinePoint>,
    },

    /// Pair counts between two categorical fields
    CoOccurrenceMatrix {
        row_field: String,
        column_field: String,
        rows: Vec<String>,
        columns: Vec<String>,
        /// `counts[i][j]` counts records with `rows[i]` and `columns[j]`
        counts: Vec<Vec<u64>>,
    },

    /// Counts and shares per status value, for progress bars
    StatusBoard {
        field: String,
        total: u64,
        entries: Vec<ShareEntry>,
    },

    /// The most frequent locations, largest first
    GeoRanking {
        field: String,
        entries: Vec<RankedEntry>,
    },
}

impl VisualizationPlan {
    pub fn kind(&self) -> PlanKind {
        match self {
            VisualizationPlan::KpiCards { .. } => PlanKind::KpiCards,
            VisualizationPlan::CategoryBar { .. } => PlanKind::CategoryBar,
            VisualizationPlan::Distribution { .. } => PlanKind::Distribution,
            VisualizationPlan::Timeline { .. } => PlanKind::Timeline,
            VisualizationPlan::CoOccurrenceMatrix { .. } => PlanKind::CoOccurrenceMatrix,
            VisualizationPlan::StatusBoard { .. } => PlanKind::StatusBoard,
            VisualizationPlan::GeoRanking { .. } => PlanKind::GeoRanking,
        }
    }

    /// Number of data items (cards, bars, slices, points, cells, entries).
    pub fn item_count(&self) -> usize {
        match self {
            VisualizationPlan::KpiCards { cards } => cards.len(),
            VisualizationPlan::CategoryBar { bars, .. } => bars.len(),
            VisualizationPlan::Distribution { slices, .. } => slices.len(),
            VisualizationPlan::Timeline { points, .. } => points.len(),
            VisualizationPlan::CoOccurrenceMatrix { rows, columns, .. } => {
                rows.len() * columns.len()
            }
            VisualizationPlan::StatusBoard { entries, .. } => entries.len(),
            VisualizationPlan::GeoRanking { entries, .. } => entries.len(),
        }
    }
}
