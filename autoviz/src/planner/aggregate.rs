//! Group-by and column aggregations over raw records.
//!
//! Groups are keyed by value and kept in first-seen order. Records whose group
//! value is absent do not form a group.

use indexmap::IndexMap;

use crate::data::{coerce_number, Record, Value};

/// Counts records per distinct value of `field`, in first-seen order.
pub fn count_by<'a>(records: &'a [Record], field: &str) -> IndexMap<&'a Value, u64> {
    let mut groups: IndexMap<&'a Value, u64> = IndexMap::new();
    for value in records.iter().map(|record| record.get(field)) {
        if value.is_absent() {
            continue;
        }
        *groups.entry(value).or_insert(0) += 1;
    }
    groups
}

/// Sums the coerced `value_field` per distinct value of `group_field`, in
/// first-seen order.
pub fn sum_by<'a>(
    records: &'a [Record],
    group_field: &str,
    value_field: &str,
) -> IndexMap<&'a Value, f64> {
    let mut groups: IndexMap<&'a Value, f64> = IndexMap::new();
    for record in records {
        let key = record.get(group_field);
        if key.is_absent() {
            continue;
        }
        *groups.entry(key).or_insert(0.0) += coerce_number(record.get(value_field)).value();
    }
    groups
}

/// The first `limit` distinct non-null values of `field`, in first-seen order.
pub fn first_distinct<'a>(records: &'a [Record], field: &str, limit: usize) -> Vec<&'a Value> {
    let mut seen: Vec<&'a Value> = Vec::with_capacity(limit);
    for value in records.iter().map(|record| record.get(field)) {
        if seen.len() >= limit {
            break;
        }
        if !value.is_absent() && !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

/// Sum, max, and coercion count of a numeric column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericSummary {
    pub sum: f64,
    pub max: f64,
    pub coerced_count: usize,
}

/// Summarizes `field` over every record; unreadable and absent values count as zero.
pub fn summarize_numeric(records: &[Record], field: &str) -> NumericSummary {
    let mut sum = 0.0;
    let mut max: Option<f64> = None;
    let mut coerced_count = 0;

    for record in records {
        let coerced = coerce_number(record.get(field));
        if coerced.is_coerced() {
            coerced_count += 1;
        }
        let value = coerced.value();
        sum += value;
        max = Some(max.map_or(value, |m| m.max(value)));
    }

    NumericSummary {
        sum,
        max: max.unwrap_or(0.0),
        coerced_count,
    }
}
