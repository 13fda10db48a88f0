//! Sample recruiting datasets for tests and benchmarks.
//!
//! Each fixture is small, deterministic and shaped like data a recruiting
//! dashboard receives from its API: loosely typed, sparse, sometimes dirty.

use crate::data::{Dataset, Record, Value};

const STATUSES: [&str; 5] = ["Screen", "Interview", "Offer", "Hired", "Rejected"];
const SOURCES: [&str; 4] = ["Referral", "LinkedIn", "Job Board", "Agency"];
const CITIES: [&str; 6] = ["Berlin", "Paris", "Madrid", "Lisbon", "Vienna", "Warsaw"];

/// Eight applications that trigger every built-in planning rule.
///
/// Columns: `status`, `source`, `city`, `applied_on`, `salary`, `score`, `remote`.
pub fn applications() -> Vec<Record> {
    let rows: [(&str, &str, &str, &str, i64, i64, bool); 8] = [
        ("Screen", "Referral", "Berlin", "2024-01-05", 60000, 3, true),
        ("Interview", "LinkedIn", "Paris", "2024-01-03", 72000, 4, false),
        ("Offer", "Referral", "Berlin", "2024-01-09", 80000, 5, true),
        ("Screen", "Job Board", "Madrid", "2024-01-02", 55000, 2, false),
        ("Rejected", "LinkedIn", "Paris", "2024-01-07", 65000, 1, false),
        ("Interview", "Referral", "Berlin", "2024-01-04", 70000, 4, true),
        ("Screen", "LinkedIn", "Lisbon", "2024-01-08", 58000, 3, false),
        ("Hired", "Referral", "Paris", "2024-01-01", 90000, 5, true),
    ];

    rows.iter()
        .map(|(status, source, city, applied_on, salary, score, remote)| {
            Record::new()
                .with("status", *status)
                .with("source", *source)
                .with("city", *city)
                .with("applied_on", *applied_on)
                .with("salary", *salary)
                .with("score", *score)
                .with("remote", *remote)
        })
        .collect()
}

/// [`applications`] wrapped in a versioned dataset.
pub fn application_dataset() -> Dataset {
    Dataset::new(applications())
}

/// A generated pipeline of `count` applications cycling through fixed value pools.
///
/// Every seventh record lacks a `score`, so the numeric field is sparse.
pub fn pipeline(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            let mut record = Record::new()
                .with("status", STATUSES[i % STATUSES.len()])
                .with("source", SOURCES[i % SOURCES.len()])
                .with("city", CITIES[(i * 7) % CITIES.len()])
                .with("applied_on", format!("2024-{:02}-{:02}", 1 + i % 12, 1 + i % 28))
                .with("salary", 50_000 + (i as i64 % 40) * 1_000);
            if i % 7 != 0 {
                record.insert("score", (i % 5) as i64 + 1);
            }
            record
        })
        .collect()
}

/// Compensation figures as a spreadsheet export delivers them.
///
/// `offer` is numeric but also holds a percentage, `"N/A"` and a missing value.
pub fn messy_compensation() -> Vec<Record> {
    vec![
        Record::new().with("team", "Core").with("offer", 1200),
        Record::new().with("team", "Data").with("offer", "85%"),
        Record::new().with("team", "Core").with("offer", "N/A"),
        Record::new()
            .with("team", "Infra")
            .with("offer", Value::Absent),
        Record::new().with("team", "Data").with("offer", 300),
    ]
}

/// Job postings located in `count` distinct cities, where the city at index
/// `i` has `count - i` postings.
pub fn postings_by_city(count: usize) -> Vec<Record> {
    (0..count)
        .flat_map(|i| {
            (0..count - i).map(move |n| {
                Record::new()
                    .with("title", format!("Role {n}"))
                    .with("location", format!("City {i:02}"))
            })
        })
        .collect()
}

/// Records whose only field is boolean; no rule applies to them.
pub fn remote_flags() -> Vec<Record> {
    vec![
        Record::new().with("remote", true),
        Record::new().with("remote", false),
        Record::new().with("remote", true),
    ]
}
