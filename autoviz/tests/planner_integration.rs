//! Integration tests for visualization planning over realistic record sets.

use autoviz::data::{Dataset, Record};
use autoviz::planner::{
    LabeledValue, PlanKind, PlannerConfig, VisualizationPlan, VisualizationPlanner,
};
use autoviz::profiling::DatasetProfile;

fn plan(records: &[Record]) -> Vec<VisualizationPlan> {
    let profile = DatasetProfile::build(records);
    VisualizationPlanner::new().plan(&profile, records)
}

fn kinds(plans: &[VisualizationPlan]) -> Vec<PlanKind> {
    plans.iter().map(VisualizationPlan::kind).collect()
}

fn find(plans: &[VisualizationPlan], kind: PlanKind) -> &VisualizationPlan {
    plans
        .iter()
        .find(|plan| plan.kind() == kind)
        .unwrap_or_else(|| panic!("no {kind} plan in {plans:?}"))
}

#[test]
fn test_empty_dataset_plans_nothing() {
    let profile = DatasetProfile::build(&[]);
    assert!(profile.is_empty());
    assert!(VisualizationPlanner::new().plan(&profile, &[]).is_empty());
}

#[test]
fn test_kpi_sum_mean_max() {
    let records = vec![
        Record::new().with("amount", 10),
        Record::new().with("amount", 20),
        Record::new().with("amount", 30),
    ];
    let plans = plan(&records);
    assert_eq!(kinds(&plans), vec![PlanKind::KpiCards]);

    let VisualizationPlan::KpiCards { cards } = &plans[0] else {
        panic!("expected KPI cards");
    };
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].field, "amount");
    assert_eq!(cards[0].sum, 60.0);
    assert_eq!(cards[0].mean, 20.0);
    assert_eq!(cards[0].max, 30.0);
}

#[test]
fn test_kpi_limited_to_four_fields() {
    let records = vec![Record::new()
        .with("a", 1)
        .with("b", 2)
        .with("c", 3)
        .with("d", 4)
        .with("e", 5)];
    let plans = plan(&records);
    let VisualizationPlan::KpiCards { cards } = find(&plans, PlanKind::KpiCards) else {
        unreachable!()
    };
    let fields: Vec<_> = cards.iter().map(|c| c.field.as_str()).collect();
    assert_eq!(fields, vec!["a", "b", "c", "d"]);
}

#[test]
fn test_category_bar_keeps_first_seen_order_and_sums() {
    let records = vec![
        Record::new().with("type", "A").with("n", 1),
        Record::new().with("type", "B").with("n", 2),
        Record::new().with("type", "A").with("n", 3),
    ];
    let plans = plan(&records);

    // Both rules fire for the same field; they are additive
    assert_eq!(
        kinds(&plans),
        vec![PlanKind::KpiCards, PlanKind::CategoryBar, PlanKind::Distribution]
    );

    let VisualizationPlan::CategoryBar { bars, .. } = find(&plans, PlanKind::CategoryBar) else {
        unreachable!()
    };
    assert_eq!(
        bars,
        &vec![
            LabeledValue {
                label: "A".to_string(),
                value: 4.0
            },
            LabeledValue {
                label: "B".to_string(),
                value: 2.0
            },
        ]
    );
}

#[test]
fn test_geo_ranking_truncates_to_top_ten() {
    // City i appears i + 1 times, so the ranking runs from C14 down to C5
    let records: Vec<Record> = (0..15)
        .flat_map(|i| (0..=i).map(move |_| Record::new().with("city", format!("C{i}"))))
        .collect();
    let plans = plan(&records);

    let VisualizationPlan::GeoRanking { field, entries } = find(&plans, PlanKind::GeoRanking)
    else {
        unreachable!()
    };
    assert_eq!(field, "city");
    assert_eq!(entries.len(), 10);
    assert_eq!(entries[0].label, "C14");
    assert_eq!(entries[0].relative, 100.0);
    assert_eq!(entries[9].label, "C5");
    assert!(entries.windows(2).all(|w| w[0].count >= w[1].count));
}

#[test]
fn test_geo_ranking_ties_keep_first_seen_order() {
    let records: Vec<Record> = ["Oslo", "Bern", "Rome", "Bern", "Oslo", "Kyiv"]
        .iter()
        .map(|city| Record::new().with("location", *city))
        .collect();
    let plans = plan(&records);

    let VisualizationPlan::GeoRanking { entries, .. } = find(&plans, PlanKind::GeoRanking) else {
        unreachable!()
    };
    let labels: Vec<_> = entries.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["Oslo", "Bern", "Rome", "Kyiv"]);
    assert_eq!(entries[2].relative, 50.0);
}

#[test]
fn test_unparsable_numbers_count_as_zero() {
    let records = vec![
        Record::new().with("salary", 100),
        Record::new().with("salary", "N/A"),
        Record::new().with("salary", 50),
    ];
    let plans = plan(&records);

    let VisualizationPlan::KpiCards { cards } = find(&plans, PlanKind::KpiCards) else {
        unreachable!()
    };
    assert_eq!(cards[0].sum, 150.0);
    assert_eq!(cards[0].mean, 50.0);
    assert!(!cards[0].mean.is_nan());
    assert_eq!(cards[0].coerced_count, 1);
}

#[test]
fn test_timeline_sorts_by_date() {
    let dataset = Dataset::from_json_str(
        r#"[
            {"posted_on": "2024-03-10", "openings": 2},
            {"posted_on": "2024-01-05", "openings": 5},
            {"posted_on": null,         "openings": 9},
            {"posted_on": "2024-02-20", "openings": 1}
        ]"#,
    )
    .unwrap();
    let plans = plan(dataset.records());

    let VisualizationPlan::Timeline { points, .. } = find(&plans, PlanKind::Timeline) else {
        unreachable!()
    };
    let labels: Vec<_> = points.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["2024-01-05", "2024-02-20", "2024-03-10"]);
    let values: Vec<_> = points.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![5.0, 1.0, 2.0]);
}

#[test]
fn test_co_occurrence_grid_is_capped() {
    let records: Vec<Record> = (0..40)
        .map(|i| {
            Record::new()
                .with("team", format!("T{}", i % 8))
                .with("level", format!("L{}", i % 3))
        })
        .collect();
    let plans = plan(&records);

    let VisualizationPlan::CoOccurrenceMatrix {
        rows,
        columns,
        counts,
        ..
    } = find(&plans, PlanKind::CoOccurrenceMatrix)
    else {
        unreachable!()
    };
    assert_eq!(rows, &vec!["T0", "T1", "T2", "T3", "T4"]);
    assert_eq!(columns, &vec!["L0", "L1", "L2"]);
    assert_eq!(counts.len(), 5);
    assert!(counts.iter().all(|row| row.len() == 3));
    // T0 appears at i = 0, 8, 16, 24, 32; i % 3 = 0, 2, 1, 0, 2
    assert_eq!(counts[0], vec![2, 1, 2]);
}

#[test]
fn test_status_board_shares() {
    let records: Vec<Record> = ["Open", "Open", "Closed", "Open"]
        .iter()
        .map(|status| Record::new().with("job_status", *status))
        .collect();
    let plans = plan(&records);

    let VisualizationPlan::StatusBoard { total, entries, .. } = find(&plans, PlanKind::StatusBoard)
    else {
        unreachable!()
    };
    assert_eq!(*total, 4);
    assert_eq!(entries[0].label, "Open");
    assert_eq!(entries[0].percent, 75.0);
    assert_eq!(entries[1].percent, 25.0);
}

#[test]
fn test_mixed_kind_groups_stay_separate() {
    let records = vec![
        Record::new().with("city", 1),
        Record::new().with("city", "1"),
        Record::new().with("city", "1"),
    ];
    let plans = plan(&records);

    let VisualizationPlan::GeoRanking { entries, .. } = find(&plans, PlanKind::GeoRanking) else {
        unreachable!()
    };
    let ranked: Vec<_> = entries.iter().map(|e| (e.label.as_str(), e.count)).collect();
    assert_eq!(ranked, vec![("1", 2), ("1", 1)]);
}

#[test]
fn test_custom_planner_config() {
    let records: Vec<Record> = (0..6)
        .map(|i| Record::new().with("region", format!("R{}", i % 3)).with("n", i))
        .collect();
    let profile = DatasetProfile::build(&records);

    let planner = VisualizationPlanner::with_config(
        PlannerConfig::default()
            .with_geo_hints(["region"])
            .with_geo_top_n(2),
    );
    let plans = planner.plan(&profile, &records);

    let VisualizationPlan::GeoRanking { entries, .. } = find(&plans, PlanKind::GeoRanking) else {
        unreachable!()
    };
    assert_eq!(entries.len(), 2);
}

#[test]
fn test_plans_serialize_for_renderers() {
    let records = vec![
        Record::new().with("type", "A").with("n", 1),
        Record::new().with("type", "B").with("n", 2),
    ];
    let plans = plan(&records);
    let json = serde_json::to_value(&plans).unwrap();

    assert_eq!(json[1]["kind"], "category_bar");
    assert_eq!(json[1]["bars"][0]["label"], "A");
    let restored: Vec<VisualizationPlan> = serde_json::from_value(json).unwrap();
    assert_eq!(restored, plans);
}
