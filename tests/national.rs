use std::sync::Arc;

use case_pulse::{
    data::{Dataset, Observation},
    metrics::{Engine, Field, RegionSelector, Stat},
};
use chrono::NaiveDate;

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 4, day).unwrap()
}

fn engine() -> Engine {
    Engine::new(Arc::new(Dataset::new(vec![
        Observation::new(d(1), "A", 10, 1),
        Observation::new(d(2), "A", 20, 1),
        Observation::new(d(1), "B", 5, 0),
        Observation::new(d(2), "B", 15, 2),
    ])))
}

#[test]
fn national_series_sums_regions() {
    let series = engine().series(&RegionSelector::National).unwrap();
    assert_eq!(series.values(Field::Cases), vec![15, 35]);
    assert_eq!(series.values(Field::Deaths), vec![1, 3]);
}

#[test]
fn national_metrics_flow_through_the_same_engine() {
    let engine = engine();
    let snapshot = engine.compute_national_metrics();
    assert_eq!(snapshot.region, "national");
    assert_eq!(snapshot.cases.total, 35);
    assert_eq!(snapshot.cases.average_daily, Stat::Value(20));
    assert_eq!(snapshot.deaths.average_daily, Stat::Value(2));

    let deltas = engine.compute_national_deltas();
    assert_eq!(deltas.len(), 1);
    assert_eq!(deltas.points()[0].cases, Some(20));
}

#[test]
fn all_sentinel_matches_national_queries() {
    let engine = engine();
    assert_eq!(
        engine.compute_region_metrics("ALL").unwrap(),
        engine.compute_national_metrics()
    );
    assert_eq!(
        engine.compute_region_deltas("ALL").unwrap(),
        engine.compute_national_deltas()
    );
}

#[test]
fn latest_totals_cover_last_date() {
    let totals = engine().latest_totals_by_region();
    assert_eq!(totals.get("A"), Some(&20));
    assert_eq!(totals.get("B"), Some(&15));
}
