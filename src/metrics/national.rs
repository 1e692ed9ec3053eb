//! Country-wide aggregation across regions.

use std::collections::BTreeMap;

use crate::data::Dataset;

use super::series::{Series, NATIONAL};

/// Sum every region's cumulative counts per date.
///
/// Regions are assumed to report on the same dates; a region missing a date
/// simply adds nothing to that date's total.
pub fn aggregate(dataset: &Dataset) -> Series {
    Series::from_observations(NATIONAL, dataset.observations())
}

/// Cumulative cases per region on the most recent report date.
pub fn latest_totals_by_region(dataset: &Dataset) -> BTreeMap<String, u64> {
    let mut totals = BTreeMap::new();
    let Some(latest) = dataset.latest_date() else {
        return totals;
    };
    for obs in dataset.observations().iter().filter(|o| o.date == latest) {
        let entry = totals.entry(obs.region.clone()).or_insert(0u64);
        *entry = entry.saturating_add(obs.cumulative_cases);
    }
    totals
}
