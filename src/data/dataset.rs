//! Immutable observation table shared across every computation.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One reported row: cumulative counts for a region as of a calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub region: String,
    pub cumulative_cases: u64,
    pub cumulative_deaths: u64,
}

impl Observation {
    pub fn new(
        date: NaiveDate,
        region: impl Into<String>,
        cumulative_cases: u64,
        cumulative_deaths: u64,
    ) -> Self {
        Self {
            date,
            region: region.into(),
            cumulative_cases,
            cumulative_deaths,
        }
    }
}

/// The full report table as loaded at start-up.
///
/// Never mutated after construction; callers share it behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    observations: Vec<Observation>,
}

impl Dataset {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Distinct region identifiers in ascending order.
    pub fn regions(&self) -> Vec<String> {
        self.observations
            .iter()
            .map(|obs| obs.region.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Most recent report date across all regions.
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.observations.iter().map(|obs| obs.date).max()
    }
}

impl FromIterator<Observation> for Dataset {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 4, d).unwrap()
    }

    #[test]
    fn regions_are_sorted_and_unique() {
        let dataset: Dataset = vec![
            Observation::new(day(1), "Texas", 1, 0),
            Observation::new(day(1), "Alabama", 1, 0),
            Observation::new(day(2), "Texas", 2, 0),
        ]
        .into_iter()
        .collect();
        assert_eq!(dataset.regions(), vec!["Alabama", "Texas"]);
        assert_eq!(dataset.latest_date(), Some(day(2)));
    }

    #[test]
    fn empty_dataset_has_no_latest_date() {
        assert_eq!(Dataset::default().latest_date(), None);
    }
}
