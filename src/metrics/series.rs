//! Per-region cumulative series extraction.

use std::{collections::BTreeMap, convert::Infallible, fmt, str::FromStr};

use chrono::NaiveDate;
use serde::Serialize;

use crate::data::{Dataset, Observation};

use super::{national, EngineError, Field, Trace, TracePoint};

/// Region identifier that selects the national aggregate.
pub const ALL_REGIONS: &str = "ALL";
/// Name given to the synthetic aggregated series.
pub const NATIONAL: &str = "national";

/// Which series a query is about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RegionSelector {
    National,
    Region(String),
}

impl RegionSelector {
    pub fn parse(id: &str) -> Self {
        let id = id.trim();
        if id == ALL_REGIONS {
            Self::National
        } else {
            Self::Region(id.to_string())
        }
    }
}

impl FromStr for RegionSelector {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for RegionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::National => f.write_str(NATIONAL),
            Self::Region(name) => f.write_str(name),
        }
    }
}

/// Cumulative counts for one date of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub cases: u64,
    pub deaths: u64,
}

impl SeriesPoint {
    pub fn get(&self, field: Field) -> u64 {
        match field {
            Field::Cases => self.cases,
            Field::Deaths => self.deaths,
        }
    }
}

/// Date-ordered cumulative counts for one region, one point per date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Series {
    region: String,
    points: Vec<SeriesPoint>,
}

impl Series {
    /// Build a series from observations in any order.
    ///
    /// Rows sharing a date are summed so dates stay strictly increasing.
    pub fn from_observations<'a, I>(region: impl Into<String>, observations: I) -> Self
    where
        I: IntoIterator<Item = &'a Observation>,
    {
        let mut by_date: BTreeMap<NaiveDate, (u64, u64)> = BTreeMap::new();
        for obs in observations {
            let entry = by_date.entry(obs.date).or_insert((0, 0));
            entry.0 = entry.0.saturating_add(obs.cumulative_cases);
            entry.1 = entry.1.saturating_add(obs.cumulative_deaths);
        }
        let points = by_date
            .into_iter()
            .map(|(date, (cases, deaths))| SeriesPoint {
                date,
                cases,
                deaths,
            })
            .collect();
        Self {
            region: region.into(),
            points,
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn latest(&self) -> Option<&SeriesPoint> {
        self.points.last()
    }

    /// Cumulative values of one channel, oldest first.
    pub fn values(&self, field: Field) -> Vec<u64> {
        self.points.iter().map(|p| p.get(field)).collect()
    }

    /// Chart-ready cumulative lines for the requested fields.
    pub fn traces(&self, fields: &[Field]) -> Vec<Trace<u64>> {
        fields
            .iter()
            .map(|&field| Trace {
                name: field.name(),
                points: self
                    .points
                    .iter()
                    .map(|p| TracePoint {
                        date: p.date,
                        value: p.get(field),
                    })
                    .collect(),
            })
            .collect()
    }
}

/// Extract one region's series, sorted ascending by date.
pub fn build(dataset: &Dataset, region: &str) -> Result<Series, EngineError> {
    let mut matching = dataset
        .observations()
        .iter()
        .filter(|obs| obs.region == region)
        .peekable();
    if matching.peek().is_none() {
        return Err(EngineError::RegionNotFound(region.to_string()));
    }
    Ok(Series::from_observations(region, matching))
}

/// Resolve a selector into its series, routing `ALL` to the national aggregate.
pub fn select(dataset: &Dataset, selector: &RegionSelector) -> Result<Series, EngineError> {
    match selector {
        RegionSelector::National => Ok(national::aggregate(dataset)),
        RegionSelector::Region(region) => build(dataset, region),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 3, d).unwrap()
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![
            Observation::new(day(3), "Ohio", 30, 3),
            Observation::new(day(1), "Ohio", 10, 1),
            Observation::new(day(1), "Utah", 7, 0),
            Observation::new(day(2), "Ohio", 20, 2),
        ])
    }

    #[test]
    fn build_sorts_by_date_and_filters_region() {
        let series = build(&dataset(), "Ohio").unwrap();
        assert_eq!(series.region(), "Ohio");
        assert_eq!(series.values(Field::Cases), vec![10, 20, 30]);
        assert_eq!(series.values(Field::Deaths), vec![1, 2, 3]);
        assert_eq!(series.latest().map(|p| p.date), Some(day(3)));
    }

    #[test]
    fn unknown_region_is_reported() {
        let err = build(&dataset(), "Atlantis").unwrap_err();
        assert_eq!(err, EngineError::RegionNotFound("Atlantis".into()));
    }

    #[test]
    fn duplicate_dates_are_merged() {
        let obs = [
            Observation::new(day(1), "Ohio", 4, 1),
            Observation::new(day(1), "Ohio", 6, 0),
        ];
        let series = Series::from_observations("Ohio", obs.iter());
        assert_eq!(series.len(), 1);
        assert_eq!(series.points()[0].cases, 10);
    }

    #[test]
    fn sentinel_selects_national() {
        assert_eq!(RegionSelector::parse("ALL"), RegionSelector::National);
        assert_eq!(
            RegionSelector::parse(" Ohio "),
            RegionSelector::Region("Ohio".into())
        );
        let national = select(&dataset(), &RegionSelector::National).unwrap();
        assert_eq!(national.region(), NATIONAL);
        assert_eq!(national.values(Field::Cases), vec![17, 20, 30]);
    }
}
