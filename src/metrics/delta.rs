//! Cumulative-to-daily differencing with anomaly masking.
//!
//! A negative day-over-day change means the source revised its running total
//! downwards. Such values are masked as undefined so later statistics skip
//! them. The row itself is kept, so cases and deaths stay date-aligned.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::{series::Series, Field, Trace, TracePoint};

/// Signed daily change before masking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawDelta {
    pub date: NaiveDate,
    pub cases: i64,
    pub deaths: i64,
}

/// Daily change after masking; `None` marks an anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeltaPoint {
    pub date: NaiveDate,
    pub cases: Option<i64>,
    pub deaths: Option<i64>,
}

impl DeltaPoint {
    pub fn get(&self, field: Field) -> Option<i64> {
        match field {
            Field::Cases => self.cases,
            Field::Deaths => self.deaths,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeltaSeries {
    region: String,
    points: Vec<DeltaPoint>,
}

impl DeltaSeries {
    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn points(&self) -> &[DeltaPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Values of one channel in date order, masked entries included as `None`.
    pub fn values(&self, field: Field) -> impl Iterator<Item = Option<i64>> + '_ {
        self.points.iter().map(move |p| p.get(field))
    }

    /// The most recent `n` positions (all of them when shorter).
    pub fn tail(&self, n: usize) -> DeltaSeries {
        let start = self.points.len().saturating_sub(n);
        DeltaSeries {
            region: self.region.clone(),
            points: self.points[start..].to_vec(),
        }
    }

    /// Number of masked entries in one channel.
    pub fn excluded(&self, field: Field) -> usize {
        self.values(field).filter(Option::is_none).count()
    }

    pub fn traces(&self, fields: &[Field]) -> Vec<Trace<Option<i64>>> {
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

fn signed_diff(current: u64, previous: u64) -> i64 {
    if current >= previous {
        i64::try_from(current - previous).unwrap_or(i64::MAX)
    } else {
        i64::try_from(previous - current).map_or(i64::MIN, |d| -d)
    }
}

/// Day-over-day differences; the first date has no predecessor and is dropped.
pub fn difference(series: &Series) -> Vec<RawDelta> {
    series
        .points()
        .windows(2)
        .map(|pair| RawDelta {
            date: pair[1].date,
            cases: signed_diff(pair[1].cases, pair[0].cases),
            deaths: signed_diff(pair[1].deaths, pair[0].deaths),
        })
        .collect()
}

fn mask(value: i64) -> Option<i64> {
    (value >= 0).then_some(value)
}

/// Replace negative daily values with undefined, per channel.
pub fn mask_anomalies(region: impl Into<String>, raw: Vec<RawDelta>) -> DeltaSeries {
    let region = region.into();
    let points = raw
        .into_iter()
        .map(|delta| {
            if delta.cases < 0 || delta.deaths < 0 {
                debug!(
                    %region,
                    date = %delta.date,
                    cases = delta.cases,
                    deaths = delta.deaths,
                    "masking downward revision"
                );
            }
            DeltaPoint {
                date: delta.date,
                cases: mask(delta.cases),
                deaths: mask(delta.deaths),
            }
        })
        .collect();
    DeltaSeries { region, points }
}

/// Difference a series and mask its anomalies.
pub fn deltas(series: &Series) -> DeltaSeries {
    mask_anomalies(series.region(), difference(series))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Observation;

    fn series(values: &[(u64, u64)]) -> Series {
        let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let obs: Vec<Observation> = values
            .iter()
            .enumerate()
            .map(|(i, &(c, d))| {
                Observation::new(start + chrono::Days::new(i as u64), "Iowa", c, d)
            })
            .collect();
        Series::from_observations("Iowa", obs.iter())
    }

    #[test]
    fn first_date_is_dropped() {
        let deltas = deltas(&series(&[(1, 0), (4, 1), (9, 1)]));
        assert_eq!(deltas.len(), 2);
        assert_eq!(
            deltas.values(Field::Cases).collect::<Vec<_>>(),
            vec![Some(3), Some(5)]
        );
        assert_eq!(deltas.points()[0].date, NaiveDate::from_ymd_opt(2021, 1, 2).unwrap());
    }

    #[test]
    fn channels_are_masked_independently() {
        let deltas = deltas(&series(&[(10, 5), (8, 6), (12, 4)]));
        assert_eq!(
            deltas.values(Field::Cases).collect::<Vec<_>>(),
            vec![None, Some(4)]
        );
        assert_eq!(
            deltas.values(Field::Deaths).collect::<Vec<_>>(),
            vec![Some(1), None]
        );
        assert_eq!(deltas.excluded(Field::Cases), 1);
        assert_eq!(deltas.excluded(Field::Deaths), 1);
    }

    #[test]
    fn short_series_yield_no_deltas() {
        assert!(deltas(&series(&[])).is_empty());
        assert!(deltas(&series(&[(3, 1)])).is_empty());
    }

    #[test]
    fn tail_keeps_latest_positions() {
        let deltas = deltas(&series(&[(0, 0), (1, 0), (3, 0), (6, 0)]));
        let last = deltas.tail(2);
        assert_eq!(
            last.values(Field::Cases).collect::<Vec<_>>(),
            vec![Some(2), Some(3)]
        );
        assert_eq!(deltas.tail(10).len(), 3);
    }

    #[test]
    fn raw_differences_keep_sign() {
        let raw = difference(&series(&[(10, 0), (7, 0)]));
        assert_eq!(raw[0].cases, -3);
    }
}
