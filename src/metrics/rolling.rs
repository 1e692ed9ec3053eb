//! Window averages and lookback percent changes.

use serde::Serialize;
use thiserror::Error;

use super::{delta::DeltaSeries, series::Series, Field};

/// Short lookback used for the "last 5 days" figures.
pub const SHORT_WINDOW: usize = 5;
/// Long lookback used for the "last 30 days" figures.
pub const LONG_WINDOW: usize = 30;

/// Why a statistic could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Unavailable {
    #[error("needs {required} observations, only {available} reported")]
    InsufficientHistory { required: usize, available: usize },
    #[error("percent change anchor is zero")]
    UndefinedPercent,
    #[error("no valid daily values in window")]
    NoValidObservations,
}

/// A statistic, or the reason it is not available.
///
/// Serializes as the bare value when present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Stat<T> {
    Value(T),
    NotAvailable(Unavailable),
}

impl<T> Stat<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            Self::NotAvailable(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Stat<U> {
        match self {
            Self::Value(v) => Stat::Value(f(v)),
            Self::NotAvailable(reason) => Stat::NotAvailable(reason),
        }
    }
}

impl<T> From<Result<T, Unavailable>> for Stat<T> {
    fn from(result: Result<T, Unavailable>) -> Self {
        match result {
            Ok(v) => Self::Value(v),
            Err(reason) => Self::NotAvailable(reason),
        }
    }
}

/// Mean of the defined values; masked entries count in neither sum nor size.
fn mean_defined<I>(values: I) -> Result<f64, Unavailable>
where
    I: IntoIterator<Item = Option<i64>>,
{
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0i128, 0usize), |(sum, count), v| (sum + v as i128, count + 1));
    if count == 0 {
        return Err(Unavailable::NoValidObservations);
    }
    Ok(sum as f64 / count as f64)
}

/// Mean daily value over the whole delta series.
pub fn daily_average(deltas: &DeltaSeries, field: Field) -> Result<f64, Unavailable> {
    mean_defined(deltas.values(field))
}

/// Mean over the last `k` positions, whether or not they are masked.
pub fn trailing_average(deltas: &DeltaSeries, field: Field, k: usize) -> Result<f64, Unavailable> {
    let skip = deltas.len().saturating_sub(k);
    mean_defined(deltas.values(field).skip(skip))
}

/// Percent change of the cumulative total against the value `k` positions back.
///
/// The anchor is taken by position, so a revised anchor day is used as is.
pub fn percent_change(series: &Series, field: Field, k: usize) -> Result<f64, Unavailable> {
    let points = series.points();
    if points.len() <= k {
        return Err(Unavailable::InsufficientHistory {
            required: k + 1,
            available: points.len(),
        });
    }
    let last = points[points.len() - 1].get(field);
    let anchor = points[points.len() - 1 - k].get(field);
    if anchor == 0 {
        return Err(Unavailable::UndefinedPercent);
    }
    let change = (last as f64 - anchor as f64) / anchor as f64 * 100.0;
    Ok(round_percent(change))
}

/// Nearest integer, ties to even.
pub fn round_count(value: f64) -> i64 {
    value.round_ties_even() as i64
}

/// Two decimal places, ties to even.
pub fn round_percent(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
