//! Headline figures for a region as of its latest report.

use chrono::NaiveDate;
use serde::Serialize;

use super::{
    delta::DeltaSeries,
    rolling::{self, round_count, Stat, LONG_WINDOW, SHORT_WINDOW},
    series::Series,
    Channel, Field,
};

/// The six dashboard figures for one channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelMetrics {
    pub total: u64,
    pub average_daily: Stat<i64>,
    pub avg_last_5: Stat<i64>,
    pub avg_last_30: Stat<i64>,
    pub pct_change_5: Stat<f64>,
    pub pct_change_30: Stat<f64>,
    /// Days masked as downward revisions.
    pub excluded_days: usize,
}

impl ChannelMetrics {
    pub fn compute(series: &Series, deltas: &DeltaSeries, field: Field) -> Self {
        let average =
            |result: Result<f64, rolling::Unavailable>| Stat::from(result).map(round_count);
        Self {
            total: series.latest().map(|p| p.get(field)).unwrap_or(0),
            average_daily: average(rolling::daily_average(deltas, field)),
            avg_last_5: average(rolling::trailing_average(deltas, field, SHORT_WINDOW)),
            avg_last_30: average(rolling::trailing_average(deltas, field, LONG_WINDOW)),
            pct_change_5: rolling::percent_change(series, field, SHORT_WINDOW).into(),
            pct_change_30: rolling::percent_change(series, field, LONG_WINDOW).into(),
            excluded_days: deltas.excluded(field),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSnapshot {
    pub region: String,
    pub as_of: Option<NaiveDate>,
    pub cases: ChannelMetrics,
    pub deaths: ChannelMetrics,
}

impl MetricSnapshot {
    pub fn compute(series: &Series, deltas: &DeltaSeries) -> Self {
        Self {
            region: series.region().to_string(),
            as_of: series.latest().map(|p| p.date),
            cases: ChannelMetrics::compute(series, deltas, Field::Cases),
            deaths: ChannelMetrics::compute(series, deltas, Field::Deaths),
        }
    }

    /// Keep only the channels the caller asked for.
    pub fn filter(self, channel: Channel) -> SnapshotView {
        SnapshotView {
            region: self.region,
            as_of: self.as_of,
            cases: channel.includes(Field::Cases).then_some(self.cases),
            deaths: channel.includes(Field::Deaths).then_some(self.deaths),
        }
    }
}

/// Channel-filtered view handed to presentation code.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotView {
    pub region: String,
    pub as_of: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cases: Option<ChannelMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deaths: Option<ChannelMetrics>,
}
