//! Time-series analytics over cumulative case and death reports.
//!
//! Everything here is a pure function of the loaded [`Dataset`]: a query
//! builds the series it needs, differences it, and summarises it, with no
//! state carried between calls.

pub mod delta;
pub mod national;
pub mod rolling;
pub mod series;
pub mod snapshot;

use std::{collections::BTreeMap, sync::Arc};

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::data::Dataset;

pub use delta::{DeltaPoint, DeltaSeries};
pub use rolling::{Stat, Unavailable};
pub use series::{RegionSelector, Series, SeriesPoint};
pub use snapshot::{ChannelMetrics, MetricSnapshot, SnapshotView};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("region not found: {0}")]
    RegionNotFound(String),
}

/// A single counted quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Cases,
    Deaths,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Self::Cases => "cases",
            Self::Deaths => "deaths",
        }
    }
}

/// Which quantities a caller wants to see.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    #[serde(alias = "CASES")]
    Cases,
    #[serde(alias = "death", alias = "DEATH", alias = "DEATHS")]
    #[value(alias = "death")]
    Deaths,
    #[default]
    #[serde(alias = "BOTH")]
    Both,
}

impl Channel {
    pub fn fields(self) -> &'static [Field] {
        match self {
            Self::Cases => &[Field::Cases],
            Self::Deaths => &[Field::Deaths],
            Self::Both => &[Field::Cases, Field::Deaths],
        }
    }

    pub fn includes(self, field: Field) -> bool {
        self.fields().contains(&field)
    }
}

/// One dated value of a chart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TracePoint<T> {
    pub date: NaiveDate,
    pub value: T,
}

/// A named chart line, one per selected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trace<T> {
    pub name: &'static str,
    pub points: Vec<TracePoint<T>>,
}

/// Query surface over a shared, read-only dataset.
///
/// Cloning is cheap; every clone reads the same table.
#[derive(Debug, Clone)]
pub struct Engine {
    dataset: Arc<Dataset>,
}

impl Engine {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    pub fn regions(&self) -> Vec<String> {
        self.dataset.regions()
    }

    /// Latest report date in the dataset.
    pub fn as_of(&self) -> Option<NaiveDate> {
        self.dataset.latest_date()
    }

    pub fn series(&self, selector: &RegionSelector) -> Result<Series, EngineError> {
        series::select(&self.dataset, selector)
    }

    pub fn deltas(&self, selector: &RegionSelector) -> Result<DeltaSeries, EngineError> {
        let series = self.series(selector)?;
        Ok(delta::deltas(&series))
    }

    pub fn metrics(&self, selector: &RegionSelector) -> Result<MetricSnapshot, EngineError> {
        let series = self.series(selector)?;
        let deltas = delta::deltas(&series);
        debug!(
            region = %selector,
            observations = series.len(),
            deltas = deltas.len(),
            "computing metric snapshot"
        );
        Ok(MetricSnapshot::compute(&series, &deltas))
    }

    /// Snapshot for one region; `ALL` selects the national aggregate.
    pub fn compute_region_metrics(&self, region_id: &str) -> Result<MetricSnapshot, EngineError> {
        self.metrics(&RegionSelector::parse(region_id))
    }

    pub fn compute_region_deltas(&self, region_id: &str) -> Result<DeltaSeries, EngineError> {
        self.deltas(&RegionSelector::parse(region_id))
    }

    pub fn compute_national_metrics(&self) -> MetricSnapshot {
        let series = national::aggregate(&self.dataset);
        MetricSnapshot::compute(&series, &delta::deltas(&series))
    }

    pub fn compute_national_series(&self) -> Series {
        national::aggregate(&self.dataset)
    }

    pub fn compute_national_deltas(&self) -> DeltaSeries {
        delta::deltas(&national::aggregate(&self.dataset))
    }

    pub fn latest_totals_by_region(&self) -> BTreeMap<String, u64> {
        national::latest_totals_by_region(&self.dataset)
    }
}
