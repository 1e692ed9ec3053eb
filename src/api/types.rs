//! Shared DTOs for JSON requests and responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::metrics::Channel;

#[derive(Debug, Clone, Serialize)]
pub struct RegionsDto {
    pub as_of: Option<NaiveDate>,
    pub default_region: String,
    pub regions: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorDto {
    pub error: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChannelQuery {
    #[serde(default)]
    pub channel: Channel,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeltaQuery {
    #[serde(default)]
    pub channel: Channel,
    /// Only the most recent `last` days.
    pub last: Option<usize>,
}
