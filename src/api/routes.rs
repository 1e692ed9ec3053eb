//! HTTP route handlers for Axum.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::warn;

use crate::{
    api::types::{ChannelQuery, DeltaQuery, ErrorDto, RegionsDto},
    metrics::{DeltaSeries, EngineError, RegionSelector, SnapshotView, Trace},
};

use super::AppState;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorDto>)>;

fn reject(err: EngineError) -> (StatusCode, Json<ErrorDto>) {
    let status = match err {
        EngineError::RegionNotFound(_) => StatusCode::NOT_FOUND,
    };
    warn!(%err, "query rejected");
    (
        status,
        Json(ErrorDto {
            error: err.to_string(),
        }),
    )
}

fn delta_traces(deltas: DeltaSeries, query: &DeltaQuery) -> Vec<Trace<Option<i64>>> {
    let deltas = match query.last {
        Some(n) => deltas.tail(n),
        None => deltas,
    };
    deltas.traces(query.channel.fields())
}

pub async fn list_regions(State(state): State<AppState>) -> Json<RegionsDto> {
    Json(RegionsDto {
        as_of: state.engine.as_of(),
        default_region: state.settings.default_region.clone(),
        regions: state.engine.regions(),
    })
}

pub async fn region_metrics(
    Path(region): Path<String>,
    State(state): State<AppState>,
    Query(query): Query<ChannelQuery>,
) -> ApiResult<SnapshotView> {
    let selector = RegionSelector::parse(&region);
    let snapshot = state.engine.metrics(&selector).map_err(reject)?;
    Ok(Json(snapshot.filter(query.channel)))
}

pub async fn region_deltas(
    Path(region): Path<String>,
    State(state): State<AppState>,
    Query(query): Query<DeltaQuery>,
) -> ApiResult<Vec<Trace<Option<i64>>>> {
    let selector = RegionSelector::parse(&region);
    let deltas = state.engine.deltas(&selector).map_err(reject)?;
    Ok(Json(delta_traces(deltas, &query)))
}

pub async fn region_series(
    Path(region): Path<String>,
    State(state): State<AppState>,
    Query(query): Query<ChannelQuery>,
) -> ApiResult<Vec<Trace<u64>>> {
    let selector = RegionSelector::parse(&region);
    let series = state.engine.series(&selector).map_err(reject)?;
    Ok(Json(series.traces(query.channel.fields())))
}

pub async fn national_metrics(
    State(state): State<AppState>,
    Query(query): Query<ChannelQuery>,
) -> Json<SnapshotView> {
    Json(state.engine.compute_national_metrics().filter(query.channel))
}

pub async fn national_deltas(
    State(state): State<AppState>,
    Query(query): Query<DeltaQuery>,
) -> Json<Vec<Trace<Option<i64>>>> {
    Json(delta_traces(state.engine.compute_national_deltas(), &query))
}

pub async fn national_series(
    State(state): State<AppState>,
    Query(query): Query<ChannelQuery>,
) -> Json<Vec<Trace<u64>>> {
    let series = state.engine.compute_national_series();
    Json(series.traces(query.channel.fields()))
}

pub async fn latest_totals(State(state): State<AppState>) -> Json<BTreeMap<String, u64>> {
    Json(state.engine.latest_totals_by_region())
}
