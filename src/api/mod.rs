//! HTTP layer exposing computed metrics to the dashboard front end.

pub mod routes;
pub mod types;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{config::Settings, metrics::Engine};

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub engine: Engine,
}

/// Build the router; separate from [`serve`] so tests can drive it directly.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/regions", get(routes::list_regions))
        .route("/regions/:region/metrics", get(routes::region_metrics))
        .route("/regions/:region/deltas", get(routes::region_deltas))
        .route("/regions/:region/series", get(routes::region_series))
        .route("/national/metrics", get(routes::national_metrics))
        .route("/national/deltas", get(routes::national_deltas))
        .route("/national/series", get(routes::national_series))
        .route("/latest-totals", get(routes::latest_totals))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(settings: Settings, engine: Engine, host: String, port: u16) -> Result<()> {
    let router = router(AppState { settings, engine });

    let listener = bind(&host, port).await?;
    info!(addr = %listener.local_addr()?, "serving case-pulse API");
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Bind a listener, resolving host names such as `localhost`.
pub async fn bind(host: &str, port: u16) -> Result<TcpListener> {
    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("binding {host}:{port}"))?;
    Ok(listener)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "unable to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
