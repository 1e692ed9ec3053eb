//! CLI entry-point for serving the HTTP API.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{api, config::Settings, metrics::Engine};

/// Run the Axum server.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Port to bind (default 8050).
    #[arg(long, default_value_t = 8050)]
    pub port: u16,
    /// Host address, defaults to localhost.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
}

#[instrument(skip(settings, engine))]
pub async fn run(args: Args, settings: Settings, engine: Engine) -> Result<()> {
    api::serve(settings, engine, args.host, args.port).await
}
