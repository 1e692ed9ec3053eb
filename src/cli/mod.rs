//! Command-line interface wiring for case-pulse.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::{config::Settings, data::loader, metrics::Engine};

pub mod deltas;
pub mod metrics;
pub mod regions;
pub mod serve;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Case and death trend analytics", long_about = None)]
pub struct Cli {
    /// Report CSV to load instead of the newest file in DATA_DIR.
    #[arg(long, global = true)]
    data_file: Option<std::path::PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, mut settings: Settings) -> Result<()> {
        if let Some(path) = self.data_file {
            settings.data_file = Some(path);
        }
        let engine = load_engine(&settings)?;
        match self.command {
            Commands::Serve(args) => serve::run(args, settings, engine).await,
            Commands::Metrics(args) => metrics::run(args, settings, engine).await,
            Commands::Deltas(args) => deltas::run(args, settings, engine).await,
            Commands::Regions => regions::run(engine).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the JSON API.
    Serve(serve::Args),
    /// Print the headline figures for a region.
    Metrics(metrics::Args),
    /// Write daily changes for a region as CSV.
    Deltas(deltas::Args),
    /// List regions with their latest cumulative cases.
    Regions,
}

/// Load the configured report once and wrap it for sharing.
pub fn load_engine(settings: &Settings) -> Result<Engine> {
    let dataset = loader::load(settings).context("loading case report")?;
    info!(
        rows = dataset.len(),
        as_of = ?dataset.latest_date(),
        "dataset ready"
    );
    Ok(Engine::new(Arc::new(dataset)))
}
