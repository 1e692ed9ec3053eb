//! CLI entry-point for exporting daily changes as CSV.

use std::io::Write;

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    config::Settings,
    metrics::{Channel, DeltaSeries, Engine, RegionSelector},
};

/// Args for the `deltas` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Region name, or ALL for the national aggregate. Defaults to DEFAULT_REGION.
    #[arg(long)]
    pub region: Option<String>,
    #[arg(long, value_enum, default_value_t = Channel::Both)]
    pub channel: Channel,
    /// Only the most recent N days.
    #[arg(long)]
    pub last: Option<usize>,
}

#[instrument(skip(settings, engine))]
pub async fn run(args: Args, settings: Settings, engine: Engine) -> Result<()> {
    let region = args.region.unwrap_or(settings.default_region);
    let selector = RegionSelector::parse(&region);
    let mut deltas = engine.deltas(&selector)?;
    if let Some(n) = args.last {
        deltas = deltas.tail(n);
    }
    info!(%selector, rows = deltas.len(), "exporting daily changes");
    let stdout = std::io::stdout();
    write_csv(&deltas, args.channel, stdout.lock())?;
    Ok(())
}

/// Write one row per date; masked days are left blank.
pub fn write_csv<W: Write>(deltas: &DeltaSeries, channel: Channel, out: W) -> Result<()> {
    let fields = channel.fields();
    let mut writer = csv::Writer::from_writer(out);
    let mut header = vec!["date"];
    header.extend(fields.iter().map(|f| f.name()));
    writer.write_record(&header)?;
    for point in deltas.points() {
        let mut record = vec![point.date.to_string()];
        record.extend(
            fields
                .iter()
                .map(|&f| point.get(f).map(|v| v.to_string()).unwrap_or_default()),
        );
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}
