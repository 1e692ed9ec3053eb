//! CLI entry-point for printing a region's headline figures.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    config::Settings,
    metrics::{Channel, ChannelMetrics, Engine, RegionSelector, SnapshotView, Stat},
};

/// Args for the `metrics` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Region name, or ALL for the national aggregate. Defaults to DEFAULT_REGION.
    #[arg(long)]
    pub region: Option<String>,
    #[arg(long, value_enum, default_value_t = Channel::Both)]
    pub channel: Channel,
    /// Emit JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[instrument(skip(settings, engine))]
pub async fn run(args: Args, settings: Settings, engine: Engine) -> Result<()> {
    let region = args.region.unwrap_or(settings.default_region);
    let selector = RegionSelector::parse(&region);
    let view = engine.metrics(&selector)?.filter(args.channel);
    info!(%selector, as_of = ?view.as_of, "computed metrics");
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render_table(&view));
    }
    Ok(())
}

/// Group digits in thousands, `1234567` -> `1,234,567`.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn count_cell(stat: &Stat<i64>) -> String {
    match stat.value() {
        Some(v) => group_thousands(*v),
        None => "n/a".to_string(),
    }
}

fn percent_cell(stat: &Stat<f64>) -> String {
    match stat.value() {
        Some(v) => format!("{v:.2}%"),
        None => "n/a".to_string(),
    }
}

/// Plain-text rendering of the dashboard's summary table.
pub fn render_table(view: &SnapshotView) -> String {
    let columns: Vec<(&str, &ChannelMetrics)> = [("Cases", &view.cases), ("Deaths", &view.deaths)]
        .into_iter()
        .filter_map(|(name, metrics)| metrics.as_ref().map(|m| (name, m)))
        .collect();

    let rows: [(&str, fn(&ChannelMetrics) -> String); 6] = [
        ("Total:", |m| group_thousands(m.total.min(i64::MAX as u64) as i64)),
        ("Daily Average:", |m| count_cell(&m.average_daily)),
        ("Average Last 5 Days:", |m| count_cell(&m.avg_last_5)),
        ("Average Last 30 Days:", |m| count_cell(&m.avg_last_30)),
        ("% Change 5 Days:", |m| percent_cell(&m.pct_change_5)),
        ("% Change 30 Days:", |m| percent_cell(&m.pct_change_30)),
    ];

    let as_of = view
        .as_of
        .map(|d| d.format("%m-%d-%Y").to_string())
        .unwrap_or_else(|| "n/a".to_string());
    let mut out = format!("{} (data as of {as_of})\n", view.region);
    out.push_str(&format!("{:<24}", ""));
    for (name, _) in &columns {
        out.push_str(&format!("{name:>14}"));
    }
    out.push('\n');
    for (label, cell) in rows {
        out.push_str(&format!("{label:<24}"));
        for (_, metrics) in &columns {
            out.push_str(&format!("{:>14}", cell(metrics)));
        }
        out.push('\n');
    }
    out
}
