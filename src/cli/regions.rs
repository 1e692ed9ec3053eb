//! CLI entry-point for listing regions.

use anyhow::Result;
use tracing::instrument;

use crate::{cli::metrics::group_thousands, metrics::Engine};

#[instrument(skip(engine))]
pub async fn run(engine: Engine) -> Result<()> {
    let totals = engine.latest_totals_by_region();
    for region in engine.regions() {
        // regions that stopped reporting before the latest date have no total
        let total = totals
            .get(&region)
            .map(|&v| group_thousands(v.min(i64::MAX as u64) as i64))
            .unwrap_or_else(|| "-".to_string());
        println!("{region:<32}{total:>14}");
    }
    Ok(())
}
