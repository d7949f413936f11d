//! Subcommand implementations.

use crate::cli::StoreSource;
use crate::output::write_outcome;
use crate::store;
use anyhow::Context;
use ib_02_block_resolver::BlockResolver;
use ib_03_usage_report::{CliLister, ListOutcome};
use ib_04_report_gateway::{GatewayConfig, ReportGatewayService, SharedStore};
use report_telemetry::{record_report, HistogramTimer, ReportCounts, REPORT_RENDER_DURATION};
use std::io::Write;
use std::sync::Arc;
use tracing::info;

/// `list-block <blockType>`: print matching page paths.
pub fn list_block<O: Write, E: Write>(
    store: SharedStore,
    block_type: &str,
    out: &mut O,
    err: &mut E,
    color: bool,
) -> anyhow::Result<ListOutcome> {
    info!(block_type, "Listing inline block usage");

    let outcome = {
        let _timer = HistogramTimer::new(&REPORT_RENDER_DURATION);
        let lister = CliLister::new(Arc::clone(&store), BlockResolver::new(store));
        lister.list(block_type)
    };

    record_report(
        "cli",
        ReportCounts {
            scanned: outcome.scanned,
            missing_blocks: outcome.skipped,
            missing_pages: 0,
            storage_failed: outcome.storage_error.is_some(),
        },
    );

    write_outcome(&outcome, out, err, color).context("writing listing")?;
    Ok(outcome)
}

/// `serve`: run the HTTP gateway until Ctrl-C.
pub async fn serve(store: SharedStore, config: GatewayConfig) -> anyhow::Result<()> {
    let mut service = ReportGatewayService::new(config, store).context("configuring gateway")?;
    service.start().await.context("running gateway")?;
    Ok(())
}

/// `seed-demo`: write the demo dataset.
pub fn seed_demo(source: &StoreSource) -> anyhow::Result<usize> {
    let rows = store::seed(source)?;
    info!(rows, source = ?source, "Demo dataset seeded");
    Ok(rows)
}
