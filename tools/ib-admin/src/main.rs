//! ib-admin: inline block usage reports from the command line.

use anyhow::Context;
use clap::Parser;
use ib_admin::cli::{Args, Command};
use ib_admin::{commands, output, store};
use report_telemetry::TelemetryConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut telemetry = TelemetryConfig::from_env();
    if args.verbose && std::env::var_os("IB_LOG_LEVEL").is_none() && std::env::var_os("RUST_LOG").is_none() {
        telemetry = telemetry.with_log_level("debug");
    }
    report_telemetry::init_telemetry(&telemetry).context("initialising telemetry")?;

    let config = args.gateway_config()?;
    let source = args.store_source(&config)?;

    match &args.command {
        Command::ListBlock { block_type } => {
            let store = store::open_report_store(&source)?;
            let color = output::stderr_supports_color();
            let stdout = std::io::stdout();
            let stderr = std::io::stderr();
            commands::list_block(store, block_type, &mut stdout.lock(), &mut stderr.lock(), color)?;
        }
        Command::Serve { .. } => {
            let store = store::open_report_store(&source)?;
            commands::serve(store, config).await?;
        }
        Command::SeedDemo => {
            let rows = commands::seed_demo(&source)?;
            println!("Seeded {rows} inline block usage rows");
        }
    }

    Ok(())
}
