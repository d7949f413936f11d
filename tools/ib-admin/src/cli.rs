//! Command-line arguments.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use ib_03_usage_report::SortScope;
use ib_04_report_gateway::GatewayConfig;
use std::net::IpAddr;
use std::path::PathBuf;

/// ib-admin: inline block usage reports
#[derive(Parser, Debug)]
#[command(name = "ib-admin")]
#[command(about = "Report where inline blocks are used", version)]
pub struct Args {
    /// RocksDB directory holding the usage table and entities
    #[arg(long, global = true, value_name = "DIR", conflicts_with = "demo")]
    pub db_path: Option<PathBuf>,

    /// Use an in-memory store seeded with demo data
    #[arg(long, global = true)]
    pub demo: bool,

    /// Gateway configuration file (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log at debug level unless IB_LOG_LEVEL / RUST_LOG say otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the pages that embed blocks of the given type
    #[command(
        name = "list-block",
        visible_alias = "inline-block-list",
        alias = "inline-block:list"
    )]
    ListBlock {
        /// Block type machine name, e.g. `basic`
        block_type: String,
    },

    /// Serve the paginated usage table over HTTP
    Serve {
        /// Bind address (overrides the config file)
        #[arg(long)]
        host: Option<IpAddr>,

        /// Port (overrides the config file)
        #[arg(long)]
        port: Option<u16>,

        /// Sort every row instead of the current page only
        #[arg(long)]
        global_sort: bool,
    },

    /// Write the demo dataset into the database at --db-path
    SeedDemo,
}

impl Args {
    /// Config file values with command-line overrides applied.
    pub fn gateway_config(&self) -> anyhow::Result<GatewayConfig> {
        let mut config = match &self.config {
            Some(path) => GatewayConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => GatewayConfig::default(),
        };

        if let Some(path) = &self.db_path {
            config.storage.path = Some(path.clone());
        }

        if let Command::Serve {
            host,
            port,
            global_sort,
        } = &self.command
        {
            if let Some(host) = host {
                config.http.host = *host;
            }
            if let Some(port) = port {
                config.http.port = *port;
            }
            if *global_sort {
                config.report.sort_scope = SortScope::Global;
            }
        }

        config.validate().context("invalid gateway configuration")?;
        Ok(config)
    }

    /// Where the store comes from.
    pub fn store_source(&self, config: &GatewayConfig) -> anyhow::Result<StoreSource> {
        if self.demo {
            return Ok(StoreSource::Demo);
        }
        match &config.storage.path {
            Some(path) => Ok(StoreSource::RocksDb(path.clone())),
            None => bail!("no database given: pass --db-path <DIR>, set [storage] path, or use --demo"),
        }
    }
}

/// Backing store selected by flags and config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreSource {
    /// In-memory store with the demo dataset
    Demo,
    /// RocksDB directory
    RocksDb(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("ib-admin").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_list_block_and_aliases() {
        for name in ["list-block", "inline-block:list", "inline-block-list"] {
            let args = parse(&[name, "basic"]);
            assert_eq!(
                args.command,
                Command::ListBlock {
                    block_type: "basic".into()
                }
            );
        }
    }

    #[test]
    fn test_list_block_requires_argument() {
        assert!(Args::try_parse_from(["ib-admin", "list-block"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = parse(&["list-block", "hero", "--db-path", "/data/usage"]);
        assert_eq!(args.db_path, Some(PathBuf::from("/data/usage")));
    }

    #[test]
    fn test_demo_conflicts_with_db_path() {
        assert!(Args::try_parse_from(["ib-admin", "--demo", "--db-path", "/x", "seed-demo"]).is_err());
    }

    #[test]
    fn test_serve_overrides() {
        let args = parse(&["serve", "--port", "9999", "--host", "0.0.0.0", "--global-sort"]);
        let config = args.gateway_config().unwrap();

        assert_eq!(config.http.port, 9999);
        assert_eq!(config.http.host.to_string(), "0.0.0.0");
        assert_eq!(config.report.sort_scope, SortScope::Global);
    }

    #[test]
    fn test_store_source() {
        let args = parse(&["--demo", "list-block", "basic"]);
        let config = args.gateway_config().unwrap();
        assert_eq!(args.store_source(&config).unwrap(), StoreSource::Demo);

        let args = parse(&["--db-path", "/data", "list-block", "basic"]);
        let config = args.gateway_config().unwrap();
        assert_eq!(
            args.store_source(&config).unwrap(),
            StoreSource::RocksDb(PathBuf::from("/data"))
        );

        let args = parse(&["list-block", "basic"]);
        let config = args.gateway_config().unwrap();
        assert!(args.store_source(&config).is_err());
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let args = parse(&["--config", "/nonexistent/ib.toml", "serve"]);
        assert!(args.gateway_config().is_err());
    }
}
