//! Opening the backing store.

use crate::cli::StoreSource;
use anyhow::Context;
use ib_01_usage_storage::demo::seed_demo_dataset;
use ib_01_usage_storage::UsageStorageService;
use ib_04_report_gateway::SharedStore;
use std::sync::Arc;
use tracing::info;

/// Open a read-only store for reporting.
pub fn open_report_store(source: &StoreSource) -> anyhow::Result<SharedStore> {
    match source {
        StoreSource::Demo => {
            let mut service = UsageStorageService::in_memory();
            seed_demo_dataset(&mut service).context("seeding demo dataset")?;
            info!("Using in-memory demo store");
            Ok(Arc::new(service))
        }
        StoreSource::RocksDb(path) => open_rocksdb(path, true),
    }
}

/// Write the demo dataset into `source`; returns the number of usage rows written.
pub fn seed(source: &StoreSource) -> anyhow::Result<usize> {
    match source {
        StoreSource::Demo => {
            anyhow::bail!("seed-demo needs --db-path; --demo stores are in-memory and would be discarded")
        }
        StoreSource::RocksDb(path) => seed_rocksdb(path),
    }
}

#[cfg(feature = "rocksdb")]
fn open_rocksdb(path: &std::path::Path, read_only: bool) -> anyhow::Result<SharedStore> {
    use ib_01_usage_storage::{BincodeCodec, RocksDbConfig, RocksDbStore};

    let config = RocksDbConfig {
        path: path.to_string_lossy().into_owned(),
        read_only,
        ..RocksDbConfig::default()
    };
    let store = RocksDbStore::open(config)
        .with_context(|| format!("opening usage database at {}", path.display()))?;
    info!(path = %path.display(), "Opened usage database");
    Ok(Arc::new(UsageStorageService::new(store, BincodeCodec)))
}

#[cfg(feature = "rocksdb")]
fn seed_rocksdb(path: &std::path::Path) -> anyhow::Result<usize> {
    use ib_01_usage_storage::{BincodeCodec, RocksDbConfig, RocksDbStore, UsageReader};

    let config = RocksDbConfig {
        path: path.to_string_lossy().into_owned(),
        ..RocksDbConfig::default()
    };
    let store = RocksDbStore::open(config)
        .with_context(|| format!("opening usage database at {}", path.display()))?;
    let mut service = UsageStorageService::new(store, BincodeCodec);

    if service.count()? > 0 {
        anyhow::bail!("usage database at {} is not empty", path.display());
    }
    seed_demo_dataset(&mut service).context("seeding demo dataset")?;
    Ok(service.count()?)
}

#[cfg(not(feature = "rocksdb"))]
fn open_rocksdb(path: &std::path::Path, _read_only: bool) -> anyhow::Result<SharedStore> {
    anyhow::bail!(
        "cannot open {}: ib-admin was built without the `rocksdb` feature (use --demo)",
        path.display()
    )
}

#[cfg(not(feature = "rocksdb"))]
fn seed_rocksdb(path: &std::path::Path) -> anyhow::Result<usize> {
    open_rocksdb(path, false).map(|_| 0)
}
