//! Test doubles shared with downstream crates (feature `test-utils`).

use crate::adapters::{BincodeCodec, InMemoryKVStore};
use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{BatchOperation, KeyValueStore, ScanResult};
use crate::service::UsageStorageService;

/// A store whose every operation fails with an I/O error.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingKVStore;

impl FailingKVStore {
    fn fail<T>(op: &str) -> Result<T, KVStoreError> {
        Err(KVStoreError::IOError {
            message: format!("{op}: connection refused"),
        })
    }
}

impl KeyValueStore for FailingKVStore {
    fn get(&self, _key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Self::fail("get")
    }

    fn put(&mut self, _key: &[u8], _value: &[u8]) -> Result<(), KVStoreError> {
        Self::fail("put")
    }

    fn atomic_batch_write(&mut self, _operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        Self::fail("batch")
    }

    fn prefix_scan(&self, _prefix: &[u8]) -> Result<ScanResult, KVStoreError> {
        Self::fail("scan")
    }
}

/// One usage row for `usage_fixture`: `(block id, bundle, block title, page id, page title)`.
pub type FixtureRow<'a> = (u64, &'a str, &'a str, u64, &'a str);

/// Build an in-memory service holding the given rows, all on `node` pages.
///
/// Bundle labels are the machine name upper-cased on the first letter.
pub fn usage_fixture(rows: &[FixtureRow<'_>]) -> UsageStorageService<InMemoryKVStore, BincodeCodec> {
    let mut service = UsageStorageService::in_memory();
    let mut writer = service.writer();
    for &(block_id, bundle, title, page_id, page_title) in rows {
        writer
            .insert_block_type(bundle, &capitalize(bundle))
            .expect("in-memory write");
        writer.insert_block(block_id, bundle, title).expect("in-memory write");
        writer.insert_page("node", page_id, page_title).expect("in-memory write");
        writer.record_usage(block_id, "node", page_id).expect("in-memory write");
    }
    service
}

/// Overwrite the value under `key` with bytes the codec cannot decode.
pub fn corrupt_value(service: &mut UsageStorageService<InMemoryKVStore, BincodeCodec>, key: &[u8]) {
    service.kv_store.put(key, b"\x01").expect("in-memory write");
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
