//! # Usage Storage Service
//!
//! Implements `UsageReader` and `EntityStorage` over any `KeyValueStore`.
//! The report paths only ever read; `UsageTableWriter` (writer.rs) exists to
//! seed demo data and test fixtures.

mod reader;
mod writer;

pub use writer::UsageTableWriter;

use crate::adapters::{BincodeCodec, InMemoryKVStore};
use crate::ports::outbound::{EntityCodec, KeyValueStore};

/// The usage storage service.
pub struct UsageStorageService<KV, C = BincodeCodec>
where
    KV: KeyValueStore,
    C: EntityCodec,
{
    /// Key-value store holding the usage table and entities.
    pub(crate) kv_store: KV,
    /// Value codec.
    pub(crate) codec: C,
}

impl<KV, C> UsageStorageService<KV, C>
where
    KV: KeyValueStore,
    C: EntityCodec,
{
    /// Create a service over the given store and codec.
    pub fn new(kv_store: KV, codec: C) -> Self {
        Self { kv_store, codec }
    }

    /// Writer for seeding the store. Not used on report paths.
    pub fn writer(&mut self) -> UsageTableWriter<'_, KV, C> {
        UsageTableWriter::new(self)
    }

    /// Access the underlying store.
    pub fn store(&self) -> &KV {
        &self.kv_store
    }
}

impl UsageStorageService<InMemoryKVStore, BincodeCodec> {
    /// Service over an empty in-memory store.
    pub fn in_memory() -> Self {
        Self::new(InMemoryKVStore::new(), BincodeCodec)
    }
}
