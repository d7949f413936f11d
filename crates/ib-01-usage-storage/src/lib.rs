//! # Usage Storage (ib-01)
//!
//! Read access to the `inline_block_usage` mapping and to the entities its
//! rows point at (block content, block content types, layout entities).
//!
//! ## Storage Layout
//!
//! ```text
//! u: + seq (u64 BE)               → UsageRecord       (insertion order)
//! b: + block id (u64 BE)          → BlockContent
//! t: + bundle                     → BlockContentType
//! e: + entity type + 0x00 + id    → LayoutEntity
//! m:usage_seq                     → next usage sequence (u64 BE)
//! ```
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Key layout and error types
//! - `ports/` - `UsageReader` / `EntityStorage` (inbound), `KeyValueStore` / `EntityCodec` (outbound)
//! - `service/` - `UsageStorageService` implementing the inbound ports, plus the fixture writer
//! - `adapters/` - Ordered in-memory store, bincode codec, RocksDB store (feature `rocksdb`)
//!
//! ## Usage
//!
//! ```ignore
//! use ib_01_usage_storage::{UsageReader, UsageStorageService};
//!
//! let storage = UsageStorageService::in_memory();
//! let records = storage.fetch_all()?;
//! ```

pub mod adapters;
pub mod demo;
pub mod domain;
pub mod ports;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use adapters::{BincodeCodec, InMemoryKVStore};
pub use domain::errors::{KVStoreError, SerializationError, StorageError};
pub use domain::keys::KeyPrefix;
pub use ports::inbound::{EntityStorage, UsageReader};
pub use ports::outbound::{BatchOperation, EntityCodec, KeyValueStore};
pub use service::{UsageStorageService, UsageTableWriter};

#[cfg(feature = "rocksdb")]
pub use adapters::rocksdb_adapter::{RocksDbConfig, RocksDbStore};
