//! # Outbound Ports (Driven Ports)
//!
//! These are the interfaces this library requires the host application to implement.
//!
//! Production: `RocksDbStore` (adapters/rocksdb_adapter.rs, feature `rocksdb`)
//! Testing: `InMemoryKVStore` (adapters/memory.rs)

use crate::domain::errors::{KVStoreError, SerializationError};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Result of a prefix scan: `(key, value)` pairs in ascending key order.
pub type ScanResult = Vec<(Vec<u8>, Vec<u8>)>;

/// Abstract interface for key-value database operations.
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Get many values in one call. The output is positionally aligned with `keys`.
    fn multi_get(&self, keys: &[Vec<u8>]) -> Result<Vec<Option<Vec<u8>>>, KVStoreError> {
        keys.iter().map(|key| self.get(key)).collect()
    }

    /// Put a single key-value pair.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    /// Execute an atomic batch write.
    ///
    /// Either ALL operations in the batch succeed, or NONE are applied.
    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError>;

    /// Iterate over keys with a prefix, in ascending key order.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError>;
}

/// Batch operation for atomic writes.
#[derive(Debug, Clone)]
pub enum BatchOperation {
    /// Put a key-value pair.
    Put { key: Vec<u8>, value: Vec<u8> },
    /// Delete a key.
    Delete { key: Vec<u8> },
}

impl BatchOperation {
    /// Create a Put operation.
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a Delete operation.
    pub fn delete(key: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Delete { key: key.into() }
    }
}

/// Abstract interface for value encoding.
pub trait EntityCodec: Send + Sync {
    /// Serialize a value to bytes.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, SerializationError>;

    /// Deserialize bytes to a value.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, SerializationError>;
}
