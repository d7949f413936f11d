//! # Domain Errors
//!
//! Error types for the usage storage crate.
//!
//! - `KVStoreError` - raised by a `KeyValueStore` adapter
//! - `SerializationError` - raised by an `EntityCodec`
//! - `StorageError` - what the inbound ports return

use thiserror::Error;

/// Errors surfaced through `UsageReader` and `EntityStorage`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The usage table or an entity could not be read.
    #[error("Database error: {message}")]
    DatabaseError { message: String },

    /// A stored value could not be decoded.
    #[error("Serialization error: {message}")]
    SerializationError { message: String },

    /// A key did not have the expected layout.
    #[error("Malformed key under prefix {prefix:?}: {reason}")]
    MalformedKey { prefix: &'static str, reason: String },
}

/// Key-value store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError { message: String },

    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },
}

impl From<KVStoreError> for StorageError {
    fn from(err: KVStoreError) -> Self {
        StorageError::DatabaseError {
            message: err.to_string(),
        }
    }
}

/// Serialization errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Serialization error: {message}")]
pub struct SerializationError {
    pub message: String,
}

impl From<SerializationError> for StorageError {
    fn from(err: SerializationError) -> Self {
        StorageError::SerializationError {
            message: err.message,
        }
    }
}
