//! # Adapters Module
//!
//! - `memory`: ordered in-memory key-value store (tests, demo mode)
//! - `codec`: bincode implementation of `EntityCodec`
//! - `rocksdb_adapter`: production key-value store (feature `rocksdb`)

pub mod codec;
pub mod memory;

#[cfg(feature = "rocksdb")]
pub mod rocksdb_adapter;

pub use codec::BincodeCodec;
pub use memory::InMemoryKVStore;
