//! # Key Layout
//!
//! All keys are prefixed to namespace the record kinds sharing one store.
//! Numeric suffixes are big-endian so byte order equals numeric order, which
//! keeps a prefix scan of the usage table in insertion order.

use crate::domain::errors::StorageError;
use shared_types::{BlockContentId, PageKey};

/// Key prefixes for the key-value store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPrefix {
    /// Usage rows: `u:{seq}` -> UsageRecord
    Usage,
    /// Block content: `b:{id}` -> BlockContent
    BlockContent,
    /// Block content types: `t:{bundle}` -> BlockContentType
    BlockContentType,
    /// Layout entities: `e:{entity_type}\0{id}` -> LayoutEntity
    LayoutEntity,
    /// Bookkeeping: `m:{name}`
    Metadata,
}

impl KeyPrefix {
    /// Get the byte prefix for this key type.
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            KeyPrefix::Usage => b"u:",
            KeyPrefix::BlockContent => b"b:",
            KeyPrefix::BlockContentType => b"t:",
            KeyPrefix::LayoutEntity => b"e:",
            KeyPrefix::Metadata => b"m:",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            KeyPrefix::Usage => "u:",
            KeyPrefix::BlockContent => "b:",
            KeyPrefix::BlockContentType => "t:",
            KeyPrefix::LayoutEntity => "e:",
            KeyPrefix::Metadata => "m:",
        }
    }

    /// Build a full key with the given suffix.
    pub fn key(&self, suffix: &[u8]) -> Vec<u8> {
        let mut key = self.as_bytes().to_vec();
        key.extend_from_slice(suffix);
        key
    }

    /// Build a usage row key from its sequence number.
    pub fn usage_key(seq: u64) -> Vec<u8> {
        KeyPrefix::Usage.key(&seq.to_be_bytes())
    }

    /// Build a block content key.
    pub fn block_content_key(id: BlockContentId) -> Vec<u8> {
        KeyPrefix::BlockContent.key(&id.to_be_bytes())
    }

    /// Build a block content type key from a bundle machine name.
    pub fn block_content_type_key(bundle: &str) -> Vec<u8> {
        KeyPrefix::BlockContentType.key(bundle.as_bytes())
    }

    /// Build a layout entity key.
    ///
    /// The entity type is NUL-terminated so `node` and `node_revision` never
    /// share a key prefix.
    pub fn layout_entity_key(page: &PageKey) -> Vec<u8> {
        let mut suffix = Vec::with_capacity(page.entity_type.len() + 9);
        suffix.extend_from_slice(page.entity_type.as_bytes());
        suffix.push(0);
        suffix.extend_from_slice(&page.entity_id.to_be_bytes());
        KeyPrefix::LayoutEntity.key(&suffix)
    }

    /// Key holding the next free usage sequence number.
    pub fn usage_sequence_key() -> Vec<u8> {
        KeyPrefix::Metadata.key(b"usage_seq")
    }

    /// Recover the sequence number from a usage key.
    pub fn parse_usage_key(key: &[u8]) -> Result<u64, StorageError> {
        let suffix = key
            .strip_prefix(KeyPrefix::Usage.as_bytes())
            .ok_or_else(|| KeyPrefix::Usage.malformed("missing prefix"))?;
        let bytes: [u8; 8] = suffix
            .try_into()
            .map_err(|_| KeyPrefix::Usage.malformed(format!("suffix is {} bytes", suffix.len())))?;
        Ok(u64::from_be_bytes(bytes))
    }

    fn malformed(&self, reason: impl Into<String>) -> StorageError {
        StorageError::MalformedKey {
            prefix: self.name(),
            reason: reason.into(),
        }
    }
}
