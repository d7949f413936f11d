//! # Fixture Writer
//!
//! Appends usage rows and stores the entities they point at. Each call is a
//! single atomic batch; usage rows also bump the `m:usage_seq` counter in the
//! same batch so row order survives restarts.

use super::UsageStorageService;
use crate::domain::errors::StorageError;
use crate::domain::keys::KeyPrefix;
use crate::ports::outbound::{BatchOperation, EntityCodec, KeyValueStore};
use shared_types::{
    BlockContent, BlockContentId, BlockContentType, EntityId, LayoutEntity, UsageRecord,
};

/// Borrowing writer over a `UsageStorageService`.
pub struct UsageTableWriter<'a, KV, C>
where
    KV: KeyValueStore,
    C: EntityCodec,
{
    service: &'a mut UsageStorageService<KV, C>,
}

impl<'a, KV, C> UsageTableWriter<'a, KV, C>
where
    KV: KeyValueStore,
    C: EntityCodec,
{
    pub(crate) fn new(service: &'a mut UsageStorageService<KV, C>) -> Self {
        Self { service }
    }

    /// Store a block content type.
    pub fn insert_block_type(&mut self, bundle: &str, label: &str) -> Result<(), StorageError> {
        let entity = BlockContentType {
            id: bundle.to_string(),
            label: label.to_string(),
        };
        self.put(KeyPrefix::block_content_type_key(bundle), &entity)
    }

    /// Store a block content entity.
    pub fn insert_block(
        &mut self,
        id: BlockContentId,
        bundle: &str,
        info: &str,
    ) -> Result<(), StorageError> {
        let entity = BlockContent {
            id,
            bundle: bundle.to_string(),
            info: info.to_string(),
        };
        self.put(KeyPrefix::block_content_key(id), &entity)
    }

    /// Store a layout entity (page).
    pub fn insert_page(
        &mut self,
        entity_type: &str,
        id: EntityId,
        label: &str,
    ) -> Result<(), StorageError> {
        let entity = LayoutEntity {
            entity_type: entity_type.to_string(),
            id,
            label: label.to_string(),
        };
        self.put(KeyPrefix::layout_entity_key(&entity.key()), &entity)
    }

    /// Append a usage row. Returns its sequence number.
    pub fn record_usage(
        &mut self,
        block_content_id: BlockContentId,
        layout_entity_type: &str,
        layout_entity_id: EntityId,
    ) -> Result<u64, StorageError> {
        let seq = self.next_sequence()?;
        let record = UsageRecord::new(block_content_id, layout_entity_type, layout_entity_id);
        let value = self.service.codec.encode(&record)?;

        self.service.kv_store.atomic_batch_write(vec![
            BatchOperation::put(KeyPrefix::usage_key(seq), value),
            BatchOperation::put(KeyPrefix::usage_sequence_key(), (seq + 1).to_be_bytes().to_vec()),
        ])?;
        Ok(seq)
    }

    /// Delete a block content entity, leaving its usage rows dangling.
    pub fn remove_block(&mut self, id: BlockContentId) -> Result<(), StorageError> {
        self.service
            .kv_store
            .atomic_batch_write(vec![BatchOperation::delete(KeyPrefix::block_content_key(id))])?;
        Ok(())
    }

    fn next_sequence(&self) -> Result<u64, StorageError> {
        match self.service.kv_store.get(&KeyPrefix::usage_sequence_key())? {
            None => Ok(0),
            Some(bytes) => {
                let bytes: [u8; 8] =
                    bytes
                        .as_slice()
                        .try_into()
                        .map_err(|_| StorageError::MalformedKey {
                            prefix: "m:",
                            reason: format!("usage_seq holds {} bytes", bytes.len()),
                        })?;
                Ok(u64::from_be_bytes(bytes))
            }
        }
    }

    fn put<T: serde::Serialize>(&mut self, key: Vec<u8>, entity: &T) -> Result<(), StorageError> {
        let value = self.service.codec.encode(entity)?;
        self.service.kv_store.put(&key, &value)?;
        Ok(())
    }
}
