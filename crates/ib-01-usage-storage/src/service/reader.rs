//! # Read Path
//!
//! `fetch_all` is a single prefix scan over `u:`; entity loads are one
//! `multi_get` per entity kind regardless of how many rows asked for them.

use super::UsageStorageService;
use crate::domain::errors::StorageError;
use crate::domain::keys::KeyPrefix;
use crate::ports::inbound::{EntityStorage, UsageReader};
use crate::ports::outbound::{EntityCodec, KeyValueStore};
use serde::de::DeserializeOwned;
use shared_types::{BlockContent, BlockContentId, BlockContentType, LayoutEntity, PageKey, UsageRecord};
use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

impl<KV, C> UsageStorageService<KV, C>
where
    KV: KeyValueStore,
    C: EntityCodec,
{
    /// Load `ids` under keys built by `key_of`, returning only those present.
    ///
    /// A value that fails to decode is logged and left out, so it reads as
    /// not found; only KV failures are errors.
    fn load_many<Id, T>(
        &self,
        ids: BTreeSet<Id>,
        key_of: impl Fn(&Id) -> Vec<u8>,
    ) -> Result<HashMap<Id, T>, StorageError>
    where
        Id: Ord + Hash + Eq,
        T: DeserializeOwned,
    {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let keys: Vec<Vec<u8>> = ids.iter().map(&key_of).collect();
        let values = self.kv_store.multi_get(&keys)?;

        let mut found = HashMap::with_capacity(values.len());
        for ((id, key), value) in ids.into_iter().zip(&keys).zip(values) {
            let Some(bytes) = value else { continue };
            match self.codec.decode(&bytes) {
                Ok(entity) => {
                    found.insert(id, entity);
                }
                Err(e) => {
                    tracing::warn!(
                        key = %String::from_utf8_lossy(key),
                        error = %e,
                        "Undecodable entity, treating as not found"
                    );
                }
            }
        }
        Ok(found)
    }
}

impl<KV, C> UsageReader for UsageStorageService<KV, C>
where
    KV: KeyValueStore,
    C: EntityCodec,
{
    fn fetch_all(&self) -> Result<Vec<UsageRecord>, StorageError> {
        let rows = self.kv_store.prefix_scan(KeyPrefix::Usage.as_bytes())?;

        let records = rows
            .iter()
            .map(|(_, value)| self.codec.decode::<UsageRecord>(value).map_err(StorageError::from))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(rows = records.len(), "Usage table scanned");
        Ok(records)
    }

    fn count(&self) -> Result<usize, StorageError> {
        Ok(self.kv_store.prefix_scan(KeyPrefix::Usage.as_bytes())?.len())
    }
}

impl<KV, C> EntityStorage for UsageStorageService<KV, C>
where
    KV: KeyValueStore,
    C: EntityCodec,
{
    fn load_block_contents(
        &self,
        ids: &[BlockContentId],
    ) -> Result<HashMap<BlockContentId, BlockContent>, StorageError> {
        self.load_many(ids.iter().copied().collect(), |id| {
            KeyPrefix::block_content_key(*id)
        })
    }

    fn load_block_content_types(
        &self,
        bundles: &[String],
    ) -> Result<HashMap<String, BlockContentType>, StorageError> {
        self.load_many(bundles.iter().cloned().collect(), |bundle| {
            KeyPrefix::block_content_type_key(bundle)
        })
    }

    fn load_layout_entities(
        &self,
        keys: &[PageKey],
    ) -> Result<HashMap<PageKey, LayoutEntity>, StorageError> {
        self.load_many(keys.iter().cloned().collect(), KeyPrefix::layout_entity_key)
    }
}
