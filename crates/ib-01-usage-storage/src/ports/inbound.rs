//! # Inbound Ports (Driving Ports)
//!
//! `UsageReader` is the single read path over the usage table.
//! `EntityStorage` loads the entities a usage row refers to, always in
//! batches: callers pass every id they need and get back a map of the ones
//! that still exist. Ids with no live entity are simply absent from the map.

use crate::domain::errors::StorageError;
use shared_types::{BlockContent, BlockContentId, BlockContentType, LayoutEntity, PageKey, UsageRecord};
use std::collections::HashMap;
use std::sync::Arc;

/// Full-scan access to the `inline_block_usage` table.
pub trait UsageReader: Send + Sync {
    /// Every usage row, in storage insertion order.
    fn fetch_all(&self) -> Result<Vec<UsageRecord>, StorageError>;

    /// Number of usage rows.
    fn count(&self) -> Result<usize, StorageError> {
        self.fetch_all().map(|records| records.len())
    }
}

/// Batched entity loads.
pub trait EntityStorage: Send + Sync {
    /// Load block content entities by id.
    fn load_block_contents(
        &self,
        ids: &[BlockContentId],
    ) -> Result<HashMap<BlockContentId, BlockContent>, StorageError>;

    /// Load block content types by bundle machine name.
    fn load_block_content_types(
        &self,
        bundles: &[String],
    ) -> Result<HashMap<String, BlockContentType>, StorageError>;

    /// Load layout entities by `(entity_type, id)`.
    fn load_layout_entities(
        &self,
        keys: &[PageKey],
    ) -> Result<HashMap<PageKey, LayoutEntity>, StorageError>;
}

impl<T: UsageReader + ?Sized> UsageReader for Arc<T> {
    fn fetch_all(&self) -> Result<Vec<UsageRecord>, StorageError> {
        (**self).fetch_all()
    }

    fn count(&self) -> Result<usize, StorageError> {
        (**self).count()
    }
}

impl<T: EntityStorage + ?Sized> EntityStorage for Arc<T> {
    fn load_block_contents(
        &self,
        ids: &[BlockContentId],
    ) -> Result<HashMap<BlockContentId, BlockContent>, StorageError> {
        (**self).load_block_contents(ids)
    }

    fn load_block_content_types(
        &self,
        bundles: &[String],
    ) -> Result<HashMap<String, BlockContentType>, StorageError> {
        (**self).load_block_content_types(bundles)
    }

    fn load_layout_entities(
        &self,
        keys: &[PageKey],
    ) -> Result<HashMap<PageKey, LayoutEntity>, StorageError> {
        (**self).load_layout_entities(keys)
    }
}
