//! # Block Resolver Service

use crate::errors::ResolveError;
use ib_01_usage_storage::EntityStorage;
use shared_types::{BlockContent, BlockContentId, BlockInfo, EntityId, PageInfo, PageKey};
use std::collections::HashMap;

/// Resolves usage-row foreign keys through entity storage.
///
/// Pure reads; holds no state besides the storage handle.
pub struct BlockResolver<E: EntityStorage> {
    storage: E,
}

impl<E: EntityStorage> BlockResolver<E> {
    pub fn new(storage: E) -> Self {
        Self { storage }
    }

    /// Bundle machine name of a block.
    pub fn resolve_block_type(&self, id: BlockContentId) -> Result<String, ResolveError> {
        self.load_block(id).map(|block| block.bundle)
    }

    /// Display title (the `info` field) of a block.
    pub fn resolve_block_title(&self, id: BlockContentId) -> Result<String, ResolveError> {
        self.load_block(id).map(|block| block.info)
    }

    /// Bundle, bundle label and title of a block.
    pub fn resolve_block(&self, id: BlockContentId) -> Result<BlockInfo, ResolveError> {
        self.resolve_blocks(&[id])?
            .remove(&id)
            .ok_or(ResolveError::BlockNotFound { id })
    }

    /// Title of the page `(entity_type, entity_id)`.
    pub fn resolve_page_title(
        &self,
        entity_type: &str,
        entity_id: EntityId,
    ) -> Result<String, ResolveError> {
        let page = PageKey::new(entity_type, entity_id);
        self.resolve_pages(std::slice::from_ref(&page))?
            .remove(&page)
            .map(|info| info.title)
            .ok_or(ResolveError::PageNotFound { page })
    }

    /// Resolve many blocks at once. Missing blocks are absent from the map.
    pub fn resolve_blocks(
        &self,
        ids: &[BlockContentId],
    ) -> Result<HashMap<BlockContentId, BlockInfo>, ResolveError> {
        let blocks = self.storage.load_block_contents(ids)?;

        let mut bundles: Vec<String> = blocks.values().map(|b| b.bundle.clone()).collect();
        bundles.sort_unstable();
        bundles.dedup();
        let types = self.storage.load_block_content_types(&bundles)?;

        let resolved: HashMap<_, _> = blocks
            .into_iter()
            .map(|(id, block)| {
                let bundle_label = match types.get(&block.bundle) {
                    Some(block_type) => block_type.label.clone(),
                    None => {
                        tracing::debug!(bundle = %block.bundle, "Block type missing, using machine name");
                        block.bundle.clone()
                    }
                };
                let info = BlockInfo {
                    bundle: block.bundle,
                    bundle_label,
                    title: block.info,
                };
                (id, info)
            })
            .collect();

        if resolved.len() < ids.len() {
            tracing::trace!(
                requested = ids.len(),
                resolved = resolved.len(),
                "Some block ids did not resolve"
            );
        }
        Ok(resolved)
    }

    /// Resolve many pages at once. Missing pages are absent from the map.
    pub fn resolve_pages(
        &self,
        keys: &[PageKey],
    ) -> Result<HashMap<PageKey, PageInfo>, ResolveError> {
        let pages = self.storage.load_layout_entities(keys)?;
        Ok(pages
            .into_iter()
            .map(|(key, page)| (key, PageInfo { title: page.label }))
            .collect())
    }

    fn load_block(&self, id: BlockContentId) -> Result<BlockContent, ResolveError> {
        self.storage
            .load_block_contents(&[id])?
            .remove(&id)
            .ok_or(ResolveError::BlockNotFound { id })
    }
}
