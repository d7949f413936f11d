//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Usage**: `UsageRecord`, `PageKey`
//! - **Stored Entities**: `BlockContent`, `BlockContentType`, `LayoutEntity`
//! - **Resolved Views**: `BlockInfo`, `PageInfo`

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a block content entity.
pub type BlockContentId = u64;

/// Identifier of a layout entity (the page embedding a block).
pub type EntityId = u64;

// =============================================================================
// CLUSTER A: USAGE
// =============================================================================

/// One row of the `inline_block_usage` table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UsageRecord {
    /// The block instance placed in a layout.
    pub block_content_id: BlockContentId,
    /// Entity type of the page, e.g. `node`.
    pub layout_entity_type: String,
    /// Id of the page within its entity type.
    pub layout_entity_id: EntityId,
}

impl UsageRecord {
    pub fn new(
        block_content_id: BlockContentId,
        layout_entity_type: impl Into<String>,
        layout_entity_id: EntityId,
    ) -> Self {
        Self {
            block_content_id,
            layout_entity_type: layout_entity_type.into(),
            layout_entity_id,
        }
    }

    /// Key of the page that embeds the block.
    pub fn page_key(&self) -> PageKey {
        PageKey::new(self.layout_entity_type.clone(), self.layout_entity_id)
    }

    /// Canonical path of the embedding page, `/{type}/{id}`.
    pub fn page_path(&self) -> String {
        format!("/{}/{}", self.layout_entity_type, self.layout_entity_id)
    }

    /// Path of the page's layout editor, `/{type}/{id}/layout`.
    pub fn layout_path(&self) -> String {
        format!("{}/layout", self.page_path())
    }
}

/// Addresses a layout entity by `(entity_type, entity_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PageKey {
    pub entity_type: String,
    pub entity_id: EntityId,
}

impl PageKey {
    pub fn new(entity_type: impl Into<String>, entity_id: EntityId) -> Self {
        Self {
            entity_type: entity_type.into(),
            entity_id,
        }
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.entity_type, self.entity_id)
    }
}

// =============================================================================
// CLUSTER B: STORED ENTITIES
// =============================================================================

/// A block content instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockContent {
    pub id: BlockContentId,
    /// Machine name of the block type.
    pub bundle: String,
    /// The block's own title field.
    pub info: String,
}

/// A block content type (bundle) definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockContentType {
    /// Machine name, e.g. `basic`.
    pub id: String,
    /// Human-readable label, e.g. `Basic block`.
    pub label: String,
}

/// A page that can carry a layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEntity {
    pub entity_type: String,
    pub id: EntityId,
    pub label: String,
}

impl LayoutEntity {
    pub fn key(&self) -> PageKey {
        PageKey::new(self.entity_type.clone(), self.id)
    }
}

// =============================================================================
// CLUSTER C: RESOLVED VIEWS
// =============================================================================

/// What a report needs to know about a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockInfo {
    /// Bundle machine name.
    pub bundle: String,
    /// Bundle label; falls back to the machine name when the type is gone.
    pub bundle_label: String,
    /// Display title of the block.
    pub title: String,
}

/// What a report needs to know about a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub title: String,
}
