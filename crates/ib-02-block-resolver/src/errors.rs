//! # Resolver Errors

use ib_01_usage_storage::StorageError;
use shared_types::{BlockContentId, PageKey};
use thiserror::Error;

/// Errors that can occur while resolving entities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The block content entity no longer exists.
    #[error("Block content {id} not found")]
    BlockNotFound { id: BlockContentId },

    /// The layout entity no longer exists.
    #[error("Layout entity {page} not found")]
    PageNotFound { page: PageKey },

    /// Entity storage could not be read.
    #[error("Entity storage failure: {0}")]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ResolveError::PageNotFound {
            page: PageKey::new("node", 4),
        };
        assert_eq!(err.to_string(), "Layout entity node:4 not found");
    }

    #[test]
    fn test_storage_error_converts() {
        let err: ResolveError = StorageError::DatabaseError {
            message: "gone".into(),
        }
        .into();
        assert!(matches!(err, ResolveError::Storage(_)));
        assert_eq!(err.to_string(), "Entity storage failure: Database error: gone");
    }
}
