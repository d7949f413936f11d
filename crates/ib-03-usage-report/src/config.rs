//! Report configuration.

use serde::{Deserialize, Serialize};

/// Rows per page of the usage table.
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Which rows the Block Type sort applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortScope {
    /// Paginate in insertion order, then sort the selected page only.
    #[default]
    Page,
    /// Resolve and sort every row, then paginate the sorted rows.
    Global,
}

/// Settings for `WebTableView`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Rows per page (default: 25).
    pub page_size: usize,
    /// Sort scope (default: page).
    pub sort_scope: SortScope,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            sort_scope: SortScope::Page,
        }
    }
}
