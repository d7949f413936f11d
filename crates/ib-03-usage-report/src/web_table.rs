//! # Web Table View
//!
//! Builds the view model of the admin usage table: header, one row per
//! resolvable usage record, pager. With `SortScope::Page` the records are
//! chunked in insertion order first and only the selected chunk is resolved
//! and sorted; `SortScope::Global` resolves and sorts everything before
//! paginating.

use crate::config::{ReportConfig, SortScope};
use crate::pager::{Pager, PagerLinks};
use crate::table_sort::{sort_rows, SortDirection, TableSortQuery, BLOCK_TYPE_COLUMN};
use ib_01_usage_storage::{EntityStorage, StorageError, UsageReader};
use ib_02_block_resolver::{BlockResolver, ResolveError};
use serde::{Deserialize, Serialize};
use shared_types::{PageKey, UsageRecord};
use std::collections::HashMap;
use tracing::{debug, error, warn};

/// Placeholder shown when the table has no rows.
pub const EMPTY_MESSAGE: &str = "No blocks found";

const TITLE_COLUMN: &str = "Title";
const LINK_COLUMN: &str = "Link";

/// Query parameters of a table request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRequest {
    /// Zero-based page index.
    pub page: Option<usize>,
    pub order: Option<String>,
    pub sort: Option<String>,
}

impl TableRequest {
    pub fn page(page: usize) -> Self {
        Self {
            page: Some(page),
            ..Self::default()
        }
    }

    pub fn with_sort(mut self, order: &str, sort: &str) -> Self {
        self.order = Some(order.to_string());
        self.sort = Some(sort.to_string());
        self
    }

    pub fn current_page(&self) -> usize {
        self.page.unwrap_or(0)
    }

    pub fn sort_query(&self) -> TableSortQuery {
        TableSortQuery {
            order: self.order.clone(),
            sort: self.sort.clone(),
        }
    }
}

/// A plain hyperlink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
    pub label: String,
}

/// Link to the layout editor of the embedding page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditLink {
    pub href: String,
    /// Title of the page; `None` when the page no longer resolves.
    pub page_title: Option<String>,
}

impl EditLink {
    /// `Edit (page title)`, or just `Edit` without a title.
    pub fn label(&self) -> String {
        match &self.page_title {
            Some(title) => format!("Edit ({title})"),
            None => "Edit".to_string(),
        }
    }
}

/// One rendered usage row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewRow {
    /// Bundle label of the block.
    pub block_type: String,
    pub title_link: Link,
    pub edit_link: EditLink,
}

/// A column header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderCell {
    pub label: &'static str,
    /// Set on sortable columns: the direction currently applied.
    pub active_direction: Option<SortDirection>,
}

impl HeaderCell {
    fn plain(label: &'static str) -> Self {
        Self {
            label,
            active_direction: None,
        }
    }

    pub fn is_sortable(&self) -> bool {
        self.active_direction.is_some()
    }

    /// Direction the header link should request: the opposite of the active one.
    pub fn toggle_direction(&self) -> Option<SortDirection> {
        self.active_direction.map(SortDirection::toggled)
    }
}

/// View model of one table request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageTable {
    pub header: Vec<HeaderCell>,
    pub rows: Vec<ViewRow>,
    pub pager: Pager,
    pub empty_message: &'static str,
    pub sort: SortDirection,
    /// `order` / `sort` as requested, carried into pager links.
    pub sort_query: TableSortQuery,
    /// Usage rows read from storage.
    pub scanned: usize,
    /// Rows dropped because their block no longer exists.
    pub skipped: usize,
    pub storage_error: Option<StorageError>,
}

impl UsageTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn pager_links(&self) -> PagerLinks {
        self.pager.links()
    }

    /// Query pairs for a link to `page` that keep the current sort.
    pub fn page_query(&self, page: usize) -> Vec<(&'static str, String)> {
        let mut query = vec![("page", page.to_string())];
        if let Some(order) = &self.sort_query.order {
            query.push(("order", order.clone()));
        }
        if let Some(sort) = &self.sort_query.sort {
            query.push(("sort", sort.clone()));
        }
        query
    }
}

/// Builds `UsageTable`s from the usage table and entity storage.
pub struct WebTableView<R: UsageReader, E: EntityStorage> {
    reader: R,
    resolver: BlockResolver<E>,
    config: ReportConfig,
}

impl<R: UsageReader, E: EntityStorage> WebTableView<R, E> {
    pub fn new(reader: R, resolver: BlockResolver<E>, config: ReportConfig) -> Self {
        Self {
            reader,
            resolver,
            config,
        }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Build the table for `request`. Never fails; storage errors yield an
    /// empty table with `storage_error` set.
    pub fn build(&self, request: &TableRequest) -> UsageTable {
        let sort_query = request.sort_query();
        let direction = sort_query.direction();
        let current_page = request.current_page();

        let (records, mut storage_error) = match self.reader.fetch_all() {
            Ok(records) => (records, None),
            Err(err) => {
                error!(error = %err, "Failed to read inline block usage");
                (Vec::new(), Some(err))
            }
        };

        let (pager, rows, skipped) = match self.config.sort_scope {
            SortScope::Page => {
                let pager = Pager::new(records.len(), self.config.page_size, current_page);
                let (mut rows, skipped) =
                    self.build_rows_or_empty(pager.page_slice(&records), &mut storage_error);
                sort_rows(&mut rows, direction, |row| row.block_type.as_str());
                (pager, rows, skipped)
            }
            SortScope::Global => {
                let (mut rows, skipped) = self.build_rows_or_empty(&records, &mut storage_error);
                sort_rows(&mut rows, direction, |row| row.block_type.as_str());
                let pager = Pager::new(rows.len(), self.config.page_size, current_page);
                let rows = pager.page_slice(&rows).to_vec();
                (pager, rows, skipped)
            }
        };

        debug!(
            page = current_page,
            scanned = records.len(),
            rows = rows.len(),
            skipped,
            sort = direction.as_str(),
            "Usage table built"
        );

        UsageTable {
            header: vec![
                HeaderCell {
                    label: BLOCK_TYPE_COLUMN,
                    active_direction: Some(direction),
                },
                HeaderCell::plain(TITLE_COLUMN),
                HeaderCell::plain(LINK_COLUMN),
            ],
            rows,
            pager,
            empty_message: EMPTY_MESSAGE,
            sort: direction,
            sort_query,
            scanned: records.len(),
            skipped,
            storage_error,
        }
    }

    fn build_rows_or_empty(
        &self,
        records: &[UsageRecord],
        storage_error: &mut Option<StorageError>,
    ) -> (Vec<ViewRow>, usize) {
        match self.build_rows(records) {
            Ok(built) => built,
            Err(ResolveError::Storage(err)) => {
                error!(error = %err, "Failed to load entities for usage table");
                storage_error.get_or_insert(err);
                (Vec::new(), 0)
            }
            Err(err) => {
                warn!(error = %err, "Entity resolution failed");
                (Vec::new(), 0)
            }
        }
    }

    /// Resolve `records` into rows, in the given order. Returns the rows and
    /// the number of records skipped.
    fn build_rows(&self, records: &[UsageRecord]) -> Result<(Vec<ViewRow>, usize), ResolveError> {
        let ids: Vec<u64> = records.iter().map(|r| r.block_content_id).collect();
        let blocks = self.resolver.resolve_blocks(&ids)?;

        let page_keys: Vec<PageKey> = records
            .iter()
            .filter(|r| blocks.contains_key(&r.block_content_id))
            .map(UsageRecord::page_key)
            .collect();
        let pages = match self.resolver.resolve_pages(&page_keys) {
            Ok(pages) => pages,
            Err(err) => {
                error!(error = %err, "Failed to load layout entities, edit links without titles");
                HashMap::new()
            }
        };

        let mut rows = Vec::with_capacity(records.len());
        let mut skipped = 0;
        for record in records {
            let Some(block) = blocks.get(&record.block_content_id) else {
                warn!(
                    block_content_id = record.block_content_id,
                    page = %record.page_key(),
                    "Block content not found, skipping usage row"
                );
                skipped += 1;
                continue;
            };

            let page_key = record.page_key();
            let page_title = pages.get(&page_key).map(|page| page.title.clone());
            if page_title.is_none() {
                debug!(page = %page_key, "Layout entity not found, edit link without title");
            }

            rows.push(ViewRow {
                block_type: block.bundle_label.clone(),
                title_link: Link {
                    href: record.page_path(),
                    label: block.title.clone(),
                },
                edit_link: EditLink {
                    href: record.layout_path(),
                    page_title,
                },
            });
        }
        Ok((rows, skipped))
    }
}
