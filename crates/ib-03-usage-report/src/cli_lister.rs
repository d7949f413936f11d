//! # CLI Lister
//!
//! Lists the pages that embed blocks of one bundle. Rendering (colour, which
//! stream) is left to the binary; this module only decides the lines.

use ib_01_usage_storage::{EntityStorage, StorageError, UsageReader};
use ib_02_block_resolver::{BlockResolver, ResolveError};
use shared_types::UsageRecord;
use std::collections::HashMap;
use tracing::{debug, error, warn};

/// Printed when no usage row matches the requested bundle.
pub const NO_MATCH_BANNER: &str =
    "Please provide the correct machine-name which is in use. Please refer the available used blocks:";

/// Result of one `list-block` invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOutcome {
    /// The bundle that was asked for.
    pub block_type: String,
    /// `/{type}/{id}` for every matching row, in usage order.
    pub links: Vec<String>,
    /// Number of matching rows.
    pub match_count: usize,
    /// Distinct bundles seen, first-seen order.
    pub available_bundles: Vec<String>,
    /// Usage rows read from storage.
    pub scanned: usize,
    /// Rows whose block no longer exists.
    pub skipped: usize,
    /// Set when the usage table or entity storage could not be read.
    pub storage_error: Option<StorageError>,
}

impl ListOutcome {
    pub fn has_matches(&self) -> bool {
        self.match_count > 0
    }

    /// Lines destined for stdout.
    pub fn output_lines(&self) -> &[String] {
        &self.links
    }

    /// Lines destined for stderr, in print order.
    ///
    /// A storage failure comes first; with zero matches the banner follows,
    /// then a blank line, then one line per distinct bundle.
    pub fn error_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(err) = &self.storage_error {
            lines.push(format!("Failed to read inline block usage: {err}"));
        }
        if !self.has_matches() {
            lines.push(NO_MATCH_BANNER.to_string());
            lines.push(String::new());
            lines.extend(self.available_bundles.iter().cloned());
        }
        lines
    }
}

/// Filters the usage table by resolved bundle.
pub struct CliLister<R: UsageReader, E: EntityStorage> {
    reader: R,
    resolver: BlockResolver<E>,
}

impl<R: UsageReader, E: EntityStorage> CliLister<R, E> {
    pub fn new(reader: R, resolver: BlockResolver<E>) -> Self {
        Self { reader, resolver }
    }

    /// List every page embedding a block whose bundle is `block_type`.
    ///
    /// Never fails: storage errors are logged, recorded on the outcome and
    /// the listing proceeds with zero rows.
    pub fn list(&self, block_type: &str) -> ListOutcome {
        let mut outcome = ListOutcome {
            block_type: block_type.to_string(),
            ..ListOutcome::default()
        };

        let records = match self.reader.fetch_all() {
            Ok(records) => records,
            Err(err) => {
                error!(error = %err, "Failed to read inline block usage");
                outcome.storage_error = Some(err);
                Vec::new()
            }
        };
        outcome.scanned = records.len();

        let bundles = self.resolve_bundles(&records, &mut outcome);

        for record in &records {
            let Some(bundle) = bundles.get(&record.block_content_id) else {
                warn!(
                    block_content_id = record.block_content_id,
                    page = %record.page_key(),
                    "Block content not found, skipping usage row"
                );
                outcome.skipped += 1;
                continue;
            };

            if !outcome.available_bundles.contains(bundle) {
                outcome.available_bundles.push(bundle.clone());
            }
            if bundle == block_type {
                outcome.links.push(record.page_path());
                outcome.match_count += 1;
            }
        }

        debug!(
            block_type,
            scanned = outcome.scanned,
            matches = outcome.match_count,
            skipped = outcome.skipped,
            "Inline block listing complete"
        );
        outcome
    }

    fn resolve_bundles(
        &self,
        records: &[UsageRecord],
        outcome: &mut ListOutcome,
    ) -> HashMap<u64, String> {
        let ids: Vec<u64> = records.iter().map(|r| r.block_content_id).collect();
        match self.resolver.resolve_blocks(&ids) {
            Ok(blocks) => blocks
                .into_iter()
                .map(|(id, info)| (id, info.bundle))
                .collect(),
            Err(ResolveError::Storage(err)) => {
                error!(error = %err, "Failed to load block content");
                outcome.storage_error.get_or_insert(err);
                HashMap::new()
            }
            Err(err) => {
                warn!(error = %err, "Block resolution failed");
                HashMap::new()
            }
        }
    }
}
