//! # Report Flows
//!
//! Storage (ib-01) → resolver (ib-02) → report surfaces (ib-03).
//!
//! ## Dataset
//!
//! Most tests run against the demo dataset: 42 usage rows cycling through
//! four bundles and six pages, with blocks 10, 20, 30 and 40 deleted after
//! their usage rows were written.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ib_01_usage_storage::demo::{seed_demo_dataset, DEMO_USAGE_ROWS};
    use ib_01_usage_storage::test_utils::FailingKVStore;
    use ib_01_usage_storage::{BincodeCodec, InMemoryKVStore, UsageReader, UsageStorageService};
    use ib_02_block_resolver::{BlockResolver, ResolveError};
    use ib_03_usage_report::{
        CliLister, ReportConfig, SortScope, TableRequest, UsageTable, WebTableView,
        BLOCK_TYPE_COLUMN, NO_MATCH_BANNER,
    };

    type Store = Arc<UsageStorageService<InMemoryKVStore, BincodeCodec>>;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn demo_store() -> Store {
        let mut service = UsageStorageService::in_memory();
        seed_demo_dataset(&mut service).unwrap();
        Arc::new(service)
    }

    fn lister(store: &Store) -> CliLister<Store, Store> {
        CliLister::new(Arc::clone(store), BlockResolver::new(Arc::clone(store)))
    }

    fn view(store: &Store, sort_scope: SortScope) -> WebTableView<Store, Store> {
        WebTableView::new(
            Arc::clone(store),
            BlockResolver::new(Arc::clone(store)),
            ReportConfig {
                sort_scope,
                ..ReportConfig::default()
            },
        )
    }

    fn block_types(table: &UsageTable) -> Vec<&str> {
        table.rows.iter().map(|row| row.block_type.as_str()).collect()
    }

    fn titles(table: &UsageTable) -> Vec<String> {
        let mut titles: Vec<String> = table
            .rows
            .iter()
            .map(|row| row.title_link.label.clone())
            .collect();
        titles.sort();
        titles
    }

    // =============================================================================
    // STORAGE → RESOLVER
    // =============================================================================

    #[test]
    fn test_demo_rows_resolve_except_deleted_blocks() {
        let store = demo_store();
        let resolver = BlockResolver::new(Arc::clone(&store));

        let records = store.fetch_all().unwrap();
        assert_eq!(records.len(), DEMO_USAGE_ROWS);

        let ids: Vec<u64> = records.iter().map(|r| r.block_content_id).collect();
        let blocks = resolver.resolve_blocks(&ids).unwrap();
        assert_eq!(blocks.len(), DEMO_USAGE_ROWS - 4);
        for deleted in [10, 20, 30, 40] {
            assert!(!blocks.contains_key(&deleted));
        }

        assert!(matches!(
            resolver.resolve_block(10),
            Err(ResolveError::BlockNotFound { id: 10 })
        ));
        assert_eq!(resolver.resolve_block_type(1).unwrap(), "basic");
        assert_eq!(
            resolver.resolve_page_title("taxonomy_term", 12).unwrap(),
            "Engineering"
        );
    }

    // =============================================================================
    // STORAGE → CLI LISTER
    // =============================================================================

    #[test]
    fn test_list_block_matches_bundle_in_usage_order() {
        let outcome = lister(&demo_store()).list("basic");

        assert_eq!(outcome.match_count, 11);
        assert_eq!(outcome.links.len(), 11);
        assert_eq!(&outcome.links[..3], &["/node/1", "/node/5", "/node/3"]);
        assert_eq!(outcome.scanned, DEMO_USAGE_ROWS);
        assert_eq!(outcome.skipped, 4);
        assert!(outcome.error_lines().is_empty());
    }

    #[test]
    fn test_list_block_skips_deleted_blocks() {
        // hero_banner blocks 10 and 30 are gone
        let outcome = lister(&demo_store()).list("hero_banner");
        assert_eq!(outcome.match_count, 9);
    }

    #[test]
    fn test_list_block_unknown_bundle_prints_available() {
        let outcome = lister(&demo_store()).list("Basic");

        assert!(!outcome.has_matches());
        assert_eq!(
            outcome.error_lines(),
            vec![
                NO_MATCH_BANNER.to_string(),
                String::new(),
                "basic".to_string(),
                "hero_banner".to_string(),
                "call_to_action".to_string(),
                "accordion".to_string(),
            ]
        );
    }

    #[test]
    fn test_list_block_on_failing_storage() {
        let store = Arc::new(UsageStorageService::new(FailingKVStore, BincodeCodec));
        let outcome =
            CliLister::new(Arc::clone(&store), BlockResolver::new(store)).list("basic");

        assert!(outcome.storage_error.is_some());
        assert_eq!(outcome.scanned, 0);
        let lines = outcome.error_lines();
        assert!(lines[0].starts_with("Failed to read inline block usage"));
        assert_eq!(lines[1], NO_MATCH_BANNER);
    }

    // =============================================================================
    // STORAGE → WEB TABLE (PAGE SCOPE)
    // =============================================================================

    #[test]
    fn test_page_scope_sorts_within_insertion_order_page() {
        let table = view(&demo_store(), SortScope::Page).build(&TableRequest::default());

        assert_eq!(table.pager.total(), DEMO_USAGE_ROWS);
        assert_eq!(table.pager.total_pages(), 2);
        assert_eq!(table.rows.len(), 23);
        assert_eq!(table.skipped, 2);

        let types = block_types(&table);
        let mut sorted = types.clone();
        sorted.sort_by_key(|t| t.to_lowercase());
        assert_eq!(types, sorted);

        // The page holds the first 25 usage rows, whatever the sort.
        let labels = ["Basic block", "Hero banner", "Call to action", "Accordion"];
        let mut expected: Vec<String> = (1..=25u64)
            .filter(|id| id % 10 != 0)
            .map(|id| format!("{} #{id}", labels[((id - 1) % 4) as usize]))
            .collect();
        expected.sort();
        assert_eq!(titles(&table), expected);
    }

    #[test]
    fn test_page_scope_descending_second_page() {
        let request = TableRequest::page(1).with_sort(BLOCK_TYPE_COLUMN, "DESC");
        let table = view(&demo_store(), SortScope::Page).build(&request);

        assert_eq!(table.rows.len(), 15);
        assert_eq!(table.rows[0].block_type, "Hero banner");
        assert_eq!(table.rows.last().unwrap().block_type, "Accordion");
        assert_eq!(
            table.page_query(0),
            vec![
                ("page", "0".to_string()),
                ("order", BLOCK_TYPE_COLUMN.to_string()),
                ("sort", "DESC".to_string()),
            ]
        );
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let table = view(&demo_store(), SortScope::Page).build(&TableRequest::page(5));

        assert!(table.is_empty());
        assert!(!table.pager.is_in_range());
        assert_eq!(table.pager.total_pages(), 2);
    }

    // =============================================================================
    // STORAGE → WEB TABLE (GLOBAL SCOPE)
    // =============================================================================

    #[test]
    fn test_global_scope_sorts_before_paginating() {
        let store = demo_store();
        let view = view(&store, SortScope::Global);

        let first = view.build(&TableRequest::default());
        assert_eq!(first.pager.total(), 38);
        assert_eq!(first.rows.len(), 25);
        assert_eq!(first.rows[0].block_type, "Accordion");
        assert_eq!(first.rows[0].title_link.label, "Accordion #4");
        assert_eq!(first.rows.iter().filter(|r| r.block_type == "Accordion").count(), 8);
        assert_eq!(first.rows.iter().filter(|r| r.block_type == "Basic block").count(), 11);

        let second = view.build(&TableRequest::page(1));
        assert_eq!(second.rows.len(), 13);
        assert_eq!(second.rows.last().unwrap().block_type, "Hero banner");
    }

    #[test]
    fn test_global_scope_descending() {
        let request = TableRequest::default().with_sort(BLOCK_TYPE_COLUMN, "desc");
        let table = view(&demo_store(), SortScope::Global).build(&request);

        assert_eq!(table.rows[0].block_type, "Hero banner");
        assert_eq!(table.rows.iter().filter(|r| r.block_type == "Hero banner").count(), 9);
    }

    // =============================================================================
    // DANGLING REFERENCES
    // =============================================================================

    #[test]
    fn test_missing_page_and_bundle_type_still_render() {
        let mut service = UsageStorageService::in_memory();
        {
            let mut writer = service.writer();
            writer.insert_block_type("basic", "Basic").unwrap();
            writer.insert_block(1, "basic", "Intro").unwrap();
            writer.insert_block(2, "orphan", "Lost type").unwrap();
            writer.insert_page("node", 7, "Landing").unwrap();
            writer.record_usage(1, "node", 99).unwrap();
            writer.record_usage(2, "node", 7).unwrap();
        }
        let store = Arc::new(service);

        let table = view(&store, SortScope::Page).build(&TableRequest::default());
        assert_eq!(block_types(&table), vec!["Basic", "orphan"]);

        let intro = &table.rows[0];
        assert_eq!(intro.edit_link.href, "/node/99/layout");
        assert_eq!(intro.edit_link.label(), "Edit");
        assert_eq!(table.rows[1].edit_link.label(), "Edit (Landing)");

        let outcome = lister(&store).list("orphan");
        assert_eq!(outcome.links, vec!["/node/7"]);
    }

    #[test]
    fn test_rebuilding_table_is_deterministic() {
        let store = demo_store();
        let view = view(&store, SortScope::Page);
        let request = TableRequest::page(1).with_sort(BLOCK_TYPE_COLUMN, "desc");

        assert_eq!(view.build(&request), view.build(&request));
    }
}
