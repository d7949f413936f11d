//! # Inline Block Usage Report Benchmarks
//!
//! | Surface | Work per call |
//! |---------|---------------|
//! | CLI listing | full scan + one batched block lookup |
//! | Web table, page scope | full scan + lookups for one page |
//! | Web table, global scope | full scan + lookups for every row + sort |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use std::time::Duration;

use ib_01_usage_storage::{BincodeCodec, InMemoryKVStore, UsageStorageService};
use ib_02_block_resolver::BlockResolver;
use ib_03_usage_report::{
    CliLister, ReportConfig, SortScope, TableRequest, WebTableView, BLOCK_TYPE_COLUMN,
};

type Store = Arc<UsageStorageService<InMemoryKVStore, BincodeCodec>>;

const BUNDLES: &[&str] = &["basic", "hero", "cta", "accordion", "gallery", "quote"];

/// `rows` usage rows spread over 50 pages and the bundles above.
fn usage_store(rows: u64) -> Store {
    let mut service = UsageStorageService::in_memory();
    {
        let mut writer = service.writer();
        for bundle in BUNDLES {
            writer.insert_block_type(bundle, &bundle.to_uppercase()).unwrap();
        }
        for page in 0..50 {
            writer.insert_page("node", page, &format!("Page {page}")).unwrap();
        }
        for id in 0..rows {
            let bundle = BUNDLES[(id as usize * 7) % BUNDLES.len()];
            writer.insert_block(id, bundle, &format!("Block {id}")).unwrap();
            writer.record_usage(id, "node", id % 50).unwrap();
        }
    }
    Arc::new(service)
}

// ============================================================================
// CLI listing
// ============================================================================

fn bench_cli_listing(c: &mut Criterion) {
    let mut group = c.benchmark_group("ib-03-cli-listing");
    group.measurement_time(Duration::from_secs(5));

    for rows in [100u64, 1_000, 10_000] {
        let store = usage_store(rows);
        let lister = CliLister::new(Arc::clone(&store), BlockResolver::new(store));

        group.throughput(Throughput::Elements(rows));
        group.bench_with_input(BenchmarkId::new("list_block", rows), &rows, |b, _| {
            b.iter(|| black_box(lister.list("hero")))
        });
    }

    group.finish();
}

// ============================================================================
// Web table
// ============================================================================

fn bench_web_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("ib-03-web-table");
    group.measurement_time(Duration::from_secs(5));

    let request = TableRequest::page(3).with_sort(BLOCK_TYPE_COLUMN, "desc");

    for rows in [1_000u64, 10_000] {
        let store = usage_store(rows);

        for (name, sort_scope) in [("page_scope", SortScope::Page), ("global_scope", SortScope::Global)] {
            let view = WebTableView::new(
                Arc::clone(&store),
                BlockResolver::new(Arc::clone(&store)),
                ReportConfig {
                    sort_scope,
                    ..ReportConfig::default()
                },
            );

            group.throughput(Throughput::Elements(rows));
            group.bench_with_input(BenchmarkId::new(name, rows), &rows, |b, _| {
                b.iter(|| black_box(view.build(&request)))
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_cli_listing, bench_web_table);
criterion_main!(benches);
