//! Demo dataset for `ib-admin --demo` and `ib-admin seed-demo`.

use crate::domain::errors::StorageError;
use crate::ports::outbound::{EntityCodec, KeyValueStore};
use crate::service::UsageStorageService;

const BUNDLES: &[(&str, &str)] = &[
    ("basic", "Basic block"),
    ("hero_banner", "Hero banner"),
    ("call_to_action", "Call to action"),
    ("accordion", "Accordion"),
];

const PAGES: &[(&str, u64, &str)] = &[
    ("node", 1, "Home"),
    ("node", 2, "About us"),
    ("node", 3, "Pricing"),
    ("node", 4, "Careers"),
    ("node", 5, "Contact"),
    ("taxonomy_term", 12, "Engineering"),
];

/// Number of usage rows written by `seed_demo_dataset`.
pub const DEMO_USAGE_ROWS: usize = 42;

/// Populate `service` with block types, pages and `DEMO_USAGE_ROWS` usage rows.
///
/// Block ids start at 1; every tenth block is deleted after its usage row is
/// written, so the dataset also exercises the not-found path.
pub fn seed_demo_dataset<KV, C>(service: &mut UsageStorageService<KV, C>) -> Result<(), StorageError>
where
    KV: KeyValueStore,
    C: EntityCodec,
{
    let mut writer = service.writer();

    for (bundle, label) in BUNDLES {
        writer.insert_block_type(bundle, label)?;
    }
    for (entity_type, id, label) in PAGES {
        writer.insert_page(entity_type, *id, label)?;
    }

    for n in 0..DEMO_USAGE_ROWS {
        let block_id = n as u64 + 1;
        let (bundle, label) = BUNDLES[n % BUNDLES.len()];
        let (entity_type, page_id, _) = PAGES[n % PAGES.len()];

        writer.insert_block(block_id, bundle, &format!("{label} #{block_id}"))?;
        writer.record_usage(block_id, entity_type, page_id)?;
        if block_id % 10 == 0 {
            writer.remove_block(block_id)?;
        }
    }

    tracing::info!(rows = DEMO_USAGE_ROWS, "Demo usage dataset written");
    Ok(())
}
