//! # Usage Report (ib-03)
//!
//! The two report surfaces over the inline block usage table.
//!
//! ```text
//!                    ┌──────────────┐
//!                    │ UsageReader  │  full scan, insertion order
//!                    └──────┬───────┘
//!                           │
//!                    ┌──────┴───────┐
//!                    │BlockResolver │  batched entity lookups
//!                    └──┬────────┬──┘
//!                       │        │
//!             ┌─────────┴──┐  ┌──┴────────────┐
//!             │ CliLister  │  │ WebTableView  │
//!             │ filter by  │  │ page → resolve│
//!             │ bundle     │  │ → sort → table│
//!             └────────────┘  └───────────────┘
//! ```
//!
//! ## Failure Handling
//!
//! | Failure | Behaviour |
//! |---------|-----------|
//! | Usage table unreadable | Logged; report proceeds with zero rows |
//! | Block or page missing | Row skipped (block) or hint dropped (page) |
//! | Page index past the end | Empty page |
//!
//! Nothing here renders HTML; the gateway crate turns a `UsageTable` into markup.

pub mod cli_lister;
pub mod config;
pub mod pager;
pub mod table_sort;
pub mod web_table;

pub use cli_lister::{CliLister, ListOutcome, NO_MATCH_BANNER};
pub use config::{ReportConfig, SortScope, DEFAULT_PAGE_SIZE};
pub use pager::{PageLink, Pager, PagerLinks};
pub use table_sort::{sort_rows, SortDirection, TableSortQuery, BLOCK_TYPE_COLUMN};
pub use web_table::{EditLink, HeaderCell, Link, TableRequest, UsageTable, ViewRow, WebTableView, EMPTY_MESSAGE};
