//! # Block Resolver (ib-02)
//!
//! Turns the foreign keys of a usage row into what a report displays:
//!
//! ```text
//! block_content_id ──→ BlockContent ──bundle──→ BlockContentType
//!                          │                          │
//!                          └──────→ BlockInfo ←───────┘ (bundle, bundle_label, title)
//!
//! (layout_entity_type, layout_entity_id) ──→ LayoutEntity ──→ PageInfo (title)
//! ```
//!
//! Single-id lookups fail with `ResolveError::BlockNotFound` / `PageNotFound`.
//! Batched lookups (`resolve_blocks`, `resolve_pages`) issue one storage read
//! per entity kind and leave unresolvable ids out of the returned map.

pub mod errors;
pub mod resolver;

pub use errors::ResolveError;
pub use resolver::BlockResolver;
