//! # Shared Types Crate
//!
//! Domain vocabulary for the inline block usage report.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every type that crosses a crate boundary
//!   (storage → resolver → report → gateway) is defined here.
//! - **Read-Only Mapping**: `UsageRecord` mirrors one row of the
//!   `inline_block_usage` table. The table is owned by the layout feature of
//!   the host; nothing in this workspace mutates it on a report path.

pub mod entities;

pub use entities::*;
