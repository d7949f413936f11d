//! Cross-crate flows over the in-memory store.

pub mod gateway_flows;
pub mod report_flows;
