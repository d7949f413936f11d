//! # Inline Block Usage Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Report build and resolution benchmarks
//! └── src/integration/  # Cross-crate flows
//!     ├── report_flows.rs   # storage → resolver → lister / table
//!     └── gateway_flows.rs  # storage → gateway router / TCP server
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ib-tests
//! cargo test -p ib-tests integration::gateway_flows
//!
//! # Benchmarks
//! cargo bench -p ib-tests
//! ```

pub mod integration;
