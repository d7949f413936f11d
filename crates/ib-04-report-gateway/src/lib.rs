//! # Report Gateway (ib-04)
//!
//! Serves the inline block usage table over HTTP.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 REPORT GATEWAY (ib-04)               │
//! │                                                      │
//! │   Request → TracingLayer → TimeoutLayer → Handler    │
//! │                                                      │
//! │   GET /admin/content/inline-blocks   HTML table      │
//! │   GET /health                        JSON status     │
//! │   GET /metrics                       Prometheus text │
//! │                                                      │
//! │   handler ──spawn_blocking──▶ WebTableView::build    │
//! │                               └─▶ render_page        │
//! └──────────────────────────────────────────────────────┘
//!                        │
//!           UsageReader + EntityStorage (ib-01)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use ib_04_report_gateway::{GatewayConfig, ReportGatewayService};
//!
//! let config = GatewayConfig::load("gateway.toml")?;
//! let mut service = ReportGatewayService::new(config, store)?;
//! service.start().await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod middleware;
pub mod render;
pub mod router;
pub mod service;

pub use domain::config::DEFAULT_REPORT_ROUTE;
pub use domain::{ConfigError, GatewayConfig, GatewayError, HttpConfig, ReportSettings, StorageConfig, TimeoutConfig};
pub use render::{escape_html, render_page};
pub use router::{build_router, AppState, ReportStore, SharedStore};
pub use service::{ReportGatewayService, ShutdownHandle};
