//! Gateway configuration and errors.

pub mod config;
pub mod error;

pub use config::{ConfigError, GatewayConfig, HttpConfig, ReportSettings, StorageConfig, TimeoutConfig};
pub use error::GatewayError;
