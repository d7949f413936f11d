//! # Report Telemetry
//!
//! Logging and metrics for the inline block usage report binaries.
//!
//! ## Components
//!
//! - **Logging**: `tracing-subscriber` with an `EnvFilter`, compact or JSON
//!   output, always on stderr
//! - **Metrics**: Prometheus counters and a render-time histogram in a
//!   process-wide registry, exposed as text on `GET /metrics`
//!
//! The library crates only emit `tracing` events; installing a subscriber and
//! recording metrics is left to the binary and the gateway.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use report_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_telemetry(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `IB_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `IB_JSON_LOGS` | `false` | JSON formatted log lines |
//! | `IB_LOG_ANSI` | `true` | Coloured log output |
//! | `IB_SERVICE_NAME` | `inline-block-report` | Service name in log lines |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{
    encode_metrics, record_report, register_metrics, HistogramTimer, ReportCounts,
    REPORT_RENDER_DURATION, REPORT_REQUESTS, RESOLUTION_FAILURES, STORAGE_READ_FAILURES,
    USAGE_RECORDS_SCANNED,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Register metrics and install the global log subscriber.
///
/// Fails if a subscriber is already installed.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    register_metrics()?;
    init_logging(config)?;

    tracing::debug!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "Telemetry initialized"
    );
    Ok(())
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}

/// Start timing for a histogram. Observation happens on drop.
#[macro_export]
macro_rules! time_histogram {
    ($histogram:expr) => {
        $crate::metrics::HistogramTimer::new(&$histogram)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_inc_macro() {
        let before = REPORT_REQUESTS.with_label_values(&["test"]).get();
        metric_inc!(REPORT_REQUESTS, &["test"]);
        assert!(REPORT_REQUESTS.with_label_values(&["test"]).get() >= before + 1.0);
    }

    #[test]
    fn test_error_display() {
        let err = TelemetryError::Config("bad level".into());
        assert_eq!(err.to_string(), "Invalid configuration: bad level");
    }
}
