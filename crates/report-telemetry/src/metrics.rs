//! Prometheus metrics for the usage report.
//!
//! All metrics follow the naming convention: `ib_<area>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Histogram, HistogramOpts, Opts, Registry,
    TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Usage rows read from storage, across all reports
    pub static ref USAGE_RECORDS_SCANNED: Counter = Counter::new(
        "ib_usage_records_scanned_total",
        "Total number of inline block usage rows scanned"
    ).expect("metric creation failed");

    /// Rows whose entities did not resolve
    pub static ref RESOLUTION_FAILURES: CounterVec = CounterVec::new(
        Opts::new("ib_resolution_failures_total", "Usage rows whose entities did not resolve"),
        &["kind"]  // kind: block/page
    ).expect("metric creation failed");

    /// Usage table reads that failed
    pub static ref STORAGE_READ_FAILURES: Counter = Counter::new(
        "ib_storage_read_failures_total",
        "Total number of failed usage table reads"
    ).expect("metric creation failed");

    /// Reports produced
    pub static ref REPORT_REQUESTS: CounterVec = CounterVec::new(
        Opts::new("ib_report_requests_total", "Total number of reports produced"),
        &["surface"]  // surface: cli/web
    ).expect("metric creation failed");

    /// Time spent building and rendering a report
    pub static ref REPORT_RENDER_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "ib_report_render_duration_seconds",
            "Time spent building and rendering a report"
        ).buckets(exponential_buckets(0.0005, 2.0, 14).expect("valid buckets"))
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry. Safe to call repeatedly.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(USAGE_RECORDS_SCANNED.clone()),
        Box::new(RESOLUTION_FAILURES.clone()),
        Box::new(STORAGE_READ_FAILURES.clone()),
        Box::new(REPORT_REQUESTS.clone()),
        Box::new(REPORT_RENDER_DURATION.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }
    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    register_metrics()?;

    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Counts gathered while producing one report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportCounts {
    /// Usage rows read from storage
    pub scanned: usize,
    /// Rows skipped because the block is gone
    pub missing_blocks: usize,
    /// Rows rendered without a page title
    pub missing_pages: usize,
    /// Whether the usage read failed
    pub storage_failed: bool,
}

/// Record one report produced on `surface` (`cli` or `web`).
pub fn record_report(surface: &str, counts: ReportCounts) {
    REPORT_REQUESTS.with_label_values(&[surface]).inc();
    USAGE_RECORDS_SCANNED.inc_by(counts.scanned as f64);
    if counts.missing_blocks > 0 {
        RESOLUTION_FAILURES
            .with_label_values(&["block"])
            .inc_by(counts.missing_blocks as f64);
    }
    if counts.missing_pages > 0 {
        RESOLUTION_FAILURES
            .with_label_values(&["page"])
            .inc_by(counts.missing_pages as f64);
    }
    if counts.storage_failed {
        STORAGE_READ_FAILURES.inc();
    }
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        self.histogram.observe(self.start.elapsed().as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_metrics_is_idempotent() {
        register_metrics().unwrap();
        register_metrics().unwrap();
    }

    #[test]
    fn test_encoded_metrics_contain_names() {
        USAGE_RECORDS_SCANNED.inc_by(3.0);
        RESOLUTION_FAILURES.with_label_values(&["block"]).inc();
        REPORT_REQUESTS.with_label_values(&["web"]).inc();

        let text = encode_metrics().unwrap();
        assert!(text.contains("ib_usage_records_scanned_total"));
        assert!(text.contains("ib_resolution_failures_total{kind=\"block\"}"));
        assert!(text.contains("ib_report_requests_total{surface=\"web\"}"));
    }

    #[test]
    fn test_record_report_counts() {
        let scanned = USAGE_RECORDS_SCANNED.get();
        let failures = STORAGE_READ_FAILURES.get();
        let pages = RESOLUTION_FAILURES.with_label_values(&["page"]).get();

        record_report(
            "cli",
            ReportCounts {
                scanned: 4,
                missing_blocks: 0,
                missing_pages: 2,
                storage_failed: true,
            },
        );

        assert!(USAGE_RECORDS_SCANNED.get() >= scanned + 4.0);
        assert!(STORAGE_READ_FAILURES.get() >= failures + 1.0);
        assert!(RESOLUTION_FAILURES.with_label_values(&["page"]).get() >= pages + 2.0);
    }

    #[test]
    fn test_histogram_timer_observes_on_drop() {
        let before = REPORT_RENDER_DURATION.get_sample_count();
        {
            let _timer = HistogramTimer::new(&REPORT_RENDER_DURATION);
        }
        assert!(REPORT_RENDER_DURATION.get_sample_count() > before);
    }
}
