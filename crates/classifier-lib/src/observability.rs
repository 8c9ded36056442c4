//! Observability infrastructure for the classification service
//!
//! Provides:
//! - Prometheus metrics (classification latency, status counters,
//!   data-quality counters, active threshold info)
//! - Structured JSON logging with tracing

use prometheus::{register_gauge_vec, register_histogram, register_int_gauge, GaugeVec, Histogram, IntGauge};
use std::sync::OnceLock;
use tracing::{info, warn};

/// Histogram buckets for classification latency (in seconds); a single
/// call is a few arithmetic passes, so the scale starts in microseconds
const LATENCY_BUCKETS: &[f64] = &[
    0.000_001, 0.000_005, 0.000_01, 0.000_05, 0.000_1, 0.000_5, 0.001, 0.005, 0.01, 0.05,
];

/// Global metrics instance (registered once per process)
static GLOBAL_METRICS: OnceLock<ServiceMetricsInner> = OnceLock::new();

struct ServiceMetricsInner {
    classification_latency_seconds: Histogram,
    classifications_total: IntGauge,
    anomalies_total: IntGauge,
    degraded_inputs_total: IntGauge,
    readings_filtered_total: IntGauge,
    threshold_info: GaugeVec,
}

impl ServiceMetricsInner {
    fn new() -> Self {
        Self {
            classification_latency_seconds: register_histogram!(
                "anomaly_service_classification_latency_seconds",
                "Time spent extracting features and classifying one batch",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register classification_latency_seconds"),

            classifications_total: register_int_gauge!(
                "anomaly_service_classifications_total",
                "Total number of classification requests served"
            )
            .expect("Failed to register classifications_total"),

            anomalies_total: register_int_gauge!(
                "anomaly_service_anomalies_total",
                "Total number of warning or critical classifications"
            )
            .expect("Failed to register anomalies_total"),

            degraded_inputs_total: register_int_gauge!(
                "anomaly_service_degraded_inputs_total",
                "Total number of batches where no reading passed validity filtering"
            )
            .expect("Failed to register degraded_inputs_total"),

            readings_filtered_total: register_int_gauge!(
                "anomaly_service_readings_filtered_total",
                "Total number of individual readings dropped by validity filtering"
            )
            .expect("Failed to register readings_filtered_total"),

            threshold_info: register_gauge_vec!(
                "anomaly_service_threshold_info",
                "Active classifier thresholds",
                &["reference", "warning", "critical"]
            )
            .expect("Failed to register threshold_info"),
        }
    }
}

/// Service metrics for Prometheus exposition
///
/// A lightweight handle to the global metrics instance; clones share
/// the same underlying metrics.
#[derive(Clone)]
pub struct ServiceMetrics {
    _private: (),
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceMetrics {
    /// Create a metrics handle, registering the global set on first use
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(ServiceMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &ServiceMetricsInner {
        GLOBAL_METRICS.get().expect("Metrics not initialized")
    }

    pub fn observe_classification_latency(&self, duration_secs: f64) {
        self.inner()
            .classification_latency_seconds
            .observe(duration_secs);
    }

    pub fn inc_classifications(&self) {
        self.inner().classifications_total.inc();
    }

    pub fn inc_anomalies(&self) {
        self.inner().anomalies_total.inc();
    }

    pub fn inc_degraded_inputs(&self) {
        self.inner().degraded_inputs_total.inc();
    }

    pub fn add_readings_filtered(&self, count: i64) {
        self.inner().readings_filtered_total.add(count);
    }

    /// Publish the active thresholds as an info-style gauge
    pub fn set_threshold_info(&self, reference: f64, warning: f64, critical: f64) {
        let reference = reference.to_string();
        let warning = warning.to_string();
        let critical = critical.to_string();

        let info = &self.inner().threshold_info;
        info.reset();
        info.with_label_values(&[&reference, &warning, &critical])
            .set(1.0);
    }
}

/// Structured logger for classification events
///
/// Emits consistent JSON-formatted events tagged with the site the
/// service is deployed for.
#[derive(Clone)]
pub struct StructuredLogger {
    site_name: String,
}

impl StructuredLogger {
    pub fn new(site_name: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
        }
    }

    /// Log one classification; warning and critical results are logged
    /// at warn level so operators can filter on them directly
    pub fn log_classification(
        &self,
        status: &str,
        confidence: f64,
        mean_temperature: f64,
        active_sensors: usize,
        input_sensors: usize,
    ) {
        match status {
            "warning" | "critical" => {
                warn!(
                    event = "sensor_classification",
                    site = %self.site_name,
                    status = %status,
                    confidence,
                    mean_temperature,
                    active_sensors,
                    input_sensors,
                    "Anomalous sensor batch"
                );
            }
            _ => {
                info!(
                    event = "sensor_classification",
                    site = %self.site_name,
                    status = %status,
                    confidence,
                    mean_temperature,
                    active_sensors,
                    input_sensors,
                    "Classified sensor batch"
                );
            }
        }
    }

    /// Log a batch where every reading was dropped
    pub fn log_degraded_input(&self, input_sensors: usize) {
        warn!(
            event = "degraded_input",
            site = %self.site_name,
            input_sensors,
            "No reading passed validity filtering; returning fallback result"
        );
    }

    pub fn log_startup(&self, version: &str) {
        info!(
            event = "service_started",
            site = %self.site_name,
            service_version = %version,
            "Anomaly classification service started"
        );
    }

    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "service_shutdown",
            site = %self.site_name,
            reason = %reason,
            "Anomaly classification service shutting down"
        );
    }
}
