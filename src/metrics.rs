//! Prometheus metrics for request tracking and monitoring.
//!
//! This module provides metrics for:
//! - Requests and failures per pipeline endpoint
//! - HTTP request latency
//! - Price source latency and fallbacks
//! - Predictions served and retraining runs

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// Price fetch latency metric name.
pub const METRIC_PRICE_FETCH_LATENCY: &str = "price_fetch_latency_ms";
/// Pipeline requests counter metric name.
pub const METRIC_PIPELINE_REQUESTS: &str = "pipeline_requests_total";
/// Pipeline errors counter metric name.
pub const METRIC_PIPELINE_ERRORS: &str = "pipeline_errors_total";
/// Predictions served counter metric name.
pub const METRIC_PREDICTIONS_SERVED: &str = "predictions_served_total";
/// Retraining runs counter metric name.
pub const METRIC_RETRAINS_TRIGGERED: &str = "retrains_triggered_total";
/// Price fallbacks counter metric name.
pub const METRIC_PRICE_FALLBACKS: &str = "price_fallbacks_total";

/// Initialize all metric descriptions.
/// Call this once at startup, after the recorder is installed.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );
    describe_histogram!(
        METRIC_PRICE_FETCH_LATENCY,
        "Copper price fetch latency in milliseconds"
    );

    describe_counter!(
        METRIC_PIPELINE_REQUESTS,
        "Total number of pipeline API requests"
    );
    describe_counter!(
        METRIC_PIPELINE_ERRORS,
        "Total number of pipeline API requests that failed"
    );
    describe_counter!(
        METRIC_PREDICTIONS_SERVED,
        "Total number of predictions served"
    );
    describe_counter!(
        METRIC_RETRAINS_TRIGGERED,
        "Total number of manual retraining runs"
    );
    describe_counter!(
        METRIC_PRICE_FALLBACKS,
        "Total number of predictions made with the fallback price"
    );

    debug!("Metrics initialized");
}

/// Install the global Prometheus recorder.
pub fn install_prometheus() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Record HTTP request latency.
pub fn record_http_latency(latency_ms: f64, endpoint: &'static str) {
    histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => endpoint).record(latency_ms);
}

/// Record price fetch latency.
pub fn record_price_fetch_latency(start: Instant) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_PRICE_FETCH_LATENCY).record(latency_ms);
}

/// Increment pipeline requests counter.
pub fn inc_pipeline_requests(endpoint: &'static str) {
    counter!(METRIC_PIPELINE_REQUESTS, "endpoint" => endpoint).increment(1);
}

/// Increment pipeline errors counter.
pub fn inc_pipeline_errors(endpoint: &'static str) {
    counter!(METRIC_PIPELINE_ERRORS, "endpoint" => endpoint).increment(1);
}

/// Increment predictions served counter.
pub fn inc_predictions_served() {
    counter!(METRIC_PREDICTIONS_SERVED).increment(1);
}

/// Increment retraining runs counter.
pub fn inc_retrains_triggered() {
    counter!(METRIC_RETRAINS_TRIGGERED).increment(1);
}

/// Increment price fallbacks counter.
pub fn inc_price_fallbacks() {
    counter!(METRIC_PRICE_FALLBACKS).increment(1);
}

/// RAII guard for timing a request to one endpoint.
/// Counts the request on creation and records latency when dropped.
pub struct RequestTimer {
    start: Instant,
    endpoint: &'static str,
}

impl RequestTimer {
    /// Start timing a request to `endpoint`.
    pub fn new(endpoint: &'static str) -> Self {
        inc_pipeline_requests(endpoint);
        Self {
            start: Instant::now(),
            endpoint,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for RequestTimer {
    fn drop(&mut self) {
        record_http_latency(self.elapsed_ms(), self.endpoint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn request_timer_measures_time() {
        let timer = RequestTimer::new("test_endpoint");
        sleep(Duration::from_millis(10));
        let elapsed = timer.elapsed_ms();
        assert!(elapsed >= 9.0); // Allow some tolerance
        // Timer will record on drop
    }
}
