//! Metrics collection and exposition.
//!
//! # Metrics
//! - `lgtm_http_requests_total` (counter): requests by method, status
//! - `lgtm_http_request_duration_seconds` (histogram): latency distribution
//! - `lgtm_repository_failures_total` (counter): DomainErrors by operation
//! - `lgtm_panics_recovered_total` (counter): handler panics turned into 500s
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed (tests never install one)
//! - Prometheus endpoint is optional and bound on its own address

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics endpoint"),
    }
}

pub fn record_request(method: &str, status: u16, start: Instant) {
    let labels = [("method", method.to_string()), ("status", status.to_string())];
    metrics::counter!("lgtm_http_requests_total", &labels[..]).increment(1);
    metrics::histogram!("lgtm_http_request_duration_seconds", &labels[..])
        .record(start.elapsed().as_secs_f64());
}

pub fn record_repository_failure(operation: &'static str) {
    metrics::counter!("lgtm_repository_failures_total", "operation" => operation).increment(1);
}

pub fn record_panic_recovered() {
    metrics::counter!("lgtm_panics_recovered_total").increment(1);
}
