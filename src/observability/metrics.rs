//! Metrics collection and exposition.
//!
//! # Metrics
//! - `form_proxy_upstream_requests_total` (counter): calls to the Student
//!   Records API by action and outcome
//! - `form_proxy_upstream_duration_seconds` (histogram): call latency by action

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Without a recorder the macros below are no-ops, so tests and runs with
/// metrics disabled pay nothing.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one upstream call. `outcome` is `ok`, `error_status` or `transport_error`.
pub fn record_upstream_call(action: &'static str, outcome: &'static str, start: Instant) {
    metrics::counter!(
        "form_proxy_upstream_requests_total",
        "action" => action,
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!("form_proxy_upstream_duration_seconds", "action" => action)
        .record(start.elapsed().as_secs_f64());
}
