//! Metrics collection and exposition.
//!
//! # Metrics
//! - `middleman_requests_total` (counter): relayed requests by method, status
//! - `middleman_request_duration_seconds` (histogram): end-to-end latency
//! - `middleman_upstream_failures_total` (counter): transport failures by kind
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Start the Prometheus scrape endpoint on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a finished request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "middleman_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "middleman_request_duration_seconds",
        "method" => method.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record a request that never produced an upstream response.
pub fn record_upstream_failure(kind: &'static str) {
    metrics::counter!("middleman_upstream_failures_total", "kind" => kind).increment(1);
}
