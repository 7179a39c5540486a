//! Metrics collection and exposition.
//!
//! # Metrics
//! - `route_match_total` (counter): match attempts by outcome
//! - `route_match_duration_seconds` (histogram): matching service latency
//! - `route_render_total` (counter): route layer changes by outcome
//! - `route_pipeline_total` (counter): draw events by final pipeline outcome
//! - `draw_events_total` (counter): drawing surface notifications by kind
//!
//! Without an installed recorder every call is a no-op, so library code and
//! tests can record unconditionally.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one match attempt.
pub fn record_match(outcome: &'static str, start: Instant) {
    counter!("route_match_total", "outcome" => outcome).increment(1);
    histogram!("route_match_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record a route layer change.
pub fn record_render(outcome: &'static str) {
    counter!("route_render_total", "outcome" => outcome).increment(1);
}

/// Record how a draw event was resolved.
pub fn record_pipeline(outcome: &'static str) {
    counter!("route_pipeline_total", "outcome" => outcome).increment(1);
}

/// Record a drawing surface notification.
pub fn record_draw_event(kind: &'static str) {
    counter!("draw_events_total", "kind" => kind).increment(1);
}
