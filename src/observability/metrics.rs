//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_submissions_total` (counter): form submissions by outcome
//! - `relay_datagrams_received_total` (counter): datagrams read by the worker
//! - `relay_datagrams_dropped_total` (counter): undecodable datagrams by reason
//! - `relay_messages_stored_total` (counter): records written to the store
//!
//! Recording is a no-op until an exporter is installed.

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_submission(outcome: &'static str) {
    metrics::counter!("relay_submissions_total", "outcome" => outcome).increment(1);
}

pub fn record_datagram_received() {
    metrics::counter!("relay_datagrams_received_total").increment(1);
}

pub fn record_datagram_dropped(reason: &'static str) {
    metrics::counter!("relay_datagrams_dropped_total", "reason" => reason).increment(1);
}

pub fn record_message_stored() {
    metrics::counter!("relay_messages_stored_total").increment(1);
}
