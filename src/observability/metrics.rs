//! Metrics collection and exposition.
//!
//! # Metrics
//! - `client_requests_total` (counter): calls by `source` (remote, synthetic)
//!   and `outcome` (ok, error)
//! - `client_fallback_total` (counter): fallback attempts by `outcome`
//!   (matched, unmatched, faulted)
//! - `mock_server_requests_total` (counter): developer server requests by `status`
//! - `client_request_duration_seconds` (histogram): end-to-end call latency
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - Prometheus exposition is opt-in from config

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Where a call's envelope came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Remote,
    Synthetic,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Remote => "remote",
            Source::Synthetic => "synthetic",
        }
    }
}

/// Start the Prometheus scrape endpoint. Must run inside a tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_call(source: Source, ok: bool, started: Instant) {
    let outcome = if ok { "ok" } else { "error" };
    metrics::counter!("client_requests_total", "source" => source.as_str(), "outcome" => outcome).increment(1);
    metrics::histogram!("client_request_duration_seconds", "source" => source.as_str())
        .record(started.elapsed().as_secs_f64());
}

pub fn record_fallback(outcome: &'static str) {
    metrics::counter!("client_fallback_total", "outcome" => outcome).increment(1);
}

pub fn record_server_request(status: u16) {
    metrics::counter!("mock_server_requests_total", "status" => status.to_string()).increment(1);
}
