//! Synthetic fallback adapter.
//!
//! # Responsibilities
//! - Decide whether a failed call may be recovered synthetically
//! - Rebuild the full address the call would have used
//! - Run it through the synthetic backend and simulate network latency
//!
//! # Design Decisions
//! - Unmatched routes and handler faults both yield `None`; the caller then
//!   surfaces the original transport failure
//! - Latency is applied only to matched responses

use std::sync::Arc;
use std::time::Duration;

use crate::config::policy::{is_absolute, Policy};
use crate::http::envelope::Envelope;
use crate::http::request::OutboundRequest;
use crate::mock::MockBackend;
use crate::observability::metrics;
use crate::routing::Dispatch;

/// A response produced without touching the network.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticResponse {
    pub status: u16,
    pub status_text: &'static str,
    pub envelope: Envelope,
}

impl SyntheticResponse {
    fn ok(envelope: Envelope) -> Self {
        Self {
            status: 200,
            status_text: "OK",
            envelope,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FallbackAdapter {
    backend: Arc<MockBackend>,
    policy: Policy,
    delay: Duration,
}

impl FallbackAdapter {
    pub fn new(backend: Arc<MockBackend>, policy: Policy, delay: Duration) -> Self {
        Self {
            backend,
            policy,
            delay,
        }
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn backend(&self) -> &Arc<MockBackend> {
        &self.backend
    }

    /// Recover a failed transport call, if policy allows it.
    pub async fn recover(&self, request: &OutboundRequest) -> Option<SyntheticResponse> {
        if !self.policy.fallback_eligible {
            tracing::debug!(url = %request.url, "Fallback not eligible");
            return None;
        }
        self.respond(request).await
    }

    /// Serve a call from the synthetic backend unconditionally.
    pub async fn respond(&self, request: &OutboundRequest) -> Option<SyntheticResponse> {
        let address = self.full_address(&request.url);
        let outcome = self.backend.execute(
            request.method.as_str(),
            &address,
            &request.query,
            request.body.clone(),
            &request.headers,
        );

        match outcome {
            Dispatch::Matched(envelope) => {
                metrics::record_fallback("matched");
                if !self.delay.is_zero() {
                    tokio::time::sleep(self.delay).await;
                }
                tracing::info!(
                    method = %request.method,
                    url = %request.url,
                    code = envelope.code,
                    "Serving synthetic response"
                );
                Some(SyntheticResponse::ok(envelope))
            }
            Dispatch::Unmatched => {
                metrics::record_fallback("unmatched");
                tracing::debug!(method = %request.method, address = %address, "No synthetic route");
                None
            }
            Dispatch::Faulted { pattern, reason } => {
                metrics::record_fallback("faulted");
                tracing::warn!(pattern = %pattern, reason = %reason, "Synthetic handler faulted, treating as unmatched");
                None
            }
        }
    }

    /// Base address joined with a relative URL. Absolute URLs pass through.
    pub fn full_address(&self, url: &str) -> String {
        let base = self.policy.base_address.as_str();
        if base.is_empty() || is_absolute(url) {
            return url.to_string();
        }
        format!("{}/{}", base.trim_end_matches('/'), url.trim_start_matches('/'))
    }
}
