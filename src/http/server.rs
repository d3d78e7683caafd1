//! Developer mock server.
//!
//! # Responsibilities
//! - Expose the synthetic backend over real HTTP
//! - Wire up middleware (tracing, timeout, request ID)
//! - Stop gracefully on the shutdown broadcast
//!
//! Matched routes answer HTTP 200 with the envelope as body; the envelope's
//! own `code` carries domain misses. Unmatched routes and handler faults
//! answer HTTP 404.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::schema::ServerConfig;
use crate::http::envelope::Envelope;
use crate::lifecycle::Shutdown;
use crate::mock::{MockBackend, QueryMap};
use crate::observability::metrics;
use crate::routing::Dispatch;

pub struct MockServer {
    router: Router,
    backend: Arc<MockBackend>,
}

impl MockServer {
    pub fn new(backend: Arc<MockBackend>, config: &ServerConfig) -> Self {
        let router = Self::build_router(backend.clone(), Duration::from_secs(config.request_timeout_secs));
        Self { router, backend }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(backend: Arc<MockBackend>, timeout: Duration) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch_handler))
            .route("/", any(dispatch_handler))
            .with_state(backend)
            .layer(TimeoutLayer::new(timeout))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn backend(&self) -> &Arc<MockBackend> {
        &self.backend
    }

    /// Serve until `shutdown` is triggered.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.backend.registry().len(),
            "Mock server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.signalled())
            .await?;

        tracing::info!("Mock server stopped");
        Ok(())
    }
}

async fn dispatch_handler(
    State(backend): State<Arc<MockBackend>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path();
    let query: QueryMap = uri
        .query()
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect()
        })
        .unwrap_or_default();

    let body: Option<Value> = if body.is_empty() {
        None
    } else {
        match serde_json::from_slice(&body) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(path = %path, error = %e, "Rejecting non-JSON body");
                metrics::record_server_request(400);
                let envelope: Envelope = Envelope::status(400, "request body must be JSON");
                return (StatusCode::BAD_REQUEST, Json(envelope)).into_response();
            }
        }
    };

    match backend.execute(method.as_str(), path, &query, body, &headers) {
        Dispatch::Matched(envelope) => {
            metrics::record_server_request(200);
            (StatusCode::OK, Json(envelope)).into_response()
        }
        Dispatch::Unmatched | Dispatch::Faulted { .. } => {
            tracing::warn!(method = %method, path = %path, "No mock route matched");
            metrics::record_server_request(404);
            let envelope: Envelope = Envelope::not_found(format!("no mock route for {method} {path}"));
            (StatusCode::NOT_FOUND, Json(envelope)).into_response()
        }
    }
}
