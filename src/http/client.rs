//! Request client.
//!
//! # Data Flow
//! ```text
//! OutboundRequest
//!     → interceptor chain (bearer token, request id)
//!     → synthetic mode? ── yes ──→ FallbackAdapter::respond
//!     → reqwest transport (base address + relative URL, timeout)
//!         ok   → envelope-shaped body? Envelope : Raw
//!         fail → FallbackAdapter::recover → Some: Envelope
//!                                         → None: classify, notify, Err
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::policy::{is_absolute, resolve_policy, Policy};
use crate::config::schema::ClientConfig;
use crate::http::envelope::Envelope;
use crate::http::error::ClientError;
use crate::http::fallback::FallbackAdapter;
use crate::http::interceptor::{default_chain, RequestInterceptor};
use crate::http::request::OutboundRequest;
use crate::mock::MockBackend;
use crate::observability::metrics::{self, Source};
use crate::routing::UrlNormalizer;
use crate::storage::KeyValueStore;

/// A successful call's body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Envelope(Envelope),
    /// JSON (or text) that is not envelope-shaped, passed through untouched.
    Raw(Value),
}

impl Payload {
    /// Envelope view; raw bodies become the data of a 200 envelope.
    pub fn into_envelope(self) -> Envelope {
        match self {
            Payload::Envelope(envelope) => envelope,
            Payload::Raw(value) => Envelope::ok("OK", value),
        }
    }
}

/// Receives user-visible failure notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, error: &ClientError);
}

/// Writes notifications to the log.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, error: &ClientError) {
        let category = error
            .category()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "client".to_string());
        tracing::warn!(category = %category, "{}", error.user_message());
    }
}

pub struct RequestClient {
    http: reqwest::Client,
    policy: Policy,
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
    fallback: FallbackAdapter,
    notifier: Arc<dyn Notifier>,
    store: Arc<dyn KeyValueStore>,
}

impl RequestClient {
    /// Build a client from configuration, with the default interceptor chain
    /// and a freshly seeded synthetic backend.
    pub fn new(config: &ClientConfig, store: Arc<dyn KeyValueStore>) -> Result<Self, ClientError> {
        let env = &config.environment;
        let normalizer = UrlNormalizer::new(env.api_root.clone(), env.deploy_prefix.clone());
        let backend = Arc::new(MockBackend::seeded(normalizer));
        Self::with_backend(config, store, backend)
    }

    /// Build a client around an existing synthetic backend.
    pub fn with_backend(
        config: &ClientConfig,
        store: Arc<dyn KeyValueStore>,
        backend: Arc<MockBackend>,
    ) -> Result<Self, ClientError> {
        let policy = resolve_policy(&config.environment);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::InvalidRequest(format!("failed to build HTTP client: {e}")))?;

        let fallback = FallbackAdapter::new(
            backend,
            policy.clone(),
            Duration::from_millis(config.environment.mock_delay_ms),
        );

        tracing::debug!(
            base_address = %policy.base_address,
            use_synthetic = policy.use_synthetic,
            fallback_eligible = policy.fallback_eligible,
            "Request client ready"
        );

        Ok(Self {
            http,
            interceptors: default_chain(store.clone()),
            policy,
            fallback,
            notifier: Arc::new(LogNotifier),
            store,
        })
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Append an interceptor after the default chain.
    pub fn with_interceptor(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    pub fn backend(&self) -> &Arc<MockBackend> {
        self.fallback.backend()
    }

    /// Send one call through the interceptor chain, transport and fallback.
    pub async fn send(&self, mut request: OutboundRequest) -> Result<Payload, ClientError> {
        let started = Instant::now();
        for interceptor in &self.interceptors {
            interceptor.intercept(&mut request)?;
        }

        if self.policy.use_synthetic {
            return match self.fallback.respond(&request).await {
                Some(response) => {
                    metrics::record_call(Source::Synthetic, true, started);
                    Ok(Payload::Envelope(response.envelope))
                }
                None => {
                    let err = ClientError::status(404, None);
                    metrics::record_call(Source::Synthetic, false, started);
                    self.report(&request, &err);
                    Err(err)
                }
            };
        }

        match self.transport(&request).await {
            Ok(payload) => {
                metrics::record_call(Source::Remote, true, started);
                Ok(payload)
            }
            Err(err) => {
                tracing::debug!(
                    request_id = request.request_id().unwrap_or("-"),
                    url = %request.url,
                    error = %err,
                    "Transport failed"
                );
                if let Some(response) = self.fallback.recover(&request).await {
                    metrics::record_call(Source::Synthetic, true, started);
                    return Ok(Payload::Envelope(response.envelope));
                }
                metrics::record_call(Source::Remote, false, started);
                self.report(&request, &err);
                Err(err)
            }
        }
    }

    /// Send and decode the envelope's data.
    pub async fn call<T: DeserializeOwned>(&self, request: OutboundRequest) -> Result<Envelope<T>, ClientError> {
        Ok(self.send(request).await?.into_envelope().decode()?)
    }

    async fn transport(&self, request: &OutboundRequest) -> Result<Payload, ClientError> {
        let address = self.fallback.full_address(&request.url);
        if !is_absolute(&address) {
            return Err(ClientError::Network(format!(
                "no backend address configured for {address}"
            )));
        }

        let mut builder = self
            .http
            .request(request.method.clone(), &address)
            .headers(request.headers.clone());
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let parsed: Option<Value> = serde_json::from_str(&text).ok();

        if !status.is_success() {
            let server_message = parsed
                .as_ref()
                .and_then(|b| b.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string);
            return Err(ClientError::status(status.as_u16(), server_message));
        }

        let body = parsed.unwrap_or(Value::String(text));
        Ok(match Envelope::from_value(body) {
            Ok(envelope) => Payload::Envelope(envelope),
            Err(raw) => Payload::Raw(raw),
        })
    }

    fn report(&self, request: &OutboundRequest, err: &ClientError) {
        if self.policy.notify_failures {
            self.notifier.notify(err);
        } else {
            tracing::debug!(
                request_id = request.request_id().unwrap_or("-"),
                url = %request.url,
                error = %err,
                "Request failed"
            );
        }
    }
}

impl std::fmt::Debug for RequestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestClient")
            .field("policy", &self.policy)
            .field("interceptors", &self.interceptors.iter().map(|i| i.name()).collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{BuildMode, EnvironmentConfig};
    use crate::storage::{MemoryStore, TOKEN_KEY};
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl Notifier for Recorder {
        fn notify(&self, error: &ClientError) {
            self.0.lock().unwrap().push(error.user_message());
        }
    }

    fn config(mode: BuildMode, use_mock: bool, url: Option<&str>) -> ClientConfig {
        ClientConfig {
            environment: EnvironmentConfig {
                mode,
                use_mock,
                api_base_url: url.map(String::from),
                mock_delay_ms: 0,
                ..EnvironmentConfig::default()
            },
            ..ClientConfig::default()
        }
    }

    #[tokio::test]
    async fn test_synthetic_mode_skips_transport() {
        let client = RequestClient::new(&config(BuildMode::Development, true, Some("http://127.0.0.1:1")), Arc::new(MemoryStore::new())).unwrap();
        let env = client.call::<Value>(OutboundRequest::get("/tracking/statistics")).await.unwrap();
        assert_eq!(env.code, 200);
    }

    #[tokio::test]
    async fn test_synthetic_mode_unmatched_notifies() {
        let recorder = Arc::new(Recorder::default());
        let client = RequestClient::new(&config(BuildMode::Development, true, None), Arc::new(MemoryStore::new()))
            .unwrap()
            .with_notifier(recorder.clone());
        let err = client.send(OutboundRequest::get("/nowhere")).await.unwrap_err();
        assert_eq!(err.category(), Some(crate::http::error::ErrorCategory::NotFound));
        assert_eq!(recorder.0.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_deployed_without_address_recovers() {
        let store = Arc::new(MemoryStore::new());
        store.set(TOKEN_KEY, json!("t0k")).unwrap();
        let client = RequestClient::new(&config(BuildMode::Production, false, None), store).unwrap();
        let env = client.call::<Value>(OutboundRequest::get("/orders/ORD202401003")).await.unwrap();
        assert_eq!(env.data.unwrap()["productType"], "PLATE");

        let err = client.send(OutboundRequest::get("/nowhere")).await.unwrap_err();
        assert_eq!(err.category(), Some(crate::http::error::ErrorCategory::Network));
    }

    #[test]
    fn test_raw_payload_wraps() {
        let env = Payload::Raw(json!([1, 2])).into_envelope();
        assert_eq!(env.code, 200);
        assert_eq!(env.data, Some(json!([1, 2])));
    }
}
