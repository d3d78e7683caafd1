//! Outbound interceptor chain.
//!
//! Interceptors run in order on every call before the transport (or the
//! synthetic backend) sees it.

use std::sync::Arc;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use uuid::Uuid;

use crate::http::error::ClientError;
use crate::http::request::{OutboundRequest, X_REQUEST_ID};
use crate::storage::{KeyValueStore, KeyValueStoreExt, TOKEN_KEY};

pub trait RequestInterceptor: Send + Sync {
    fn name(&self) -> &'static str;

    fn intercept(&self, request: &mut OutboundRequest) -> Result<(), ClientError>;
}

/// Attaches `Authorization: Bearer <token>` when a token is stored.
pub struct BearerTokenInterceptor {
    store: Arc<dyn KeyValueStore>,
}

impl BearerTokenInterceptor {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

impl RequestInterceptor for BearerTokenInterceptor {
    fn name(&self) -> &'static str {
        "bearer-token"
    }

    fn intercept(&self, request: &mut OutboundRequest) -> Result<(), ClientError> {
        if let Some(token) = self.store.get_string(TOKEN_KEY) {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| ClientError::InvalidRequest(format!("stored token is not a valid header: {e}")))?;
            request.headers.insert(AUTHORIZATION, value);
        }
        Ok(())
    }
}

/// Stamps a fresh UUID v4 `x-request-id` unless the caller set one.
#[derive(Debug, Default)]
pub struct RequestIdInterceptor;

impl RequestInterceptor for RequestIdInterceptor {
    fn name(&self) -> &'static str {
        "request-id"
    }

    fn intercept(&self, request: &mut OutboundRequest) -> Result<(), ClientError> {
        if !request.headers.contains_key(X_REQUEST_ID) {
            let id = Uuid::new_v4().to_string();
            if let Ok(value) = HeaderValue::from_str(&id) {
                request.headers.insert(X_REQUEST_ID, value);
            }
        }
        Ok(())
    }
}

/// The default chain: bearer token, then request id.
pub fn default_chain(store: Arc<dyn KeyValueStore>) -> Vec<Arc<dyn RequestInterceptor>> {
    vec![
        Arc::new(BearerTokenInterceptor::new(store)),
        Arc::new(RequestIdInterceptor),
    ]
}
