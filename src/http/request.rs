//! Outbound request descriptor.
//!
//! # Responsibilities
//! - Carry one call's method, URL, query, body and headers
//! - Travel unchanged from the interceptor chain to the transport and, on
//!   failure, to the fallback adapter
//!
//! # Design Decisions
//! - The URL is kept as the caller gave it (usually relative); the base
//!   address is applied at send time
//! - Query parameters are flattened strings, as they appear on the wire

use reqwest::header::{HeaderMap, HeaderName};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::http::error::ClientError;
use crate::mock::{query_from_value, QueryMap};

/// Correlation header attached to every outbound call.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: String,
    pub query: QueryMap,
    pub body: Option<Value>,
    pub headers: HeaderMap,
}

impl OutboundRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: QueryMap::new(),
            body: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::PUT, url)
    }

    /// Serialize a filter struct into query parameters. `None` fields are dropped.
    pub fn with_query<Q: Serialize>(mut self, query: &Q) -> Result<Self, ClientError> {
        self.query.extend(query_from_value(&serde_json::to_value(query)?));
        Ok(self)
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn with_json<B: Serialize>(mut self, body: &B) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// The request id stamped by the interceptor chain, if any.
    pub fn request_id(&self) -> Option<&str> {
        self.headers.get(X_REQUEST_ID).and_then(|v| v.to_str().ok())
    }
}
