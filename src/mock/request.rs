//! Request descriptor handed to synthetic route handlers.

use std::collections::BTreeMap;

use reqwest::header::HeaderMap;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::mock::error::MockError;

/// Query parameters, flattened to strings as they travel on the wire.
pub type QueryMap = BTreeMap<String, String>;

/// Per-call request descriptor.
#[derive(Debug, Clone)]
pub struct MockRequest {
    /// Normalized URL, query string removed.
    pub url: String,
    pub method: Method,
    /// Caller query merged with path parameters (path wins).
    pub query: QueryMap,
    pub body: Option<Value>,
    pub headers: HeaderMap,
}

impl MockRequest {
    /// A query or path parameter, ignoring empty values.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str).filter(|v| !v.is_empty())
    }

    /// The `:id` path parameter.
    pub fn id(&self) -> Result<&str, MockError> {
        self.param("id").ok_or(MockError::MissingParam("id"))
    }

    /// Numeric query parameter with a default for absent or unparsable values.
    pub fn number(&self, name: &str, default: usize) -> usize {
        self.param(name)
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(default)
    }

    /// Deserialize the body into a typed payload.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, MockError> {
        let body = self.body.clone().ok_or(MockError::MissingBody)?;
        serde_json::from_value(body).map_err(MockError::InvalidBody)
    }

    /// A string field of a JSON object body.
    pub fn body_str(&self, field: &'static str) -> Result<&str, MockError> {
        self.body
            .as_ref()
            .ok_or(MockError::MissingBody)?
            .get(field)
            .and_then(Value::as_str)
            .ok_or(MockError::MissingField(field))
    }
}

/// Flatten a JSON object into wire query parameters.
///
/// Nulls are skipped; scalars are rendered without quotes.
pub fn query_from_value(value: &Value) -> QueryMap {
    let mut query = QueryMap::new();
    if let Value::Object(map) = value {
        for (key, v) in map {
            let rendered = match v {
                Value::Null => continue,
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            query.insert(key.clone(), rendered);
        }
    }
    query
}
