//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store route entries in registration order
//! - Look up the first entry matching `(method, normalized URL)`
//! - Execute its handler and report matched, unmatched or faulted
//!
//! # Design Decisions
//! - Immutable after construction
//! - O(n) scan (acceptable for typical route counts)
//! - First match wins; later entries are never consulted, even on a fault
//! - Explicit Unmatched rather than silent default

use std::fmt;
use std::sync::Arc;

use reqwest::header::HeaderMap;
use reqwest::Method;
use serde_json::Value;

use crate::http::envelope::Envelope;
use crate::mock::error::MockResult;
use crate::mock::request::{MockRequest, QueryMap};
use crate::routing::matcher::{method_matches, RoutePattern};
use crate::routing::normalize::{split_query, UrlNormalizer};

/// Handler signature for a synthetic endpoint.
pub type Handler = dyn Fn(&MockRequest) -> MockResult<Envelope> + Send + Sync;

/// One emulated endpoint.
#[derive(Clone)]
pub struct RouteEntry {
    method: Method,
    pattern: String,
    handler: Arc<Handler>,
}

impl RouteEntry {
    pub fn new<F>(method: Method, pattern: &str, handler: F) -> Self
    where
        F: Fn(&MockRequest) -> MockResult<Envelope> + Send + Sync + 'static,
    {
        Self {
            method,
            pattern: pattern.to_string(),
            handler: Arc::new(handler),
        }
    }

    pub fn get<F>(pattern: &str, handler: F) -> Self
    where
        F: Fn(&MockRequest) -> MockResult<Envelope> + Send + Sync + 'static,
    {
        Self::new(Method::GET, pattern, handler)
    }

    pub fn post<F>(pattern: &str, handler: F) -> Self
    where
        F: Fn(&MockRequest) -> MockResult<Envelope> + Send + Sync + 'static,
    {
        Self::new(Method::POST, pattern, handler)
    }

    pub fn put<F>(pattern: &str, handler: F) -> Self
    where
        F: Fn(&MockRequest) -> MockResult<Envelope> + Send + Sync + 'static,
    {
        Self::new(Method::PUT, pattern, handler)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("method", &self.method)
            .field("pattern", &self.pattern)
            .finish()
    }
}

/// Outcome of a registry execution.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// A handler ran and produced an envelope (which may carry a domain miss).
    Matched(Envelope),
    /// No entry matched the method and URL.
    Unmatched,
    /// The first matching entry failed; no further entries were tried.
    Faulted { pattern: String, reason: String },
}

impl Dispatch {
    /// The envelope of a matched dispatch. Faults degrade to `None`.
    pub fn into_envelope(self) -> Option<Envelope> {
        match self {
            Dispatch::Matched(envelope) => Some(envelope),
            Dispatch::Unmatched | Dispatch::Faulted { .. } => None,
        }
    }
}

struct CompiledEntry {
    entry: RouteEntry,
    pattern: RoutePattern,
}

/// Ordered route table.
pub struct Registry {
    entries: Vec<CompiledEntry>,
    normalizer: UrlNormalizer,
}

impl Registry {
    /// Compile entries in the given order.
    pub fn new(entries: Vec<RouteEntry>, normalizer: UrlNormalizer) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| CompiledEntry {
                pattern: RoutePattern::compile(&entry.pattern, &normalizer),
                entry,
            })
            .collect();
        Self { entries, normalizer }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn normalizer(&self) -> &UrlNormalizer {
        &self.normalizer
    }

    /// Registered entries in scan order.
    pub fn routes(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries.iter().map(|c| &c.entry)
    }

    /// Execute the first entry matching `method` and `url`.
    pub fn execute(
        &self,
        method: &str,
        url: &str,
        query: &QueryMap,
        body: Option<Value>,
        headers: &HeaderMap,
    ) -> Dispatch {
        let normalized = self.normalizer.normalize(url);
        let (path, inline_query) = split_query(&normalized);

        for compiled in &self.entries {
            if !method_matches(&compiled.entry.method, method) {
                continue;
            }
            let Some(params) = compiled.pattern.match_path(path) else {
                continue;
            };

            tracing::debug!(
                method = %compiled.entry.method,
                pattern = %compiled.entry.pattern,
                url = %path,
                "Synthetic route matched"
            );

            // Inline query < explicit query < path parameters.
            let mut merged = inline_query.map(parse_query).unwrap_or_default();
            merged.extend(query.iter().map(|(k, v)| (k.clone(), v.clone())));
            merged.extend(params);

            let request = MockRequest {
                url: path.to_string(),
                method: compiled.entry.method.clone(),
                query: merged,
                body,
                headers: headers.clone(),
            };

            return match (compiled.entry.handler)(&request) {
                Ok(envelope) => Dispatch::Matched(envelope),
                Err(e) => {
                    tracing::error!(
                        pattern = %compiled.entry.pattern,
                        url = %path,
                        error = %e,
                        "Synthetic handler failed"
                    );
                    Dispatch::Faulted {
                        pattern: compiled.entry.pattern.clone(),
                        reason: e.to_string(),
                    }
                }
            };
        }

        tracing::debug!(method = %method, url = %path, "No synthetic route matched");
        Dispatch::Unmatched
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("routes", &self.entries.len())
            .field("normalizer", &self.normalizer)
            .finish()
    }
}

fn parse_query(query: &str) -> QueryMap {
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::error::MockError;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn echo(tag: &'static str) -> impl Fn(&MockRequest) -> MockResult<Envelope> {
        move |req: &MockRequest| {
            Ok(Envelope::ok(
                tag,
                json!({ "query": req.query, "url": req.url, "body": req.body }),
            ))
        }
    }

    fn run(registry: &Registry, method: &str, url: &str, query: &[(&str, &str)]) -> Dispatch {
        let query = query.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        registry.execute(method, url, &query, None, &HeaderMap::new())
    }

    #[test]
    fn test_first_match_wins() {
        let registry = Registry::new(
            vec![
                RouteEntry::get("/orders/:id", echo("first")),
                RouteEntry::get("/orders/:key", echo("second")),
            ],
            UrlNormalizer::default(),
        );
        let env = run(&registry, "GET", "/orders/ORD1", &[]).into_envelope().unwrap();
        assert_eq!(env.message, "first");
    }

    #[test]
    fn test_method_is_case_insensitive_and_filters() {
        let registry = Registry::new(
            vec![
                RouteEntry::post("/orders", echo("create")),
                RouteEntry::get("/orders", echo("list")),
            ],
            UrlNormalizer::default(),
        );
        assert_eq!(run(&registry, "get", "/orders", &[]).into_envelope().unwrap().message, "list");
        assert_eq!(run(&registry, "Post", "/orders", &[]).into_envelope().unwrap().message, "create");
        assert_eq!(run(&registry, "DELETE", "/orders", &[]), Dispatch::Unmatched);
    }

    #[test]
    fn test_path_params_override_query() {
        let registry = Registry::new(vec![RouteEntry::get("/orders/:id", echo("get"))], UrlNormalizer::default());
        let env = run(
            &registry,
            "GET",
            "http://backend.local/api/orders/ORD9?id=inline&x=1",
            &[("id", "query"), ("page", "2")],
        )
        .into_envelope()
        .unwrap();
        let data = env.data.unwrap();
        assert_eq!(data["query"]["id"], "ORD9");
        assert_eq!(data["query"]["page"], "2");
        assert_eq!(data["query"]["x"], "1");
        assert_eq!(data["url"], "/api/orders/ORD9");
    }

    #[test]
    fn test_unmatched() {
        let registry = Registry::new(vec![RouteEntry::get("/orders", echo("list"))], UrlNormalizer::default());
        assert_eq!(run(&registry, "GET", "/orders/extra/segments", &[]), Dispatch::Unmatched);
        assert!(run(&registry, "GET", "/unknown", &[]).into_envelope().is_none());
    }

    #[test]
    fn test_fault_stops_scan() {
        let later_calls = Arc::new(AtomicUsize::new(0));
        let counter = later_calls.clone();
        let registry = Registry::new(
            vec![
                RouteEntry::post("/dispatches/:id/assign-carrier", |req: &MockRequest| {
                    req.body_str("carrierId")?;
                    Ok(Envelope::ok("assigned", json!({})))
                }),
                RouteEntry::post("/dispatches/:id/assign-carrier", move |_req: &MockRequest| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(Envelope::ok("fallback entry", json!({})))
                }),
            ],
            UrlNormalizer::default(),
        );

        let outcome = run(&registry, "POST", "/dispatches/D1/assign-carrier", &[]);
        match &outcome {
            Dispatch::Faulted { pattern, reason } => {
                assert_eq!(pattern, "/dispatches/:id/assign-carrier");
                assert_eq!(reason, &MockError::MissingBody.to_string());
            }
            other => panic!("expected fault, got {:?}", other),
        }
        assert!(outcome.into_envelope().is_none());
        assert_eq!(later_calls.load(Ordering::SeqCst), 0);
    }
}
