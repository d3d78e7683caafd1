//! Synthetic REST backend.
//!
//! # Data Flow
//! ```text
//! (method, url, query, body)
//!     → Registry (first match wins)
//!     → domain handler set (orders, production, ...)
//!     → Repository<T> (lock held for the whole handler body)
//!     → Envelope
//! ```
//!
//! # Responsibilities
//! - Seed every domain repository from fixtures
//! - Register handler sets in a fixed order
//! - Restore the seed on demand
//!
//! # Design Decisions
//! - Each handler set owns its repositories through `Arc` clones captured
//!   by its closures; nothing else reaches into them
//! - Handlers are synchronous; latency is simulated by the caller

pub mod auth;
pub mod carriers;
pub mod customs;
pub mod dispatch;
pub mod error;
pub mod fixtures;
pub mod orders;
pub mod production;
pub mod request;
pub mod store;
pub mod tracking;
pub mod vessels;
pub mod warehousing;

use std::sync::Arc;

use chrono::Utc;
use reqwest::header::HeaderMap;
use serde::Serialize;
use serde_json::Value;

use crate::model::{Carrier, CustomsDeclaration, Dispatch as DispatchRecord, Order, ProductionPlan, Vessel, Warehousing};
use crate::routing::{Dispatch, Registry, UrlNormalizer};

pub use error::{MockError, MockResult};
pub use request::{query_from_value, MockRequest, QueryMap};
pub use store::{IdGenerator, PageRequest, Record, Repository};
pub use vessels::AisFeed;

pub(crate) const FETCHED: &str = "fetched successfully";
pub(crate) const CREATED: &str = "created successfully";
pub(crate) const UPDATED: &str = "updated successfully";
pub(crate) const SYNCED: &str = "synced successfully";
pub(crate) const ASSIGNED: &str = "assigned successfully";

/// `page`/`pageSize` from the query, defaulting to page 1 of 10.
pub(crate) fn paging(req: &MockRequest) -> PageRequest {
    PageRequest::new(req.number("page", 1), req.number("pageSize", 10))
}

/// Compare a serializable value (typically a status enum) to its wire form.
pub(crate) fn wire_eq<S: Serialize>(value: &S, wanted: &str) -> bool {
    match serde_json::to_value(value) {
        Ok(Value::String(s)) => s == wanted,
        _ => false,
    }
}

/// Optional equality filter: absent means "match everything".
pub(crate) fn matches_opt(filter: Option<&str>, actual: &str) -> bool {
    filter.map_or(true, |f| f == actual)
}

/// Domain repositories backing the synthetic routes.
#[derive(Debug, Clone)]
struct Stores {
    orders: Arc<Repository<Order>>,
    plans: Arc<Repository<ProductionPlan>>,
    warehousing: Arc<Repository<Warehousing>>,
    carriers: Arc<Repository<Carrier>>,
    dispatches: Arc<Repository<DispatchRecord>>,
    vessels: Arc<Repository<Vessel>>,
    ais: Arc<AisFeed>,
    customs: Arc<Repository<CustomsDeclaration>>,
}

impl Stores {
    fn seeded() -> Self {
        let now = Utc::now();
        Self {
            orders: Arc::new(Repository::new("orders", fixtures::orders())),
            plans: Arc::new(Repository::new("production_plans", fixtures::production_plans())),
            warehousing: Arc::new(Repository::new("warehousing", fixtures::warehousing())),
            carriers: Arc::new(Repository::new("carriers", fixtures::carriers())),
            dispatches: Arc::new(Repository::new("dispatches", fixtures::dispatches())),
            vessels: Arc::new(Repository::new("vessels", fixtures::vessels(now))),
            ais: Arc::new(AisFeed::new(fixtures::ais_samples(now))),
            customs: Arc::new(Repository::new("customs_declarations", fixtures::customs_declarations())),
        }
    }

    fn reset(&self) -> MockResult<()> {
        self.orders.reset()?;
        self.plans.reset()?;
        self.warehousing.reset()?;
        self.carriers.reset()?;
        self.dispatches.reset()?;
        self.vessels.reset()?;
        self.ais.reset()?;
        self.customs.reset()
    }
}

/// The in-process emulation of the logistics REST resources.
pub struct MockBackend {
    stores: Stores,
    registry: Registry,
}

impl MockBackend {
    /// Seed all repositories and register every handler set.
    pub fn seeded(normalizer: UrlNormalizer) -> Self {
        let stores = Stores::seeded();
        let ids = Arc::new(IdGenerator::new());

        let mut routes = Vec::new();
        routes.extend(auth::routes());
        routes.extend(orders::routes(stores.orders.clone(), ids.clone()));
        routes.extend(tracking::routes());
        routes.extend(production::routes(stores.plans.clone(), ids.clone()));
        routes.extend(warehousing::routes(stores.warehousing.clone(), ids.clone()));
        routes.extend(carriers::routes(stores.carriers.clone()));
        routes.extend(dispatch::routes(stores.dispatches.clone(), fixtures::carrier_directory(), ids.clone()));
        routes.extend(vessels::routes(stores.vessels.clone(), stores.ais.clone()));
        routes.extend(customs::routes(stores.customs.clone(), ids));

        let registry = Registry::new(routes, normalizer);
        tracing::debug!(routes = registry.len(), "Synthetic backend seeded");

        Self { stores, registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn normalizer(&self) -> &UrlNormalizer {
        self.registry.normalizer()
    }

    /// Run one synthetic request.
    pub fn execute(
        &self,
        method: &str,
        url: &str,
        query: &QueryMap,
        body: Option<Value>,
        headers: &HeaderMap,
    ) -> Dispatch {
        self.registry.execute(method, url, query, body, headers)
    }

    /// Restore every repository to its seeded contents.
    pub fn reset(&self) -> MockResult<()> {
        self.stores.reset()?;
        tracing::info!("Synthetic backend reset to seed data");
        Ok(())
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::seeded(UrlNormalizer::default())
    }
}

impl std::fmt::Debug for MockBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockBackend")
            .field("registry", &self.registry)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::http::envelope::Envelope;

    /// Run a request against a fresh backend and expect a matched envelope.
    pub fn call(backend: &MockBackend, method: &str, url: &str, query: &[(&str, &str)], body: Option<Value>) -> Envelope {
        match dispatch(backend, method, url, query, body) {
            Dispatch::Matched(envelope) => envelope,
            other => panic!("expected a matched route for {method} {url}, got {other:?}"),
        }
    }

    pub fn dispatch(backend: &MockBackend, method: &str, url: &str, query: &[(&str, &str)], body: Option<Value>) -> Dispatch {
        let query: QueryMap = query.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        backend.execute(method, url, &query, body, &HeaderMap::new())
    }
}
