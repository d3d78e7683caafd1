//! Typed method surface over the request client.
//!
//! Each domain gets a thin borrowed handle (`client.orders()`,
//! `client.vessels()`, ...) whose methods build an [`OutboundRequest`] and
//! decode the envelope's data into model types. Domain misses come back as
//! envelopes with a non-200 code; only transport and classification failures
//! are `Err`.

pub mod auth;
pub mod carriers;
pub mod customs;
pub mod dispatch;
pub mod orders;
pub mod production;
pub mod tracking;
pub mod vessels;
pub mod warehousing;

use crate::http::client::RequestClient;

pub use auth::AuthApi;
pub use carriers::CarrierApi;
pub use customs::CustomsApi;
pub use dispatch::DispatchApi;
pub use orders::OrderApi;
pub use production::ProductionApi;
pub use tracking::TrackingApi;
pub use vessels::VesselApi;
pub use warehousing::WarehousingApi;

/// `base/id[/action]` with the id percent-encoded as one path segment.
pub(crate) fn resource_path(base: &str, id: &str, action: Option<&str>) -> String {
    let id = urlencoding::encode(id);
    match action {
        Some(action) => format!("{base}/{id}/{action}"),
        None => format!("{base}/{id}"),
    }
}

impl RequestClient {
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn orders(&self) -> OrderApi<'_> {
        OrderApi::new(self)
    }

    pub fn production(&self) -> ProductionApi<'_> {
        ProductionApi::new(self)
    }

    pub fn warehousing(&self) -> WarehousingApi<'_> {
        WarehousingApi::new(self)
    }

    pub fn carriers(&self) -> CarrierApi<'_> {
        CarrierApi::new(self)
    }

    pub fn dispatches(&self) -> DispatchApi<'_> {
        DispatchApi::new(self)
    }

    pub fn vessels(&self) -> VesselApi<'_> {
        VesselApi::new(self)
    }

    pub fn customs(&self) -> CustomsApi<'_> {
        CustomsApi::new(self)
    }

    pub fn tracking(&self) -> TrackingApi<'_> {
        TrackingApi::new(self)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use crate::config::schema::{BuildMode, ClientConfig, EnvironmentConfig};
    use crate::http::client::RequestClient;
    use crate::storage::MemoryStore;

    /// A developer-mode client served entirely by the synthetic backend.
    pub fn synthetic_client() -> (RequestClient, Arc<MemoryStore>) {
        let config = ClientConfig {
            environment: EnvironmentConfig {
                mode: BuildMode::Development,
                use_mock: true,
                mock_delay_ms: 0,
                ..EnvironmentConfig::default()
            },
            ..ClientConfig::default()
        };
        let store = Arc::new(MemoryStore::new());
        let client = RequestClient::new(&config, store.clone()).expect("client");
        (client, store)
    }
}
