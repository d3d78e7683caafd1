//! Carrier calls.

use crate::http::client::RequestClient;
use crate::http::envelope::Envelope;
use crate::http::error::ClientError;
use crate::http::request::OutboundRequest;
use crate::model::{Carrier, CarrierQuery, Page, SyncSummary};
use crate::services::resource_path;

const BASE: &str = "/carriers";

pub struct CarrierApi<'a> {
    client: &'a RequestClient,
}

impl<'a> CarrierApi<'a> {
    pub(crate) fn new(client: &'a RequestClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &CarrierQuery) -> Result<Envelope<Page<Carrier>>, ClientError> {
        self.client.call(OutboundRequest::get(BASE).with_query(query)?).await
    }

    pub async fn get(&self, id: &str) -> Result<Envelope<Carrier>, ClientError> {
        self.client.call(OutboundRequest::get(resource_path(BASE, id, None))).await
    }

    /// Refresh every carrier from the carrier system.
    pub async fn sync(&self) -> Result<Envelope<SyncSummary>, ClientError> {
        self.client.call(OutboundRequest::post(format!("{BASE}/sync"))).await
    }
}
