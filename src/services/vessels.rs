//! Vessel and AIS calls.

use crate::http::client::RequestClient;
use crate::http::envelope::Envelope;
use crate::http::error::ClientError;
use crate::http::request::OutboundRequest;
use crate::model::{AisData, Page, SyncSummary, Vessel, VesselQuery};
use crate::services::resource_path;

const BASE: &str = "/vessels";

pub struct VesselApi<'a> {
    client: &'a RequestClient,
}

impl<'a> VesselApi<'a> {
    pub(crate) fn new(client: &'a RequestClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &VesselQuery) -> Result<Envelope<Page<Vessel>>, ClientError> {
        self.client.call(OutboundRequest::get(BASE).with_query(query)?).await
    }

    pub async fn get(&self, id: &str) -> Result<Envelope<Vessel>, ClientError> {
        self.client.call(OutboundRequest::get(resource_path(BASE, id, None))).await
    }

    /// Position history of one vessel; empty when none is known.
    pub async fn ais(&self, id: &str) -> Result<Envelope<Vec<AisData>>, ClientError> {
        self.client
            .call(OutboundRequest::get(resource_path(BASE, id, Some("ais"))))
            .await
    }

    /// Latest position of every vessel.
    pub async fn realtime_ais(&self) -> Result<Envelope<Vec<AisData>>, ClientError> {
        self.client.call(OutboundRequest::get(format!("{BASE}/ais/realtime"))).await
    }

    pub async fn sync_ais(&self) -> Result<Envelope<SyncSummary>, ClientError> {
        self.client.call(OutboundRequest::post(format!("{BASE}/ais/sync"))).await
    }
}
