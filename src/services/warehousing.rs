//! Wharf warehousing calls.

use serde::Serialize;

use crate::http::client::RequestClient;
use crate::http::envelope::Envelope;
use crate::http::error::ClientError;
use crate::http::request::OutboundRequest;
use crate::model::{CreateWarehousing, Page, Warehousing, WarehousingQuery};
use crate::services::resource_path;

const BASE: &str = "/warehousing";

pub struct WarehousingApi<'a> {
    client: &'a RequestClient,
}

impl<'a> WarehousingApi<'a> {
    pub(crate) fn new(client: &'a RequestClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &WarehousingQuery) -> Result<Envelope<Page<Warehousing>>, ClientError> {
        self.client.call(OutboundRequest::get(BASE).with_query(query)?).await
    }

    pub async fn get(&self, id: &str) -> Result<Envelope<Warehousing>, ClientError> {
        self.client.call(OutboundRequest::get(resource_path(BASE, id, None))).await
    }

    pub async fn create(&self, record: &CreateWarehousing) -> Result<Envelope<Warehousing>, ClientError> {
        self.client.call(OutboundRequest::post(BASE).with_json(record)?).await
    }

    pub async fn update<P: Serialize>(&self, id: &str, patch: &P) -> Result<Envelope<Warehousing>, ClientError> {
        let request = OutboundRequest::put(resource_path(BASE, id, None)).with_json(patch)?;
        self.client.call(request).await
    }

    pub async fn sync(&self, id: &str) -> Result<Envelope<Warehousing>, ClientError> {
        self.client
            .call(OutboundRequest::post(resource_path(BASE, id, Some("sync"))))
            .await
    }
}
