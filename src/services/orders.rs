//! Order calls.

use serde::Serialize;

use crate::http::client::RequestClient;
use crate::http::envelope::Envelope;
use crate::http::error::ClientError;
use crate::http::request::OutboundRequest;
use crate::model::{CreateOrder, Order, OrderQuery, Page};
use crate::services::resource_path;

const BASE: &str = "/orders";

pub struct OrderApi<'a> {
    client: &'a RequestClient,
}

impl<'a> OrderApi<'a> {
    pub(crate) fn new(client: &'a RequestClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &OrderQuery) -> Result<Envelope<Page<Order>>, ClientError> {
        self.client.call(OutboundRequest::get(BASE).with_query(query)?).await
    }

    pub async fn get(&self, id: &str) -> Result<Envelope<Order>, ClientError> {
        self.client.call(OutboundRequest::get(resource_path(BASE, id, None))).await
    }

    pub async fn create(&self, order: &CreateOrder) -> Result<Envelope<Order>, ClientError> {
        self.client.call(OutboundRequest::post(BASE).with_json(order)?).await
    }

    /// Merge `patch` (any camelCase subset of the order's fields).
    pub async fn update<P: Serialize>(&self, id: &str, patch: &P) -> Result<Envelope<Order>, ClientError> {
        let request = OutboundRequest::put(resource_path(BASE, id, None)).with_json(patch)?;
        self.client.call(request).await
    }

    pub async fn cancel(&self, id: &str) -> Result<Envelope<Order>, ClientError> {
        self.client
            .call(OutboundRequest::put(resource_path(BASE, id, Some("cancel"))))
            .await
    }
}
