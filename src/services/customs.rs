//! Customs declaration calls.

use crate::http::client::RequestClient;
use crate::http::envelope::Envelope;
use crate::http::error::ClientError;
use crate::http::request::OutboundRequest;
use crate::model::{CreateCustomsDeclaration, CustomsDeclaration, CustomsQuery, Page};
use crate::services::resource_path;

const BASE: &str = "/customs/declarations";

pub struct CustomsApi<'a> {
    client: &'a RequestClient,
}

impl<'a> CustomsApi<'a> {
    pub(crate) fn new(client: &'a RequestClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &CustomsQuery) -> Result<Envelope<Page<CustomsDeclaration>>, ClientError> {
        self.client.call(OutboundRequest::get(BASE).with_query(query)?).await
    }

    pub async fn get(&self, id: &str) -> Result<Envelope<CustomsDeclaration>, ClientError> {
        self.client.call(OutboundRequest::get(resource_path(BASE, id, None))).await
    }

    pub async fn create(&self, declaration: &CreateCustomsDeclaration) -> Result<Envelope<CustomsDeclaration>, ClientError> {
        self.client.call(OutboundRequest::post(BASE).with_json(declaration)?).await
    }

    pub async fn submit(&self, id: &str) -> Result<Envelope<CustomsDeclaration>, ClientError> {
        self.client
            .call(OutboundRequest::post(resource_path(BASE, id, Some("submit"))))
            .await
    }

    /// Pull the review outcome from the customs system.
    pub async fn sync(&self, id: &str) -> Result<Envelope<CustomsDeclaration>, ClientError> {
        self.client
            .call(OutboundRequest::post(resource_path(BASE, id, Some("sync"))))
            .await
    }
}
