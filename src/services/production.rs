//! Production plan calls.

use serde::Serialize;

use crate::http::client::RequestClient;
use crate::http::envelope::Envelope;
use crate::http::error::ClientError;
use crate::http::request::OutboundRequest;
use crate::model::{CreateProductionPlan, Page, ProductionPlan, ProductionQuery};
use crate::services::resource_path;

const BASE: &str = "/production/plans";

pub struct ProductionApi<'a> {
    client: &'a RequestClient,
}

impl<'a> ProductionApi<'a> {
    pub(crate) fn new(client: &'a RequestClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &ProductionQuery) -> Result<Envelope<Page<ProductionPlan>>, ClientError> {
        self.client.call(OutboundRequest::get(BASE).with_query(query)?).await
    }

    pub async fn get(&self, id: &str) -> Result<Envelope<ProductionPlan>, ClientError> {
        self.client.call(OutboundRequest::get(resource_path(BASE, id, None))).await
    }

    pub async fn create(&self, plan: &CreateProductionPlan) -> Result<Envelope<ProductionPlan>, ClientError> {
        self.client.call(OutboundRequest::post(BASE).with_json(plan)?).await
    }

    pub async fn update<P: Serialize>(&self, id: &str, patch: &P) -> Result<Envelope<ProductionPlan>, ClientError> {
        let request = OutboundRequest::put(resource_path(BASE, id, None)).with_json(patch)?;
        self.client.call(request).await
    }

    /// Pull actuals from the steel-mill system.
    pub async fn sync(&self, id: &str) -> Result<Envelope<ProductionPlan>, ClientError> {
        self.client
            .call(OutboundRequest::post(resource_path(BASE, id, Some("sync"))))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{ProductionQuery, ProductionStatus};
    use crate::services::testing::synthetic_client;

    #[tokio::test]
    async fn test_list_by_order_and_sync() {
        let (client, _) = synthetic_client();
        let query = ProductionQuery {
            order_id: Some("ORD202401002".into()),
            ..Default::default()
        };
        let page = client.production().list(&query).await.unwrap().data.unwrap();
        assert_eq!(page.total, 1);

        let plan = client.production().sync("PROD202401002").await.unwrap().data.unwrap();
        assert_eq!(plan.actual_quantity, Some(2850.0));
        assert_eq!(plan.status, ProductionStatus::Producing);
        assert_eq!(plan.actual_start_date, Some(plan.planned_start_date));
    }

    #[tokio::test]
    async fn test_sync_unknown_plan() {
        let (client, _) = synthetic_client();
        assert_eq!(client.production().sync("PROD0").await.unwrap().code, 404);
    }
}
