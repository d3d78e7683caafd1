//! End-to-end tracking calls.

use crate::http::client::RequestClient;
use crate::http::envelope::Envelope;
use crate::http::error::ClientError;
use crate::http::request::OutboundRequest;
use crate::model::{ProcessTracking, Statistics, TimelineItem, TimelineQuery};
use crate::services::resource_path;

pub struct TrackingApi<'a> {
    client: &'a RequestClient,
}

impl<'a> TrackingApi<'a> {
    pub(crate) fn new(client: &'a RequestClient) -> Self {
        Self { client }
    }

    pub async fn order(&self, order_id: &str) -> Result<Envelope<ProcessTracking>, ClientError> {
        self.client
            .call(OutboundRequest::get(resource_path("/tracking/orders", order_id, None)))
            .await
    }

    pub async fn timeline(&self, query: &TimelineQuery) -> Result<Envelope<Vec<TimelineItem>>, ClientError> {
        let request = OutboundRequest::get("/tracking/timeline").with_query(query)?;
        self.client.call(request).await
    }

    pub async fn statistics(&self) -> Result<Envelope<Statistics>, ClientError> {
        self.client.call(OutboundRequest::get("/tracking/statistics")).await
    }
}

#[cfg(test)]
mod tests {
    use crate::model::TimelineQuery;
    use crate::services::testing::synthetic_client;

    #[tokio::test]
    async fn test_order_process() {
        let (client, _) = synthetic_client();
        let process = client.tracking().order("ORD202401002").await.unwrap().data.unwrap();
        assert_eq!(process.order_id, "ORD202401002");
        assert_eq!(process.nodes.len(), 6);
    }

    #[tokio::test]
    async fn test_timeline_filter() {
        let (client, _) = synthetic_client();
        let all = client.tracking().timeline(&TimelineQuery::default()).await.unwrap().data.unwrap();
        assert_eq!(all.len(), 6);

        let query = TimelineQuery {
            order_id: Some("ORD000".into()),
            ..Default::default()
        };
        let none = client.tracking().timeline(&query).await.unwrap().data.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_statistics() {
        let (client, _) = synthetic_client();
        let stats = client.tracking().statistics().await.unwrap().data.unwrap();
        assert!(stats.total_orders >= stats.active_orders);
    }
}
