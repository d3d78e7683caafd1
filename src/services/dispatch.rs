//! Dispatch calls.

use serde::Serialize;

use crate::http::client::RequestClient;
use crate::http::envelope::Envelope;
use crate::http::error::ClientError;
use crate::http::request::OutboundRequest;
use crate::model::{AssignCarrier, AssignVessel, CreateDispatch, Dispatch, DispatchQuery, Page, VesselAssignment};
use crate::services::resource_path;

const BASE: &str = "/dispatches";

pub struct DispatchApi<'a> {
    client: &'a RequestClient,
}

impl<'a> DispatchApi<'a> {
    pub(crate) fn new(client: &'a RequestClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &DispatchQuery) -> Result<Envelope<Page<Dispatch>>, ClientError> {
        self.client.call(OutboundRequest::get(BASE).with_query(query)?).await
    }

    pub async fn get(&self, id: &str) -> Result<Envelope<Dispatch>, ClientError> {
        self.client.call(OutboundRequest::get(resource_path(BASE, id, None))).await
    }

    pub async fn create(&self, dispatch: &CreateDispatch) -> Result<Envelope<Dispatch>, ClientError> {
        self.client.call(OutboundRequest::post(BASE).with_json(dispatch)?).await
    }

    pub async fn update<P: Serialize>(&self, id: &str, patch: &P) -> Result<Envelope<Dispatch>, ClientError> {
        let request = OutboundRequest::put(resource_path(BASE, id, None)).with_json(patch)?;
        self.client.call(request).await
    }

    pub async fn assign_carrier(&self, id: &str, carrier_id: &str) -> Result<Envelope<Dispatch>, ClientError> {
        let body = AssignCarrier {
            carrier_id: carrier_id.to_string(),
        };
        let request = OutboundRequest::post(resource_path(BASE, id, Some("assign-carrier"))).with_json(&body)?;
        self.client.call(request).await
    }

    pub async fn assign_vessel(&self, id: &str, vessel_id: &str) -> Result<Envelope<VesselAssignment>, ClientError> {
        let body = AssignVessel {
            vessel_id: vessel_id.to_string(),
        };
        let request = OutboundRequest::post(resource_path(BASE, id, Some("assign-vessel"))).with_json(&body)?;
        self.client.call(request).await
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{CreateDispatch, DispatchStatus, TransportType};
    use crate::services::testing::synthetic_client;

    #[tokio::test]
    async fn test_create_and_assign() {
        let (client, _) = synthetic_client();
        let api = client.dispatches();
        let dispatch = api
            .create(&CreateDispatch {
                order_id: "ORD202401003".into(),
                warehousing_id: "WH202401002".into(),
                transport_type: TransportType::Ocean,
                quantity: 1900.0,
                origin: "Shanghai Port Wharf".into(),
                destination: "Port of Singapore".into(),
                scheduled_departure_date: None,
            })
            .await
            .unwrap()
            .data
            .unwrap();
        assert_eq!(dispatch.status, DispatchStatus::Pending);

        let assigned = api.assign_carrier(&dispatch.id, "CAR002").await.unwrap().data.unwrap();
        assert_eq!(assigned.status, DispatchStatus::CarrierAssigned);
        assert_eq!(assigned.carrier_name.as_deref(), Some("Shanghai Ocean Shipping Group"));

        let vessel = api.assign_vessel(&dispatch.id, "VES002").await.unwrap().data.unwrap();
        assert_eq!(vessel.vessel_name, "Ocean Star");
        assert_eq!(vessel.dispatch_id, dispatch.id);
    }

    #[tokio::test]
    async fn test_unknown_vessel_is_domain_miss() {
        let (client, _) = synthetic_client();
        let envelope = client.dispatches().assign_vessel("DISP202401001", "VES999").await.unwrap();
        assert_eq!(envelope.code, 404);
    }
}
