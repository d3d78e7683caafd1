//! Dispatch endpoints.
//!
//! Vessel assignment lives with the vessel handlers, which own the fleet.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;

use crate::http::envelope::Envelope;
use crate::mock::{matches_opt, paging, wire_eq, IdGenerator, MockRequest, Repository, ASSIGNED, CREATED, FETCHED, UPDATED};
use crate::model::{CreateDispatch, Dispatch, DispatchStatus};
use crate::routing::RouteEntry;

const NOT_FOUND: &str = "dispatch not found";

/// `carriers` maps carrier ids to the names stamped on assignment.
pub fn routes(
    dispatches: Arc<Repository<Dispatch>>,
    carriers: BTreeMap<String, String>,
    ids: Arc<IdGenerator>,
) -> Vec<RouteEntry> {
    let list = dispatches.clone();
    let get = dispatches.clone();
    let create = dispatches.clone();
    let update = dispatches.clone();
    let assign = dispatches;

    vec![
        RouteEntry::get("/dispatches", move |req: &MockRequest| {
            let order_id = req.param("orderId");
            let status = req.param("status");
            let page = list.list(
                |d| matches_opt(order_id, &d.order_id) && status.map_or(true, |s| wire_eq(&d.status, s)),
                paging(req),
            )?;
            Ok(Envelope::ok_json(FETCHED, &page)?)
        }),
        RouteEntry::get("/dispatches/:id", move |req: &MockRequest| {
            match get.find(req.id()?)? {
                Some(dispatch) => Ok(Envelope::ok_json(FETCHED, &dispatch)?),
                None => Ok(Envelope::not_found(NOT_FOUND)),
            }
        }),
        RouteEntry::post("/dispatches", move |req: &MockRequest| {
            let params: CreateDispatch = req.json()?;
            let now = Utc::now();
            let dispatch = Dispatch {
                id: ids.next_id("DISP"),
                order_id: params.order_id,
                warehousing_id: params.warehousing_id,
                carrier_id: None,
                carrier_name: None,
                vessel_id: None,
                vessel_name: None,
                transport_type: params.transport_type,
                quantity: params.quantity,
                origin: params.origin,
                destination: params.destination,
                scheduled_departure_date: params.scheduled_departure_date,
                actual_departure_date: None,
                scheduled_arrival_date: None,
                actual_arrival_date: None,
                status: DispatchStatus::Pending,
                carrier_system_ref: None,
                created_at: now,
                updated_at: now,
            };
            Ok(Envelope::ok_json(CREATED, &create.insert(dispatch)?)?)
        }),
        RouteEntry::put("/dispatches/:id", move |req: &MockRequest| {
            let patch = req.body.clone().unwrap_or(Value::Null);
            match update.merge(req.id()?, &patch)? {
                Some(dispatch) => Ok(Envelope::ok_json(UPDATED, &dispatch)?),
                None => Ok(Envelope::not_found(NOT_FOUND)),
            }
        }),
        RouteEntry::post("/dispatches/:id/assign-carrier", move |req: &MockRequest| {
            // Unknown dispatch is a 404 before the body is looked at.
            let assigned = assign.modify(req.id()?, |d| {
                let carrier_id = req.body_str("carrierId")?;
                d.carrier_id = Some(carrier_id.to_string());
                d.carrier_name = carriers.get(carrier_id).cloned();
                d.status = DispatchStatus::CarrierAssigned;
                Ok(())
            })?;
            match assigned {
                Some(dispatch) => {
                    tracing::debug!(dispatch = %dispatch.id, carrier = ?dispatch.carrier_id, "Synthetic carrier assigned");
                    Ok(Envelope::ok_json(ASSIGNED, &dispatch)?)
                }
                None => Ok(Envelope::not_found(NOT_FOUND)),
            }
        }),
    ]
}

#[cfg(test)]
mod tests {
    use crate::mock::testing::{call, dispatch};
    use crate::mock::MockBackend;
    use crate::routing::Dispatch;
    use serde_json::json;

    #[test]
    fn test_create_then_assign_carrier() {
        let backend = MockBackend::default();
        let created = call(
            &backend,
            "POST",
            "/api/dispatches",
            &[],
            Some(json!({
                "orderId": "ORD202401003",
                "warehousingId": "WH202401002",
                "transportType": "ocean",
                "quantity": 8000,
                "origin": "Ningbo Port Wharf",
                "destination": "Los Angeles"
            })),
        )
        .data
        .unwrap();
        assert_eq!(created["status"], "pending");
        assert!(created.get("carrierId").is_none());

        let id = created["id"].as_str().unwrap();
        let assigned = call(
            &backend,
            "POST",
            &format!("/api/dispatches/{id}/assign-carrier"),
            &[],
            Some(json!({"carrierId": "CAR002"})),
        )
        .data
        .unwrap();
        assert_eq!(assigned["carrierId"], "CAR002");
        assert_eq!(assigned["carrierName"], "Shanghai Ocean Shipping Group");
        assert_eq!(assigned["status"], "carrier_assigned");
    }

    #[test]
    fn test_assign_carrier_without_body_degrades_to_miss() {
        let backend = MockBackend::default();
        let outcome = dispatch(&backend, "POST", "/api/dispatches/DISP202401001/assign-carrier", &[], None);
        assert!(matches!(outcome, Dispatch::Faulted { .. }));

        let record = call(&backend, "GET", "/api/dispatches/DISP202401001", &[], None).data.unwrap();
        assert_eq!(record["status"], "completed");
    }

    #[test]
    fn test_assign_carrier_unknown_dispatch() {
        let backend = MockBackend::default();
        let env = call(
            &backend,
            "POST",
            "/api/dispatches/NOPE/assign-carrier",
            &[],
            Some(json!({"carrierId": "CAR001"})),
        );
        assert_eq!(env.code, 404);

        let bodiless = call(&backend, "POST", "/api/dispatches/NOPE/assign-carrier", &[], None);
        assert_eq!(bodiless.code, 404);
        assert_eq!(bodiless.message, "dispatch not found");
    }
}
