//! Warehousing endpoints.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;

use crate::http::envelope::Envelope;
use crate::mock::store::today;
use crate::mock::{matches_opt, paging, wire_eq, IdGenerator, MockRequest, Repository, CREATED, FETCHED, SYNCED, UPDATED};
use crate::model::{CreateWarehousing, Warehousing, WarehousingStatus};
use crate::routing::RouteEntry;

const NOT_FOUND: &str = "warehousing record not found";

pub fn routes(records: Arc<Repository<Warehousing>>, ids: Arc<IdGenerator>) -> Vec<RouteEntry> {
    let list = records.clone();
    let get = records.clone();
    let create = records.clone();
    let update = records.clone();
    let sync = records;

    vec![
        RouteEntry::get("/warehousing", move |req: &MockRequest| {
            let order_id = req.param("orderId");
            let status = req.param("status");
            let page = list.list(
                |w| matches_opt(order_id, &w.order_id) && status.map_or(true, |s| wire_eq(&w.status, s)),
                paging(req),
            )?;
            Ok(Envelope::ok_json(FETCHED, &page)?)
        }),
        RouteEntry::get("/warehousing/:id", move |req: &MockRequest| {
            match get.find(req.id()?)? {
                Some(record) => Ok(Envelope::ok_json(FETCHED, &record)?),
                None => Ok(Envelope::not_found(NOT_FOUND)),
            }
        }),
        RouteEntry::post("/warehousing", move |req: &MockRequest| {
            let params: CreateWarehousing = req.json()?;
            let now = Utc::now();
            let record = Warehousing {
                id: ids.next_id("WH"),
                order_id: params.order_id,
                production_plan_id: params.production_plan_id,
                wharf_name: params.wharf_name,
                warehouse_no: params.warehouse_no,
                quantity: params.quantity,
                scheduled_date: params.scheduled_date,
                actual_date: None,
                status: WarehousingStatus::Scheduled,
                logistics_system_ref: None,
                created_at: now,
                updated_at: now,
            };
            Ok(Envelope::ok_json(CREATED, &create.insert(record)?)?)
        }),
        RouteEntry::put("/warehousing/:id", move |req: &MockRequest| {
            let patch = req.body.clone().unwrap_or(Value::Null);
            match update.merge(req.id()?, &patch)? {
                Some(record) => Ok(Envelope::ok_json(UPDATED, &record)?),
                None => Ok(Envelope::not_found(NOT_FOUND)),
            }
        }),
        RouteEntry::post("/warehousing/:id/sync", move |req: &MockRequest| {
            let synced = sync.modify(req.id()?, |w| {
                w.actual_date = Some(today());
                w.status = WarehousingStatus::Completed;
                Ok(())
            })?;
            match synced {
                Some(record) => Ok(Envelope::ok_json(SYNCED, &record)?),
                None => Ok(Envelope::not_found(NOT_FOUND)),
            }
        }),
    ]
}

#[cfg(test)]
mod tests {
    use crate::mock::testing::call;
    use crate::mock::MockBackend;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn test_create_then_sync() {
        let backend = MockBackend::default();
        let created = call(
            &backend,
            "POST",
            "/api/warehousing",
            &[],
            Some(json!({
                "orderId": "ORD202401002",
                "productionPlanId": "PROD202401002",
                "wharfName": "Nantong Wharf",
                "warehouseNo": "WH-003",
                "quantity": 2800,
                "scheduledDate": "2024-03-01"
            })),
        )
        .data
        .unwrap();
        assert_eq!(created["status"], "scheduled");
        assert!(created.get("actualDate").is_none());

        let id = created["id"].as_str().unwrap();
        let synced = call(&backend, "POST", &format!("/api/warehousing/{id}/sync"), &[], None)
            .data
            .unwrap();
        assert_eq!(synced["status"], "completed");
        assert_eq!(synced["actualDate"], Utc::now().date_naive().to_string());
    }

    #[test]
    fn test_list_by_status() {
        let backend = MockBackend::default();
        let page = call(&backend, "GET", "/api/warehousing", &[("status", "scheduled")], None)
            .data
            .unwrap();
        assert_eq!(page["total"], 0);
        assert!(page["list"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_create_is_a_fault() {
        let backend = MockBackend::default();
        let outcome = crate::mock::testing::dispatch(&backend, "POST", "/api/warehousing", &[], Some(json!({"quantity": "lots"})));
        assert!(outcome.into_envelope().is_none());
    }
}
