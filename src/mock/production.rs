//! Production plan endpoints.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;

use crate::http::envelope::Envelope;
use crate::mock::{matches_opt, paging, wire_eq, IdGenerator, MockRequest, Repository, CREATED, FETCHED, SYNCED, UPDATED};
use crate::model::{CreateProductionPlan, ProductionPlan, ProductionStatus};
use crate::routing::RouteEntry;

const NOT_FOUND: &str = "production plan not found";

/// Share of the planned quantity reported by the steel-mill sync.
const SYNC_YIELD: f64 = 0.95;

pub fn routes(plans: Arc<Repository<ProductionPlan>>, ids: Arc<IdGenerator>) -> Vec<RouteEntry> {
    let list = plans.clone();
    let get = plans.clone();
    let create = plans.clone();
    let update = plans.clone();
    let sync = plans;

    vec![
        RouteEntry::get("/production/plans", move |req: &MockRequest| {
            let order_id = req.param("orderId");
            let status = req.param("status");
            let page = list.list(
                |p| matches_opt(order_id, &p.order_id) && status.map_or(true, |s| wire_eq(&p.status, s)),
                paging(req),
            )?;
            Ok(Envelope::ok_json(FETCHED, &page)?)
        }),
        RouteEntry::get("/production/plans/:id", move |req: &MockRequest| {
            match get.find(req.id()?)? {
                Some(plan) => Ok(Envelope::ok_json(FETCHED, &plan)?),
                None => Ok(Envelope::not_found(NOT_FOUND)),
            }
        }),
        RouteEntry::post("/production/plans", move |req: &MockRequest| {
            let params: CreateProductionPlan = req.json()?;
            let now = Utc::now();
            let plan = ProductionPlan {
                id: ids.next_id("PROD"),
                order_id: params.order_id,
                factory_name: params.factory_name,
                product_type: params.product_type,
                planned_quantity: params.planned_quantity,
                actual_quantity: None,
                planned_start_date: params.planned_start_date,
                planned_end_date: params.planned_end_date,
                actual_start_date: None,
                actual_end_date: None,
                status: ProductionStatus::Planned,
                steel_factory_system_ref: None,
                created_at: now,
                updated_at: now,
            };
            Ok(Envelope::ok_json(CREATED, &create.insert(plan)?)?)
        }),
        RouteEntry::put("/production/plans/:id", move |req: &MockRequest| {
            let patch = req.body.clone().unwrap_or(Value::Null);
            match update.merge(req.id()?, &patch)? {
                Some(plan) => Ok(Envelope::ok_json(UPDATED, &plan)?),
                None => Ok(Envelope::not_found(NOT_FOUND)),
            }
        }),
        RouteEntry::post("/production/plans/:id/sync", move |req: &MockRequest| {
            let synced = sync.modify(req.id()?, |p| {
                p.actual_quantity = Some((p.planned_quantity * SYNC_YIELD).floor());
                p.actual_start_date = Some(p.planned_start_date);
                p.status = ProductionStatus::Producing;
                Ok(())
            })?;
            match synced {
                Some(plan) => Ok(Envelope::ok_json(SYNCED, &plan)?),
                None => Ok(Envelope::not_found(NOT_FOUND)),
            }
        }),
    ]
}

#[cfg(test)]
mod tests {
    use crate::mock::testing::call;
    use crate::mock::MockBackend;
    use serde_json::json;

    #[test]
    fn test_sync_is_idempotent() {
        let backend = MockBackend::default();
        let first = call(&backend, "POST", "/api/production/plans/PROD202401001/sync", &[], None)
            .data
            .unwrap();
        assert_eq!(first["actualQuantity"], 4750.0);
        assert_eq!(first["actualStartDate"], "2024-01-20");
        assert_eq!(first["status"], "producing");

        let second = call(&backend, "POST", "/api/production/plans/PROD202401001/sync", &[], None)
            .data
            .unwrap();
        assert_eq!(second["actualQuantity"], first["actualQuantity"]);
        assert_eq!(second["status"], first["status"]);
        let stamp = |v: &serde_json::Value| {
            chrono::DateTime::parse_from_rfc3339(v["updatedAt"].as_str().unwrap()).unwrap()
        };
        assert!(stamp(&second) >= stamp(&first));
    }

    #[test]
    fn test_sync_unknown_plan() {
        let backend = MockBackend::default();
        let env = call(&backend, "POST", "/api/production/plans/NOPE/sync", &[], None);
        assert_eq!(env.code, 404);
        assert!(env.data.is_none());
    }

    #[test]
    fn test_create_and_filter() {
        let backend = MockBackend::default();
        let created = call(
            &backend,
            "POST",
            "/api/production/plans",
            &[],
            Some(json!({
                "orderId": "ORD202401003",
                "factoryName": "Anshan Steel",
                "productType": "PLATE",
                "plannedQuantity": 8000,
                "plannedStartDate": "2024-02-01",
                "plannedEndDate": "2024-02-20"
            })),
        )
        .data
        .unwrap();
        assert!(created["id"].as_str().unwrap().starts_with("PROD"));
        assert_eq!(created["status"], "planned");

        let page = call(&backend, "GET", "/api/production/plans", &[("orderId", "ORD202401003")], None)
            .data
            .unwrap();
        assert_eq!(page["total"], 1);
        assert_eq!(page["list"][0]["id"], created["id"]);
    }

    #[test]
    fn test_update_plan() {
        let backend = MockBackend::default();
        let env = call(
            &backend,
            "PUT",
            "/api/production/plans/PROD202401002",
            &[],
            Some(json!({"status": "delayed"})),
        );
        assert_eq!(env.data.unwrap()["status"], "delayed");
    }
}
