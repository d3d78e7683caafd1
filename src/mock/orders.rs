//! Order endpoints.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;

use crate::http::envelope::Envelope;
use crate::mock::store::today;
use crate::mock::{paging, wire_eq, IdGenerator, MockRequest, Repository, CREATED, FETCHED, UPDATED};
use crate::model::{CreateOrder, Order, OrderStatus};
use crate::routing::RouteEntry;

const NOT_FOUND: &str = "order not found";

pub fn routes(orders: Arc<Repository<Order>>, ids: Arc<IdGenerator>) -> Vec<RouteEntry> {
    let list = orders.clone();
    let get = orders.clone();
    let create = orders.clone();
    let update = orders.clone();
    let cancel = orders;

    vec![
        RouteEntry::get("/orders", move |req: &MockRequest| {
            let status = req.param("status");
            let customer = req.param("customerName");
            let page = list.list(
                |o| {
                    status.map_or(true, |s| wire_eq(&o.status, s))
                        && customer.map_or(true, |c| o.customer_name.contains(c))
                },
                paging(req),
            )?;
            Ok(Envelope::ok_json(FETCHED, &page)?)
        }),
        RouteEntry::get("/orders/:id", move |req: &MockRequest| {
            match get.find(req.id()?)? {
                Some(order) => Ok(Envelope::ok_json(FETCHED, &order)?),
                None => Ok(Envelope::not_found(NOT_FOUND)),
            }
        }),
        RouteEntry::post("/orders", move |req: &MockRequest| {
            let params: CreateOrder = req.json()?;
            let now = Utc::now();
            let order = Order {
                id: ids.next_id("ORD"),
                total_amount: params.quantity * params.price,
                customer_name: params.customer_name,
                product_name: params.product_name,
                product_type: params.product_type,
                quantity: params.quantity,
                unit: params.unit,
                price: params.price,
                status: OrderStatus::Pending,
                order_date: today(),
                delivery_date: params.delivery_date,
                trade_system_ref: params.trade_system_ref,
                created_at: now,
                updated_at: now,
            };
            tracing::debug!(id = %order.id, "Synthetic order created");
            Ok(Envelope::ok_json(CREATED, &create.insert(order)?)?)
        }),
        RouteEntry::put("/orders/:id", move |req: &MockRequest| {
            let patch = req.body.clone().unwrap_or(Value::Null);
            match update.merge(req.id()?, &patch)? {
                Some(order) => Ok(Envelope::ok_json(UPDATED, &order)?),
                None => Ok(Envelope::not_found(NOT_FOUND)),
            }
        }),
        RouteEntry::put("/orders/:id/cancel", move |req: &MockRequest| {
            let cancelled = cancel.modify(req.id()?, |o| {
                o.status = OrderStatus::Cancelled;
                Ok(())
            })?;
            match cancelled {
                Some(order) => Ok(Envelope::ok_json("cancelled successfully", &order)?),
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

    fn create_body() -> serde_json::Value {
        json!({
            "customerName": "Acme Steel",
            "productName": "Rebar",
            "productType": "REBAR",
            "quantity": 100,
            "unit": "t",
            "price": 3000,
            "deliveryDate": "2024-06-01"
        })
    }

    #[test]
    fn test_list_filters_before_paging() {
        let backend = MockBackend::default();
        let page = call(&backend, "GET", "/api/orders", &[("status", "producing")], None)
            .data
            .unwrap();
        assert_eq!(page["total"], 1);
        assert_eq!(page["list"][0]["id"], "ORD202401002");
        assert_eq!(page["page"], 1);
        assert_eq!(page["pageSize"], 10);

        let page = call(&backend, "GET", "/api/orders", &[("customerName", "Steel")], None)
            .data
            .unwrap();
        assert_eq!(page["total"], 1);

        let page = call(&backend, "GET", "/api/orders", &[("page", "2"), ("pageSize", "2")], None)
            .data
            .unwrap();
        assert_eq!(page["total"], 3);
        assert_eq!(page["list"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_get_missing_order() {
        let backend = MockBackend::default();
        let env = call(&backend, "GET", "/api/orders/NOPE", &[], None);
        assert_eq!(env.code, 404);
        assert_eq!(env.message, "order not found");
        assert!(env.data.is_none());
    }

    #[test]
    fn test_create_then_get() {
        let backend = MockBackend::default();
        let created = call(&backend, "POST", "/api/orders", &[], Some(create_body()))
            .data
            .unwrap();
        let id = created["id"].as_str().unwrap().to_string();
        assert!(id.starts_with("ORD"));
        assert_eq!(created["status"], "pending");
        assert_eq!(created["totalAmount"], 300000.0);
        assert_eq!(created["orderDate"], Utc::now().date_naive().to_string());
        assert_eq!(created["createdAt"], created["updatedAt"]);

        let fetched = call(&backend, "GET", &format!("/api/orders/{id}"), &[], None);
        assert_eq!(fetched.code, 200);
        assert_eq!(fetched.data.unwrap(), created);

        let second = call(&backend, "POST", "/api/orders", &[], Some(create_body()))
            .data
            .unwrap();
        assert_ne!(second["id"], created["id"]);
    }

    #[test]
    fn test_update_keeps_identity() {
        let backend = MockBackend::default();
        let updated = call(
            &backend,
            "PUT",
            "/api/orders/ORD202401001",
            &[],
            Some(json!({"id": "X", "createdAt": "2030-01-01T00:00:00Z", "customerName": "Renamed"})),
        )
        .data
        .unwrap();
        assert_eq!(updated["id"], "ORD202401001");
        assert_eq!(updated["customerName"], "Renamed");
        assert_eq!(updated["createdAt"], "2024-01-15T08:00:00Z");

        assert_eq!(call(&backend, "PUT", "/api/orders/NOPE", &[], Some(json!({}))).code, 404);
    }

    #[test]
    fn test_cancel() {
        let backend = MockBackend::default();
        let env = call(&backend, "PUT", "/api/orders/ORD202401001/cancel", &[], None);
        assert_eq!(env.data.unwrap()["status"], "cancelled");
        assert_eq!(call(&backend, "PUT", "/api/orders/NOPE/cancel", &[], None).code, 404);
    }
}
