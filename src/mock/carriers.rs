//! Carrier endpoints.

use std::sync::Arc;

use crate::http::envelope::Envelope;
use crate::mock::{paging, wire_eq, MockRequest, Repository, FETCHED, SYNCED};
use crate::model::{Carrier, SyncSummary};
use crate::routing::RouteEntry;

pub fn routes(carriers: Arc<Repository<Carrier>>) -> Vec<RouteEntry> {
    let list = carriers.clone();
    let get = carriers.clone();
    let sync = carriers;

    vec![
        RouteEntry::get("/carriers", move |req: &MockRequest| {
            let status = req.param("status");
            let name = req.param("name");
            let page = list.list(
                |c| status.map_or(true, |s| wire_eq(&c.status, s)) && name.map_or(true, |n| c.name.contains(n)),
                paging(req),
            )?;
            Ok(Envelope::ok_json(FETCHED, &page)?)
        }),
        RouteEntry::get("/carriers/:id", move |req: &MockRequest| {
            match get.find(req.id()?)? {
                Some(carrier) => Ok(Envelope::ok_json(FETCHED, &carrier)?),
                None => Ok(Envelope::not_found("carrier not found")),
            }
        }),
        RouteEntry::post("/carriers/sync", move |_req: &MockRequest| {
            let synced = sync.modify_all(|_| {})?;
            Ok(Envelope::ok_json(SYNCED, &SyncSummary { synced })?)
        }),
    ]
}

#[cfg(test)]
mod tests {
    use crate::mock::testing::call;
    use crate::mock::MockBackend;

    #[test]
    fn test_sync_restamps_carriers() {
        let backend = MockBackend::default();
        let env = call(&backend, "POST", "/api/carriers/sync", &[], None);
        assert_eq!(env.data.unwrap()["synced"], 3);

        let carrier = call(&backend, "GET", "/api/carriers/CAR001", &[], None).data.unwrap();
        assert!(carrier["updatedAt"].as_str().unwrap() > "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_list_filters() {
        let backend = MockBackend::default();
        let page = call(&backend, "GET", "/api/carriers", &[("status", "available")], None)
            .data
            .unwrap();
        assert_eq!(page["total"], 2);

        let page = call(&backend, "GET", "/api/carriers", &[("name", "Shipping")], None)
            .data
            .unwrap();
        assert_eq!(page["total"], 2);
        assert_eq!(call(&backend, "GET", "/api/carriers/CAR999", &[], None).code, 404);
    }
}
