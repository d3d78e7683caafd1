//! Customs declaration endpoints.

use std::sync::Arc;

use chrono::Utc;

use crate::http::envelope::Envelope;
use crate::mock::store::today;
use crate::mock::{matches_opt, paging, wire_eq, IdGenerator, MockRequest, Repository, CREATED, FETCHED, SYNCED};
use crate::model::{CreateCustomsDeclaration, CustomsDeclaration, CustomsStatus};
use crate::routing::RouteEntry;

const NOT_FOUND: &str = "customs declaration not found";

pub fn routes(declarations: Arc<Repository<CustomsDeclaration>>, ids: Arc<IdGenerator>) -> Vec<RouteEntry> {
    let list = declarations.clone();
    let get = declarations.clone();
    let create = declarations.clone();
    let submit = declarations.clone();
    let sync = declarations;

    vec![
        RouteEntry::get("/customs/declarations", move |req: &MockRequest| {
            let order_id = req.param("orderId");
            let status = req.param("status");
            let page = list.list(
                |c| matches_opt(order_id, &c.order_id) && status.map_or(true, |s| wire_eq(&c.status, s)),
                paging(req),
            )?;
            Ok(Envelope::ok_json(FETCHED, &page)?)
        }),
        RouteEntry::get("/customs/declarations/:id", move |req: &MockRequest| {
            match get.find(req.id()?)? {
                Some(declaration) => Ok(Envelope::ok_json(FETCHED, &declaration)?),
                None => Ok(Envelope::not_found(NOT_FOUND)),
            }
        }),
        RouteEntry::post("/customs/declarations", move |req: &MockRequest| {
            let params: CreateCustomsDeclaration = req.json()?;
            let now = Utc::now();
            let declaration = CustomsDeclaration {
                id: ids.next_id("CUS"),
                order_id: params.order_id,
                dispatch_id: params.dispatch_id,
                declaration_no: None,
                exporter_name: params.exporter_name,
                product_name: params.product_name,
                product_code: params.product_code,
                quantity: params.quantity,
                unit: params.unit,
                value: params.value,
                destination_country: params.destination_country,
                submit_date: None,
                review_date: None,
                clearance_date: None,
                status: CustomsStatus::NotSubmitted,
                customs_system_ref: None,
                remarks: None,
                created_at: now,
                updated_at: now,
            };
            Ok(Envelope::ok_json(CREATED, &create.insert(declaration)?)?)
        }),
        RouteEntry::post("/customs/declarations/:id/submit", move |req: &MockRequest| {
            let submitted = submit.modify(req.id()?, |c| {
                c.status = CustomsStatus::Submitted;
                c.submit_date = Some(today());
                Ok(())
            })?;
            match submitted {
                Some(declaration) => Ok(Envelope::ok_json("submitted successfully", &declaration)?),
                None => Ok(Envelope::not_found(NOT_FOUND)),
            }
        }),
        RouteEntry::post("/customs/declarations/:id/sync", move |req: &MockRequest| {
            let synced = sync.modify(req.id()?, |c| {
                let date = today();
                c.status = CustomsStatus::Approved;
                c.review_date = Some(date);
                c.clearance_date = Some(date);
                Ok(())
            })?;
            match synced {
                Some(declaration) => Ok(Envelope::ok_json(SYNCED, &declaration)?),
                None => Ok(Envelope::not_found(NOT_FOUND)),
            }
        }),
    ]
}
