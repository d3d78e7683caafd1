//! End-to-end tracking endpoints.
//!
//! Tracking is read-only and derived from a fixed reference workflow.

use chrono::{DateTime, NaiveDate, Utc};

use crate::http::envelope::Envelope;
use crate::mock::{matches_opt, MockRequest, FETCHED};
use crate::model::tracking::{EventLevel, EventType, NodeStatus};
use crate::model::{ProcessNode, ProcessTracking, Statistics, TimelineItem};
use crate::routing::RouteEntry;

const REFERENCE_ORDER: &str = "ORD202401001";

pub fn routes() -> Vec<RouteEntry> {
    vec![
        RouteEntry::get("/tracking/orders/:id", |req: &MockRequest| {
            Ok(Envelope::ok_json(FETCHED, &process(req.id()?))?)
        }),
        RouteEntry::get("/tracking/timeline", |req: &MockRequest| {
            let order_id = req.param("orderId");
            let items: Vec<TimelineItem> = timeline()
                .into_iter()
                .filter(|t| matches_opt(order_id, &t.order_id))
                .collect();
            Ok(Envelope::ok_json(FETCHED, &items)?)
        }),
        RouteEntry::get("/tracking/statistics", |_req: &MockRequest| {
            Ok(Envelope::ok_json(FETCHED, &statistics())?)
        }),
    ]
}

fn at(m: u32, d: u32, h: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2024, m, d)
        .and_then(|date| date.and_hms_opt(h, 0, 0))
        .unwrap_or_default()
        .and_utc()
}

fn process(order_id: &str) -> ProcessTracking {
    let node = |n: u32, name: &str, start, end, participant: &str| ProcessNode {
        id: format!("node{n}"),
        name: name.into(),
        status: NodeStatus::Completed,
        start_time: Some(start),
        end_time: Some(end),
        participant: Some(participant.into()),
    };
    ProcessTracking {
        order_id: order_id.to_string(),
        order_no: REFERENCE_ORDER.into(),
        nodes: vec![
            node(1, "Order placed", at(1, 15, 8), at(1, 15, 8), "Customer"),
            node(2, "Production scheduled", at(1, 16, 8), at(2, 18, 16), "Steel mill"),
            node(3, "Wharf collection", at(2, 20, 8), at(2, 22, 14), "Platform"),
            node(4, "Carrier dispatched", at(2, 22, 8), at(2, 23, 10), "Platform"),
            node(5, "Vessel transport", at(2, 25, 8), at(2, 26, 16), "Carrier"),
            node(6, "Customs clearance", at(2, 27, 8), at(2, 28, 16), "Customs"),
        ],
        current_step: 6,
        total_steps: 6,
        progress: 100,
        estimated_completion_date: NaiveDate::from_ymd_opt(2024, 2, 28),
    }
}

fn timeline() -> Vec<TimelineItem> {
    let item = |n: u32, event_type, title: &str, description: &str, timestamp, participant: &str, status| TimelineItem {
        id: format!("timeline{n}"),
        order_id: REFERENCE_ORDER.into(),
        event_type,
        title: title.into(),
        description: description.into(),
        timestamp,
        participant: Some(participant.into()),
        status,
    };
    vec![
        item(1, EventType::Order, "Order placed",
            "Shanghai Steel Trading Co. ordered 5000 t of hot-rolled coil",
            at(1, 15, 8), "Customer", EventLevel::Success),
        item(2, EventType::Production, "Production scheduled",
            "Baosteel Group started production, 5000 t planned",
            at(1, 16, 8), "Steel mill", EventLevel::Success),
        item(3, EventType::Warehousing, "Wharf collection completed",
            "Shanghai Port Wharf collected 4800 t",
            at(2, 22, 14), "Platform", EventLevel::Success),
        item(4, EventType::Dispatch, "Carrier assigned",
            "Yangtze Shipping Co. assigned as carrier",
            at(2, 23, 10), "Platform", EventLevel::Success),
        item(5, EventType::Vessel, "Vessel departed",
            "Yangtze departed Shanghai Port Wharf for Shanghai Waigaoqiao Terminal",
            at(2, 25, 8), "Carrier", EventLevel::Info),
        item(6, EventType::Customs, "Customs released",
            "Declaration approved, cargo released",
            at(2, 28, 16), "Customs", EventLevel::Success),
    ]
}

fn statistics() -> Statistics {
    Statistics {
        total_orders: 25,
        active_orders: 8,
        completed_orders: 15,
        total_quantity: 125_000,
        in_transit_quantity: 32_000,
        total_vessels: 15,
        active_vessels: 8,
        total_carriers: 12,
        active_carriers: 8,
    }
}
