//! Seed data for the synthetic backend.
//!
//! One connected workflow (ORD202401001 through CUS202401001) plus a few
//! records in earlier stages.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::model::{
    AisData, Carrier, CarrierStatus, CustomsDeclaration, CustomsStatus, Dispatch, DispatchStatus,
    Order, OrderStatus, ProductionPlan, ProductionStatus, TransportType, User, Vessel,
    VesselStatus, Warehousing, WarehousingStatus,
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    day(y, m, d).and_hms_opt(h, 0, 0).unwrap_or_default().and_utc()
}

pub fn orders() -> Vec<Order> {
    vec![
        Order {
            id: "ORD202401001".into(),
            customer_name: "Shanghai Steel Trading Co.".into(),
            product_name: "Hot-rolled coil".into(),
            product_type: "HRC".into(),
            quantity: 5000.0,
            unit: "t".into(),
            price: 3800.0,
            total_amount: 19_000_000.0,
            status: OrderStatus::Confirmed,
            order_date: day(2024, 1, 15),
            delivery_date: day(2024, 3, 15),
            trade_system_ref: Some("TRADE-2024-001".into()),
            created_at: at(2024, 1, 15, 8),
            updated_at: at(2024, 1, 15, 8),
        },
        Order {
            id: "ORD202401002".into(),
            customer_name: "Jiangsu Building Materials Group".into(),
            product_name: "Cold-rolled coil".into(),
            product_type: "CRC".into(),
            quantity: 3000.0,
            unit: "t".into(),
            price: 4200.0,
            total_amount: 12_600_000.0,
            status: OrderStatus::Producing,
            order_date: day(2024, 1, 20),
            delivery_date: day(2024, 3, 20),
            trade_system_ref: Some("TRADE-2024-002".into()),
            created_at: at(2024, 1, 20, 9),
            updated_at: at(2024, 1, 25, 10),
        },
        Order {
            id: "ORD202401003".into(),
            customer_name: "Guangdong Metal Materials Co.".into(),
            product_name: "Medium plate".into(),
            product_type: "PLATE".into(),
            quantity: 8000.0,
            unit: "t".into(),
            price: 3900.0,
            total_amount: 31_200_000.0,
            status: OrderStatus::Warehousing,
            order_date: day(2024, 1, 10),
            delivery_date: day(2024, 3, 10),
            trade_system_ref: Some("TRADE-2024-003".into()),
            created_at: at(2024, 1, 10, 7),
            updated_at: at(2024, 2, 15, 14),
        },
    ]
}

pub fn production_plans() -> Vec<ProductionPlan> {
    vec![
        ProductionPlan {
            id: "PROD202401001".into(),
            order_id: "ORD202401001".into(),
            factory_name: "Baosteel Group".into(),
            product_type: "HRC".into(),
            planned_quantity: 5000.0,
            actual_quantity: Some(4800.0),
            planned_start_date: day(2024, 1, 20),
            planned_end_date: day(2024, 2, 20),
            actual_start_date: Some(day(2024, 1, 20)),
            actual_end_date: Some(day(2024, 2, 18)),
            status: ProductionStatus::Completed,
            steel_factory_system_ref: Some("STEEL-2024-001".into()),
            created_at: at(2024, 1, 16, 8),
            updated_at: at(2024, 2, 18, 16),
        },
        ProductionPlan {
            id: "PROD202401002".into(),
            order_id: "ORD202401002".into(),
            factory_name: "Shagang Group".into(),
            product_type: "CRC".into(),
            planned_quantity: 3000.0,
            actual_quantity: Some(2800.0),
            planned_start_date: day(2024, 1, 25),
            planned_end_date: day(2024, 2, 25),
            actual_start_date: Some(day(2024, 1, 25)),
            actual_end_date: None,
            status: ProductionStatus::Producing,
            steel_factory_system_ref: Some("STEEL-2024-002".into()),
            created_at: at(2024, 1, 21, 9),
            updated_at: at(2024, 2, 10, 10),
        },
    ]
}

pub fn warehousing() -> Vec<Warehousing> {
    vec![
        Warehousing {
            id: "WH202401001".into(),
            order_id: "ORD202401001".into(),
            production_plan_id: "PROD202401001".into(),
            wharf_name: "Shanghai Port Wharf".into(),
            warehouse_no: "WH-001".into(),
            quantity: 4800.0,
            scheduled_date: day(2024, 2, 20),
            actual_date: Some(day(2024, 2, 22)),
            status: WarehousingStatus::Completed,
            logistics_system_ref: Some("LOG-2024-001".into()),
            created_at: at(2024, 2, 18, 8),
            updated_at: at(2024, 2, 22, 14),
        },
        Warehousing {
            id: "WH202401002".into(),
            order_id: "ORD202401003".into(),
            production_plan_id: "PROD202401003".into(),
            wharf_name: "Ningbo Port Wharf".into(),
            warehouse_no: "WH-002".into(),
            quantity: 8000.0,
            scheduled_date: day(2024, 2, 25),
            actual_date: Some(day(2024, 2, 26)),
            status: WarehousingStatus::Completed,
            logistics_system_ref: Some("LOG-2024-002".into()),
            created_at: at(2024, 2, 20, 9),
            updated_at: at(2024, 2, 26, 16),
        },
    ]
}

pub fn carriers() -> Vec<Carrier> {
    let carrier = |id: &str, name: &str, contact: &str, phone: &str, status, rating| Carrier {
        id: id.into(),
        name: name.into(),
        contact_person: contact.into(),
        contact_phone: phone.into(),
        license_no: format!("CAR-LIC-{}", &id[3..]),
        status,
        rating: Some(rating),
        created_at: at(2024, 1, 1, 0),
        updated_at: at(2024, 1, 1, 0),
    };
    vec![
        carrier("CAR001", "Yangtze Shipping Co.", "Manager Zhang", "13800138001", CarrierStatus::Available, 5),
        carrier("CAR002", "Shanghai Ocean Shipping Group", "Manager Li", "13800138002", CarrierStatus::Available, 4),
        carrier("CAR003", "Jiangsu Waterway Logistics", "Manager Wang", "13800138003", CarrierStatus::Transporting, 4),
    ]
}

/// Carrier id to display name, as known to the dispatch desk.
pub fn carrier_directory() -> BTreeMap<String, String> {
    carriers().into_iter().map(|c| (c.id, c.name)).collect()
}

pub fn dispatches() -> Vec<Dispatch> {
    vec![Dispatch {
        id: "DISP202401001".into(),
        order_id: "ORD202401001".into(),
        warehousing_id: "WH202401001".into(),
        carrier_id: Some("CAR001".into()),
        carrier_name: Some("Yangtze Shipping Co.".into()),
        vessel_id: Some("VES001".into()),
        vessel_name: Some("Yangtze".into()),
        transport_type: TransportType::River,
        quantity: 4800.0,
        origin: "Shanghai Port Wharf".into(),
        destination: "Shanghai Waigaoqiao Terminal".into(),
        scheduled_departure_date: Some(day(2024, 2, 25)),
        actual_departure_date: Some(day(2024, 2, 25)),
        scheduled_arrival_date: Some(day(2024, 2, 26)),
        actual_arrival_date: Some(day(2024, 2, 26)),
        status: DispatchStatus::Completed,
        carrier_system_ref: Some("CAR-SYS-001".into()),
        created_at: at(2024, 2, 22, 8),
        updated_at: at(2024, 2, 26, 16),
    }]
}

/// Vessels are last reported at `now`.
pub fn vessels(now: DateTime<Utc>) -> Vec<Vessel> {
    vec![
        Vessel {
            id: "VES001".into(),
            name: "Yangtze".into(),
            imo_number: "IMO1234567".into(),
            carrier_id: "CAR001".into(),
            carrier_name: "Yangtze Shipping Co.".into(),
            vessel_type: TransportType::River,
            capacity: 5000.0,
            current_location: Some("Shanghai Port".into()),
            current_longitude: Some(121.4737),
            current_latitude: Some(31.2304),
            status: VesselStatus::Transit,
            ais_system_ref: Some("AIS-001".into()),
            created_at: at(2024, 1, 1, 0),
            updated_at: now,
        },
        Vessel {
            id: "VES002".into(),
            name: "Ocean Star".into(),
            imo_number: "IMO2345678".into(),
            carrier_id: "CAR002".into(),
            carrier_name: "Shanghai Ocean Shipping Group".into(),
            vessel_type: TransportType::Ocean,
            capacity: 20000.0,
            current_location: Some("Shanghai Waigaoqiao Terminal".into()),
            current_longitude: Some(121.5737),
            current_latitude: Some(31.3504),
            status: VesselStatus::Loading,
            ais_system_ref: Some("AIS-002".into()),
            created_at: at(2024, 1, 1, 0),
            updated_at: now,
        },
    ]
}

/// AIS samples keyed by vessel id.
pub fn ais_samples(now: DateTime<Utc>) -> BTreeMap<String, Vec<AisData>> {
    let sample = |id: &str, name: &str, lon, lat, speed, heading| AisData {
        vessel_id: id.into(),
        vessel_name: name.into(),
        longitude: lon,
        latitude: lat,
        speed,
        course: heading,
        heading,
        timestamp: now,
    };
    BTreeMap::from([
        ("VES001".to_string(), vec![sample("VES001", "Yangtze", 121.4737, 31.2304, 12.5, 90.0)]),
        ("VES002".to_string(), vec![sample("VES002", "Ocean Star", 121.5737, 31.3504, 0.0, 0.0)]),
    ])
}

pub fn customs_declarations() -> Vec<CustomsDeclaration> {
    vec![CustomsDeclaration {
        id: "CUS202401001".into(),
        order_id: "ORD202401001".into(),
        dispatch_id: "DISP202401001".into(),
        declaration_no: Some("CUS-DEC-2024-001".into()),
        exporter_name: "Shanghai Steel Trading Co.".into(),
        product_name: "Hot-rolled coil".into(),
        product_code: "HS72142000".into(),
        quantity: 4800.0,
        unit: "t".into(),
        value: 18_240_000.0,
        destination_country: "United States".into(),
        submit_date: Some(day(2024, 2, 27)),
        review_date: Some(day(2024, 2, 28)),
        clearance_date: Some(day(2024, 2, 28)),
        status: CustomsStatus::Cleared,
        customs_system_ref: Some("CUSTOMS-2024-001".into()),
        remarks: Some("Released".into()),
        created_at: at(2024, 2, 27, 8),
        updated_at: at(2024, 2, 28, 16),
    }]
}

pub fn users() -> Vec<User> {
    let user = |id, name: &str, email: &str, role: &str| User {
        id,
        name: name.into(),
        email: email.into(),
        role: role.into(),
    };
    vec![
        user(1, "Zhang San", "zhangsan@example.com", "admin"),
        user(2, "Li Si", "lisi@example.com", "user"),
        user(3, "Wang Wu", "wangwu@example.com", "user"),
    ]
}
