//! Vessels and AIS position reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::dispatch::TransportType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VesselStatus {
    Available,
    Loading,
    Transit,
    Unloading,
    Maintenance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vessel {
    pub id: String,
    pub name: String,
    pub imo_number: String,
    pub carrier_id: String,
    pub carrier_name: String,
    pub vessel_type: TransportType,
    /// Deadweight tonnes.
    pub capacity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_latitude: Option<f64>,
    pub status: VesselStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ais_system_ref: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One AIS position sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AisData {
    pub vessel_id: String,
    pub vessel_name: String,
    pub longitude: f64,
    pub latitude: f64,
    /// Knots.
    pub speed: f64,
    /// Degrees.
    pub course: f64,
    /// Degrees.
    pub heading: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VesselQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<VesselStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vessel_type: Option<TransportType>,
}
