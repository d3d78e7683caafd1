//! Export customs declarations.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomsStatus {
    NotSubmitted,
    Submitted,
    UnderReview,
    Approved,
    Rejected,
    Cleared,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomsDeclaration {
    pub id: String,
    pub order_id: String,
    pub dispatch_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaration_no: Option<String>,
    pub exporter_name: String,
    pub product_name: String,
    /// HS commodity code.
    pub product_code: String,
    pub quantity: f64,
    pub unit: String,
    /// Declared value in USD.
    pub value: f64,
    pub destination_country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clearance_date: Option<NaiveDate>,
    pub status: CustomsStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customs_system_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomsDeclaration {
    pub order_id: String,
    pub dispatch_id: String,
    pub exporter_name: String,
    pub product_name: String,
    pub product_code: String,
    pub quantity: f64,
    pub unit: String,
    pub value: f64,
    pub destination_country: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CustomsStatus>,
}
