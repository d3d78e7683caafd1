//! Logistics domain records.
//!
//! Wire names are camelCase and status values snake_case, identical for the
//! real backend and the synthetic emulation.

pub mod carrier;
pub mod customs;
pub mod dispatch;
pub mod order;
pub mod production;
pub mod tracking;
pub mod user;
pub mod vessel;
pub mod warehousing;

use serde::{Deserialize, Serialize};

pub use carrier::{Carrier, CarrierQuery, CarrierStatus};
pub use customs::{CreateCustomsDeclaration, CustomsDeclaration, CustomsQuery, CustomsStatus};
pub use dispatch::{AssignCarrier, AssignVessel, CreateDispatch, Dispatch, DispatchQuery, DispatchStatus, TransportType, VesselAssignment};
pub use order::{CreateOrder, Order, OrderQuery, OrderStatus};
pub use production::{CreateProductionPlan, ProductionPlan, ProductionQuery, ProductionStatus};
pub use tracking::{ProcessNode, ProcessTracking, Statistics, TimelineItem, TimelineQuery};
pub use user::{Credentials, LoginResult, User};
pub use vessel::{AisData, Vessel, VesselQuery, VesselStatus};
pub use warehousing::{CreateWarehousing, Warehousing, WarehousingQuery, WarehousingStatus};

/// A page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub list: Vec<T>,
    /// Count after filtering, before slicing.
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

/// Result of an aggregate sync action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSummary {
    pub synced: usize,
}

/// Implements [`crate::mock::store::Record`] for a struct with `id` and
/// `updated_at` fields.
macro_rules! impl_record {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::mock::store::Record for $ty {
                fn id(&self) -> &str {
                    &self.id
                }

                fn updated_at(&self) -> chrono::DateTime<chrono::Utc> {
                    self.updated_at
                }

                fn set_updated_at(&mut self, at: chrono::DateTime<chrono::Utc>) {
                    self.updated_at = at;
                }
            }
        )+
    };
}

impl_record!(
    Order,
    ProductionPlan,
    Warehousing,
    Carrier,
    Dispatch,
    Vessel,
    CustomsDeclaration,
);
