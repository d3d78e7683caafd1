//! Vessel, AIS and vessel-assignment endpoints.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;

use crate::http::envelope::Envelope;
use crate::mock::{matches_opt, paging, wire_eq, MockError, MockRequest, MockResult, Repository, ASSIGNED, FETCHED, SYNCED};
use crate::model::{AisData, AssignVessel, SyncSummary, Vessel, VesselAssignment};
use crate::routing::RouteEntry;

const VESSEL_NOT_FOUND: &str = "vessel not found";

/// AIS samples keyed by vessel id.
#[derive(Debug)]
pub struct AisFeed {
    seed: BTreeMap<String, Vec<AisData>>,
    samples: RwLock<BTreeMap<String, Vec<AisData>>>,
}

impl AisFeed {
    pub fn new(seed: BTreeMap<String, Vec<AisData>>) -> Self {
        Self {
            samples: RwLock::new(seed.clone()),
            seed,
        }
    }

    pub fn reset(&self) -> MockResult<()> {
        *self.samples.write().map_err(|_| MockError::Poisoned("ais"))? = self.seed.clone();
        Ok(())
    }

    /// Samples for one vessel; empty when the vessel has none.
    pub fn for_vessel(&self, vessel_id: &str) -> MockResult<Vec<AisData>> {
        let samples = self.samples.read().map_err(|_| MockError::Poisoned("ais"))?;
        Ok(samples.get(vessel_id).cloned().unwrap_or_default())
    }

    pub fn all(&self) -> MockResult<Vec<AisData>> {
        let samples = self.samples.read().map_err(|_| MockError::Poisoned("ais"))?;
        Ok(samples.values().flatten().cloned().collect())
    }

    /// Restamp every sample, returning the number of vessels reporting.
    pub fn restamp(&self) -> MockResult<usize> {
        let mut samples = self.samples.write().map_err(|_| MockError::Poisoned("ais"))?;
        let now = Utc::now();
        for sample in samples.values_mut().flatten() {
            sample.timestamp = now.max(sample.timestamp);
        }
        Ok(samples.len())
    }
}

pub fn routes(vessels: Arc<Repository<Vessel>>, ais: Arc<AisFeed>) -> Vec<RouteEntry> {
    let list = vessels.clone();
    let get = vessels.clone();
    let assign = vessels;
    let track = ais.clone();
    let realtime = ais.clone();
    let sync = ais;

    vec![
        RouteEntry::get("/vessels", move |req: &MockRequest| {
            let carrier_id = req.param("carrierId");
            let status = req.param("status");
            let vessel_type = req.param("vesselType");
            let page = list.list(
                |v| {
                    matches_opt(carrier_id, &v.carrier_id)
                        && status.map_or(true, |s| wire_eq(&v.status, s))
                        && vessel_type.map_or(true, |t| wire_eq(&v.vessel_type, t))
                },
                paging(req),
            )?;
            Ok(Envelope::ok_json(FETCHED, &page)?)
        }),
        RouteEntry::get("/vessels/:id", move |req: &MockRequest| {
            match get.find(req.id()?)? {
                Some(vessel) => Ok(Envelope::ok_json(FETCHED, &vessel)?),
                None => Ok(Envelope::not_found(VESSEL_NOT_FOUND)),
            }
        }),
        RouteEntry::get("/vessels/:id/ais", move |req: &MockRequest| {
            Ok(Envelope::ok_json(FETCHED, &track.for_vessel(req.id()?)?)?)
        }),
        RouteEntry::get("/vessels/ais/realtime", move |_req: &MockRequest| {
            Ok(Envelope::ok_json(FETCHED, &realtime.all()?)?)
        }),
        RouteEntry::post("/dispatches/:id/assign-vessel", move |req: &MockRequest| {
            let params: AssignVessel = req.json()?;
            match assign.find(&params.vessel_id)? {
                Some(vessel) => {
                    let assignment = VesselAssignment {
                        dispatch_id: req.id()?.to_string(),
                        vessel_id: vessel.id,
                        vessel_name: vessel.name,
                    };
                    Ok(Envelope::ok_json(ASSIGNED, &assignment)?)
                }
                None => Ok(Envelope::not_found(VESSEL_NOT_FOUND)),
            }
        }),
        RouteEntry::post("/vessels/ais/sync", move |_req: &MockRequest| {
            let synced = sync.restamp()?;
            Ok(Envelope::ok_json(SYNCED, &SyncSummary { synced })?)
        }),
    ]
}
