use serde::{Deserialize, Serialize};

use super::realtime::{FeeInfo, OperatingInfo, RealtimeInfo};
use super::region::Region;

/// Base facility attributes from the place-search provider, before any
/// realtime data is merged in
#[derive(Debug, Clone, PartialEq)]
pub struct BaseFacility {
    pub name: String,
    pub address: String,
    /// The place-search provider carries no capacity field, so this is
    /// normally `None` and only realtime data fills it
    pub total_spots: Option<u32>,
    /// Category string; the base record has no true fee field
    pub fee: String,
    pub distance: Option<String>,
    pub phone: Option<String>,
}

/// The caller-facing facility record, uniform across regions except for the
/// optional region-specific sub-objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedFacility {
    pub name: String,
    pub address: String,
    pub total_spots: Option<u32>,
    pub available_spots: Option<u32>,
    pub fee: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_info: Option<OperatingInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_info: Option<FeeInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Merge a base record with realtime info into the output shape.
///
/// Pure; introduces no timestamps or counters of its own. Region-specific
/// sub-objects pass through untouched — consumers branch on region.
pub fn normalize(base: &BaseFacility, region: Region, realtime: &RealtimeInfo) -> NormalizedFacility {
    let mut facility = NormalizedFacility {
        name: base.name.clone(),
        address: base.address.clone(),
        total_spots: base.total_spots,
        available_spots: None,
        fee: base.fee.clone(),
        operating_info: None,
        fee_info: None,
        update_time: None,
        distance: base.distance.clone(),
        phone: base.phone.clone(),
    };

    match (region, realtime) {
        (Region::Seoul, RealtimeInfo::Seoul(rt)) => {
            facility.available_spots = Some(rt.available_spots);
            facility.total_spots = Some(rt.total_spots);
            facility.operating_info = Some(OperatingInfo::Seoul(rt.operating_info.clone()));
            facility.fee_info = Some(FeeInfo::Seoul(rt.fee_info.clone()));
            facility.update_time = Some(rt.update_time.clone());
        }
        (Region::Gyeonggi, RealtimeInfo::Gyeonggi(rt)) => {
            facility.total_spots = rt.total_spots.or(base.total_spots);
            facility.operating_info = Some(OperatingInfo::Gyeonggi(rt.operating_info.clone()));
            facility.fee_info = Some(FeeInfo::Gyeonggi(rt.fee_info.clone()));
        }
        // Sentinel, region Other, or a region/realtime mismatch: base only
        _ => {}
    }

    facility
}
