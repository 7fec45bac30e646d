pub mod handlers;

use serde::{Deserialize, Serialize};

use crate::core::normalize::NormalizedFacility;

pub use handlers::ParkingTools;

/// Input for the nearby-search tool. Exactly one of address or the
/// coordinate pair must be resolvable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbySearchRequest {
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Search radius in meters
    pub radius: f64,
}

impl Default for NearbySearchRequest {
    fn default() -> Self {
        Self {
            address: None,
            latitude: None,
            longitude: None,
            radius: 1000.0,
        }
    }
}

/// Nearby-search response envelope. Always well-formed; errors are data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbySearchResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub parkings: Vec<NormalizedFacility>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl NearbySearchResponse {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            message: None,
            parkings: Vec::new(),
            count: 0,
            notice: None,
        }
    }

    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            error: None,
            message: Some(message.into()),
            parkings: Vec::new(),
            count: 0,
            notice: None,
        }
    }

    pub fn found(parkings: Vec<NormalizedFacility>, notice: Option<String>) -> Self {
        Self {
            success: true,
            error: None,
            message: None,
            count: parkings.len(),
            parkings,
            notice,
        }
    }
}

/// Input for the facility-detail tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParkingInfoRequest {
    pub parking_name: String,
    pub address: Option<String>,
}

/// Facility-detail response envelope; the normalized record flattens into
/// the top level on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParkingInfoResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub facility: Option<NormalizedFacility>,
}

impl ParkingInfoResponse {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            facility: None,
        }
    }

    pub fn found(facility: NormalizedFacility) -> Self {
        Self {
            success: true,
            error: None,
            facility: Some(facility),
        }
    }
}
