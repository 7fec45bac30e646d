use serde::{Deserialize, Serialize};

/// WGS84 coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both components inside their WGS84 ranges
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// One place-search result from the local provider, already relabeled from
/// the wire document. Transient; lives for a single tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityCandidate {
    pub name: String,
    pub address: String,
    pub road_address: String,
    pub distance: String,
    pub phone: String,
    pub category: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub place_url: String,
}

impl FacilityCandidate {
    /// Address used for region classification and feed matching: the lot
    /// address when present, else the road address.
    pub fn effective_address(&self) -> &str {
        if self.address.is_empty() {
            &self.road_address
        } else {
            &self.address
        }
    }
}

/// Keyword place-search parameters
#[derive(Debug, Clone)]
pub struct PlaceSearchRequest {
    /// Search keyword
    pub query: String,
    /// Category group filter ("PK6" = parking lot)
    pub category_group_code: Option<String>,
    /// Center coordinate for distance-ranked search
    pub center: Option<Coordinate>,
    /// Radius in meters (provider caps at 20000)
    pub radius: Option<u32>,
    /// Page number (1-based)
    pub page: u32,
    /// Results per page (provider caps at 15)
    pub size: u32,
}

impl Default for PlaceSearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            category_group_code: None,
            center: None,
            radius: None,
            page: 1,
            size: 15,
        }
    }
}

/// Category group code for parking facilities on the place-search provider
pub const CATEGORY_PARKING: &str = "PK6";
