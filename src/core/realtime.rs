use serde::{Deserialize, Serialize};

/// Why no realtime data is attached to a facility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnavailableReason {
    /// The regional feed has no credential configured
    NotConfigured,
    /// The feed could not be queried or answered garbage
    ProviderError,
    /// The feed answered but no row matched the facility
    NoMatch,
    /// The facility sits outside the supported regions
    UnsupportedRegion,
}

/// Region-shaped realtime data for one facility, or the explicit reason
/// there is none. The normalizer branches on this tag, never on a missing
/// key.
#[derive(Debug, Clone, PartialEq)]
pub enum RealtimeInfo {
    Seoul(SeoulRealtime),
    Gyeonggi(GyeonggiRealtime),
    Unavailable(UnavailableReason),
}

impl RealtimeInfo {
    pub fn is_available(&self) -> bool {
        !matches!(self, Self::Unavailable(_))
    }
}

/// Seoul realtime extraction result: live occupancy plus operating and fee
/// schedules
#[derive(Debug, Clone, PartialEq)]
pub struct SeoulRealtime {
    pub available_spots: u32,
    pub total_spots: u32,
    pub current_spots: u32,
    /// Feed-native timestamp string, passed through verbatim
    pub update_time: String,
    pub operating_info: SeoulOperatingInfo,
    pub fee_info: SeoulFeeInfo,
}

/// Gyeonggi extraction result. The feed carries no live occupancy, so
/// there is no available-spots field to extract.
#[derive(Debug, Clone, PartialEq)]
pub struct GyeonggiRealtime {
    pub total_spots: Option<u32>,
    pub operating_info: GyeonggiOperatingInfo,
    pub fee_info: GyeonggiFeeInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoulOperatingInfo {
    pub operating_type: String,
    pub status: String,
    pub weekday_start: String,
    pub weekday_end: String,
    pub weekend_start: String,
    pub weekend_end: String,
    pub holiday_start: String,
    pub holiday_end: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoulFeeInfo {
    pub is_paid: String,
    pub night_paid: String,
    pub basic_fee: i64,
    pub basic_hours: i64,
    pub additional_fee: i64,
    pub additional_hours: i64,
    pub daily_max_fee: i64,
    pub period_fee: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GyeonggiOperatingInfo {
    pub weekday_start: String,
    pub weekday_end: String,
    pub saturday_start: String,
    pub saturday_end: String,
    pub holiday_start: String,
    pub holiday_end: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GyeonggiFeeInfo {
    pub is_paid: String,
    pub basic_time: i64,
    pub basic_fee: i64,
    pub additional_time: i64,
    pub additional_fee: i64,
    pub payment_method: String,
}

/// Operating-hour sub-object of a normalized facility. Untagged so each
/// region serializes its own key set; consumers branch on region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OperatingInfo {
    Seoul(SeoulOperatingInfo),
    Gyeonggi(GyeonggiOperatingInfo),
}

/// Fee-schedule sub-object of a normalized facility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeeInfo {
    Seoul(SeoulFeeInfo),
    Gyeonggi(GyeonggiFeeInfo),
}
