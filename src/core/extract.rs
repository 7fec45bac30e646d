use log::{debug, warn};

use super::matcher::{find_match, FeedRecord, MatchTarget};
use super::realtime::{
    GyeonggiFeeInfo, GyeonggiOperatingInfo, GyeonggiRealtime, RealtimeInfo, SeoulFeeInfo,
    SeoulOperatingInfo, SeoulRealtime, UnavailableReason,
};
use super::region::Region;
use crate::api::gyeonggi::{GyeonggiDataClient, GyeonggiParkingRow};
use crate::api::seoul::{SeoulOpenDataClient, SeoulParkingRow};
use crate::error::JuchaError;

// One bounded page per feed, per tool invocation
const SEOUL_PAGE_END: u32 = 1000;
const GYEONGGI_PAGE_SIZE: u32 = 100;

impl FeedRecord for SeoulParkingRow {
    fn record_name(&self) -> &str {
        &self.name
    }
    fn record_address(&self) -> &str {
        &self.address
    }
}

impl FeedRecord for GyeonggiParkingRow {
    fn record_name(&self) -> &str {
        &self.name
    }
    fn record_address(&self) -> &str {
        self.effective_address()
    }
}

type FeedSnapshot<R> = Result<Vec<R>, UnavailableReason>;

/// Per-invocation realtime lookup.
///
/// Fetches each regional feed at most once per tool invocation and reuses
/// the snapshot across all candidate facilities of that region. Feed and
/// match failures are absorbed here and downgraded to an explicit
/// [`UnavailableReason`]; they never interrupt sibling facilities.
pub struct RealtimeLookup<'a> {
    seoul: &'a SeoulOpenDataClient,
    gyeonggi: &'a GyeonggiDataClient,
    seoul_snapshot: Option<FeedSnapshot<SeoulParkingRow>>,
    gyeonggi_snapshot: Option<FeedSnapshot<GyeonggiParkingRow>>,
}

impl<'a> RealtimeLookup<'a> {
    pub fn new(seoul: &'a SeoulOpenDataClient, gyeonggi: &'a GyeonggiDataClient) -> Self {
        Self {
            seoul,
            gyeonggi,
            seoul_snapshot: None,
            gyeonggi_snapshot: None,
        }
    }

    /// Look up realtime data for one facility
    pub async fn lookup(&mut self, region: Region, name: &str, address: &str) -> RealtimeInfo {
        match region {
            Region::Seoul => self.lookup_seoul(name, address).await,
            Region::Gyeonggi => self.lookup_gyeonggi(name, address).await,
            Region::Other => RealtimeInfo::Unavailable(UnavailableReason::UnsupportedRegion),
        }
    }

    async fn lookup_seoul(&mut self, name: &str, address: &str) -> RealtimeInfo {
        if self.seoul_snapshot.is_none() {
            let snapshot = match self.seoul.realtime_parking_rows(1, SEOUL_PAGE_END).await {
                Ok(rows) => {
                    debug!("seoul feed snapshot: {} rows", rows.len());
                    Ok(rows)
                }
                Err(e) => {
                    warn!("seoul feed unavailable: {e}");
                    Err(unavailable_reason(&e))
                }
            };
            self.seoul_snapshot = Some(snapshot);
        }

        match self.seoul_snapshot.as_ref().unwrap() {
            Err(reason) => RealtimeInfo::Unavailable(*reason),
            Ok(rows) => match find_match(MatchTarget::new(name, address), rows) {
                Some(row) => RealtimeInfo::Seoul(seoul_realtime(row)),
                None => RealtimeInfo::Unavailable(UnavailableReason::NoMatch),
            },
        }
    }

    async fn lookup_gyeonggi(&mut self, name: &str, address: &str) -> RealtimeInfo {
        if self.gyeonggi_snapshot.is_none() {
            let snapshot = match self.gyeonggi.parking_rows(1, GYEONGGI_PAGE_SIZE).await {
                Ok(rows) => {
                    debug!("gyeonggi feed snapshot: {} rows", rows.len());
                    Ok(rows)
                }
                Err(e) => {
                    warn!("gyeonggi feed unavailable: {e}");
                    Err(unavailable_reason(&e))
                }
            };
            self.gyeonggi_snapshot = Some(snapshot);
        }

        match self.gyeonggi_snapshot.as_ref().unwrap() {
            Err(reason) => RealtimeInfo::Unavailable(*reason),
            Ok(rows) => match find_match(MatchTarget::new(name, address), rows) {
                Some(row) => RealtimeInfo::Gyeonggi(gyeonggi_realtime(row)),
                None => RealtimeInfo::Unavailable(UnavailableReason::NoMatch),
            },
        }
    }
}

fn unavailable_reason(error: &JuchaError) -> UnavailableReason {
    if error.is_credential_error() {
        UnavailableReason::NotConfigured
    } else {
        UnavailableReason::ProviderError
    }
}

/// Map a matched Seoul row to realtime info.
///
/// The feed occasionally reports occupancy above capacity; availability is
/// floored at zero rather than going negative.
pub fn seoul_realtime(row: &SeoulParkingRow) -> SeoulRealtime {
    let available = (row.total_spots - row.current_spots).max(0.0);

    SeoulRealtime {
        available_spots: available as u32,
        total_spots: row.total_spots.max(0.0) as u32,
        current_spots: row.current_spots.max(0.0) as u32,
        update_time: row.update_time.clone(),
        operating_info: SeoulOperatingInfo {
            operating_type: row.operating_type.clone(),
            status: row.status.clone(),
            weekday_start: row.weekday_start.clone(),
            weekday_end: row.weekday_end.clone(),
            weekend_start: row.weekend_start.clone(),
            weekend_end: row.weekend_end.clone(),
            holiday_start: row.holiday_start.clone(),
            holiday_end: row.holiday_end.clone(),
        },
        fee_info: SeoulFeeInfo {
            is_paid: row.is_paid.clone(),
            night_paid: row.night_paid.clone(),
            basic_fee: row.basic_fee,
            basic_hours: row.basic_minutes,
            additional_fee: row.additional_fee,
            additional_hours: row.additional_minutes,
            daily_max_fee: row.daily_max_fee,
            period_fee: row.period_fee,
        },
    }
}

/// Map a matched Gyeonggi row to realtime info. Zero capacity means the
/// field was absent, so it maps to unknown.
pub fn gyeonggi_realtime(row: &GyeonggiParkingRow) -> GyeonggiRealtime {
    let total = if row.capacity > 0.0 {
        Some(row.capacity as u32)
    } else {
        None
    };

    GyeonggiRealtime {
        total_spots: total,
        operating_info: GyeonggiOperatingInfo {
            weekday_start: row.weekday_start.clone(),
            weekday_end: row.weekday_end.clone(),
            saturday_start: row.saturday_start.clone(),
            saturday_end: row.saturday_end.clone(),
            holiday_start: row.holiday_start.clone(),
            holiday_end: row.holiday_end.clone(),
        },
        fee_info: GyeonggiFeeInfo {
            is_paid: row.charge_info.clone(),
            basic_time: row.basic_minutes,
            basic_fee: row.basic_fee,
            additional_time: row.additional_minutes,
            additional_fee: row.additional_fee,
            payment_method: row.payment_method.clone(),
        },
    }
}
