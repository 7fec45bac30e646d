use log::debug;

use super::{
    NearbySearchRequest, NearbySearchResponse, ParkingInfoRequest, ParkingInfoResponse,
};
use crate::api::gyeonggi::GyeonggiDataClient;
use crate::api::kakao::KakaoLocalClient;
use crate::api::seoul::SeoulOpenDataClient;
use crate::api::types::{Coordinate, FacilityCandidate, PlaceSearchRequest, CATEGORY_PARKING};
use crate::api::ClientConfig;
use crate::config::Config;
use crate::core::extract::RealtimeLookup;
use crate::core::normalize::{normalize, BaseFacility, NormalizedFacility};
use crate::core::region::{classify, Region};
use crate::error::Result;

const NEARBY_PAGE_SIZE: u32 = 15;
const INFO_PAGE_SIZE: u32 = 10;

const MSG_NEED_LOCATION: &str = "주소 또는 좌표(위도, 경도)를 제공해주세요.";
const MSG_INVALID_LOCATION: &str = "유효하지 않은 위치 정보입니다. 확인 후 다시 시도해주세요.";
const MSG_INVALID_RADIUS: &str = "검색 반경은 0보다 커야 합니다.";
const MSG_NO_NEARBY_RESULTS: &str = "주변에서 주차장을 찾을 수 없습니다. 검색 범위를 넓혀보세요.";
const MSG_NEED_NAME: &str = "주차장 이름을 입력해주세요.";
const MSG_OTHER_REGION_NOTICE: &str = "해당 지역은 기본 주차장 정보만 제공됩니다. \
    실시간 정보는 서울 지역에서, 요금 및 운영시간 정보는 서울/경기 지역에서 이용 가능합니다.";

/// The two callable parking tools, bound to explicit provider clients.
///
/// Every invocation performs a strictly sequential chain of calls and
/// returns a well-formed envelope; no error or panic crosses this boundary.
pub struct ParkingTools {
    kakao: KakaoLocalClient,
    seoul: SeoulOpenDataClient,
    gyeonggi: GyeonggiDataClient,
}

impl ParkingTools {
    pub fn new(
        kakao: KakaoLocalClient,
        seoul: SeoulOpenDataClient,
        gyeonggi: GyeonggiDataClient,
    ) -> Self {
        Self {
            kakao,
            seoul,
            gyeonggi,
        }
    }

    /// Build the tool set from resolved configuration. Missing keys are
    /// carried as empty and surface per the error taxonomy at call time.
    pub fn from_config(config: &Config) -> Result<Self> {
        let kakao = KakaoLocalClient::new(ClientConfig::with_key(
            config.kakao_api_key().unwrap_or_default(),
        ))?;
        let seoul = SeoulOpenDataClient::new(ClientConfig::with_key(
            config.seoul_api_key().unwrap_or_default(),
        ))?;
        let gyeonggi = GyeonggiDataClient::new(ClientConfig::with_key(
            config.gyeonggi_api_key().unwrap_or_default(),
        ))?;
        Ok(Self::new(kakao, seoul, gyeonggi))
    }

    /// Search parking facilities around an address or coordinate
    pub async fn search_nearby_parking(
        &self,
        request: &NearbySearchRequest,
    ) -> NearbySearchResponse {
        let address = request
            .address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty());

        if address.is_none() && (request.latitude.is_none() || request.longitude.is_none()) {
            return NearbySearchResponse::failure(MSG_NEED_LOCATION);
        }
        if request.radius <= 0.0 {
            return NearbySearchResponse::failure(MSG_INVALID_RADIUS);
        }

        let center = match address {
            Some(addr) => match self.kakao.address_to_coordinate(addr).await {
                Ok(Some(coordinate)) => coordinate,
                Ok(None) => {
                    return NearbySearchResponse::failure(format!(
                        "주소 '{addr}'를 찾을 수 없습니다. 주소를 확인해주세요."
                    ))
                }
                Err(e) => return NearbySearchResponse::failure(e.user_message()),
            },
            None => Coordinate::new(request.latitude.unwrap(), request.longitude.unwrap()),
        };

        if !center.is_valid() {
            return NearbySearchResponse::failure(MSG_INVALID_LOCATION);
        }

        let search = PlaceSearchRequest {
            query: "주차장".to_string(),
            category_group_code: Some(CATEGORY_PARKING.to_string()),
            center: Some(center),
            radius: Some(request.radius as u32),
            page: 1,
            size: NEARBY_PAGE_SIZE,
        };

        let candidates = match self.kakao.search_places(&search).await {
            Ok(candidates) => candidates,
            Err(e) => return NearbySearchResponse::failure(e.user_message()),
        };

        if candidates.is_empty() {
            return NearbySearchResponse::empty(MSG_NO_NEARBY_RESULTS);
        }

        debug!("nearby search: {} candidates", candidates.len());

        let mut lookup = RealtimeLookup::new(&self.seoul, &self.gyeonggi);
        let mut parkings = Vec::with_capacity(candidates.len());
        let mut has_other_region = false;

        for candidate in &candidates {
            let (facility, region) = self.resolve_facility(candidate, &mut lookup).await;
            if region == Region::Other {
                has_other_region = true;
            }
            parkings.push(facility);
        }

        let notice = has_other_region.then(|| MSG_OTHER_REGION_NOTICE.to_string());
        NearbySearchResponse::found(parkings, notice)
    }

    /// Retrieve detail for one named facility
    pub async fn get_parking_info(&self, request: &ParkingInfoRequest) -> ParkingInfoResponse {
        let name = request.parking_name.trim();
        if name.is_empty() {
            return ParkingInfoResponse::failure(MSG_NEED_NAME);
        }

        let address = request
            .address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty());

        let search = PlaceSearchRequest {
            query: address.unwrap_or(name).to_string(),
            category_group_code: Some(CATEGORY_PARKING.to_string()),
            page: 1,
            size: INFO_PAGE_SIZE,
            ..Default::default()
        };

        let candidates = match self.kakao.search_places(&search).await {
            Ok(candidates) => candidates,
            Err(e) => return ParkingInfoResponse::failure(e.user_message()),
        };

        let candidate = match pick_candidate(&candidates, name, address) {
            Some(candidate) => candidate,
            None => {
                return ParkingInfoResponse::failure(format!(
                    "'{name}' 주차장 정보를 찾을 수 없습니다."
                ))
            }
        };

        let mut lookup = RealtimeLookup::new(&self.seoul, &self.gyeonggi);
        let (facility, _region) = self.resolve_facility(candidate, &mut lookup).await;
        ParkingInfoResponse::found(facility)
    }

    async fn resolve_facility(
        &self,
        candidate: &FacilityCandidate,
        lookup: &mut RealtimeLookup<'_>,
    ) -> (NormalizedFacility, Region) {
        let address = candidate.effective_address();
        let region = classify(address);
        let realtime = lookup.lookup(region, &candidate.name, address).await;

        let base = BaseFacility {
            name: candidate.name.clone(),
            address: address.to_string(),
            total_spots: None,
            fee: candidate.category.clone(),
            distance: some_nonempty(&candidate.distance),
            phone: some_nonempty(&candidate.phone),
        };

        (normalize(&base, region, &realtime), region)
    }
}

/// Best place-search hit for a named facility: first bidirectional
/// name/address match, else the first result.
fn pick_candidate<'a>(
    candidates: &'a [FacilityCandidate],
    name: &str,
    address: Option<&str>,
) -> Option<&'a FacilityCandidate> {
    let matched = candidates.iter().find(|candidate| {
        let name_match =
            candidate.name.contains(name) || name.contains(candidate.name.as_str());
        let addr_match = address.is_some_and(|addr| {
            candidate.address.contains(addr)
                || addr.contains(candidate.address.as_str())
                || candidate.road_address.contains(addr)
                || addr.contains(candidate.road_address.as_str())
        });
        name_match || addr_match
    });

    matched.or_else(|| candidates.first())
}

fn some_nonempty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, address: &str, road: &str) -> FacilityCandidate {
        FacilityCandidate {
            name: name.to_string(),
            address: address.to_string(),
            road_address: road.to_string(),
            distance: String::new(),
            phone: String::new(),
            category: "교통,수송 > 교통시설 > 주차장".to_string(),
            latitude: None,
            longitude: None,
            place_url: String::new(),
        }
    }

    #[test]
    fn exact_name_match_beats_first_result() {
        let candidates = vec![
            candidate("서소문 공영주차장", "서울 중구 서소문동", ""),
            candidate("시청 공영주차장", "서울 중구 태평로1가", ""),
        ];
        let hit = pick_candidate(&candidates, "시청", None).unwrap();
        assert_eq!(hit.name, "시청 공영주차장");
    }

    #[test]
    fn falls_back_to_first_result() {
        let candidates = vec![
            candidate("서소문 공영주차장", "서울 중구 서소문동", ""),
            candidate("남대문 주차장", "서울 중구 남대문로", ""),
        ];
        let hit = pick_candidate(&candidates, "전혀없는이름", None).unwrap();
        assert_eq!(hit.name, "서소문 공영주차장");
    }

    #[test]
    fn road_address_participates_in_matching() {
        let candidates = vec![
            candidate("A 주차장", "", "경기도 수원시 효원로 1"),
            candidate("B 주차장", "", "경기도 성남시 산성대로 2"),
        ];
        let hit = pick_candidate(&candidates, "없는이름", Some("경기도 성남시 산성대로 2"))
            .unwrap();
        assert_eq!(hit.name, "B 주차장");
    }

    #[test]
    fn no_candidates_is_none() {
        assert!(pick_candidate(&[], "시청", None).is_none());
    }
}
