use log::debug;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::client::{build_http_client, status_error, ClientConfig};
use super::deserializers::{lenient_f64, lenient_i64, single_or_vec};
use super::seoul::FeedResult;
use crate::error::{JuchaError, Result};

const BASE_URL: &str = "https://openapi.gg.go.kr";
const ENDPOINT: &str = "/Parking";

const PROVIDER: &str = "gyeonggi";

/// Gyeonggi data-dream parking feed client.
///
/// The listing is static facility data (no live occupancy). The response
/// nests rows under `ParkingPlace`, which is either a two-element array
/// (`[{head: …}, {row: …}]`) or a flat object with `row` directly.
pub struct GyeonggiDataClient {
    config: ClientConfig,
    http: Client,
}

impl GyeonggiDataClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = build_http_client(&config)?;
        Ok(Self { config, http })
    }

    pub fn is_configured(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    /// Fetch one bounded page of parking rows
    pub async fn parking_rows(&self, page: u32, size: u32) -> Result<Vec<GyeonggiParkingRow>> {
        if self.config.api_key.is_empty() {
            return Err(JuchaError::NotConfigured { provider: PROVIDER });
        }

        let base = self.config.base_url_or(BASE_URL);
        let url = Url::parse_with_params(
            &format!("{base}{ENDPOINT}"),
            &[
                ("KEY", self.config.api_key.clone()),
                ("Type", "json".to_string()),
                ("pIndex", page.to_string()),
                ("pSize", size.to_string()),
            ],
        )
        .map_err(|e| JuchaError::bad_response(PROVIDER, e.to_string()))?;

        debug!("GET {} {ENDPOINT} page={page} size={size}", PROVIDER);
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(PROVIDER, status));
        }

        let body = response.text().await.map_err(JuchaError::Network)?;
        if body.trim().is_empty() {
            return Err(JuchaError::bad_response(PROVIDER, "empty response body"));
        }

        let raw: GyeonggiFeedResponse = serde_json::from_str(&body)
            .map_err(|e| JuchaError::bad_response(PROVIDER, format!("invalid JSON: {e}")))?;

        if let Some(result) = &raw.result {
            if !result.code.is_empty() && result.code != "INFO-000" {
                return Err(JuchaError::bad_response(
                    PROVIDER,
                    format!("{}: {}", result.code, result.message),
                ));
            }
        }

        Ok(match raw.parking_place {
            Some(ParkingPlace::Sections(sections)) => sections
                .into_iter()
                .find_map(|section| match section {
                    ParkingPlaceSection::Rows { row } => Some(row),
                    ParkingPlaceSection::Head { .. } => None,
                })
                .unwrap_or_default(),
            Some(ParkingPlace::Flat(body)) => body.row,
            None => Vec::new(),
        })
    }
}

/// One row of the Gyeonggi listing. The feed has shipped both upper- and
/// lower-case field names; aliases cover both. Capacity of 0 is treated as
/// unknown downstream.
#[derive(Debug, Clone, Deserialize)]
pub struct GyeonggiParkingRow {
    #[serde(rename = "PARKPLC_NM", alias = "parkplc_nm", default)]
    pub name: String,
    #[serde(rename = "LOCPLC_ROADNM_ADDR", alias = "locplc_roadnm_addr", default)]
    pub road_address: String,
    #[serde(rename = "LOCPLC_LOTNO_ADDR", alias = "locplc_lotno_addr", default)]
    pub lot_address: String,
    #[serde(
        rename = "PARKNG_COMPRT_PLANE_CNT",
        alias = "parkng_comprt_plane_cnt",
        default,
        deserialize_with = "lenient_f64"
    )]
    pub capacity: f64,
    #[serde(rename = "WKDAY_OPERT_BEGIN_TM", alias = "wkday_opert_begin_tm", default)]
    pub weekday_start: String,
    #[serde(rename = "WKDAY_OPERT_END_TM", alias = "wkday_opert_end_tm", default)]
    pub weekday_end: String,
    #[serde(rename = "SAT_OPERT_BEGIN_TM", alias = "sat_opert_begin_tm", default)]
    pub saturday_start: String,
    #[serde(rename = "SAT_OPERT_END_TM", alias = "sat_opert_end_tm", default)]
    pub saturday_end: String,
    #[serde(rename = "HOLIDAY_OPERT_BEGIN_TM", alias = "holiday_opert_begin_tm", default)]
    pub holiday_start: String,
    #[serde(rename = "HOLIDAY_OPERT_END_TM", alias = "holiday_opert_end_tm", default)]
    pub holiday_end: String,
    #[serde(rename = "CHRG_INFO", alias = "chrg_info", default)]
    pub charge_info: String,
    #[serde(
        rename = "PARKNG_BASIS_TM",
        alias = "parkng_basis_tm",
        default,
        deserialize_with = "lenient_i64"
    )]
    pub basic_minutes: i64,
    #[serde(
        rename = "PARKNG_BASIS_USE_CHRG",
        alias = "parkng_basis_use_chrg",
        default,
        deserialize_with = "lenient_i64"
    )]
    pub basic_fee: i64,
    #[serde(
        rename = "ADD_UNIT_TM",
        alias = "add_unit_tm",
        default,
        deserialize_with = "lenient_i64"
    )]
    pub additional_minutes: i64,
    #[serde(
        rename = "ADD_UNIT_TM2_WITHIN_USE_CHRG",
        alias = "add_unit_tm2_within_use_chrg",
        default,
        deserialize_with = "lenient_i64"
    )]
    pub additional_fee: i64,
    #[serde(rename = "SETTLE_METH", alias = "settle_meth", default)]
    pub payment_method: String,
}

impl GyeonggiParkingRow {
    /// Road-name address when present, else the lot-number address
    pub fn effective_address(&self) -> &str {
        if self.road_address.is_empty() {
            &self.lot_address
        } else {
            &self.road_address
        }
    }
}

#[derive(Debug, Deserialize)]
struct GyeonggiFeedResponse {
    #[serde(rename = "ParkingPlace", alias = "Parking")]
    parking_place: Option<ParkingPlace>,
    #[serde(rename = "RESULT")]
    result: Option<FeedResult>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ParkingPlace {
    Sections(Vec<ParkingPlaceSection>),
    Flat(ParkingPlaceRows),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ParkingPlaceSection {
    Rows {
        #[serde(deserialize_with = "single_or_vec")]
        row: Vec<GyeonggiParkingRow>,
    },
    Head {
        #[allow(dead_code)]
        head: Vec<serde_json::Value>,
    },
}

#[derive(Debug, Deserialize)]
struct ParkingPlaceRows {
    #[serde(default, deserialize_with = "single_or_vec")]
    row: Vec<GyeonggiParkingRow>,
}
