use log::debug;
use reqwest::Client;
use serde::Deserialize;

use super::client::{build_http_client, status_error, ClientConfig};
use super::deserializers::{lenient_f64, lenient_i64, single_or_vec};
use crate::error::{JuchaError, Result};

const BASE_URL: &str = "http://openapi.seoul.go.kr:8088";
const SERVICE: &str = "GetParkingInfo";
const RESULT_OK: &str = "INFO-000";

const PROVIDER: &str = "seoul";

/// Seoul open-data realtime parking feed client.
///
/// The API keys the credential into the URL path:
/// `/{KEY}/json/GetParkingInfo/{start}/{end}`. Application errors come back
/// as a 200 with a `RESULT` object whose `CODE` is not `INFO-000`, either at
/// the top level or nested under the service name.
pub struct SeoulOpenDataClient {
    config: ClientConfig,
    http: Client,
}

impl SeoulOpenDataClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = build_http_client(&config)?;
        Ok(Self { config, http })
    }

    pub fn is_configured(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    /// Fetch one bounded page of realtime parking rows.
    ///
    /// The feed serves at most 1000 rows per request; callers pass
    /// 1-based inclusive indices.
    pub async fn realtime_parking_rows(
        &self,
        start_index: u32,
        end_index: u32,
    ) -> Result<Vec<SeoulParkingRow>> {
        if self.config.api_key.is_empty() {
            return Err(JuchaError::NotConfigured { provider: PROVIDER });
        }

        let base = self.config.base_url_or(BASE_URL);
        let url = format!(
            "{base}/{key}/json/{SERVICE}/{start_index}/{end_index}",
            key = self.config.api_key
        );

        debug!("GET {} /{SERVICE}/{start_index}/{end_index}", PROVIDER);
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(PROVIDER, status));
        }

        let body = response.text().await.map_err(JuchaError::Network)?;
        if body.trim().is_empty() {
            return Err(JuchaError::bad_response(PROVIDER, "empty response body"));
        }

        let raw: SeoulFeedResponse = serde_json::from_str(&body)
            .map_err(|e| JuchaError::bad_response(PROVIDER, format!("invalid JSON: {e}")))?;

        // Credential and quota problems arrive as a bare RESULT object
        if let Some(result) = &raw.result {
            if result.code != RESULT_OK {
                return Err(JuchaError::bad_response(
                    PROVIDER,
                    format!("{}: {}", result.code, result.message),
                ));
            }
        }

        let body = raw
            .parking_info
            .ok_or_else(|| JuchaError::bad_response(PROVIDER, format!("missing {SERVICE} object")))?;

        if let Some(result) = &body.result {
            if result.code != RESULT_OK {
                return Err(JuchaError::bad_response(
                    PROVIDER,
                    format!("{}: {}", result.code, result.message),
                ));
            }
        }

        Ok(body.rows)
    }
}

/// One row of the Seoul realtime feed, provider field names preserved via
/// renames. Occupancy counts parse leniently since the feed interchanges
/// numbers and numeric strings.
#[derive(Debug, Clone, Deserialize)]
pub struct SeoulParkingRow {
    #[serde(rename = "PKLT_NM", default)]
    pub name: String,
    #[serde(rename = "ADDR", default)]
    pub address: String,
    #[serde(rename = "TPKCT", default, deserialize_with = "lenient_f64")]
    pub total_spots: f64,
    #[serde(rename = "NOW_PRK_VHCL_CNT", default, deserialize_with = "lenient_f64")]
    pub current_spots: f64,
    #[serde(rename = "NOW_PRK_VHCL_UPDT_TM", default)]
    pub update_time: String,
    #[serde(rename = "OPER_SE_NM", default)]
    pub operating_type: String,
    #[serde(rename = "PRK_STTS_NM", default)]
    pub status: String,
    #[serde(rename = "WD_OPER_BGNG_TM", default)]
    pub weekday_start: String,
    #[serde(rename = "WD_OPER_END_TM", default)]
    pub weekday_end: String,
    #[serde(rename = "WE_OPER_BGNG_TM", default)]
    pub weekend_start: String,
    #[serde(rename = "WE_OPER_END_TM", default)]
    pub weekend_end: String,
    #[serde(rename = "LHLDY_OPER_BGNG_TM", default)]
    pub holiday_start: String,
    #[serde(rename = "LHLDY_OPER_END_TM", default)]
    pub holiday_end: String,
    #[serde(rename = "PAY_YN_NM", default)]
    pub is_paid: String,
    #[serde(rename = "NGHT_PAY_YN_NM", default)]
    pub night_paid: String,
    #[serde(rename = "BSC_PRK_CRG", default, deserialize_with = "lenient_i64")]
    pub basic_fee: i64,
    #[serde(rename = "BSC_PRK_HR", default, deserialize_with = "lenient_i64")]
    pub basic_minutes: i64,
    #[serde(rename = "ADD_PRK_CRG", default, deserialize_with = "lenient_i64")]
    pub additional_fee: i64,
    #[serde(rename = "ADD_PRK_HR", default, deserialize_with = "lenient_i64")]
    pub additional_minutes: i64,
    #[serde(rename = "DAY_MAX_CRG", default, deserialize_with = "lenient_i64")]
    pub daily_max_fee: i64,
    #[serde(rename = "PRD_AMT", default, deserialize_with = "lenient_i64")]
    pub period_fee: i64,
}

#[derive(Debug, Deserialize)]
struct SeoulFeedResponse {
    #[serde(rename = "GetParkingInfo")]
    parking_info: Option<SeoulFeedBody>,
    #[serde(rename = "RESULT")]
    result: Option<FeedResult>,
}

#[derive(Debug, Deserialize)]
struct SeoulFeedBody {
    #[serde(rename = "list_total_count", default)]
    #[allow(dead_code)]
    total_count: u32,
    #[serde(rename = "RESULT")]
    result: Option<FeedResult>,
    #[serde(rename = "row", default, deserialize_with = "single_or_vec")]
    rows: Vec<SeoulParkingRow>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FeedResult {
    #[serde(rename = "CODE", default)]
    pub code: String,
    #[serde(rename = "MESSAGE", default)]
    pub message: String,
}
