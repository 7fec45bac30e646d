use log::debug;
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::Client;
use url::Url;

use super::client::{build_http_client, status_error, ClientConfig};
use crate::error::{JuchaError, Result};

const BASE_URL: &str = "http://apis.data.go.kr";
const ENDPOINT: &str = "/B552895/ParkingInfoService/getParkingInfo";
const RESULT_OK: &str = "00";

const PROVIDER: &str = "molit";

/// National parking registry client (public-data portal).
///
/// The portal answers XML: a `resultCode`/`resultMsg` header followed by
/// `item` elements carrying static facility attributes. Used for the
/// `registry` CLI command only; the realtime tools never consult it.
pub struct ParkingRegistryClient {
    config: ClientConfig,
    http: Client,
}

/// One `item` element of the registry listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistryItem {
    pub lot_number: String,
    pub name: String,
    pub kind: String,
    pub road_address: String,
    pub lot_address: String,
    pub capacity: Option<u32>,
    pub charge_info: String,
    pub phone: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl ParkingRegistryClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = build_http_client(&config)?;
        Ok(Self { config, http })
    }

    pub fn is_configured(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    /// Fetch one page of the national registry
    pub async fn parking_lot_list(&self, page: u32, rows: u32) -> Result<Vec<RegistryItem>> {
        if self.config.api_key.is_empty() {
            return Err(JuchaError::NotConfigured { provider: PROVIDER });
        }

        let base = self.config.base_url_or(BASE_URL);
        let url = Url::parse_with_params(
            &format!("{base}{ENDPOINT}"),
            &[
                ("serviceKey", self.config.api_key.clone()),
                ("pageNo", page.to_string()),
                ("numOfRows", rows.to_string()),
            ],
        )
        .map_err(|e| JuchaError::bad_response(PROVIDER, e.to_string()))?;

        debug!("GET {} {ENDPOINT} page={page} rows={rows}", PROVIDER);
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(PROVIDER, status));
        }

        let body = response.text().await.map_err(JuchaError::Network)?;
        if body.trim().is_empty() {
            return Err(JuchaError::bad_response(PROVIDER, "empty response body"));
        }

        parse_registry_xml(&body)
    }
}

/// Parse the registry XML body into items, honoring the result header.
pub(crate) fn parse_registry_xml(xml: &str) -> Result<Vec<RegistryItem>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut current: Option<RegistryItem> = None;
    let mut current_tag = String::new();
    let mut result_code = String::new();
    let mut result_msg = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name_buf = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_buf).unwrap_or("").to_string();
                if name == "item" {
                    current = Some(RegistryItem::default());
                }
                current_tag = name;
            }
            Ok(Event::End(e)) => {
                let name_buf = e.name().as_ref().to_vec();
                if name_buf.as_slice() == b"item" {
                    if let Some(item) = current.take() {
                        items.push(item);
                    }
                }
                current_tag.clear();
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().unwrap_or_default().into_owned();
                match current.as_mut() {
                    Some(item) => match current_tag.as_str() {
                        "prkplceNo" => item.lot_number = text,
                        "prkplceNm" => item.name = text,
                        "prkplceSe" => item.kind = text,
                        "rdnmadr" => item.road_address = text,
                        "lnmadr" => item.lot_address = text,
                        "prkcmprt" => item.capacity = text.trim().parse().ok(),
                        "parkingchrgeInfo" => item.charge_info = text,
                        "phoneNumber" => item.phone = text,
                        "latitude" => item.latitude = text.trim().parse().ok(),
                        "longitude" => item.longitude = text.trim().parse().ok(),
                        _ => {}
                    },
                    None => match current_tag.as_str() {
                        "resultCode" => result_code = text,
                        "resultMsg" => result_msg = text,
                        _ => {}
                    },
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(JuchaError::bad_response(
                    PROVIDER,
                    format!("invalid XML: {e}"),
                ))
            }
            _ => {}
        }
    }

    if !result_code.is_empty() && result_code != RESULT_OK {
        return Err(JuchaError::bad_response(
            PROVIDER,
            format!("{result_code}: {result_msg}"),
        ));
    }

    Ok(items)
}
