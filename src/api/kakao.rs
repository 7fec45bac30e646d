use log::debug;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::client::{build_http_client, status_error, ClientConfig};
use super::deserializers::lenient_opt_f64;
use super::types::{Coordinate, FacilityCandidate, PlaceSearchRequest};
use crate::error::{JuchaError, Result};

const BASE_URL: &str = "https://dapi.kakao.com";
const ADDRESS_ENDPOINT: &str = "/v2/local/search/address.json";
const KEYWORD_ENDPOINT: &str = "/v2/local/search/keyword.json";

const PROVIDER: &str = "kakao";

/// Kakao Local API client: address geocoding and keyword place search.
///
/// Auth is a `KakaoAK` header; the provider signals application errors as a
/// JSON body with an `errorType` field, usually alongside a 4xx status.
pub struct KakaoLocalClient {
    config: ClientConfig,
    http: Client,
}

impl KakaoLocalClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = build_http_client(&config)?;
        Ok(Self { config, http })
    }

    pub fn is_configured(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    fn endpoint_url(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Url> {
        let base = self.config.base_url_or(BASE_URL);
        Url::parse_with_params(&format!("{base}{endpoint}"), params)
            .map_err(|e| JuchaError::bad_response(PROVIDER, e.to_string()))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T> {
        if self.config.api_key.is_empty() {
            return Err(JuchaError::NotConfigured { provider: PROVIDER });
        }

        debug!("GET {} {}", PROVIDER, url.path());
        let response = self
            .http
            .get(url)
            .header("Authorization", format!("KakaoAK {}", self.config.api_key))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(PROVIDER, status));
        }

        let body = response.text().await.map_err(JuchaError::Network)?;
        if body.trim().is_empty() {
            return Err(JuchaError::bad_response(PROVIDER, "empty response body"));
        }

        // Application errors can ride on a 200 body
        if let Ok(err) = serde_json::from_str::<KakaoErrorBody>(&body) {
            if let Some(error_type) = err.error_type {
                return Err(JuchaError::bad_response(
                    PROVIDER,
                    format!("{error_type}: {}", err.message.unwrap_or_default()),
                ));
            }
        }

        serde_json::from_str(&body)
            .map_err(|e| JuchaError::bad_response(PROVIDER, format!("invalid JSON: {e}")))
    }

    /// Geocode a free-text address. `Ok(None)` means the provider answered
    /// but found nothing.
    pub async fn address_to_coordinate(&self, address: &str) -> Result<Option<Coordinate>> {
        let url = self.endpoint_url(ADDRESS_ENDPOINT, &[("query", address.to_string())])?;
        let raw: KakaoDocumentList<GeocodeDocument> = self.get_json(url).await?;

        Ok(raw.documents.into_iter().next().and_then(|doc| {
            match (doc.latitude, doc.longitude) {
                (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
                _ => None,
            }
        }))
    }

    /// Keyword place search, optionally centered and radius-bounded
    pub async fn search_places(
        &self,
        request: &PlaceSearchRequest,
    ) -> Result<Vec<FacilityCandidate>> {
        let mut params = vec![
            ("query", request.query.clone()),
            ("page", request.page.to_string()),
            ("size", request.size.to_string()),
        ];
        if let Some(code) = &request.category_group_code {
            params.push(("category_group_code", code.clone()));
        }
        if let Some(center) = request.center {
            params.push(("x", center.longitude.to_string()));
            params.push(("y", center.latitude.to_string()));
        }
        if let Some(radius) = request.radius {
            params.push(("radius", radius.to_string()));
        }

        let url = self.endpoint_url(KEYWORD_ENDPOINT, &params)?;
        let raw: KakaoDocumentList<PlaceDocument> = self.get_json(url).await?;

        Ok(raw.documents.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Deserialize)]
struct KakaoErrorBody {
    #[serde(rename = "errorType")]
    error_type: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct KakaoDocumentList<T> {
    #[serde(default)]
    documents: Vec<T>,
}

#[derive(Debug, Default, Deserialize)]
struct GeocodeDocument {
    #[serde(rename = "y", default, deserialize_with = "lenient_opt_f64")]
    latitude: Option<f64>,
    #[serde(rename = "x", default, deserialize_with = "lenient_opt_f64")]
    longitude: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct PlaceDocument {
    #[serde(default)]
    place_name: String,
    #[serde(default)]
    address_name: String,
    #[serde(default)]
    road_address_name: String,
    #[serde(default)]
    distance: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    category_name: String,
    #[serde(rename = "y", default, deserialize_with = "lenient_opt_f64")]
    latitude: Option<f64>,
    #[serde(rename = "x", default, deserialize_with = "lenient_opt_f64")]
    longitude: Option<f64>,
    #[serde(default)]
    place_url: String,
}

impl From<PlaceDocument> for FacilityCandidate {
    fn from(doc: PlaceDocument) -> Self {
        Self {
            name: doc.place_name,
            address: doc.address_name,
            road_address: doc.road_address_name,
            distance: doc.distance,
            phone: doc.phone,
            category: doc.category_name,
            latitude: doc.latitude,
            longitude: doc.longitude,
            place_url: doc.place_url,
        }
    }
}
