//! Railway open-data station API client.

use serde::{Deserialize, Serialize};

use super::error::CatalogError;

/// Default base URL for the railway open-data service (KRIC).
const DEFAULT_BASE_URL: &str = "https://openapi.kric.go.kr";

/// Wrapper for the station info response.
#[derive(Debug, Deserialize)]
pub struct StationsResponse {
    pub body: Vec<StationDto>,
}

/// Raw station record as delivered by the feed.
///
/// One record per station per line; positions arrive as projected grid
/// coordinate strings. `lat`/`lng` are only present in records we wrote
/// ourselves (disk cache, bundled snapshot) where the conversion has
/// already been resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationDto {
    /// Station name.
    #[serde(rename = "stinNm")]
    pub name: String,

    /// Line name, e.g. "2호선".
    #[serde(rename = "lnNm")]
    pub line: String,

    /// Lot or road address, when the feed has one.
    #[serde(rename = "roadNmAdr", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Projected easting, as a string.
    #[serde(rename = "stinLocX", default, skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,

    /// Projected northing, as a string.
    #[serde(rename = "stinLocY", default, skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,

    /// Pre-resolved WGS84 latitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,

    /// Pre-resolved WGS84 longitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

/// Configuration for the station API client.
#[derive(Debug, Clone)]
pub struct KricClientConfig {
    /// API key, passed as the `serviceKey` query parameter.
    pub api_key: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl KricClientConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// Client for the railway open-data station API.
#[derive(Debug, Clone)]
pub struct KricClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl KricClient {
    /// Create a new station API client.
    pub fn new(config: KricClientConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key,
            base_url: config.base_url,
        })
    }

    /// Fetch all station records from the API.
    pub async fn fetch_all(&self) -> Result<Vec<StationDto>, CatalogError> {
        let url = format!("{}/openapi/convenientInfo/stationInfo", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("serviceKey", self.api_key.as_str()), ("format", "json")])
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(CatalogError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let response: StationsResponse =
            serde_json::from_str(&body).map_err(|e| CatalogError::Json {
                message: e.to_string(),
            })?;

        Ok(response.body)
    }
}
