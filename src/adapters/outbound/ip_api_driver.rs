//! ip-api.com Driver
//!
//! Implements GeoDriver using the ip-api.com JSON endpoint.

use super::http_client::{build_client, fetch_json, non_empty, trim_base_url};
use crate::config::DEFAULT_GEOIP_TIMEOUT_MS;
use crate::domain::entities::GeoLocation;
use crate::domain::errors::GeoError;
use crate::domain::ports::{require_address, GeoDriver};
use crate::domain::services::Fallback;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const IP_API_DEFAULT_URL: &str = "http://ip-api.com";

/// Response body of `GET /json/{ip}`.
///
/// On failure the provider answers HTTP 200 with `status: "fail"` and a
/// `message` such as `"private range"` or `"invalid query"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IpApiResponse {
    pub status: String,
    pub message: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    /// Region short code (e.g. "CA")
    pub region: Option<String>,
    /// Region display name (e.g. "California")
    pub region_name: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub timezone: Option<String>,
    pub query: Option<String>,
    /// Fields not mapped above, kept so the raw response stays complete
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl IpApiResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// ip-api.com driver.
pub struct IpApiDriver {
    client: reqwest::Client,
    base_url: String,
    fallback: Fallback,
}

impl IpApiDriver {
    pub const NAME: &'static str = "ip-api";

    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: IP_API_DEFAULT_URL.to_string(),
            fallback: Fallback::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = trim_base_url(base_url);
        self
    }

    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    fn url_for(&self, ip: &str) -> String {
        format!("{}/json/{}", self.base_url, ip)
    }
}

impl Default for IpApiDriver {
    fn default() -> Self {
        let client =
            build_client(Duration::from_millis(DEFAULT_GEOIP_TIMEOUT_MS)).unwrap_or_default();
        Self::new(client)
    }
}

#[async_trait]
impl GeoDriver for IpApiDriver {
    type Raw = IpApiResponse;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn fallback(&self) -> &Fallback {
        &self.fallback
    }

    async fn get_raw(&self, ip: Option<&str>) -> Result<IpApiResponse, GeoError> {
        let addr = require_address(ip)?;
        let url = self.url_for(&addr.to_string());
        tracing::debug!("ip-api lookup: {}", url);
        fetch_json(&self.client, &url).await
    }

    fn locate(&self, ip: &str, raw: IpApiResponse) -> GeoLocation {
        if !raw.is_success() {
            return self.fallback.build_with_message(Some(ip), raw.message.as_deref());
        }

        GeoLocation {
            driver: Self::NAME.to_string(),
            ip: Some(ip.to_string()),
            error: None,
            city: non_empty(raw.city),
            country: non_empty(raw.country),
            country_code: non_empty(raw.country_code),
            region: non_empty(raw.region_name),
            region_code: non_empty(raw.region),
            timezone: non_empty(raw.timezone),
            postal_code: non_empty(raw.zip),
            latitude: raw.lat,
            longitude: raw.lon,
        }
    }
}
