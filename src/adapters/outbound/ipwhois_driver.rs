//! ipwho.is Driver
//!
//! Implements GeoDriver using the ipwho.is JSON endpoint.

use super::http_client::{build_client, fetch_json, non_empty, trim_base_url};
use crate::config::DEFAULT_GEOIP_TIMEOUT_MS;
use crate::domain::entities::GeoLocation;
use crate::domain::errors::GeoError;
use crate::domain::ports::{require_address, GeoDriver};
use crate::domain::services::Fallback;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const IPWHOIS_DEFAULT_URL: &str = "https://ipwho.is";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpWhoisTimezone {
    pub id: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Response body of `GET /{ip}`.
///
/// Failures come back as HTTP 200 with `success: false` and a `message`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpWhoisResponse {
    pub ip: Option<String>,
    pub success: bool,
    pub message: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub region: Option<String>,
    pub region_code: Option<String>,
    pub city: Option<String>,
    pub postal: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timezone: Option<IpWhoisTimezone>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// ipwho.is driver.
pub struct IpWhoisDriver {
    client: reqwest::Client,
    base_url: String,
    fallback: Fallback,
}

impl IpWhoisDriver {
    pub const NAME: &'static str = "ipwhois";

    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: IPWHOIS_DEFAULT_URL.to_string(),
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
}

impl Default for IpWhoisDriver {
    fn default() -> Self {
        let client =
            build_client(Duration::from_millis(DEFAULT_GEOIP_TIMEOUT_MS)).unwrap_or_default();
        Self::new(client)
    }
}

#[async_trait]
impl GeoDriver for IpWhoisDriver {
    type Raw = IpWhoisResponse;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn fallback(&self) -> &Fallback {
        &self.fallback
    }

    async fn get_raw(&self, ip: Option<&str>) -> Result<IpWhoisResponse, GeoError> {
        let addr = require_address(ip)?;
        let url = format!("{}/{}", self.base_url, addr);
        tracing::debug!("ipwhois lookup: {}", url);
        fetch_json(&self.client, &url).await
    }

    fn locate(&self, ip: &str, raw: IpWhoisResponse) -> GeoLocation {
        if !raw.success {
            return self.fallback.build_with_message(Some(ip), raw.message.as_deref());
        }

        GeoLocation {
            driver: Self::NAME.to_string(),
            ip: Some(ip.to_string()),
            error: None,
            city: non_empty(raw.city),
            country: non_empty(raw.country),
            country_code: non_empty(raw.country_code),
            region: non_empty(raw.region),
            region_code: non_empty(raw.region_code),
            timezone: non_empty(raw.timezone.and_then(|tz| tz.id)),
            postal_code: non_empty(raw.postal),
            latitude: raw.latitude,
            longitude: raw.longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_maps_fields() {
        let raw: IpWhoisResponse = serde_json::from_value(serde_json::json!({
            "ip": "1.1.1.1",
            "success": true,
            "type": "IPv4",
            "country": "Australia",
            "country_code": "AU",
            "region": "Queensland",
            "region_code": "QLD",
            "city": "South Brisbane",
            "latitude": -27.4766,
            "longitude": 153.0166,
            "postal": "4101",
            "timezone": { "id": "Australia/Brisbane", "abbr": "AEST", "offset": 36000 }
        }))
        .unwrap();

        let loc = IpWhoisDriver::default().locate("1.1.1.1", raw);

        assert_eq!(loc.driver, "ipwhois");
        assert!(loc.error.is_none());
        assert_eq!(loc.city.as_deref(), Some("South Brisbane"));
        assert_eq!(loc.country_code.as_deref(), Some("AU"));
        assert_eq!(loc.region.as_deref(), Some("Queensland"));
        assert_eq!(loc.region_code.as_deref(), Some("QLD"));
        assert_eq!(loc.timezone.as_deref(), Some("Australia/Brisbane"));
        assert_eq!(loc.postal_code.as_deref(), Some("4101"));
        assert_eq!(loc.latitude, Some(-27.4766));
    }

    #[test]
    fn test_raw_keeps_unmapped_fields() {
        let raw: IpWhoisResponse = serde_json::from_value(serde_json::json!({
            "success": true,
            "type": "IPv4",
            "timezone": { "id": "UTC", "abbr": "UTC" }
        }))
        .unwrap();

        let json = serde_json::to_value(&raw).unwrap();
        assert_eq!(json["type"], "IPv4");
        assert_eq!(json["timezone"]["abbr"], "UTC");
    }

    #[test]
    fn test_locate_failure_uses_fallback() {
        let raw: IpWhoisResponse = serde_json::from_value(serde_json::json!({
            "ip": "10.0.0.1",
            "success": false,
            "message": "Reserved range"
        }))
        .unwrap();

        let driver = IpWhoisDriver::default().with_fallback(Fallback::new("ipwhois"));
        let loc = driver.locate("10.0.0.1", raw);

        assert_eq!(loc.driver, "ipwhois");
        assert_eq!(loc.error.as_deref(), Some("Reserved range"));
        assert!(loc.is_default());
    }

    #[test]
    fn test_missing_success_flag_is_failure() {
        let raw: IpWhoisResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        let loc = IpWhoisDriver::default().locate("8.8.8.8", raw);

        assert!(loc.is_default());
        assert!(loc.error.is_none());
    }
}
