//! Domain Entities - Core value records
//!
//! These records are produced per call and never persisted here.
//! They have no dependencies on providers or transports.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Location data resolved from an IP address.
///
/// A record is either a best-effort result from a provider or a default
/// record built by [`Fallback`](crate::domain::Fallback). `error` and the
/// geographic fields are not mutually exclusive: a provider may populate
/// some fields and still report an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoLocation {
    /// Driver that produced the record (the default driver id on fallback)
    pub driver: String,
    /// The queried address, echoed back
    pub ip: Option<String>,
    /// Normalized failure description, `None` on success or empty input
    pub error: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    /// ISO 3166-1 alpha-2 country code
    pub country_code: Option<String>,
    pub region: Option<String>,
    pub region_code: Option<String>,
    /// IANA time zone name
    pub timezone: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl GeoLocation {
    /// Build a record with every geographic field empty.
    pub fn empty(driver: impl Into<String>, ip: Option<&str>, error: Option<String>) -> Self {
        Self {
            driver: driver.into(),
            ip: ip.map(str::to_string),
            error,
            city: None,
            country: None,
            country_code: None,
            region: None,
            region_code: None,
            timezone: None,
            postal_code: None,
            latitude: None,
            longitude: None,
        }
    }

    /// True when no geographic field carries data.
    pub fn is_default(&self) -> bool {
        self.city.is_none()
            && self.country.is_none()
            && self.country_code.is_none()
            && self.region.is_none()
            && self.region_code.is_none()
            && self.timezone.is_none()
            && self.postal_code.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
    }

    /// True when the provider returned data without reporting an error.
    pub fn is_success(&self) -> bool {
        self.error.is_none() && !self.is_default()
    }
}

/// Content returned by the content gate.
///
/// Both parts are read together; a caller never sees one without the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServedContent {
    pub bytes: Bytes,
    /// MIME type exactly as reported by the storage
    pub mime_type: String,
}
