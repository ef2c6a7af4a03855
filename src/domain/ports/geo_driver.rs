//! GeoIP Driver Port
//!
//! Defines the capability every geolocation provider implements.

use crate::domain::entities::GeoLocation;
use crate::domain::errors::GeoError;
use crate::domain::services::Fallback;
use async_trait::async_trait;
use serde::Serialize;
use std::net::IpAddr;

/// Geolocation provider driver.
///
/// This is an outbound port. Implementations may call a remote API or read
/// a local database. `get` never fails: every failure ends up in the
/// `error` field of a default record built by the driver's [`Fallback`].
#[async_trait]
pub trait GeoDriver: Send + Sync {
    /// Provider-native response.
    type Raw: Send + 'static;

    /// Driver identifier stamped on successful records.
    fn name(&self) -> &'static str;

    /// Default-result builder injected at construction.
    fn fallback(&self) -> &Fallback;

    /// Fetch the unprocessed provider response.
    ///
    /// This is the only path that exposes provider errors to the caller.
    async fn get_raw(&self, ip: Option<&str>) -> Result<Self::Raw, GeoError>;

    /// Map a provider response to a location record.
    ///
    /// Pure and deterministic; `get` uses it for every successful fetch.
    fn locate(&self, ip: &str, raw: Self::Raw) -> GeoLocation;

    /// Resolve an address to a location record.
    ///
    /// Missing or unparsable input skips the provider and yields a default
    /// record with no error.
    async fn get(&self, ip: Option<&str>) -> GeoLocation {
        let Some(input) = ip else {
            return self.fallback().build(None, None);
        };
        let Some(addr) = parse_address(input) else {
            tracing::debug!(driver = self.name(), input, "unusable address, returning default location");
            return self.fallback().build(Some(input), None);
        };

        let canonical = addr.to_string();
        match self.get_raw(Some(&canonical)).await {
            Ok(raw) => self.locate(input, raw),
            Err(e) => {
                tracing::warn!(driver = self.name(), ip = %addr, error = %e, "geoip lookup failed");
                self.fallback().build(Some(input), Some(&e))
            }
        }
    }
}

/// Object-safe view of a [`GeoDriver`] for runtime selection.
///
/// Blanket-implemented for every driver whose raw response is serializable,
/// so the active driver can live behind `Arc<dyn GeoLookup>`.
#[async_trait]
pub trait GeoLookup: Send + Sync {
    fn driver_name(&self) -> &'static str;

    async fn lookup(&self, ip: Option<&str>) -> GeoLocation;

    /// Raw provider response as JSON.
    async fn lookup_raw(&self, ip: Option<&str>) -> Result<serde_json::Value, GeoError>;
}

#[async_trait]
impl<D> GeoLookup for D
where
    D: GeoDriver,
    D::Raw: Serialize,
{
    fn driver_name(&self) -> &'static str {
        self.name()
    }

    async fn lookup(&self, ip: Option<&str>) -> GeoLocation {
        self.get(ip).await
    }

    async fn lookup_raw(&self, ip: Option<&str>) -> Result<serde_json::Value, GeoError> {
        let raw = self.get_raw(ip).await?;
        serde_json::to_value(raw).map_err(|e| GeoError::Decode(e.to_string()))
    }
}

/// Parse a user-supplied address. Blank or malformed input yields `None`.
pub fn parse_address(input: &str) -> Option<IpAddr> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

/// Like [`parse_address`] but reports why the input was rejected.
pub fn require_address(ip: Option<&str>) -> Result<IpAddr, GeoError> {
    match ip {
        None => Err(GeoError::MissingAddress),
        Some(s) if s.trim().is_empty() => Err(GeoError::MissingAddress),
        Some(s) => parse_address(s).ok_or_else(|| GeoError::InvalidAddress(s.to_string())),
    }
}
