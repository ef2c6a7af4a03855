//! MaxMind GeoIP Driver
//!
//! Implements GeoDriver using a local MaxMind GeoLite2/GeoIP2 City database.

use crate::domain::entities::GeoLocation;
use crate::domain::errors::GeoError;
use crate::domain::ports::{require_address, GeoDriver};
use crate::domain::services::Fallback;
use async_trait::async_trait;
use maxminddb::{MaxMindDBError, Reader};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedRecord {
    pub geoname_id: Option<u32>,
    pub iso_code: Option<String>,
    pub names: Option<BTreeMap<String, String>>,
}

impl NamedRecord {
    fn english_name(&self) -> Option<String> {
        self.names.as_ref()?.get("en").cloned()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub time_zone: Option<String>,
    pub accuracy_radius: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostalRecord {
    pub code: Option<String>,
}

/// City record as stored in GeoLite2-City / GeoIP2-City databases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaxMindCity {
    pub city: Option<NamedRecord>,
    pub country: Option<NamedRecord>,
    /// Most significant subdivision first
    pub subdivisions: Option<Vec<NamedRecord>>,
    pub location: Option<LocationRecord>,
    pub postal: Option<PostalRecord>,
}

impl MaxMindCity {
    /// Map a database record to a location record.
    pub fn into_location(self, driver: &str, ip: &str) -> GeoLocation {
        let subdivision = self.subdivisions.as_ref().and_then(|s| s.first());
        let location = self.location.unwrap_or_default();

        GeoLocation {
            driver: driver.to_string(),
            ip: Some(ip.to_string()),
            error: None,
            city: self.city.as_ref().and_then(NamedRecord::english_name),
            country: self.country.as_ref().and_then(NamedRecord::english_name),
            country_code: self.country.as_ref().and_then(|c| c.iso_code.clone()),
            region: subdivision.and_then(NamedRecord::english_name),
            region_code: subdivision.and_then(|s| s.iso_code.clone()),
            timezone: location.time_zone,
            postal_code: self.postal.and_then(|p| p.code),
            latitude: location.latitude,
            longitude: location.longitude,
        }
    }
}

/// MaxMind GeoIP driver.
///
/// The database is read once at construction; lookups are local and
/// never touch the network.
pub struct MaxMindDriver {
    reader: Arc<Reader<Vec<u8>>>,
    fallback: Fallback,
}

impl MaxMindDriver {
    pub const NAME: &'static str = "maxmind";

    /// Load a database from a file path.
    pub fn from_file(path: &str) -> Result<Self, MaxMindDBError> {
        let reader = Reader::open_readfile(path)?;
        Ok(Self {
            reader: Arc::new(reader),
            fallback: Fallback::default(),
        })
    }

    /// Load a database from memory.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, MaxMindDBError> {
        let reader = Reader::from_source(bytes)?;
        Ok(Self {
            reader: Arc::new(reader),
            fallback: Fallback::default(),
        })
    }

    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }
}

fn map_lookup_error(ip: &str, err: MaxMindDBError) -> GeoError {
    match err {
        MaxMindDBError::AddressNotFoundError(_) => GeoError::AddressNotFound(ip.to_string()),
        other => GeoError::Database(other.to_string()),
    }
}

#[async_trait]
impl GeoDriver for MaxMindDriver {
    type Raw = MaxMindCity;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn fallback(&self) -> &Fallback {
        &self.fallback
    }

    async fn get_raw(&self, ip: Option<&str>) -> Result<MaxMindCity, GeoError> {
        let addr = require_address(ip)?;
        self.reader
            .lookup::<MaxMindCity>(addr)
            .map_err(|e| map_lookup_error(&addr.to_string(), e))
    }

    fn locate(&self, ip: &str, raw: MaxMindCity) -> GeoLocation {
        raw.into_location(Self::NAME, ip)
    }
}
