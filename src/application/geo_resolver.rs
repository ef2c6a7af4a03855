//! GeoResolver - geolocation use case
//!
//! Holds the single active driver and answers lookups through it.

use crate::domain::entities::GeoLocation;
use crate::domain::errors::GeoError;
use crate::domain::ports::GeoLookup;
use std::sync::Arc;

/// Geolocation service.
///
/// The driver is chosen once when the resolver is built and never swapped,
/// so every request handled by one resolver sees the same driver.
#[derive(Clone)]
pub struct GeoResolver {
    driver: Arc<dyn GeoLookup>,
}

impl GeoResolver {
    pub fn new(driver: Arc<dyn GeoLookup>) -> Self {
        Self { driver }
    }

    /// Resolve an address. Never fails; see [`GeoLocation::error`].
    pub async fn locate(&self, ip: Option<&str>) -> GeoLocation {
        self.driver.lookup(ip).await
    }

    /// Raw provider response for an address.
    pub async fn raw(&self, ip: Option<&str>) -> Result<serde_json::Value, GeoError> {
        self.driver.lookup_raw(ip).await
    }

    pub fn driver_name(&self) -> &'static str {
        self.driver.driver_name()
    }
}
