//! Fallback - default-result rule shared by every driver
//!
//! When a driver cannot produce a location it returns a record stamped with
//! the configured default driver id, the echoed address, a formatted error
//! and no geographic data.

use crate::domain::entities::GeoLocation;
use crate::domain::errors::{normalize_error, GeoError};
use crate::domain::value_objects::DriverKind;

/// Turns a provider failure into the `error` string of a default record.
pub type ErrorFormatter = fn(&GeoError) -> String;

/// Builder for default records.
///
/// Injected into each driver at construction so the default driver id comes
/// from configuration rather than from global state.
#[derive(Debug, Clone)]
pub struct Fallback {
    default_driver: String,
    formatter: ErrorFormatter,
}

impl Fallback {
    pub fn new(default_driver: impl Into<String>) -> Self {
        Self {
            default_driver: default_driver.into(),
            formatter: normalize_error,
        }
    }

    /// Replace the error formatter.
    pub fn with_formatter(mut self, formatter: ErrorFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Build a default record for a failed or skipped lookup.
    ///
    /// `error` is `None` when nothing went wrong but there is no data,
    /// e.g. an empty or unparsable address.
    pub fn build(&self, ip: Option<&str>, error: Option<&GeoError>) -> GeoLocation {
        let error = error.map(|e| (self.formatter)(e));
        GeoLocation::empty(self.default_driver.as_str(), ip, error)
    }

    /// Build a default record for an error reported inside a provider payload.
    pub fn build_with_message(&self, ip: Option<&str>, message: Option<&str>) -> GeoLocation {
        let error = message
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string);
        GeoLocation::empty(self.default_driver.as_str(), ip, error)
    }
}

impl Default for Fallback {
    fn default() -> Self {
        Self::new(DriverKind::default().as_str())
    }
}
