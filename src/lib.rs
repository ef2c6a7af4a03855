//! geogate Library
//!
//! Pluggable IP geolocation drivers and guarded content delivery, exposed
//! for the service binary, integration tests and library use.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use application::{ContentGate, GeoResolver};
pub use config::{load_config, Config, ConfigError, GeoIpConfig};
pub use domain::entities::{GeoLocation, ServedContent};
pub use domain::errors::{normalize_error, ContentError, GeoError, StorageError};
pub use domain::ports::{GeoDriver, GeoLookup, StorageHandle};
pub use domain::services::Fallback;
pub use domain::value_objects::DriverKind;
