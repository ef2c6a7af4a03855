//! Driver Registry
//!
//! Builds the active geolocation driver from configuration.

use super::http_client::build_client;
use super::{IpApiDriver, IpWhoisDriver, MaxMindDriver};
use crate::config::{ConfigError, GeoIpConfig};
use crate::domain::ports::GeoLookup;
use crate::domain::services::Fallback;
use crate::domain::value_objects::DriverKind;
use std::sync::Arc;

/// Build the driver named by `cfg.driver`.
///
/// Called once at startup; the returned driver stays active for the
/// lifetime of the process. Its fallback carries the same identifier.
pub fn build_geo_driver(cfg: &GeoIpConfig) -> Result<Arc<dyn GeoLookup>, ConfigError> {
    let kind = cfg.driver_kind()?;
    let fallback = Fallback::new(kind.as_str());

    if !kind.is_remote() && cfg.api_url.is_some() {
        tracing::warn!("GEOGATE_GEOIP_API_URL is ignored by the {} driver", kind);
    }

    let driver: Arc<dyn GeoLookup> = match kind {
        DriverKind::IpApi => {
            let client = remote_client(cfg)?;
            let mut driver = IpApiDriver::new(client).with_fallback(fallback);
            if let Some(url) = &cfg.api_url {
                driver = driver.with_base_url(url);
            }
            Arc::new(driver)
        }
        DriverKind::IpWhois => {
            let client = remote_client(cfg)?;
            let mut driver = IpWhoisDriver::new(client).with_fallback(fallback);
            if let Some(url) = &cfg.api_url {
                driver = driver.with_base_url(url);
            }
            Arc::new(driver)
        }
        DriverKind::MaxMind => {
            let path = cfg
                .database_path
                .as_deref()
                .ok_or(ConfigError::MissingDatabasePath)?;
            let driver = MaxMindDriver::from_file(path).map_err(|e| ConfigError::Database {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
            tracing::info!("GeoIP DB loaded from {}", path);
            Arc::new(driver.with_fallback(fallback))
        }
    };

    if kind.is_remote() {
        tracing::info!(
            "geoip driver selected: {} (timeout {:?})",
            driver.driver_name(),
            cfg.timeout()
        );
    } else {
        tracing::info!("geoip driver selected: {}", driver.driver_name());
    }
    Ok(driver)
}

fn remote_client(cfg: &GeoIpConfig) -> Result<reqwest::Client, ConfigError> {
    build_client(cfg.timeout()).map_err(|e| ConfigError::HttpClient(e.to_string()))
}
