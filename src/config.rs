use crate::domain::value_objects::DriverKind;
use serde::Deserialize;
use std::time::Duration;

/// Default timeout for remote geolocation providers.
pub const DEFAULT_GEOIP_TIMEOUT_MS: u64 = 2000;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub storage_root: String,
    pub debug: bool,
    pub geoip: GeoIpConfig,
}

/// Settings consumed when selecting and building the active driver.
#[derive(Debug, Deserialize, Clone)]
pub struct GeoIpConfig {
    /// Active driver id; also stamped on default records
    pub driver: String,
    /// Provider base URL override for remote drivers
    pub api_url: Option<String>,
    /// MaxMind database file, required by the `maxmind` driver
    pub database_path: Option<String>,
    pub timeout_ms: u64,
}

impl GeoIpConfig {
    /// Resolve the configured driver id.
    pub fn driver_kind(&self) -> Result<DriverKind, ConfigError> {
        DriverKind::parse(&self.driver).ok_or_else(|| ConfigError::UnknownDriver(self.driver.clone()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for GeoIpConfig {
    fn default() -> Self {
        Self {
            driver: DriverKind::default().as_str().to_string(),
            api_url: None,
            database_path: None,
            timeout_ms: DEFAULT_GEOIP_TIMEOUT_MS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            storage_root: "storage".to_string(),
            debug: false,
            geoip: GeoIpConfig::default(),
        }
    }
}

/// Configuration errors detected while wiring components.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown geoip driver: {0}")]
    UnknownDriver(String),
    #[error("the maxmind driver requires GEOGATE_GEOIP_DB_PATH")]
    MissingDatabasePath,
    #[error("failed to open geoip database {path}: {reason}")]
    Database { path: String, reason: String },
    #[error("failed to build http client: {0}")]
    HttpClient(String),
}

/// Load configuration from the process environment.
pub fn load_config() -> anyhow::Result<Config> {
    load_config_from(|key| std::env::var(key).ok())
}

/// Load configuration from an arbitrary variable source.
pub fn load_config_from<F>(var: F) -> anyhow::Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = Config::default();

    let listen_addr = var("GEOGATE_LISTEN_ADDR").unwrap_or(defaults.listen_addr);

    let storage_root = var("GEOGATE_STORAGE_ROOT").unwrap_or(defaults.storage_root);

    let debug = var("DEBUG").is_some();

    let driver = var("GEOGATE_GEOIP_DRIVER").unwrap_or(defaults.geoip.driver);

    let api_url = var("GEOGATE_GEOIP_API_URL").filter(|v| !v.trim().is_empty());

    let database_path = var("GEOGATE_GEOIP_DB_PATH").filter(|v| !v.trim().is_empty());

    let timeout_ms = var("GEOGATE_GEOIP_TIMEOUT_MS")
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_GEOIP_TIMEOUT_MS);

    Ok(Config {
        listen_addr,
        storage_root,
        debug,
        geoip: GeoIpConfig {
            driver,
            api_url,
            database_path,
            timeout_ms,
        },
    })
}
