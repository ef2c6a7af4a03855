//! Value Objects - Immutable domain primitives

use serde::{Deserialize, Serialize};

/// Identifier of a geolocation driver.
///
/// Configuration selects exactly one driver by this identifier. The same
/// identifier is stamped on default records by the fallback rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriverKind {
    /// ip-api.com JSON endpoint
    IpApi,
    /// ipwho.is JSON endpoint
    IpWhois,
    /// Local MaxMind GeoLite2/GeoIP2 City database
    MaxMind,
}

impl DriverKind {
    pub const ALL: [DriverKind; 3] = [Self::IpApi, Self::IpWhois, Self::MaxMind];

    /// Parse a driver identifier. Unknown identifiers yield `None`.
    ///
    /// # Examples
    /// ```
    /// use geogate::domain::DriverKind;
    ///
    /// assert_eq!(DriverKind::parse("MaxMind"), Some(DriverKind::MaxMind));
    /// assert_eq!(DriverKind::parse("freegeoip"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ip-api" | "ipapi" => Some(Self::IpApi),
            "ipwhois" | "ipwho.is" => Some(Self::IpWhois),
            "maxmind" => Some(Self::MaxMind),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IpApi => "ip-api",
            Self::IpWhois => "ipwhois",
            Self::MaxMind => "maxmind",
        }
    }

    /// Whether the driver talks to a remote HTTP provider.
    pub fn is_remote(&self) -> bool {
        !matches!(self, Self::MaxMind)
    }
}

impl Default for DriverKind {
    fn default() -> Self {
        Self::IpApi
    }
}

impl std::fmt::Display for DriverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
