//! Domain Errors
//!
//! Failure taxonomy for both components. Provider failures never leave
//! `GeoDriver::get`; content failures are terminal for the request.

/// Failure talking to a geolocation provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeoError {
    #[error("no address supplied")]
    MissingAddress,
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    #[error("provider request timed out")]
    Timeout,
    #[error("provider request failed: {0}")]
    Transport(String),
    #[error("provider returned HTTP {0}")]
    Status(u16),
    #[error("malformed provider response: {0}")]
    Decode(String),
    #[error("address {0} not found in database")]
    AddressNotFound(String),
    #[error("database lookup failed: {0}")]
    Database(String),
}

impl GeoError {
    /// HTTP status class for a raw lookup that failed with this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingAddress | Self::InvalidAddress(_) => 400,
            Self::AddressNotFound(_) => 404,
            Self::Database(_) => 500,
            Self::Timeout => 504,
            Self::Transport(_) | Self::Status(_) | Self::Decode(_) => 502,
        }
    }
}

/// Default error formatter for the fallback rule.
///
/// Maps every cause to a short string that does not depend on URLs,
/// OS error text or the queried address.
pub fn normalize_error(err: &GeoError) -> String {
    match err {
        GeoError::MissingAddress => "missing address".to_string(),
        GeoError::InvalidAddress(_) => "invalid address".to_string(),
        GeoError::Timeout => "connection timed out".to_string(),
        GeoError::Transport(_) => "connection failed".to_string(),
        GeoError::Status(code) => format!("http status {}", code),
        GeoError::Decode(_) => "malformed provider response".to_string(),
        GeoError::AddressNotFound(_) => "address not found".to_string(),
        GeoError::Database(_) => "database lookup failed".to_string(),
    }
}

/// Error reported by a storage handle.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Terminal failure of the content gate.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// No usable storage handle was wired in.
    #[error("storage handle is not configured")]
    ServerMisconfiguration,
    /// Empty path or absent object.
    #[error("content not found")]
    NotFound,
    /// The object passed the existence check but could not be read.
    #[error("content could not be read: {0}")]
    Unreadable(#[from] StorageError),
}

impl ContentError {
    /// HTTP status class the caller should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ServerMisconfiguration => 500,
            Self::NotFound => 404,
            Self::Unreadable(_) => 500,
        }
    }
}
