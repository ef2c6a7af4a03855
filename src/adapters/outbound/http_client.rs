//! Shared HTTP plumbing for remote geolocation drivers.

use crate::domain::errors::GeoError;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Build the client shared by remote drivers.
///
/// Every request is bounded by `timeout`; there are no retries.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .user_agent(concat!("geogate/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// GET `url` and decode the JSON body.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, GeoError> {
    let response = client.get(url).send().await.map_err(classify)?;

    let status = response.status();
    if !status.is_success() {
        return Err(GeoError::Status(status.as_u16()));
    }

    response.json::<T>().await.map_err(classify)
}

fn classify(err: reqwest::Error) -> GeoError {
    if err.is_timeout() {
        GeoError::Timeout
    } else if err.is_decode() {
        GeoError::Decode(err.to_string())
    } else if let Some(status) = err.status() {
        GeoError::Status(status.as_u16())
    } else {
        GeoError::Transport(err.to_string())
    }
}

/// Treat blank provider strings as absent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Strip trailing slashes so paths can be appended with `format!`.
pub(crate) fn trim_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
