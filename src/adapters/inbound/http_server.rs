//! HTTP Server
//!
//! Exposes geolocation lookups and guarded content over HTTP and maps
//! raw-lookup and content-gate failures to status codes.

use crate::application::{ContentGate, GeoResolver};
use crate::domain::errors::{normalize_error, ContentError};
use crate::domain::ports::StorageHandle;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub driver: String,
    pub storage_available: bool,
}

/// Shared handler state.
#[derive(Clone)]
pub struct HttpState {
    pub resolver: GeoResolver,
    /// `None` means no storage was wired in; media requests answer 500
    pub storage: Option<Arc<dyn StorageHandle>>,
}

impl HttpState {
    pub fn new(resolver: GeoResolver, storage: Option<Arc<dyn StorageHandle>>) -> Self {
        Self { resolver, storage }
    }
}

/// Build the router for the given state.
pub fn router(state: HttpState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/geoip/:ip", get(geoip_handler))
        .route("/geoip/:ip/raw", get(geoip_raw_handler))
        .route("/media/*path", get(media_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub struct HttpServer {
    listen_addr: String,
    state: HttpState,
}

impl HttpServer {
    pub fn new(listen_addr: String, state: HttpState) -> Self {
        Self { listen_addr, state }
    }

    /// Serve until `shutdown` completes.
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub async fn run<F>(&self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = router(self.state.clone());

        let listener = TcpListener::bind(&self.listen_addr).await?;
        tracing::info!("HTTP server listening on {}", self.listen_addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

// Handler functions

async fn health_handler(State(state): State<HttpState>) -> impl IntoResponse {
    let storage_available = state
        .storage
        .as_ref()
        .is_some_and(|s| s.is_available());

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        driver: state.resolver.driver_name().to_string(),
        storage_available,
    })
}

async fn geoip_handler(State(state): State<HttpState>, Path(ip): Path<String>) -> impl IntoResponse {
    Json(state.resolver.locate(Some(&ip)).await)
}

async fn geoip_raw_handler(
    State(state): State<HttpState>,
    Path(ip): Path<String>,
) -> impl IntoResponse {
    match state.resolver.raw(Some(&ip)).await {
        Ok(raw) => (StatusCode::OK, Json(raw)),
        Err(e) => {
            tracing::debug!("raw lookup for {} failed: {}", ip, e);
            let status = StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::BAD_GATEWAY);
            (
                status,
                Json(serde_json::json!({
                    "ip": ip,
                    "driver": state.resolver.driver_name(),
                    "error": normalize_error(&e)
                })),
            )
        }
    }
}

async fn media_handler(State(state): State<HttpState>, Path(path): Path<String>) -> Response {
    let storage = state.storage.clone();
    let served = tokio::task::spawn_blocking(move || {
        ContentGate::serve(storage.as_deref(), Some(path.as_str()))
    })
    .await;

    match served {
        Ok(Ok(content)) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, content.mime_type)],
            content.bytes,
        )
            .into_response(),
        Ok(Err(e)) => content_error_response(&e),
        Err(e) => {
            tracing::error!("content gate task failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn content_error_response(err: &ContentError) -> Response {
    if let ContentError::ServerMisconfiguration | ContentError::Unreadable(_) = err {
        tracing::error!("media request failed: {}", err);
    }
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, status.canonical_reason().unwrap_or_default()).into_response()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::domain::errors::StorageError;

    #[test]
    fn test_content_error_response_status() {
        let resp = content_error_response(&ContentError::NotFound);
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = content_error_response(&ContentError::ServerMisconfiguration);
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let resp = content_error_response(&ContentError::Unreadable(StorageError::NotFound(
            "gone.png".into(),
        )));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_health_response_debug() {
        let health = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
            driver: "ip-api".to_string(),
            storage_available: true,
        };
        let debug_str = format!("{:?}", health);
        assert!(debug_str.contains("ip-api"));
    }
}
