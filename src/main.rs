//! geogate - GeoIP lookups and guarded media delivery
//!
//! This is the composition root that wires together all the components.

use geogate::adapters::inbound::{HttpServer, HttpState};
use geogate::adapters::outbound::{build_geo_driver, LocalDiskStorage};
use geogate::application::GeoResolver;
use geogate::config::load_config;
use geogate::domain::ports::StorageHandle;
use geogate::infrastructure::{shutdown_signal, ShutdownController};
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(FmtSpan::CLOSE)
        .init();

    tracing::info!(
        "starting geogate listen={} driver={} storage={}",
        cfg.listen_addr,
        cfg.geoip.driver,
        cfg.storage_root
    );

    // ===== COMPOSITION ROOT =====

    // 1. Outbound adapters
    let driver = build_geo_driver(&cfg.geoip)?;

    let storage = LocalDiskStorage::new(&cfg.storage_root);
    if !storage.is_available() {
        tracing::warn!(
            "storage root {} is not a directory, media requests will fail",
            storage.root().display()
        );
    } else {
        tracing::info!("serving media from {}", storage.root().display());
    }
    let storage: Arc<dyn StorageHandle> = Arc::new(storage);

    // 2. Application service
    let resolver = GeoResolver::new(driver);

    // 3. Inbound adapter
    let shutdown = ShutdownController::new();
    tokio::spawn(shutdown_signal(shutdown.clone()));

    let server = HttpServer::new(cfg.listen_addr.clone(), HttpState::new(resolver, Some(storage)));
    server.run(async move { shutdown.wait().await }).await?;

    tracing::info!("geogate stopped");
    Ok(())
}
