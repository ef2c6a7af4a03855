//! Adapters
//!
//! Inbound adapters drive the application (HTTP); outbound adapters
//! implement the domain ports (geolocation drivers, storages).

pub mod inbound;
pub mod outbound;
