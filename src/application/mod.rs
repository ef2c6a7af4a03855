//! Application Layer
//!
//! Use cases built on top of the domain ports.

mod content_gate;
mod geo_resolver;

pub use content_gate::ContentGate;
pub use geo_resolver::GeoResolver;
