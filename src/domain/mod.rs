//! Domain Layer
//!
//! Value objects, errors and ports. Nothing in here knows about HTTP,
//! provider wire formats or the filesystem.

pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{GeoLocation, ServedContent};
pub use errors::{normalize_error, ContentError, GeoError, StorageError};
pub use services::Fallback;
pub use value_objects::DriverKind;
