//! Storage Handle Port
//!
//! Defines the interface for content stores the content gate reads from.

use crate::domain::errors::StorageError;
use bytes::Bytes;

/// Handle to a content store.
///
/// This is an outbound port. Any key/blob store or filesystem abstraction
/// that can answer existence, MIME type and content queries will do.
pub trait StorageHandle: Send + Sync {
    /// Whether the handle is bound to a usable store.
    fn is_available(&self) -> bool {
        true
    }

    /// Check whether an object exists at `path`.
    fn exists(&self, path: &str) -> bool;

    /// MIME type of the object at `path`.
    fn mime_type(&self, path: &str) -> Result<String, StorageError>;

    /// Raw content of the object at `path`.
    fn get(&self, path: &str) -> Result<Bytes, StorageError>;
}
