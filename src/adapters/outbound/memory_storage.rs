//! In-Memory Storage
//!
//! Implements StorageHandle using DashMap for lock-free concurrent access.

use crate::domain::errors::StorageError;
use crate::domain::ports::StorageHandle;
use bytes::Bytes;
use dashmap::DashMap;

#[derive(Debug, Clone)]
struct StoredObject {
    mime_type: String,
    bytes: Bytes,
}

/// DashMap-backed content store.
///
/// Always available. Useful for embedded assets and tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    objects: DashMap<String, StoredObject>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            objects: DashMap::new(),
        }
    }

    /// Store an object, replacing any previous one at `path`.
    pub fn put(&self, path: &str, mime_type: &str, bytes: impl Into<Bytes>) {
        self.objects.insert(
            path.to_string(),
            StoredObject {
                mime_type: mime_type.to_string(),
                bytes: bytes.into(),
            },
        );
    }

    pub fn remove(&self, path: &str) -> bool {
        self.objects.remove(path).is_some()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl StorageHandle for MemoryStorage {
    fn exists(&self, path: &str) -> bool {
        self.objects.contains_key(path)
    }

    fn mime_type(&self, path: &str) -> Result<String, StorageError> {
        self.objects
            .get(path)
            .map(|o| o.mime_type.clone())
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }

    fn get(&self, path: &str) -> Result<Bytes, StorageError> {
        self.objects
            .get(path)
            .map(|o| o.bytes.clone())
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }
}
