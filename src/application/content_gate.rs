//! ContentGate - guarded content delivery
//!
//! Validates a storage handle and a path, then reads MIME type and bytes
//! together. Checks run in order and the first failing one wins:
//!
//! 1. storage handle present and available, else `ServerMisconfiguration`
//! 2. path non-empty and present in storage, else `NotFound`
//! 3. read MIME type and content

use crate::domain::entities::ServedContent;
use crate::domain::errors::ContentError;
use crate::domain::ports::StorageHandle;

pub struct ContentGate;

impl ContentGate {
    /// Serve the object at `path` from `storage`.
    ///
    /// The MIME type is returned exactly as the storage reports it.
    pub fn serve(
        storage: Option<&dyn StorageHandle>,
        path: Option<&str>,
    ) -> Result<ServedContent, ContentError> {
        let storage = match storage {
            Some(s) if s.is_available() => s,
            _ => return Err(ContentError::ServerMisconfiguration),
        };

        let path = match path {
            Some(p) if !p.is_empty() && storage.exists(p) => p,
            _ => return Err(ContentError::NotFound),
        };

        let mime_type = storage.mime_type(path)?;
        let bytes = storage.get(path)?;

        Ok(ServedContent { bytes, mime_type })
    }
}
