//! Local Disk Storage
//!
//! Implements StorageHandle over a directory on the local filesystem.

use crate::domain::errors::StorageError;
use crate::domain::ports::StorageHandle;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};

/// Directory-backed content store.
///
/// Object paths are relative to `root`. Paths that would escape the root,
/// lexically or through a symlink, are reported as absent.
#[derive(Debug, Clone)]
pub struct LocalDiskStorage {
    root: PathBuf,
}

impl LocalDiskStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Join `path` onto the root, rejecting anything but plain segments.
    ///
    /// The result is canonical and lies under the canonical root, so a
    /// symlink pointing outside the root resolves to `None`.
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path);
        let mut resolved = self.root.clone();
        let mut segments = 0;

        for component in relative.components() {
            match component {
                Component::Normal(segment) => {
                    resolved.push(segment);
                    segments += 1;
                }
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
            }
        }

        if segments == 0 {
            return None;
        }

        let root = self.root.canonicalize().ok()?;
        let resolved = resolved.canonicalize().ok()?;
        if !resolved.starts_with(&root) {
            tracing::debug!("rejecting {}: resolves outside storage root", path);
            return None;
        }
        Some(resolved)
    }

    fn resolve_existing(&self, path: &str) -> Result<PathBuf, StorageError> {
        self.resolve(path)
            .filter(|p| p.is_file())
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }
}

impl StorageHandle for LocalDiskStorage {
    fn is_available(&self) -> bool {
        self.root.is_dir()
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_some_and(|p| p.is_file())
    }

    fn mime_type(&self, path: &str) -> Result<String, StorageError> {
        let resolved = self.resolve_existing(path)?;
        Ok(mime_from_extension(&resolved).to_string())
    }

    fn get(&self, path: &str) -> Result<Bytes, StorageError> {
        let resolved = self.resolve_existing(path)?;
        match std::fs::read(&resolved) {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// MIME type from the file extension.
pub fn mime_from_extension(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("bmp") => "image/bmp",
        Some("avif") => "image/avif",
        Some("pdf") => "application/pdf",
        Some("json") => "application/json",
        Some("txt") => "text/plain",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("html") | Some("htm") => "text/html",
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        _ => "application/octet-stream",
    }
}
