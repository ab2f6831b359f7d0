//! Blob storage contract for uploaded files.
//!
//! Implemented in the infrastructure layer. Paths are relative, `/`-separated
//! and produced by [`FileField::upload_path`](super::FileField::upload_path).

use async_trait::async_trait;
use axum::body::Bytes;

/// Storage failure.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("invalid storage path: {0}")]
    InvalidPath(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// File storage backend.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Write `contents` at `path`, replacing any existing file.
    async fn save(&self, path: &str, contents: Bytes) -> Result<(), StorageError>;

    /// Remove the file at `path`. Removing a missing file succeeds.
    async fn delete(&self, path: &str) -> Result<(), StorageError>;

    /// Public URL under which `path` is served.
    fn url(&self, path: &str) -> String;
}

/// Reject absolute paths and parent-directory components.
pub fn check_relative_path(path: &str) -> Result<(), StorageError> {
    let bad = path.is_empty()
        || path.starts_with('/')
        || path.contains('\\')
        || path.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..");

    if bad {
        Err(StorageError::InvalidPath(path.to_string()))
    } else {
        Ok(())
    }
}
