//! Local filesystem storage.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use axum::body::Bytes;
use tokio::fs;

use crate::domain::storage::{check_relative_path, FileStorage, StorageError};

/// Stores files under a root directory, served from `media_url`.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    root: PathBuf,
    media_url: String,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>, media_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            media_url: media_url.into(),
        }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        check_relative_path(path)?;
        Ok(path.split('/').fold(self.root.clone(), |acc, seg| acc.join(seg)))
    }
}

fn io_error(path: &str) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        path: path.to_string(),
        source,
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn save(&self, path: &str, contents: Bytes) -> Result<(), StorageError> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).await.map_err(io_error(path))?;
        }
        fs::write(&full, &contents).await.map_err(io_error(path))?;

        tracing::debug!(path, bytes = contents.len(), "Stored file");
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        let full = self.resolve(path)?;
        match fs::remove_file(&full).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(path)(e)),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.media_url, path)
    }
}
