//! In-process storage, used for tests and ephemeral deployments.

use async_trait::async_trait;
use axum::body::Bytes;
use dashmap::DashMap;

use crate::domain::storage::{check_relative_path, FileStorage, StorageError};

/// Keeps file contents in a concurrent map keyed by path.
#[derive(Debug, Default)]
pub struct MemoryFileStorage {
    files: DashMap<String, Bytes>,
    media_url: String,
}

impl MemoryFileStorage {
    pub fn new(media_url: impl Into<String>) -> Self {
        Self {
            files: DashMap::new(),
            media_url: media_url.into(),
        }
    }

    /// Number of stored files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Stored paths, sorted.
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.files.iter().map(|e| e.key().clone()).collect();
        paths.sort();
        paths
    }
}

#[async_trait]
impl FileStorage for MemoryFileStorage {
    async fn save(&self, path: &str, contents: Bytes) -> Result<(), StorageError> {
        check_relative_path(path)?;
        self.files.insert(path.to_string(), contents);
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        check_relative_path(path)?;
        self.files.remove(path);
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.media_url, path)
    }
}
