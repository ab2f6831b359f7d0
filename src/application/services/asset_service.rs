//! Asset Service
//!
//! Stores validated uploads and purges files that entity writes and deletes
//! leave behind. Purging is best-effort: a failed deletion is logged and
//! counted, never propagated.

use std::sync::Arc;

use crate::domain::services::{owned_files, superseded_files};
use crate::domain::value_objects::{sanitize_filename, FileAssets, FileField, ImageUpload};
use crate::domain::FileStorage;
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// Upload and cleanup of entity-owned files.
pub struct AssetService {
    storage: Arc<dyn FileStorage>,
    max_icon_size: usize,
}

impl AssetService {
    pub fn new(storage: Arc<dyn FileStorage>, max_icon_size: usize) -> Self {
        Self {
            storage,
            max_icon_size,
        }
    }

    /// Public URL of a stored path.
    pub fn url(&self, path: &str) -> String {
        self.storage.url(path)
    }

    /// Validate `upload` against the rules of `field` and write it under the
    /// path derived from `entity_id`. Nothing is written if validation fails.
    pub async fn store(
        &self,
        field: FileField,
        entity_id: i64,
        upload: ImageUpload,
    ) -> Result<String, AppError> {
        let filename = sanitize_filename(&upload.filename)?;
        let upload = ImageUpload {
            filename,
            ..upload
        };
        upload.validate_for(field, self.max_icon_size)?;

        let path = field.upload_path(entity_id, &upload.filename);
        self.storage.save(&path, upload.contents).await?;

        tracing::info!(%field, entity_id, path = %path, "Stored upload");
        Ok(path)
    }

    /// Store `upload` and return a copy of `current` referencing it.
    pub async fn attach<T>(
        &self,
        current: &T,
        entity_id: i64,
        field: FileField,
        upload: ImageUpload,
    ) -> Result<T, AppError>
    where
        T: FileAssets + Clone,
    {
        let path = self.store(field, entity_id, upload).await?;
        let mut next = current.clone();
        next.set_file(field, Some(path));
        Ok(next)
    }

    /// Delete the files `current` references that `next` no longer does.
    /// Called before `next` is persisted.
    pub async fn discard_superseded<T: FileAssets>(&self, current: &T, next: &T) -> usize {
        self.purge(&superseded_files(current, next)).await
    }

    /// Post-delete finalizer for a single entity.
    pub async fn purge_owned<T: FileAssets>(&self, entity: &T) -> usize {
        self.purge(&owned_files(entity)).await
    }

    /// Delete `paths` from storage, returning how many were removed.
    pub async fn purge(&self, paths: &[String]) -> usize {
        let mut removed = 0;
        for path in paths {
            match self.storage.delete(path).await {
                Ok(()) => {
                    removed += 1;
                    metrics::record_file_cleanup(true);
                    tracing::debug!(path = %path, "Deleted stored file");
                }
                Err(e) => {
                    metrics::record_file_cleanup(false);
                    tracing::warn!(path = %path, error = %e, "Failed to delete stored file");
                }
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Bytes;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::domain::Category;
    use crate::infrastructure::storage::MemoryFileStorage;

    fn service() -> (AssetService, Arc<MemoryFileStorage>) {
        let storage = Arc::new(MemoryFileStorage::new("/media/"));
        (AssetService::new(storage.clone(), 16), storage)
    }

    #[tokio::test]
    async fn test_store_uses_field_path() {
        let (assets, storage) = service();
        let path = assets
            .store(FileField::CategoryIcon, 5, ImageUpload::new("../Logo.PNG", vec![1u8; 4]))
            .await
            .unwrap();

        assert_eq!(path, "category/5/category_icon/Logo.PNG");
        assert_eq!(storage.paths(), vec![path]);
    }

    #[tokio::test]
    async fn test_invalid_upload_writes_nothing() {
        let (assets, storage) = service();

        let too_big = assets
            .store(FileField::ChannelIcon, 1, ImageUpload::new("a.png", vec![0u8; 17]))
            .await;
        assert!(matches!(too_big, Err(AppError::Validation(_))));

        let bad_ext = assets
            .store(FileField::ChannelBanner, 1, ImageUpload::new("a.tiff", vec![0u8; 1]))
            .await;
        assert!(matches!(bad_ext, Err(AppError::Validation(_))));

        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_replacing_keeps_one_live_file() {
        let (assets, storage) = service();
        let current = Category {
            id: 3,
            ..Default::default()
        };

        let first = assets
            .attach(&current, 3, FileField::CategoryIcon, ImageUpload::new("a.png", vec![1u8]))
            .await
            .unwrap();
        assets.discard_superseded(&current, &first).await;

        let second = assets
            .attach(&first, 3, FileField::CategoryIcon, ImageUpload::new("b.png", vec![2u8]))
            .await
            .unwrap();
        let removed = assets.discard_superseded(&first, &second).await;

        assert_eq!(removed, 1);
        assert_eq!(storage.paths(), vec!["category/3/category_icon/b.png".to_string()]);
    }

    #[tokio::test]
    async fn test_purge_owned() {
        let (assets, storage) = service();
        storage
            .save("category/3/category_icon/a.png", Bytes::from_static(b"x"))
            .await
            .unwrap();

        let category = Category {
            id: 3,
            icon: Some("category/3/category_icon/a.png".into()),
            ..Default::default()
        };
        assert_eq!(assets.purge_owned(&category).await, 1);
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_purge_is_best_effort() {
        let (assets, _storage) = service();
        let removed = assets
            .purge(&["../escape".to_string(), "ok/file.png".to_string()])
            .await;
        assert_eq!(removed, 1);
    }
}
