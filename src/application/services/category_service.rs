//! Category Service
//!
//! Category CRUD plus icon management.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::services::AssetService;
use crate::domain::value_objects::{FileField, ImageUpload};
use crate::domain::{Category, CategoryRepository};
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

/// Category service trait
#[async_trait]
pub trait CategoryService: Send + Sync {
    /// List all categories
    async fn list_categories(&self) -> Result<Vec<Category>, AppError>;

    /// Get category by ID
    async fn get_category(&self, category_id: i64) -> Result<Category, AppError>;

    /// Create a category
    async fn create_category(&self, request: CreateCategoryDto) -> Result<Category, AppError>;

    /// Update name and description
    async fn update_category(
        &self,
        category_id: i64,
        update: UpdateCategoryDto,
    ) -> Result<Category, AppError>;

    /// Replace the icon, deleting the previous file
    async fn set_icon(&self, category_id: i64, upload: ImageUpload) -> Result<Category, AppError>;

    /// Remove the icon and its file
    async fn clear_icon(&self, category_id: i64) -> Result<Category, AppError>;

    /// Delete a category, its servers and channels, and every file they owned
    async fn delete_category(&self, category_id: i64) -> Result<(), AppError>;
}

/// Create category request
#[derive(Debug, Clone, Default)]
pub struct CreateCategoryDto {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Update category request
#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryDto {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// CategoryService implementation
pub struct CategoryServiceImpl<R: CategoryRepository> {
    category_repo: Arc<R>,
    assets: Arc<AssetService>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl<R: CategoryRepository> CategoryServiceImpl<R> {
    pub fn new(
        category_repo: Arc<R>,
        assets: Arc<AssetService>,
        id_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            category_repo,
            assets,
            id_generator,
        }
    }

    /// Drop files `next` no longer references, then persist it.
    async fn save(&self, current: &Category, next: Category) -> Result<Category, AppError> {
        self.assets.discard_superseded(current, &next).await;
        self.category_repo.update(&next).await
    }
}

#[async_trait]
impl<R: CategoryRepository + 'static> CategoryService for CategoryServiceImpl<R> {
    async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        self.category_repo.list().await
    }

    async fn get_category(&self, category_id: i64) -> Result<Category, AppError> {
        self.category_repo
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".into()))
    }

    async fn create_category(&self, request: CreateCategoryDto) -> Result<Category, AppError> {
        let category = Category {
            id: self.id_generator.generate(),
            name: request.name,
            description: request.description,
            icon: None,
        };

        let created = self.category_repo.create(&category).await?;
        tracing::info!(category_id = created.id, "Category created");
        Ok(created)
    }

    async fn update_category(
        &self,
        category_id: i64,
        update: UpdateCategoryDto,
    ) -> Result<Category, AppError> {
        let current = self.get_category(category_id).await?;

        let mut next = current.clone();
        if let Some(name) = update.name {
            next.name = Some(name);
        }
        if let Some(description) = update.description {
            next.description = Some(description);
        }

        self.save(&current, next).await
    }

    async fn set_icon(&self, category_id: i64, upload: ImageUpload) -> Result<Category, AppError> {
        let current = self.get_category(category_id).await?;
        let next = self
            .assets
            .attach(&current, category_id, FileField::CategoryIcon, upload)
            .await?;
        self.save(&current, next).await
    }

    async fn clear_icon(&self, category_id: i64) -> Result<Category, AppError> {
        let current = self.get_category(category_id).await?;
        let next = Category {
            icon: None,
            ..current.clone()
        };
        self.save(&current, next).await
    }

    async fn delete_category(&self, category_id: i64) -> Result<(), AppError> {
        let orphaned = self
            .category_repo
            .delete(category_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".into()))?;

        let removed = self.assets.purge(&orphaned).await;
        tracing::info!(category_id, files_removed = removed, "Category deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Bytes;
    use mockall::predicate::eq;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::domain::{FileStorage, MockCategoryRepository};
    use crate::infrastructure::storage::MemoryFileStorage;

    const OLD_ICON: &str = "category/7/category_icon/old.png";

    fn stored_category() -> Category {
        Category {
            id: 7,
            name: Some("Games".into()),
            description: None,
            icon: Some(OLD_ICON.into()),
        }
    }

    async fn service(
        repo: MockCategoryRepository,
    ) -> (CategoryServiceImpl<MockCategoryRepository>, Arc<MemoryFileStorage>) {
        let storage = Arc::new(MemoryFileStorage::new("/media/"));
        storage.save(OLD_ICON, Bytes::from_static(b"old")).await.unwrap();

        let assets = Arc::new(AssetService::new(storage.clone(), 1024));
        let ids = Arc::new(SnowflakeGenerator::new(0, 1));
        (CategoryServiceImpl::new(Arc::new(repo), assets, ids), storage)
    }

    #[tokio::test]
    async fn test_get_missing_category() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_find_by_id().with(eq(1)).returning(|_| Ok(None));
        let (service, _) = service(repo).await;

        let result = service.get_category(1).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_create()
            .withf(|c: &Category| c.id > 0 && c.name.as_deref() == Some("Music") && c.icon.is_none())
            .returning(|c| Ok(c.clone()));
        let (service, _) = service(repo).await;

        let created = service
            .create_category(CreateCategoryDto {
                name: Some("Music".into()),
                description: None,
            })
            .await
            .unwrap();
        assert_eq!(created.name.as_deref(), Some("Music"));
    }

    #[tokio::test]
    async fn test_set_icon_replaces_old_file() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(Some(stored_category())));
        repo.expect_update().times(1).returning(|c| Ok(c.clone()));
        let (service, storage) = service(repo).await;

        let updated = service
            .set_icon(7, ImageUpload::new("new.png", vec![1u8; 8]))
            .await
            .unwrap();

        assert_eq!(updated.icon.as_deref(), Some("category/7/category_icon/new.png"));
        assert_eq!(storage.paths(), vec!["category/7/category_icon/new.png".to_string()]);
    }

    #[tokio::test]
    async fn test_rejected_icon_leaves_state_untouched() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(Some(stored_category())));
        repo.expect_update().never();
        let (service, storage) = service(repo).await;

        let result = service
            .set_icon(7, ImageUpload::new("huge.png", vec![0u8; 2048]))
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(storage.paths(), vec![OLD_ICON.to_string()]);
    }

    #[tokio::test]
    async fn test_update_without_icon_change_keeps_file() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(Some(stored_category())));
        repo.expect_update()
            .withf(|c: &Category| c.name.as_deref() == Some("Retro") && c.icon.as_deref() == Some(OLD_ICON))
            .returning(|c| Ok(c.clone()));
        let (service, storage) = service(repo).await;

        service
            .update_category(
                7,
                UpdateCategoryDto {
                    name: Some("Retro".into()),
                    description: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(storage.paths(), vec![OLD_ICON.to_string()]);
    }

    #[tokio::test]
    async fn test_clear_icon_deletes_file() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(Some(stored_category())));
        repo.expect_update()
            .withf(|c: &Category| c.icon.is_none())
            .returning(|c| Ok(c.clone()));
        let (service, storage) = service(repo).await;

        service.clear_icon(7).await.unwrap();
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_delete_purges_orphaned_files() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_delete()
            .with(eq(7))
            .returning(|_| Ok(Some(vec![OLD_ICON.to_string()])));
        let (service, storage) = service(repo).await;

        service.delete_category(7).await.unwrap();
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_category() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_delete().returning(|_| Ok(None));
        let (service, storage) = service(repo).await;

        let result = service.delete_category(7).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(storage.len(), 1);
    }
}
