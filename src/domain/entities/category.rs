//! Category entity and repository trait.
//!
//! Maps to the `categories` table:
//! - id: BIGINT PRIMARY KEY (Snowflake ID)
//! - name: VARCHAR(100) NULL
//! - description: TEXT NULL
//! - icon: TEXT NULL (storage path)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{FileAssets, FileField};
use crate::shared::error::AppError;

/// A named grouping of servers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Storage path of the icon file
    pub icon: Option<String>,
}

impl FileAssets for Category {
    const FILE_FIELDS: &'static [FileField] = &[FileField::CategoryIcon];

    fn file(&self, field: FileField) -> Option<&str> {
        match field {
            FileField::CategoryIcon => self.icon.as_deref(),
            _ => None,
        }
    }

    fn set_file(&mut self, field: FileField, path: Option<String>) {
        if field == FileField::CategoryIcon {
            self.icon = path;
        }
    }
}

/// Repository trait for Category data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Find a category by ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, AppError>;

    /// List all categories ordered by ID.
    async fn list(&self) -> Result<Vec<Category>, AppError>;

    /// Insert a new category.
    async fn create(&self, category: &Category) -> Result<Category, AppError>;

    /// Overwrite every column of an existing category.
    async fn update(&self, category: &Category) -> Result<Category, AppError>;

    /// Delete a category together with its servers and their channels.
    ///
    /// Returns the storage paths orphaned by the deletion (the category icon
    /// and the files of every cascaded channel), or `None` if no row matched.
    async fn delete(&self, id: i64) -> Result<Option<Vec<String>>, AppError>;
}
