//! Category Repository Implementation
//!
//! PostgreSQL implementation of the CategoryRepository trait.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{Category, CategoryRepository};
use crate::infrastructure::database::map_write_error;
use crate::shared::error::AppError;

/// Database row representation of the categories table.
#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    name: Option<String>,
    description: Option<String>,
    icon: Option<String>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
            description: row.description,
            icon: row.icon,
        }
    }
}

/// PostgreSQL category repository implementation.
#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    /// Create a new PgCategoryRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, AppError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, description, icon FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Category::from))
    }

    async fn list(&self) -> Result<Vec<Category>, AppError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, description, icon FROM categories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn create(&self, category: &Category) -> Result<Category, AppError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            INSERT INTO categories (id, name, description, icon)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, icon
            "#,
        )
        .bind(category.id)
        .bind(&category.name)
        .bind(&category.description)
        .bind(&category.icon)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(row.into())
    }

    async fn update(&self, category: &Category) -> Result<Category, AppError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            UPDATE categories
            SET name = $2,
                description = $3,
                icon = $4
            WHERE id = $1
            RETURNING id, name, description, icon
            "#,
        )
        .bind(category.id)
        .bind(&category.name)
        .bind(&category.description)
        .bind(&category.icon)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", category.id)))?;

        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> Result<Option<Vec<String>>, AppError> {
        let mut tx = self.pool.begin().await?;

        // Channel files go with the cascade; collect them before the rows vanish.
        let mut orphans = sqlx::query_scalar::<_, String>(
            r#"
            SELECT f.path
            FROM channels ch
            INNER JOIN servers s ON s.id = ch.server_id
            CROSS JOIN LATERAL (VALUES (ch.icon), (ch.banner)) AS f(path)
            WHERE s.category_id = $1 AND f.path IS NOT NULL
            "#,
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        let deleted = sqlx::query_scalar::<_, Option<String>>(
            "DELETE FROM categories WHERE id = $1 RETURNING icon",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(icon) = deleted else {
            return Ok(None);
        };

        tx.commit().await?;

        orphans.extend(icon);
        Ok(Some(orphans))
    }
}
