//! Channel Repository Implementation
//!
//! PostgreSQL implementation of the ChannelRepository trait.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{Channel, ChannelRepository};
use crate::infrastructure::database::map_write_error;
use crate::shared::error::AppError;

/// Database row representation of the channels table.
#[derive(Debug, sqlx::FromRow)]
struct ChannelRow {
    id: i64,
    name: String,
    owner_id: i64,
    topic: String,
    server_id: i64,
    banner: Option<String>,
    icon: Option<String>,
}

impl From<ChannelRow> for Channel {
    fn from(row: ChannelRow) -> Self {
        Channel {
            id: row.id,
            name: row.name,
            owner_id: row.owner_id,
            topic: row.topic,
            server_id: row.server_id,
            banner: row.banner,
            icon: row.icon,
        }
    }
}

/// PostgreSQL channel repository implementation.
#[derive(Clone)]
pub struct PgChannelRepository {
    pool: PgPool,
}

impl PgChannelRepository {
    /// Create a new PgChannelRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChannelRepository for PgChannelRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Channel>, AppError> {
        let row = sqlx::query_as::<_, ChannelRow>(
            r#"
            SELECT id, name, owner_id, topic, server_id, banner, icon
            FROM channels
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Channel::from))
    }

    async fn find_by_server_id(&self, server_id: i64) -> Result<Vec<Channel>, AppError> {
        let rows = sqlx::query_as::<_, ChannelRow>(
            r#"
            SELECT id, name, owner_id, topic, server_id, banner, icon
            FROM channels
            WHERE server_id = $1
            ORDER BY id
            "#,
        )
        .bind(server_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Channel::from).collect())
    }

    async fn create(&self, channel: &Channel) -> Result<Channel, AppError> {
        let row = sqlx::query_as::<_, ChannelRow>(
            r#"
            INSERT INTO channels (id, name, owner_id, topic, server_id, banner, icon)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, owner_id, topic, server_id, banner, icon
            "#,
        )
        .bind(channel.id)
        .bind(&channel.name)
        .bind(channel.owner_id)
        .bind(&channel.topic)
        .bind(channel.server_id)
        .bind(&channel.banner)
        .bind(&channel.icon)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(row.into())
    }

    async fn update(&self, channel: &Channel) -> Result<Channel, AppError> {
        let row = sqlx::query_as::<_, ChannelRow>(
            r#"
            UPDATE channels
            SET name = $2,
                topic = $3,
                banner = $4,
                icon = $5
            WHERE id = $1
            RETURNING id, name, owner_id, topic, server_id, banner, icon
            "#,
        )
        .bind(channel.id)
        .bind(&channel.name)
        .bind(&channel.topic)
        .bind(&channel.banner)
        .bind(&channel.icon)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Channel with id {} not found", channel.id)))?;

        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> Result<Option<Channel>, AppError> {
        let row = sqlx::query_as::<_, ChannelRow>(
            r#"
            DELETE FROM channels
            WHERE id = $1
            RETURNING id, name, owner_id, topic, server_id, banner, icon
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Channel::from))
    }
}
