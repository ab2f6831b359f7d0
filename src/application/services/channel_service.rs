//! Channel Service
//!
//! Channel CRUD plus icon and banner management. Names are lowercased on
//! every write.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::services::AssetService;
use crate::domain::value_objects::{FileAssets, FileField, ImageUpload};
use crate::domain::{Channel, ChannelRepository, ServerRepository};
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

/// Channel service trait
#[async_trait]
pub trait ChannelService: Send + Sync {
    /// Create a channel in a server
    async fn create_channel(
        &self,
        server_id: i64,
        owner_id: i64,
        request: CreateChannelDto,
    ) -> Result<Channel, AppError>;

    /// Get channel by ID
    async fn get_channel(&self, channel_id: i64) -> Result<Channel, AppError>;

    /// Get channels for a server
    async fn get_server_channels(&self, server_id: i64) -> Result<Vec<Channel>, AppError>;

    /// Update name and topic
    async fn update_channel(
        &self,
        channel_id: i64,
        update: UpdateChannelDto,
    ) -> Result<Channel, AppError>;

    /// Replace the icon or banner, deleting the previous file
    async fn set_file(
        &self,
        channel_id: i64,
        field: FileField,
        upload: ImageUpload,
    ) -> Result<Channel, AppError>;

    /// Remove the icon or banner and its file
    async fn clear_file(&self, channel_id: i64, field: FileField) -> Result<Channel, AppError>;

    /// Delete channel and its files
    async fn delete_channel(&self, channel_id: i64) -> Result<(), AppError>;
}

/// Create channel request
#[derive(Debug, Clone)]
pub struct CreateChannelDto {
    pub name: String,
    pub topic: String,
}

/// Update channel request
#[derive(Debug, Clone, Default)]
pub struct UpdateChannelDto {
    pub name: Option<String>,
    pub topic: Option<String>,
}

/// ChannelService implementation
pub struct ChannelServiceImpl<C, S>
where
    C: ChannelRepository,
    S: ServerRepository,
{
    channel_repo: Arc<C>,
    server_repo: Arc<S>,
    assets: Arc<AssetService>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl<C, S> ChannelServiceImpl<C, S>
where
    C: ChannelRepository,
    S: ServerRepository,
{
    pub fn new(
        channel_repo: Arc<C>,
        server_repo: Arc<S>,
        assets: Arc<AssetService>,
        id_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            channel_repo,
            server_repo,
            assets,
            id_generator,
        }
    }

    async fn ensure_server(&self, server_id: i64) -> Result<(), AppError> {
        if self.server_repo.exists(server_id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound("Server not found".into()))
        }
    }

    fn ensure_channel_field(field: FileField) -> Result<(), AppError> {
        if Channel::FILE_FIELDS.contains(&field) {
            Ok(())
        } else {
            Err(AppError::BadRequest(format!("Channels have no {} field", field)))
        }
    }

    /// Drop files `next` no longer references, then persist it.
    async fn save(&self, current: &Channel, mut next: Channel) -> Result<Channel, AppError> {
        next.normalize()?;
        self.assets.discard_superseded(current, &next).await;
        self.channel_repo.update(&next).await
    }
}

#[async_trait]
impl<C, S> ChannelService for ChannelServiceImpl<C, S>
where
    C: ChannelRepository + 'static,
    S: ServerRepository + 'static,
{
    async fn create_channel(
        &self,
        server_id: i64,
        owner_id: i64,
        request: CreateChannelDto,
    ) -> Result<Channel, AppError> {
        self.ensure_server(server_id).await?;

        let mut channel = Channel {
            id: self.id_generator.generate(),
            name: request.name,
            owner_id,
            topic: request.topic,
            server_id,
            banner: None,
            icon: None,
        };
        channel.normalize()?;

        let created = self.channel_repo.create(&channel).await?;
        tracing::info!(channel_id = created.id, server_id, "Channel created");
        Ok(created)
    }

    async fn get_channel(&self, channel_id: i64) -> Result<Channel, AppError> {
        self.channel_repo
            .find_by_id(channel_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Channel not found".into()))
    }

    async fn get_server_channels(&self, server_id: i64) -> Result<Vec<Channel>, AppError> {
        self.ensure_server(server_id).await?;
        self.channel_repo.find_by_server_id(server_id).await
    }

    async fn update_channel(
        &self,
        channel_id: i64,
        update: UpdateChannelDto,
    ) -> Result<Channel, AppError> {
        let current = self.get_channel(channel_id).await?;

        let mut next = current.clone();
        if let Some(name) = update.name {
            next.name = name;
        }
        if let Some(topic) = update.topic {
            next.topic = topic;
        }

        self.save(&current, next).await
    }

    async fn set_file(
        &self,
        channel_id: i64,
        field: FileField,
        upload: ImageUpload,
    ) -> Result<Channel, AppError> {
        Self::ensure_channel_field(field)?;
        let current = self.get_channel(channel_id).await?;
        let next = self.assets.attach(&current, channel_id, field, upload).await?;
        self.save(&current, next).await
    }

    async fn clear_file(&self, channel_id: i64, field: FileField) -> Result<Channel, AppError> {
        Self::ensure_channel_field(field)?;
        let current = self.get_channel(channel_id).await?;
        let mut next = current.clone();
        next.set_file(field, None);
        self.save(&current, next).await
    }

    async fn delete_channel(&self, channel_id: i64) -> Result<(), AppError> {
        let deleted = self
            .channel_repo
            .delete(channel_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Channel not found".into()))?;

        let removed = self.assets.purge_owned(&deleted).await;
        tracing::info!(channel_id, files_removed = removed, "Channel deleted");
        Ok(())
    }
}
