//! Channel entity and repository trait.
//!
//! Maps to the `channels` table:
//! - id: BIGINT PRIMARY KEY (Snowflake ID)
//! - name: VARCHAR(100) NOT NULL (always lowercase)
//! - owner_id: BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE
//! - topic: VARCHAR(100) NOT NULL
//! - server_id: BIGINT NOT NULL REFERENCES servers(id) ON DELETE CASCADE
//! - banner: TEXT NULL (storage path)
//! - icon: TEXT NULL (storage path)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{FileAssets, FileField};
use crate::shared::error::AppError;

/// A named sub-unit of a server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Snowflake ID (primary key)
    pub id: i64,

    pub name: String,

    /// User ID of the channel owner
    pub owner_id: i64,

    pub topic: String,

    /// Server this channel belongs to
    pub server_id: i64,

    /// Storage path of the banner image
    pub banner: Option<String>,

    /// Storage path of the icon image
    pub icon: Option<String>,
}

/// Column width of `channels.name`, in characters.
pub const MAX_CHANNEL_NAME_LENGTH: usize = 100;

impl Channel {
    /// Lowercase the name. Applied on every write.
    ///
    /// Fails when the lowercased form no longer fits the column (`İ` lowercases
    /// to two chars).
    pub fn normalize(&mut self) -> Result<(), AppError> {
        let name = normalize_name(&self.name);
        if name.chars().count() > MAX_CHANNEL_NAME_LENGTH {
            return Err(AppError::Validation(format!(
                "name: must be at most {} characters once lowercased",
                MAX_CHANNEL_NAME_LENGTH
            )));
        }
        self.name = name;
        Ok(())
    }
}

/// Canonical stored form of a channel name.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
}

impl FileAssets for Channel {
    const FILE_FIELDS: &'static [FileField] = &[FileField::ChannelIcon, FileField::ChannelBanner];

    fn file(&self, field: FileField) -> Option<&str> {
        match field {
            FileField::ChannelIcon => self.icon.as_deref(),
            FileField::ChannelBanner => self.banner.as_deref(),
            FileField::CategoryIcon => None,
        }
    }

    fn set_file(&mut self, field: FileField, path: Option<String>) {
        match field {
            FileField::ChannelIcon => self.icon = path,
            FileField::ChannelBanner => self.banner = path,
            FileField::CategoryIcon => {}
        }
    }
}

/// Repository trait for Channel data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// Find a channel by ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Channel>, AppError>;

    /// List the channels of a server ordered by ID.
    async fn find_by_server_id(&self, server_id: i64) -> Result<Vec<Channel>, AppError>;

    /// Insert a new channel.
    async fn create(&self, channel: &Channel) -> Result<Channel, AppError>;

    /// Overwrite every mutable column of an existing channel.
    async fn update(&self, channel: &Channel) -> Result<Channel, AppError>;

    /// Delete a channel, returning it if a row matched.
    async fn delete(&self, id: i64) -> Result<Option<Channel>, AppError>;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn channel() -> Channel {
        Channel {
            id: 1,
            name: "General-Chat".into(),
            owner_id: 2,
            topic: "anything".into(),
            server_id: 3,
            banner: Some("channel/1/channel_banner/b.png".into()),
            icon: None,
        }
    }

    #[test]
    fn test_normalize_lowercases() {
        let mut c = channel();
        c.normalize().unwrap();
        assert_eq!(c.name, "general-chat");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut c = channel();
        c.normalize().unwrap();
        let once = c.name.clone();
        c.normalize().unwrap();
        assert_eq!(c.name, once);
    }

    #[test]
    fn test_normalize_unicode() {
        assert_eq!(normalize_name("ÉQUIPE"), "équipe");
    }

    #[test]
    fn test_normalize_rejects_name_that_grows_past_limit() {
        let mut c = channel();
        c.name = "İ".repeat(MAX_CHANNEL_NAME_LENGTH);

        let err = c.normalize().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(c.name.chars().count(), MAX_CHANNEL_NAME_LENGTH);
    }

    #[test]
    fn test_normalize_accepts_name_at_limit() {
        let mut c = channel();
        c.name = "A".repeat(MAX_CHANNEL_NAME_LENGTH);

        c.normalize().unwrap();
        assert_eq!(c.name, "a".repeat(MAX_CHANNEL_NAME_LENGTH));
    }

    #[test]
    fn test_stored_files() {
        let mut c = channel();
        assert_eq!(c.stored_files(), vec!["channel/1/channel_banner/b.png".to_string()]);

        c.set_file(FileField::ChannelIcon, Some("channel/1/channel_icon/i.png".into()));
        assert_eq!(
            c.stored_files(),
            vec![
                "channel/1/channel_icon/i.png".to_string(),
                "channel/1/channel_banner/b.png".to_string(),
            ]
        );
    }

    #[test]
    fn test_foreign_field_is_ignored() {
        let mut c = channel();
        c.set_file(FileField::CategoryIcon, Some("x".into()));
        assert_eq!(c.file(FileField::CategoryIcon), None);
        assert_eq!(c, channel());
    }
}
