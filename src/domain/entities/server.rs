//! Server entity and repository trait.
//!
//! Maps to the `servers` table:
//! - id: BIGINT PRIMARY KEY (Snowflake ID)
//! - name: VARCHAR(100) NULL
//! - owner_id: BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE
//! - category_id: BIGINT NOT NULL REFERENCES categories(id) ON DELETE CASCADE
//! - description: VARCHAR(100) NULL
//!
//! Membership lives in `server_members (server_id, user_id)`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A community unit owned by one identity, under one category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    /// Snowflake ID (primary key)
    pub id: i64,

    pub name: Option<String>,

    /// User ID of the server owner
    pub owner_id: i64,

    /// Category this server is listed under
    pub category_id: i64,

    pub description: Option<String>,

    /// User IDs of the members, ascending
    pub members: Vec<i64>,
}

impl Server {
    pub fn is_member(&self, user_id: i64) -> bool {
        self.members.contains(&user_id)
    }
}

/// A server as returned by a listing, with the member count when requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerRecord {
    pub server: Server,
    pub member_count: Option<i64>,
}

/// Validated listing criteria.
///
/// The repository applies them in this order: member-count annotation,
/// server id, category, truncation to `limit` (by ascending id), then the
/// membership filter on whatever survived truncation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerQuery {
    pub with_member_count: bool,
    pub server_id: Option<i64>,
    /// Category name, or category id when numeric
    pub category: Option<String>,
    pub limit: Option<i64>,
    /// Keep only servers this user is a member of
    pub member_id: Option<i64>,
}

/// Repository trait for Server data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServerRepository: Send + Sync {
    /// Find a server (with members) by ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Server>, AppError>;

    /// Whether a server with this ID exists.
    async fn exists(&self, id: i64) -> Result<bool, AppError>;

    /// Run a listing query.
    async fn list(&self, query: &ServerQuery) -> Result<Vec<ServerRecord>, AppError>;

    /// Insert a new server. Members are not written.
    async fn create(&self, server: &Server) -> Result<Server, AppError>;

    /// Update name, description and category of an existing server.
    async fn update(&self, server: &Server) -> Result<Server, AppError>;

    /// Delete a server together with its channels.
    ///
    /// Returns the storage paths of the cascaded channels' files, or `None`
    /// if no row matched.
    async fn delete(&self, id: i64) -> Result<Option<Vec<String>>, AppError>;

    /// Add a member. Adding an existing member is a no-op.
    async fn add_member(&self, server_id: i64, user_id: i64) -> Result<(), AppError>;

    /// Remove a member. Returns whether a membership was removed.
    async fn remove_member(&self, server_id: i64, user_id: i64) -> Result<bool, AppError>;
}
