//! Server Service
//!
//! Server CRUD, membership, and the filtered server listing.
//!
//! The listing runs its steps in a fixed order: the authentication gate,
//! parameter parsing, the existence check for `by_serverid`, and only then the
//! repository query. The repository applies category and id filters, orders
//! by id, truncates to `qty`, and restricts to the caller's memberships last.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::dto::request::ServerListParams;
use crate::application::services::AssetService;
use crate::domain::{Server, ServerQuery, ServerRecord, ServerRepository};
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

/// Server service trait
#[async_trait]
pub trait ServerService: Send + Sync {
    /// List servers through the filter pipeline
    async fn list_servers(
        &self,
        params: ServerListParams,
        viewer_id: Option<i64>,
    ) -> Result<ServerListing, AppError>;

    /// Get server by ID
    async fn get_server(&self, server_id: i64) -> Result<Server, AppError>;

    /// Create a server owned by `owner_id`
    async fn create_server(&self, owner_id: i64, request: CreateServerDto) -> Result<Server, AppError>;

    /// Update name, description, or category
    async fn update_server(&self, server_id: i64, update: UpdateServerDto) -> Result<Server, AppError>;

    /// Delete a server, its channels, and their files
    async fn delete_server(&self, server_id: i64) -> Result<(), AppError>;

    /// Add `user_id` to the member set
    async fn join_server(&self, server_id: i64, user_id: i64) -> Result<Server, AppError>;

    /// Remove `user_id` from the member set
    async fn leave_server(&self, server_id: i64, user_id: i64) -> Result<(), AppError>;
}

/// Create server request
#[derive(Debug, Clone)]
pub struct CreateServerDto {
    pub name: Option<String>,
    pub category_id: i64,
    pub description: Option<String>,
}

/// Update server request
#[derive(Debug, Clone, Default)]
pub struct UpdateServerDto {
    pub name: Option<String>,
    pub category_id: Option<i64>,
    pub description: Option<String>,
}

/// Result of a listing, in the shape the caller asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerListing {
    Plain(Vec<Server>),
    WithMemberCount(Vec<(Server, i64)>),
}

impl ServerListing {
    pub fn len(&self) -> usize {
        match self {
            Self::Plain(servers) => servers.len(),
            Self::WithMemberCount(servers) => servers.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn from_records(records: Vec<ServerRecord>, with_member_count: bool) -> Self {
        if !with_member_count {
            return Self::Plain(records.into_iter().map(|r| r.server).collect());
        }
        Self::WithMemberCount(
            records
                .into_iter()
                .map(|r| {
                    let count = r.member_count.unwrap_or(r.server.members.len() as i64);
                    (r.server, count)
                })
                .collect(),
        )
    }
}

/// Listing parameters after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ListingFilter {
    category: Option<String>,
    qty: Option<String>,
    by_user: bool,
    by_serverid: Option<String>,
    with_member_count: bool,
}

impl ListingFilter {
    fn from_params(params: ServerListParams) -> Self {
        let present = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        Self {
            category: present(params.category),
            qty: present(params.qty),
            by_user: params.by_user.as_deref() == Some("true"),
            by_serverid: present(params.by_serverid),
            with_member_count: present(params.with_num_member)
                .is_some_and(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "false" | "0")),
        }
    }

    fn requires_authentication(&self) -> bool {
        self.by_user || self.by_serverid.is_some()
    }
}

/// Parse `qty` and clamp it to `max_results`. Absent means the cap.
fn parse_qty(raw: Option<&str>, max_results: i64) -> Result<i64, AppError> {
    let Some(raw) = raw else {
        return Ok(max_results);
    };
    match raw.trim().parse::<i64>() {
        Ok(qty) if qty >= 0 => Ok(qty.min(max_results)),
        _ => Err(AppError::Validation(format!(
            "qty must be a non-negative integer, got {raw}"
        ))),
    }
}

fn server_not_found(raw: &str) -> AppError {
    AppError::Validation(format!("Server with id {raw} not found"))
}

/// ServerService implementation
pub struct ServerServiceImpl<S: ServerRepository> {
    server_repo: Arc<S>,
    assets: Arc<AssetService>,
    id_generator: Arc<SnowflakeGenerator>,
    max_results: i64,
}

impl<S: ServerRepository> ServerServiceImpl<S> {
    pub fn new(
        server_repo: Arc<S>,
        assets: Arc<AssetService>,
        id_generator: Arc<SnowflakeGenerator>,
        max_results: i64,
    ) -> Self {
        Self {
            server_repo,
            assets,
            id_generator,
            max_results,
        }
    }

    async fn resolve_server_id(&self, raw: &str) -> Result<i64, AppError> {
        let id = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| server_not_found(raw))?;
        if !self.server_repo.exists(id).await? {
            return Err(server_not_found(raw));
        }
        Ok(id)
    }
}

#[async_trait]
impl<S: ServerRepository + 'static> ServerService for ServerServiceImpl<S> {
    async fn list_servers(
        &self,
        params: ServerListParams,
        viewer_id: Option<i64>,
    ) -> Result<ServerListing, AppError> {
        let filter = ListingFilter::from_params(params);

        if filter.requires_authentication() && viewer_id.is_none() {
            return Err(AppError::authentication_required());
        }

        let limit = parse_qty(filter.qty.as_deref(), self.max_results)?;

        let server_id = match filter.by_serverid.as_deref() {
            Some(raw) => Some(self.resolve_server_id(raw).await?),
            None => None,
        };

        let query = ServerQuery {
            with_member_count: filter.with_member_count,
            server_id,
            category: filter.category,
            limit: Some(limit),
            member_id: if filter.by_user { viewer_id } else { None },
        };

        let records = self.server_repo.list(&query).await?;
        Ok(ServerListing::from_records(records, filter.with_member_count))
    }

    async fn get_server(&self, server_id: i64) -> Result<Server, AppError> {
        self.server_repo
            .find_by_id(server_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Server not found".into()))
    }

    async fn create_server(&self, owner_id: i64, request: CreateServerDto) -> Result<Server, AppError> {
        let server = Server {
            id: self.id_generator.generate(),
            name: request.name,
            owner_id,
            category_id: request.category_id,
            description: request.description,
            members: Vec::new(),
        };

        let created = self.server_repo.create(&server).await?;
        tracing::info!(server_id = created.id, owner_id, "Server created");
        Ok(created)
    }

    async fn update_server(&self, server_id: i64, update: UpdateServerDto) -> Result<Server, AppError> {
        let mut server = self.get_server(server_id).await?;

        if let Some(name) = update.name {
            server.name = Some(name);
        }
        if let Some(description) = update.description {
            server.description = Some(description);
        }
        if let Some(category_id) = update.category_id {
            server.category_id = category_id;
        }

        self.server_repo.update(&server).await
    }

    async fn delete_server(&self, server_id: i64) -> Result<(), AppError> {
        let orphaned = self
            .server_repo
            .delete(server_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Server not found".into()))?;

        let removed = self.assets.purge(&orphaned).await;
        tracing::info!(server_id, files_removed = removed, "Server deleted");
        Ok(())
    }

    async fn join_server(&self, server_id: i64, user_id: i64) -> Result<Server, AppError> {
        let server = self.get_server(server_id).await?;
        if server.is_member(user_id) {
            return Ok(server);
        }

        self.server_repo.add_member(server_id, user_id).await?;
        tracing::info!(server_id, user_id, "Member joined");
        self.get_server(server_id).await
    }

    async fn leave_server(&self, server_id: i64, user_id: i64) -> Result<(), AppError> {
        let server = self.get_server(server_id).await?;
        let removed = server.is_member(user_id)
            && self.server_repo.remove_member(server_id, user_id).await?;
        if !removed {
            return Err(AppError::NotFound("Not a member of this server".into()));
        }

        tracing::info!(server_id, user_id, "Member left");
        Ok(())
    }
}
