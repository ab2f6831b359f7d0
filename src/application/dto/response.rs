//! Response DTOs
//!
//! Data structures for API response bodies. IDs are rendered as strings and
//! stored file paths as public URLs.

use serde::Serialize;

use crate::application::services::ServerListing;
use crate::domain::{Category, Channel, FileStorage, Server};

fn file_url(storage: &dyn FileStorage, path: Option<&str>) -> Option<String> {
    path.map(|p| storage.url(p))
}

/// Category response
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

impl CategoryResponse {
    pub fn from_category(category: Category, storage: &dyn FileStorage) -> Self {
        Self {
            id: category.id.to_string(),
            icon: file_url(storage, category.icon.as_deref()),
            name: category.name,
            description: category.description,
        }
    }
}

/// Server response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerResponse {
    pub id: String,
    pub name: Option<String>,
    pub owner: String,
    pub category: String,
    pub description: Option<String>,
    pub member: Vec<String>,
}

impl From<Server> for ServerResponse {
    fn from(server: Server) -> Self {
        Self {
            id: server.id.to_string(),
            name: server.name,
            owner: server.owner_id.to_string(),
            category: server.category_id.to_string(),
            description: server.description,
            member: server.members.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// Server response carrying its member count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerWithMemberCountResponse {
    #[serde(flatten)]
    pub server: ServerResponse,
    pub num_members: i64,
}

/// Server listing in the shape the caller asked for
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ServerListResponse {
    Plain(Vec<ServerResponse>),
    WithMemberCount(Vec<ServerWithMemberCountResponse>),
}

impl From<ServerListing> for ServerListResponse {
    fn from(listing: ServerListing) -> Self {
        match listing {
            ServerListing::Plain(servers) => {
                Self::Plain(servers.into_iter().map(ServerResponse::from).collect())
            }
            ServerListing::WithMemberCount(servers) => Self::WithMemberCount(
                servers
                    .into_iter()
                    .map(|(server, num_members)| ServerWithMemberCountResponse {
                        server: server.into(),
                        num_members,
                    })
                    .collect(),
            ),
        }
    }
}

/// Channel response
#[derive(Debug, Serialize)]
pub struct ChannelResponse {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub topic: String,
    pub server: String,
    pub banner: Option<String>,
    pub icon: Option<String>,
}

impl ChannelResponse {
    pub fn from_channel(channel: Channel, storage: &dyn FileStorage) -> Self {
        Self {
            id: channel.id.to_string(),
            owner: channel.owner_id.to_string(),
            server: channel.server_id.to_string(),
            banner: file_url(storage, channel.banner.as_deref()),
            icon: file_url(storage, channel.icon.as_deref()),
            name: channel.name,
            topic: channel.topic,
        }
    }
}
