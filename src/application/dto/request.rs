//! Request DTOs
//!
//! Data structures for API request bodies and query strings.

use serde::Deserialize;
use validator::Validate;

/// Create category request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,

    pub description: Option<String>,
}

/// Update category request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,

    pub description: Option<String>,
}

/// Create server request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateServerRequest {
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,

    /// Category ID
    pub category: String,

    #[validate(length(max = 100, message = "Description must be at most 100 characters"))]
    pub description: Option<String>,
}

/// Update server request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateServerRequest {
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,

    pub category: Option<String>,

    #[validate(length(max = 100, message = "Description must be at most 100 characters"))]
    pub description: Option<String>,
}

/// Create channel request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateChannelRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 100, message = "Topic must be 1-100 characters"))]
    pub topic: String,
}

/// Update channel request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateChannelRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Topic must be 1-100 characters"))]
    pub topic: Option<String>,
}

/// Server listing query parameters
///
/// Kept as raw strings: the listing decides what an empty or malformed
/// value means.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerListParams {
    pub category: Option<String>,
    pub qty: Option<String>,
    pub by_user: Option<String>,
    pub by_serverid: Option<String>,
    pub with_num_member: Option<String>,
}
