//! Server Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::{CreateServerRequest, ServerListParams, UpdateServerRequest};
use crate::application::dto::response::{ServerListResponse, ServerResponse};
use crate::application::services::{
    CreateServerDto, ServerListing, ServerService, ServerServiceImpl, UpdateServerDto,
};
use crate::infrastructure::metrics;
use crate::infrastructure::repositories::PgServerRepository;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::{parse_path_id, parse_reference_id, validate_body};
use crate::startup::AppState;

fn server_service(state: &AppState) -> ServerServiceImpl<PgServerRepository> {
    ServerServiceImpl::new(
        Arc::new(PgServerRepository::new(state.db.clone())),
        state.assets.clone(),
        state.snowflake.clone(),
        state.settings.listing.max_results,
    )
}

/// List servers
///
/// Query parameters: `category`, `qty`, `by_user`, `by_serverid`,
/// `with_num_member`. Identity-scoped filters require a bearer token.
pub async fn list_servers(
    State(state): State<AppState>,
    auth: Option<AuthUser>,
    Query(params): Query<ServerListParams>,
) -> Result<Json<ServerListResponse>, AppError> {
    let viewer_id = auth.map(|a| a.user_id);
    let listing = server_service(&state).list_servers(params, viewer_id).await?;

    metrics::record_server_listing(matches!(listing, ServerListing::WithMemberCount(_)));
    tracing::debug!(count = listing.len(), viewer_id, "Server listing served");

    Ok(Json(listing.into()))
}

/// Create a server owned by the caller
pub async fn create_server(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateServerRequest>,
) -> Result<(StatusCode, Json<ServerResponse>), AppError> {
    validate_body(&body)?;

    let request = CreateServerDto {
        name: body.name,
        category_id: parse_reference_id(&body.category, "category")?,
        description: body.description,
    };

    let server = server_service(&state)
        .create_server(auth.user_id, request)
        .await?;

    Ok((StatusCode::CREATED, Json(server.into())))
}

/// Get server by ID
pub async fn get_server(
    State(state): State<AppState>,
    Path(server_id): Path<String>,
) -> Result<Json<ServerResponse>, AppError> {
    let server_id = parse_path_id(&server_id, "server")?;
    let server = server_service(&state).get_server(server_id).await?;
    Ok(Json(server.into()))
}

/// Update server settings
pub async fn update_server(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(server_id): Path<String>,
    Json(body): Json<UpdateServerRequest>,
) -> Result<Json<ServerResponse>, AppError> {
    let server_id = parse_path_id(&server_id, "server")?;
    validate_body(&body)?;

    let update = UpdateServerDto {
        name: body.name,
        category_id: body
            .category
            .as_deref()
            .map(|raw| parse_reference_id(raw, "category"))
            .transpose()?,
        description: body.description,
    };

    let server = server_service(&state).update_server(server_id, update).await?;
    Ok(Json(server.into()))
}

/// Delete a server
pub async fn delete_server(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(server_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let server_id = parse_path_id(&server_id, "server")?;
    server_service(&state).delete_server(server_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Join a server as the caller
pub async fn join_server(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(server_id): Path<String>,
) -> Result<Json<ServerResponse>, AppError> {
    let server_id = parse_path_id(&server_id, "server")?;
    let server = server_service(&state)
        .join_server(server_id, auth.user_id)
        .await?;
    Ok(Json(server.into()))
}

/// Leave a server as the caller
pub async fn leave_server(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(server_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let server_id = parse_path_id(&server_id, "server")?;
    server_service(&state)
        .leave_server(server_id, auth.user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
