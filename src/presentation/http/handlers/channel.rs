//! Channel Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::{CreateChannelRequest, UpdateChannelRequest};
use crate::application::dto::response::ChannelResponse;
use crate::application::services::{
    ChannelService, ChannelServiceImpl, CreateChannelDto, UpdateChannelDto,
};
use crate::domain::value_objects::FileField;
use crate::domain::Channel;
use crate::infrastructure::repositories::{PgChannelRepository, PgServerRepository};
use crate::presentation::http::extractors::ImageForm;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::{parse_path_id, validate_body};
use crate::startup::AppState;

fn channel_service(state: &AppState) -> ChannelServiceImpl<PgChannelRepository, PgServerRepository> {
    ChannelServiceImpl::new(
        Arc::new(PgChannelRepository::new(state.db.clone())),
        Arc::new(PgServerRepository::new(state.db.clone())),
        state.assets.clone(),
        state.snowflake.clone(),
    )
}

fn respond(state: &AppState, channel: Channel) -> Json<ChannelResponse> {
    Json(ChannelResponse::from_channel(channel, state.storage.as_ref()))
}

/// List the channels of a server
pub async fn get_server_channels(
    State(state): State<AppState>,
    Path(server_id): Path<String>,
) -> Result<Json<Vec<ChannelResponse>>, AppError> {
    let server_id = parse_path_id(&server_id, "server")?;
    let channels = channel_service(&state).get_server_channels(server_id).await?;

    Ok(Json(
        channels
            .into_iter()
            .map(|c| ChannelResponse::from_channel(c, state.storage.as_ref()))
            .collect(),
    ))
}

/// Create a channel in a server
pub async fn create_channel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(server_id): Path<String>,
    Json(body): Json<CreateChannelRequest>,
) -> Result<(StatusCode, Json<ChannelResponse>), AppError> {
    let server_id = parse_path_id(&server_id, "server")?;
    validate_body(&body)?;

    let channel = channel_service(&state)
        .create_channel(
            server_id,
            auth.user_id,
            CreateChannelDto {
                name: body.name,
                topic: body.topic,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, respond(&state, channel)))
}

/// Get channel by ID
pub async fn get_channel(
    State(state): State<AppState>,
    Path(channel_id): Path<String>,
) -> Result<Json<ChannelResponse>, AppError> {
    let channel_id = parse_path_id(&channel_id, "channel")?;
    let channel = channel_service(&state).get_channel(channel_id).await?;
    Ok(respond(&state, channel))
}

/// Update name and topic
pub async fn update_channel(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(channel_id): Path<String>,
    Json(body): Json<UpdateChannelRequest>,
) -> Result<Json<ChannelResponse>, AppError> {
    let channel_id = parse_path_id(&channel_id, "channel")?;
    validate_body(&body)?;

    let channel = channel_service(&state)
        .update_channel(
            channel_id,
            UpdateChannelDto {
                name: body.name,
                topic: body.topic,
            },
        )
        .await?;

    Ok(respond(&state, channel))
}

/// Delete channel
pub async fn delete_channel(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(channel_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let channel_id = parse_path_id(&channel_id, "channel")?;
    channel_service(&state).delete_channel(channel_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn upload_file(
    state: AppState,
    channel_id: String,
    field: FileField,
    form: ImageForm,
) -> Result<Json<ChannelResponse>, AppError> {
    let channel_id = parse_path_id(&channel_id, "channel")?;
    let channel = channel_service(&state)
        .set_file(channel_id, field, form.0)
        .await?;
    Ok(respond(&state, channel))
}

async fn clear_file(
    state: AppState,
    channel_id: String,
    field: FileField,
) -> Result<Json<ChannelResponse>, AppError> {
    let channel_id = parse_path_id(&channel_id, "channel")?;
    let channel = channel_service(&state).clear_file(channel_id, field).await?;
    Ok(respond(&state, channel))
}

pub async fn upload_icon(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(channel_id): Path<String>,
    form: ImageForm,
) -> Result<Json<ChannelResponse>, AppError> {
    upload_file(state, channel_id, FileField::ChannelIcon, form).await
}

pub async fn delete_icon(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(channel_id): Path<String>,
) -> Result<Json<ChannelResponse>, AppError> {
    clear_file(state, channel_id, FileField::ChannelIcon).await
}

pub async fn upload_banner(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(channel_id): Path<String>,
    form: ImageForm,
) -> Result<Json<ChannelResponse>, AppError> {
    upload_file(state, channel_id, FileField::ChannelBanner, form).await
}

pub async fn delete_banner(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(channel_id): Path<String>,
) -> Result<Json<ChannelResponse>, AppError> {
    clear_file(state, channel_id, FileField::ChannelBanner).await
}
