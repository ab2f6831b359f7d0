//! Category Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::{CreateCategoryRequest, UpdateCategoryRequest};
use crate::application::dto::response::CategoryResponse;
use crate::application::services::{
    CategoryService, CategoryServiceImpl, CreateCategoryDto, UpdateCategoryDto,
};
use crate::domain::Category;
use crate::infrastructure::repositories::PgCategoryRepository;
use crate::presentation::http::extractors::ImageForm;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::{parse_path_id, validate_body};
use crate::startup::AppState;

fn category_service(state: &AppState) -> CategoryServiceImpl<PgCategoryRepository> {
    CategoryServiceImpl::new(
        Arc::new(PgCategoryRepository::new(state.db.clone())),
        state.assets.clone(),
        state.snowflake.clone(),
    )
}

fn respond(state: &AppState, category: Category) -> Json<CategoryResponse> {
    Json(CategoryResponse::from_category(category, state.storage.as_ref()))
}

/// List categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let categories = category_service(&state).list_categories().await?;

    Ok(Json(
        categories
            .into_iter()
            .map(|c| CategoryResponse::from_category(c, state.storage.as_ref()))
            .collect(),
    ))
}

/// Create a category
pub async fn create_category(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(body): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), AppError> {
    validate_body(&body)?;

    let category = category_service(&state)
        .create_category(CreateCategoryDto {
            name: body.name,
            description: body.description,
        })
        .await?;

    Ok((StatusCode::CREATED, respond(&state, category)))
}

/// Get category by ID
pub async fn get_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> Result<Json<CategoryResponse>, AppError> {
    let category_id = parse_path_id(&category_id, "category")?;
    let category = category_service(&state).get_category(category_id).await?;
    Ok(respond(&state, category))
}

/// Update name and description
pub async fn update_category(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(category_id): Path<String>,
    Json(body): Json<UpdateCategoryRequest>,
) -> Result<Json<CategoryResponse>, AppError> {
    let category_id = parse_path_id(&category_id, "category")?;
    validate_body(&body)?;

    let category = category_service(&state)
        .update_category(
            category_id,
            UpdateCategoryDto {
                name: body.name,
                description: body.description,
            },
        )
        .await?;

    Ok(respond(&state, category))
}

/// Delete a category
pub async fn delete_category(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(category_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let category_id = parse_path_id(&category_id, "category")?;
    category_service(&state).delete_category(category_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Upload the category icon
pub async fn upload_icon(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(category_id): Path<String>,
    ImageForm(upload): ImageForm,
) -> Result<Json<CategoryResponse>, AppError> {
    let category_id = parse_path_id(&category_id, "category")?;
    let category = category_service(&state).set_icon(category_id, upload).await?;
    Ok(respond(&state, category))
}

/// Remove the category icon
pub async fn delete_icon(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(category_id): Path<String>,
) -> Result<Json<CategoryResponse>, AppError> {
    let category_id = parse_path_id(&category_id, "category")?;
    let category = category_service(&state).clear_icon(category_id).await?;
    Ok(respond(&state, category))
}
