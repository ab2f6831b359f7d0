//! Custom Extractors
//!
//! Axum extractors for the caller's identity and image uploads.

use std::convert::Infallible;

use axum::{
    extract::{FromRequest, FromRequestParts, Multipart, OptionalFromRequestParts, Request},
    http::{request::Parts, StatusCode},
};

use crate::domain::value_objects::ImageUpload;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;

/// Name of the multipart field carrying an uploaded image.
pub const UPLOAD_FIELD: &str = "file";

/// Identity attached by the auth middleware. Missing identity is a 401.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or_else(AppError::authentication_required)
    }
}

/// `Option<AuthUser>` for routes that serve anonymous callers too.
impl<S> OptionalFromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<AuthUser>().copied())
    }
}

/// Map a multipart failure, keeping the body-limit status apart from malformed input.
fn upload_error(status: StatusCode, message: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(message)
    } else {
        AppError::BadRequest(message)
    }
}

/// A single image read from the `file` field of a multipart body.
#[derive(Debug)]
pub struct ImageForm(pub ImageUpload);

impl<S> FromRequest<S> for ImageForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| upload_error(e.status(), e.body_text()))?;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| upload_error(e.status(), e.body_text()))?
        {
            if field.name() != Some(UPLOAD_FIELD) {
                continue;
            }

            let filename = field.file_name().unwrap_or_default().to_string();
            let contents = field
                .bytes()
                .await
                .map_err(|e| upload_error(e.status(), e.body_text()))?;

            return Ok(ImageForm(ImageUpload::new(filename, contents)));
        }

        Err(AppError::BadRequest(format!(
            "Missing multipart field '{}'",
            UPLOAD_FIELD
        )))
    }
}
