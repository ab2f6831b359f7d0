//! Image uploads and their validation rules.

use axum::body::Bytes;

use super::FileField;
use crate::shared::error::AppError;

/// Extensions accepted for any image field.
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Default upper bound for icon uploads in bytes (1 MiB).
pub const DEFAULT_MAX_ICON_SIZE: usize = 1024 * 1024;

/// A file received from a client, not yet stored.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub contents: Bytes,
}

impl ImageUpload {
    pub fn new(filename: impl Into<String>, contents: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            contents: contents.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.contents.len()
    }

    /// Run the validators attached to `field`.
    ///
    /// Icons get the size and extension checks, banners the extension check only.
    pub fn validate_for(&self, field: FileField, max_icon_size: usize) -> Result<(), AppError> {
        if field.is_icon() {
            validate_icon_image_size(self.size(), max_icon_size)?;
        }
        validate_image_file_extension(&self.filename)
    }
}

/// Reject icons larger than `max` bytes.
pub fn validate_icon_image_size(size: usize, max: usize) -> Result<(), AppError> {
    if size > max {
        return Err(AppError::Validation(format!(
            "The maximum allowed icon size is {} bytes - size of the uploaded file: {} bytes",
            max, size
        )));
    }
    Ok(())
}

/// Reject filenames whose extension is not an accepted image type.
pub fn validate_image_file_extension(filename: &str) -> Result<(), AppError> {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Ok(())
    } else {
        Err(AppError::Validation("Unsupported file extension".into()))
    }
}

/// Strip any directory components a client smuggled into a filename.
pub fn sanitize_filename(raw: &str) -> Result<String, AppError> {
    let name = raw
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();

    if name.is_empty() || name == "." || name == ".." {
        return Err(AppError::Validation("A file name is required".into()));
    }
    Ok(name.to_string())
}
