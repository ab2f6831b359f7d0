//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! - **FileField**: the catalogue of file-valued entity fields
//! - **ImageUpload**: an uploaded image and its validators

mod file_field;
mod upload;

pub use file_field::*;
pub use upload::*;
