//! # Domain Layer
//!
//! Core business rules of the community backend, independent of any
//! framework or infrastructure concern.
//!
//! ## Structure
//!
//! - **entities**: Category, Server, Channel and their repository traits
//! - **value_objects**: file-field catalogue and upload validation
//! - **services**: stored-file bookkeeping across writes and deletes
//! - **storage**: the blob storage contract

pub mod entities;
pub mod services;
pub mod storage;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use storage::{FileStorage, StorageError};
pub use value_objects::*;
