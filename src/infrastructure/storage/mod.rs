//! File Storage Backends
//!
//! Implementations of the domain `FileStorage` contract.

pub mod local;
pub mod memory;

use std::sync::Arc;

use crate::config::{StorageBackend, StorageSettings};
use crate::domain::FileStorage;

pub use local::LocalFileStorage;
pub use memory::MemoryFileStorage;

/// Build the configured storage backend.
pub fn create_storage(settings: &StorageSettings) -> Arc<dyn FileStorage> {
    match settings.backend {
        StorageBackend::Local => Arc::new(LocalFileStorage::new(
            &settings.media_root,
            &settings.media_url,
        )),
        StorageBackend::Memory => Arc::new(MemoryFileStorage::new(&settings.media_url)),
    }
}
